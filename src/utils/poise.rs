use poise::{serenity_prelude::CreateAttachment, CreateReply};

use crate::{
    dispatch::{Invocation, Outcome, Reply, Responder, MESSAGE_LIMIT},
    errors::{CommandError, ReplyDeliveryError},
    framework::data::PoiseData,
};

use super::text::truncate;

pub type Context<'a> = poise::Context<'a, PoiseData, CommandError>;

pub type Command = poise::Command<PoiseData, CommandError>;
pub type CommandResult = Result<(), CommandError>;

/// Sends [`Reply`]s through the interaction that triggered the command.
#[derive(Clone, Copy)]
pub struct PoiseResponder<'a> {
    ctx: Context<'a>,
}

impl<'a> PoiseResponder<'a> {
    pub const fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }
}

impl Responder for PoiseResponder<'_> {
    async fn send(&self, reply: Reply) -> Result<(), ReplyDeliveryError> {
        let builder = match reply {
            Reply::Text { content, ephemeral } => CreateReply::default()
                .content(truncate(&content, MESSAGE_LIMIT))
                .ephemeral(ephemeral),
            Reply::Attachment { name, bytes } => {
                CreateReply::default().attachment(CreateAttachment::bytes(bytes, name))
            }
        };

        self.ctx.send(builder).await?;
        Ok(())
    }
}

pub trait ContextExt {
    fn log_command(&self);

    /// Hands this invocation to the dispatcher.
    async fn dispatch(&self) -> Result<Outcome, CommandError>;
}

impl ContextExt for Context<'_> {
    fn log_command(&self) {
        let place = if self.guild_id().is_some() {
            format!("#{}", self.channel_id())
        } else {
            "dms".to_owned()
        };

        tracing::info!(
            "@{} ({}): {}",
            self.author().name,
            place,
            self.invocation_string()
        );
    }

    async fn dispatch(&self) -> Result<Outcome, CommandError> {
        let data = self.data();
        let responder = PoiseResponder::new(*self);
        let invocation = Invocation::new(&responder, data.resources());

        let outcome = data
            .dispatcher()
            .dispatch(&self.command().name, &invocation)
            .await?;

        Ok(outcome)
    }
}
