use std::path::PathBuf;

use poise::{
    serenity_prelude::{self as serenity, Permissions},
    BoxFuture, FrameworkError,
};
use thiserror::Error as ThisError;
use tracing::{error, error_span, warn};

use crate::framework::data::PoiseData;

pub fn handle_framework_error(err: FrameworkError<'_, PoiseData, CommandError>) -> BoxFuture<'_, ()> {
    Box::pin(async {
        match err {
            FrameworkError::Command { error, ctx, .. } => {
                let command = ctx.invoked_command_name();
                let span = error_span!("", command);
                let _enter = span.enter();

                // the reply channel itself is gone, so there is nobody left to tell
                error!(%error, "reply could not be delivered");
            }
            FrameworkError::MissingBotPermissions {
                missing_permissions,
                ctx,
                ..
            } => {
                let command = ctx.invoked_command_name();
                let span = error_span!("", command);
                let _enter = span.enter();

                error!(%missing_permissions, "bot is missing permissions");
            }
            FrameworkError::UnknownInteraction { interaction, .. } => {
                warn!(command = %interaction.data.name, "ignoring unknown command");
            }
            _ => {
                if let Err(source) = poise::builtins::on_error(err).await {
                    error!(%source, "failed to handle framework error");
                }
            }
        };
    })
}

/// The error type poise sees from every command.
#[derive(Debug, ThisError)]
pub enum CommandError {
    #[error("reply delivery failed: {0}")]
    Delivery(#[from] ReplyDeliveryError),

    #[error("other serenity error: {0}")]
    Serenity(#[from] serenity::Error),
}

/// Fatal problems while bringing the bot up.
#[derive(Debug, ThisError)]
pub enum StartupError {
    #[error("problem loading config: {0}")]
    Config(#[from] crate::framework::config::Error),

    #[error(transparent)]
    Secrets(#[from] crate::framework::secrets::MissingSecretError),

    #[error(transparent)]
    ResourceRead(#[from] ResourceReadError),

    #[error("discord client error: {0}")]
    Client(#[from] serenity::Error),
}

#[derive(Debug, ThisError)]
#[error("couldn't read {}: {source}", path.display())]
pub struct ResourceReadError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl ResourceReadError {
    pub fn new(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

/// Anything that goes wrong inside a command's own logic.
///
/// These never leave the dispatcher: they get logged and swapped for the
/// command's fallback reply.
#[derive(Debug, ThisError)]
pub enum HandlerError {
    #[error("couldn't send reply: {0}")]
    Reply(#[from] ReplyDeliveryError),

    #[error("couldn't build attachment from {}: {source}", path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, ThisError)]
pub enum ReplyDeliveryError {
    #[error(transparent)]
    Permissions(#[from] MissingPermissionsError),

    #[error(transparent)]
    MessageTooLong(#[from] MessageTooLongError),

    #[error("{0}")]
    Other(serenity::Error),
}

impl From<serenity::Error> for ReplyDeliveryError {
    fn from(value: serenity::Error) -> Self {
        match value {
            serenity::Error::Model(ref model) => match model {
                serenity::ModelError::InvalidPermissions { required, present } => {
                    Self::Permissions(MissingPermissionsError {
                        required: *required,
                        present: *present,
                    })
                }
                serenity::ModelError::MessageTooLong(len) => {
                    Self::MessageTooLong(MessageTooLongError { length: *len })
                }
                _ => Self::Other(value),
            },
            _ => Self::Other(value),
        }
    }
}

#[derive(Debug, ThisError)]
#[error("missing permissions: {}", self.missing())]
pub struct MissingPermissionsError {
    required: Permissions,
    present: Permissions,
}

impl MissingPermissionsError {
    fn missing(&self) -> Permissions {
        self.required.difference(self.present)
    }
}

#[derive(Debug, ThisError)]
#[error("message is too long ({length} characters)")]
pub struct MessageTooLongError {
    pub length: usize,
}
