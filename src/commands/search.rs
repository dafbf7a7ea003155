use tracing::instrument;

use crate::{
    dispatch::{Invocation, Reply, Responder},
    errors::HandlerError,
    utils::{
        poise::{CommandResult, ContextExt},
        Context,
    },
};

mod core;
pub use self::core::SearchLists;
#[cfg(test)]
pub use self::core::Category;

/// Search for something mysterious!
#[instrument(skip_all)]
#[poise::command(
    slash_command,
    required_bot_permissions = "SEND_MESSAGES | VIEW_CHANNEL"
)]
pub async fn search(ctx: Context<'_>) -> CommandResult {
    ctx.log_command();
    ctx.dispatch().await?;
    Ok(())
}

pub(crate) async fn execute<R: Responder>(invocation: &Invocation<'_, R>) -> Result<(), HandlerError> {
    let sentence = invocation
        .resources()
        .search_lists()
        .roll(&mut rand::thread_rng());

    invocation.reply(Reply::text(sentence)).await?;

    Ok(())
}
