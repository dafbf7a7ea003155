use tracing::{instrument, warn};

use crate::{
    dispatch::{Invocation, Reply, Responder},
    errors::HandlerError,
    utils::{
        poise::{CommandResult, ContextExt},
        Context,
    },
};

/// Name the image is uploaded under.
pub const FILE_NAME: &str = "rem.png";

/// Sends a Rem image to the channel
#[instrument(skip_all)]
#[poise::command(
    slash_command,
    required_bot_permissions = "SEND_MESSAGES | VIEW_CHANNEL | ATTACH_FILES"
)]
pub async fn rem(ctx: Context<'_>) -> CommandResult {
    ctx.log_command();
    ctx.dispatch().await?;
    Ok(())
}

pub(crate) async fn execute<R: Responder>(invocation: &Invocation<'_, R>) -> Result<(), HandlerError> {
    let path = invocation.resources().rem_image();

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| HandlerError::Attachment {
            path: path.to_owned(),
            source,
        })?;

    invocation.reply(Reply::attachment(FILE_NAME, bytes)).await?;

    Ok(())
}

/// Startup check, the command itself still copes with a missing file.
pub fn check_image(path: &std::path::Path) {
    if !path.is_file() {
        warn!(path = %path.display(), "rem image not found, /rem will fall back to an apology");
    }
}
