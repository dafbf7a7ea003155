#![warn(clippy::perf)]
#![warn(clippy::unwrap_used)]

use std::process::ExitCode;

use poise::serenity_prelude::{self as serenity, GatewayIntents};
use tracing::{error, info};

mod commands;
mod dispatch;
mod errors;
mod framework;
mod utils;

use errors::StartupError;
use framework::{data::PoiseData, secrets::Secrets, Config};

mod built_info {
    // The file has been placed there by the build script.
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

#[tokio::main]
async fn main() -> ExitCode {
    framework::logging::init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "failed to start");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    info!(
        "rembot {} ({} build)",
        built_info::PKG_VERSION,
        built_info::PROFILE
    );

    let secrets = Secrets::from_env()?;
    let config = Config::load()?;
    let data = PoiseData::new(config)?;

    let framework = framework::poise::build(data);

    let mut client = serenity::Client::builder(secrets.bot_token(), GatewayIntents::non_privileged())
        .framework(framework)
        .await?;

    client.start().await?;

    Ok(())
}
