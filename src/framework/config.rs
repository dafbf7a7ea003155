use std::path::{Path, PathBuf};

use poise::serenity_prelude::{ActivityData, GuildId};
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::utils::text::normalize_whitespace;

pub const CONFIG_FILE_VAR: &str = "REMBOT_TOML";
pub const DEFAULT_CONFIG_FILE: &str = "./rembot.toml";

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
}

impl Config {
    /// Reads the TOML file at `REMBOT_TOML` (or `./rembot.toml`), then
    /// `REMBOT__SECTION__KEY` environment overrides. The file is optional.
    #[tracing::instrument(name = "config")]
    pub fn load() -> Result<Self, Error> {
        let path = if let Ok(path) = std::env::var(CONFIG_FILE_VAR) {
            info!(path, "looking for config file with {CONFIG_FILE_VAR}...");
            path
        } else {
            debug!(path = DEFAULT_CONFIG_FILE, "{CONFIG_FILE_VAR} unset, using default path");
            DEFAULT_CONFIG_FILE.to_owned()
        };

        Self::from_sources(
            ::config::File::new(&path, ::config::FileFormat::Toml).required(false),
            ::config::Environment::with_prefix("REMBOT").separator("__"),
        )
    }

    fn from_sources(
        file: impl ::config::Source + Send + Sync + 'static,
        env: impl ::config::Source + Send + Sync + 'static,
    ) -> Result<Self, Error> {
        ::config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()
            .map_err(Error::Read)?
            .try_deserialize()
            .map_err(Error::Parse)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("file read error: {0}")]
    Read(::config::ConfigError),

    #[error("parsing error: {0}")]
    Parse(::config::ConfigError),
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct BotConfig {
    testing_server: Option<GuildId>,
    activity: Option<String>,
}

impl BotConfig {
    pub fn testing_server(&self) -> Option<&GuildId> {
        if self.testing_server.is_none() {
            debug!("no testing server set in config, only registering globally");
        }

        self.testing_server.as_ref()
    }

    pub fn activity(&self) -> Option<ActivityData> {
        let Some(activity) = &self.activity else {
            debug!("no bot.activity provided in config, defaulting to none");
            return None;
        };

        let activity = normalize_whitespace(activity);

        if activity.is_empty() {
            warn!("bot.activity provided in config as empty string, defaulting to none");
            return None;
        }

        let parsed_activity = if let Some(name) = activity.strip_prefix("playing ") {
            ActivityData::playing(name)
        } else if let Some(name) = activity.strip_prefix("listening to ") {
            ActivityData::listening(name)
        } else if let Some(name) = activity.strip_prefix("watching ") {
            ActivityData::watching(name)
        } else if let Some(name) = activity.strip_prefix("competing in ") {
            ActivityData::competing(name)
        } else {
            error!("bot.activity in config could not be parsed - must start with `playing`, `listening to`, `watching` or `competing in`");
            warn!("disabling bot activity");
            return None;
        };

        debug!(
            "bot.activity parsed as {:?}: {}",
            parsed_activity.kind, parsed_activity.name
        );

        Some(parsed_activity)
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AssetsConfig {
    search_dir: PathBuf,
    rem_image: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            search_dir: PathBuf::from("assets/search"),
            rem_image: PathBuf::from("assets/images/meme-images/rem.png"),
        }
    }
}

impl AssetsConfig {
    pub fn search_dir(&self) -> &Path {
        &self.search_dir
    }

    pub fn rem_image(&self) -> &Path {
        &self.rem_image
    }
}
