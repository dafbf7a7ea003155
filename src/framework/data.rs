use tracing::{debug, info};

use crate::{
    commands::{rem, search::SearchLists},
    dispatch::{Dispatcher, Resources},
    errors::ResourceReadError,
};

use super::config::Config;

/// State shared by every command invocation. Never mutated after startup.
#[derive(Debug, Clone)]
pub struct PoiseData {
    pub(crate) config: Config,
    resources: Resources,
    dispatcher: Dispatcher,
}

impl PoiseData {
    /// Loads every word list up front, so a missing file stops the bot before it connects.
    #[tracing::instrument(skip_all, name = "data")]
    pub(crate) fn new(config: Config) -> Result<Self, ResourceReadError> {
        let search_lists = SearchLists::load(config.assets.search_dir())?;

        rem::check_image(config.assets.rem_image());
        let resources = Resources::new(search_lists, config.assets.rem_image());

        let dispatcher = Dispatcher::new();
        for command in dispatcher.descriptors() {
            debug!(name = command.name, description = command.description, "registered command");
        }
        info!(
            commands = dispatcher.descriptors().count(),
            "command registry ready"
        );

        Ok(Self {
            config,
            resources,
            dispatcher,
        })
    }

    pub(crate) const fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) const fn resources(&self) -> &Resources {
        &self.resources
    }

    pub(crate) const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
