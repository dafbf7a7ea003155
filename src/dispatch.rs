//! Maps an invoked command name to its handler and contains handler failures.
//!
//! Nothing in here knows about Discord: replies go out through a [`Responder`],
//! which poise implements in production and tests implement in memory.

use std::{collections::HashMap, path::PathBuf};

use tracing::{error, info, instrument, trace};

use crate::{
    commands::{rem, search, search::SearchLists},
    errors::{HandlerError, ReplyDeliveryError},
};

/// Discord caps message content at this many characters.
pub const MESSAGE_LIMIT: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text { content: String, ephemeral: bool },
    Attachment { name: String, bytes: Vec<u8> },
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            ephemeral: false,
        }
    }

    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            ephemeral: true,
        }
    }

    pub fn attachment(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::Attachment {
            name: name.into(),
            bytes,
        }
    }
}

/// Whatever can deliver a [`Reply`] back to the person who ran the command.
pub trait Responder {
    async fn send(&self, reply: Reply) -> Result<(), ReplyDeliveryError>;
}

/// Everything a command needs that outlives a single invocation.
#[derive(Debug, Clone)]
pub struct Resources {
    search_lists: SearchLists,
    rem_image: PathBuf,
}

impl Resources {
    pub fn new(search_lists: SearchLists, rem_image: impl Into<PathBuf>) -> Self {
        Self {
            search_lists,
            rem_image: rem_image.into(),
        }
    }

    pub const fn search_lists(&self) -> &SearchLists {
        &self.search_lists
    }

    pub fn rem_image(&self) -> &std::path::Path {
        &self.rem_image
    }
}

pub struct Invocation<'a, R> {
    responder: &'a R,
    resources: &'a Resources,
}

impl<'a, R: Responder> Invocation<'a, R> {
    pub const fn new(responder: &'a R, resources: &'a Resources) -> Self {
        Self {
            responder,
            resources,
        }
    }

    pub const fn resources(&self) -> &'a Resources {
        self.resources
    }

    pub async fn reply(&self, reply: Reply) -> Result<(), ReplyDeliveryError> {
        self.responder.send(reply).await
    }
}

#[derive(PartialEq, Debug, Copy, Clone, Hash, Eq)]
pub enum CommandKind {
    Search,
    Rem,
}

impl CommandKind {
    pub const ALL: [Self; 2] = [Self::Search, Self::Rem];

    pub const fn descriptor(self) -> CommandDescriptor {
        match self {
            Self::Search => CommandDescriptor {
                kind: self,
                name: "search",
                description: "Search for something mysterious!",
                fallback: "There was an error executing this command!",
            },
            Self::Rem => CommandDescriptor {
                kind: self,
                name: "rem",
                description: "Sends a Rem image to the channel",
                fallback: "Sorry, I couldn't send the Rem image!",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub kind: CommandKind,
    pub name: &'static str,
    pub description: &'static str,
    /// Sent privately to the user when the handler fails.
    pub fallback: &'static str,
}

impl CommandDescriptor {
    async fn execute<R: Responder>(&self, invocation: &Invocation<'_, R>) -> Result<(), HandlerError> {
        match self.kind {
            CommandKind::Search => search::execute(invocation).await,
            CommandKind::Rem => rem::execute(invocation).await,
        }
    }
}

#[derive(PartialEq, Debug, Copy, Clone, Eq)]
pub enum Outcome {
    /// No command by that name, nothing was sent.
    Ignored,
    Completed,
    /// The handler failed and its fallback reply went out instead.
    Recovered,
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    commands: HashMap<&'static str, CommandDescriptor>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        let commands = CommandKind::ALL
            .into_iter()
            .map(CommandKind::descriptor)
            .map(|descriptor| (descriptor.name, descriptor))
            .collect();

        Self { commands }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name)
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.values()
    }

    /// Runs the command called `name`, if there is one.
    ///
    /// Handler failures are logged and answered with the command's fallback.
    /// Only a failure to deliver that fallback is returned.
    #[instrument(skip_all, fields(command = name))]
    pub async fn dispatch<R: Responder>(
        &self,
        name: &str,
        invocation: &Invocation<'_, R>,
    ) -> Result<Outcome, ReplyDeliveryError> {
        let Some(command) = self.get(name) else {
            trace!("no such command, ignoring");
            return Ok(Outcome::Ignored);
        };

        match command.execute(invocation).await {
            Ok(()) => {
                trace!("command finished");
                Ok(Outcome::Completed)
            }
            Err(source) => {
                error!(error = %source, "command handler failed");

                invocation.reply(Reply::ephemeral(command.fallback)).await?;
                info!("sent fallback reply");

                Ok(Outcome::Recovered)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{
        collections::HashSet,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Mutex,
        },
    };

    use poise::serenity_prelude as serenity;
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::*;
    use crate::utils::words::WordList;

    /// Records every reply, failing the first `failures` sends.
    #[derive(Default)]
    pub(crate) struct Recorder {
        sent: Mutex<Vec<Reply>>,
        failures: AtomicUsize,
    }

    impl Recorder {
        pub(crate) fn failing(failures: usize) -> Self {
            Self {
                failures: AtomicUsize::new(failures),
                ..Self::default()
            }
        }

        pub(crate) fn sent(&self) -> Vec<Reply> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Responder for Recorder {
        async fn send(&self, reply: Reply) -> Result<(), ReplyDeliveryError> {
            let remaining = self.failures.load(Ordering::SeqCst);

            if remaining > 0 {
                self.failures.store(remaining - 1, Ordering::SeqCst);
                return Err(serenity::Error::Other("discord api error").into());
            }

            self.sent.lock().unwrap().push(reply);
            Ok(())
        }
    }

    pub(crate) fn resources(rem_image: impl Into<PathBuf>) -> Resources {
        let lists = SearchLists::new(
            WordList::from_iter(["very"]),
            WordList::from_iter(["shiny"]),
            WordList::from_iter(["sword"]),
            WordList::from_iter(["in a cave"]),
        );

        Resources::new(lists, rem_image)
    }

    #[test]
    fn registry_is_enumerable() {
        let dispatcher = Dispatcher::new();

        let names: HashSet<_> = dispatcher.descriptors().map(|d| d.name).collect();
        assert_eq!(names, HashSet::from(["search", "rem"]));
    }

    #[test]
    fn every_command_has_its_own_fallback() {
        let dispatcher = Dispatcher::new();

        let search = dispatcher.get("search").unwrap();
        let rem = dispatcher.get("rem").unwrap();

        assert_eq!(search.fallback, "There was an error executing this command!");
        assert_eq!(rem.fallback, "Sorry, I couldn't send the Rem image!");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let dispatcher = Dispatcher::new();

        assert!(dispatcher.get("search").is_some());
        assert!(dispatcher.get("Search").is_none());
        assert!(dispatcher.get("REM").is_none());
    }

    #[tokio::test]
    async fn unknown_command_is_ignored() {
        let dispatcher = Dispatcher::new();
        let recorder = Recorder::default();
        let resources = resources("rem.png");

        let outcome = dispatcher
            .dispatch("ping", &Invocation::new(&recorder, &resources))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Ignored);
        assert!(recorder.sent().is_empty());
    }

    #[tokio::test]
    async fn search_replies_with_sentence() {
        let dispatcher = Dispatcher::new();
        let recorder = Recorder::default();
        let resources = resources("rem.png");

        let outcome = dispatcher
            .dispatch("search", &Invocation::new(&recorder, &resources))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(
            recorder.sent(),
            [Reply::text(
                "You search around and find a very shiny sword in a cave."
            )]
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn failing_handler_sends_one_fallback() {
        let dispatcher = Dispatcher::new();
        let recorder = Recorder::failing(1);
        let resources = resources("rem.png");

        let outcome = dispatcher
            .dispatch("search", &Invocation::new(&recorder, &resources))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Recovered);
        assert_eq!(
            recorder.sent(),
            [Reply::ephemeral("There was an error executing this command!")]
        );
        assert!(logs_contain("discord api error"));
        logs_assert(|lines: &[&str]| {
            match lines
                .iter()
                .filter(|line| line.contains("command handler failed"))
                .count()
            {
                1 => Ok(()),
                n => Err(format!("expected one handler error, got {n}")),
            }
        });
    }

    #[tokio::test]
    async fn failing_fallback_propagates() {
        let dispatcher = Dispatcher::new();
        let recorder = Recorder::failing(2);
        let resources = resources("rem.png");

        let result = dispatcher
            .dispatch("search", &Invocation::new(&recorder, &resources))
            .await;

        assert!(matches!(result, Err(ReplyDeliveryError::Other(_))));
        assert!(recorder.sent().is_empty());
    }

    #[tokio::test]
    async fn repeated_dispatch_leaves_lists_untouched() {
        let dispatcher = Dispatcher::new();
        let recorder = Recorder::default();
        let resources = resources("rem.png");
        let before = resources.search_lists().clone();

        for _ in 0..5 {
            dispatcher
                .dispatch("search", &Invocation::new(&recorder, &resources))
                .await
                .unwrap();
        }

        assert_eq!(*resources.search_lists(), before);
        assert_eq!(recorder.sent().len(), 5);
    }
}
