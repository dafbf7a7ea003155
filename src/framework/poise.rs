use poise::serenity_prelude::{self as serenity, GuildId};
use tracing::{error, info, trace};

use crate::{commands, errors};

use super::data::PoiseData;

pub fn build(data: PoiseData) -> poise::Framework<PoiseData, errors::CommandError> {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::list(),
            on_error: errors::handle_framework_error,
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("ready! logged in as {}", ready.user.name);

                let registrar = PoiseRegistrar {
                    ctx,
                    commands: framework.options().commands.as_ref(),
                };
                register_commands(&registrar, data.config().bot.testing_server().copied()).await;

                if let Some(activity) = data.config().bot.activity() {
                    ctx.set_activity(Some(activity));
                }

                trace!("finished setup, accepting commands");

                Ok(data)
            })
        })
        .build()
}

/// Pushes the slash command definitions to Discord.
pub trait Registrar {
    async fn in_guild(&self, guild_id: GuildId) -> Result<(), serenity::Error>;
    async fn globally(&self) -> Result<(), serenity::Error>;
}

struct PoiseRegistrar<'a> {
    ctx: &'a serenity::Context,
    commands: &'a [poise::Command<PoiseData, errors::CommandError>],
}

impl Registrar for PoiseRegistrar<'_> {
    async fn in_guild(&self, guild_id: GuildId) -> Result<(), serenity::Error> {
        poise::builtins::register_in_guild(self.ctx, self.commands, guild_id).await
    }

    async fn globally(&self) -> Result<(), serenity::Error> {
        poise::builtins::register_globally(self.ctx, self.commands).await
    }
}

/// Registers in the testing server (if any), then globally.
///
/// Failures are logged and otherwise ignored: setup has to finish for poise
/// to hand events to the commands that are already registered.
pub async fn register_commands(registrar: &impl Registrar, testing_server: Option<GuildId>) {
    if let Some(guild_id) = testing_server {
        match registrar.in_guild(guild_id).await {
            Ok(()) => info!(%guild_id, "registered commands in testing server"),
            Err(err) => error!(%err, %guild_id, "failed to register commands in testing server"),
        }
    }

    match registrar.globally().await {
        Ok(()) => info!("successfully registered application commands"),
        Err(err) => error!(%err, "failed to register application commands"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::*;

    #[derive(Debug, PartialEq, Eq, Clone, Copy)]
    enum Call {
        Guild(GuildId),
        Global,
    }

    #[derive(Default)]
    struct FakeRegistrar {
        calls: Mutex<Vec<Call>>,
        fail_guild: bool,
        fail_global: bool,
    }

    impl FakeRegistrar {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn outcome(fail: bool) -> Result<(), serenity::Error> {
            if fail {
                Err(serenity::Error::Other("Missing Access"))
            } else {
                Ok(())
            }
        }
    }

    impl Registrar for FakeRegistrar {
        async fn in_guild(&self, guild_id: GuildId) -> Result<(), serenity::Error> {
            self.calls.lock().unwrap().push(Call::Guild(guild_id));
            Self::outcome(self.fail_guild)
        }

        async fn globally(&self) -> Result<(), serenity::Error> {
            self.calls.lock().unwrap().push(Call::Global);
            Self::outcome(self.fail_global)
        }
    }

    #[tokio::test]
    async fn registers_in_testing_server_then_globally() {
        let registrar = FakeRegistrar::default();
        let guild_id = GuildId::new(42);

        register_commands(&registrar, Some(guild_id)).await;

        assert_eq!(registrar.calls(), [Call::Guild(guild_id), Call::Global]);
    }

    #[tokio::test]
    async fn only_global_without_testing_server() {
        let registrar = FakeRegistrar::default();

        register_commands(&registrar, None).await;

        assert_eq!(registrar.calls(), [Call::Global]);
    }

    #[tokio::test]
    #[traced_test]
    async fn guild_failure_still_registers_globally() {
        let registrar = FakeRegistrar {
            fail_guild: true,
            ..FakeRegistrar::default()
        };
        let guild_id = GuildId::new(42);

        register_commands(&registrar, Some(guild_id)).await;

        assert_eq!(registrar.calls(), [Call::Guild(guild_id), Call::Global]);
        assert!(logs_contain("failed to register commands in testing server"));
        assert!(logs_contain("Missing Access"));
        assert!(logs_contain("successfully registered application commands"));
    }

    #[tokio::test]
    #[traced_test]
    async fn global_failure_is_logged_not_returned() {
        let registrar = FakeRegistrar {
            fail_guild: true,
            fail_global: true,
            ..FakeRegistrar::default()
        };

        register_commands(&registrar, Some(GuildId::new(7))).await;

        assert_eq!(registrar.calls().len(), 2);
        assert!(logs_contain("failed to register application commands"));
        assert!(!logs_contain("successfully registered application commands"));
    }
}
