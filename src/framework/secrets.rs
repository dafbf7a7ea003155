use std::fmt;

pub const TOKEN_VAR: &str = "DISCORD_TOKEN";

#[derive(Clone)]
pub struct Secrets {
    bot_token: String,
}

impl Secrets {
    /// Pulls secrets out of the environment, loading a `.env` file first if there is one.
    pub fn from_env() -> Result<Self, MissingSecretError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env file");
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, MissingSecretError> {
        let bot_token = lookup(TOKEN_VAR)
            .filter(|token| !token.trim().is_empty())
            .ok_or(MissingSecretError { key: TOKEN_VAR })?;

        Ok(Self { bot_token })
    }

    pub fn bot_token(&self) -> &str {
        &self.bot_token
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("bot_token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("missing secret: environment variable `{key}` is not set")]
pub struct MissingSecretError {
    key: &'static str,
}

#[cfg(test)]
mod tests {
    use super::Secrets;

    #[test]
    fn reads_token() {
        let secrets =
            Secrets::from_lookup(|key| (key == "DISCORD_TOKEN").then(|| "abc.def".to_owned()))
                .unwrap();

        assert_eq!(secrets.bot_token(), "abc.def");
    }

    #[test]
    fn missing_or_blank_token_is_an_error() {
        let err = Secrets::from_lookup(|_| None).unwrap_err();
        assert!(err.to_string().contains("DISCORD_TOKEN"));

        assert!(Secrets::from_lookup(|_| Some("  ".to_owned())).is_err());
    }

    #[test]
    fn debug_hides_token() {
        let secrets = Secrets::from_lookup(|_| Some("abc.def".to_owned())).unwrap();
        assert!(!format!("{secrets:?}").contains("abc.def"));
    }
}
