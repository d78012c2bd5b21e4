use std::env;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt as _, AsyncWriteExt as _, BufReader};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://herald.db?mode=rwc";

/// Printed when no token was configured or entered.
pub const TOKEN_GUIDANCE: &str = "\
No Discord bot token was provided.

How to get a bot token:
1. Open https://discord.com/developers/applications
2. Select your application
3. Open the Bot tab
4. Click Reset Token (or Copy) under TOKEN
5. Set it as DISCORD_TOKEN in .env, or paste it at the prompt";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no Discord bot token provided")]
    MissingToken,
    #[error("failed to read the token from stdin")]
    Io(#[from] std::io::Error),
}

/// Process configuration gathered from the environment and, if needed, the operator.
#[derive(Clone)]
pub struct Config {
    pub token: String,
    pub database_url: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("database_url", &self.database_url)
            .finish()
    }
}

/// Trim a token as typed or pasted; blank input means no token.
pub fn normalize_token(raw: &str) -> Option<String> {
    let token = raw.trim();
    (!token.is_empty()).then(|| token.to_owned())
}

async fn prompt_token() -> Result<Option<String>, ConfigError> {
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(b"Keep your token secret!\nEnter your Discord bot token: ")
        .await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;

    Ok(normalize_token(&line))
}

impl Config {
    /// Read `DISCORD_TOKEN` and `DATABASE_URL`, prompting for the token when it is unset.
    pub async fn load() -> Result<Self, ConfigError> {
        let token = match env::var("DISCORD_TOKEN")
            .ok()
            .and_then(|raw| normalize_token(&raw))
        {
            Some(token) => token,
            None => prompt_token().await?.ok_or(ConfigError::MissingToken)?,
        };

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());

        Ok(Self {
            token,
            database_url,
        })
    }
}
