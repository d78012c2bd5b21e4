mod config;

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use rustls::crypto::ring::default_provider;

use crate::config::{Config, ConfigError, TOKEN_GUIDANCE};
use herald_commands::{handle_interaction, register_commands};
use herald_core::{Context, HttpApi};
use herald_database::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let config = match Config::load().await {
        Ok(config) => config,
        Err(ConfigError::MissingToken) => {
            eprintln!("{TOKEN_GUIDANCE}");
            return Ok(());
        }
        Err(source) => return Err(source.into()),
    };

    // Create a single shared HTTP Client
    let http = Arc::new(Client::new(config.token.clone()));
    let db = Database::connect(&config.database_url).await?;
    let ctx = Context::new(Arc::new(HttpApi::new(Arc::clone(&http))), db);

    // Slash commands only need guild data; member listing for /info needs GUILD_MEMBERS
    let intents = Intents::GUILDS | Intents::GUILD_MEMBERS;

    // A shard is one Gateway WebSocket connection to Discord
    let mut shard = Shard::new(ShardId::new(0, 1), config.token, intents);

    info!("Herald is connecting...");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        match event {
            Event::Ready(ready) => {
                info!(user = %ready.user.name, "Herald has successfully awoken!");

                let ctx = ctx.clone();
                let application_id = ready.application.id;
                tokio::spawn(async move {
                    match register_commands(&ctx, application_id).await {
                        Ok(count) => info!(count, "synced slash commands"),
                        Err(source) => error!(?source, "failed to sync slash commands"),
                    }
                });
            }
            Event::InteractionCreate(interaction) => {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    if let Err(source) = handle_interaction(ctx, interaction).await {
                        error!(?source, "interaction handler failed");
                    }
                });
            }
            _ => {} // Ignore unused events
        }
    }

    Ok(())
}
