use std::sync::Arc;

use serenity::client::Client;
use serenity::model::gateway::GatewayIntents;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use youtube_search::YouTubeClient;

mod bot;
mod commands;
mod config;
mod error;
mod notifier;
mod scheduler;
mod tracker;

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "herald=info,serenity=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    let youtube = Arc::new(YouTubeClient::new(
        config.youtube_api_key.clone(),
        reqwest::Client::new(),
    ));

    let handler = bot::Handler::new(config.clone(), youtube);
    let mut client = Client::builder(&config.discord_token, GatewayIntents::GUILDS)
        .event_handler(handler)
        .await?;

    tracing::info!("starting discord session");
    client.start().await?;
    Ok(())
}
