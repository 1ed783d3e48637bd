//! Serenity wiring: event handler, command registration and the cache/HTTP
//! chat gateway.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::gateway::Ready;
use serenity::model::id::{ChannelId, GuildId, RoleId};
use tracing::{error, info, warn};
use youtube_search::YouTubeClient;

use crate::commands;
use crate::config::Config;
use crate::error::Result;
use crate::notifier::ChatGateway;
use crate::scheduler;

pub struct Handler {
    config: Config,
    youtube: Arc<YouTubeClient>,
    poll_started: AtomicBool,
}

impl Handler {
    pub fn new(config: Config, youtube: Arc<YouTubeClient>) -> Self {
        Self {
            config,
            youtube,
            poll_started: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, "connected to discord");

        let guild = GuildId(self.config.guild_id);
        if let Err(e) = guild
            .set_application_commands(&ctx.http, |commands| {
                commands
                    .create_application_command(|command| {
                        command
                            .name("status")
                            .description("Get the channel's current live status.")
                    })
                    .create_application_command(|command| {
                        command
                            .name("nextstream")
                            .description("Get the time of the channel's next stream.")
                    })
            })
            .await
        {
            error!(error = %e, "failed to register guild commands");
        }

        // The gateway emits ready again on reconnect; the poller must only
        // ever start once.
        if self.poll_started.swap(true, Ordering::SeqCst) {
            return;
        }
        scheduler::spawn(ctx, self.config.clone(), Arc::clone(&self.youtube));
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::ApplicationCommand(command) = interaction else {
            return;
        };
        let content = match command.data.name.as_str() {
            "status" => {
                commands::status_response(&self.youtube, &self.config.youtube_channel_id).await
            }
            "nextstream" => {
                commands::next_stream_response(&self.youtube, &self.config.youtube_channel_id).await
            }
            _ => return,
        };
        if let Err(e) = command
            .create_interaction_response(&ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| message.content(content))
            })
            .await
        {
            warn!(command = %command.data.name, error = %e, "failed to respond to command");
        }
    }
}

/// [`ChatGateway`] backed by the serenity cache and HTTP client.
pub struct SerenityGateway {
    ctx: Context,
}

impl SerenityGateway {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl ChatGateway for SerenityGateway {
    async fn has_role(&self, guild_id: u64, role_id: u64) -> bool {
        self.ctx
            .cache
            .guild(GuildId(guild_id))
            .map(|guild| guild.roles.contains_key(&RoleId(role_id)))
            .unwrap_or(false)
    }

    async fn has_channel(&self, guild_id: u64, channel_id: u64) -> bool {
        self.ctx
            .cache
            .guild(GuildId(guild_id))
            .map(|guild| guild.channels.contains_key(&ChannelId(channel_id)))
            .unwrap_or(false)
    }

    async fn send_message(&self, channel_id: u64, text: &str) -> Result<()> {
        ChannelId(channel_id)
            .send_message(&self.ctx.http, |message| message.content(text))
            .await?;
        Ok(())
    }
}
