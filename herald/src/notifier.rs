//! Live announcements.
//!
//! The announcer resolves the configured role and channel in the guild and
//! posts one message per newly-detected broadcast. A missing role or channel
//! is a misconfiguration, not a fault: it is logged and the announcement is
//! skipped.

use async_trait::async_trait;
use tracing::{info, warn};
use youtube_search::watch_url;

use crate::error::Result;

/// The chat-platform operations the announcer needs.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn has_role(&self, guild_id: u64, role_id: u64) -> bool;
    async fn has_channel(&self, guild_id: u64, channel_id: u64) -> bool;
    async fn send_message(&self, channel_id: u64, text: &str) -> Result<()>;
}

/// Posts live announcements to the configured guild channel.
pub struct Announcer {
    guild_id: u64,
    role_id: u64,
    channel_id: u64,
}

impl Announcer {
    pub fn new(guild_id: u64, role_id: u64, channel_id: u64) -> Self {
        Self {
            guild_id,
            role_id,
            channel_id,
        }
    }

    /// Announce a newly-detected live broadcast. Never fails: resolution and
    /// send problems are logged and swallowed.
    pub async fn announce<G: ChatGateway>(&self, gateway: &G, video_id: &str) {
        if !gateway.has_role(self.guild_id, self.role_id).await {
            warn!(
                guild_id = self.guild_id,
                role_id = self.role_id,
                "announcement role not found; skipping announcement"
            );
            return;
        }
        if !gateway.has_channel(self.guild_id, self.channel_id).await {
            warn!(
                guild_id = self.guild_id,
                channel_id = self.channel_id,
                "announcement channel not found; skipping announcement"
            );
            return;
        }

        let text = announcement_text(self.role_id, video_id);
        match gateway.send_message(self.channel_id, &text).await {
            Ok(()) => info!(video_id = %video_id, "live announcement sent"),
            Err(e) => warn!(video_id = %video_id, error = %e, "failed to send live announcement"),
        }
    }
}

fn announcement_text(role_id: u64, video_id: &str) -> String {
    format!(
        "<@&{role_id}> The channel is live now! Check it out: {}",
        watch_url(video_id)
    )
}
