//! On-demand query handlers for the two slash commands.
//!
//! The handlers call upstream directly (never the tracker, whose dedup state
//! belongs to the poll loop alone) and render a plain text response. Every
//! failure path renders as an absence, never as an error message.

use chrono::DateTime;
use tracing::warn;
use youtube_search::{Broadcast, YouTubeClient, watch_url};

/// Response for `/status`.
pub async fn status_response(client: &YouTubeClient, channel_id: &str) -> String {
    let live = match client.search_live(channel_id).await {
        Ok(live) => live,
        Err(e) => {
            warn!(error = %e, "status query failed");
            None
        }
    };
    render_status(live.as_ref())
}

/// Response for `/nextstream`.
pub async fn next_stream_response(client: &YouTubeClient, channel_id: &str) -> String {
    render_next_stream(client.search_upcoming(channel_id).await.as_ref())
}

fn render_status(live: Option<&Broadcast>) -> String {
    match live {
        Some(broadcast) => format!(
            "The channel is currently live! Check it out: {}",
            watch_url(&broadcast.id)
        ),
        None => "The channel is currently not live.".to_string(),
    }
}

fn render_next_stream(upcoming: Option<&Broadcast>) -> String {
    match upcoming {
        Some(broadcast) => format!(
            "**Stream Title:** {}\n**Stream Time:** {}",
            broadcast.title,
            format_published_at(&broadcast.published_at)
        ),
        None => "No upcoming streams scheduled.".to_string(),
    }
}

/// Render an RFC 3339 timestamp as a long date with 12-hour time, falling
/// back to the raw string when it does not parse.
fn format_published_at(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(at) => at.format("%B %d, %Y at %I:%M %p").to_string(),
        Err(_) => raw.to_string(),
    }
}
