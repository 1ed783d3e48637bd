use serde::{Deserialize, Serialize};

/// A single broadcast on the tracked channel.
///
/// `published_at` is kept as the raw RFC 3339 string from the API; callers
/// that want a human-readable rendering parse it themselves and can fall
/// back to the raw value when parsing fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Broadcast {
    pub id: String,
    pub title: String,
    pub published_at: String,
    pub state: BroadcastState,
}

/// Live state of a broadcast, from the snippet's `liveBroadcastContent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastState {
    Live,
    Upcoming,
    /// Not live and not scheduled (completed or regular upload). The API
    /// reports this as `none`; anything unrecognized maps here as well.
    #[default]
    #[serde(other)]
    None,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItem {
    pub id: VideoRef,
    pub snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoRef {
    // Absent for non-video results (channels, playlists).
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Snippet {
    pub title: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub live_broadcast_content: BroadcastState,
}

impl SearchItem {
    /// Convert to a [`Broadcast`], skipping results without a video id.
    pub(crate) fn into_broadcast(self) -> Option<Broadcast> {
        let id = self.id.video_id?;
        Some(Broadcast {
            id,
            title: self.snippet.title,
            published_at: self.snippet.published_at,
            state: self.snippet.live_broadcast_content,
        })
    }
}

/// Scan a date-ordered result sequence for the first scheduled broadcast.
pub(crate) fn first_upcoming(items: Vec<SearchItem>) -> Option<Broadcast> {
    items
        .into_iter()
        .filter_map(SearchItem::into_broadcast)
        .find(|b| b.state == BroadcastState::Upcoming)
}

/// The error envelope the API wraps failures in.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}
