use reqwest::Client;
use tracing::{debug, warn};

use crate::error::UpstreamError;
use crate::models::{ApiErrorEnvelope, Broadcast, SearchResponse, first_upcoming};

const API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Client for the YouTube Data API v3 `search` endpoint.
///
/// Stateless beyond its HTTP client and credentials; every query hits
/// upstream, nothing is cached.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: impl Into<String>, http: Client) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL, e.g. to point at a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Query for a currently-live broadcast on the channel.
    ///
    /// Returns the first live result, or `Ok(None)` when the channel is not
    /// live. Network, auth and quota failures surface as [`UpstreamError`].
    pub async fn search_live(&self, channel_id: &str) -> Result<Option<Broadcast>, UpstreamError> {
        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("part", "snippet"),
                ("channelId", channel_id),
                ("eventType", "live"),
                ("type", "video"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;
        let body: SearchResponse = Self::parse_response(response).await?;

        let broadcast = body
            .items
            .into_iter()
            .find_map(|item| item.into_broadcast());
        debug!(
            channel_id = %channel_id,
            live = broadcast.is_some(),
            "live search completed"
        );
        Ok(broadcast)
    }

    /// Query for the channel's next scheduled broadcast.
    ///
    /// Scans the channel's most recent videos (date-descending) for the first
    /// one marked upcoming. Failures here are not distinguishable from "no
    /// upcoming broadcast": they are logged and flattened to `None`.
    pub async fn search_upcoming(&self, channel_id: &str) -> Option<Broadcast> {
        match self.try_search_upcoming(channel_id).await {
            Ok(found) => found,
            Err(e) => {
                warn!(channel_id = %channel_id, error = %e, "recency search failed");
                None
            }
        }
    }

    async fn try_search_upcoming(
        &self,
        channel_id: &str,
    ) -> Result<Option<Broadcast>, UpstreamError> {
        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("part", "snippet"),
                ("channelId", channel_id),
                ("type", "video"),
                ("order", "date"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;
        let body: SearchResponse = Self::parse_response(response).await?;
        Ok(first_upcoming(body.items))
    }

    /// Decode a successful response body, or map a non-2xx status to
    /// [`UpstreamError::Api`] carrying the API's own error message when the
    /// envelope is parseable.
    async fn parse_response(response: reqwest::Response) -> Result<SearchResponse, UpstreamError> {
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ApiErrorEnvelope>().await {
                Ok(envelope) => envelope.error.message,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
            };
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

/// Canonical watch URL for a video id.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}
