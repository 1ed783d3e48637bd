//! Live-state tracking with duplicate suppression.
//!
//! The tracker remembers the last video id it announced and only reports a
//! broadcast as new when its id differs from that. It is owned by the poll
//! loop; command handlers query upstream directly and never touch it.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;
use youtube_search::{Broadcast, UpstreamError, YouTubeClient};

/// Source of "is the channel live right now" answers.
#[async_trait]
pub trait LiveQuery: Send + Sync {
    async fn live_broadcast(&self) -> Result<Option<Broadcast>, UpstreamError>;
}

/// [`LiveQuery`] backed by the YouTube client, bound to one channel.
pub struct ChannelLiveQuery {
    client: Arc<YouTubeClient>,
    channel_id: String,
}

impl ChannelLiveQuery {
    pub fn new(client: Arc<YouTubeClient>, channel_id: impl Into<String>) -> Self {
        Self {
            client,
            channel_id: channel_id.into(),
        }
    }
}

#[async_trait]
impl LiveQuery for ChannelLiveQuery {
    async fn live_broadcast(&self) -> Result<Option<Broadcast>, UpstreamError> {
        self.client.search_live(&self.channel_id).await
    }
}

/// Tracks the last announced live broadcast id.
pub struct LiveTracker<Q> {
    query: Q,
    last_notified: Mutex<Option<String>>,
}

impl<Q: LiveQuery> LiveTracker<Q> {
    pub fn new(query: Q) -> Self {
        Self {
            query,
            last_notified: Mutex::new(None),
        }
    }

    /// Check upstream and return a video id exactly when a broadcast should
    /// be announced.
    ///
    /// The stored id is the dedup key, not a live/offline flag: when the
    /// channel is offline it is deliberately left in place, so a poll that
    /// later sees the same id again stays suppressed. Only a different live
    /// id triggers a new announcement.
    pub async fn check_for_new_live(&self) -> Result<Option<String>, UpstreamError> {
        let Some(broadcast) = self.query.live_broadcast().await? else {
            return Ok(None);
        };

        let mut last = self.last_notified.lock();
        if last.as_deref() == Some(broadcast.id.as_str()) {
            debug!(video_id = %broadcast.id, "live broadcast already announced");
            return Ok(None);
        }
        *last = Some(broadcast.id.clone());
        Ok(Some(broadcast.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;

    use youtube_search::BroadcastState;

    /// Replays a fixed sequence of poll results.
    struct ScriptedQuery {
        steps: Mutex<VecDeque<Result<Option<Broadcast>, UpstreamError>>>,
    }

    impl ScriptedQuery {
        fn new(steps: Vec<Result<Option<Broadcast>, UpstreamError>>) -> Self {
            Self {
                steps: Mutex::new(steps.into()),
            }
        }
    }

    #[async_trait]
    impl LiveQuery for ScriptedQuery {
        async fn live_broadcast(&self) -> Result<Option<Broadcast>, UpstreamError> {
            self.steps.lock().pop_front().expect("script exhausted")
        }
    }

    fn live(id: &str) -> Result<Option<Broadcast>, UpstreamError> {
        Ok(Some(Broadcast {
            id: id.to_string(),
            title: format!("stream {id}"),
            published_at: "2024-03-15T18:00:00Z".to_string(),
            state: BroadcastState::Live,
        }))
    }

    fn offline() -> Result<Option<Broadcast>, UpstreamError> {
        Ok(None)
    }

    fn quota_error() -> Result<Option<Broadcast>, UpstreamError> {
        Err(UpstreamError::Api {
            status: 403,
            message: "quota exceeded".to_string(),
        })
    }

    #[tokio::test]
    async fn test_same_id_announces_once() {
        let tracker = LiveTracker::new(ScriptedQuery::new(vec![live("A"), live("A")]));
        assert_eq!(tracker.check_for_new_live().await.unwrap().as_deref(), Some("A"));
        assert_eq!(tracker.check_for_new_live().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_offline_does_not_reset_dedup_key() {
        // Live "A", offline, live "A" again: the stored id survives the
        // offline tick, so the third check stays suppressed.
        let tracker =
            LiveTracker::new(ScriptedQuery::new(vec![live("A"), offline(), live("A")]));
        assert_eq!(tracker.check_for_new_live().await.unwrap().as_deref(), Some("A"));
        assert_eq!(tracker.check_for_new_live().await.unwrap(), None);
        assert_eq!(tracker.check_for_new_live().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_new_id_announces_again() {
        let tracker = LiveTracker::new(ScriptedQuery::new(vec![live("A"), live("B")]));
        assert_eq!(tracker.check_for_new_live().await.unwrap().as_deref(), Some("A"));
        assert_eq!(tracker.check_for_new_live().await.unwrap().as_deref(), Some("B"));
    }

    #[tokio::test]
    async fn test_offline_then_different_id_announces() {
        let tracker = LiveTracker::new(ScriptedQuery::new(vec![
            live("A"),
            offline(),
            live("B"),
        ]));
        assert_eq!(tracker.check_for_new_live().await.unwrap().as_deref(), Some("A"));
        assert_eq!(tracker.check_for_new_live().await.unwrap(), None);
        assert_eq!(tracker.check_for_new_live().await.unwrap().as_deref(), Some("B"));
    }

    #[tokio::test]
    async fn test_upstream_error_propagates_and_leaves_state_alone() {
        let tracker = LiveTracker::new(ScriptedQuery::new(vec![
            live("A"),
            quota_error(),
            live("A"),
        ]));
        assert_eq!(tracker.check_for_new_live().await.unwrap().as_deref(), Some("A"));
        assert!(tracker.check_for_new_live().await.is_err());
        assert_eq!(tracker.check_for_new_live().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_error_before_first_live_does_not_announce() {
        let tracker = LiveTracker::new(ScriptedQuery::new(vec![quota_error(), live("A")]));
        assert!(tracker.check_for_new_live().await.is_err());
        assert_eq!(tracker.check_for_new_live().await.unwrap().as_deref(), Some("A"));
    }
}
