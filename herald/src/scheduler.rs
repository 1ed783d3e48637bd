//! Fixed-interval live polling.
//!
//! One task, started after the gateway reports ready, ticking for the
//! process lifetime. A tick runs the check and any resulting announcement to
//! completion before the next tick is taken, so ticks never overlap. Failed
//! checks are logged and the loop keeps going.

use std::sync::Arc;

use serenity::client::Context;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};
use youtube_search::YouTubeClient;

use crate::bot::SerenityGateway;
use crate::config::Config;
use crate::notifier::Announcer;
use crate::tracker::{ChannelLiveQuery, LiveTracker};

/// Spawn the poll loop. The tracker is created here and moved into the task;
/// nothing else in the process can reach its state.
pub fn spawn(ctx: Context, config: Config, youtube: Arc<YouTubeClient>) -> JoinHandle<()> {
    let tracker = LiveTracker::new(ChannelLiveQuery::new(youtube, config.youtube_channel_id));
    let announcer = Announcer::new(
        config.guild_id,
        config.mention_role_id,
        config.announce_channel_id,
    );
    let gateway = SerenityGateway::new(ctx);
    let period = config.check_interval;

    tokio::spawn(async move {
        info!(period_secs = period.as_secs(), "live check loop started");
        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match tracker.check_for_new_live().await {
                Ok(Some(video_id)) => announcer.announce(&gateway, &video_id).await,
                Ok(None) => debug!("no new live broadcast"),
                Err(e) => warn!(error = %e, "live status check failed"),
            }
        }
    })
}
