//! Typed client for the YouTube Data API v3 `search` endpoint.
//!
//! This crate covers the two query shapes a live-notification bot needs:
//! - live search: is the channel streaming right now?
//! - recency search: what is the channel's next scheduled broadcast?
//!
//! It knows nothing about any chat platform; callers get [`Broadcast`]
//! records and decide what to do with them.

mod client;
mod error;
mod models;

pub use client::{YouTubeClient, watch_url};
pub use error::UpstreamError;
pub use models::{Broadcast, BroadcastState};
