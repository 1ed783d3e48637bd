use thiserror::Error;

/// Errors surfaced by upstream search queries.
///
/// "No broadcast found" is never an error; it is the `Ok(None)` case on the
/// query methods. These variants cover transport, API-level (auth, quota),
/// and decode failures only.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
