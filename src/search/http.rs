//! Shared HTTP client setup for the MusicBrainz and Spotify clients.

use super::domain::LookupError;

/// User agent string - MusicBrainz rejects requests without a meaningful one
pub const USER_AGENT: &str = concat!(
    "Musophile/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/musophile)"
);

/// Build a reqwest client that accepts gzip and identifies the application.
pub fn build_client() -> Result<reqwest::Client, LookupError> {
    reqwest::Client::builder()
        .gzip(true)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| LookupError::Network(format!("failed to build HTTP client: {e}")))
}

/// Map a transport-level reqwest failure.
pub fn network_error(e: reqwest::Error) -> LookupError {
    if e.is_timeout() {
        LookupError::Network(format!("request timed out: {e}"))
    } else {
        LookupError::Network(e.to_string())
    }
}

/// Human-readable form of a non-success status.
pub fn describe_status(status: reqwest::StatusCode) -> String {
    format!(
        "HTTP {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    )
}
