//! Spotify track-search Data Transfer Objects
//!
//! The backend proxy forwards Spotify's `/v1/search` body untouched, so both
//! enrichment strategies parse the same shape. The proxy can also answer with
//! Spotify's error object, or with a `{"reauth": true}` marker after it has
//! redirected an expired token to re-authorization.
//!
//! API Reference: https://developer.spotify.com/documentation/web-api/reference/search

use serde::{Deserialize, Serialize};

/// Body of a track search, or of a proxied one
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TrackSearchBody {
    pub tracks: Option<TrackPage>,
    pub error: Option<ErrorObject>,
    pub reauth: Option<bool>,
}

/// Paging object holding track results
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<TrackItem>,
    pub total: Option<u64>,
    pub limit: Option<u32>,
}

/// Simplified track object
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackItem {
    /// e.g. `spotify:track:4uLU6hMCjMI75M1A2tKUQC`
    pub uri: String,
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Spotify error object
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorObject {
    pub status: u16,
    #[serde(default)]
    pub message: String,
}
