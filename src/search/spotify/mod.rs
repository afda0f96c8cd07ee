//! Spotify track matching ("enrichment")
//!
//! Matches a MusicBrainz recording to a playable Spotify track, either via
//! the backend proxy or by calling the Web API directly. Which one is used
//! is configuration, see [`EnrichmentStrategy`].

pub mod dto;
mod adapter;
mod client;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::domain::LookupError;
use super::session::Session;
use super::traits::TrackFinder;

pub use adapter::to_enrichment;
pub use client::{DEFAULT_API_BASE_URL, DEFAULT_PROXY_BASE_URL, DirectClient, ProxyClient};

/// How recordings are matched to streaming tracks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentStrategy {
    /// Delegate to the trusted backend, which holds the token
    #[default]
    Proxy,
    /// Call the Spotify Web API with the session's bearer token
    Direct,
}

impl fmt::Display for EnrichmentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proxy => f.write_str("proxy"),
            Self::Direct => f.write_str("direct"),
        }
    }
}

impl FromStr for EnrichmentStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proxy" => Ok(Self::Proxy),
            "direct" => Ok(Self::Direct),
            other => Err(format!("unknown enrichment strategy {other:?} (expected proxy or direct)")),
        }
    }
}

/// Build the track finder selected by `strategy`.
pub fn build_track_finder(
    strategy: EnrichmentStrategy,
    proxy_base_url: &str,
    api_base_url: &str,
    session: &Session,
) -> Result<Arc<dyn TrackFinder>, LookupError> {
    let finder: Arc<dyn TrackFinder> = match strategy {
        EnrichmentStrategy::Proxy => Arc::new(ProxyClient::new(proxy_base_url)?),
        EnrichmentStrategy::Direct => Arc::new(DirectClient::new(api_base_url, session.clone())?),
    };
    Ok(finder)
}
