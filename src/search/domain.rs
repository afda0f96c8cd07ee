//! Internal domain models for recording search and track matching.
//!
//! These types are OUR types - they don't change when MusicBrainz or Spotify
//! change their responses. Every API body is converted into these types by
//! an adapter before anything else sees it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Length of the `spotify:track:` scheme prefix on a track URI.
pub const URI_PREFIX_LEN: usize = 14;

/// Field a search term is scoped to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchAttribute {
    /// Generic mode: the term is sent unscoped
    #[default]
    Recording,
    Artist,
    Release,
    Tag,
}

impl SearchAttribute {
    pub const ALL: [SearchAttribute; 4] = [
        SearchAttribute::Recording,
        SearchAttribute::Artist,
        SearchAttribute::Release,
        SearchAttribute::Tag,
    ];

    /// Lucene field name understood by the MusicBrainz search endpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            SearchAttribute::Recording => "recording",
            SearchAttribute::Artist => "artist",
            SearchAttribute::Release => "release",
            SearchAttribute::Tag => "tag",
        }
    }

    pub fn is_generic(self) -> bool {
        self == SearchAttribute::Recording
    }
}

impl fmt::Display for SearchAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchAttribute {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|attr| attr.as_str() == wanted)
            .ok_or_else(|| QueryError::InvalidAttribute(s.to_string()))
    }
}

/// A search as entered by the user at click time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub attribute: SearchAttribute,
    pub term: String,
    pub limit: u32,
}

impl SearchQuery {
    /// Validate user input. The stored term is trimmed.
    pub fn new(
        attribute: SearchAttribute,
        term: impl AsRef<str>,
        limit: u32,
    ) -> Result<Self, QueryError> {
        let term = term.as_ref().trim();
        if term.is_empty() {
            return Err(QueryError::EmptyTerm);
        }
        if limit == 0 {
            return Err(QueryError::ZeroLimit);
        }
        Ok(Self {
            attribute,
            term: term.to_string(),
            limit,
        })
    }

    /// Cap the limit at `max` (never below 1).
    pub fn clamped(mut self, max: u32) -> Self {
        self.limit = self.limit.min(max.max(1));
        self
    }

    /// Query expression for the metadata search.
    ///
    /// Generic mode sends the bare term, every other attribute uses
    /// `attribute:term` syntax.
    pub fn expression(&self) -> String {
        if self.attribute.is_generic() {
            self.term.clone()
        } else {
            format!("{}:{}", self.attribute, self.term)
        }
    }
}

/// One recording returned by the metadata search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    /// MusicBrainz recording ID, used as the local identifier
    pub id: String,
    pub title: String,
    /// Credited name of the first artist
    pub artist_name: String,
    /// Title of the first release the recording appears on
    pub release_title: Option<String>,
    /// Tag names in response order (empty when the recording has none)
    pub tags: Vec<String>,
}

/// Outcome of matching a recording against the streaming service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentResult {
    Found {
        /// Full track URI, e.g. `spotify:track:4uLU6hMCjMI75M1A2tKUQC`
        uri: String,
        /// Bare track identifier used for embedding
        track_id: String,
    },
    NotFound,
}

impl EnrichmentResult {
    /// Build a `Found` result from a full track URI.
    pub fn from_uri(uri: impl Into<String>) -> Result<Self, LookupError> {
        let uri = uri.into();
        let track_id = strip_uri_prefix(&uri)?.to_string();
        Ok(Self::Found { uri, track_id })
    }

    pub fn track_id(&self) -> Option<&str> {
        match self {
            Self::Found { track_id, .. } => Some(track_id),
            Self::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// Strip the fixed-length scheme prefix from a track URI.
pub fn strip_uri_prefix(uri: &str) -> Result<&str, LookupError> {
    match uri.get(URI_PREFIX_LEN..) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(LookupError::MalformedResponse(format!(
            "track URI too short: {uri:?}"
        ))),
    }
}

/// Errors from the metadata and enrichment clients
#[derive(Debug, Clone, thiserror::Error)]
pub enum LookupError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authorization rejected: {0}")]
    Auth(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("API request failed: {0}")]
    Api(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Rejected user input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Search term must not be empty")]
    EmptyTerm,

    #[error("Result limit must be at least 1")]
    ZeroLimit,

    #[error("Unknown search type {0:?} (expected recording, artist, release or tag)")]
    InvalidAttribute(String),
}
