//! MusicBrainz API Data Transfer Objects
//!
//! These types match what the MusicBrainz web service returns for
//! `/recording` searches and single-recording lookups.
//! DO NOT use these types outside the musicbrainz module - convert to domain types.
//!
//! API Reference: https://musicbrainz.org/doc/MusicBrainz_API/Search

use serde::{Deserialize, Serialize};

/// Recording search response (`/recording/?query=...&fmt=json`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    /// Total number of hits across all pages
    pub count: Option<u64>,
    /// Offset of this page
    pub offset: Option<u64>,
    /// Recordings on this page (always present, even when empty)
    pub recordings: Vec<Recording>,
}

/// A recording, either from a search hit or a lookup by ID
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Recording {
    /// MusicBrainz recording ID
    pub id: String,
    /// Track title
    pub title: String,
    /// Search relevance (0-100), only present on search hits
    pub score: Option<u32>,
    /// Duration in milliseconds
    pub length: Option<u64>,
    /// Disambiguation comment
    pub disambiguation: Option<String>,
    /// Artist credits (missing on malformed responses)
    pub artist_credit: Option<Vec<ArtistCredit>>,
    /// Releases this recording appears on
    pub releases: Option<Vec<Release>>,
    /// Folksonomy tags
    pub tags: Option<Vec<Tag>>,
}

/// Artist credit (can be multiple for collaborations)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistCredit {
    /// How this artist is credited (may differ from official name)
    pub name: Option<String>,
    /// Join phrase (e.g., " & ", " feat. ")
    pub joinphrase: Option<String>,
    /// The artist
    pub artist: Artist,
}

/// Artist info
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub sort_name: Option<String>,
}

/// Release (album/single/EP), trimmed to what the widget shows
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Release {
    pub id: String,
    pub title: String,
    pub status: Option<String>,
    pub date: Option<String>,
}

/// User-submitted tag
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tag {
    pub name: String,
    /// Vote count (can be negative)
    #[serde(default)]
    pub count: i64,
}

/// Error response from MusicBrainz API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: String,
    pub help: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
