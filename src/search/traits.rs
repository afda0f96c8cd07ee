//! Trait definitions for external API clients.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real client implementations, while tests
//! can substitute mock implementations.
//!
//! # Example
//!
//! ```ignore
//! use musophile::search::traits::TrackFinder;
//!
//! // In production code:
//! let finder: Arc<dyn TrackFinder> = Arc::new(ProxyClient::new(base)?);
//!
//! // In tests:
//! struct MockTrackFinder { ... }
//! impl TrackFinder for MockTrackFinder { ... }
//! ```

use async_trait::async_trait;

use super::domain::{EnrichmentResult, LookupError, MetadataRecord, SearchQuery};

/// Recording search and lookup.
#[async_trait]
pub trait MetadataApi: Send + Sync {
    /// Search recordings, returning at most `query.limit` records.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<MetadataRecord>, LookupError>;

    /// Look up a recording by its MusicBrainz ID.
    async fn lookup_recording(&self, recording_id: &str) -> Result<MetadataRecord, LookupError>;
}

/// Match a recording to a playable streaming track.
#[async_trait]
pub trait TrackFinder: Send + Sync {
    /// `local_id` identifies the recording for logging; it is not sent.
    async fn find_track(
        &self,
        title: &str,
        artist: &str,
        local_id: &str,
    ) -> Result<EnrichmentResult, LookupError>;
}

// Implement traits for real clients

#[async_trait]
impl MetadataApi for super::musicbrainz::MusicBrainzClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<MetadataRecord>, LookupError> {
        self.search(query).await
    }

    async fn lookup_recording(&self, recording_id: &str) -> Result<MetadataRecord, LookupError> {
        self.lookup_recording(recording_id).await
    }
}

#[async_trait]
impl TrackFinder for super::spotify::ProxyClient {
    async fn find_track(
        &self,
        title: &str,
        artist: &str,
        local_id: &str,
    ) -> Result<EnrichmentResult, LookupError> {
        self.find_track(title, artist, local_id).await
    }
}

#[async_trait]
impl TrackFinder for super::spotify::DirectClient {
    async fn find_track(
        &self,
        title: &str,
        artist: &str,
        local_id: &str,
    ) -> Result<EnrichmentResult, LookupError> {
        self.find_track(title, artist, local_id).await
    }
}
