//! Adapter layer: Convert a track-search body into an `EnrichmentResult`

use super::dto;
use crate::search::domain::{EnrichmentResult, LookupError};

/// Interpret a parsed search body.
///
/// Zero items is a normal `NotFound`; a body with neither tracks nor an
/// error is malformed.
pub fn to_enrichment(body: dto::TrackSearchBody) -> Result<EnrichmentResult, LookupError> {
    if let Some(error) = body.error {
        return Err(match error.status {
            401 | 403 => LookupError::Auth(error.message),
            429 => LookupError::RateLimited,
            status => LookupError::Api(format!("Spotify error {status}: {}", error.message)),
        });
    }

    if body.reauth == Some(true) {
        return Err(LookupError::Auth(
            "access token expired, re-authorization requested".to_string(),
        ));
    }

    let page = body.tracks.ok_or_else(|| {
        LookupError::MalformedResponse("track search response has no `tracks` object".to_string())
    })?;

    match page.items.into_iter().next() {
        Some(item) => EnrichmentResult::from_uri(item.uri),
        None => Ok(EnrichmentResult::NotFound),
    }
}
