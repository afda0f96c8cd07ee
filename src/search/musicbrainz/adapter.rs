//! Adapter layer: Convert MusicBrainz DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types,
//! and the place where response shape is validated. A recording we cannot
//! render (no artist credit) is a `MalformedResponse`, not a panic further
//! down the line.

use super::dto;
use crate::search::domain::{LookupError, MetadataRecord};

/// Convert a search page into records, keeping at most `limit` of them.
pub fn to_records(
    response: dto::SearchResponse,
    limit: usize,
) -> Result<Vec<MetadataRecord>, LookupError> {
    response
        .recordings
        .into_iter()
        .take(limit)
        .map(to_record)
        .collect()
}

/// Convert a single recording into a record.
pub fn to_record(recording: dto::Recording) -> Result<MetadataRecord, LookupError> {
    let artist_name = first_artist_name(&recording)?;

    let release_title = recording
        .releases
        .as_deref()
        .and_then(|releases| releases.first())
        .map(|release| release.title.clone());

    let tags = recording
        .tags
        .unwrap_or_default()
        .into_iter()
        .map(|tag| tag.name)
        .collect();

    Ok(MetadataRecord {
        id: recording.id,
        title: recording.title,
        artist_name,
        release_title,
        tags,
    })
}

/// Credited name of the first artist, falling back to the official name
fn first_artist_name(recording: &dto::Recording) -> Result<String, LookupError> {
    let credit = recording
        .artist_credit
        .as_deref()
        .and_then(|credits| credits.first())
        .ok_or_else(|| {
            LookupError::MalformedResponse(format!(
                "recording {} has no artist-credit",
                recording.id
            ))
        })?;

    Ok(credit
        .name
        .clone()
        .unwrap_or_else(|| credit.artist.name.clone()))
}
