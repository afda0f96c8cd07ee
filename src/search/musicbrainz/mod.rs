//! MusicBrainz API integration
//!
//! Provides the recording search that drives the widget, plus lookup of a
//! single recording by its MusicBrainz ID.
//!
//! API docs: https://musicbrainz.org/doc/MusicBrainz_API

pub mod dto;
mod adapter;
mod client;

pub use adapter::{to_record, to_records};
pub use client::{DEFAULT_BASE_URL, MusicBrainzClient};
