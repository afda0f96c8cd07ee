//! Recording search widget - finds recordings on MusicBrainz and matches them
//! to playable Spotify tracks.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Queries, records and match results
//! - **API DTOs** (`musicbrainz/dto.rs`, `spotify/dto.rs`) - Exact API response shapes
//! - **Adapters** - Validate DTOs and convert them to domain models
//! - **Clients** - HTTP clients for external APIs, behind the traits in `traits.rs`
//! - **Render** - Pure HTML fragment rendering
//! - **Results** - The result display area
//! - **Session** - Page bootstrap and the session-scoped token
//! - **Widget** - Orchestration of one search run
//!
//! # Usage
//!
//! ```ignore
//! use search::{bootstrap, PageInputs, SearchWidget, SearchQuery, SearchAttribute};
//!
//! let boot = bootstrap(PageInputs::from_file(page)?, EnrichmentStrategy::Direct);
//! let finder = spotify::build_track_finder(strategy, proxy, api, &boot.session)?;
//! let widget = SearchWidget::new(metadata, finder, boot.trigger, WidgetOptions::default());
//!
//! let query = SearchQuery::new(SearchAttribute::Artist, "The Beatles", 10)?;
//! widget.click(query).await?;
//! println!("{}", widget.results().to_html());
//! ```

pub mod domain;
pub mod http;
pub mod musicbrainz;
pub mod render;
pub mod results;
pub mod session;
pub mod spotify;
pub mod traits;
pub mod widget;

pub use domain::{
    EnrichmentResult, LookupError, MetadataRecord, QueryError, SearchAttribute, SearchQuery,
};
pub use results::ResultArea;
pub use session::{AuthToken, Bootstrap, PageInputs, SearchTrigger, Session, bootstrap};
pub use spotify::{EnrichmentStrategy, build_track_finder};
pub use widget::{RunSummary, SearchWidget, WidgetOptions};
