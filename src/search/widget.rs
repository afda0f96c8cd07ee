//! Search orchestration.
//!
//! One run is:
//! 1. Clear the result area (and supersede any older run)
//! 2. One metadata search
//! 3. For each record, in order: find a track, render, append
//!
//! Enrichment goes through an order-preserving buffered stream. With the
//! default concurrency of 1 that is a plain sequential loop; higher values
//! overlap the lookups but fragments are still appended in metadata order.
//! A failed enrichment renders as "not found" and never aborts the run.

use std::sync::Arc;

use futures::StreamExt;

use super::domain::{EnrichmentResult, LookupError, MetadataRecord, SearchQuery};
use super::render;
use super::results::{ResultArea, RunHandle};
use super::session::SearchTrigger;
use super::traits::{MetadataApi, TrackFinder};

/// Tunables for a widget
#[derive(Debug, Clone, Copy)]
pub struct WidgetOptions {
    /// Upper bound applied to every query's limit
    pub max_limit: u32,
    /// Enrichment lookups in flight at once (1 = sequential)
    pub concurrency: usize,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            max_limit: 100,
            concurrency: 1,
        }
    }
}

/// Counts for a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Fragments appended to the result area
    pub rendered: usize,
    pub found: usize,
    pub not_found: usize,
    /// Enrichment errors, rendered as not found
    pub failed: usize,
    /// A newer run took over before this one finished
    pub superseded: bool,
}

/// How one record's enrichment went
enum Outcome {
    Found,
    NotFound,
    Failed,
}

/// The search widget: trigger, clients and result area
pub struct SearchWidget {
    metadata: Arc<dyn MetadataApi>,
    finder: Arc<dyn TrackFinder>,
    results: ResultArea,
    trigger: SearchTrigger,
    options: WidgetOptions,
}

impl SearchWidget {
    pub fn new(
        metadata: Arc<dyn MetadataApi>,
        finder: Arc<dyn TrackFinder>,
        trigger: SearchTrigger,
        options: WidgetOptions,
    ) -> Self {
        Self {
            metadata,
            finder,
            results: ResultArea::new(),
            trigger,
            options,
        }
    }

    pub fn results(&self) -> &ResultArea {
        &self.results
    }

    /// Handle a click on the search trigger.
    ///
    /// Returns `Ok(None)` without touching anything while the trigger is
    /// disabled.
    pub async fn click(&self, query: SearchQuery) -> Result<Option<RunSummary>, LookupError> {
        if !self.trigger.is_enabled() {
            tracing::info!("Search trigger disabled, ignoring click");
            return Ok(None);
        }
        self.run(query).await.map(Some)
    }

    /// Run one search to completion.
    pub async fn run(&self, query: SearchQuery) -> Result<RunSummary, LookupError> {
        let query = query.clamped(self.options.max_limit);
        let run = self.results.begin_run();
        tracing::info!(
            attribute = %query.attribute,
            term = %query.term,
            limit = query.limit,
            "Starting search"
        );

        let records = match self.metadata.search(&query).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Metadata search failed: {}", e);
                self.results.show_error(run, &e.to_string());
                return Err(e);
            }
        };
        tracing::info!(records = records.len(), "Metadata search returned");

        let mut summary = RunSummary::default();
        let mut fragments = futures::stream::iter(records)
            .map(|record| self.enrich_and_render(run, record))
            .buffered(self.options.concurrency.max(1));

        while let Some(rendered) = fragments.next().await {
            let appended = rendered
                .and_then(|(fragment, outcome)| self.results.append(run, fragment).then_some(outcome));
            let Some(outcome) = appended else {
                tracing::info!("Search superseded by a newer run, stopping");
                summary.superseded = true;
                break;
            };
            summary.rendered += 1;
            match outcome {
                Outcome::Found => summary.found += 1,
                Outcome::NotFound => summary.not_found += 1,
                Outcome::Failed => summary.failed += 1,
            }
        }

        tracing::info!(
            rendered = summary.rendered,
            found = summary.found,
            not_found = summary.not_found,
            failed = summary.failed,
            "Search complete"
        );
        Ok(summary)
    }

    /// Enrich and render one record. Returns `None` without a lookup once
    /// `run` has been superseded.
    async fn enrich_and_render(
        &self,
        run: RunHandle,
        record: MetadataRecord,
    ) -> Option<(String, Outcome)> {
        if !self.results.is_current(run) {
            tracing::debug!(recording = %record.id, "Skipping lookup for superseded run");
            return None;
        }

        let (enrichment, outcome) = match self
            .finder
            .find_track(&record.title, &record.artist_name, &record.id)
            .await
        {
            Ok(result) if result.is_found() => (result, Outcome::Found),
            Ok(_) => (EnrichmentResult::NotFound, Outcome::NotFound),
            Err(e) => {
                tracing::warn!(recording = %record.id, "Track lookup failed: {}", e);
                (EnrichmentResult::NotFound, Outcome::Failed)
            }
        };
        Some((render::render(&record, &enrichment), outcome))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::search::domain::SearchAttribute;
    use crate::search::traits::mocks::{MockMetadata, MockTrackFinder};
    use crate::test_utils::mock_record;

    fn widget(metadata: MockMetadata, finder: MockTrackFinder) -> (SearchWidget, Arc<MockMetadata>, Arc<MockTrackFinder>) {
        widget_with(metadata, finder, SearchTrigger::enabled(), WidgetOptions::default())
    }

    fn widget_with(
        metadata: MockMetadata,
        finder: MockTrackFinder,
        trigger: SearchTrigger,
        options: WidgetOptions,
    ) -> (SearchWidget, Arc<MockMetadata>, Arc<MockTrackFinder>) {
        let metadata = Arc::new(metadata);
        let finder = Arc::new(finder);
        let widget = SearchWidget::new(metadata.clone(), finder.clone(), trigger, options);
        (widget, metadata, finder)
    }

    fn query(term: &str, limit: u32) -> SearchQuery {
        SearchQuery::new(SearchAttribute::Recording, term, limit).unwrap()
    }

    #[tokio::test]
    async fn test_found_track_renders_player() {
        let (widget, metadata, _) = widget(
            MockMetadata::with_records(vec![mock_record("rec-1", "Yesterday")]),
            MockTrackFinder::new().found("Yesterday", "ABC123"),
        );

        let summary = widget.run(query("Yesterday", 1)).await.unwrap();

        assert_eq!(summary.rendered, 1);
        assert_eq!(summary.found, 1);
        assert_eq!(metadata.queries.lock()[0].expression(), "Yesterday");

        let fragments = widget.results().fragments();
        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].contains("embed/track/ABC123"));
        assert!(fragments[0].contains("/user/add-recording/rec-1/ABC123"));
    }

    #[tokio::test]
    async fn test_unmatched_track_renders_sentinel() {
        let (widget, _, _) = widget(
            MockMetadata::with_records(vec![mock_record("rec-1", "Yesterday")]),
            MockTrackFinder::new(),
        );

        let summary = widget.run(query("Yesterday", 1)).await.unwrap();

        assert_eq!(summary.not_found, 1);
        let fragment = &widget.results().fragments()[0];
        assert!(fragment.contains("wasn't found on Spotify"));
        assert!(fragment.contains("/user/add-recording/rec-1/0\""));
    }

    #[tokio::test]
    async fn test_no_records_means_no_enrichment() {
        let (widget, _, finder) = widget(MockMetadata::with_records(vec![]), MockTrackFinder::new());

        let summary = widget.run(query("zzzz", 5)).await.unwrap();

        assert_eq!(summary, RunSummary::default());
        assert!(widget.results().is_empty());
        assert_eq!(finder.call_count(), 0);
    }

    #[tokio::test]
    async fn test_metadata_failure_aborts_run() {
        let (widget, _, finder) = widget(
            MockMetadata::with_error(LookupError::Network("connection refused".to_string())),
            MockTrackFinder::new(),
        );

        let result = widget.run(query("Yesterday", 5)).await;

        assert!(matches!(result, Err(LookupError::Network(_))));
        assert!(widget.results().is_empty());
        assert!(widget.results().has_error());
        assert_eq!(finder.call_count(), 0);
    }

    #[tokio::test]
    async fn test_enrichment_failure_does_not_drop_records() {
        let (widget, _, finder) = widget(
            MockMetadata::with_records(vec![
                mock_record("a", "One"),
                mock_record("b", "Two"),
                mock_record("c", "Three"),
            ]),
            MockTrackFinder::new()
                .found("One", "ID1")
                .failing("Two", LookupError::Auth("The access token expired".to_string()))
                .found("Three", "ID3"),
        );

        let summary = widget.run(query("x", 10)).await.unwrap();

        assert_eq!(summary.rendered, 3);
        assert_eq!(summary.found, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(finder.call_count(), 3);

        let fragments = widget.results().fragments();
        assert!(fragments[1].contains("/user/add-recording/b/0\""));
        assert!(fragments[2].contains("/user/add-recording/c/ID3\""));
    }

    #[tokio::test]
    async fn test_new_run_clears_old_results() {
        let (widget, _, _) = widget(
            MockMetadata::with_records(vec![mock_record("a", "One"), mock_record("b", "Two")]),
            MockTrackFinder::new(),
        );

        widget.run(query("x", 2)).await.unwrap();
        assert_eq!(widget.results().fragment_count(), 2);

        widget.run(query("x", 1)).await.unwrap();
        assert_eq!(widget.results().fragment_count(), 1);
    }

    #[tokio::test]
    async fn test_limit_is_clamped() {
        let (widget, metadata, _) = widget_with(
            MockMetadata::with_records(vec![]),
            MockTrackFinder::new(),
            SearchTrigger::enabled(),
            WidgetOptions {
                max_limit: 25,
                concurrency: 1,
            },
        );

        widget.run(query("x", 1000)).await.unwrap();
        assert_eq!(metadata.queries.lock()[0].limit, 25);
    }

    #[tokio::test]
    async fn test_disabled_trigger_ignores_click() {
        let (widget, metadata, _) = widget_with(
            MockMetadata::with_records(vec![mock_record("a", "One")]),
            MockTrackFinder::new(),
            SearchTrigger::disabled(),
            WidgetOptions::default(),
        );

        let outcome = widget.click(query("x", 1)).await.unwrap();

        assert_eq!(outcome, None);
        assert_eq!(metadata.calls(), 0);
        assert!(widget.results().is_empty());
    }

    #[tokio::test]
    async fn test_enabled_trigger_runs_search() {
        let (widget, _, _) = widget(
            MockMetadata::with_records(vec![mock_record("a", "One")]),
            MockTrackFinder::new(),
        );
        let outcome = widget.click(query("x", 1)).await.unwrap();
        assert_eq!(outcome.map(|s| s.rendered), Some(1));
    }

    #[tokio::test]
    async fn test_concurrent_enrichment_preserves_order() {
        let (widget, _, _) = widget_with(
            MockMetadata::with_records(vec![
                mock_record("a", "Slow"),
                mock_record("b", "Fast"),
                mock_record("c", "Medium"),
            ]),
            MockTrackFinder::new()
                .found("Slow", "S")
                .found("Fast", "F")
                .found("Medium", "M")
                .delayed("Slow", Duration::from_millis(60))
                .delayed("Medium", Duration::from_millis(20)),
            SearchTrigger::enabled(),
            WidgetOptions {
                max_limit: 100,
                concurrency: 3,
            },
        );

        widget.run(query("x", 3)).await.unwrap();

        let fragments = widget.results().fragments();
        assert!(fragments[0].contains("/a/S\""));
        assert!(fragments[1].contains("/b/F\""));
        assert!(fragments[2].contains("/c/M\""));
    }

    #[tokio::test]
    async fn test_superseded_run_skips_lookups() {
        let (widget, _, finder) = widget(MockMetadata::default(), MockTrackFinder::new());

        let stale = widget.results().begin_run();
        widget.results().begin_run();

        let rendered = widget.enrich_and_render(stale, mock_record("a", "One")).await;
        assert!(rendered.is_none());
        assert_eq!(finder.call_count(), 0);
    }

    #[tokio::test]
    async fn test_superseded_run_stops_appending() {
        let (widget, _, _) = widget(
            MockMetadata::with_records(vec![mock_record("a", "Slow"), mock_record("b", "Two")]),
            MockTrackFinder::new().delayed("Slow", Duration::from_millis(50)),
        );

        let first = widget.run(query("first", 2));
        let second = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            widget.run(query("second", 1)).await
        };
        let (first, second) = tokio::join!(first, second);

        assert!(first.unwrap().superseded);
        assert_eq!(second.unwrap().rendered, 1);

        // Only the second run's single fragment survives
        let fragments = widget.results().fragments();
        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].contains("/user/add-recording/a/0\""));
    }
}
