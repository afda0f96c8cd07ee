//! The result display area.
//!
//! Every run starts by taking a fresh [`RunHandle`], which clears the area
//! and bumps its generation. Appends carry the handle, so fragments from a
//! run that has since been superseded are dropped instead of interleaving
//! with the newer results.

use std::sync::Arc;

use parking_lot::Mutex;

use super::render;

/// Handle for one search run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunHandle {
    generation: u64,
}

#[derive(Debug, Default)]
struct AreaState {
    generation: u64,
    fragments: Vec<String>,
    error: Option<String>,
}

/// Shared, cloneable result area
#[derive(Debug, Clone, Default)]
pub struct ResultArea {
    state: Arc<Mutex<AreaState>>,
}

impl ResultArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear prior results and supersede any run still in flight.
    pub fn begin_run(&self) -> RunHandle {
        let mut state = self.state.lock();
        state.generation += 1;
        state.fragments.clear();
        state.error = None;
        RunHandle {
            generation: state.generation,
        }
    }

    /// Whether `run` is still the newest run.
    pub fn is_current(&self, run: RunHandle) -> bool {
        self.state.lock().generation == run.generation
    }

    /// Append a fragment. Returns `false` (and drops it) if `run` is stale.
    pub fn append(&self, run: RunHandle, fragment: String) -> bool {
        let mut state = self.state.lock();
        if state.generation != run.generation {
            tracing::debug!(
                stale = run.generation,
                current = state.generation,
                "Dropping fragment from superseded run"
            );
            return false;
        }
        state.fragments.push(fragment);
        true
    }

    /// Show an error notice for `run`. Ignored if `run` is stale.
    pub fn show_error(&self, run: RunHandle, message: &str) -> bool {
        let mut state = self.state.lock();
        if state.generation != run.generation {
            return false;
        }
        state.error = Some(render::render_error(message));
        true
    }

    pub fn fragment_count(&self) -> usize {
        self.state.lock().fragments.len()
    }

    pub fn has_error(&self) -> bool {
        self.state.lock().error.is_some()
    }

    /// The area as it would appear in the page.
    pub fn to_html(&self) -> String {
        let state = self.state.lock();
        let mut html = String::from("<div id=\"searchResults\">\n");
        if let Some(ref error) = state.error {
            html.push_str(error);
        }
        for fragment in &state.fragments {
            html.push_str(fragment);
        }
        html.push_str("</div>\n");
        html
    }
}

#[cfg(test)]
impl ResultArea {
    pub fn fragments(&self) -> Vec<String> {
        self.state.lock().fragments.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.fragment_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_run_clears_previous_results() {
        let area = ResultArea::new();
        let first = area.begin_run();
        assert!(area.append(first, "<p>old</p>".to_string()));
        assert!(area.show_error(first, "boom"));

        let _second = area.begin_run();
        assert!(area.is_empty());
        assert!(!area.has_error());
    }

    #[test]
    fn test_stale_appends_are_dropped() {
        let area = ResultArea::new();
        let first = area.begin_run();
        let second = area.begin_run();

        assert!(!area.append(first, "stale".to_string()));
        assert!(area.append(second, "fresh".to_string()));
        assert!(!area.show_error(first, "late failure"));

        assert_eq!(area.fragments(), vec!["fresh".to_string()]);
        assert!(!area.is_current(first));
        assert!(area.is_current(second));
    }

    #[test]
    fn test_clones_share_state() {
        let area = ResultArea::new();
        let view = area.clone();
        let run = area.begin_run();
        area.append(run, "a".to_string());
        assert_eq!(view.fragment_count(), 1);
    }

    #[test]
    fn test_to_html_order() {
        let area = ResultArea::new();
        let run = area.begin_run();
        area.append(run, "<p>1</p>".to_string());
        area.append(run, "<p>2</p>".to_string());

        let html = area.to_html();
        assert!(html.starts_with("<div id=\"searchResults\">"));
        assert!(html.find("<p>1</p>").unwrap() < html.find("<p>2</p>").unwrap());
    }

    #[test]
    fn test_error_in_html() {
        let area = ResultArea::new();
        let run = area.begin_run();
        area.show_error(run, "Network error: timeout");
        assert!(area.to_html().contains("Search failed: Network error: timeout"));
    }
}
