use crate::client::CatalogError;
use crate::grid::{Grid, NO_RESULTS, SEARCHING, SEARCH_FAILED};
use crate::item::{Item, SearchHit};

/// A search to run against the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: u64,
    pub query: String,
}

/// Search box state. Every issued request carries a generation number and
/// only the newest generation may paint the grid.
#[derive(Debug, Default)]
pub struct SearchController {
    pub input: String,
    generation: u64,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        self.input.trim()
    }

    /// Start a search for the current input. Blank input does nothing and
    /// leaves the grid as it is.
    pub fn perform_search(&mut self, grid: &mut Grid) -> Option<SearchRequest> {
        let query = self.query().to_string();
        if query.is_empty() {
            return None;
        }
        grid.set_message(SEARCHING);
        self.generation += 1;
        tracing::info!(%query, generation = self.generation, "search issued");
        Some(SearchRequest {
            generation: self.generation,
            query,
        })
    }

    /// Drop whatever is in flight.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Paint a finished search into the grid. Returns false when the
    /// response belongs to an older request and was discarded.
    pub fn apply(
        &self,
        generation: u64,
        result: Result<Vec<SearchHit>, CatalogError>,
        grid: &mut Grid,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "dropping stale search response");
            return false;
        }
        match result {
            Ok(hits) if hits.is_empty() => {
                tracing::info!(generation, "search returned no results");
                grid.set_message(NO_RESULTS);
            }
            Ok(hits) => {
                tracing::info!(generation, results = hits.len(), "search finished");
                grid.set_items(hits.into_iter().map(Item::from).collect());
            }
            Err(e) => {
                tracing::error!(generation, error = %e, "error fetching plants");
                grid.set_message(SEARCH_FAILED);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridContent;
    use crate::item::NOT_AVAILABLE;
    use proptest::prelude::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    /// Log sink for asserting on emitted events.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn seeded_grid() -> Grid {
        Grid::new(vec![Item {
            name: "Aloe".to_string(),
            ..Default::default()
        }])
    }

    #[test]
    fn test_blank_query_is_noop() {
        let mut search = SearchController::new();
        let mut grid = seeded_grid();
        search.input = "   \t ".to_string();
        assert!(search.perform_search(&mut grid).is_none());
        assert_eq!(grid.items()[0].name, "Aloe");

        // Nothing was issued, so the next real search is the first
        search.input = "aloe".to_string();
        assert_eq!(search.perform_search(&mut grid).unwrap().generation, 1);
    }

    #[test]
    fn test_search_shows_loading_and_trims() {
        let mut search = SearchController::new();
        let mut grid = seeded_grid();
        search.input = "  fern ".to_string();
        let req = search.perform_search(&mut grid).unwrap();
        assert_eq!(req.query, "fern");
        assert_eq!(req.generation, 1);
        assert_eq!(grid.content(), &GridContent::Message(SEARCHING.to_string()));
    }

    #[test]
    fn test_empty_results_message() {
        let mut search = SearchController::new();
        let mut grid = seeded_grid();
        search.input = "fern".to_string();
        let req = search.perform_search(&mut grid).unwrap();
        assert!(search.apply(req.generation, Ok(vec![]), &mut grid));
        assert_eq!(
            grid.content(),
            &GridContent::Message("No plants found. Try a different search term.".to_string())
        );
    }

    #[test]
    fn test_results_rebuild_grid_with_defaults() {
        let mut search = SearchController::new();
        let mut grid = seeded_grid();
        search.input = "fern".to_string();
        let req = search.perform_search(&mut grid).unwrap();
        let hits: Vec<SearchHit> = serde_json::from_str(r#"[{"name":"Fern","model":"m.glb"}]"#).unwrap();
        search.apply(req.generation, Ok(hits), &mut grid);

        assert_eq!(grid.len(), 1);
        let card = &grid.items()[0];
        assert_eq!(card.name, "Fern");
        assert_eq!(card.advantages, NOT_AVAILABLE);
        assert_eq!(card.model, "m.glb");
    }

    #[test]
    fn test_failure_shows_error_message_and_logs() {
        let mut search = SearchController::new();
        let mut grid = seeded_grid();
        search.input = "fern".to_string();
        let req = search.perform_search(&mut grid).unwrap();
        let err = CatalogError::Status {
            status: 503,
            url: "http://plants.test/api/search?q=fern".to_string(),
        };

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            search.apply(req.generation, Err(err), &mut grid);
        });

        assert_eq!(
            grid.content(),
            &GridContent::Message("Error searching plants. Please try again.".to_string())
        );
        let logged = logs.contents();
        assert!(logged.contains("ERROR"));
        assert!(logged.contains("error fetching plants"));
        assert!(logged.contains("503"));
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut search = SearchController::new();
        let mut grid = seeded_grid();
        search.input = "fern".to_string();
        let first = search.perform_search(&mut grid).unwrap();
        search.input = "moss".to_string();
        let second = search.perform_search(&mut grid).unwrap();

        let moss: Vec<SearchHit> = serde_json::from_str(r#"[{"name":"Moss"}]"#).unwrap();
        assert!(search.apply(second.generation, Ok(moss), &mut grid));

        // The slower first response resolves afterwards
        let fern: Vec<SearchHit> = serde_json::from_str(r#"[{"name":"Fern"}]"#).unwrap();
        assert!(!search.apply(first.generation, Ok(fern), &mut grid));
        assert_eq!(grid.items()[0].name, "Moss");
    }

    #[test]
    fn test_invalidate_drops_in_flight() {
        let mut search = SearchController::new();
        let mut grid = seeded_grid();
        search.input = "fern".to_string();
        let req = search.perform_search(&mut grid).unwrap();
        search.invalidate();
        assert!(!search.apply(req.generation, Ok(vec![]), &mut grid));
    }

    proptest! {
        #[test]
        fn prop_whitespace_never_searches(ws in "[ \t\n\r]{0,12}") {
            let mut search = SearchController::new();
            let mut grid = seeded_grid();
            search.input = ws;
            prop_assert!(search.perform_search(&mut grid).is_none());
            prop_assert_eq!(grid.len(), 1);
        }

        #[test]
        fn prop_query_is_trimmed(core in "[a-z][a-z ]{0,10}[a-z]", pad in "[ \t]{0,4}") {
            let mut search = SearchController::new();
            let mut grid = seeded_grid();
            search.input = format!("{pad}{core}{pad}");
            let req = search.perform_search(&mut grid).unwrap();
            prop_assert_eq!(req.query, core);
        }
    }
}
