use crate::client::CatalogError;
use crate::item::SearchHit;
use crate::search::SearchRequest;
use reqwest::Url;
use std::sync::mpsc::{Receiver, Sender};

/// Work requested by the controller, carried out by the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Load a page in place. `push` adds the current page to history.
    FetchPage { url: Url, push: bool },

    /// Query the search endpoint
    Search(SearchRequest),

    /// Hand a URL to the system browser
    OpenExternal(String),
}

/// Completions sent from background tasks to the TUI thread
#[derive(Debug)]
pub enum AppEvent {
    PageLoaded {
        url: Url,
        push: bool,
        result: Result<String, CatalogError>,
    },

    SearchFinished {
        generation: u64,
        query: String,
        result: Result<Vec<SearchHit>, CatalogError>,
    },
}

/// Channel pair between background tasks and the TUI thread
pub struct EventChannel {
    /// Cloned into every spawned task
    pub tx: Sender<AppEvent>,

    /// Drained by the main loop on each tick
    pub rx: Receiver<AppEvent>,
}

impl EventChannel {
    pub fn new() -> Self {
        let (tx, rx) = std::sync::mpsc::channel();
        Self { tx, rx }
    }

    /// All events that have arrived so far, without blocking.
    pub fn drain(&self) -> Vec<AppEvent> {
        self.rx.try_iter().collect()
    }
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_channel_drain() {
        let channel = EventChannel::new();
        assert!(channel.drain().is_empty());

        let tx = channel.tx.clone();
        std::thread::spawn(move || {
            tx.send(AppEvent::SearchFinished {
                generation: 3,
                query: "fern".to_string(),
                result: Ok(vec![]),
            })
            .unwrap();
        })
        .join()
        .unwrap();

        let events = channel.drain();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            AppEvent::SearchFinished { generation: 3, .. }
        ));
        assert!(channel.drain().is_empty());
    }

    #[test]
    fn test_effect_variants() {
        let url = Url::parse("http://plants.test/care").unwrap();
        let effect = Effect::FetchPage {
            url: url.clone(),
            push: true,
        };
        assert!(matches!(effect, Effect::FetchPage { push: true, .. }));
        assert_ne!(effect, Effect::OpenExternal(url.to_string()));
    }
}
