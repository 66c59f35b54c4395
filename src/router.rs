use crate::page::NavLink;
use reqwest::Url;

impl NavLink {
    /// Whether activating this link loads the target in place. Fragment
    /// links and popup triggers keep their own behavior.
    pub fn intercepts(&self) -> bool {
        intercepts(&self.href, self.popup)
    }
}

pub fn intercepts(href: &str, popup: bool) -> bool {
    !popup && !href.is_empty() && !href.starts_with('#')
}

/// Client-side navigation state: the page on screen and the pages before it.
#[derive(Debug, Default)]
pub struct Router {
    current: Option<Url>,
    history: Vec<Url>,
    pending: Option<Url>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Url> {
        self.current.as_ref()
    }

    pub fn pending(&self) -> Option<&Url> {
        self.pending.as_ref()
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Record that `url` is being fetched.
    pub fn begin(&mut self, url: Url) {
        tracing::info!(%url, "navigating");
        self.pending = Some(url);
    }

    /// Whether a completed load for `url` is still wanted.
    pub fn is_pending(&self, url: &Url) -> bool {
        self.pending.as_ref() == Some(url)
    }

    /// The page at `url` is now on screen. With `push`, the previous page
    /// becomes a history entry; without it, arriving at the newest history
    /// entry consumes that entry.
    pub fn commit(&mut self, url: Url, push: bool) {
        if push {
            if let Some(prev) = self.current.take() {
                self.history.push(prev);
            }
        } else if self.history.last() == Some(&url) {
            self.history.pop();
        }
        self.pending = None;
        self.current = Some(url);
    }

    /// Loading failed; nothing changes on screen.
    pub fn abort(&mut self) {
        self.pending = None;
    }

    /// The previous page. The caller loads it without pushing; the entry
    /// stays until that load commits.
    pub fn back(&self) -> Option<Url> {
        self.history.last().cloned()
    }
}
