use crate::item::Item;

/// Which overlay is on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalId {
    /// The item detail overlay with the model viewer.
    Primary,
    /// An informational overlay, by element id.
    Info(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Hidden,
    Showing(ModalId),
}

/// Owns modal visibility. At most one overlay is showing; every transition
/// goes through this type.
#[derive(Debug, Default)]
pub struct ModalManager {
    state: ModalState,
    /// Item currently populating the detail overlay.
    item: Option<Item>,
    /// Source of the embedded model viewer; empty when nothing is loaded.
    viewer_src: String,
    pub scroll: u16,
}

impl ModalManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn item(&self) -> Option<&Item> {
        self.item.as_ref()
    }

    pub fn viewer_src(&self) -> &str {
        &self.viewer_src
    }

    pub fn is_open(&self) -> bool {
        self.state != ModalState::Hidden
    }

    /// Background scrolling is suspended while any overlay shows.
    pub fn scroll_locked(&self) -> bool {
        self.is_open()
    }

    /// Populate the detail overlay from `item` and show it.
    pub fn open(&mut self, item: Item) {
        tracing::debug!(name = %item.name, "opening detail");
        self.viewer_src = item.model.clone();
        self.item = Some(item);
        self.scroll = 0;
        self.state = ModalState::Showing(ModalId::Primary);
    }

    /// Hide the detail overlay and unload the viewer. Informational
    /// overlays are left alone.
    pub fn close(&mut self) {
        if self.state == ModalState::Showing(ModalId::Primary) {
            self.state = ModalState::Hidden;
        }
        self.viewer_src.clear();
    }

    /// Hide every overlay and unload the viewer.
    pub fn close_all(&mut self) {
        self.state = ModalState::Hidden;
        self.viewer_src.clear();
        self.scroll = 0;
    }

    /// Show the informational overlay `id` if it exists on the page.
    /// Unknown ids are ignored and return false.
    pub fn open_info<'a>(&mut self, id: &str, mut known: impl Iterator<Item = &'a str>) -> bool {
        if !known.any(|k| k == id) {
            tracing::debug!(id, "no such modal");
            return false;
        }
        self.close_all();
        self.state = ModalState::Showing(ModalId::Info(id.to_string()));
        true
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}
