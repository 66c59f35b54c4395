use crate::item::Item;

pub const SEARCHING: &str = "Searching...";
pub const NO_RESULTS: &str = "No plants found. Try a different search term.";
pub const SEARCH_FAILED: &str = "Error searching plants. Please try again.";

/// What the grid region currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridContent {
    Items(Vec<Item>),
    Message(String),
}

/// Where a click inside the grid region landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridTarget {
    Card(usize),
    Background,
}

/// The item grid. Clicks are resolved here against whatever cards are
/// present, so cards added later by a search need no extra wiring.
#[derive(Debug)]
pub struct Grid {
    content: GridContent,
    pub selected: usize,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Grid {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            content: GridContent::Items(items),
            selected: 0,
        }
    }

    pub fn content(&self) -> &GridContent {
        &self.content
    }

    pub fn items(&self) -> &[Item] {
        match &self.content {
            GridContent::Items(items) => items,
            GridContent::Message(_) => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn set_items(&mut self, items: Vec<Item>) {
        self.content = GridContent::Items(items);
        self.selected = 0;
    }

    /// Replace all cards with a single line of text.
    pub fn set_message(&mut self, message: &str) {
        self.content = GridContent::Message(message.to_string());
        self.selected = 0;
    }

    /// Resolve a click to the card it hit, if any.
    pub fn dispatch(&self, target: GridTarget) -> Option<&Item> {
        match target {
            GridTarget::Card(index) => self.items().get(index),
            GridTarget::Background => None,
        }
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.items().get(self.selected)
    }

    pub fn select(&mut self, index: usize) {
        if index < self.len() {
            self.selected = index;
        }
    }

    pub fn next(&mut self) {
        if self.selected + 1 < self.len() {
            self.selected += 1;
        }
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move one row down in a grid `columns` wide.
    pub fn down(&mut self, columns: usize) {
        let target = self.selected + columns.max(1);
        if target < self.len() {
            self.selected = target;
        } else if !self.is_empty() {
            self.selected = self.len() - 1;
        }
    }

    pub fn up(&mut self, columns: usize) {
        self.selected = self.selected.saturating_sub(columns.max(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(names: &[&str]) -> Vec<Item> {
        names
            .iter()
            .map(|n| Item {
                name: n.to_string(),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_dispatch_card_and_background() {
        let grid = Grid::new(named(&["Aloe", "Tulsi"]));
        assert_eq!(grid.dispatch(GridTarget::Card(1)).unwrap().name, "Tulsi");
        assert!(grid.dispatch(GridTarget::Card(5)).is_none());
        assert!(grid.dispatch(GridTarget::Background).is_none());
    }

    #[test]
    fn test_dispatch_covers_replaced_items() {
        let mut grid = Grid::new(named(&["Aloe"]));
        grid.set_items(named(&["Fern", "Moss"]));
        assert_eq!(grid.dispatch(GridTarget::Card(1)).unwrap().name, "Moss");
    }

    #[test]
    fn test_message_has_no_cards() {
        let mut grid = Grid::new(named(&["Aloe"]));
        grid.set_message(SEARCHING);
        assert_eq!(grid.content(), &GridContent::Message(SEARCHING.to_string()));
        assert!(grid.is_empty());
        assert!(grid.dispatch(GridTarget::Card(0)).is_none());
    }

    #[test]
    fn test_selection_clamps() {
        let mut grid = Grid::new(named(&["a", "b", "c", "d", "e"]));
        grid.prev();
        assert_eq!(grid.selected, 0);
        grid.down(3);
        assert_eq!(grid.selected, 3);
        grid.down(3);
        assert_eq!(grid.selected, 4);
        grid.next();
        assert_eq!(grid.selected, 4);
        grid.up(3);
        assert_eq!(grid.selected, 1);
        grid.select(42);
        assert_eq!(grid.selected, 1);
    }
}
