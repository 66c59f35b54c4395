use crate::grid::GridTarget;
use ratatui::layout::{Constraint, Direction, Layout, Margin, Position, Rect};

pub const NAV_WIDTH: u16 = 26;
pub const CARD_WIDTH: u16 = 30;
pub const CARD_HEIGHT: u16 = 7;
const SEARCH_BUTTON_WIDTH: u16 = 10;

/// Screen regions. Rendering and mouse hit-testing both work from this, so
/// a click always maps to what was drawn.
#[derive(Debug, Clone)]
pub struct ScreenLayout {
    pub area: Rect,
    pub header: Rect,
    pub menu_button: Rect,
    pub search_bar: Rect,
    pub search_button: Rect,
    pub nav_panel: Option<Rect>,
    pub nav_links: Vec<Rect>,
    pub grid_area: Rect,
    /// Visible cards as (item index, rect).
    pub cards: Vec<(usize, Rect)>,
    pub columns: usize,
    pub visible_rows: usize,
    pub status: Rect,
    pub modal: Rect,
}

/// What a mouse click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    MenuButton,
    SearchInput,
    SearchButton,
    NavLink(usize),
    Grid(GridTarget),
    Nothing,
}

impl ScreenLayout {
    pub fn compute(
        area: Rect,
        menu_open: bool,
        nav_count: usize,
        card_count: usize,
        scroll_row: usize,
    ) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let header = chunks[0];
        let menu_button = Rect::new(header.x + 1, header.y + 1, 3, 1).intersection(header);

        let search_bar = chunks[1];
        let search_button = Rect::new(
            search_bar.right().saturating_sub(SEARCH_BUTTON_WIDTH + 1),
            search_bar.y + 1,
            SEARCH_BUTTON_WIDTH,
            1,
        )
        .intersection(search_bar);

        let body = chunks[2];
        let (nav_panel, grid_area) = if menu_open {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(NAV_WIDTH), Constraint::Min(10)])
                .split(body);
            (Some(cols[0]), cols[1])
        } else {
            (None, body)
        };

        let nav_links = nav_panel
            .map(|panel| {
                let inner = panel.inner(Margin::new(1, 1));
                (0..nav_count)
                    .map(|i| Rect::new(inner.x, inner.y + i as u16, inner.width, 1))
                    .take_while(|r| r.y < inner.bottom())
                    .collect()
            })
            .unwrap_or_default();

        let inner = grid_area.inner(Margin::new(1, 1));
        let columns = (inner.width / CARD_WIDTH).max(1) as usize;
        let visible_rows = (inner.height / CARD_HEIGHT).max(1) as usize;
        let first = scroll_row * columns;
        let last = ((scroll_row + visible_rows) * columns).min(card_count);
        let cards = (first..last)
            .filter_map(|index| {
                let row = (index / columns - scroll_row) as u16;
                let col = (index % columns) as u16;
                let rect = Rect::new(
                    inner.x + col * CARD_WIDTH,
                    inner.y + row * CARD_HEIGHT,
                    CARD_WIDTH,
                    CARD_HEIGHT,
                )
                .intersection(inner);
                (!rect.is_empty()).then_some((index, rect))
            })
            .collect();

        Self {
            area,
            header,
            menu_button,
            search_bar,
            search_button,
            nav_panel,
            nav_links,
            grid_area,
            cards,
            columns,
            visible_rows,
            status: chunks[3],
            modal: centered_rect(70, 80, area),
        }
    }

    pub fn hit(&self, column: u16, row: u16) -> Hit {
        let pos = Position::new(column, row);
        if self.menu_button.contains(pos) {
            return Hit::MenuButton;
        }
        if self.search_button.contains(pos) {
            return Hit::SearchButton;
        }
        if self.search_bar.contains(pos) {
            return Hit::SearchInput;
        }
        if let Some(i) = self.nav_links.iter().position(|r| r.contains(pos)) {
            return Hit::NavLink(i);
        }
        if let Some((index, _)) = self.cards.iter().find(|(_, r)| r.contains(pos)) {
            return Hit::Grid(GridTarget::Card(*index));
        }
        if self.grid_area.contains(pos) {
            return Hit::Grid(GridTarget::Background);
        }
        Hit::Nothing
    }
}

/// Create a centered rectangle using percentage of parent area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
