use crate::client::resolve;
use crate::grid::{Grid, GridTarget};
use crate::messages::{AppEvent, Effect};
use crate::modal::{ModalId, ModalManager, ModalState};
use crate::page::Page;
use crate::router::Router;
use crate::search::SearchController;
use crate::ui::layout::{Hit, ScreenLayout};
use ratatui::layout::{Position, Rect};
use reqwest::Url;

/// Where keyboard input goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Grid,
    Search,
    Menu,
}

/// Main application state: one catalog page plus the controls wired to it.
pub struct App {
    pub should_quit: bool,
    pub show_help: bool,

    base_url: Url,
    pub page: Page,
    pub router: Router,
    pub grid: Grid,
    pub modal: ModalManager,
    pub search: SearchController,

    // Navigation panel
    pub menu_open: bool,
    pub menu_selected: usize,

    pub focus: Focus,
    pub grid_scroll: usize,
    pub viewport: Rect,

    pub status_msg: String,
}

impl App {
    pub fn new(base_url: Url) -> Self {
        Self {
            should_quit: false,
            show_help: false,

            base_url,
            page: Page::default(),
            router: Router::new(),
            grid: Grid::default(),
            modal: ModalManager::new(),
            search: SearchController::new(),

            menu_open: false,
            menu_selected: 0,

            focus: Focus::Grid,
            grid_scroll: 0,
            viewport: Rect::new(0, 0, 80, 24), // Updated on first draw/resize

            status_msg: "Loading catalog...".to_string(),
        }
    }

    /// Load the first page.
    pub fn start(&mut self, path: &str) -> Option<Effect> {
        self.navigate(path, true)
    }

    pub fn layout(&self) -> ScreenLayout {
        ScreenLayout::compute(
            self.viewport,
            self.menu_open,
            self.page.nav_links.len(),
            self.grid.len(),
            self.grid_scroll,
        )
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Rect::new(0, 0, width, height);
        self.ensure_selection_visible();
    }

    fn navigate(&mut self, href: &str, push: bool) -> Option<Effect> {
        match resolve(&self.base_url, self.router.current(), href) {
            Ok(url) => {
                self.router.begin(url.clone());
                self.status_msg = format!("Loading {}...", url);
                Some(Effect::FetchPage { url, push })
            }
            Err(e) => {
                tracing::warn!(href, error = %e, "cannot resolve link");
                self.status_msg = e.user_message();
                None
            }
        }
    }

    /// Apply a finished background task.
    pub fn handle_event(&mut self, event: AppEvent) -> Option<Effect> {
        match event {
            AppEvent::PageLoaded { url, push, result } => self.on_page_loaded(url, push, result),
            AppEvent::SearchFinished {
                generation,
                query,
                result,
            } => {
                let failed = result.as_ref().err().map(|e| e.user_message());
                if self.search.apply(generation, result, &mut self.grid) {
                    self.grid_scroll = 0;
                    self.status_msg = match failed {
                        Some(msg) => msg,
                        None => format!("{} results for \"{}\"", self.grid.len(), query),
                    };
                }
                None
            }
        }
    }

    fn on_page_loaded(
        &mut self,
        url: Url,
        push: bool,
        result: Result<String, crate::client::CatalogError>,
    ) -> Option<Effect> {
        if !self.router.is_pending(&url) {
            tracing::debug!(%url, "ignoring superseded page load");
            return None;
        }
        match result {
            Ok(html) => {
                let page = Page::parse(Some(url.clone()), &html);
                self.router.commit(url.clone(), push);
                self.replace_content(page);
                tracing::info!(%url, items = self.grid.len(), "page loaded");
                None
            }
            Err(e) => {
                tracing::warn!(%url, error = %e, "navigation error, falling back to browser");
                self.router.abort();
                self.status_msg = format!("{}; opening {} in browser", e.user_message(), url);
                Some(Effect::OpenExternal(url.to_string()))
            }
        }
    }

    /// Swap in a new page's content while keeping the controls wired.
    fn replace_content(&mut self, page: Page) {
        self.grid = Grid::new(page.items.clone());
        self.grid_scroll = 0;
        self.modal.close_all();
        self.menu_open = false;
        self.menu_selected = 0;
        self.focus = Focus::Grid;
        self.search.input.clear();
        self.search.invalidate();
        self.status_msg = if page.title.is_empty() {
            format!("{} plants", page.items.len())
        } else {
            format!("{}: {} plants", page.title, page.items.len())
        };
        self.page = page;
    }

    // ── Navigation panel ──

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
        self.focus = if self.menu_open { Focus::Menu } else { Focus::Grid };
    }

    pub fn menu_next(&mut self) {
        if self.menu_selected + 1 < self.page.nav_links.len() {
            self.menu_selected += 1;
        }
    }

    pub fn menu_prev(&mut self) {
        self.menu_selected = self.menu_selected.saturating_sub(1);
    }

    /// Follow the navigation link at `index`.
    pub fn activate_link(&mut self, index: usize) -> Option<Effect> {
        let link = self.page.nav_links.get(index)?.clone();
        if link.popup {
            self.menu_open = false;
            self.focus = Focus::Grid;
            if let Some(id) = link.modal_id.as_deref() {
                let known = self.page.info_modals.iter().map(|m| m.id.as_str());
                self.modal.open_info(id, known);
            }
            return None;
        }
        if link.intercepts() {
            return self.navigate(&link.href, true);
        }
        None
    }

    pub fn back(&mut self) -> Option<Effect> {
        let url = self.router.back()?;
        self.navigate(url.as_str(), false)
    }

    // ── Grid and detail overlay ──

    /// Open the detail overlay for whatever card `target` resolves to.
    pub fn open_target(&mut self, target: GridTarget) {
        if !self.page.has_grid {
            return;
        }
        if let GridTarget::Card(index) = target {
            self.grid.select(index);
        }
        if let Some(item) = self.grid.dispatch(target).cloned() {
            self.modal.open(item);
        }
    }

    pub fn open_selected(&mut self) {
        self.open_target(GridTarget::Card(self.grid.selected));
    }

    /// Close whichever overlay is showing, the way its own close control
    /// would.
    pub fn close_modal(&mut self) {
        match self.modal.state().clone() {
            ModalState::Showing(ModalId::Primary) => self.modal.close(),
            ModalState::Showing(ModalId::Info(_)) => self.modal.close_all(),
            ModalState::Hidden => {}
        }
    }

    pub fn open_model_externally(&mut self) -> Option<Effect> {
        let src = self.modal.viewer_src();
        if src.is_empty() {
            self.status_msg = "No model for this plant".to_string();
            return None;
        }
        match resolve(&self.base_url, self.router.current(), src) {
            Ok(url) => Some(Effect::OpenExternal(url.to_string())),
            Err(e) => {
                self.status_msg = e.user_message();
                None
            }
        }
    }

    pub fn move_selection(&mut self, delta: Move) {
        // Background is frozen while an overlay shows
        if self.modal.scroll_locked() {
            return;
        }
        let columns = self.layout().columns;
        match delta {
            Move::Left => self.grid.prev(),
            Move::Right => self.grid.next(),
            Move::Up => self.grid.up(columns),
            Move::Down => self.grid.down(columns),
        }
        self.ensure_selection_visible();
    }

    fn ensure_selection_visible(&mut self) {
        let layout = self.layout();
        let row = self.grid.selected / layout.columns.max(1);
        if row < self.grid_scroll {
            self.grid_scroll = row;
        } else if row >= self.grid_scroll + layout.visible_rows {
            self.grid_scroll = row + 1 - layout.visible_rows;
        }
    }

    // ── Search ──

    pub fn focus_search(&mut self) {
        self.focus = Focus::Search;
    }

    pub fn submit_search(&mut self) -> Option<Effect> {
        if !self.page.has_grid {
            return None;
        }
        let request = self.search.perform_search(&mut self.grid)?;
        self.grid_scroll = 0;
        self.status_msg = format!("Searching for \"{}\"...", request.query);
        Some(Effect::Search(request))
    }

    // ── Mouse ──

    pub fn click(&mut self, column: u16, row: u16) -> Option<Effect> {
        if self.show_help {
            self.show_help = false;
            return None;
        }
        let layout = self.layout();
        if self.modal.is_open() {
            if !layout.modal.contains(Position::new(column, row)) {
                self.close_modal();
            }
            return None;
        }
        match layout.hit(column, row) {
            Hit::MenuButton => {
                self.toggle_menu();
                None
            }
            Hit::SearchButton => self.submit_search(),
            Hit::SearchInput => {
                self.focus_search();
                None
            }
            Hit::NavLink(i) => {
                self.menu_selected = i;
                self.activate_link(i)
            }
            Hit::Grid(target) => {
                self.focus = Focus::Grid;
                self.open_target(target);
                None
            }
            Hit::Nothing => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Left,
    Right,
    Up,
    Down,
}
