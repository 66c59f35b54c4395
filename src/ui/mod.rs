mod catalog;
mod detail;
mod help;
mod info;
pub mod layout;

use crate::app::App;
use crate::modal::{ModalId, ModalState};
use layout::ScreenLayout;
use ratatui::Frame;

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    let layout = ScreenLayout::compute(
        frame.area(),
        app.menu_open,
        app.page.nav_links.len(),
        app.grid.len(),
        app.grid_scroll,
    );

    catalog::render(app, frame, &layout);

    // Overlays on top of the page
    match app.modal.state() {
        ModalState::Showing(ModalId::Primary) => detail::render(app, frame, layout.modal),
        ModalState::Showing(ModalId::Info(id)) => {
            if let Some(modal) = app.page.info_modal(id) {
                info::render(modal, app.modal.scroll, frame, layout.modal);
            }
        }
        ModalState::Hidden => {}
    }

    if app.show_help {
        help::render(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::messages::{AppEvent, Effect};
    use ratatui::{Terminal, backend::TestBackend};
    use reqwest::Url;

    const PAGE: &str = r##"<title>Herbal Garden</title>
<ul class="nav-links"><li><a href="/">Home</a></li>
<li><a href="#" class="open-popup-link" data-modal-id="about">About</a></li></ul>
<section class="shop-section">
<div class="box" data-name="Aloe" data-info="Succulent" data-advantages="Hardy" data-model="https://models.example/aloe"></div>
<div class="box" data-name="Neem" data-model=""></div>
</section>
<div id="about" class="modal"><h2>About Us</h2><p>A virtual herbal garden.</p></div>"##;

    fn app() -> App {
        let mut app = App::new(Url::parse("http://plants.test/").unwrap());
        app.resize(100, 40);
        let Some(Effect::FetchPage { url, push }) = app.start("/") else {
            panic!("expected page fetch");
        };
        app.handle_event(AppEvent::PageLoaded {
            url,
            push,
            result: Ok(PAGE.to_string()),
        });
        app
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_render_grid() {
        let screen = draw(&app());
        assert!(screen.contains("Herbal Garden"));
        assert!(screen.contains("Aloe"));
        assert!(screen.contains("Neem"));
        assert!(screen.contains("Quick View"));
    }

    #[test]
    fn test_render_menu_panel() {
        let mut app = app();
        app.toggle_menu();
        let screen = draw(&app);
        assert!(screen.contains("Home"));
        assert!(screen.contains("About"));
    }

    #[test]
    fn test_render_detail_overlay() {
        let mut app = app();
        app.open_selected();
        let screen = draw(&app);
        assert!(screen.contains("Succulent"));
        assert!(screen.contains("Hardy"));
        assert!(screen.contains("https://models.example/aloe"));
    }

    #[test]
    fn test_render_info_overlay() {
        let mut app = app();
        app.activate_link(1);
        let screen = draw(&app);
        assert!(screen.contains("About Us"));
        assert!(screen.contains("A virtual herbal garden."));
    }

    #[test]
    fn test_render_grid_message() {
        let mut app = app();
        app.grid.set_message(crate::grid::NO_RESULTS);
        let screen = draw(&app);
        assert!(screen.contains("No plants found. Try a different search term."));
    }

    #[test]
    fn test_render_help_and_tiny_terminal() {
        let mut app = app();
        app.show_help = true;
        assert!(draw(&app).contains("Keybindings"));

        // Must not panic on a cramped screen
        app.grid.set_items(vec![Item::default(); 30]);
        let mut terminal = Terminal::new(TestBackend::new(20, 8)).unwrap();
        terminal.draw(|frame| render(&app, frame)).unwrap();
    }
}
