use super::layout::ScreenLayout;
use crate::app::{App, Focus};
use crate::grid::GridContent;
use crate::item::Item;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

pub fn render(app: &App, frame: &mut Frame, layout: &ScreenLayout) {
    render_header(app, frame, layout);
    render_search(app, frame, layout);
    if let Some(panel) = layout.nav_panel {
        render_nav(app, frame, panel);
    }
    render_grid(app, frame, layout);
    render_status(app, frame, layout.status);
}

fn render_header(app: &App, frame: &mut Frame, layout: &ScreenLayout) {
    let title = if app.page.title.is_empty() {
        "Plant Explorer"
    } else {
        app.page.title.as_str()
    };
    let location = match (app.router.pending(), app.router.current()) {
        (Some(pending), _) => format!("loading {}…", pending.path()),
        (None, Some(current)) => current.path().to_string(),
        (None, None) => String::new(),
    };

    let menu_style = if app.menu_open {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ☰ ", menu_style.add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(
            title,
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("   {}", location), Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    // Paragraph starts at the top row; nudge into the middle of the header
    let inner = Rect::new(layout.header.x, layout.header.y + 1, layout.header.width, layout.header.height.saturating_sub(1));
    frame.render_widget(header, inner.intersection(layout.header));
}

fn render_search(app: &App, frame: &mut Frame, layout: &ScreenLayout) {
    let editing = app.focus == Focus::Search;
    let style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let label = if editing { " 🔍 " } else { " 🔍 (/) " };

    let bar = Paragraph::new(format!("{}{}", label, app.search.input))
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(" Search plants "),
        );
    frame.render_widget(bar, layout.search_bar);

    let button = Paragraph::new("[Search]")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(button, layout.search_button);

    if editing {
        let cursor_x = layout.search_bar.x + 1 + label.width() as u16 + app.search.input.width() as u16;
        let cursor_x = cursor_x.min(layout.search_button.x.saturating_sub(1));
        frame.set_cursor_position((cursor_x, layout.search_bar.y + 1));
    }
}

fn render_nav(app: &App, frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = app
        .page
        .nav_links
        .iter()
        .map(|link| {
            let marker = if link.popup {
                "ⓘ "
            } else if link.intercepts() {
                "→ "
            } else {
                "  "
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::DarkGray)),
                Span::raw(link.label.clone()),
            ]))
        })
        .collect();

    let border = if app.focus == Focus::Menu {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(" Menu "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if app.focus == Focus::Menu {
        state.select(Some(app.menu_selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_grid(app: &App, frame: &mut Frame, layout: &ScreenLayout) {
    let count_info = match app.grid.content() {
        GridContent::Items(items) if !items.is_empty() => {
            format!(" {}/{} ", app.grid.selected + 1, items.len())
        }
        _ => String::new(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Plants ")
        .title_bottom(Line::from(count_info).alignment(Alignment::Right));
    frame.render_widget(block, layout.grid_area);

    match app.grid.content() {
        GridContent::Message(message) => {
            let inner = Rect::new(
                layout.grid_area.x + 2,
                layout.grid_area.y + 1,
                layout.grid_area.width.saturating_sub(4),
                layout.grid_area.height.saturating_sub(2),
            )
            .intersection(layout.grid_area);
            let text = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::Yellow))
                .wrap(Wrap { trim: true });
            frame.render_widget(text, inner);
        }
        GridContent::Items(items) => {
            for (index, rect) in &layout.cards {
                if let Some(item) = items.get(*index) {
                    let selected = *index == app.grid.selected && app.focus == Focus::Grid;
                    render_card(item, selected, frame, *rect);
                }
            }
        }
    }
}

fn render_card(item: &Item, selected: bool, frame: &mut Frame, area: Rect) {
    let border = if selected {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let width = area.width.saturating_sub(2) as usize;

    // The model line stands in for the embedded viewer
    let model_line = if item.model.is_empty() {
        Span::styled("no model", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            format!("⬡ {}", truncate_str(&item.model, width.saturating_sub(2))),
            Style::default().fg(Color::Blue),
        )
    };

    let lines = vec![
        Line::from(Span::styled(
            truncate_str(&item.name, width),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(model_line),
        Line::from(""),
        Line::from(Span::styled("Quick View", Style::default().fg(Color::Cyan))),
    ];
    let card = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).border_style(border));
    frame.render_widget(card, area);
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let key = |k: &'static str| {
        Span::styled(k, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    };
    let mut spans = vec![
        key(" ←↑↓→"),
        Span::raw(" Move  "),
        key("Enter"),
        Span::raw(" Open  "),
        key("/"),
        Span::raw(" Search  "),
        key("m"),
        Span::raw(" Menu  "),
    ];
    if app.router.can_go_back() {
        spans.push(key("b"));
        spans.push(Span::raw(" Back  "));
    }
    spans.extend([
        key("?"),
        Span::raw(" Help  "),
        key("q"),
        Span::raw(" Quit  "),
        Span::styled(app.status_msg.as_str(), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Truncate a string to `max_width` display columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        used += w;
        result.push(c);
    }
    result.push('…');
    result
}
