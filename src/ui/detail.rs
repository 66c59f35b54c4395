use crate::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let item = match app.modal.item() {
        Some(item) => item,
        None => return,
    };

    frame.render_widget(Clear, area);

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(format!(" {} ", item.name))
        .title_bottom(
            Line::from(" o Open model  ↑↓ Scroll  Esc Close ")
                .alignment(Alignment::Right)
                .style(Style::default().fg(Color::DarkGray)),
        );
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    // Layout: viewer(3) + sections(min)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(inner);

    // ── Model viewer ──
    let viewer_src = app.modal.viewer_src();
    let viewer_line = if viewer_src.is_empty() {
        Line::from(Span::styled(" No 3D model", Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(vec![
            Span::styled(" ⬡ ", Style::default().fg(Color::Blue)),
            Span::styled(
                viewer_src,
                Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
            ),
        ])
    };
    let viewer = Paragraph::new(viewer_line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" 3D Model "),
    );
    frame.render_widget(viewer, chunks[0]);

    // ── Text sections ──
    let mut lines = Vec::new();
    for (label, text) in item.sections() {
        lines.push(Line::from(Span::styled(
            format!(" {}", label),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for line in text.lines() {
            lines.push(Line::from(format!("   {}", line)));
        }
        lines.push(Line::from(""));
    }

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.modal.scroll, 0));
    frame.render_widget(content, chunks[1]);
}
