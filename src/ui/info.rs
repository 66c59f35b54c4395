use crate::page::InfoModal;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render(modal: &InfoModal, scroll: u16, frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let body = Paragraph::new(modal.body.as_str())
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" {} ", modal.title))
                .title_bottom(
                    Line::from(" Esc Close ")
                        .alignment(Alignment::Right)
                        .style(Style::default().fg(Color::DarkGray)),
                ),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(body, area);
}
