use super::layout::centered_rect;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn heading(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", title),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn binding(keys: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("    {:<12}", keys), Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ])
}

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(""),
        heading("Global"),
        binding("?", "Toggle this help"),
        binding("q", "Quit application"),
        binding("m", "Toggle the navigation menu"),
        binding("b/Backspace", "Back to the previous page"),
        Line::from(""),
        heading("Plant Grid"),
        binding("←↑↓→ hjkl", "Move between plants"),
        binding("Enter", "Open plant details"),
        binding("click", "Open the clicked plant"),
        binding("/", "Focus the search box"),
        Line::from(""),
        heading("Search Box"),
        binding("Enter", "Search (blank input does nothing)"),
        binding("Esc", "Leave the search box"),
        Line::from(""),
        heading("Menu"),
        binding("↑/↓", "Select a link"),
        binding("Enter", "Follow link or open info popup"),
        Line::from(""),
        heading("Details"),
        binding("↑/↓", "Scroll"),
        binding("o", "Open the 3D model in the browser"),
        binding("Esc/q", "Close"),
        Line::from(""),
    ];

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help: Keybindings ")
                .title_bottom(Line::from(" Press ? or Esc to close ").style(Style::default().fg(Color::DarkGray))),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}
