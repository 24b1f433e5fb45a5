use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render keybindings help popup
pub fn render_keybindings_help(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 80, area);

    // Clear background
    frame.render_widget(Clear, popup_area);

    let help_text = Paragraph::new(get_keybindings_content())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Keybindings Help ")
                .title_alignment(Alignment::Center)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_text, popup_area);
}

fn get_keybindings_content() -> Vec<Line<'static>> {
    let sections: [(&str, &[(&str, &str)]); 4] = [
        (
            "Searching",
            &[
                ("/", "Focus the search box"),
                ("Enter", "Search artworks and artists"),
                ("Ctrl-u / c", "Clear the search"),
                ("Esc", "Leave the search box"),
            ],
        ),
        (
            "Browsing",
            &[
                ("h/l ←/→", "Move between styles"),
                ("Space", "Browse the highlighted style"),
                ("n", "Load more artworks"),
                ("r", "Refresh"),
            ],
        ),
        (
            "Artworks",
            &[
                ("j/k ↓/↑", "Move through results"),
                ("f", "Flip the card"),
                ("v / Enter", "Enlarge the artwork"),
                ("o", "Open the image in your browser"),
                ("y", "Copy the image URL"),
            ],
        ),
        (
            "Favorites",
            &[
                ("s", "Favorite / unfavorite the artwork"),
                ("F", "Show or leave your favorites"),
                ("?", "Toggle this help"),
                ("q", "Quit"),
            ],
        ),
    ];

    let mut lines = Vec::new();
    for (title, bindings) in sections {
        lines.push(Line::from(Span::styled(
            title,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        for (key, action) in bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<12}", key), Style::default().fg(Color::Cyan)),
                Span::raw(*action),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines
}

/// Helper function to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
