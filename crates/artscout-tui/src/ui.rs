// UI rendering logic
use crate::app::{App, CardSide, InputMode};
use crate::help_ui::{centered_rect, render_keybindings_help};
use artscout_api::ImageSize;
use artscout_core::{Artwork, ViewMode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

const ACCENT: Color = Color::Rgb(212, 175, 55);

pub fn render(frame: &mut Frame, app: &mut App) {
    let show_styles = app.controller.is_browsing();
    let show_banner = app.banner.is_some() && !app.loading && app.error_message.is_none();

    let mut constraints = vec![
        Constraint::Length(3), // Header
        Constraint::Length(3), // Search input
    ];
    if show_styles {
        constraints.push(Constraint::Length(3)); // Style chips
    }
    if show_banner {
        constraints.push(Constraint::Length(4)); // Found artists
    }
    constraints.push(Constraint::Min(5)); // Main content
    constraints.push(Constraint::Length(1)); // Status bar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    let mut next = 0;
    let mut take = || {
        let area = chunks[next];
        next += 1;
        area
    };

    render_header(frame, app, take());
    render_search_input(frame, app, take());
    if show_styles {
        render_style_chips(frame, app, take());
    }
    if show_banner {
        render_banner(frame, app, take());
    }
    let content_area = take();
    let status_area = take();

    // Adaptive split: on narrow screens, give more space to results
    let results_pct = if frame.area().width < 100 { 50 } else { 40 };
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(results_pct),
            Constraint::Percentage(100 - results_pct),
        ])
        .split(content_area);

    if app.loading {
        render_notice(frame, content_area, "Loading artworks...", ACCENT);
    } else if let Some(error) = &app.error_message {
        render_notice(frame, content_area, error, Color::LightRed);
    } else if app.results.is_empty() {
        render_notice(frame, content_area, &app.empty_message(), Color::Gray);
    } else {
        render_results_list(frame, app, content_chunks[0]);
        render_card(frame, app, content_chunks[1]);
    }

    render_status_bar(frame, app, status_area);

    if app.show_enlarged {
        render_enlarged(frame, app, frame.area());
    }

    if app.show_help {
        render_keybindings_help(frame, frame.area());
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![Span::styled(
        "Art Explorer",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(logo, header_chunks[0]);

    let favorites_style = if app.controller.viewing_favorites() {
        Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT)
    };

    let status = Paragraph::new(Line::from(vec![
        Span::styled(app.mode_label(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(format!(" ♥ Favorites {} ", app.favorites.count()), favorites_style),
    ]))
    .alignment(Alignment::Right)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, header_chunks[1]);
}

fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let (border_color, title) = match app.input_mode {
        InputMode::Searching => (ACCENT, " Search (Enter to search, Esc to cancel) "),
        InputMode::Normal => (Color::DarkGray, " Search artworks or artists (/) "),
    };

    let text = if app.search_input.is_empty() && app.input_mode == InputMode::Normal {
        Span::styled("Search for artworks or artists...", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.search_input.as_str())
    };

    let input = Paragraph::new(Line::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(input, area);

    if app.input_mode == InputMode::Searching {
        let cursor_x = area.x + 1 + app.search_input.chars().count() as u16;
        frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn render_style_chips(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.controller.last_style();
    let mut spans = Vec::new();

    for (i, style) in app.styles.iter().enumerate() {
        let mut chip = if style == active {
            Style::default().fg(Color::Black).bg(ACCENT)
        } else {
            Style::default().fg(Color::Gray)
        };
        if i == app.style_cursor {
            chip = chip.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }
        spans.push(Span::styled(format!(" {} ", style), chip));
        spans.push(Span::raw(" "));
    }

    let chips = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Styles (h/l, space) "));
    frame.render_widget(chips, area);
}

fn render_banner(frame: &mut Frame, app: &App, area: Rect) {
    let Some(banner) = &app.banner else {
        return;
    };

    let lines = vec![
        Line::from(vec![
            Span::raw("Found artists: "),
            Span::styled(
                banner.artists.join(", "),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("Showing {} artworks", banner.total_results),
            Style::default().fg(Color::Gray),
        )),
    ];

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(ACCENT)));
    frame.render_widget(widget, area);
}

fn render_notice(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let notice = Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(notice, area);
}

fn render_results_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .results
        .iter()
        .map(|artwork| {
            let heart = if app.favorites.is_favorite(artwork.id) {
                Span::styled("♥ ", Style::default().fg(Color::Red))
            } else {
                Span::raw("  ")
            };

            ListItem::new(vec![
                Line::from(vec![
                    heart,
                    Span::styled(artwork.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                ]),
                Line::from(Span::styled(
                    format!("  {}", first_line(artwork.artist())),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    let title = format!(" Artworks ({}) ", app.results.len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_card(frame: &mut Frame, app: &App, area: Rect) {
    let Some(artwork) = app.selected_artwork() else {
        return;
    };

    let (title, lines) = match app.card_side {
        CardSide::Front => (" Card (f to flip) ", card_front(app, artwork)),
        CardSide::Back => (" Details (f to flip) ", card_back(app, artwork)),
    };

    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(card, area);
}

fn card_front<'a>(app: &App, artwork: &'a Artwork) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(Span::styled(
            artwork.title.as_str(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::raw(artwork.artist())),
        Line::from(""),
    ];

    if app.favorites.is_favorite(artwork.id) {
        lines.push(Line::from(Span::styled("♥ In your favorites", Style::default().fg(Color::Red))));
    } else {
        lines.push(Line::from(Span::styled(
            "♡ Press s to favorite",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(Span::styled(
        "Press v to enlarge",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn card_back<'a>(app: &App, artwork: &'a Artwork) -> Vec<Line<'a>> {
    vec![
        detail_line("Title", &artwork.title),
        detail_line("Artist", artwork.artist()),
        detail_line("Date", artwork.date_display.as_deref().unwrap_or("Unknown")),
        detail_line("Medium", artwork.medium_display.as_deref().unwrap_or("Unknown")),
        detail_line("Artwork ID", &artwork.id.to_string()),
        detail_line(
            "Image",
            &artwork
                .image_url(&app.iiif_url, ImageSize::Card)
                .unwrap_or_else(|| "No image".to_string()),
        ),
    ]
}

fn detail_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<11}", label), Style::default().fg(Color::Gray)),
        Span::raw(value.to_string()),
    ])
}

/// The enlarged view: everything we know about the artwork plus image links
fn render_enlarged(frame: &mut Frame, app: &App, area: Rect) {
    let Some(artwork) = app.selected_artwork() else {
        return;
    };

    let popup_area = centered_rect(80, 70, area);
    frame.render_widget(Clear, popup_area);

    let mut lines = vec![
        Line::from(Span::styled(
            artwork.title.clone(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(artwork.artist().lines().map(|l| Line::from(l.to_string())));
    lines.push(Line::from(""));
    lines.push(detail_line("Date", artwork.date_display.as_deref().unwrap_or("Unknown")));
    lines.push(detail_line("Medium", artwork.medium_display.as_deref().unwrap_or("Unknown")));
    lines.push(Line::from(""));
    if let Some(url) = artwork.image_url(&app.iiif_url, ImageSize::Card) {
        lines.push(detail_line("Preview", &url));
    }
    if let Some(url) = artwork.image_url(&app.iiif_url, ImageSize::Full) {
        lines.push(detail_line("Full size", &url));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "o open in browser · y copy URL · s favorite · Esc close",
        Style::default().fg(Color::DarkGray),
    )));

    let popup = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Artwork ")
                .title_alignment(Alignment::Center)
                .border_style(Style::default().fg(ACCENT)),
        );
    frame.render_widget(popup, popup_area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let text = if let Some(message) = &app.status_message {
        Span::styled(message.clone(), Style::default().fg(ACCENT))
    } else {
        let hint = match app.controller.mode() {
            ViewMode::Browsing { .. } => "/ search · F favorites · n load more · s favorite · ? help · q quit",
            ViewMode::Searching { .. } => "/ search · c clear · F favorites · s favorite · ? help · q quit",
            ViewMode::ViewingFavorites => "F back to browsing · s unfavorite · v enlarge · ? help · q quit",
        };
        Span::styled(hint, Style::default().fg(Color::DarkGray))
    };

    frame.render_widget(Paragraph::new(Line::from(text)), area);
}

/// API artist strings look like "Claude Monet\nFrench, 1840-1926"
fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or(text)
}
