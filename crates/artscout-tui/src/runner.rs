// TUI event loop and terminal management
use crate::app::{App, FetchResult, InputMode};
use artscout_api::ImageSize;
use artscout_core::{FetchTicket, SearchEngine};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

pub async fn run_tui(app: App, engine: SearchEngine, mouse_enabled: bool) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app, engine).await;

    // Restore terminal even if the loop bailed out
    disable_raw_mode()?;
    if mouse_enabled {
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
    } else {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    terminal.show_cursor()?;

    result
}

async fn event_loop(terminal: &mut Tui, mut app: App, engine: SearchEngine) -> anyhow::Result<()> {
    let (tx, mut rx): (UnboundedSender<FetchResult>, UnboundedReceiver<FetchResult>) =
        mpsc::unbounded_channel();

    let ticket = app.controller.start();
    dispatch(&mut app, &engine, &tx, ticket);

    loop {
        // Apply whatever finished since the last frame
        while let Ok(done) = rx.try_recv() {
            app.finish_fetch(done);
        }

        terminal.draw(|f| crate::ui::render(f, &mut app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        let ticket = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(&mut app, key),
            Event::Mouse(mouse) => {
                match mouse.kind {
                    MouseEventKind::ScrollDown => app.next_result(),
                    MouseEventKind::ScrollUp => app.previous_result(),
                    _ => {}
                }
                None
            }
            _ => None,
        };

        if let Some(ticket) = ticket {
            dispatch(&mut app, &engine, &tx, ticket);
        }

        if app.should_quit {
            break;
        }
    }

    info!("Leaving TUI");
    Ok(())
}

/// Serve a ticket: favorites inline, everything else on a background task
fn dispatch(app: &mut App, engine: &SearchEngine, tx: &UnboundedSender<FetchResult>, ticket: FetchTicket) {
    let Some((seq, query)) = app.begin_fetch(ticket) else {
        return;
    };

    debug!("Spawning fetch #{}: {:?}", seq, query);
    let engine = engine.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = engine.fetch(&query).await.map_err(|e| e.to_string());
        // Receiver only goes away on shutdown
        let _ = tx.send(FetchResult { seq, outcome });
    });
}

/// Map a key press to state changes. Returns a ticket when new data is needed.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<FetchTicket> {
    // Feedback lasts until the next key
    app.status_message = None;

    // Popups swallow keys until closed
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.toggle_help();
        }
        return None;
    }

    match app.input_mode {
        InputMode::Searching => match key.code {
            KeyCode::Enter => Some(app.submit_search()),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.enter_normal_mode();
                Some(app.clear_search())
            }
            KeyCode::Char(c) => {
                app.search_input.push(c);
                None
            }
            KeyCode::Backspace => {
                app.search_input.pop();
                None
            }
            KeyCode::Esc => {
                app.enter_normal_mode();
                None
            }
            _ => None,
        },
        InputMode::Normal if app.show_enlarged => {
            match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('v') | KeyCode::Char('q') => {
                    app.toggle_enlarged()
                }
                KeyCode::Char('o') => open_selected_image(app),
                KeyCode::Char('y') => copy_selected_image_url(app),
                KeyCode::Char('s') => return app.toggle_selected_favorite(),
                _ => {}
            }
            None
        }
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => {
                app.quit();
                None
            }
            KeyCode::Char('?') => {
                app.toggle_help();
                None
            }
            KeyCode::Char('/') => {
                app.enter_search_mode();
                None
            }
            KeyCode::Char('c') if app.controller.query().is_some() => Some(app.clear_search()),
            KeyCode::Char('F') => Some(app.toggle_favorites_view()),
            KeyCode::Char('s') => app.toggle_selected_favorite(),
            KeyCode::Char('n') => app.load_more(),
            KeyCode::Char('r') => Some(app.refresh()),
            KeyCode::Char('h') | KeyCode::Left if app.controller.is_browsing() => {
                app.previous_style();
                None
            }
            KeyCode::Char('l') | KeyCode::Right if app.controller.is_browsing() => {
                app.next_style();
                None
            }
            KeyCode::Char(' ') if app.controller.is_browsing() => app.select_highlighted_style(),
            KeyCode::Char('j') | KeyCode::Down => {
                app.next_result();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                app.previous_result();
                None
            }
            KeyCode::Char('f') => {
                app.flip_card();
                None
            }
            KeyCode::Char('v') | KeyCode::Enter => {
                app.toggle_enlarged();
                None
            }
            KeyCode::Char('o') => {
                open_selected_image(app);
                None
            }
            KeyCode::Char('y') => {
                copy_selected_image_url(app);
                None
            }
            _ => None,
        },
    }
}

fn open_selected_image(app: &mut App) {
    if let Some(url) = app.selected_image_url(ImageSize::Full) {
        if let Err(e) = open::that(&url) {
            app.status_message = Some(format!("Failed to open browser: {}", e));
        }
    }
}

fn copy_selected_image_url(app: &mut App) {
    let Some(url) = app.selected_image_url(ImageSize::Full) else {
        return;
    };

    let copied = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(url));
    app.status_message = Some(match copied {
        Ok(()) => "Image URL copied to clipboard".to_string(),
        Err(e) => format!("Failed to copy: {}", e),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use artscout_core::{FavoritesStore, FetchRequest, RemoteQuery};
    use artscout_store::MemoryStore;

    fn app() -> App {
        let favorites = FavoritesStore::load(Box::new(MemoryStore::new()));
        let styles = vec!["Impressionism".to_string(), "Baroque".to_string()];
        App::new(favorites, styles, "Impressionism", "https://iiif.example".to_string())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_and_submitting_a_search() {
        let mut app = app();
        assert!(handle_key(&mut app, press(KeyCode::Char('/'))).is_none());
        for c in "cubism".chars() {
            assert!(handle_key(&mut app, press(KeyCode::Char(c))).is_none());
        }

        let ticket = handle_key(&mut app, press(KeyCode::Enter)).unwrap();
        assert_eq!(
            ticket.request,
            FetchRequest::Remote(RemoteQuery::Search {
                query: "cubism".to_string()
            })
        );
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_style_keys_only_while_browsing() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('l')));
        assert_eq!(app.style_cursor, 1);

        let ticket = handle_key(&mut app, press(KeyCode::Char(' '))).unwrap();
        assert!(matches!(
            ticket.request,
            FetchRequest::Remote(RemoteQuery::Style { ref style, page: 1 }) if style == "Baroque"
        ));

        handle_key(&mut app, press(KeyCode::Char('F')));
        handle_key(&mut app, press(KeyCode::Char('h')));
        assert_eq!(app.style_cursor, 1);
    }

    #[test]
    fn test_load_more_and_quit() {
        let mut app = app();
        let ticket = handle_key(&mut app, press(KeyCode::Char('n'))).unwrap();
        assert!(matches!(
            ticket.request,
            FetchRequest::Remote(RemoteQuery::Style { page: 2, .. })
        ));

        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_swallows_keys() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('?')));
        assert!(app.show_help);

        assert!(handle_key(&mut app, press(KeyCode::Char('n'))).is_none());
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(!app.show_help);
    }

    #[test]
    fn test_status_message_clears_on_next_key() {
        let mut app = app();
        app.set_results(vec![artscout_core::Artwork {
            id: 1,
            title: "The Bedroom".to_string(),
            artist_display: None,
            date_display: None,
            medium_display: None,
            image_id: Some("abc".to_string()),
        }]);

        handle_key(&mut app, press(KeyCode::Char('s')));
        assert!(app.status_message.as_deref().unwrap().starts_with("Added"));

        handle_key(&mut app, press(KeyCode::Char('j')));
        assert!(app.status_message.is_none());
    }
}
