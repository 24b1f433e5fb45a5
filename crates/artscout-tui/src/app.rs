// TUI application state and event handling
use artscout_api::ImageSize;
use artscout_core::{
    ArtistBanner, Artwork, BrowseController, FavoritesStore, FetchOutcome, FetchRequest,
    FetchTicket, RemoteQuery, ViewMode,
};
use ratatui::widgets::ListState;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,    // Navigating results
    Searching, // Typing in search box
}

/// Which side of the artwork card is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSide {
    Front, // Title and artist
    Back,  // Date, medium and ids
}

/// A finished network fetch, tagged with the ticket it answers
#[derive(Debug)]
pub struct FetchResult {
    pub seq: u64,
    pub outcome: Result<FetchOutcome, String>,
}

pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub search_input: String,
    pub controller: BrowseController,
    pub favorites: FavoritesStore,
    pub styles: Vec<String>,
    pub style_cursor: usize,
    pub results: Vec<Artwork>,
    pub selected_index: usize,
    pub list_state: ListState,
    // Whether `results` currently holds the favorites collection
    showing_favorites: bool,
    pub loading: bool,
    pub error_message: Option<String>,
    // Transient feedback (copied URL, favorite added, ...)
    pub status_message: Option<String>,
    pub banner: Option<ArtistBanner>,
    pub card_side: CardSide,
    pub show_enlarged: bool,
    pub show_help: bool,
    pub iiif_url: String,
}

impl App {
    pub fn new(
        favorites: FavoritesStore,
        styles: Vec<String>,
        default_style: &str,
        iiif_url: String,
    ) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        let style_cursor = styles
            .iter()
            .position(|s| s == default_style)
            .unwrap_or(0);

        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            controller: BrowseController::new(default_style),
            favorites,
            styles,
            style_cursor,
            results: Vec::new(),
            selected_index: 0,
            list_state,
            showing_favorites: false,
            loading: false,
            error_message: None,
            status_message: None,
            banner: None,
            card_side: CardSide::Front,
            show_enlarged: false,
            show_help: false,
            iiif_url,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Searching;
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Start a fetch. Favorites are answered on the spot; network queries
    /// are handed back for the runner to spawn.
    pub fn begin_fetch(&mut self, ticket: FetchTicket) -> Option<(u64, RemoteQuery)> {
        self.error_message = None;
        self.banner = None;

        match ticket.request {
            FetchRequest::Favorites => {
                let favorites: Vec<Artwork> = self.favorites.presentable().cloned().collect();
                self.loading = false;
                if self.showing_favorites {
                    // Same view, list only changed underneath: keep the cursor nearby
                    self.replace_results(favorites);
                } else {
                    self.set_results(favorites);
                }
                self.showing_favorites = true;
                None
            }
            FetchRequest::Remote(query) => {
                self.loading = true;
                Some((ticket.seq, query))
            }
        }
    }

    /// Apply a finished fetch. Returns false when the result was stale.
    pub fn finish_fetch(&mut self, result: FetchResult) -> bool {
        if !self.controller.is_current(result.seq) {
            debug!("Dropping stale fetch #{}", result.seq);
            return false;
        }

        self.loading = false;
        match result.outcome {
            Ok(outcome) => {
                self.banner = outcome.banner;
                self.set_results(outcome.artworks);
            }
            Err(e) => {
                self.error_message = Some(format!("Failed to fetch artworks: {}", e));
                self.set_results(Vec::new());
            }
        }
        self.showing_favorites = false;
        true
    }

    pub fn submit_search(&mut self) -> FetchTicket {
        self.enter_normal_mode();
        let ticket = self.controller.submit_search(&self.search_input);
        // Keep the box in sync with what was actually searched
        self.search_input = self.controller.query().unwrap_or_default().to_string();
        ticket
    }

    pub fn clear_search(&mut self) -> FetchTicket {
        self.search_input.clear();
        self.sync_style_cursor();
        self.controller.clear_search()
    }

    pub fn toggle_favorites_view(&mut self) -> FetchTicket {
        self.search_input.clear();
        let ticket = self.controller.toggle_favorites_view();
        self.sync_style_cursor();
        ticket
    }

    /// Select the style under the chip cursor
    pub fn select_highlighted_style(&mut self) -> Option<FetchTicket> {
        let style = self.styles.get(self.style_cursor)?.clone();
        self.search_input.clear();
        Some(self.controller.select_style(&style))
    }

    pub fn next_style(&mut self) {
        if !self.styles.is_empty() {
            self.style_cursor = (self.style_cursor + 1) % self.styles.len();
        }
    }

    pub fn previous_style(&mut self) {
        if !self.styles.is_empty() {
            self.style_cursor = (self.style_cursor + self.styles.len() - 1) % self.styles.len();
        }
    }

    fn sync_style_cursor(&mut self) {
        if let Some(index) = self
            .styles
            .iter()
            .position(|s| s == self.controller.last_style())
        {
            self.style_cursor = index;
        }
    }

    pub fn load_more(&mut self) -> Option<FetchTicket> {
        self.controller.load_more()
    }

    pub fn refresh(&mut self) -> FetchTicket {
        self.controller.refresh()
    }

    /// Favorite or unfavorite the highlighted artwork
    pub fn toggle_selected_favorite(&mut self) -> Option<FetchTicket> {
        let artwork = self.selected_artwork()?.clone();
        let now_favorite = self.favorites.toggle(&artwork);

        self.status_message = Some(if now_favorite {
            format!("Added \"{}\" to favorites", artwork.title)
        } else {
            format!("Removed \"{}\" from favorites", artwork.title)
        });

        self.controller.favorites_changed()
    }

    pub fn is_selected_favorite(&self) -> bool {
        self.selected_artwork()
            .map(|a| self.favorites.is_favorite(a.id))
            .unwrap_or(false)
    }

    pub fn flip_card(&mut self) {
        self.card_side = match self.card_side {
            CardSide::Front => CardSide::Back,
            CardSide::Back => CardSide::Front,
        };
    }

    pub fn toggle_enlarged(&mut self) {
        if self.show_enlarged || self.selected_artwork().is_some() {
            self.show_enlarged = !self.show_enlarged;
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn next_result(&mut self) {
        if !self.results.is_empty() {
            self.selected_index = (self.selected_index + 1).min(self.results.len() - 1);
            self.list_state.select(Some(self.selected_index));
            self.card_side = CardSide::Front;
        }
    }

    pub fn previous_result(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
            self.card_side = CardSide::Front;
        }
    }

    pub fn selected_artwork(&self) -> Option<&Artwork> {
        self.results.get(self.selected_index)
    }

    pub fn selected_image_url(&self, size: ImageSize) -> Option<String> {
        self.selected_artwork()?.image_url(&self.iiif_url, size)
    }

    /// A fresh result set, selection back at the top
    pub fn set_results(&mut self, results: Vec<Artwork>) {
        self.selected_index = 0;
        self.replace_results(results);
    }

    /// Swap the list contents but keep the selection where it was, clamped
    fn replace_results(&mut self, results: Vec<Artwork>) {
        self.results = results;
        self.selected_index = self.selected_index.min(self.results.len().saturating_sub(1));
        if self.results.is_empty() {
            self.show_enlarged = false;
        }
        self.list_state.select(Some(self.selected_index));
        self.card_side = CardSide::Front;
    }

    pub fn mode_label(&self) -> String {
        match self.controller.mode() {
            ViewMode::Browsing { style } => format!("{} · page {}", style, self.controller.page()),
            ViewMode::Searching { query } => format!("Search: {}", query),
            ViewMode::ViewingFavorites => "Favorites".to_string(),
        }
    }

    /// What to say when there is nothing to show
    pub fn empty_message(&self) -> String {
        match self.controller.mode() {
            ViewMode::ViewingFavorites => {
                "No favorites yet. Press 's' on any artwork to add it to your favorites!".to_string()
            }
            ViewMode::Searching { query } => format!(
                "No artworks found for \"{}\". Try a different search term.",
                query
            ),
            ViewMode::Browsing { .. } => "No artworks found for this style. Try another one.".to_string(),
        }
    }
}
