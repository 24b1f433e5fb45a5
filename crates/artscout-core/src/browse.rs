// View-mode state machine for the gallery
//
// Every transition that needs new data hands back a FetchTicket. Tickets
// carry a sequence number so the caller can drop responses that arrive
// after the user has already moved on.

/// What the gallery is showing right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    Browsing { style: String },
    Searching { query: String },
    ViewingFavorites,
}

/// A fetch that has to go over the network
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteQuery {
    Style { style: String, page: u32 },
    Search { query: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    Remote(RemoteQuery),
    /// Served straight from the favorites store
    Favorites,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub request: FetchRequest,
}

#[derive(Debug, Clone)]
pub struct BrowseController {
    mode: ViewMode,
    last_style: String,
    page: u32,
    latest_seq: u64,
}

impl BrowseController {
    pub fn new(default_style: impl Into<String>) -> Self {
        let style = default_style.into();
        Self {
            mode: ViewMode::Browsing {
                style: style.clone(),
            },
            last_style: style,
            page: 1,
            latest_seq: 0,
        }
    }

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Style to return to when leaving search or favorites
    pub fn last_style(&self) -> &str {
        &self.last_style
    }

    pub fn query(&self) -> Option<&str> {
        match &self.mode {
            ViewMode::Searching { query } => Some(query),
            _ => None,
        }
    }

    pub fn is_browsing(&self) -> bool {
        matches!(self.mode, ViewMode::Browsing { .. })
    }

    pub fn viewing_favorites(&self) -> bool {
        self.mode == ViewMode::ViewingFavorites
    }

    /// Ticket for whatever the current mode shows, used on startup
    pub fn start(&mut self) -> FetchTicket {
        self.issue()
    }

    /// Submit the search box. Whitespace-only input clears the search.
    pub fn submit_search(&mut self, input: &str) -> FetchTicket {
        let query = input.trim();
        if query.is_empty() {
            return self.clear_search();
        }

        self.mode = ViewMode::Searching {
            query: query.to_string(),
        };
        self.page = 1;
        self.issue()
    }

    /// Back to browsing the last selected style
    pub fn clear_search(&mut self) -> FetchTicket {
        self.mode = ViewMode::Browsing {
            style: self.last_style.clone(),
        };
        self.page = 1;
        self.issue()
    }

    /// Pick a style chip. Drops any search or favorites view.
    pub fn select_style(&mut self, style: &str) -> FetchTicket {
        self.last_style = style.to_string();
        self.mode = ViewMode::Browsing {
            style: style.to_string(),
        };
        self.page = 1;
        self.issue()
    }

    /// Flip in or out of the favorites view
    pub fn toggle_favorites_view(&mut self) -> FetchTicket {
        self.mode = if self.viewing_favorites() {
            ViewMode::Browsing {
                style: self.last_style.clone(),
            }
        } else {
            ViewMode::ViewingFavorites
        };
        self.page = 1;
        self.issue()
    }

    /// Next page of the current style. Only meaningful while browsing.
    pub fn load_more(&mut self) -> Option<FetchTicket> {
        if !self.is_browsing() {
            return None;
        }
        self.page += 1;
        Some(self.issue())
    }

    /// The favorites view reads the collection directly, so it has to be
    /// refreshed whenever the collection changes
    pub fn favorites_changed(&mut self) -> Option<FetchTicket> {
        if self.viewing_favorites() {
            Some(self.issue())
        } else {
            None
        }
    }

    /// Re-issue the current request, e.g. after an error
    pub fn refresh(&mut self) -> FetchTicket {
        self.issue()
    }

    /// The request the current state maps to
    pub fn current_request(&self) -> FetchRequest {
        match &self.mode {
            ViewMode::Browsing { style } => FetchRequest::Remote(RemoteQuery::Style {
                style: style.clone(),
                page: self.page,
            }),
            ViewMode::Searching { query } => FetchRequest::Remote(RemoteQuery::Search {
                query: query.clone(),
            }),
            ViewMode::ViewingFavorites => FetchRequest::Favorites,
        }
    }

    /// Whether a response for `seq` is still wanted
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest_seq
    }

    fn issue(&mut self) -> FetchTicket {
        self.latest_seq += 1;
        FetchTicket {
            seq: self.latest_seq,
            request: self.current_request(),
        }
    }
}

impl Default for BrowseController {
    fn default() -> Self {
        Self::new("Impressionism")
    }
}
