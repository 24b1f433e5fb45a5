// Core gallery logic - searching, browsing and favorites
pub mod browse;
pub mod config;
pub mod error;
pub mod favorites;
pub mod models;
pub mod providers;
pub mod search;

pub use browse::{BrowseController, FetchRequest, FetchTicket, RemoteQuery, ViewMode};
pub use config::Config;
pub use error::Error;
pub use favorites::FavoritesStore;
pub use models::{Agent, Artwork};
pub use search::{ArtistBanner, ArtworkSource, FetchOutcome, SearchEngine};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
