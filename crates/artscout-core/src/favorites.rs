// Favorites - the one thing we actually persist
use crate::models::Artwork;
use crate::search::dedupe_by_id;
use artscout_store::KeyValueStore;
use tracing::{debug, warn};

/// Slot the favorites blob lives under
pub const FAVORITES_KEY: &str = "art_explorer_favorites";

/// Ordered, id-unique favorites collection with write-through persistence.
///
/// Loaded once, then every `toggle` rewrites the whole slot. Storage
/// failures are logged and swallowed: worst case the favorites just don't
/// survive a restart.
pub struct FavoritesStore {
    backend: Box<dyn KeyValueStore>,
    items: Vec<Artwork>,
}

impl FavoritesStore {
    /// Read the persisted collection. Missing or corrupt data gives an
    /// empty collection.
    pub fn load(backend: Box<dyn KeyValueStore>) -> Self {
        let items = read_favorites(backend.as_ref());
        debug!("Loaded {} favorites", items.len());
        Self { backend, items }
    }

    /// Add the artwork if it isn't a favorite yet, remove it if it is.
    ///
    /// Returns whether the artwork is a favorite afterwards. The record is
    /// stored as given, so later changes upstream don't touch it.
    pub fn toggle(&mut self, artwork: &Artwork) -> bool {
        let now_favorite = match self.items.iter().position(|a| a.id == artwork.id) {
            Some(index) => {
                self.items.remove(index);
                false
            }
            None => {
                self.items.push(artwork.clone());
                true
            }
        };

        self.save();
        now_favorite
    }

    pub fn is_favorite(&self, id: u64) -> bool {
        self.items.iter().any(|a| a.id == id)
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Favorites in the order they were added
    pub fn artworks(&self) -> &[Artwork] {
        &self.items
    }

    /// Favorites that can go on screen. Records saved without an image
    /// stay in the collection but are never shown.
    pub fn presentable(&self) -> impl Iterator<Item = &Artwork> {
        self.items.iter().filter(|a| a.has_image())
    }

    fn save(&self) {
        let blob = match serde_json::to_string(&self.items) {
            Ok(blob) => blob,
            Err(e) => {
                warn!("Failed to serialize favorites: {}", e);
                return;
            }
        };

        if let Err(e) = self.backend.set(FAVORITES_KEY, &blob) {
            warn!("Failed to save favorites: {}", e);
        }
    }
}

fn read_favorites(backend: &dyn KeyValueStore) -> Vec<Artwork> {
    let blob = match backend.get(FAVORITES_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("Failed to read favorites: {}", e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Artwork>>(&blob) {
        Ok(items) => dedupe_by_id(items),
        Err(e) => {
            warn!("Ignoring unreadable favorites: {}", e);
            Vec::new()
        }
    }
}
