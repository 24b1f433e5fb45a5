// API client for the Art Institute of Chicago public collection
pub mod artic;
pub mod iiif;

// Re-export common types
pub use artic::{ApiError, ArticAgent, ArticArtwork, ArticClient, ARTIC_API_BASE};
pub use iiif::{image_url, ImageSize, IIIF_BASE};
