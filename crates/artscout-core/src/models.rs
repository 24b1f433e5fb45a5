use artscout_api::{image_url, ArticAgent, ArticArtwork, ImageSize};
use serde::{Deserialize, Deserializer, Serialize};

/// Artwork model - the star of the show
///
/// This is also the shape persisted in the favorites slot, so field names
/// match the API's JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Artwork {
    pub id: u64,
    #[serde(default = "untitled", deserialize_with = "title_or_untitled")]
    pub title: String,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub date_display: Option<String>,
    #[serde(default)]
    pub medium_display: Option<String>,
    #[serde(default)]
    pub image_id: Option<String>,
}

fn untitled() -> String {
    "Untitled".to_string()
}

/// `null` and blank titles read back as "Untitled", same as fresh API records
fn title_or_untitled<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let title = Option::<String>::deserialize(deserializer)?;
    Ok(title.filter(|t| !t.trim().is_empty()).unwrap_or_else(untitled))
}

impl Artwork {
    /// Only artworks with an image make it onto the screen
    pub fn has_image(&self) -> bool {
        self.image_id
            .as_deref()
            .map(|id| !id.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn image_url(&self, iiif_base: &str, size: ImageSize) -> Option<String> {
        image_url(iiif_base, self.image_id.as_deref(), size)
    }

    /// Artist line with a fallback for anonymous works
    pub fn artist(&self) -> &str {
        self.artist_display.as_deref().unwrap_or("Unknown artist")
    }
}

impl From<ArticArtwork> for Artwork {
    fn from(raw: ArticArtwork) -> Self {
        Artwork {
            id: raw.id,
            title: raw
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(untitled),
            artist_display: raw.artist_display,
            date_display: raw.date_display,
            medium_display: raw.medium_display,
            image_id: raw.image_id,
        }
    }
}

/// Artist (or other agent) match. Only `title`, the display name, is ever
/// shown; it doubles as the query for the artist's works.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Agent {
    pub id: u64,
    pub title: String,
}

impl From<ArticAgent> for Agent {
    fn from(raw: ArticAgent) -> Self {
        Agent {
            id: raw.id,
            title: raw.title,
        }
    }
}
