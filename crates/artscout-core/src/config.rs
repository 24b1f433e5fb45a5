use artscout_api::{ARTIC_API_BASE, IIIF_BASE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
///
/// This gets loaded from the config file and CLI args.
/// Priority: CLI > File > Defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchLimits,
    #[serde(default)]
    pub browse: BrowseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load config from default location, falling back to defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load config from an explicit path. A missing file means defaults.
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            // No config file? Use defaults
            Ok(Self::default())
        }
    }

    /// Save config to disk
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the config file path
    /// Uses XDG on Linux, Application Support on macOS, AppData on Windows
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("artscout");

        Ok(config_dir.join("config.toml"))
    }

    /// Where the favorites database lives
    pub fn database_path(&self) -> crate::Result<PathBuf> {
        match &self.storage.database {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("favorites.db")),
        }
    }

    /// Per-user data directory for the database and log file
    pub fn data_dir() -> crate::Result<PathBuf> {
        Ok(dirs::data_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find data directory".into()))?
            .join("artscout"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Collection API root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// IIIF image service root used to build image URLs
    #[serde(default = "default_iiif_url")]
    pub iiif_url: String,
}

fn default_base_url() -> String {
    ARTIC_API_BASE.to_string()
}

fn default_iiif_url() -> String {
    IIIF_BASE.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            iiif_url: default_iiif_url(),
        }
    }
}

/// Caps applied by the search aggregator and the style browser
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchLimits {
    /// Direct artwork matches per search
    #[serde(default = "default_artwork_limit")]
    pub artwork_limit: u32,

    /// Artists considered per search
    #[serde(default = "default_agent_limit")]
    pub agent_limit: u32,

    /// Extra artworks pulled in per matched artist
    #[serde(default = "default_artist_artwork_limit")]
    pub artist_artwork_limit: u32,

    /// Hard cap on the merged result set
    #[serde(default = "default_result_cap")]
    pub result_cap: usize,

    /// Artworks per style page
    #[serde(default = "default_browse_limit")]
    pub browse_limit: u32,
}

fn default_artwork_limit() -> u32 {
    12
}

fn default_agent_limit() -> u32 {
    5
}

fn default_artist_artwork_limit() -> u32 {
    4
}

fn default_result_cap() -> usize {
    24
}

fn default_browse_limit() -> u32 {
    12
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            artwork_limit: default_artwork_limit(),
            agent_limit: default_agent_limit(),
            artist_artwork_limit: default_artist_artwork_limit(),
            result_cap: default_result_cap(),
            browse_limit: default_browse_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// Style shown on startup
    #[serde(default = "default_style")]
    pub default_style: String,

    /// Style chips, in display order
    #[serde(default = "default_styles")]
    pub styles: Vec<String>,
}

fn default_style() -> String {
    "Impressionism".to_string()
}

fn default_styles() -> Vec<String> {
    [
        "Impressionism",
        "Post-Impressionism",
        "Surrealism",
        "Pop Art",
        "Renaissance",
        "Abstract Expressionism",
        "Cubism",
        "Modernism",
        "Art Deco",
        "Baroque",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            default_style: default_style(),
            styles: default_styles(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Favorites database path. Defaults to the user data directory.
    #[serde(default)]
    pub database: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Enable mouse support in TUI
    #[serde(default = "default_mouse")]
    pub mouse_enabled: bool,
}

fn default_mouse() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            mouse_enabled: default_mouse(),
        }
    }
}
