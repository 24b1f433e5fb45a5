use anyhow::Context;
use artscout_api::ImageSize;
use artscout_core::{
    providers::ArticProvider, ArtistBanner, Artwork, Config, FavoritesStore, SearchEngine,
};
use artscout_store::{MemoryStore, SqliteStore};
use artscout_tui::{run_tui, App};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "artscout")]
#[command(version, about = "Browse, search and bookmark artworks from the Art Institute of Chicago", long_about = None)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, env = "ARTSCOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Favorites database (overrides the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Launch the interactive gallery (default)
    Tui,
    /// Search artworks and artists
    Search {
        /// Search query
        query: String,
        /// Print JSON instead of a listing
        #[arg(long)]
        json: bool,
    },
    /// Show one page of artworks for a style
    Browse {
        /// Art style (defaults to the configured style)
        style: Option<String>,
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        json: bool,
    },
    /// List saved favorites
    Favorites {
        #[arg(long)]
        json: bool,
    },
    /// Add or remove an artwork from favorites by id
    Favorite {
        /// Artwork id
        id: u64,
    },
    /// List the available styles
    Styles,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    init_logging(interactive);

    match cli.command {
        None | Some(Commands::Tui) => {
            let favorites = open_favorites(&config, cli.db);
            let engine = build_engine(&config)?;
            let app = App::new(
                favorites,
                config.browse.styles.clone(),
                &config.browse.default_style,
                config.api.iiif_url.clone(),
            );
            run_tui(app, engine, config.ui.mouse_enabled).await?;
        }
        Some(Commands::Search { query, json }) => {
            let query = query.trim();
            if query.is_empty() {
                anyhow::bail!("Search query is empty");
            }

            info!("Searching for: {}", query);
            let engine = build_engine(&config)?;
            let favorites = open_favorites(&config, cli.db);
            let outcome = engine.search(query).await.context("Failed to fetch artworks")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.artworks)?);
            } else {
                if let Some(banner) = &outcome.banner {
                    print_banner(banner);
                }
                print_artworks(&outcome.artworks, &favorites, &config);
            }
        }
        Some(Commands::Browse { style, page, json }) => {
            let style = style.unwrap_or_else(|| config.browse.default_style.clone());
            info!("Browsing {} page {}", style, page);

            let engine = build_engine(&config)?;
            let favorites = open_favorites(&config, cli.db);
            let artworks = engine
                .browse_style(&style, page.max(1))
                .await
                .context("Failed to fetch artworks")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&artworks)?);
            } else {
                println!("{} (page {})\n", style, page.max(1));
                print_artworks(&artworks, &favorites, &config);
            }
        }
        Some(Commands::Favorites { json }) => {
            let favorites = open_favorites(&config, cli.db);
            let shown: Vec<Artwork> = favorites.presentable().cloned().collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else if shown.is_empty() {
                println!("No favorites yet. Use `artscout favorite <id>` or press 's' in the gallery.");
            } else {
                println!("{} favorites\n", shown.len());
                print_artworks(&shown, &favorites, &config);
            }
        }
        Some(Commands::Favorite { id }) => {
            let mut favorites = open_favorites(&config, cli.db);

            // Already saved? No need to hit the network to remove it
            let artwork = match favorites.artworks().iter().find(|a| a.id == id) {
                Some(saved) => saved.clone(),
                None => {
                    let artwork = build_engine(&config)?
                        .artwork(id)
                        .await
                        .with_context(|| format!("Failed to fetch artwork {}", id))?;
                    if !artwork.has_image() {
                        anyhow::bail!("Artwork {} has no image, so it can't be added to favorites", id);
                    }
                    artwork
                }
            };

            if favorites.toggle(&artwork) {
                println!("♥ Added \"{}\" to favorites", artwork.title);
            } else {
                println!("Removed \"{}\" from favorites", artwork.title);
            }
        }
        Some(Commands::Styles) => {
            for style in &config.browse.styles {
                let marker = if *style == config.browse.default_style { "*" } else { " " };
                println!("{} {}", marker, style);
            }
        }
    }

    Ok(())
}

/// Log to stderr for one-shot commands; the TUI owns the terminal, so it
/// logs to a file instead
fn init_logging(interactive: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "artscout=info".into());

    if interactive {
        let file = Config::data_dir().ok().and_then(|dir| {
            std::fs::create_dir_all(&dir).ok()?;
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join("artscout.log"))
                .ok()
        });

        if let Some(file) = file {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(std::sync::Mutex::new(file)),
                )
                .init();
        }
        // No writable log file: stay silent rather than scribble on the TUI
        return;
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_engine(config: &Config) -> anyhow::Result<SearchEngine> {
    let provider = ArticProvider::with_base_url(&config.api.base_url)
        .context("Failed to build HTTP client")?;
    Ok(SearchEngine::with_limits(Arc::new(provider), config.search))
}

/// Open the favorites database, falling back to an in-memory store so the
/// app still works (favorites just won't survive a restart)
fn open_favorites(config: &Config, db_override: Option<PathBuf>) -> FavoritesStore {
    let path = match db_override.map(Ok).unwrap_or_else(|| config.database_path()) {
        Ok(path) => path,
        Err(e) => {
            warn!("No place to store favorites: {}", e);
            return FavoritesStore::load(Box::new(MemoryStore::new()));
        }
    };

    match SqliteStore::open(&path) {
        Ok(store) => FavoritesStore::load(Box::new(store)),
        Err(e) => {
            warn!("Failed to open {}: {}", path.display(), e);
            FavoritesStore::load(Box::new(MemoryStore::new()))
        }
    }
}

fn print_banner(banner: &ArtistBanner) {
    println!("Found artists: {}", banner.artists.join(", "));
    println!("Showing {} artworks\n", banner.total_results);
}

fn print_artworks(artworks: &[Artwork], favorites: &FavoritesStore, config: &Config) {
    if artworks.is_empty() {
        println!("No artworks found.");
        return;
    }

    for (i, artwork) in artworks.iter().enumerate() {
        let heart = if favorites.is_favorite(artwork.id) { " ♥" } else { "" };
        println!("{:>3}. {} [{}]{}", i + 1, artwork.title, artwork.id, heart);

        let artist = artwork.artist().lines().next().unwrap_or_default();
        match &artwork.date_display {
            Some(date) => println!("     {} · {}", artist, date),
            None => println!("     {}", artist),
        }
        if let Some(url) = artwork.image_url(&config.api.iiif_url, ImageSize::Card) {
            println!("     {}", url);
        }
    }
}
