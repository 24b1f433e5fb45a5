// Terminal UI implementation using ratatui
// The pretty face of ArtScout

pub mod app;
pub mod help_ui;
pub mod runner;
pub mod ui;

pub use app::{App, CardSide, FetchResult, InputMode};
pub use runner::run_tui;
