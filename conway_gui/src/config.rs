// config.rs - Command-line options for the desktop front end

use std::path::PathBuf;

use clap::Parser;
use conway::grid::DEFAULT_SIZE;
use conway::{PatternLibrary, ToggleAge};
use tracing::{info, warn};

#[derive(Debug, Clone, Parser)]
#[command(name = "conway_gui", about = "Conway's Game of Life with cell ages")]
pub struct Config {
    /// Board width in cells
    #[arg(short, long, default_value_t = DEFAULT_SIZE)]
    pub width: usize,

    /// Board height in cells
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    pub height: usize,

    /// Initial cell size in pixels
    #[arg(long, default_value_t = 15.0)]
    pub cell_size: f32,

    /// Generations per second while running
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=60))]
    pub frame_rate: u32,

    /// JSON pattern library (name -> [[row, col], ...])
    #[arg(long)]
    pub patterns: Option<PathBuf>,

    /// Toggling a cell to dead gives it age 0 instead of 1
    #[arg(long)]
    pub consistent_toggle_age: bool,

    /// Evaluate each generation as one tokio task per row
    #[arg(long)]
    pub row_coroutines: bool,
}

impl Config {
    pub fn toggle_age(&self) -> ToggleAge {
        if self.consistent_toggle_age {
            ToggleAge::FollowState
        } else {
            ToggleAge::AlwaysOne
        }
    }

    /// Patterns from `--patterns`, falling back to the built-in set when the
    /// file is missing or unreadable.
    pub fn pattern_library(&self) -> PatternLibrary {
        let Some(path) = &self.patterns else {
            return PatternLibrary::builtin();
        };
        match PatternLibrary::load(path) {
            Ok(library) => {
                info!(path = %path.display(), count = library.len(), "using pattern file");
                library
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "falling back to built-in patterns");
                PatternLibrary::builtin()
            }
        }
    }
}
