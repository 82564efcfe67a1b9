// main.rs - Desktop front end for the conway board
// Window state lives here; drawing and input handling are in ui.rs

use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use conway::{Board, Grid};
use eframe::egui;
use egui::Color32;
use tracing_subscriber::EnvFilter;

mod config; // Command-line options
mod controller; // Paused/running logic around the board
mod ui; // eframe::App impl

use config::Config;
use controller::Controller;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    let app = GameOfLife::new(&config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([900.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|err| anyhow::anyhow!("{err}"))
}

pub struct GameOfLife {
    pub controller: Controller,
    pub last_update: Instant,
    pub cell_size: f32,
    pub dead_color: Color32,
    pub selected_pattern: String,
    pub origin_x: usize,
    pub origin_y: usize,
    pub size_box: usize,
    pub random_seed: u64,
}

impl GameOfLife {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let grid = Grid::new(config.width, config.height).context("invalid board size")?;
        let board = Board::new(grid).with_toggle_age(config.toggle_age());
        let library = config.pattern_library();
        let selected_pattern = library.names().next().unwrap_or_default().to_string();

        let mut controller = Controller::new(board, library, config.frame_rate);
        if config.row_coroutines {
            let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
            controller = controller.with_runtime(runtime);
        }

        tracing::info!(
            width = config.width,
            height = config.height,
            row_coroutines = config.row_coroutines,
            "starting"
        );

        Ok(Self {
            controller,
            last_update: Instant::now(),
            cell_size: config.cell_size,
            dead_color: Color32::WHITE,
            selected_pattern,
            origin_x: 0,
            origin_y: 0,
            size_box: config.width.max(config.height),
            random_seed: 0,
        })
    }

    /// Runs a tick if the frame interval has elapsed. Returns the time left
    /// until the next one.
    pub fn poll_timer(&mut self) -> Duration {
        let interval = self.controller.tick_interval();
        if self.controller.is_paused() {
            return interval;
        }
        if self.last_update.elapsed() >= interval {
            self.controller.tick();
            self.last_update = Instant::now();
        }
        interval.saturating_sub(self.last_update.elapsed())
    }
}
