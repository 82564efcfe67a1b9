// controller.rs - Paused/running gating, generation counter and log around the board
//
// The window talks to this type only; it never mutates the board directly.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use conway::{Board, BoardError, Grid, PatternLibrary};
use tokio::runtime::Runtime;
use tracing::{info, warn};

const HISTORY_LEN: usize = 10;

pub struct Controller {
    board: Board,
    library: PatternLibrary,
    paused: bool,
    generation: u64,
    frame_rate: u32,
    alive_cells: Rc<Cell<usize>>, // kept current by a board listener
    log: Vec<String>,
    grid_history: [u64; HISTORY_LEN],
    history_count: usize,
    runtime: Option<Runtime>,
}

impl Controller {
    pub fn new(mut board: Board, library: PatternLibrary, frame_rate: u32) -> Self {
        let alive_cells = Rc::new(Cell::new(board.alive_count()));
        let sink = Rc::clone(&alive_cells);
        board.register(move |grid: &Grid| sink.set(grid.alive_count()));

        Self {
            board,
            library,
            paused: true,
            generation: 0,
            frame_rate: frame_rate.clamp(1, 60),
            alive_cells,
            log: Vec::new(),
            grid_history: [0; HISTORY_LEN],
            history_count: 0,
            runtime: None,
        }
    }

    /// Advance generations through per-row tokio tasks on `runtime`.
    pub fn with_runtime(mut self, runtime: Runtime) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn alive_cells(&self) -> usize {
        self.alive_cells.get()
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    pub fn set_frame_rate(&mut self, frame_rate: u32) {
        self.frame_rate = frame_rate.clamp(1, 60);
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.frame_rate))
    }

    pub fn start_pause(&mut self) {
        self.paused = !self.paused;
        info!(paused = self.paused, generation = self.generation, "simulation toggled");
    }

    /// Timer callback; only advances while running.
    pub fn tick(&mut self) {
        if !self.paused {
            self.advance();
        }
    }

    /// Manual single step; only while paused.
    pub fn next_generation(&mut self) {
        if self.paused {
            self.advance();
        }
    }

    pub fn toggle(&mut self, x: usize, y: usize) -> Result<(), BoardError> {
        if self.paused {
            self.board.toggle_cell(x, y)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        if self.paused {
            self.log.clear();
            self.board.clear();
            self.reset_counters();
        }
    }

    /// Square blank board of side `size`.
    pub fn resize(&mut self, size: usize) -> Result<(), BoardError> {
        if self.paused {
            self.board.resize(size, size)?;
            self.reset_counters();
        }
        Ok(())
    }

    pub fn randomize(&mut self, seed: u64) -> Result<(), BoardError> {
        if self.paused {
            let grid = Grid::random(self.board.width(), self.board.height(), seed)?;
            self.board.set_board(grid);
            self.reset_counters();
        }
        Ok(())
    }

    /// Places the named pattern on a blank board with its origin at column
    /// `origin_x`, row `origin_y`. Unknown names are reported in the log.
    pub fn load_pattern(&mut self, name: &str, origin_x: usize, origin_y: usize) {
        if !self.paused {
            return;
        }
        match self.library.get(name) {
            Ok(pattern) => {
                self.board.load_pattern(pattern, origin_x, origin_y);
                self.reset_counters();
            }
            Err(err) => {
                warn!(error = %err, "pattern load failed");
                self.log.push(format!("Invalid Pattern: {err}"));
            }
        }
    }

    fn advance(&mut self) {
        match &self.runtime {
            Some(runtime) => {
                if let Err(err) = self.board.update_on(runtime) {
                    warn!(error = %err, "row task failed, pausing");
                    self.log.push(format!("Generation failed: {err}"));
                    self.paused = true;
                    return;
                }
            }
            None => self.board.update(),
        }
        self.generation += 1;
        let alive = self.alive_cells();
        self.log
            .push(format!("Generation {} - Alive Cells: {}\n", self.generation, alive));

        if self.check_for_cycle() {
            info!(generation = self.generation, "cycle detected");
            self.log
                .push(format!("Cycle detected at generation {}, pausing", self.generation));
            self.paused = true;
        }
    }

    /// True when the current layout matches one of the last few generations.
    fn check_for_cycle(&mut self) -> bool {
        let current_hash = self.board.grid().state_hash();
        let seen = self.grid_history.len().min(self.history_count);
        if self.grid_history[..seen].contains(&current_hash) {
            return true;
        }
        self.grid_history[self.history_count % HISTORY_LEN] = current_hash;
        self.history_count += 1;
        false
    }

    fn reset_counters(&mut self) {
        self.generation = 0;
        self.grid_history = [0; HISTORY_LEN];
        self.history_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conway::CellState;

    fn controller(size: usize) -> Controller {
        let board = Board::new(Grid::new(size, size).unwrap());
        Controller::new(board, PatternLibrary::builtin(), 5)
    }

    #[test]
    fn starts_paused_at_generation_zero() {
        let controller = controller(10);
        assert!(controller.is_paused());
        assert_eq!(controller.generation(), 0);
        assert_eq!(controller.tick_interval(), Duration::from_millis(200));
    }

    #[test]
    fn tick_only_advances_while_running() {
        let mut controller = controller(10);
        controller.load_pattern("Glider", 1, 1);
        controller.tick();
        assert_eq!(controller.generation(), 0);

        controller.start_pause();
        controller.tick();
        assert_eq!(controller.generation(), 1);
        assert_eq!(controller.log().last().unwrap(), "Generation 1 - Alive Cells: 5\n");
    }

    #[test]
    fn edits_are_ignored_while_running() {
        let mut controller = controller(8);
        controller.start_pause();

        controller.toggle(1, 1).unwrap();
        controller.next_generation();
        controller.load_pattern("Blinker", 0, 0);
        controller.resize(20).unwrap();

        assert_eq!(controller.board().alive_count(), 0);
        assert_eq!(controller.board().width(), 8);
        assert_eq!(controller.generation(), 0);
    }

    #[test]
    fn alive_count_follows_board_notifications() {
        let mut controller = controller(6);
        controller.toggle(2, 2).unwrap();
        controller.toggle(3, 2).unwrap();
        assert_eq!(controller.alive_cells(), 2);
        controller.next_generation();
        assert_eq!(controller.alive_cells(), 0);
    }

    #[test]
    fn clear_resets_generation_and_log() {
        let mut controller = controller(6);
        controller.load_pattern("Blinker", 1, 1);
        controller.next_generation();
        controller.next_generation();
        assert_eq!(controller.log().len(), 2);

        controller.clear();

        assert_eq!(controller.generation(), 0);
        assert!(controller.log().is_empty());
        assert_eq!(controller.board().alive_count(), 0);
    }

    #[test]
    fn oscillator_triggers_cycle_pause() {
        let mut controller = controller(8);
        controller.load_pattern("Blinker", 2, 3);
        controller.start_pause();

        controller.tick();
        controller.tick();
        assert!(!controller.is_paused());
        controller.tick();

        assert!(controller.is_paused());
        assert!(controller.log().last().unwrap().starts_with("Cycle detected"));
    }

    #[test]
    fn unknown_pattern_is_logged() {
        let mut controller = controller(8);
        controller.load_pattern("Nope", 0, 0);
        assert_eq!(controller.log(), ["Invalid Pattern: pattern not found: Nope"]);
    }

    #[test]
    fn resize_makes_square_blank_board() {
        let mut controller = controller(8);
        controller.toggle(0, 0).unwrap();
        controller.resize(12).unwrap();
        assert_eq!((controller.board().width(), controller.board().height()), (12, 12));
        assert_eq!(controller.board().get_cell(0, 0).unwrap().state(), CellState::Dead);
        assert!(controller.resize(0).is_err());
    }

    #[test]
    fn row_tasks_drive_the_same_generations() {
        let runtime = Runtime::new().unwrap();
        let mut sequential = controller(12);
        let mut by_row = controller(12).with_runtime(runtime);
        for controller in [&mut sequential, &mut by_row] {
            controller.load_pattern("R-pentomino", 4, 4);
            for _ in 0..6 {
                controller.next_generation();
            }
        }
        assert_eq!(sequential.board().grid(), by_row.board().grid());
        assert_eq!(by_row.generation(), 6);
    }
}
