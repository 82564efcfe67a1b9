// board.rs - Game of Life board: generation rule, edits and change notification

use tracing::{debug, trace, warn};

use crate::cell::{Cell, CellState};
use crate::error::BoardError;
use crate::grid::Grid;
use crate::observable::{ListenerId, Observable};
use crate::patterns::{self, Pattern};

/// Age given to a cell by [`Board::toggle_cell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleAge {
    /// Age becomes 1 whichever way the cell flipped, so a cell toggled
    /// to dead keeps age 1 until the next generation resets it.
    #[default]
    AlwaysOne,
    /// Age 1 when the cell became alive, 0 when it died.
    FollowState,
}

/// Owns the cell grid and publishes it to listeners after every change.
///
/// Each mutating call notifies exactly once, after the grid is fully updated.
/// A call that fails leaves the grid alone and notifies nobody.
pub struct Board {
    grid: Observable<Grid>,
    toggle_age: ToggleAge,
}

impl Board {
    /// Creating a board does not notify; consumers render the initial
    /// grid themselves via [`Board::grid`].
    pub fn new(grid: Grid) -> Self {
        Self {
            grid: Observable::new(grid),
            toggle_age: ToggleAge::default(),
        }
    }

    pub fn with_toggle_age(mut self, toggle_age: ToggleAge) -> Self {
        self.toggle_age = toggle_age;
        self
    }

    pub fn toggle_age(&self) -> ToggleAge {
        self.toggle_age
    }

    pub fn width(&self) -> usize {
        self.grid().width()
    }

    pub fn height(&self) -> usize {
        self.grid().height()
    }

    pub fn grid(&self) -> &Grid {
        self.grid.value()
    }

    pub fn get_cell(&self, x: usize, y: usize) -> Result<&Cell, BoardError> {
        self.grid().get(x, y)
    }

    pub fn describe_cell(&self, x: usize, y: usize) -> Result<String, BoardError> {
        self.grid().describe(x, y)
    }

    pub fn alive_count(&self) -> usize {
        self.grid().alive_count()
    }

    /// Listeners are called with the full grid after each mutation.
    pub fn register<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&Grid) + 'static,
    {
        self.grid.register(listener)
    }

    pub fn unregister(&mut self, id: ListenerId) -> bool {
        self.grid.unregister(id)
    }

    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Result<(), BoardError> {
        // check before touching the grid so a bad position publishes nothing
        self.grid().get(x, y)?;
        let toggle_age = self.toggle_age;
        self.grid.modify(|grid| {
            if let Ok(cell) = grid.get_mut(x, y) {
                cell.toggle();
                let age = match (toggle_age, cell.state()) {
                    (ToggleAge::AlwaysOne, _) | (ToggleAge::FollowState, CellState::Alive) => 1,
                    (ToggleAge::FollowState, CellState::Dead) => 0,
                };
                cell.set_age(age);
            }
        });
        Ok(())
    }

    /// Replaces the whole grid (clear, resize, pattern load).
    pub fn set_board(&mut self, grid: Grid) {
        debug!(width = grid.width(), height = grid.height(), "board replaced");
        self.grid.set(grid);
    }

    /// Blank grid with the current dimensions.
    pub fn clear(&mut self) {
        let blank = blank_like(self.grid());
        self.set_board(blank);
    }

    /// Blank grid with new dimensions.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), BoardError> {
        let blank = Grid::new(width, height)?;
        self.set_board(blank);
        Ok(())
    }

    /// Blank grid of the current size with `pattern` placed at column
    /// `origin_x`, row `origin_y`. Pattern cells that fall off the board
    /// are dropped.
    pub fn load_pattern(&mut self, pattern: &Pattern, origin_x: usize, origin_y: usize) {
        let mut grid = blank_like(self.grid());
        let dropped = patterns::stamp(&mut grid, pattern, origin_x, origin_y);
        if dropped > 0 {
            warn!(pattern = %pattern.name, dropped, "pattern cells fell outside the board");
        }
        self.set_board(grid);
    }

    /// Advances one generation.
    pub fn update(&mut self) {
        let next = next_states(self.grid());
        self.apply(&next);
    }

    /// Writes a full set of next states into the grid, bumping the age of
    /// every live cell and zeroing every dead one, then notifies.
    pub(crate) fn apply(&mut self, next: &[CellState]) {
        let alive = self.grid.modify(|grid| {
            let mut alive = 0;
            for (cell, &state) in grid.cells_mut().iter_mut().zip(next) {
                cell.set_state(state);
                match state {
                    CellState::Alive => {
                        cell.set_age(cell.age().saturating_add(1));
                        alive += 1;
                    }
                    CellState::Dead => cell.set_age(0),
                }
            }
            alive
        });
        trace!(alive, "generation applied");
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Grid::default())
    }
}

/// Next state of every cell, row-major, computed from `grid` as it is now.
pub(crate) fn next_states(grid: &Grid) -> Vec<CellState> {
    (0..grid.height())
        .flat_map(|y| (0..grid.width()).map(move |x| grid.rule_at(x, y)))
        .collect()
}

fn blank_like(grid: &Grid) -> Grid {
    Grid::new(grid.width(), grid.height()).unwrap_or_default()
}
