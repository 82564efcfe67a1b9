// grid.rs - Flat cell array owned by the board

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::mem;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cell::{Cell, CellState};
use crate::error::BoardError;

/// Side length of the board the front end starts with.
pub const DEFAULT_SIZE: usize = 30;

/// Offsets of the 8 Moore neighbours as (dx, dy).
#[rustfmt::skip]
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// Rectangular grid of cells stored row-major (`row * width + col`).
///
/// Dimensions are fixed for the lifetime of a `Grid`; resizing means building
/// a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Blank (all dead, age 0) grid.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        let len = cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::dead(); len],
        })
    }

    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, BoardError> {
        let expected = cell_count(width, height)?;
        if cells.len() != expected {
            return Err(BoardError::SizeMismatch { expected, found: cells.len() });
        }
        Ok(Self { width, height, cells })
    }

    /// Builds a grid from nested rows, rejecting empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, BoardError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(BoardError::Empty);
        }
        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for (row, cols) in rows.into_iter().enumerate() {
            if cols.len() != width {
                return Err(BoardError::NotRectangular {
                    row,
                    expected: width,
                    found: cols.len(),
                });
            }
            cells.extend(cols);
        }
        Ok(Self { width, height, cells })
    }

    /// Roughly a third of the cells alive, reproducible from `seed`.
    pub fn random(width: usize, height: usize, seed: u64) -> Result<Self, BoardError> {
        let mut grid = Self::new(width, height)?;
        let mut rng = StdRng::seed_from_u64(seed);
        for cell in &mut grid.cells {
            if rng.random_ratio(1, 3) {
                cell.set_state(CellState::Alive);
            }
        }
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, BoardError> {
        if x < self.width && y < self.height {
            Ok(y * self.width + x)
        } else {
            Err(BoardError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Cell at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Result<&Cell, BoardError> {
        let index = self.index(x, y)?;
        Ok(&self.cells[index])
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Result<&mut Cell, BoardError> {
        let index = self.index(x, y)?;
        Ok(&mut self.cells[index])
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Every cell with its (x, y) position.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i % width, i / width, cell))
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn describe(&self, x: usize, y: usize) -> Result<String, BoardError> {
        let cell = self.get(x, y)?;
        Ok(format!("({x}, {y}) - {cell}"))
    }

    /// Live Moore neighbours of (x, y). Positions past the edge are skipped,
    /// there is no wraparound.
    pub fn live_neighbors(&self, x: usize, y: usize) -> Result<usize, BoardError> {
        self.index(x, y)?;
        Ok(self.count_neighbors(x, y))
    }

    /// State of (x, y) in the next generation (B3/S23).
    pub fn next_state(&self, x: usize, y: usize) -> Result<CellState, BoardError> {
        let index = self.index(x, y)?;
        Ok(next_state(self.cells[index].state(), self.count_neighbors(x, y)))
    }

    // callers guarantee (x, y) is in range
    fn count_neighbors(&self, x: usize, y: usize) -> usize {
        NEIGHBORS
            .iter()
            .filter_map(|&(dx, dy)| {
                let nx = x.checked_add_signed(dx)?;
                let ny = y.checked_add_signed(dy)?;
                (nx < self.width && ny < self.height).then(|| &self.cells[ny * self.width + nx])
            })
            .filter(|cell| cell.is_alive())
            .count()
    }

    /// Rule applied at (x, y) without the range check.
    pub(crate) fn rule_at(&self, x: usize, y: usize) -> CellState {
        next_state(self.cells[y * self.width + x].state(), self.count_neighbors(x, y))
    }

    /// Hash of the alive/dead layout. Ages are not included.
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.width.hash(&mut hasher);
        self.height.hash(&mut hasher);
        for cell in &self.cells {
            cell.state().hash(&mut hasher);
        }
        hasher.finish()
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            cells: vec![Cell::dead(); DEFAULT_SIZE * DEFAULT_SIZE],
        }
    }
}

/// Number of cells in a `width` x `height` grid, rejecting empty grids and
/// sizes whose buffer could not be allocated.
fn cell_count(width: usize, height: usize) -> Result<usize, BoardError> {
    if width == 0 || height == 0 {
        return Err(BoardError::Empty);
    }
    width
        .checked_mul(height)
        .filter(|&len| {
            len.checked_mul(mem::size_of::<Cell>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or(BoardError::TooLarge { width, height })
}

pub(crate) fn next_state(current: CellState, live_neighbors: usize) -> CellState {
    match (current, live_neighbors) {
        (CellState::Alive, 2) | (CellState::Alive, 3) => CellState::Alive, // Survival
        (CellState::Dead, 3) => CellState::Alive,                          // Birth
        (CellState::Alive, _) => CellState::Dead,                          // Under/overpopulation
        (CellState::Dead, _) => CellState::Dead,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(width: usize, height: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        for &(x, y) in alive {
            grid.get_mut(x, y).unwrap().set_state(CellState::Alive);
        }
        grid
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(Grid::new(0, 4), Err(BoardError::Empty));
        assert_eq!(Grid::new(4, 0), Err(BoardError::Empty));
        assert_eq!(Grid::from_rows(vec![]), Err(BoardError::Empty));
        assert_eq!(Grid::from_rows(vec![vec![]]), Err(BoardError::Empty));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let rows = vec![vec![Cell::dead(); 3], vec![Cell::dead(); 2]];
        assert_eq!(
            Grid::from_rows(rows),
            Err(BoardError::NotRectangular { row: 1, expected: 3, found: 2 })
        );
    }

    #[test]
    fn from_cells_checks_length() {
        assert_eq!(
            Grid::from_cells(2, 2, vec![Cell::dead(); 3]),
            Err(BoardError::SizeMismatch { expected: 4, found: 3 })
        );
        assert!(Grid::from_cells(2, 2, vec![Cell::dead(); 4]).is_ok());
    }

    #[test]
    fn x_is_column_and_y_is_row() {
        let rows = vec![
            vec![Cell::dead(), Cell::alive(), Cell::dead()],
            vec![Cell::dead(), Cell::dead(), Cell::dead()],
        ];
        let grid = Grid::from_rows(rows).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert!(grid.get(1, 0).unwrap().is_alive());
        assert!(!grid.get(0, 1).unwrap().is_alive());
    }

    #[test]
    fn out_of_range_access_is_an_error() {
        let grid = Grid::new(3, 2).unwrap();
        assert_eq!(
            grid.get(3, 0),
            Err(BoardError::OutOfBounds { x: 3, y: 0, width: 3, height: 2 })
        );
        assert!(grid.get(0, 2).is_err());
    }

    #[test]
    fn corner_and_edge_counts_stay_in_bounds() {
        // fully alive 3x3: corners see 3, edges 5, centre 8
        let all: Vec<(usize, usize)> = (0..3).flat_map(|y| (0..3).map(move |x| (x, y))).collect();
        let grid = grid_with(3, 3, &all);
        for &(x, y) in &[(0, 0), (2, 0), (0, 2), (2, 2)] {
            assert_eq!(grid.live_neighbors(x, y), Ok(3), "corner ({x},{y})");
        }
        for &(x, y) in &[(1, 0), (0, 1), (2, 1), (1, 2)] {
            assert_eq!(grid.live_neighbors(x, y), Ok(5), "edge ({x},{y})");
        }
        assert_eq!(grid.live_neighbors(1, 1), Ok(8));
    }

    #[test]
    fn no_wraparound_across_edges() {
        // live cells on the far edge must not count for the near edge
        let grid = grid_with(5, 5, &[(4, 0), (4, 1), (4, 4), (0, 4)]);
        assert_eq!(grid.live_neighbors(0, 0), Ok(0));
    }

    #[test]
    fn rule_queries_outside_the_grid_are_errors() {
        let grid = grid_with(3, 3, &[(0, 1), (1, 1), (1, 0)]);
        // (3, 0) must not alias (0, 1) in the next row
        assert_eq!(
            grid.next_state(3, 0),
            Err(BoardError::OutOfBounds { x: 3, y: 0, width: 3, height: 3 })
        );
        assert!(grid.next_state(0, 3).is_err());
        assert!(grid.live_neighbors(3, 0).is_err());
        assert!(grid.live_neighbors(1, 7).is_err());
        assert_eq!(grid.next_state(0, 0), Ok(CellState::Alive));
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        assert_eq!(
            Grid::new(usize::MAX, 2),
            Err(BoardError::TooLarge { width: usize::MAX, height: 2 })
        );
        assert!(matches!(
            Grid::new(usize::MAX / 4, 2),
            Err(BoardError::TooLarge { .. })
        ));
        assert!(matches!(
            Grid::from_cells(usize::MAX, 3, Vec::new()),
            Err(BoardError::TooLarge { .. })
        ));
    }

    #[test]
    fn rule_table() {
        assert_eq!(next_state(CellState::Alive, 1), CellState::Dead);
        assert_eq!(next_state(CellState::Alive, 2), CellState::Alive);
        assert_eq!(next_state(CellState::Alive, 3), CellState::Alive);
        assert_eq!(next_state(CellState::Alive, 4), CellState::Dead);
        assert_eq!(next_state(CellState::Dead, 2), CellState::Dead);
        assert_eq!(next_state(CellState::Dead, 3), CellState::Alive);
        assert_eq!(next_state(CellState::Dead, 4), CellState::Dead);
    }

    #[test]
    fn state_hash_ignores_age() {
        let mut a = grid_with(4, 4, &[(1, 1)]);
        let b = a.clone();
        a.get_mut(1, 1).unwrap().set_age(9);
        assert_eq!(a.state_hash(), b.state_hash());
        a.get_mut(2, 2).unwrap().set_state(CellState::Alive);
        assert_ne!(a.state_hash(), b.state_hash());
    }

    #[test]
    fn random_is_seeded() {
        let a = Grid::random(20, 20, 7).unwrap();
        let b = Grid::random(20, 20, 7).unwrap();
        assert_eq!(a, b);
        assert!(a.alive_count() > 0);
        assert!(a.alive_count() < 400);
    }

    #[test]
    fn describe_includes_position() {
        let grid = grid_with(3, 3, &[(2, 1)]);
        assert_eq!(grid.describe(2, 1).unwrap(), "(2, 1) - Alive - Age: 0");
    }

    #[test]
    fn iter_reports_positions_row_major() {
        let grid = Grid::new(2, 2).unwrap();
        let positions: Vec<(usize, usize)> = grid.iter().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(positions, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(grid.rows().count(), 2);
    }
}
