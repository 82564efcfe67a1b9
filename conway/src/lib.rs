//! Conway's Game of Life (B3/S23) on a bounded grid, with per-cell ages.
//!
//! A [`Board`] owns the grid, advances it one generation at a time and hands
//! the finished grid to every registered listener after each change.

pub mod board;
pub mod cell;
#[cfg(feature = "coro")]
pub mod coro;
pub mod error;
pub mod grid;
pub mod observable;
pub mod patterns;

pub use board::{Board, ToggleAge};
pub use cell::{Cell, CellState};
pub use error::{BoardError, PatternError};
pub use grid::Grid;
pub use observable::{ListenerId, Observable};
pub use patterns::{Pattern, PatternLibrary};
