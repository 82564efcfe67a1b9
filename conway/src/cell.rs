// cell.rs - Smallest unit of board state: alive/dead flag plus age

use std::fmt;

use crate::error::BoardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    pub fn as_u8(self) -> u8 {
        match self {
            CellState::Dead => 0,
            CellState::Alive => 1,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            CellState::Dead => CellState::Alive,
            CellState::Alive => CellState::Dead,
        }
    }
}

impl TryFrom<u8> for CellState {
    type Error = BoardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CellState::Dead),
            1 => Ok(CellState::Alive),
            other => Err(BoardError::InvalidState(other)),
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive { CellState::Alive } else { CellState::Dead }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellState::Dead => f.write_str("Dead"),
            CellState::Alive => f.write_str("Alive"),
        }
    }
}

/// One grid slot. Position is implied by where the board stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    state: CellState,
    age: u32,
}

impl Cell {
    pub fn new(state: CellState, age: u32) -> Self {
        Self { state, age }
    }

    pub fn dead() -> Self {
        Self::new(CellState::Dead, 0)
    }

    pub fn alive() -> Self {
        Self::new(CellState::Alive, 0)
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    /// Sets the state from an untyped 0/1 value.
    pub fn set_raw_state(&mut self, raw: u8) -> Result<(), BoardError> {
        self.state = CellState::try_from(raw)?;
        Ok(())
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn set_age(&mut self, age: u32) {
        self.age = age;
    }

    pub fn is_alive(&self) -> bool {
        self.state == CellState::Alive
    }

    /// Flips dead <-> alive. Age is left for the caller to adjust.
    pub fn toggle(&mut self) {
        self.state = self.state.toggled();
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - Age: {}", self.state, self.age)
    }
}
