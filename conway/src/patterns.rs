// patterns.rs - Named, relocatable sets of live cells

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cell::CellState;
use crate::error::PatternError;
use crate::grid::Grid;

/// A named list of (row, col) offsets relative to a placement origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub name: String,
    pub cells: Vec<(i64, i64)>,
}

impl Pattern {
    pub fn new(name: impl Into<String>, cells: Vec<(i64, i64)>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Same shape, shifted so the smallest row and column are 0. Fails when
    /// the pattern spans more than `i64::MAX` rows or columns.
    pub fn normalized(&self) -> Result<Self, PatternError> {
        let min_row = self.cells.iter().map(|&(row, _)| row).min().unwrap_or(0);
        let min_col = self.cells.iter().map(|&(_, col)| col).min().unwrap_or(0);
        let cells = self
            .cells
            .iter()
            .map(|&(row, col)| Some((row.checked_sub(min_row)?, col.checked_sub(min_col)?)))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| PatternError::TooWide(self.name.clone()))?;
        Ok(Self {
            name: self.name.clone(),
            cells,
        })
    }

    /// (rows, cols) spanned by the pattern, saturating at `usize::MAX`.
    pub fn bounds(&self) -> (usize, usize) {
        let span = |values: Vec<i64>| match (values.iter().min(), values.iter().max()) {
            (Some(&min), Some(&max)) => usize::try_from(max.abs_diff(min))
                .map_or(usize::MAX, |diff| diff.saturating_add(1)),
            _ => 0,
        };
        (
            span(self.cells.iter().map(|&(row, _)| row).collect()),
            span(self.cells.iter().map(|&(_, col)| col).collect()),
        )
    }
}

/// Marks every pattern cell alive with its origin at column `origin_x`,
/// row `origin_y`. Cells landing outside the grid, including offsets too
/// large to place at all, are skipped; the number skipped is returned.
pub fn stamp(grid: &mut Grid, pattern: &Pattern, origin_x: usize, origin_y: usize) -> usize {
    let mut dropped = 0;
    for &(row, col) in &pattern.cells {
        match (offset(origin_x, col), offset(origin_y, row)) {
            (Some(x), Some(y)) if x < grid.width() && y < grid.height() => {
                if let Ok(cell) = grid.get_mut(x, y) {
                    cell.set_state(CellState::Alive);
                }
            }
            _ => dropped += 1,
        }
    }
    dropped
}

// None when the sum is negative or does not fit
fn offset(origin: usize, delta: i64) -> Option<usize> {
    let sum = i64::try_from(origin).ok()?.checked_add(delta)?;
    usize::try_from(sum).ok()
}

/// Collection of patterns keyed by name.
///
/// The on-disk format is a JSON object mapping each name to an array of
/// `[row, col]` pairs. Names are kept in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternLibrary {
    patterns: BTreeMap<String, Pattern>,
}

impl PatternLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut library = Self::new();
        for (name, cells) in BUILTIN {
            let pattern = Pattern::new(*name, cells.to_vec());
            match pattern.normalized() {
                Ok(normalized) => library.insert(normalized),
                Err(_) => library.insert(pattern),
            }
        }
        library
    }

    pub fn from_json_str(json: &str) -> Result<Self, PatternError> {
        let raw: BTreeMap<String, Vec<(i64, i64)>> = serde_json::from_str(json)?;
        let patterns = raw
            .into_iter()
            .map(|(name, cells)| (name.clone(), Pattern::new(name, cells)))
            .collect();
        Ok(Self { patterns })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PatternError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| PatternError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let library = Self::from_json_str(&json)?;
        debug!(path = %path.display(), count = library.len(), "loaded pattern library");
        Ok(library)
    }

    pub fn to_json_string(&self) -> Result<String, PatternError> {
        let raw: BTreeMap<&str, &[(i64, i64)]> = self
            .patterns
            .iter()
            .map(|(name, pattern)| (name.as_str(), pattern.cells.as_slice()))
            .collect();
        Ok(serde_json::to_string_pretty(&raw)?)
    }

    /// Adds or replaces a pattern by name.
    pub fn insert(&mut self, pattern: Pattern) {
        self.patterns.insert(pattern.name.clone(), pattern);
    }

    pub fn get(&self, name: &str) -> Result<&Pattern, PatternError> {
        self.patterns
            .get(name)
            .ok_or_else(|| PatternError::Unknown(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.patterns.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> + '_ {
        self.patterns.values()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

type RawPattern = (&'static str, &'static [(i64, i64)]);

#[rustfmt::skip]
const BUILTIN: &[RawPattern] = &[
    ("Glider", &[(6, 7), (7, 8), (8, 6), (8, 7), (8, 8)]),
    ("Blinker", &[(25, 24), (25, 25), (25, 26)]),
    ("Toad", &[(24, 25), (24, 26), (24, 27), (25, 24), (25, 25), (25, 26)]),
    (
        "Beacon",
        &[(10, 10), (10, 11), (11, 10), (11, 11), (12, 12), (12, 13), (13, 12), (13, 13)],
    ),
    (
        "Pulsar",
        &[
            // Top section
            (20, 24), (20, 25), (20, 26), (20, 30), (20, 31), (20, 32),
            (22, 22), (22, 27), (22, 29), (22, 34),
            (23, 22), (23, 27), (23, 29), (23, 34),
            (24, 22), (24, 27), (24, 29), (24, 34),
            (25, 24), (25, 25), (25, 26), (25, 30), (25, 31), (25, 32),
            // Bottom section (mirrored)
            (27, 24), (27, 25), (27, 26), (27, 30), (27, 31), (27, 32),
            (28, 22), (28, 27), (28, 29), (28, 34),
            (29, 22), (29, 27), (29, 29), (29, 34),
            (30, 22), (30, 27), (30, 29), (30, 34),
            (32, 24), (32, 25), (32, 26), (32, 30), (32, 31), (32, 32),
        ],
    ),
    ("R-pentomino", &[(25, 25), (25, 26), (24, 26), (26, 25), (26, 24)]),
    (
        "Gosper Glider Gun",
        &[
            (5, 1), (5, 2), (6, 1), (6, 2),
            (5, 11), (6, 11), (7, 11), (4, 12), (8, 12), (3, 13), (9, 13),
            (3, 14), (9, 14), (6, 15), (4, 16), (8, 16), (5, 17), (6, 17),
            (7, 17), (6, 18), (3, 21), (4, 21), (5, 21), (3, 22), (4, 22),
            (5, 22), (2, 23), (6, 23), (1, 25), (2, 25), (6, 25), (7, 25),
            (3, 35), (4, 35), (3, 36), (4, 36),
        ],
    ),
];
