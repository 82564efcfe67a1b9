// coro.rs - Generation step with one cooperative tokio task per row
//
// Each row task reads a shared snapshot of the grid and yields between cells.
// Nothing is written to the board until every row has finished, so listeners
// only ever see whole generations.

use std::sync::Arc;

use tokio::runtime::Runtime;
use tokio::task::JoinError;

use crate::board::Board;
use crate::cell::CellState;
use crate::grid::Grid;

/// Next states for one row of the snapshot.
async fn process_row(row_index: usize, snapshot: Arc<Grid>) -> (usize, Vec<CellState>) {
    let mut row_result = Vec::with_capacity(snapshot.width());
    for col in 0..snapshot.width() {
        row_result.push(snapshot.rule_at(col, row_index));
        tokio::task::yield_now().await; // Cooperative yielding
    }
    (row_index, row_result)
}

/// Next state of every cell, row-major, computed by spawning a task per row.
pub async fn next_states_by_row(snapshot: Arc<Grid>) -> Result<Vec<CellState>, JoinError> {
    let handles: Vec<_> = (0..snapshot.height())
        .map(|row| tokio::spawn(process_row(row, Arc::clone(&snapshot))))
        .collect();

    let mut rows = vec![Vec::new(); snapshot.height()];
    for handle in handles {
        let (row_index, completed_row) = handle.await?;
        rows[row_index] = completed_row;
    }
    Ok(rows.concat())
}

impl Board {
    /// Same result as [`Board::update`], with the rows evaluated as tasks on
    /// the current tokio runtime. On a task failure the board is unchanged.
    pub async fn update_async(&mut self) -> Result<(), JoinError> {
        let snapshot = Arc::new(self.grid().clone());
        let next = next_states_by_row(snapshot).await?;
        self.apply(&next);
        Ok(())
    }

    /// Blocking wrapper around [`Board::update_async`] for synchronous callers.
    pub fn update_on(&mut self, runtime: &Runtime) -> Result<(), JoinError> {
        runtime.block_on(self.update_async())
    }
}
