//! Engine state snapshot for speculative simulation
//!
//! A value-type capture of the grid, the falling piece's scalar
//! fields, and the game-over flag. No aliasing with the live engine:
//! restoring writes the captured cells back into the live grid. The
//! game-over flag must round-trip so a trial placement that tops out
//! can be rolled back cleanly.

use auto_tetris_types::Cell;

use crate::piece::FallingPiece;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub(crate) cells: Vec<Cell>,
    pub(crate) piece: FallingPiece,
    pub(crate) game_over: bool,
}
