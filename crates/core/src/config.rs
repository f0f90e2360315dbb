//! Engine configuration - one immutable value built at startup
//!
//! The engine, the playfield, and the search agent all read from a
//! single `GameConfig` constructed once by the host driver. Defaults
//! match the classic 10-column well with a 2-row hidden spawn buffer.

use serde::{Deserialize, Serialize};

/// Playfield dimensions. `rows` is the total height including the
/// hidden buffer rows above the visible play area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    pub columns: i8,
    pub rows: i8,
    pub hidden_rows: i8,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self {
            columns: 10,
            rows: 22,
            hidden_rows: 2,
        }
    }
}

/// Pivot cell where every new piece appears: board center, top of the
/// hidden buffer. At angle 0 no orientation table reaches below the
/// pivot, so a fresh spawn never pokes into the visible rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub x: i8,
    pub y: i8,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self { x: 5, y: 21 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield: PlayfieldConfig,
    pub spawn: SpawnConfig,
    /// Interval between gravity ticks, for host drivers that run a
    /// timer. The engine itself has no timers.
    pub gravity_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield: PlayfieldConfig::default(),
            spawn: SpawnConfig::default(),
            gravity_ms: 2000,
        }
    }
}

impl GameConfig {
    /// Number of rows presented to observers (total minus hidden).
    pub fn visible_rows(&self) -> i8 {
        self.playfield.rows - self.playfield.hidden_rows
    }
}
