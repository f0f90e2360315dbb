//! Core game logic: playfield, pieces, rules, and the engine that
//! ties them together. Pure state machine with no I/O and no timers;
//! hosts drive it by calling commands and observing notifications.

pub mod config;
pub mod engine;
pub mod events;
pub mod piece;
pub mod playfield;
pub mod rng;
pub mod snapshot;

pub use config::{GameConfig, PlayfieldConfig, SpawnConfig};
pub use engine::{Engine, LockOutcome};
pub use events::{EventKind, PlayfieldUpdate};
pub use piece::{offsets, BlockOffset, FallingPiece, PieceOffsets};
pub use playfield::Playfield;
pub use rng::ShapeRng;
pub use snapshot::EngineSnapshot;
