//! Auto-playing Tetris (workspace facade crate).
//!
//! This package keeps the `auto_tetris::{agent,core,types}` public API
//! in one place while the implementation lives in dedicated crates
//! under `crates/`.

pub use auto_tetris_agent as agent;
pub use auto_tetris_core as core;
pub use auto_tetris_types as types;
