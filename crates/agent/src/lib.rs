//! Heuristic auto-player. For every falling piece it enumerates rotate
//! and shift sequences ending in a drop, scores each resulting
//! playfield on rolled-back engine state, and commits the best one.

pub mod search;
pub mod stats;

pub use search::{
    candidate_sequences, ActionSequence, Agent, Placement, PlaySummary, MAX_SEQUENCE_ACTIONS,
};
pub use stats::{column_stats, measure, PlayfieldStats, Weights};
