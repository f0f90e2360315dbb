//! Placement search: enumerate candidate action sequences for the
//! falling piece, try each one on a rolled-back engine, and commit the
//! lowest-scoring placement.
//!
//! Trials are transactional. The engine state is captured once per
//! piece, every candidate replays from that capture with notifications
//! silenced, and the capture is restored before the winner is played
//! for real so observers only ever see committed moves.

use arrayvec::ArrayVec;
use auto_tetris_core::{Engine, EventKind};
use auto_tetris_types::GameAction;

use crate::stats::{self, PlayfieldStats, Weights};

/// Upper bound on one candidate's length: 3 rotations, `i8::MAX / 2`
/// lateral steps (column counts are `i8`), and the final drop.
pub const MAX_SEQUENCE_ACTIONS: usize = 3 + (i8::MAX / 2) as usize + 1;

/// One candidate command sequence. Rotations come first, then lateral
/// steps, then the final drop; the longest sequence for a playfield W
/// columns wide is 3 + W/2 + 1 actions, capped by the column type.
pub type ActionSequence = ArrayVec<GameAction, MAX_SEQUENCE_ACTIONS>;

/// All candidate sequences for a playfield `columns` wide, in a fixed
/// order: the spawn column with 0 to 3 rotations, then for each step
/// count out to half the width, leftward then rightward placements,
/// each again with 0 to 3 rotations. Every sequence ends with a drop.
pub fn candidate_sequences(columns: i8) -> Vec<ActionSequence> {
    let half = (columns / 2) as usize;
    let mut sequences = Vec::with_capacity(4 * (2 * half + 1));

    let push_group = |sequences: &mut Vec<ActionSequence>, side: Option<(GameAction, usize)>| {
        for rotations in 0..4 {
            let mut sequence = ActionSequence::new();
            for _ in 0..rotations {
                sequence.push(GameAction::RotateLeft);
            }
            if let Some((step, count)) = side {
                for _ in 0..count {
                    sequence.push(step);
                }
            }
            sequence.push(GameAction::Drop);
            sequences.push(sequence);
        }
    };

    push_group(&mut sequences, None);
    for steps in 1..=half {
        push_group(&mut sequences, Some((GameAction::MoveLeft, steps)));
        push_group(&mut sequences, Some((GameAction::MoveRight, steps)));
    }
    sequences
}

/// A scored candidate. `lines_cleared` and `stats` describe the
/// playfield after the trial lock and line resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub sequence: ActionSequence,
    pub score: f64,
    pub stats: PlayfieldStats,
    pub lines_cleared: u32,
}

/// Totals for one automated game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaySummary {
    pub pieces_placed: u32,
    pub lines_cleared: u32,
    pub topped_out: bool,
}

/// Drives an engine by searching placements for each falling piece.
pub struct Agent {
    engine: Engine,
    weights: Weights,
    candidates: Vec<ActionSequence>,
}

impl Agent {
    pub fn new(engine: Engine, weights: Weights) -> Self {
        let candidates = candidate_sequences(engine.playfield().columns());
        Self {
            engine,
            weights,
            candidates,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Score every feasible candidate from the current state and
    /// return the best one, or None when no candidate can be played.
    /// The engine is left exactly as it was found.
    pub fn best_placement(&mut self) -> Option<Placement> {
        if self.engine.is_game_over() {
            return None;
        }

        let snapshot = self.engine.save_state();
        for kind in EventKind::ALL {
            self.engine.set_event_enabled(kind, false);
        }
        let visible_rows = self.engine.config().visible_rows();

        let mut best: Option<Placement> = None;
        for sequence in &self.candidates {
            self.engine.restore_state(&snapshot);
            let _ = self.engine.take_last_lock();
            if !play_sequence(&mut self.engine, sequence) {
                continue;
            }
            let lines_cleared = self
                .engine
                .take_last_lock()
                .map_or(0, |outcome| outcome.lines_cleared);
            let stats = stats::measure(self.engine.playfield(), visible_rows);
            let score = self.weights.score(&stats, lines_cleared);
            // Strict comparison keeps the earliest candidate on ties.
            if best.as_ref().map_or(true, |b| score < b.score) {
                best = Some(Placement {
                    sequence: sequence.clone(),
                    score,
                    stats,
                    lines_cleared,
                });
            }
        }

        self.engine.restore_state(&snapshot);
        for kind in EventKind::ALL {
            self.engine.set_event_enabled(kind, true);
        }
        best
    }

    /// Search, then play the winning sequence for real with
    /// notifications live. Returns None when nothing is playable.
    pub fn place_current_piece(&mut self) -> Option<Placement> {
        let placement = self.best_placement()?;
        // Replays from the same state the trial started in, so it
        // cannot fail.
        play_sequence(&mut self.engine, &placement.sequence);
        let _ = self.engine.take_last_lock();
        Some(placement)
    }

    /// Run a full game from a fresh playfield, placing at most
    /// `max_pieces` pieces.
    pub fn play(&mut self, max_pieces: u32) -> PlaySummary {
        self.engine.new_game();
        let mut summary = PlaySummary::default();
        while summary.pieces_placed < max_pieces && !self.engine.is_game_over() {
            let Some(placement) = self.place_current_piece() else {
                break;
            };
            summary.pieces_placed += 1;
            summary.lines_cleared += placement.lines_cleared;
        }
        summary.topped_out = self.engine.is_game_over();
        summary
    }
}

/// Apply a sequence action by action. A sequence is feasible only if
/// every move and rotation succeeds; the drop always counts.
fn play_sequence(engine: &mut Engine, sequence: &ActionSequence) -> bool {
    for action in sequence {
        let ok = match action {
            GameAction::MoveLeft => engine.move_left(),
            GameAction::MoveRight => engine.move_right(),
            GameAction::MoveDown => engine.move_down(),
            GameAction::RotateLeft => engine.rotate_left(),
            GameAction::RotateRight => engine.rotate_right(),
            GameAction::Drop => {
                engine.hard_drop();
                true
            }
        };
        if !ok {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use auto_tetris_core::GameConfig;
    use auto_tetris_types::PieceKind;

    fn agent_with_seed(seed: u32) -> Agent {
        Agent::new(Engine::new(GameConfig::default(), seed), Weights::default())
    }

    #[test]
    fn test_candidate_count_for_default_width() {
        assert_eq!(candidate_sequences(10).len(), 44);
    }

    #[test]
    fn test_candidates_fit_for_any_playfield_width() {
        // Wide boards are legal configuration, not a contract
        // violation; generation must not overflow the sequence bound.
        let wide = candidate_sequences(26);
        assert_eq!(wide.len(), 4 * (2 * 13 + 1));

        let widest = candidate_sequences(i8::MAX);
        let longest = widest.iter().map(|s| s.len()).max().unwrap();
        assert_eq!(longest, MAX_SEQUENCE_ACTIONS);
    }

    #[test]
    fn test_candidate_order_is_fixed() {
        let sequences = candidate_sequences(10);
        assert_eq!(sequences[0].as_slice(), [GameAction::Drop]);
        assert_eq!(
            sequences[1].as_slice(),
            [GameAction::RotateLeft, GameAction::Drop]
        );
        assert_eq!(
            sequences[4].as_slice(),
            [GameAction::MoveLeft, GameAction::Drop]
        );
        assert_eq!(
            sequences[8].as_slice(),
            [GameAction::MoveRight, GameAction::Drop]
        );
        assert_eq!(sequences, candidate_sequences(10));
    }

    #[test]
    fn test_every_candidate_ends_with_drop() {
        for sequence in candidate_sequences(10) {
            assert_eq!(sequence.last(), Some(&GameAction::Drop));
            assert_eq!(
                sequence
                    .iter()
                    .filter(|&&a| a == GameAction::Drop)
                    .count(),
                1
            );
        }
    }

    #[test]
    fn test_best_placement_leaves_engine_untouched() {
        let mut agent = agent_with_seed(12345);
        agent.engine_mut().new_game();
        let before = agent.engine().save_state();

        let placement = agent.best_placement();
        assert!(placement.is_some());
        assert_eq!(agent.engine().save_state(), before);
    }

    #[test]
    fn test_zero_weights_pick_first_candidate() {
        let zero = Weights {
            aggregated_height: 0.0,
            total_holes: 0.0,
            bumpiness: 0.0,
            lines_cleared: 0.0,
        };
        let mut agent = Agent::new(Engine::new(GameConfig::default(), 7), zero);
        agent.engine_mut().new_game();

        // Every feasible candidate scores 0.0; ties keep the earliest.
        let placement = agent.best_placement().unwrap();
        assert_eq!(placement.sequence.as_slice(), [GameAction::Drop]);
    }

    #[test]
    fn test_agent_clears_an_obvious_line() {
        // Seed 21 spawns an O; the bottom row is full except the two
        // columns under the spawn, so dropping in place clears it.
        let mut agent = agent_with_seed(21);
        agent.engine_mut().new_game();
        assert_eq!(agent.engine().falling_piece().kind, PieceKind::O);
        for x in 1..=10 {
            if x != 5 && x != 6 {
                agent
                    .engine_mut()
                    .playfield_mut()
                    .set_block(x, 1, Some(PieceKind::I));
            }
        }

        let placement = agent.place_current_piece().unwrap();
        assert_eq!(placement.lines_cleared, 1);
        assert_eq!(placement.sequence.as_slice(), [GameAction::Drop]);
        // Only the O's top half survives the clear.
        assert_eq!(placement.stats.aggregated_height, 2);
    }

    #[test]
    fn test_play_is_deterministic_for_a_seed() {
        let mut first = agent_with_seed(2);
        let mut second = agent_with_seed(2);
        let a = first.play(15);
        let b = second.play(15);
        assert_eq!(a, b);
        assert_eq!(
            first.engine().playfield().cells(),
            second.engine().playfield().cells()
        );
    }

    #[test]
    fn test_play_counts_pieces_and_stops_at_limit() {
        let mut agent = agent_with_seed(1);
        let summary = agent.play(8);
        assert_eq!(summary.pieces_placed, 8);
        assert!(!summary.topped_out);
    }

    #[test]
    fn test_best_placement_none_after_game_over() {
        let mut agent = agent_with_seed(1);
        agent.engine_mut().new_game();
        // Stack the center until the spawn cells are blocked.
        for _ in 0..200 {
            if agent.engine().is_game_over() {
                break;
            }
            agent.engine_mut().hard_drop();
        }
        assert!(agent.engine().is_game_over());
        assert!(agent.best_placement().is_none());
    }
}
