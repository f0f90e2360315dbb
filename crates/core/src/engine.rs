//! Game engine - rules, locking, lifecycle, notifications
//!
//! Orchestrates the playfield and the falling piece. The live piece is
//! painted onto the grid; moves erase and repaint it, and legality
//! checks exclude the piece's own painted cells (a naive emptiness
//! test would make every rotation and most moves spuriously illegal).
//!
//! Piece lifecycle: spawn -> falling -> lock -> spawn, or game over
//! when the spawn cells are blocked. After game over every gameplay
//! command is a no-op until `new_game`. The engine owns no timers; a
//! host driver calls `move_down` periodically as the gravity tick.

use auto_tetris_types::Cell;

use crate::config::GameConfig;
use crate::events::{EngineEvents, EventKind, PlayfieldUpdate};
use crate::piece::FallingPiece;
use crate::playfield::Playfield;
use crate::rng::ShapeRng;
use crate::snapshot::EngineSnapshot;

/// Outcome of the most recent lock, queryable by callers that run
/// with notifications disabled (the search agent).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOutcome {
    pub lines_cleared: u32,
    pub topped_out: bool,
}

pub struct Engine {
    config: GameConfig,
    playfield: Playfield,
    piece: FallingPiece,
    rng: ShapeRng,
    events: EngineEvents,
    game_over: bool,
    last_lock: Option<LockOutcome>,
}

impl Engine {
    /// Build an engine with a seeded shape source. The first piece is
    /// drawn here but not painted; call `new_game` to start play.
    pub fn new(config: GameConfig, seed: u32) -> Self {
        let playfield = Playfield::new(&config.playfield);
        let mut rng = ShapeRng::new(seed);
        let piece = FallingPiece::new(rng.next_shape(), &config.spawn);
        Self {
            config,
            playfield,
            piece,
            rng,
            events: EngineEvents::default(),
            game_over: false,
            last_lock: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    /// Direct grid access for scenario setup. Callers must not touch
    /// the cells the falling piece currently occupies.
    pub fn playfield_mut(&mut self) -> &mut Playfield {
        &mut self.playfield
    }

    pub fn falling_piece(&self) -> &FallingPiece {
        &self.piece
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    // ---- notification surface ----

    pub fn bind_playfield_updated(&mut self, handler: impl FnMut(&PlayfieldUpdate) + 'static) {
        self.events.bind_playfield_updated(Box::new(handler));
    }

    pub fn bind_lines_cleared(&mut self, handler: impl FnMut(u32) + 'static) {
        self.events.bind_lines_cleared(Box::new(handler));
    }

    pub fn bind_game_over(&mut self, handler: impl FnMut() + 'static) {
        self.events.bind_game_over(Box::new(handler));
    }

    pub fn set_event_enabled(&mut self, kind: EventKind, enabled: bool) {
        self.events.set_enabled(kind, enabled);
    }

    /// Re-emit the current playfield state, for presentation layers
    /// that need a refresh without a gameplay command.
    pub fn publish_playfield_update(&mut self) {
        self.notify_playfield_updated();
    }

    // ---- commands ----

    /// Clear the grid, repaint the current piece at spawn, and leave
    /// the terminal state. Emits the initial playfield update.
    pub fn new_game(&mut self) {
        self.playfield.clear();
        let kind = self.piece.kind;
        self.piece.respawn(kind, &self.config.spawn);
        self.game_over = false;
        self.last_lock = None;
        self.paint_piece();
        self.notify_playfield_updated();
    }

    pub fn move_left(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let moved = self.try_shift(-1, 0);
        if moved {
            self.notify_playfield_updated();
        }
        moved
    }

    pub fn move_right(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let moved = self.try_shift(1, 0);
        if moved {
            self.notify_playfield_updated();
        }
        moved
    }

    /// Gravity entry point. Returns false when the piece landed and
    /// lock-and-advance ran instead of a move.
    pub fn move_down(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let moved = self.try_shift(0, -1);
        if !moved {
            self.lock_and_advance();
        }
        self.notify_playfield_updated();
        moved
    }

    /// Commit one-row descents until blocked, then lock. Intermediate
    /// rows produce no notifications; one final update is emitted.
    pub fn hard_drop(&mut self) {
        if self.game_over {
            return;
        }
        while self.try_shift(0, -1) {}
        self.lock_and_advance();
        self.notify_playfield_updated();
    }

    pub fn rotate_left(&mut self) -> bool {
        self.rotate(true)
    }

    pub fn rotate_right(&mut self) -> bool {
        self.rotate(false)
    }

    /// Outcome of the most recent lock, consumed on read.
    pub fn take_last_lock(&mut self) -> Option<LockOutcome> {
        self.last_lock.take()
    }

    // ---- simulation support ----

    /// Deep value capture of {grid, piece, game-over flag}.
    pub fn save_state(&self) -> EngineSnapshot {
        EngineSnapshot {
            cells: self.playfield.cells().to_vec(),
            piece: self.piece,
            game_over: self.game_over,
        }
    }

    pub fn restore_state(&mut self, snapshot: &EngineSnapshot) {
        self.playfield.restore_cells(&snapshot.cells);
        self.piece = snapshot.piece;
        self.game_over = snapshot.game_over;
    }

    // ---- queries ----

    /// All four candidate cells at the hypothetical pivot must be in
    /// bounds, and each must be empty or one of the piece's own
    /// currently painted cells.
    pub fn can_move_falling_piece(&self, new_x: i8, new_y: i8) -> bool {
        let candidate = self.piece.absolute_cells(new_x, new_y);
        self.cells_available(&candidate, &self.piece.current_cells())
    }

    /// The absolute cells the piece would occupy if dropped now.
    /// Read-only: neither the piece nor the grid is touched.
    pub fn ghost_cells(&self) -> [(i8, i8); 4] {
        let mut dy = 0;
        while self.can_move_falling_piece(self.piece.x, self.piece.y - dy - 1) {
            dy += 1;
        }
        self.piece.absolute_cells(self.piece.x, self.piece.y - dy)
    }

    // ---- internals ----

    fn cells_available(&self, candidate: &[(i8, i8); 4], own: &[(i8, i8); 4]) -> bool {
        // Bounds first: the emptiness read is only defined in-domain.
        if !candidate
            .iter()
            .all(|&(x, y)| self.playfield.is_block_within_boundaries(x, y))
        {
            return false;
        }
        candidate
            .iter()
            .all(|cell| self.playfield.is_block_empty(cell.0, cell.1) || own.contains(cell))
    }

    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        let (new_x, new_y) = (self.piece.x + dx, self.piece.y + dy);
        if !self.can_move_falling_piece(new_x, new_y) {
            return false;
        }
        self.erase_piece();
        self.piece.x = new_x;
        self.piece.y = new_y;
        self.paint_piece();
        true
    }

    fn rotate(&mut self, left: bool) -> bool {
        if self.game_over {
            return false;
        }
        let old_cells = self.piece.current_cells();
        if left {
            self.piece.rotate_left();
        } else {
            self.piece.rotate_right();
        }
        let new_cells = self.piece.current_cells();
        if self.cells_available(&new_cells, &old_cells) {
            self.set_cells(&old_cells, None);
            self.set_cells(&new_cells, Some(self.piece.kind));
            self.notify_playfield_updated();
            true
        } else {
            // Reject-and-revert: apply the inverse rotation, leaving
            // no partial mutation behind.
            if left {
                self.piece.rotate_right();
            } else {
                self.piece.rotate_left();
            }
            false
        }
    }

    /// Fix the piece into the grid, resolve full lines, and spawn the
    /// next shape - or end the game if the spawn cells are blocked.
    fn lock_and_advance(&mut self) {
        // The piece's cells stay painted; that is the lock.
        let lines_cleared = self.playfield.clear_full_lines();
        if lines_cleared > 0 {
            self.events.emit_lines_cleared(lines_cleared);
        }

        let next = self.rng.next_shape();
        self.piece.respawn(next, &self.config.spawn);

        let spawn_free = self
            .piece
            .current_cells()
            .iter()
            .all(|&(x, y)| self.playfield.is_block_available(x, y));

        self.last_lock = Some(LockOutcome {
            lines_cleared,
            topped_out: !spawn_free,
        });

        if spawn_free {
            self.paint_piece();
        } else {
            self.game_over = true;
            self.events.emit_game_over();
        }
    }

    fn paint_piece(&mut self) {
        let cells = self.piece.current_cells();
        self.set_cells(&cells, Some(self.piece.kind));
    }

    fn erase_piece(&mut self) {
        let cells = self.piece.current_cells();
        self.set_cells(&cells, None);
    }

    fn set_cells(&mut self, cells: &[(i8, i8); 4], value: Cell) {
        for &(x, y) in cells {
            self.playfield.set_block(x, y, value);
        }
    }

    fn notify_playfield_updated(&mut self) {
        if !self.events.wants_playfield_update() {
            return;
        }
        let visible_rows = (1..=self.config.visible_rows())
            .map(|y| self.playfield.row(y).to_vec())
            .collect();
        let update = PlayfieldUpdate {
            visible_rows,
            falling_piece_shape: self.piece.kind,
            falling_piece_cells: self.piece.current_cells(),
            ghost_cells: self.ghost_cells(),
        };
        self.events.emit_playfield_updated(&update);
    }
}
