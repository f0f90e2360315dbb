//! Engine notification surface
//!
//! Typed observer callbacks with at-most-one handler per event
//! (rebinding replaces the previous handler). Every event can be
//! enabled or disabled independently, which lets the search agent run
//! thousands of trial moves without paying for payload construction
//! or presentation side effects.

use auto_tetris_types::{Cell, PieceKind};

/// Payload of the playfield-updated notification. `visible_rows` is
/// ordered bottom-up and excludes the hidden buffer rows; the falling
/// piece is painted into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayfieldUpdate {
    pub visible_rows: Vec<Vec<Cell>>,
    pub falling_piece_shape: PieceKind,
    pub falling_piece_cells: [(i8, i8); 4],
    pub ghost_cells: [(i8, i8); 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PlayfieldUpdated,
    LinesCleared,
    GameOver,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [
        EventKind::PlayfieldUpdated,
        EventKind::LinesCleared,
        EventKind::GameOver,
    ];
}

type PlayfieldUpdatedHandler = Box<dyn FnMut(&PlayfieldUpdate)>;
type LinesClearedHandler = Box<dyn FnMut(u32)>;
type GameOverHandler = Box<dyn FnMut()>;

pub(crate) struct EngineEvents {
    on_playfield_updated: Option<PlayfieldUpdatedHandler>,
    on_lines_cleared: Option<LinesClearedHandler>,
    on_game_over: Option<GameOverHandler>,
    playfield_updated_enabled: bool,
    lines_cleared_enabled: bool,
    game_over_enabled: bool,
}

impl Default for EngineEvents {
    fn default() -> Self {
        Self {
            on_playfield_updated: None,
            on_lines_cleared: None,
            on_game_over: None,
            playfield_updated_enabled: true,
            lines_cleared_enabled: true,
            game_over_enabled: true,
        }
    }
}

impl EngineEvents {
    pub(crate) fn bind_playfield_updated(&mut self, handler: PlayfieldUpdatedHandler) {
        self.on_playfield_updated = Some(handler);
    }

    pub(crate) fn bind_lines_cleared(&mut self, handler: LinesClearedHandler) {
        self.on_lines_cleared = Some(handler);
    }

    pub(crate) fn bind_game_over(&mut self, handler: GameOverHandler) {
        self.on_game_over = Some(handler);
    }

    pub(crate) fn set_enabled(&mut self, kind: EventKind, enabled: bool) {
        match kind {
            EventKind::PlayfieldUpdated => self.playfield_updated_enabled = enabled,
            EventKind::LinesCleared => self.lines_cleared_enabled = enabled,
            EventKind::GameOver => self.game_over_enabled = enabled,
        }
    }

    /// True when emitting a playfield update would reach a handler,
    /// so callers can skip building the payload.
    pub(crate) fn wants_playfield_update(&self) -> bool {
        self.playfield_updated_enabled && self.on_playfield_updated.is_some()
    }

    pub(crate) fn emit_playfield_updated(&mut self, update: &PlayfieldUpdate) {
        if self.playfield_updated_enabled {
            if let Some(handler) = self.on_playfield_updated.as_mut() {
                handler(update);
            }
        }
    }

    pub(crate) fn emit_lines_cleared(&mut self, count: u32) {
        if self.lines_cleared_enabled {
            if let Some(handler) = self.on_lines_cleared.as_mut() {
                handler(count);
            }
        }
    }

    pub(crate) fn emit_game_over(&mut self) {
        if self.game_over_enabled {
            if let Some(handler) = self.on_game_over.as_mut() {
                handler();
            }
        }
    }
}
