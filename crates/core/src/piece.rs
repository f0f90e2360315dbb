//! Falling piece and orientation tables
//!
//! Angle-indexed static offset tables in the SRS convention: for each
//! kind and angle, four `(dx, dy)` offsets from the pivot cell, with
//! `(0, 0)` always present (the pivot belongs to the piece). I shares
//! geometry between 0/180 and 90/270; O shares one geometry across
//! all four angles. There are no wall kicks: a rotation that collides
//! is rejected by the engine and the angle reverts.

use auto_tetris_types::{Angle, PieceKind};

use crate::config::SpawnConfig;

/// Offset of a single block relative to the piece pivot, y up.
pub type BlockOffset = (i8, i8);

/// The four block offsets of one (kind, angle) orientation.
pub type PieceOffsets = [BlockOffset; 4];

/// Orientation table lookup.
pub fn offsets(kind: PieceKind, angle: Angle) -> PieceOffsets {
    match kind {
        PieceKind::I => i_offsets(angle),
        PieceKind::J => j_offsets(angle),
        PieceKind::L => l_offsets(angle),
        PieceKind::O => o_offsets(angle),
        PieceKind::S => s_offsets(angle),
        PieceKind::T => t_offsets(angle),
        PieceKind::Z => z_offsets(angle),
    }
}

fn i_offsets(angle: Angle) -> PieceOffsets {
    match angle {
        Angle::Deg0 | Angle::Deg180 => [(0, 0), (-1, 0), (-2, 0), (1, 0)],
        Angle::Deg90 | Angle::Deg270 => [(0, 0), (0, 1), (0, 2), (0, -1)],
    }
}

fn j_offsets(angle: Angle) -> PieceOffsets {
    match angle {
        Angle::Deg0 => [(0, 0), (-1, 0), (-1, 1), (1, 0)],
        Angle::Deg90 => [(0, 0), (0, -1), (0, 1), (1, 1)],
        Angle::Deg180 => [(0, 0), (-1, 0), (1, 0), (1, -1)],
        Angle::Deg270 => [(0, 0), (0, 1), (0, -1), (-1, -1)],
    }
}

fn l_offsets(angle: Angle) -> PieceOffsets {
    match angle {
        Angle::Deg0 => [(0, 0), (-1, 0), (1, 0), (1, 1)],
        Angle::Deg90 => [(0, 0), (0, 1), (0, -1), (1, -1)],
        Angle::Deg180 => [(0, 0), (-1, 0), (1, 0), (-1, -1)],
        Angle::Deg270 => [(0, 0), (0, 1), (0, -1), (-1, 1)],
    }
}

fn o_offsets(_angle: Angle) -> PieceOffsets {
    [(0, 0), (0, 1), (1, 0), (1, 1)]
}

fn s_offsets(angle: Angle) -> PieceOffsets {
    match angle {
        Angle::Deg0 => [(0, 0), (-1, 0), (0, 1), (1, 1)],
        Angle::Deg90 => [(0, 0), (0, 1), (1, 0), (1, -1)],
        Angle::Deg180 => [(0, 0), (-1, -1), (0, -1), (1, 0)],
        Angle::Deg270 => [(0, 0), (-1, 0), (-1, 1), (0, -1)],
    }
}

fn t_offsets(angle: Angle) -> PieceOffsets {
    match angle {
        Angle::Deg0 => [(0, 0), (-1, 0), (1, 0), (0, 1)],
        Angle::Deg90 => [(0, 0), (0, 1), (0, -1), (1, 0)],
        Angle::Deg180 => [(0, 0), (-1, 0), (1, 0), (0, -1)],
        Angle::Deg270 => [(0, 0), (-1, 0), (0, 1), (0, -1)],
    }
}

fn z_offsets(angle: Angle) -> PieceOffsets {
    match angle {
        Angle::Deg0 => [(0, 0), (0, 1), (-1, 1), (1, 0)],
        Angle::Deg90 => [(0, 0), (0, -1), (1, 0), (1, 1)],
        Angle::Deg180 => [(0, 0), (-1, 0), (0, -1), (1, -1)],
        Angle::Deg270 => [(0, 0), (-1, 0), (-1, -1), (0, 1)],
    }
}

/// The currently controlled tetromino: kind, rotation angle, and pivot
/// position in playfield coordinates. Legality of moves and rotations
/// is the engine's responsibility; mutations here are unconditional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FallingPiece {
    pub kind: PieceKind,
    pub angle: Angle,
    pub x: i8,
    pub y: i8,
}

impl FallingPiece {
    pub fn new(kind: PieceKind, spawn: &SpawnConfig) -> Self {
        Self {
            kind,
            angle: Angle::Deg0,
            x: spawn.x,
            y: spawn.y,
        }
    }

    /// Replace the piece on lock: new kind, angle 0, spawn pivot.
    pub fn respawn(&mut self, kind: PieceKind, spawn: &SpawnConfig) {
        self.kind = kind;
        self.angle = Angle::Deg0;
        self.x = spawn.x;
        self.y = spawn.y;
    }

    pub fn rotate_left(&mut self) {
        self.angle = self.angle.rotated_left();
    }

    pub fn rotate_right(&mut self) {
        self.angle = self.angle.rotated_right();
    }

    pub fn offsets(&self) -> PieceOffsets {
        offsets(self.kind, self.angle)
    }

    /// The four absolute cells the piece would occupy at the given
    /// pivot. Pure; used for both the live position and hypothetical
    /// pivots during move-validity checks.
    pub fn absolute_cells(&self, pivot_x: i8, pivot_y: i8) -> [(i8, i8); 4] {
        self.offsets()
            .map(|(dx, dy)| (pivot_x + dx, pivot_y + dy))
    }

    pub fn current_cells(&self) -> [(i8, i8); 4] {
        self.absolute_cells(self.x, self.y)
    }
}
