//! Shared types - piece kinds, rotation angles, and game actions
//!
//! Pure data structures with no external dependencies, usable from the
//! engine, the search agent, and any host driver.
//!
//! # Coordinate system
//!
//! The playfield uses a 1-based, bottom-left-origin coordinate system:
//! `(1, 1)` is the lowest, leftmost cell and `y` increases upward. All
//! piece offsets in the orientation tables follow the same convention.

/// One of the seven tetromino kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All seven kinds, in the order used by the uniform shape draw.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    pub fn as_char(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'I' => Some(PieceKind::I),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'T' => Some(PieceKind::T),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Display color (hex RGB) for presentation layers.
    pub fn color(&self) -> &'static str {
        match self {
            PieceKind::I => "#188BC2",
            PieceKind::J => "#325BBA",
            PieceKind::L => "#F28500",
            PieceKind::O => "#DEB887",
            PieceKind::S => "#289D8C",
            PieceKind::T => "#915C83",
            PieceKind::Z => "#CC0002",
        }
    }
}

/// Display color of an empty cell.
pub const EMPTY_COLOR: &str = "#F4F0EC";

/// A playfield cell: either empty or holding a locked/painted piece kind.
pub type Cell = Option<PieceKind>;

/// Rotation angle of a falling piece, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Angle {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Angle {
    pub const ALL: [Angle; 4] = [Angle::Deg0, Angle::Deg90, Angle::Deg180, Angle::Deg270];

    /// Step the angle by -90 degrees, wrapping 0 -> 270.
    pub fn rotated_left(&self) -> Self {
        match self {
            Angle::Deg0 => Angle::Deg270,
            Angle::Deg90 => Angle::Deg0,
            Angle::Deg180 => Angle::Deg90,
            Angle::Deg270 => Angle::Deg180,
        }
    }

    /// Step the angle by +90 degrees, wrapping 270 -> 0.
    pub fn rotated_right(&self) -> Self {
        match self {
            Angle::Deg0 => Angle::Deg90,
            Angle::Deg90 => Angle::Deg180,
            Angle::Deg180 => Angle::Deg270,
            Angle::Deg270 => Angle::Deg0,
        }
    }

    pub fn as_degrees(&self) -> u16 {
        match self {
            Angle::Deg0 => 0,
            Angle::Deg90 => 90,
            Angle::Deg180 => 180,
            Angle::Deg270 => 270,
        }
    }
}

/// Commands a host driver (or the search agent) can send to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    MoveDown,
    RotateLeft,
    RotateRight,
    Drop,
}

impl GameAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "move_left",
            GameAction::MoveRight => "move_right",
            GameAction::MoveDown => "move_down",
            GameAction::RotateLeft => "rotate_left",
            GameAction::RotateRight => "rotate_right",
            GameAction::Drop => "drop",
        }
    }
}
