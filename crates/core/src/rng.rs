//! Seeded shape source
//!
//! A small LCG (Numerical Recipes constants) drawing each next shape
//! uniformly from the seven kinds, independent of history - no bag
//! randomizer. Seeding makes agent runs reproducible.

use auto_tetris_types::PieceKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeRng {
    state: u32,
}

impl ShapeRng {
    pub fn new(seed: u32) -> Self {
        // A zero seed would make the first draws degenerate.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform choice among the seven shapes.
    pub fn next_shape(&mut self) -> PieceKind {
        PieceKind::ALL[(self.next_u32() % 7) as usize]
    }

    /// Current internal state, for restarting with the same sequence.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for ShapeRng {
    fn default() -> Self {
        Self::new(1)
    }
}
