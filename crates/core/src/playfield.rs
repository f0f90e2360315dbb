//! Playfield - the game grid
//!
//! A `columns x rows` grid of cells stored as a flat array for cache
//! locality, indexed by the 1-based bottom-left-origin coordinate
//! system: `(1, 1)` is the lowest, leftmost cell and `y` grows upward.
//!
//! Out-of-domain reads and writes are programming errors: the engine
//! pre-checks bounds via `is_block_within_boundaries`, so `get_block`
//! and `set_block` assert instead of tolerating bad coordinates.

use auto_tetris_types::Cell;

use crate::config::PlayfieldConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playfield {
    columns: i8,
    rows: i8,
    /// Row-major from the bottom: cell (x, y) lives at
    /// `(y - 1) * columns + (x - 1)`.
    cells: Vec<Cell>,
}

impl Playfield {
    pub fn new(config: &PlayfieldConfig) -> Self {
        assert!(config.columns > 0 && config.rows > 0, "degenerate playfield");
        assert!(
            (0..config.rows).contains(&config.hidden_rows),
            "hidden rows must leave a visible play area"
        );
        Self {
            columns: config.columns,
            rows: config.rows,
            cells: vec![None; config.columns as usize * config.rows as usize],
        }
    }

    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> usize {
        assert!(
            self.is_block_within_boundaries(x, y),
            "block ({}, {}) outside the {}x{} playfield",
            x,
            y,
            self.columns,
            self.rows
        );
        (y as usize - 1) * self.columns as usize + (x as usize - 1)
    }

    pub fn columns(&self) -> i8 {
        self.columns
    }

    pub fn rows(&self) -> i8 {
        self.rows
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Read a cell. Panics on out-of-domain coordinates.
    pub fn get_block(&self, x: i8, y: i8) -> Cell {
        self.cells[self.index(x, y)]
    }

    /// Write a cell unconditionally. Panics on out-of-domain
    /// coordinates; all writes are engine-mediated and pre-validated.
    pub fn set_block(&mut self, x: i8, y: i8, cell: Cell) {
        let idx = self.index(x, y);
        self.cells[idx] = cell;
    }

    /// Pure boundary test, safe for any integers.
    pub fn is_block_within_boundaries(&self, x: i8, y: i8) -> bool {
        (1..=self.columns).contains(&x) && (1..=self.rows).contains(&y)
    }

    /// Requires in-bounds input (caller's responsibility).
    pub fn is_block_empty(&self, x: i8, y: i8) -> bool {
        self.get_block(x, y).is_none()
    }

    /// Boundary check first, emptiness second. The order matters:
    /// testing emptiness on an out-of-range coordinate would trip the
    /// `get_block` contract.
    pub fn is_block_available(&self, x: i8, y: i8) -> bool {
        self.is_block_within_boundaries(x, y) && self.is_block_empty(x, y)
    }

    /// One row of cells, bottom-origin.
    pub fn row(&self, y: i8) -> &[Cell] {
        let start = self.index(1, y);
        &self.cells[start..start + self.columns as usize]
    }

    /// Remove every full row, shift the rows above down, and refill
    /// the top with empty rows so the grid keeps exactly `rows` rows.
    /// Runs as a single compaction pass; returns the number of rows
    /// removed.
    pub fn clear_full_lines(&mut self) -> u32 {
        let width = self.columns as usize;
        let mut write = 0usize;
        let mut cleared = 0u32;

        for read in 0..self.rows as usize {
            let start = read * width;
            let full = self.cells[start..start + width].iter().all(|c| c.is_some());
            if full {
                cleared += 1;
                continue;
            }
            if write != read {
                self.cells.copy_within(start..start + width, write * width);
            }
            write += 1;
        }

        for cell in &mut self.cells[write * width..] {
            *cell = None;
        }

        cleared
    }

    /// Flat view of the grid, for snapshotting.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn restore_cells(&mut self, cells: &[Cell]) {
        assert_eq!(cells.len(), self.cells.len(), "snapshot grid size mismatch");
        self.cells.copy_from_slice(cells);
    }
}
