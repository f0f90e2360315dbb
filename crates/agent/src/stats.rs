//! Playfield evaluation: per-column height and hole counts, surface
//! bumpiness, and the weighted score used to rank candidate placements.
//!
//! All measurements run over the visible region only. The freshly
//! spawned piece sits painted in the hidden buffer rows, and since its
//! shape is random it must not leak into placement comparisons.

use auto_tetris_core::Playfield;
use serde::{Deserialize, Serialize};

/// Linear weights applied to the post-lock playfield. Lower scores are
/// better; `lines_cleared` carries a negative weight so clears pull
/// the score down. Defaults come from a genetic-algorithm tuning run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub aggregated_height: f64,
    pub total_holes: f64,
    pub bumpiness: f64,
    pub lines_cleared: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            aggregated_height: 5.0,
            total_holes: 1.1,
            bumpiness: 0.8,
            lines_cleared: -10.0,
        }
    }
}

impl Weights {
    pub fn score(&self, stats: &PlayfieldStats, lines_cleared: u32) -> f64 {
        self.aggregated_height * f64::from(stats.aggregated_height)
            + self.total_holes * f64::from(stats.total_holes)
            + self.bumpiness * f64::from(stats.bumpiness)
            + self.lines_cleared * f64::from(lines_cleared)
    }
}

/// Aggregate measurements of a settled playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayfieldStats {
    /// Sum of per-column heights.
    pub aggregated_height: u32,
    /// Empty cells strictly below their column's topmost occupied cell.
    pub total_holes: u32,
    /// Sum of absolute height differences between adjacent columns.
    pub bumpiness: u32,
}

/// Height (1-based row of the topmost occupied cell, 0 when empty) and
/// hole count of one column, scanned up to and including `top_y`.
pub fn column_stats(playfield: &Playfield, x: i8, top_y: i8) -> (u32, u32) {
    let mut height: i8 = 0;
    for y in (1..=top_y).rev() {
        if !playfield.is_block_empty(x, y) {
            height = y;
            break;
        }
    }
    let mut holes = 0u32;
    for y in 1..height {
        if playfield.is_block_empty(x, y) {
            holes += 1;
        }
    }
    (height as u32, holes)
}

/// Measure all columns of the region below `top_y` inclusive.
pub fn measure(playfield: &Playfield, top_y: i8) -> PlayfieldStats {
    let mut stats = PlayfieldStats::default();
    let mut previous_height: Option<u32> = None;
    for x in 1..=playfield.columns() {
        let (height, holes) = column_stats(playfield, x, top_y);
        stats.aggregated_height += height;
        stats.total_holes += holes;
        if let Some(previous) = previous_height {
            stats.bumpiness += previous.abs_diff(height);
        }
        previous_height = Some(height);
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use auto_tetris_core::PlayfieldConfig;
    use auto_tetris_types::PieceKind;

    fn playfield_from_rows(rows: &[&str]) -> Playfield {
        let mut playfield = Playfield::new(&PlayfieldConfig::default());
        for (i, row) in rows.iter().enumerate() {
            let y = i as i8 + 1;
            for (j, ch) in row.chars().enumerate() {
                if ch != ' ' {
                    let x = j as i8 + 1;
                    playfield.set_block(x, y, PieceKind::from_char(ch));
                }
            }
        }
        playfield
    }

    // Hand-checked reference position. Column heights are
    // 4 4 5 5 4 4 7 6 4 3, with holes at (1,2), (3,1), (6,2),
    // (7,3), (7,5), (8,3).
    fn reference_playfield() -> Playfield {
        playfield_from_rows(&[
            "SS OOSSTTT",
            " SSOO SSTS",
            "OOIIII  SS",
            "OOOOIIIIS ",
            "  OO   S  ",
            "      SS  ",
            "      S   ",
        ])
    }

    #[test]
    fn test_column_stats_empty_column() {
        let playfield = Playfield::new(&PlayfieldConfig::default());
        assert_eq!(column_stats(&playfield, 1, 20), (0, 0));
    }

    #[test]
    fn test_column_stats_heights_and_holes() {
        let playfield = reference_playfield();
        assert_eq!(column_stats(&playfield, 1, 20), (4, 1));
        assert_eq!(column_stats(&playfield, 2, 20), (4, 0));
        assert_eq!(column_stats(&playfield, 7, 20), (7, 2));
        assert_eq!(column_stats(&playfield, 8, 20), (6, 1));
        assert_eq!(column_stats(&playfield, 10, 20), (3, 0));
    }

    #[test]
    fn test_column_stats_counts_stacked_holes() {
        let mut playfield = Playfield::new(&PlayfieldConfig::default());
        for y in [1, 2, 5, 6, 7] {
            playfield.set_block(3, y, Some(PieceKind::S));
        }
        // Two adjacent empty cells under the top are two holes.
        assert_eq!(column_stats(&playfield, 3, 20), (7, 2));
    }

    #[test]
    fn test_column_stats_ignores_cells_above_top() {
        let mut playfield = Playfield::new(&PlayfieldConfig::default());
        playfield.set_block(5, 21, Some(PieceKind::T));
        playfield.set_block(5, 22, Some(PieceKind::T));
        assert_eq!(column_stats(&playfield, 5, 20), (0, 0));
    }

    #[test]
    fn test_measure_reference_playfield() {
        let stats = measure(&reference_playfield(), 20);
        assert_eq!(stats.aggregated_height, 46);
        assert_eq!(stats.total_holes, 6);
        assert_eq!(stats.bumpiness, 9);
    }

    #[test]
    fn test_measure_lone_column() {
        let mut playfield = Playfield::new(&PlayfieldConfig::default());
        for y in 1..=4 {
            playfield.set_block(1, y, Some(PieceKind::I));
        }
        let stats = measure(&playfield, 20);
        assert_eq!(stats.aggregated_height, 4);
        assert_eq!(stats.total_holes, 0);
        assert_eq!(stats.bumpiness, 4);
    }

    #[test]
    fn test_measure_empty_playfield() {
        let playfield = Playfield::new(&PlayfieldConfig::default());
        assert_eq!(measure(&playfield, 20), PlayfieldStats::default());
    }

    #[test]
    fn test_score_prefers_cleared_lines() {
        let weights = Weights::default();
        let stats = PlayfieldStats {
            aggregated_height: 10,
            total_holes: 2,
            bumpiness: 4,
        };
        let without = weights.score(&stats, 0);
        let with = weights.score(&stats, 2);
        assert!(with < without);
        assert!((without - (50.0 + 2.2 + 3.2)).abs() < 1e-9);
    }
}
