//! Global and local alignment as policies plugged into the `Engine`.
use gotoh_types::{GapPenalties, Score};

use crate::direction::{Direction, StartPoint, WalkBack};

/// The points where alignment modes differ. The cell recurrence itself is
/// shared by all of them.
pub trait Strategy: std::fmt::Debug {
    const NAME: &'static str;

    /// Direction stored in row 0, except at the origin.
    fn initial_row_direction(&self) -> Direction;

    /// Direction stored in column 0, except at the origin.
    fn initial_col_direction(&self) -> Direction;

    /// Scores of row 0 (or column 0) for a sequence of length `len`.
    /// Returns `len + 1` values.
    fn initial_gap_scores(&self, len: usize, gaps: GapPenalties) -> Vec<Score>;

    /// Resolve the three candidate scores of a cell.
    fn best_walk_back(&self, diagonal: Score, horizontal: Score, vertical: Score) -> WalkBack;

    /// Start point before any inner cell is computed, for an `m x n` alignment
    /// with the given border scores.
    fn initial_start_point(&self, m: usize, n: usize, row0: &[Score], col0: &[Score])
        -> StartPoint;

    /// Called once for every inner cell, in row-major order.
    fn update_start_point(&self, start: &mut StartPoint, row: usize, col: usize, score: Score);
}

/// Strict maximum, ties going to diagonal, then horizontal, then vertical.
#[inline]
fn max_walk_back(diagonal: Score, horizontal: Score, vertical: Score) -> WalkBack {
    let mut best = WalkBack {
        score: diagonal,
        direction: Direction::Diagonal,
    };
    if horizontal > best.score {
        best = WalkBack {
            score: horizontal,
            direction: Direction::Horizontal,
        };
    }
    if vertical > best.score {
        best = WalkBack {
            score: vertical,
            direction: Direction::Vertical,
        };
    }
    best
}

/// Needleman-Wunsch with affine gaps: both sequences are consumed entirely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Global;

impl Strategy for Global {
    const NAME: &'static str = "global";

    fn initial_row_direction(&self) -> Direction {
        Direction::Horizontal
    }

    fn initial_col_direction(&self) -> Direction {
        Direction::Vertical
    }

    fn initial_gap_scores(&self, len: usize, gaps: GapPenalties) -> Vec<Score> {
        (0..=len).map(|k| gaps.gap_cost(k)).collect()
    }

    #[inline]
    fn best_walk_back(&self, diagonal: Score, horizontal: Score, vertical: Score) -> WalkBack {
        max_walk_back(diagonal, horizontal, vertical)
    }

    fn initial_start_point(
        &self,
        m: usize,
        n: usize,
        row0: &[Score],
        col0: &[Score],
    ) -> StartPoint {
        // Without inner cells the corner lies on the border.
        let score = if m == 0 {
            row0[n]
        } else if n == 0 {
            col0[m]
        } else {
            Score::NEG_INFINITY
        };
        StartPoint { row: m, col: n, score }
    }

    #[inline]
    fn update_start_point(&self, start: &mut StartPoint, row: usize, col: usize, score: Score) {
        *start = StartPoint { row, col, score };
    }
}

/// Smith-Waterman with affine gaps: the best scoring pair of substrings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Local;

impl Strategy for Local {
    const NAME: &'static str = "local";

    fn initial_row_direction(&self) -> Direction {
        Direction::Terminal
    }

    fn initial_col_direction(&self) -> Direction {
        Direction::Terminal
    }

    fn initial_gap_scores(&self, len: usize, _gaps: GapPenalties) -> Vec<Score> {
        vec![0.; len + 1]
    }

    #[inline]
    fn best_walk_back(&self, diagonal: Score, horizontal: Score, vertical: Score) -> WalkBack {
        let best = max_walk_back(diagonal, horizontal, vertical);
        if best.score <= 0. {
            WalkBack {
                score: 0.,
                direction: Direction::Terminal,
            }
        } else {
            best
        }
    }

    fn initial_start_point(&self, _m: usize, _n: usize, _: &[Score], _: &[Score]) -> StartPoint {
        StartPoint {
            row: 0,
            col: 0,
            score: 0.,
        }
    }

    #[inline]
    fn update_start_point(&self, start: &mut StartPoint, row: usize, col: usize, score: Score) {
        if score > start.score {
            *start = StartPoint { row, col, score };
        }
    }
}
