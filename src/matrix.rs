//! Score and direction matrices for the Needleman-Wunsch fill.

use log::debug;

use crate::scoring::FixedPointScoring;

/// Dense row-major `(len_a + 1) x (len_b + 1)` grid of optimal prefix scores.
///
/// Cells hold exact fixed-point units; `get` and friends convert to `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    data: Vec<i64>,
    rows: usize,
    cols: usize,
    scale: i64,
}

impl ScoreMatrix {
    /// Zeroed matrix where one score point is `scale` units.
    pub fn new(rows: usize, cols: usize, scale: i64) -> Self {
        Self {
            data: vec![0; rows * cols],
            rows,
            cols,
            scale,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn scale(&self) -> i64 {
        self.scale
    }

    pub fn set(&mut self, row: usize, col: usize, units: i64) {
        self.data[row * self.cols + col] = units;
    }

    /// Exact cell value in fixed-point units.
    pub fn units(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.cols + col]
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.units(row, col) as f64 / self.scale as f64
    }

    pub fn row(&self, row: usize) -> Vec<f64> {
        (0..self.cols).map(|col| self.get(row, col)).collect()
    }

    pub fn column(&self, col: usize) -> Vec<f64> {
        (0..self.rows).map(|row| self.get(row, col)).collect()
    }

    /// Score of the bottom-right cell, i.e. the global optimum.
    pub fn final_score(&self) -> f64 {
        self.get(self.rows - 1, self.cols - 1)
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|row| self.row(row)).collect()
    }
}

/// Set of optimal predecessors of one cell, packed into three bits.
///
/// Several flags may be set at once when predecessors tie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Directions(u8);

impl Directions {
    /// Gap in A; predecessor is `(i, j - 1)`.
    pub const LEFT: Directions = Directions(0b001);
    /// Gap in B; predecessor is `(i - 1, j)`.
    pub const UP: Directions = Directions(0b010);
    /// Symbols aligned; predecessor is `(i - 1, j - 1)`.
    pub const DIAG: Directions = Directions(0b100);

    pub const fn empty() -> Self {
        Directions(0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: Directions) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Directions) {
        self.0 |= other.0;
    }

    pub fn set(&mut self, other: Directions, value: bool) {
        if value {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }

    pub fn from_left(self) -> bool {
        self.contains(Self::LEFT)
    }

    pub fn from_up(self) -> bool {
        self.contains(Self::UP)
    }

    pub fn from_diag(self) -> bool {
        self.contains(Self::DIAG)
    }

    pub fn count(self) -> u32 {
        self.0.count_ones()
    }
}

impl std::ops::BitOr for Directions {
    type Output = Directions;

    fn bitor(self, rhs: Directions) -> Directions {
        Directions(self.0 | rhs.0)
    }
}

/// Per-cell [`Directions`] with the same extent as the score matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionMatrix {
    data: Vec<Directions>,
    rows: usize,
    cols: usize,
}

impl DirectionMatrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![Directions::empty(); rows * cols],
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn set(&mut self, row: usize, col: usize, value: Directions) {
        self.data[row * self.cols + col] = value;
    }

    pub fn get(&self, row: usize, col: usize) -> Directions {
        self.data[row * self.cols + col]
    }

    /// Number of cells where two or more predecessors tie.
    pub fn tie_count(&self) -> usize {
        self.data.iter().filter(|d| d.count() > 1).count()
    }
}

/// Fills both matrices for `seq_a` (rows) against `seq_b` (columns).
///
/// Length limits and overflow bounds are the caller's concern; this
/// allocates unconditionally.
pub fn build_matrices(
    seq_a: &[u8],
    seq_b: &[u8],
    scoring: &FixedPointScoring,
) -> (ScoreMatrix, DirectionMatrix) {
    let rows = seq_a.len() + 1;
    let cols = seq_b.len() + 1;
    debug!("Allocating {}x{} score and direction matrices", rows, cols);

    let mut scores = ScoreMatrix::new(rows, cols, scoring.scale());
    let mut directions = DirectionMatrix::new(rows, cols);

    // Boundary cells are reachable only through gaps.
    for i in 1..rows {
        scores.set(i, 0, i as i64 * scoring.gap_penalty);
        directions.set(i, 0, Directions::UP);
    }
    for j in 1..cols {
        scores.set(0, j, j as i64 * scoring.gap_penalty);
        directions.set(0, j, Directions::LEFT);
    }

    for i in 1..rows {
        for j in 1..cols {
            let left_score = scores.units(i, j - 1) + scoring.gap_penalty;
            let up_score = scores.units(i - 1, j) + scoring.gap_penalty;
            let diag_score =
                scores.units(i - 1, j - 1) + scoring.substitution(seq_a[i - 1], seq_b[j - 1]);

            let best = left_score.max(up_score).max(diag_score);

            let mut cell = Directions::empty();
            cell.set(Directions::LEFT, left_score == best);
            cell.set(Directions::UP, up_score == best);
            cell.set(Directions::DIAG, diag_score == best);

            scores.set(i, j, best);
            directions.set(i, j, cell);
        }
    }

    debug!(
        "Matrix fill complete: final score {}, {} tied cells",
        scores.final_score(),
        directions.tie_count()
    );

    (scores, directions)
}
