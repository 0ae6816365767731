use std::fmt;

use log::debug;

use crate::matrix::{DirectionMatrix, ScoreMatrix};
use crate::GAP_SYMBOL;

/// One optimal global alignment, both rows of equal length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlignedPair {
    pub aligned_a: Vec<u8>,
    pub aligned_b: Vec<u8>,
}

impl AlignedPair {
    pub fn new(aligned_a: impl Into<Vec<u8>>, aligned_b: impl Into<Vec<u8>>) -> Self {
        Self {
            aligned_a: aligned_a.into(),
            aligned_b: aligned_b.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.aligned_a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned_a.is_empty()
    }

    pub fn a_str(&self) -> String {
        String::from_utf8_lossy(&self.aligned_a).into_owned()
    }

    pub fn b_str(&self) -> String {
        String::from_utf8_lossy(&self.aligned_b).into_owned()
    }

    /// Count of columns holding a gap in either row.
    pub fn gap_count(&self) -> usize {
        self.aligned_a
            .iter()
            .zip(&self.aligned_b)
            .filter(|&(&a, &b)| a == GAP_SYMBOL || b == GAP_SYMBOL)
            .count()
    }
}

impl fmt::Display for AlignedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.a_str())?;
        write!(f, "{}", self.b_str())
    }
}

/// Optimal score plus every alignment that reaches it.
///
/// `alignments` is in stack order and may contain duplicates when distinct
/// paths render identically.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentResult {
    pub score: f64,
    pub alignments: Vec<AlignedPair>,
}

impl AlignmentResult {
    pub fn len(&self) -> usize {
        self.alignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alignments.is_empty()
    }

    /// Alignments in lexicographic order, for order-insensitive comparison.
    pub fn sorted_alignments(&self) -> Vec<AlignedPair> {
        let mut sorted = self.alignments.clone();
        sorted.sort();
        sorted
    }
}

struct PartialAlignment {
    partial_a: Vec<u8>,
    partial_b: Vec<u8>,
    i: usize,
    j: usize,
}

impl PartialAlignment {
    fn step(&self, a: u8, b: u8, i: usize, j: usize) -> Self {
        let mut partial_a = self.partial_a.clone();
        let mut partial_b = self.partial_b.clone();
        partial_a.push(a);
        partial_b.push(b);
        Self {
            partial_a,
            partial_b,
            i,
            j,
        }
    }
}

/// Walks every optimal path from the final cell back to the origin.
///
/// Uses an explicit work stack so traceback depth is independent of the
/// call stack.
pub struct TracebackEnumerator<'a> {
    scores: &'a ScoreMatrix,
    directions: &'a DirectionMatrix,
    seq_a: &'a [u8],
    seq_b: &'a [u8],
}

impl<'a> TracebackEnumerator<'a> {
    pub fn new(
        scores: &'a ScoreMatrix,
        directions: &'a DirectionMatrix,
        seq_a: &'a [u8],
        seq_b: &'a [u8],
    ) -> Self {
        Self {
            scores,
            directions,
            seq_a,
            seq_b,
        }
    }

    pub fn enumerate(&self) -> AlignmentResult {
        let n = self.seq_a.len();
        let m = self.seq_b.len();
        let capacity = n + m;

        let mut alignments = Vec::new();
        let mut stack = vec![PartialAlignment {
            partial_a: Vec::with_capacity(capacity),
            partial_b: Vec::with_capacity(capacity),
            i: n,
            j: m,
        }];
        let mut max_depth = stack.len();

        while let Some(mut state) = stack.pop() {
            let (i, j) = (state.i, state.j);
            if i == 0 && j == 0 {
                // Partials were built from the end backwards.
                state.partial_a.reverse();
                state.partial_b.reverse();
                alignments.push(AlignedPair::new(state.partial_a, state.partial_b));
                continue;
            }

            let cell = self.directions.get(i, j);
            if cell.from_left() {
                stack.push(state.step(GAP_SYMBOL, self.seq_b[j - 1], i, j - 1));
            }
            if cell.from_up() {
                stack.push(state.step(self.seq_a[i - 1], GAP_SYMBOL, i - 1, j));
            }
            if cell.from_diag() {
                stack.push(state.step(self.seq_a[i - 1], self.seq_b[j - 1], i - 1, j - 1));
            }
            max_depth = max_depth.max(stack.len());
        }

        debug!(
            "Traceback emitted {} alignments, peak stack depth {}",
            alignments.len(),
            max_depth
        );

        AlignmentResult {
            score: self.scores.final_score(),
            alignments,
        }
    }
}
