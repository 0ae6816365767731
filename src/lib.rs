//! Global (Needleman-Wunsch) pairwise alignment that reports every optimal
//! alignment, not just one.
//!
//! ```
//! use nw_aligner::{NeedlemanWunsch, ScoringModel};
//!
//! let mut aligner = NeedlemanWunsch::new(ScoringModel::default());
//! let result = aligner.align(b"CGA", b"CACGA").unwrap();
//! assert_eq!(result.score, 1.0);
//! assert_eq!(result.alignments.len(), 2);
//! ```

use std::path::PathBuf;

use log::{debug, info};
use thiserror::Error;

pub mod config;
pub mod matrix;
pub mod output;
pub mod scoring;
pub mod sequence;
pub mod traceback;

pub use config::{load_config, parse_config};
pub use matrix::{DirectionMatrix, Directions, ScoreMatrix};
pub use output::{write_result, write_score_matrix};
pub use scoring::{FixedPointScoring, ScoringModel};
pub use sequence::{parse_sequence, read_sequence, Sequence};
pub use traceback::{AlignedPair, AlignmentResult, TracebackEnumerator};

// Default scoring parameters
pub const DEFAULT_GAP_PENALTY: f64 = -1.0;
pub const DEFAULT_MATCH_AWARD: f64 = 1.0;
pub const DEFAULT_MISMATCH_PENALTY: f64 = 0.0;
pub const DEFAULT_MAX_SEQUENCE_LENGTH: usize = 1000;

/// Symbol written where one sequence contributes nothing to a column.
pub const GAP_SYMBOL: u8 = b'-';

#[derive(Debug, Error)]
pub enum AlignerError {
    #[error("Sequence too long: length {length} exceeds maximum {max}")]
    SequenceTooLong { length: usize, max: usize },
    #[error("Configuration error{}: {message}", key_suffix(.key))]
    Configuration {
        key: Option<String>,
        message: String,
    },
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn key_suffix(key: &Option<String>) -> String {
    key.as_ref()
        .map(|k| format!(" for key {}", k))
        .unwrap_or_default()
}

impl AlignerError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            key: None,
            message: message.into(),
        }
    }

    pub fn config_key<K: Into<String>, S: Into<String>>(key: K, message: S) -> Self {
        Self::Configuration {
            key: Some(key.into()),
            message: message.into(),
        }
    }
}

/// Counters kept by one [`NeedlemanWunsch`] instance across its calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignerStats {
    pub matrices_built: usize,
    pub cells_allocated: usize,
    pub solutions_emitted: usize,
}

/// Alignment engine bound to one scoring model.
///
/// Matrices are created per call and dropped once traceback finishes; only
/// the [`AlignmentResult`] outlives a call.
#[derive(Debug, Clone, Default)]
pub struct NeedlemanWunsch {
    scoring: ScoringModel,
    stats: AlignerStats,
}

impl NeedlemanWunsch {
    pub fn new(scoring: ScoringModel) -> Self {
        Self {
            scoring,
            stats: AlignerStats::default(),
        }
    }

    pub fn scoring(&self) -> &ScoringModel {
        &self.scoring
    }

    pub fn stats(&self) -> AlignerStats {
        self.stats
    }

    /// Rejects inputs longer than `max_sequence_length`.
    pub fn check_lengths(&self, seq_a: &[u8], seq_b: &[u8]) -> Result<(), AlignerError> {
        let max = self.scoring.max_sequence_length;
        let longest = seq_a.len().max(seq_b.len());
        if longest > max {
            return Err(AlignerError::SequenceTooLong {
                length: longest,
                max,
            });
        }
        Ok(())
    }

    /// Length-checks and validates the scoring model, then fills the score
    /// and direction matrices in exact fixed-point arithmetic.
    pub fn build_matrices(
        &mut self,
        seq_a: &[u8],
        seq_b: &[u8],
    ) -> Result<(ScoreMatrix, DirectionMatrix), AlignerError> {
        self.check_lengths(seq_a, seq_b)?;
        let exact = self.scoring.to_fixed_point()?;
        exact.check_path_bound(seq_a.len() + seq_b.len())?;

        let (scores, directions) = matrix::build_matrices(seq_a, seq_b, &exact);
        self.stats.matrices_built += 1;
        self.stats.cells_allocated += scores.rows() * scores.cols();
        Ok((scores, directions))
    }

    /// Enumerates every optimal alignment recorded in `directions`.
    pub fn enumerate_solutions(
        &mut self,
        scores: &ScoreMatrix,
        directions: &DirectionMatrix,
        seq_a: &[u8],
        seq_b: &[u8],
    ) -> AlignmentResult {
        let result = TracebackEnumerator::new(scores, directions, seq_a, seq_b).enumerate();
        self.stats.solutions_emitted += result.alignments.len();
        result
    }

    pub fn align(&mut self, seq_a: &[u8], seq_b: &[u8]) -> Result<AlignmentResult, AlignerError> {
        info!(
            "Aligning sequences of length {} and {}",
            seq_a.len(),
            seq_b.len()
        );
        let (scores, directions) = self.build_matrices(seq_a, seq_b)?;
        debug!(
            "Built {}x{} matrices with {} tied cells",
            scores.rows(),
            scores.cols(),
            directions.tie_count()
        );

        let result = self.enumerate_solutions(&scores, &directions, seq_a, seq_b);
        info!(
            "Optimal score {} with {} alignment(s)",
            result.score,
            result.alignments.len()
        );
        Ok(result)
    }

    pub fn align_sequences(
        &mut self,
        seq_a: &Sequence,
        seq_b: &Sequence,
    ) -> Result<AlignmentResult, AlignerError> {
        self.align(seq_a.as_bytes(), seq_b.as_bytes())
    }
}

/// One-shot alignment with an explicit scoring model.
pub fn align(
    seq_a: &[u8],
    seq_b: &[u8],
    scoring: &ScoringModel,
) -> Result<AlignmentResult, AlignerError> {
    NeedlemanWunsch::new(*scoring).align(seq_a, seq_b)
}
