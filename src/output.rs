use std::io::{self, Write};

use crate::matrix::ScoreMatrix;
use crate::traceback::AlignmentResult;

/// Writes the score, then each aligned pair as two lines after a blank line.
///
/// `limit` caps how many pairs are written; the score is always written.
pub fn write_result<W: Write>(
    writer: &mut W,
    result: &AlignmentResult,
    limit: Option<usize>,
) -> io::Result<()> {
    writeln!(writer, "{}", result.score)?;
    let shown = limit.unwrap_or(result.alignments.len());
    for pair in result.alignments.iter().take(shown) {
        writeln!(writer)?;
        writer.write_all(&pair.aligned_a)?;
        writeln!(writer)?;
        writer.write_all(&pair.aligned_b)?;
        writeln!(writer)?;
    }
    Ok(())
}

/// Tab-separated dump of the score matrix, one row per line.
pub fn write_score_matrix<W: Write>(writer: &mut W, scores: &ScoreMatrix) -> io::Result<()> {
    for row in 0..scores.rows() {
        let line = scores
            .row(row)
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("\t");
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}
