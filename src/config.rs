//! `KEY = VALUE` configuration files for the scoring model.
//!
//! ```text
//! # scoring.cfg
//! GAP_PENALTY = -1
//! SAME_AWARD = 1
//! DIFFERENCE_PENALTY = 0
//! MAX_SEQ_LENGTH = 1000
//! ```

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::scoring::ScoringModel;
use crate::AlignerError;

pub const GAP_PENALTY_KEY: &str = "GAP_PENALTY";
pub const MATCH_AWARD_KEY: &str = "SAME_AWARD";
pub const MISMATCH_PENALTY_KEY: &str = "DIFFERENCE_PENALTY";
pub const MAX_SEQ_LENGTH_KEY: &str = "MAX_SEQ_LENGTH";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    GapPenalty,
    MatchAward,
    MismatchPenalty,
    MaxSequenceLength,
}

impl Field {
    fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_uppercase().as_str() {
            "GAP_PENALTY" => Some(Field::GapPenalty),
            "SAME_AWARD" | "MATCH_AWARD" => Some(Field::MatchAward),
            "DIFFERENCE_PENALTY" | "MISMATCH_PENALTY" => Some(Field::MismatchPenalty),
            "MAX_SEQ_LENGTH" | "MAX_SEQUENCE_LENGTH" => Some(Field::MaxSequenceLength),
            _ => None,
        }
    }

    fn canonical_key(self) -> &'static str {
        match self {
            Field::GapPenalty => GAP_PENALTY_KEY,
            Field::MatchAward => MATCH_AWARD_KEY,
            Field::MismatchPenalty => MISMATCH_PENALTY_KEY,
            Field::MaxSequenceLength => MAX_SEQ_LENGTH_KEY,
        }
    }
}

#[derive(Debug, Default)]
struct PartialModel {
    gap_penalty: Option<f64>,
    match_award: Option<f64>,
    mismatch_penalty: Option<f64>,
    max_sequence_length: Option<usize>,
}

fn parse_score(key: &str, value: &str) -> Result<f64, AlignerError> {
    let parsed: f64 = value.parse().map_err(|_| {
        AlignerError::config_key(key, format!("value '{}' is not a number", value))
    })?;
    if !parsed.is_finite() {
        return Err(AlignerError::config_key(
            key,
            format!("value '{}' is not finite", value),
        ));
    }
    Ok(parsed)
}

fn parse_length(key: &str, value: &str) -> Result<usize, AlignerError> {
    value.parse().map_err(|_| {
        AlignerError::config_key(
            key,
            format!("value '{}' is not a non-negative integer", value),
        )
    })
}

/// Parses configuration text. All four keys must be present.
pub fn parse_config(text: &str) -> Result<ScoringModel, AlignerError> {
    let mut partial = PartialModel::default();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (key, value) = line.split_once('=').ok_or_else(|| {
            AlignerError::config(format!(
                "line {}: expected KEY = VALUE, found '{}'",
                index + 1,
                line
            ))
        })?;
        let key = key.trim();
        let value = value.trim();

        let Some(field) = Field::from_key(key) else {
            warn!("Ignoring unknown configuration key '{}' on line {}", key, index + 1);
            continue;
        };

        match field {
            Field::GapPenalty => partial.gap_penalty = Some(parse_score(key, value)?),
            Field::MatchAward => partial.match_award = Some(parse_score(key, value)?),
            Field::MismatchPenalty => partial.mismatch_penalty = Some(parse_score(key, value)?),
            Field::MaxSequenceLength => {
                partial.max_sequence_length = Some(parse_length(key, value)?)
            }
        }
    }

    let missing = |field: Field| AlignerError::config_key(field.canonical_key(), "missing required key");

    Ok(ScoringModel {
        gap_penalty: partial.gap_penalty.ok_or_else(|| missing(Field::GapPenalty))?,
        match_award: partial.match_award.ok_or_else(|| missing(Field::MatchAward))?,
        mismatch_penalty: partial
            .mismatch_penalty
            .ok_or_else(|| missing(Field::MismatchPenalty))?,
        max_sequence_length: partial
            .max_sequence_length
            .ok_or_else(|| missing(Field::MaxSequenceLength))?,
    })
}

/// Loads a [`ScoringModel`] from a configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ScoringModel, AlignerError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| {
        AlignerError::config(format!("cannot read {}: {}", path.display(), source))
    })?;
    let model = parse_config(&text)?;
    info!("Loaded scoring model from {}: {:?}", path.display(), model);
    Ok(model)
}
