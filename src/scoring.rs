use crate::config::{GAP_PENALTY_KEY, MATCH_AWARD_KEY, MISMATCH_PENALTY_KEY};
use crate::{
    AlignerError, DEFAULT_GAP_PENALTY, DEFAULT_MATCH_AWARD, DEFAULT_MAX_SEQUENCE_LENGTH,
    DEFAULT_MISMATCH_PENALTY,
};

/// Most fractional decimal digits a score field may carry.
pub const MAX_DECIMAL_PLACES: u32 = 9;

/// Linear, position-independent scoring scheme for global alignment.
///
/// Any finite value with at most [`MAX_DECIMAL_PLACES`] fractional digits is
/// accepted. The engine does not require
/// `match_award > mismatch_penalty >= gap_penalty`; zero or even positive gap
/// penalties are valid inputs and simply produce different optima.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringModel {
    /// Added once per gap column.
    pub gap_penalty: f64,
    /// Added when the two aligned symbols are equal.
    pub match_award: f64,
    /// Added when the two aligned symbols differ.
    pub mismatch_penalty: f64,
    /// Upper bound on the length of either input sequence.
    pub max_sequence_length: usize,
}

impl Default for ScoringModel {
    fn default() -> Self {
        Self {
            gap_penalty: DEFAULT_GAP_PENALTY,
            match_award: DEFAULT_MATCH_AWARD,
            mismatch_penalty: DEFAULT_MISMATCH_PENALTY,
            max_sequence_length: DEFAULT_MAX_SEQUENCE_LENGTH,
        }
    }
}

impl ScoringModel {
    pub fn new(
        gap_penalty: f64,
        match_award: f64,
        mismatch_penalty: f64,
        max_sequence_length: usize,
    ) -> Self {
        Self {
            gap_penalty,
            match_award,
            mismatch_penalty,
            max_sequence_length,
        }
    }

    pub fn with_gap_penalty(mut self, gap_penalty: f64) -> Self {
        self.gap_penalty = gap_penalty;
        self
    }

    pub fn with_match_award(mut self, match_award: f64) -> Self {
        self.match_award = match_award;
        self
    }

    pub fn with_mismatch_penalty(mut self, mismatch_penalty: f64) -> Self {
        self.mismatch_penalty = mismatch_penalty;
        self
    }

    pub fn with_max_sequence_length(mut self, max_sequence_length: usize) -> Self {
        self.max_sequence_length = max_sequence_length;
        self
    }

    /// Score for aligning symbol `a` against symbol `b`.
    pub fn substitution(&self, a: u8, b: u8) -> f64 {
        if a == b {
            self.match_award
        } else {
            self.mismatch_penalty
        }
    }

    /// True when every score field is a finite number.
    pub fn is_finite(&self) -> bool {
        self.gap_penalty.is_finite()
            && self.match_award.is_finite()
            && self.mismatch_penalty.is_finite()
    }

    fn fields(&self) -> [(&'static str, f64); 3] {
        [
            (GAP_PENALTY_KEY, self.gap_penalty),
            (MATCH_AWARD_KEY, self.match_award),
            (MISMATCH_PENALTY_KEY, self.mismatch_penalty),
        ]
    }

    /// Checks that every score field is finite, naming the first that is not.
    pub fn validate(&self) -> Result<(), AlignerError> {
        for (key, value) in self.fields() {
            if !value.is_finite() {
                return Err(AlignerError::config_key(
                    key,
                    format!("value {} is not a finite number", value),
                ));
            }
        }
        Ok(())
    }

    /// Converts the score fields to exact fixed-point integers.
    ///
    /// Each field is read through its shortest decimal rendering, so `-0.1`
    /// becomes exactly `-1` tenth rather than the nearest binary fraction.
    pub fn to_fixed_point(&self) -> Result<FixedPointScoring, AlignerError> {
        self.validate()?;

        let mut decimals = [DecimalValue::default(); 3];
        let mut places = 0;
        for (slot, (key, value)) in decimals.iter_mut().zip(self.fields()) {
            *slot = DecimalValue::parse(key, value)?;
            places = places.max(slot.places);
        }

        let [gap, award, mismatch] = decimals;
        let keys = self.fields().map(|(key, _)| key);
        Ok(FixedPointScoring {
            gap_penalty: gap.scaled(keys[0], places)?,
            match_award: award.scaled(keys[1], places)?,
            mismatch_penalty: mismatch.scaled(keys[2], places)?,
            places,
        })
    }
}

/// A finite `f64` split into its decimal digits.
#[derive(Debug, Clone, Copy, Default)]
struct DecimalValue {
    negative: bool,
    digits: i64,
    places: u32,
}

impl DecimalValue {
    fn parse(key: &str, value: f64) -> Result<Self, AlignerError> {
        let too_precise = || {
            AlignerError::config_key(
                key,
                format!(
                    "value {} cannot be represented with {} decimal places",
                    value, MAX_DECIMAL_PLACES
                ),
            )
        };

        // Display for f64 is the shortest round-trip decimal, never exponential.
        let text = value.to_string();
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.as_str()),
        };
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let places = u32::try_from(fraction.len()).map_err(|_| too_precise())?;
        if places > MAX_DECIMAL_PLACES {
            return Err(too_precise());
        }

        let mut digits: i64 = 0;
        for c in whole.chars().chain(fraction.chars()) {
            let digit = c.to_digit(10).ok_or_else(too_precise)?;
            digits = digits
                .checked_mul(10)
                .and_then(|d| d.checked_add(i64::from(digit)))
                .ok_or_else(|| {
                    AlignerError::config_key(key, format!("value {} is too large", value))
                })?;
        }

        Ok(Self {
            negative,
            digits,
            places,
        })
    }

    fn scaled(self, key: &str, places: u32) -> Result<i64, AlignerError> {
        let units = 10i64
            .checked_pow(places - self.places)
            .and_then(|factor| self.digits.checked_mul(factor))
            .ok_or_else(|| AlignerError::config_key(key, "value is too large"))?;
        Ok(if self.negative { -units } else { units })
    }
}

/// Score fields as integer multiples of `10^-places`.
///
/// All matrix arithmetic happens here, so sums along different paths compare
/// exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPointScoring {
    pub gap_penalty: i64,
    pub match_award: i64,
    pub mismatch_penalty: i64,
    pub places: u32,
}

impl FixedPointScoring {
    pub fn substitution(&self, a: u8, b: u8) -> i64 {
        if a == b {
            self.match_award
        } else {
            self.mismatch_penalty
        }
    }

    /// Units per whole score point.
    pub fn scale(&self) -> i64 {
        10i64.pow(self.places)
    }

    pub fn to_f64(&self, units: i64) -> f64 {
        units as f64 / self.scale() as f64
    }

    /// Fails when a path of `steps` columns could overflow `i64`.
    pub fn check_path_bound(&self, steps: usize) -> Result<(), AlignerError> {
        let widest = self
            .gap_penalty
            .unsigned_abs()
            .max(self.match_award.unsigned_abs())
            .max(self.mismatch_penalty.unsigned_abs());
        let fits = u64::try_from(steps)
            .ok()
            .and_then(|steps| widest.checked_mul(steps))
            .map_or(false, |bound| bound <= i64::MAX as u64);
        if !fits {
            return Err(AlignerError::config(format!(
                "scores too large to align {} columns without overflow",
                steps
            )));
        }
        Ok(())
    }
}
