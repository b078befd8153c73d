//! This module contains the affine `GapPenalties` model and the `AlignmentMode`.

use crate::error::AlignError;
use serde::{Deserialize, Serialize};

/// Alignment scores are single precision; higher is better.
pub type Score = f32;

/// Affine gap penalties, in the Gotoh model.
///
/// A gap run of length `k` scores `open + (k-1) * extend`.
/// Both values are usually `<= 0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GapPenalties {
    /// Charged for the first position of a gap run.
    pub open: Score,
    /// Charged for every further position of the same run.
    pub extend: Score,
}

impl Default for GapPenalties {
    fn default() -> Self {
        Self {
            open: -2.,
            extend: -1.,
        }
    }
}

impl GapPenalties {
    pub fn new(open: Score, extend: Score) -> Self {
        Self { open, extend }
    }

    /// Linear gap cost: every gap position costs `indel`.
    pub fn linear(indel: Score) -> Self {
        Self::new(indel, indel)
    }

    pub fn validate(&self) -> Result<(), AlignError> {
        if !self.open.is_finite() {
            return Err(AlignError::InvalidGapPenalty {
                which: "open",
                value: self.open,
            });
        }
        if !self.extend.is_finite() {
            return Err(AlignError::InvalidGapPenalty {
                which: "extend",
                value: self.extend,
            });
        }
        Ok(())
    }

    /// Score of a single gap run of length `k`.
    #[inline]
    pub fn gap_cost(&self, k: usize) -> Score {
        match k {
            0 => 0.,
            k => self.open + (k - 1) as Score * self.extend,
        }
    }
}

/// Global (Needleman-Wunsch) or local (Smith-Waterman) alignment.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentMode {
    Global,
    #[default]
    Local,
}

impl AlignmentMode {
    pub fn name(&self) -> &'static str {
        match self {
            AlignmentMode::Global => "global",
            AlignmentMode::Local => "local",
        }
    }
}
