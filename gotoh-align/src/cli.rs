use clap::Parser;
use gotoh_types::{AlignmentMode, GapPenalties, Score};
use serde::{Deserialize, Serialize};

use crate::AlignerParams;

#[derive(Parser, Debug, Clone, Copy, Serialize, Deserialize)]
#[clap(next_help_heading = "Aligner")]
pub struct AlignerArgs {
    /// Global (Needleman-Wunsch) or local (Smith-Waterman) alignment.
    #[clap(long, value_enum, default_value_t = AlignmentMode::Local)]
    pub mode: AlignmentMode,

    /// Score of the first position of a gap run.
    #[clap(long, default_value_t = -2., allow_negative_numbers = true)]
    pub gap_open: Score,

    /// Score of every further position of a gap run.
    #[clap(long, default_value_t = -1., allow_negative_numbers = true)]
    pub gap_extend: Score,
}

impl AlignerArgs {
    pub fn params(&self) -> AlignerParams {
        AlignerParams {
            mode: self.mode,
            gaps: GapPenalties::new(self.gap_open, self.gap_extend),
        }
    }
}
