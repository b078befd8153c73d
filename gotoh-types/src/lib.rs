//! Types shared by the aligner crates.
//!
//! Everything the DP core consumes or produces lives here: residue alphabets,
//! the sequence abstraction, substitution matrices, the affine gap model and
//! the final `PairwiseAlignment`.
pub mod alignment;
pub mod amino_acid;
pub mod cigar;
pub mod cost_model;
pub mod error;
pub mod matrix;
pub mod nucleotide;
pub mod residue;
pub mod sequence;

// Re-export types for convenience of `use gotoh_types::*;`.
pub use alignment::*;
pub use amino_acid::AminoAcid;
pub use cigar::*;
pub use cost_model::*;
pub use error::*;
pub use matrix::*;
pub use nucleotide::Nucleotide;
pub use residue::{alphabet_size, Residue};
pub use sequence::*;

/// Common interface of pairwise aligners, used by the test harness.
///
/// `query` and `subject` may contain gaps; they are dropped before aligning.
pub trait Aligner<R: Residue>: std::fmt::Debug {
    fn mode(&self) -> AlignmentMode;
    fn gap_penalties(&self) -> GapPenalties;
    fn matrix(&self) -> &dyn SubstitutionMatrix<R>;
    fn align(&self, query: &[R], subject: &[R]) -> Result<PairwiseAlignment<R>, AlignError>;
}
