//! Gotoh affine-gap pairwise alignment.
//!
//! The `Engine` fills a packed traceback matrix using two rolling score rows,
//! a `Strategy` decides between global and local alignment, and
//! `FilledMatrix::traceback` reconstructs the alignment.
use std::marker::PhantomData;

use gotoh_types::*;
use serde::{Deserialize, Serialize};

pub mod cli;
pub mod direction;
pub mod engine;
pub mod multiple;
pub mod strategy;
pub mod traceback;
pub mod traceback_matrix;

#[cfg(test)]
mod tests;

pub use direction::{Direction, StartPoint, WalkBack};
pub use engine::{Engine, FilledMatrix};
pub use multiple::{align_multiple_local, MultipleLocalAligner};
pub use strategy::{Global, Local, Strategy};
pub use traceback_matrix::TracebackMatrix;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AlignerParams {
    /// Global or local alignment.
    pub mode: AlignmentMode,
    /// Affine gap penalties.
    pub gaps: GapPenalties,
}

impl AlignerParams {
    pub fn make_aligner<R: Residue, M: SubstitutionMatrix<R>>(
        &self,
        matrix: M,
    ) -> PairwiseAligner<R, M> {
        PairwiseAligner {
            params: *self,
            matrix,
            _residue: PhantomData,
        }
    }
}

/// Align `query` against `subject`. Gaps in the inputs are ignored.
pub fn align<R, M>(
    query: &[R],
    subject: &[R],
    matrix: &M,
    gaps: GapPenalties,
    mode: AlignmentMode,
) -> Result<PairwiseAlignment<R>, AlignError>
where
    R: Residue,
    M: SubstitutionMatrix<R> + ?Sized,
{
    Ok(match mode {
        AlignmentMode::Global => Engine::new(query, subject, matrix, gaps, Global)?
            .fill()
            .traceback(),
        AlignmentMode::Local => Engine::new(query, subject, matrix, gaps, Local)?
            .fill()
            .traceback(),
    })
}

/// Align `query` against both `subject` and its reverse complement and return
/// the better alignment, preferring the forward strand on ties.
///
/// For a reverse strand hit, the subject range is given in forward
/// coordinates and the gapped subject is the reverse complement.
pub fn align_both_strands<M>(
    query: &[Nucleotide],
    subject: &[Nucleotide],
    matrix: &M,
    gaps: GapPenalties,
    mode: AlignmentMode,
) -> Result<PairwiseAlignment<Nucleotide>, AlignError>
where
    M: SubstitutionMatrix<Nucleotide> + ?Sized,
{
    let forward = align(query, subject, matrix, gaps, mode)?;
    let subject = Sequence::new(subject.ungapped()).reverse_complement();
    let mut reverse = align(query, &subject, matrix, gaps, mode)?;
    if reverse.score > forward.score {
        reverse.subject_range = reverse.subject_range.flipped(subject.len());
        Ok(reverse)
    } else {
        Ok(forward)
    }
}

/// An `Aligner` with fixed parameters and substitution matrix.
#[derive(Debug, Clone)]
pub struct PairwiseAligner<R: Residue, M> {
    params: AlignerParams,
    matrix: M,
    _residue: PhantomData<R>,
}

impl<R: Residue, M: SubstitutionMatrix<R>> PairwiseAligner<R, M> {
    pub fn new(matrix: M, gaps: GapPenalties, mode: AlignmentMode) -> Self {
        AlignerParams { mode, gaps }.make_aligner(matrix)
    }

    pub fn params(&self) -> &AlignerParams {
        &self.params
    }
}

impl<R: Residue, M: SubstitutionMatrix<R> + std::fmt::Debug> Aligner<R> for PairwiseAligner<R, M> {
    fn mode(&self) -> AlignmentMode {
        self.params.mode
    }

    fn gap_penalties(&self) -> GapPenalties {
        self.params.gaps
    }

    fn matrix(&self) -> &dyn SubstitutionMatrix<R> {
        &self.matrix
    }

    fn align(&self, query: &[R], subject: &[R]) -> Result<PairwiseAlignment<R>, AlignError> {
        align(
            query,
            subject,
            &self.matrix,
            self.params.gaps,
            self.params.mode,
        )
    }
}
