//! The result of a pairwise alignment.

use serde::{Deserialize, Serialize};

use crate::{
    cigar::{Cigar, CigarOp},
    cost_model::Score,
    residue::Residue,
    sequence::residues_to_string,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    #[default]
    Forward,
    Reverse,
}

/// A half-open range `[start, end)` of ungapped residue positions.
///
/// For `Strand::Reverse` the positions refer to the forward sequence, while the
/// aligned residues are the reverse complement of that range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectedRange {
    pub start: usize,
    pub end: usize,
    pub strand: Strand,
}

impl DirectedRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self {
            start,
            end,
            strand: Strand::Forward,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The same range in a sequence that starts `offset` positions earlier.
    pub fn shifted(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
            strand: self.strand,
        }
    }

    /// Map a range on the reverse complement of a sequence of length `len`
    /// back to forward coordinates, toggling the strand.
    pub fn flipped(self, len: usize) -> Self {
        Self {
            start: len - self.end,
            end: len - self.start,
            strand: match self.strand {
                Strand::Forward => Strand::Reverse,
                Strand::Reverse => Strand::Forward,
            },
        }
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A gapped pairwise alignment.
///
/// `query` and `subject` have equal length; a column never holds two gaps.
#[derive(Clone, Debug, PartialEq)]
pub struct PairwiseAlignment<R: Residue> {
    pub query: Vec<R>,
    pub subject: Vec<R>,
    pub score: Score,
    pub query_range: DirectedRange,
    pub subject_range: DirectedRange,
    pub cigar: Cigar,
    pub length: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub gap_openings: usize,
}

impl<R: Residue> PairwiseAlignment<R> {
    /// Build the result from the gapped rows, deriving the cigar and counts
    /// in one scan over the columns.
    pub fn new(
        query: Vec<R>,
        subject: Vec<R>,
        score: Score,
        query_range: DirectedRange,
        subject_range: DirectedRange,
    ) -> Self {
        assert_eq!(query.len(), subject.len());
        let cigar: Cigar = query
            .iter()
            .zip(&subject)
            .map(|(&q, &s)| match (q.is_gap(), s.is_gap()) {
                (true, false) => CigarOp::Ins,
                (false, true) => CigarOp::Del,
                (false, false) if q == s => CigarOp::Match,
                (false, false) => CigarOp::Mismatch,
                (true, true) => panic!("alignment column with two gaps"),
            })
            .collect();
        Self {
            length: cigar.columns(),
            matches: cigar.count(CigarOp::Match),
            mismatches: cigar.count(CigarOp::Mismatch),
            gap_openings: cigar.gap_openings(),
            query,
            subject,
            score,
            query_range,
            subject_range,
            cigar,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Identical columns as a percentage of the alignment length.
    pub fn percent_identity(&self) -> f64 {
        if self.length == 0 {
            0.
        } else {
            100. * self.matches as f64 / self.length as f64
        }
    }

    pub fn query_string(&self) -> String {
        residues_to_string(&self.query)
    }

    pub fn subject_string(&self) -> String {
        residues_to_string(&self.subject)
    }
}
