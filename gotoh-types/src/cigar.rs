use std::{fmt, slice};

use serde::{Deserialize, Serialize};

use crate::{
    cost_model::{GapPenalties, Score},
    matrix::SubstitutionMatrix,
    residue::Residue,
};

/// One column of a pairwise alignment.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum CigarOp {
    /// Identical residues.
    Match,
    /// Distinct residues aligned to each other.
    Mismatch,
    /// A subject residue against a gap in the query.
    Ins,
    /// A query residue against a gap in the subject.
    Del,
}

impl CigarOp {
    pub fn to_char(self) -> char {
        match self {
            CigarOp::Match => '=',
            CigarOp::Mismatch => 'X',
            CigarOp::Ins => 'I',
            CigarOp::Del => 'D',
        }
    }

    pub fn is_gap(self) -> bool {
        matches!(self, CigarOp::Ins | CigarOp::Del)
    }

    /// Query and subject residues consumed by one column of this op.
    pub fn delta(self) -> (usize, usize) {
        match self {
            CigarOp::Match | CigarOp::Mismatch => (1, 1),
            CigarOp::Ins => (0, 1),
            CigarOp::Del => (1, 0),
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct CigarElem {
    pub op: CigarOp,
    pub cnt: usize,
}

/// Run-length encoded alignment columns, in alignment order.
#[derive(Default, Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Cigar {
    ops: Vec<CigarElem>,
}

impl fmt::Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for elem in &self.ops {
            write!(f, "{}{}", elem.cnt, elem.op.to_char())?;
        }
        Ok(())
    }
}

impl FromIterator<CigarOp> for Cigar {
    fn from_iter<T: IntoIterator<Item = CigarOp>>(iter: T) -> Self {
        let mut cigar = Cigar::default();
        for op in iter {
            cigar.push_op(op);
        }
        cigar
    }
}

impl Cigar {
    pub fn push_op(&mut self, op: CigarOp) {
        if let Some(s) = self.ops.last_mut() {
            if s.op == op {
                s.cnt += 1;
                return;
            }
        }
        self.ops.push(CigarElem { op, cnt: 1 });
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of alignment columns.
    pub fn columns(&self) -> usize {
        self.ops.iter().map(|e| e.cnt).sum()
    }

    pub fn count(&self, op: CigarOp) -> usize {
        self.ops.iter().filter(|e| e.op == op).map(|e| e.cnt).sum()
    }

    /// Number of gap runs. Adjacent `Ins` and `Del` runs count separately.
    pub fn gap_openings(&self) -> usize {
        self.ops.iter().filter(|e| e.op.is_gap()).count()
    }

    /// Query and subject residues consumed by the whole cigar.
    pub fn lengths(&self) -> (usize, usize) {
        self.ops.iter().fold((0, 0), |(q, s), e| {
            let (dq, ds) = e.op.delta();
            (q + dq * e.cnt, s + ds * e.cnt)
        })
    }

    /// Re-score the alignment of `query` against `subject`, the aligned
    /// residues only, and check that every column is consistent with them.
    pub fn verify<R: Residue, M: SubstitutionMatrix<R> + ?Sized>(
        &self,
        matrix: &M,
        gaps: GapPenalties,
        query: &[R],
        subject: &[R],
    ) -> Score {
        let (mut i, mut j) = (0, 0);
        let mut score = 0.;

        for &CigarElem { op, cnt } in self {
            match op {
                CigarOp::Match => {
                    for _ in 0..cnt {
                        assert_eq!(query[i], subject[j]);
                        score += matrix.score(query[i], subject[j]);
                        i += 1;
                        j += 1;
                    }
                }
                CigarOp::Mismatch => {
                    for _ in 0..cnt {
                        assert_ne!(query[i], subject[j]);
                        score += matrix.score(query[i], subject[j]);
                        i += 1;
                        j += 1;
                    }
                }
                CigarOp::Ins => {
                    j += cnt;
                    score += gaps.gap_cost(cnt);
                }
                CigarOp::Del => {
                    i += cnt;
                    score += gaps.gap_cost(cnt);
                }
            }
        }
        assert_eq!(i, query.len(), "cigar does not consume the full query");
        assert_eq!(j, subject.len(), "cigar does not consume the full subject");

        score
    }
}

impl<'a> IntoIterator for &'a Cigar {
    type Item = &'a CigarElem;

    type IntoIter = slice::Iter<'a, CigarElem>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
