//! Substitution matrices: symmetric residue-pair score tables.

use std::marker::PhantomData;

use lazy_static::lazy_static;

use crate::{
    cost_model::Score,
    error::ParseError,
    residue::{alphabet_size, Residue},
    AminoAcid, Nucleotide,
};

/// Symmetric score lookup between two residues.
pub trait SubstitutionMatrix<R: Residue> {
    fn score(&self, a: R, b: R) -> Score;
}

impl<R: Residue, M: SubstitutionMatrix<R> + ?Sized> SubstitutionMatrix<R> for &M {
    #[inline]
    fn score(&self, a: R, b: R) -> Score {
        (**self).score(a, b)
    }
}

/// A dense `N x N` table indexed by residue ordinals.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoringMatrix<R: Residue> {
    table: Vec<Score>,
    _residue: PhantomData<R>,
}

impl<R: Residue> SubstitutionMatrix<R> for ScoringMatrix<R> {
    #[inline]
    fn score(&self, a: R, b: R) -> Score {
        self.table[a.ordinal() as usize * alphabet_size::<R>() + b.ordinal() as usize]
    }
}

impl<R: Residue> ScoringMatrix<R> {
    pub fn builder(default: Score) -> ScoringMatrixBuilder<R> {
        ScoringMatrixBuilder {
            matrix: Self::filled(default),
        }
    }

    fn filled(default: Score) -> Self {
        let n = alphabet_size::<R>();
        Self {
            table: vec![default; n * n],
            _residue: PhantomData,
        }
    }

    #[inline]
    fn cell_mut(&mut self, a: R, b: R) -> &mut Score {
        &mut self.table[a.ordinal() as usize * alphabet_size::<R>() + b.ordinal() as usize]
    }

    /// Parse a matrix in the NCBI text format:
    ///
    /// ```text
    /// # comment
    ///    A  R  N ...
    /// A  4 -1 -2 ...
    /// ```
    ///
    /// Residue pairs not listed, such as the gap, score `default`.
    pub fn from_ncbi(text: &str, default: Score) -> Result<Self, ParseError> {
        let mut matrix = Self::filled(default);
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        let (header_line, header) = lines
            .next()
            .ok_or_else(|| ParseError::matrix_format(0, "missing header row"))?;
        let columns = header
            .split_whitespace()
            .map(|f| parse_symbol::<R>(f, header_line))
            .collect::<Result<Vec<_>, _>>()?;

        for (line_no, line) in lines {
            let mut fields = line.split_whitespace();
            let row = parse_symbol::<R>(fields.next().unwrap_or_default(), line_no)?;
            let values = fields
                .map(|f| {
                    f.parse::<Score>().map_err(|_| {
                        ParseError::matrix_format(line_no, format!("invalid score {f:?}"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if values.len() != columns.len() {
                return Err(ParseError::matrix_format(
                    line_no,
                    format!(
                        "row {} has {} values but the header has {} columns",
                        row.to_char(),
                        values.len(),
                        columns.len()
                    ),
                ));
            }
            for (&col, value) in columns.iter().zip(values) {
                *matrix.cell_mut(row, col) = value;
            }
        }

        matrix.check_symmetric()?;
        Ok(matrix)
    }

    fn check_symmetric(&self) -> Result<(), ParseError> {
        for &a in R::ALPHABET {
            for &b in R::ALPHABET {
                let (ab, ba) = (self.score(a, b), self.score(b, a));
                if ab != ba {
                    return Err(ParseError::AsymmetricMatrix {
                        a: a.to_char(),
                        b: b.to_char(),
                        ab,
                        ba,
                    });
                }
            }
        }
        Ok(())
    }
}

fn parse_symbol<R: Residue>(field: &str, line: usize) -> Result<R, ParseError> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => R::from_char(c).ok_or_else(|| {
            ParseError::matrix_format(line, format!("unknown residue symbol {c:?}"))
        }),
        _ => Err(ParseError::matrix_format(
            line,
            format!("expected a single residue symbol, got {field:?}"),
        )),
    }
}

impl ScoringMatrix<Nucleotide> {
    /// Match/mismatch scoring for DNA; ambiguity codes score `mismatch`.
    pub fn nucleotide(match_score: Score, mismatch: Score) -> Self {
        Self::builder(mismatch).match_score(match_score).build()
    }
}

/// Fills a `ScoringMatrix` step by step. Every step keeps the table symmetric
/// and later steps overwrite earlier ones.
#[derive(Clone, Debug)]
pub struct ScoringMatrixBuilder<R: Residue> {
    matrix: ScoringMatrix<R>,
}

impl<R: Residue> ScoringMatrixBuilder<R> {
    /// Score of identical non-gap residues.
    pub fn match_score(mut self, score: Score) -> Self {
        for &r in R::ALPHABET.iter().filter(|r| !r.is_gap()) {
            *self.matrix.cell_mut(r, r) = score;
        }
        self
    }

    /// Score of distinct residue pairs where at least one side is an
    /// ambiguity code and both may stand for a common residue.
    pub fn ambiguity_score(mut self, score: Score) -> Self {
        for &a in R::ALPHABET {
            for &b in R::ALPHABET {
                if a != b && (a.is_ambiguous() || b.is_ambiguous()) && a.overlaps(b) {
                    *self.matrix.cell_mut(a, b) = score;
                }
            }
        }
        self
    }

    pub fn set(mut self, a: R, b: R, score: Score) -> Self {
        *self.matrix.cell_mut(a, b) = score;
        *self.matrix.cell_mut(b, a) = score;
        self
    }

    pub fn build(self) -> ScoringMatrix<R> {
        self.matrix
    }
}

const BLOSUM62: &str = "\
#  Matrix made by matblas from blosum62.iij
#  * column uses minimum score
#  BLOSUM Clustered Scoring Matrix in 1/2 Bit Units
#  Blocks Database = /data/blocks_5.0/blocks.dat
#  Cluster Percentage: >= 62
#  Entropy =   0.6979, Expected =  -0.5209
   A  R  N  D  C  Q  E  G  H  I  L  K  M  F  P  S  T  W  Y  V  B  Z  X  *
A  4 -1 -2 -2  0 -1 -1  0 -2 -1 -1 -1 -1 -2 -1  1  0 -3 -2  0 -2 -1  0 -4
R -1  5  0 -2 -3  1  0 -2  0 -3 -2  2 -1 -3 -2 -1 -1 -3 -2 -3 -1  0 -1 -4
N -2  0  6  1 -3  0  0  0  1 -3 -3  0 -2 -3 -2  1  0 -4 -2 -3  3  0 -1 -4
D -2 -2  1  6 -3  0  2 -1 -1 -3 -4 -1 -3 -3 -1  0 -1 -4 -3 -3  4  1 -1 -4
C  0 -3 -3 -3  9 -3 -4 -3 -3 -1 -1 -3 -1 -2 -3 -1 -1 -2 -2 -1 -3 -3 -2 -4
Q -1  1  0  0 -3  5  2 -2  0 -3 -2  1  0 -3 -1  0 -1 -2 -1 -2  0  3 -1 -4
E -1  0  0  2 -4  2  5 -2  0 -3 -3  1 -2 -3 -1  0 -1 -3 -2 -2  1  4 -1 -4
G  0 -2  0 -1 -3 -2 -2  6 -2 -4 -4 -2 -3 -3 -2  0 -2 -2 -3 -3 -1 -2 -1 -4
H -2  0  1 -1 -3  0  0 -2  8 -3 -3 -1 -2 -1 -2 -1 -2 -2  2 -3  0  0 -1 -4
I -1 -3 -3 -3 -1 -3 -3 -4 -3  4  2 -3  1  0 -3 -2 -1 -3 -1  3 -3 -3 -1 -4
L -1 -2 -3 -4 -1 -2 -3 -4 -3  2  4 -2  2  0 -3 -2 -1 -2 -1  1 -4 -3 -1 -4
K -1  2  0 -1 -3  1  1 -2 -1 -3 -2  5 -1 -3 -1  0 -1 -3 -2 -2  0  1 -1 -4
M -1 -1 -2 -3 -1  0 -2 -3 -2  1  2 -1  5  0 -2 -1 -1 -1 -1  1 -3 -1 -1 -4
F -2 -3 -3 -3 -2 -3 -3 -3 -1  0  0 -3  0  6 -4 -2 -2  1  3 -1 -3 -3 -1 -4
P -1 -2 -2 -1 -3 -1 -1 -2 -2 -3 -3 -1 -2 -4  7 -1 -1 -4 -3 -2 -2 -1 -2 -4
S  1 -1  1  0 -1  0  0  0 -1 -2 -2  0 -1 -2 -1  4  1 -3 -2 -2  0  0  0 -4
T  0 -1  0 -1 -1 -1 -1 -2 -2 -1 -1 -1 -1 -2 -1  1  5 -2 -2  0 -1 -1  0 -4
W -3 -3 -4 -4 -2 -2 -3 -2 -2 -3 -2 -3 -1  1 -4 -3 -2 11  2 -3 -4 -3 -2 -4
Y -2 -2 -2 -3 -2 -1 -2 -3  2 -1 -1 -2 -1  3 -3 -2 -2  2  7 -1 -3 -2 -1 -4
V  0 -3 -3 -3 -1 -2 -2 -3 -3  3  1 -2  1 -1 -2 -2  0 -3 -1  4 -3 -2 -1 -4
B -2 -1  3  4 -3  0  1 -1  0 -3 -4  0 -3 -3 -2  0 -1 -4 -3 -3  4  1 -1 -4
Z -1  0  0  1 -3  3  4 -2  0 -3 -3  1 -1 -3 -1  0 -1 -3 -2 -2  1  4 -1 -4
X  0 -1 -1 -1 -2 -1 -1 -1 -1 -1 -1 -1 -1 -1 -2  0  0 -2 -1 -1 -1 -1 -1 -4
* -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4  1
";

lazy_static! {
    static ref BLOSUM62_MATRIX: ScoringMatrix<AminoAcid> =
        ScoringMatrix::from_ncbi(BLOSUM62, -4.).expect("embedded BLOSUM62 table is well formed");
}

/// The BLOSUM62 matrix. Pairs involving a gap score -4, like the stop codon.
pub fn blosum62() -> &'static ScoringMatrix<AminoAcid> {
    &BLOSUM62_MATRIX
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::AminoAcid::*;

    #[test]
    fn blosum62_values() {
        let m = blosum62();
        assert_eq!(m.score(Tryptophan, Tryptophan), 11.);
        assert_eq!(m.score(Alanine, Serine), 1.);
        assert_eq!(m.score(Serine, Alanine), 1.);
        assert_eq!(m.score(Asx, AsparticAcid), 4.);
        assert_eq!(m.score(Stop, Stop), 1.);
        assert_eq!(m.score(Gap, Alanine), -4.);
        assert_eq!(m.score(Tryptophan, Glycine), -2.);
    }

    #[test]
    fn builder_is_symmetric() {
        use crate::Nucleotide::*;
        let m = ScoringMatrix::<crate::Nucleotide>::builder(-3.)
            .ambiguity_score(-1.)
            .match_score(2.)
            .set(A, G, -2.)
            .build();
        assert_eq!(m.score(A, A), 2.);
        assert_eq!(m.score(N, N), 2.);
        assert_eq!(m.score(A, C), -3.);
        assert_eq!(m.score(A, G), -2.);
        assert_eq!(m.score(G, A), -2.);
        assert_eq!(m.score(A, R), -1.);
        assert_eq!(m.score(R, A), -1.);
        assert_eq!(m.score(R, Y), -3.);
        assert_eq!(m.score(Gap, Gap), -3.);
        m.check_symmetric().unwrap();
    }

    #[test]
    fn rejects_asymmetric_text() {
        let text = "  A C\nA 1 2\nC 3 1\n";
        let err = ScoringMatrix::<crate::Nucleotide>::from_ncbi(text, 0.).unwrap_err();
        assert!(matches!(err, ParseError::AsymmetricMatrix { .. }), "{err}");
    }

    #[test]
    fn rejects_ragged_rows() {
        let text = "  A C\nA 1\n";
        let err = ScoringMatrix::<crate::Nucleotide>::from_ncbi(text, 0.).unwrap_err();
        assert!(matches!(err, ParseError::MatrixFormat { line: 2, .. }), "{err}");
    }

    #[test]
    fn rejects_unknown_symbol() {
        let text = "  A J\nA 1 0\nJ 0 1\n";
        assert!(ScoringMatrix::<crate::Nucleotide>::from_ncbi(text, 0.).is_err());
    }
}
