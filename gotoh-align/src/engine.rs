//! The affine-gap DP fill.
//!
//! Only two rows of scores and two rows of "inside a vertical gap" bits are
//! kept; the full `(m+1) x (n+1)` grid exists only as a packed
//! `TracebackMatrix`.
use std::{marker::PhantomData, mem};

use bitvec::prelude::*;
use gotoh_types::*;
use log::debug;

use crate::{
    direction::{Direction, StartPoint, WalkBack},
    strategy::Strategy,
    traceback_matrix::TracebackMatrix,
};

/// An alignment problem, ready to be filled.
#[derive(Debug)]
pub struct Engine<R: Residue, S: Strategy> {
    query: Vec<u8>,
    subject: Vec<u8>,
    /// `alphabet_size^2` scores indexed by `a * alphabet_size + b`.
    scores: Vec<Score>,
    gaps: GapPenalties,
    strategy: S,
    _residue: PhantomData<R>,
}

/// The result of `Engine::fill`: everything the traceback needs.
#[derive(Debug, Clone)]
pub struct FilledMatrix<R: Residue> {
    pub(crate) query: Vec<u8>,
    pub(crate) subject: Vec<u8>,
    pub(crate) matrix: TracebackMatrix,
    pub(crate) start: StartPoint,
    pub(crate) _residue: PhantomData<R>,
}

impl<R: Residue, S: Strategy> Engine<R, S> {
    /// Gaps in `query` and `subject` are dropped.
    pub fn new<Q, T, M>(
        query: &Q,
        subject: &T,
        matrix: &M,
        gaps: GapPenalties,
        strategy: S,
    ) -> Result<Self, AlignError>
    where
        Q: ResidueSequence<R> + ?Sized,
        T: ResidueSequence<R> + ?Sized,
        M: SubstitutionMatrix<R> + ?Sized,
    {
        gaps.validate()?;
        check_border::<S>("row", strategy.initial_row_direction(), Direction::Horizontal)?;
        check_border::<S>("column", strategy.initial_col_direction(), Direction::Vertical)?;

        let scores = R::ALPHABET
            .iter()
            .flat_map(|&a| R::ALPHABET.iter().map(move |&b| matrix.score(a, b)))
            .collect();

        Ok(Self {
            query: query.ungapped_ordinals(),
            subject: subject.ungapped_ordinals(),
            scores,
            gaps,
            strategy,
            _residue: PhantomData,
        })
    }

    pub fn query_len(&self) -> usize {
        self.query.len()
    }

    pub fn subject_len(&self) -> usize {
        self.subject.len()
    }

    /// Run the recurrence over all cells and pick the start point.
    pub fn fill(self) -> FilledMatrix<R> {
        let (m, n) = (self.query.len(), self.subject.len());
        let size = alphabet_size::<R>();
        let gaps = self.gaps;
        let strategy = &self.strategy;

        let mut matrix = TracebackMatrix::new(
            m + 1,
            n + 1,
            strategy.initial_row_direction(),
            strategy.initial_col_direction(),
        );
        let row0 = strategy.initial_gap_scores(n, gaps);
        let col0 = strategy.initial_gap_scores(m, gaps);
        let mut start = strategy.initial_start_point(m, n, &row0, &col0);

        let mut prev = row0;
        let mut cur = vec![0.; n + 1];
        // Bit `j` is set when the cell in column `j` ended in a vertical gap.
        // Row 0 is never inside a vertical gap.
        let mut prev_vgap = bitvec![0; n + 1];
        let mut cur_vgap = bitvec![0; n + 1];

        for i in 1..=m {
            let sub = &self.scores[self.query[i - 1] as usize * size..][..size];
            cur[0] = col0[i];
            let mut in_hgap = false;

            for j in 1..=n {
                let diagonal = prev[j - 1] + sub[self.subject[j - 1] as usize];
                let vertical = gap_score(prev[j], prev_vgap[j], gaps);
                let horizontal = gap_score(cur[j - 1], in_hgap, gaps);

                let WalkBack { score, direction } =
                    strategy.best_walk_back(diagonal, horizontal, vertical);
                matrix.set(i, j, direction);
                cur[j] = score;
                cur_vgap.set(j, direction == Direction::Vertical);
                in_hgap = direction == Direction::Horizontal;

                strategy.update_start_point(&mut start, i, j, score);
            }

            mem::swap(&mut prev, &mut cur);
            mem::swap(&mut prev_vgap, &mut cur_vgap);
        }

        debug!(
            "{} fill of {}x{}: start at ({}, {}) with score {} ({} bytes of traceback)",
            S::NAME,
            m,
            n,
            start.row,
            start.col,
            start.score,
            matrix.byte_len()
        );

        FilledMatrix {
            query: self.query,
            subject: self.subject,
            matrix,
            start,
            _residue: PhantomData,
        }
    }
}

/// Best score of entering a cell through a gap from a neighbour with score
/// `from`: either open a new run, or extend the run the neighbour is in.
#[inline]
fn gap_score(from: Score, in_gap: bool, gaps: GapPenalties) -> Score {
    let extend = if in_gap {
        from + gaps.extend
    } else {
        Score::NEG_INFINITY
    };
    (from + gaps.open).max(extend)
}

fn check_border<S: Strategy>(
    border: &'static str,
    direction: Direction,
    gap_direction: Direction,
) -> Result<(), AlignError> {
    if direction == Direction::Terminal || direction == gap_direction {
        Ok(())
    } else {
        Err(AlignError::InvalidBorderDirection {
            strategy: S::NAME,
            border,
            direction: direction.name(),
        })
    }
}

impl<R: Residue> FilledMatrix<R> {
    pub fn start_point(&self) -> StartPoint {
        self.start
    }

    pub fn matrix(&self) -> &TracebackMatrix {
        &self.matrix
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::strategy::{Global, Local};

    fn dna(s: &str) -> NucleotideSequence {
        s.parse().unwrap()
    }

    /// A strategy that puts diagonal steps on the border.
    #[derive(Debug)]
    struct BrokenBorder;

    impl Strategy for BrokenBorder {
        const NAME: &'static str = "broken";
        fn initial_row_direction(&self) -> Direction {
            Direction::Diagonal
        }
        fn initial_col_direction(&self) -> Direction {
            Direction::Vertical
        }
        fn initial_gap_scores(&self, len: usize, gaps: GapPenalties) -> Vec<Score> {
            Global.initial_gap_scores(len, gaps)
        }
        fn best_walk_back(&self, d: Score, h: Score, v: Score) -> WalkBack {
            Global.best_walk_back(d, h, v)
        }
        fn initial_start_point(&self, m: usize, n: usize, r: &[Score], c: &[Score]) -> StartPoint {
            Global.initial_start_point(m, n, r, c)
        }
        fn update_start_point(&self, s: &mut StartPoint, row: usize, col: usize, score: Score) {
            Global.update_start_point(s, row, col, score)
        }
    }

    #[test]
    fn rejects_invalid_border() {
        let m = ScoringMatrix::<Nucleotide>::nucleotide(1., -1.);
        let err = Engine::new(&dna("A"), &dna("A"), &m, GapPenalties::default(), BrokenBorder)
            .unwrap_err();
        assert_eq!(
            err,
            AlignError::InvalidBorderDirection {
                strategy: "broken",
                border: "row",
                direction: "diagonal",
            }
        );
    }

    #[test]
    fn rejects_nan_gap() {
        let m = ScoringMatrix::<Nucleotide>::nucleotide(1., -1.);
        let gaps = GapPenalties::new(Score::NAN, -1.);
        assert!(Engine::new(&dna("A"), &dna("A"), &m, gaps, Local).is_err());
    }

    #[test]
    fn strips_gaps() {
        let m = ScoringMatrix::<Nucleotide>::nucleotide(1., -1.);
        let e = Engine::new(&dna("A-C--G"), &dna("-T"), &m, GapPenalties::default(), Global)
            .unwrap();
        assert_eq!((e.query_len(), e.subject_len()), (3, 1));
    }

    #[test]
    fn score_table_by_ordinal() {
        let m = ScoringMatrix::<Nucleotide>::nucleotide(2., -1.);
        let e = Engine::new(&dna("A"), &dna("C"), &m, GapPenalties::default(), Local).unwrap();
        let size = alphabet_size::<Nucleotide>();
        assert_eq!(size, 16);
        assert_eq!(e.scores.len(), size * size);
        let (a, c) = (Nucleotide::A.ordinal() as usize, Nucleotide::C.ordinal() as usize);
        assert_eq!(e.scores[a * size + a], 2.);
        assert_eq!(e.scores[a * size + c], -1.);
    }

    #[test]
    fn fill_directions() {
        // ACGT against itself: the diagonal wins everywhere on it.
        let m = ScoringMatrix::<Nucleotide>::nucleotide(1., -1.);
        let s = dna("ACGT");
        let filled = Engine::new(&s, &s, &m, GapPenalties::default(), Global)
            .unwrap()
            .fill();
        for i in 1..=4 {
            assert_eq!(filled.matrix().get(i, i), Direction::Diagonal);
        }
        assert_eq!(filled.matrix().get(0, 3), Direction::Horizontal);
        assert_eq!(filled.matrix().get(3, 0), Direction::Vertical);
        assert_eq!(
            filled.start_point(),
            StartPoint {
                row: 4,
                col: 4,
                score: 4.
            }
        );
    }

    #[test]
    fn local_start_is_first_best() {
        let m = ScoringMatrix::<Nucleotide>::nucleotide(1., -1.);
        let filled = Engine::new(&dna("AAAA"), &dna("AA"), &m, GapPenalties::default(), Local)
            .unwrap()
            .fill();
        assert_eq!(
            filled.start_point(),
            StartPoint {
                row: 2,
                col: 2,
                score: 2.
            }
        );
    }

    #[test]
    fn empty_sides() {
        let m = ScoringMatrix::<Nucleotide>::nucleotide(1., -1.);
        let gaps = GapPenalties::default();
        let filled = Engine::new(&dna(""), &dna("AAA"), &m, gaps, Global)
            .unwrap()
            .fill();
        assert_eq!(
            filled.start_point(),
            StartPoint {
                row: 0,
                col: 3,
                score: -4.
            }
        );
        let filled = Engine::new(&dna("AAA"), &dna(""), &m, gaps, Local)
            .unwrap()
            .fill();
        assert_eq!(filled.start_point().score, 0.);
        let filled = Engine::new(&dna(""), &dna(""), &m, gaps, Global)
            .unwrap()
            .fill();
        assert_eq!(
            filled.start_point(),
            StartPoint {
                row: 0,
                col: 0,
                score: 0.
            }
        );
    }
}
