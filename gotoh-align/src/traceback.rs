use gotoh_types::{DirectedRange, PairwiseAlignment, Residue};
use log::trace;

use crate::{
    direction::{Direction, StartPoint},
    engine::FilledMatrix,
};

impl<R: Residue> FilledMatrix<R> {
    /// Walk back from the start point to the first `Terminal` cell.
    ///
    /// The matrix is not modified, so repeated calls give identical results.
    pub fn traceback(&self) -> PairwiseAlignment<R> {
        let StartPoint { row, col, score } = self.start;
        let (mut x, mut y) = (row, col);
        let mut query = vec![];
        let mut subject = vec![];

        loop {
            match self.matrix.get(x, y) {
                Direction::Terminal => break,
                Direction::Diagonal => {
                    query.push(R::from_ordinal(self.query[x - 1]));
                    subject.push(R::from_ordinal(self.subject[y - 1]));
                    x -= 1;
                    y -= 1;
                }
                Direction::Horizontal => {
                    query.push(R::GAP);
                    subject.push(R::from_ordinal(self.subject[y - 1]));
                    y -= 1;
                }
                Direction::Vertical => {
                    query.push(R::from_ordinal(self.query[x - 1]));
                    subject.push(R::GAP);
                    x -= 1;
                }
            }
        }
        query.reverse();
        subject.reverse();

        trace!(
            "traceback from ({row}, {col}) to ({x}, {y}): {} columns",
            query.len()
        );

        PairwiseAlignment::new(
            query,
            subject,
            score,
            DirectedRange::new(x, row),
            DirectedRange::new(y, col),
        )
    }
}
