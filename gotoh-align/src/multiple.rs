//! Repeated local alignment: find a hit, then search the subject on both
//! sides of it.
use std::marker::PhantomData;

use gotoh_types::*;
use log::debug;

use crate::{engine::Engine, strategy::Local};

/// All disjoint local alignments of `query` in `subject`, best first.
///
/// After each hit the subject parts before and after it are searched again,
/// until a part is shorter than the query or contains no positive hit.
/// Subject ranges are in ungapped coordinates of the full `subject`. Hits with
/// equal scores keep the order in which they were found.
pub fn align_multiple_local<R, M>(
    query: &[R],
    subject: &[R],
    matrix: &M,
    gaps: GapPenalties,
) -> Result<Vec<PairwiseAlignment<R>>, AlignError>
where
    R: Residue,
    M: SubstitutionMatrix<R> + ?Sized,
{
    gaps.validate()?;
    let query = query.ungapped();
    let subject = subject.ungapped();

    let mut hits = vec![];
    // (offset, fragment) pairs; popped in the order a recursive search
    // before-then-after would visit them.
    let mut todo = vec![(0, subject.as_slice())];
    while let Some((offset, fragment)) = todo.pop() {
        if fragment.len() < query.len() {
            continue;
        }
        let mut hit = Engine::new(&query, fragment, matrix, gaps, Local)?
            .fill()
            .traceback();
        if hit.is_empty() {
            continue;
        }
        let DirectedRange { start, end, .. } = hit.subject_range;
        hit.subject_range = hit.subject_range.shifted(offset);
        debug!(
            "local hit {} at subject {}..{} with score {}",
            hits.len(),
            hit.subject_range.start,
            hit.subject_range.end,
            hit.score
        );
        hits.push(hit);

        todo.push((offset + end, &fragment[end..]));
        todo.push((offset, &fragment[..start]));
    }

    hits.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(hits)
}

/// Repeated local alignment that only reports hits scoring at least
/// `min_score`.
#[derive(Debug, Clone)]
pub struct MultipleLocalAligner<R: Residue, M> {
    pub gaps: GapPenalties,
    pub min_score: Score,
    matrix: M,
    _residue: PhantomData<R>,
}

impl<R: Residue, M: SubstitutionMatrix<R>> MultipleLocalAligner<R, M> {
    pub fn new(matrix: M, gaps: GapPenalties, min_score: Score) -> Self {
        Self {
            gaps,
            min_score,
            matrix,
            _residue: PhantomData,
        }
    }

    pub fn align(
        &self,
        query: &[R],
        subject: &[R],
    ) -> Result<Vec<PairwiseAlignment<R>>, AlignError> {
        let mut hits = align_multiple_local(query, subject, &self.matrix, self.gaps)?;
        hits.retain(|hit| hit.score >= self.min_score);
        Ok(hits)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn dna(s: &str) -> Vec<Nucleotide> {
        s.parse::<NucleotideSequence>().unwrap().into_residues()
    }

    #[test]
    fn finds_every_copy() {
        let m = ScoringMatrix::<Nucleotide>::nucleotide(1., -3.);
        let gaps = GapPenalties::new(-5., -2.);
        let query = dna("ACGTACGT");
        let subject = dna("ACGTACGTTTTTTTTTTTTTACGAACGTGGGGACGTACGT");
        let hits = align_multiple_local(&query, &subject, &m, gaps).unwrap();

        let ranges: Vec<_> = hits
            .iter()
            .map(|h| (h.subject_range.start, h.subject_range.end, h.score))
            .collect();
        assert_eq!(ranges[0], (0, 8, 8.));
        assert_eq!(ranges[1], (32, 40, 8.));
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
        for (i, a) in hits.iter().enumerate() {
            for b in &hits[i + 1..] {
                assert!(!a.subject_range.overlaps(&b.subject_range));
            }
            let r = a.subject_range;
            let q = a.query_range;
            assert_eq!(
                a.cigar.verify(&m, gaps, &query[q.start..q.end], &subject[r.start..r.end]),
                a.score
            );
        }
    }

    #[test]
    fn min_score_filter() {
        let m = ScoringMatrix::<Nucleotide>::nucleotide(1., -3.);
        let aligner = MultipleLocalAligner::new(m, GapPenalties::new(-5., -2.), 6.);
        let hits = aligner
            .align(&dna("ACGTACGT"), &dna("ACGTACGTTTTTTTTTTTTTACGAACGTGGGGACGTACGT"))
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.score >= 6.));
    }

    #[test]
    fn short_subject() {
        let m = ScoringMatrix::<Nucleotide>::nucleotide(1., -1.);
        let hits =
            align_multiple_local(&dna("ACGT"), &dna("ACG"), &m, GapPenalties::default()).unwrap();
        assert!(hits.is_empty());
    }
}
