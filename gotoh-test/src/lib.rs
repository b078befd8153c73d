use itertools::Itertools;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use gotoh_types::*;

pub fn test_sequences() -> Vec<(&'static str, &'static str)> {
    vec![
        ("GATTACA", "GCATGCU"),
        ("ACGTTTTTACGT", "ACGTACGT"),
        ("TTGGGTCAATCAGCCAGTTTTTA", "TTTGAGTGGGTCATCACCGATTTTAT"),
        ("ACTGACCAGT", "CCGACAGGA"),
        ("AGTTTTAT", "ACCGATTTTTA"),
        ("CTCTCTTCTCTCTCTA", "CCTCTCTCTCTCCTCTC"),
        ("AGTGGGTTGCCTTCATTCCG", "AGTGGTGTCTTCAGGCCTTCATTCCG"),
        ("GCACGTCGCCCCCCGCCCGCG", "GCCCGCCCGCCCGCCCCCGCCCCC"),
        ("A", ""),
        ("", ""),
        ("CGCGTGTATCCGTCCACATCGAGCCGCCCTTGTTGCTTTTCGAGCGCTCATTTCCCGCAAGAGTGGCGTGCGGTCACTTTCGCGCAGCAATTAGAGTACTAACGGGTAGACGTGGCTTTCCTCCTCGTCCTGTCAACGCGCATAGGATGTCCTGCAGCAGGCCGCCGCGATTGCCTAAATCAAGGGGTTCCAATGGAGTTTCCATCTGATATCCGCGCTCCGGTTCTGAGTCTAAAGTGGAAATACTCCGAATGGGCCGGTATGAGGTTGGGTCAATCAGCCAGTTTTTA",
         "CGCTGGGGATGCCTCCACCTTTCGAGTGCCTGTTGGTTCCGACGCTATCATAGTCCCCATGCAAGGAGATGGCTGCGCGTCCTATCGCGCGGCAAATAGAGTCTACGGGGGCGGCTGTCCTCCTCGTCCTGGTCAACGGCCATAGGATTTCCGCGATGGTCGCCCGGATGTGCCTAAACCAAGGCTCCGATGGAGCTGCCTCTGATATCCGCGCTGCCGGTTTCCTGACGTCTGAAAACGTTGGAAAATACCTCCGAATGGGCCCCGTTTGAGTGGGTCATCACCGATTTTAT"),
    ]
}

/// The residues a random sequence is drawn from: everything that is neither
/// a gap nor an ambiguity code.
pub fn plain_residues<R: Residue>() -> Vec<R> {
    R::ALPHABET
        .iter()
        .copied()
        .filter(|r| !r.is_gap() && !r.is_ambiguous())
        .collect()
}

/// A random sequence of length `n` and a copy of it with `round(e * n)`
/// random substitutions, insertions and deletions.
pub fn generate_pair<R: Residue>(n: usize, e: f32, rng: &mut impl Rng) -> (Vec<R>, Vec<R>) {
    let alphabet = plain_residues::<R>();
    let pick = |rng: &mut dyn rand::RngCore| alphabet[rng.gen_range(0..alphabet.len())];
    let a: Vec<R> = (0..n).map(|_| pick(&mut *rng)).collect();
    let mut b = a.clone();
    let edits = (e * n as f32).round() as usize;
    for _ in 0..edits {
        match rng.gen_range(0..3) {
            0 if !b.is_empty() => {
                let i = rng.gen_range(0..b.len());
                b[i] = pick(&mut *rng);
            }
            1 => {
                let i = rng.gen_range(0..=b.len());
                b.insert(i, pick(&mut *rng));
            }
            _ if !b.is_empty() => {
                let i = rng.gen_range(0..b.len());
                b.remove(i);
            }
            _ => {}
        }
    }
    (a, b)
}

/// Random pairs over a grid of lengths and error rates, each generated from
/// its own seed so that failures can be reproduced in isolation.
pub fn gen_seqs<R: Residue>() -> impl Iterator<Item = ((Vec<R>, Vec<R>), (usize, f32, u64))> {
    let ns = [
        0usize, 1, 2, 3, 4, 5, 7, 10, 16, 20, 31, 50, 64, 100, 128, 200,
    ];
    let es = [0.0f32, 0.01, 0.05, 0.10, 0.20, 0.50, 1.0];
    let seeds = [31415u64, 2718];
    ns.into_iter()
        .cartesian_product(es)
        .cartesian_product(seeds)
        .map(|((n, e), seed)| {
            let rng = &mut ChaCha8Rng::seed_from_u64(seed ^ (n as u64) << 8 ^ e.to_bits() as u64);
            (generate_pair(n, e, rng), (n, e, seed))
        })
}

/// Which properties to check besides the ones every aligner satisfies.
#[derive(Clone, Copy, Debug)]
pub struct Checks {
    /// Swapping query and subject keeps the score.
    pub symmetry: bool,
}

impl Default for Checks {
    fn default() -> Self {
        Self { symmetry: true }
    }
}

/// Align one pair and check:
/// - the gapped rows spell the aligned ranges of the inputs,
/// - re-scoring the cigar gives the reported score, for `open <= extend`,
/// - global alignments span both inputs, local scores are non-negative,
/// - aligning twice gives the same result,
/// - and, when enabled, the score is symmetric.
pub fn test_aligner_on_input<R: Residue>(
    query: &[R],
    subject: &[R],
    aligner: &impl Aligner<R>,
    checks: Checks,
    params: &str,
) -> PairwiseAlignment<R> {
    // useful in case of panics inside the alignment code.
    eprintln!("{params}");
    let context = format!(
        "\n{params}\nquery   {}\nsubject {}\naligner {aligner:?}",
        residues_to_string(query),
        residues_to_string(subject),
    );

    let aln = aligner.align(query, subject).expect("valid aligner");
    let (query, subject) = (query.ungapped(), subject.ungapped());
    let (q, s) = (aln.query_range, aln.subject_range);

    assert_eq!(aln.query.len(), aln.subject.len(), "{context}");
    assert_eq!(aln.length, aln.query.len(), "{context}");
    assert_eq!(aln.query.ungapped(), &query[q.start..q.end], "{context}");
    assert_eq!(aln.subject.ungapped(), &subject[s.start..s.end], "{context}");
    assert_eq!(aln.cigar.lengths(), (q.len(), s.len()), "{context}");
    let gap_columns = aln.cigar.count(CigarOp::Ins) + aln.cigar.count(CigarOp::Del);
    assert_eq!(aln.matches + aln.mismatches + gap_columns, aln.length, "{context}");

    let gaps = aligner.gap_penalties();
    if gaps.open <= gaps.extend {
        let rescored = aln.cigar.verify(
            aligner.matrix(),
            gaps,
            &query[q.start..q.end],
            &subject[s.start..s.end],
        );
        assert_eq!(rescored, aln.score, "cigar {}{context}", aln.cigar);
    }

    match aligner.mode() {
        AlignmentMode::Global => {
            assert_eq!((q.start, q.end), (0, query.len()), "{context}");
            assert_eq!((s.start, s.end), (0, subject.len()), "{context}");
            assert!(aln.length >= query.len().max(subject.len()), "{context}");
        }
        AlignmentMode::Local => {
            assert!(aln.score >= 0., "{context}");
            if aln.is_empty() {
                assert_eq!(aln.score, 0., "{context}");
            }
        }
    }

    let again = aligner.align(&query, &subject).expect("valid aligner");
    assert_eq!(again, aln, "alignment is not reproducible{context}");

    if checks.symmetry {
        let swapped = aligner.align(&subject, &query).expect("valid aligner");
        assert_eq!(swapped.score, aln.score, "score is not symmetric{context}");
    }

    aln
}

/// Run all checks of `test_aligner_on_input` on the hardcoded pairs and on a
/// grid of random pairs.
pub fn test_aligner<R: Residue>(aligner: impl Aligner<R>, checks: Checks) {
    test_aligner_up_to(aligner, checks, usize::MAX);
}

/// As test_aligner, but only test random sequences with n <= max_n.
pub fn test_aligner_up_to<R: Residue>(aligner: impl Aligner<R>, checks: Checks, max_n: usize) {
    for (a, b) in test_sequences() {
        let (Some(a), Some(b)) = (parse::<R>(a), parse::<R>(b)) else {
            continue;
        };
        test_aligner_on_input(
            &a,
            &b,
            &aligner,
            checks,
            &format!(
                "hardcoded test_sequences: a {} b {}",
                residues_to_string(&a),
                residues_to_string(&b)
            ),
        );
    }
    for ((a, b), (n, e, seed)) in gen_seqs::<R>() {
        if n > max_n {
            continue;
        }
        test_aligner_on_input(
            &a,
            &b,
            &aligner,
            checks,
            &format!("seed {seed:>10} n {n:>5} e {e:>.2}"),
        );
    }
}

/// Self-alignment with positive matches and non-positive mismatches and gaps
/// is a perfect match in both modes.
pub fn test_self_alignment<R: Residue>(aligner: impl Aligner<R>) {
    let rng = &mut ChaCha8Rng::seed_from_u64(42);
    for n in [1, 2, 5, 17, 100] {
        let (a, _) = generate_pair::<R>(n, 0., rng);
        let aln = aligner.align(&a, &a).expect("valid aligner");
        let expected: Score = a.iter().map(|&r| aligner.matrix().score(r, r)).sum();
        assert_eq!(aln.score, expected, "n {n}");
        assert_eq!(aln.query, a);
        assert_eq!(aln.subject, a);
        assert_eq!(aln.mismatches, 0);
        assert_eq!(aln.gap_openings, 0);
        assert_eq!(aln.percent_identity(), 100.);
    }
}

fn parse<R: Residue>(s: &str) -> Option<Vec<R>> {
    s.parse::<Sequence<R>>().ok().map(Sequence::into_residues)
}
