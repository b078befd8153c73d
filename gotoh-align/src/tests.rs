use gotoh_test::*;
use gotoh_types::*;

use crate::*;

fn dna(s: &str) -> Vec<Nucleotide> {
    s.parse::<NucleotideSequence>().unwrap().into_residues()
}

fn protein(s: &str) -> Vec<AminoAcid> {
    s.parse::<ProteinSequence>().unwrap().into_residues()
}

fn simple(match_score: Score, mismatch: Score) -> ScoringMatrix<Nucleotide> {
    ScoringMatrix::nucleotide(match_score, mismatch)
}

macro_rules! test_functions_macro {
    () => {
        #[test]
        fn unit_scores() {
            // match=1, mismatch=-1, open=-2, extend=-1
            test(simple(1., -1.), GapPenalties::default());
        }

        #[test]
        fn linear_gaps() {
            // every gap position costs 1
            test(simple(1., -1.), GapPenalties::linear(-1.));
        }

        #[test]
        fn affine_gaps() {
            test(simple(2., -1.), GapPenalties::new(-3., -1.));
        }

        #[test]
        fn expensive_mismatch() {
            test(simple(2., -3.), GapPenalties::new(-5., -2.));
        }

        #[test]
        fn self_alignment() {
            test_self_alignment(PairwiseAligner::new(
                simple(1., -1.),
                GapPenalties::default(),
                MODE,
            ));
            test_self_alignment(PairwiseAligner::new(
                blosum62(),
                GapPenalties::new(-11., -1.),
                MODE,
            ));
        }

        #[test]
        fn blosum62_proteins() {
            test_aligner(
                PairwiseAligner::new(blosum62(), GapPenalties::new(-11., -1.), MODE),
                Checks::default(),
            );
        }
    };
}

mod global {
    use super::*;

    const MODE: AlignmentMode = AlignmentMode::Global;

    fn test(matrix: ScoringMatrix<Nucleotide>, gaps: GapPenalties) {
        test_aligner(PairwiseAligner::new(matrix, gaps, MODE), Checks::default());
    }

    test_functions_macro!();
}

mod local {
    use super::*;

    const MODE: AlignmentMode = AlignmentMode::Local;

    fn test(matrix: ScoringMatrix<Nucleotide>, gaps: GapPenalties) {
        test_aligner(PairwiseAligner::new(matrix, gaps, MODE), Checks::default());
    }

    test_functions_macro!();
}

#[test]
fn identical_global() {
    let aln = align(
        &dna("ACGT"),
        &dna("ACGT"),
        &simple(1., -1.),
        GapPenalties::new(-2., -1.),
        AlignmentMode::Global,
    )
    .unwrap();
    assert_eq!(aln.query_string(), "ACGT");
    assert_eq!(aln.subject_string(), "ACGT");
    assert_eq!(aln.score, 4.);
    assert_eq!(aln.mismatches, 0);
    assert_eq!(aln.gap_openings, 0);
    assert_eq!(aln.percent_identity(), 100.);
}

#[test]
fn local_is_not_forced_global() {
    let aln = align(
        &dna("AAAA"),
        &dna("AA"),
        &simple(1., -1.),
        GapPenalties::new(-2., -1.),
        AlignmentMode::Local,
    )
    .unwrap();
    assert_eq!(aln.query_string(), "AA");
    assert_eq!(aln.subject_string(), "AA");
    assert_eq!(aln.score, 2.);
    assert_eq!(aln.query_range, DirectedRange::new(0, 2));
    assert_eq!(aln.gap_openings, 0);
}

#[test]
fn gattaca() {
    let matrix = simple(1., -1.);
    let aln = align(
        &dna("GATTACA"),
        &dna("GCATGCU"),
        &matrix,
        GapPenalties::linear(-1.),
        AlignmentMode::Global,
    )
    .unwrap();
    assert_eq!(aln.score, 0.);
    assert_eq!(aln.query_string(), "G-ATTACA");
    assert_eq!(aln.subject_string(), "GCA-TGCT");

    let swapped = align(
        &dna("GCATGCU"),
        &dna("GATTACA"),
        &matrix,
        GapPenalties::linear(-1.),
        AlignmentMode::Global,
    )
    .unwrap();
    assert_eq!(swapped.score, 0.);
}

#[test]
fn gap_run_is_affine() {
    // A single forced deletion of 4 residues costs open + 3 * extend.
    let gaps = GapPenalties::new(-3., -1.);
    let aln = align(
        &dna("ACGTTTTTACGT"),
        &dna("ACGTACGT"),
        &simple(2., -1.),
        gaps,
        AlignmentMode::Global,
    )
    .unwrap();
    assert_eq!(aln.gap_openings, 1);
    assert_eq!(aln.cigar.count(CigarOp::Del), 4);
    assert_eq!(aln.score, 8. * 2. + gaps.gap_cost(4));
    assert_eq!(aln.score, 10.);
    assert_eq!(aln.subject_string(), "ACG----TACGT");
}

#[test]
fn no_positive_local_hit() {
    let aln = align(
        &dna("AAA"),
        &dna("CCC"),
        &simple(1., -1.),
        GapPenalties::default(),
        AlignmentMode::Local,
    )
    .unwrap();
    assert!(aln.is_empty());
    assert_eq!(aln.score, 0.);
    assert_eq!(aln.query_range, DirectedRange::new(0, 0));
}

#[test]
fn empty_inputs() {
    let m = simple(1., -1.);
    let gaps = GapPenalties::default();
    let aln = align(&dna(""), &dna("AAA"), &m, gaps, AlignmentMode::Global).unwrap();
    assert_eq!(aln.query_string(), "---");
    assert_eq!(aln.score, -4.);
    let aln = align(&dna(""), &dna(""), &m, gaps, AlignmentMode::Global).unwrap();
    assert!(aln.is_empty());
    let aln = align(&dna("ACGT"), &dna(""), &m, gaps, AlignmentMode::Local).unwrap();
    assert!(aln.is_empty());
}

#[test]
fn input_gaps_are_ignored() {
    let m = simple(1., -1.);
    let gaps = GapPenalties::default();
    let plain = align(&dna("ACGT"), &dna("AGT"), &m, gaps, AlignmentMode::Global).unwrap();
    let gapped = align(&dna("A-CG-T"), &dna("--AGT"), &m, gaps, AlignmentMode::Global).unwrap();
    assert_eq!(plain, gapped);
}

#[test]
fn traceback_is_idempotent() {
    let m = simple(2., -1.);
    let q = dna("TTGGGTCAATCAGCCAGTTTTTA");
    let s = dna("TTTGAGTGGGTCATCACCGATTTTAT");
    for mode in [AlignmentMode::Global, AlignmentMode::Local] {
        let filled = match mode {
            AlignmentMode::Global => Engine::new(&q, &s, &m, GapPenalties::default(), Global)
                .unwrap()
                .fill(),
            AlignmentMode::Local => Engine::new(&q, &s, &m, GapPenalties::default(), Local)
                .unwrap()
                .fill(),
        };
        let first = filled.traceback();
        let second = filled.traceback();
        assert_eq!(first.query_string(), second.query_string());
        assert_eq!(first.subject_string(), second.subject_string());
        assert_eq!(first, second);
    }
}

#[test]
fn reverse_strand() {
    let m = simple(1., -1.);
    let gaps = GapPenalties::default();
    // The subject contains the reverse complement of the query at 3..9.
    let query = dna("AACGTG");
    let subject = dna("TTTCACGTTTT");
    let aln = align_both_strands(&query, &subject, &m, gaps, AlignmentMode::Local).unwrap();
    assert_eq!(aln.score, 6.);
    assert_eq!(aln.subject_range.strand, Strand::Reverse);
    assert_eq!((aln.subject_range.start, aln.subject_range.end), (3, 9));
    assert_eq!(aln.subject_string(), "AACGTG");

    let forward =
        align_both_strands(&query, &dna("GGAACGTGGG"), &m, gaps, AlignmentMode::Local).unwrap();
    assert_eq!(forward.subject_range.strand, Strand::Forward);
    assert_eq!(forward.score, 6.);
}

#[test]
fn protein_local() {
    let aln = align(
        &protein("MKTAYIAKQRQISFVKSHFSRQ"),
        &protein("GGGAYIAKQRQGGG"),
        blosum62(),
        GapPenalties::new(-11., -1.),
        AlignmentMode::Local,
    )
    .unwrap();
    assert_eq!(aln.query_string(), "AYIAKQRQ");
    assert_eq!(aln.subject_string(), "AYIAKQRQ");
    assert_eq!(aln.query_range, DirectedRange::new(3, 11));
    assert_eq!(aln.subject_range, DirectedRange::new(3, 11));
}

#[test]
fn params_serde() {
    let params: AlignerParams =
        serde_json::from_str(r#"{"mode": "global", "gaps": {"open": -5.0, "extend": -0.5}}"#)
            .unwrap();
    assert_eq!(params.mode, AlignmentMode::Global);
    assert_eq!(params.gaps, GapPenalties::new(-5., -0.5));
    let defaults: AlignerParams = serde_json::from_str("{}").unwrap();
    assert_eq!(defaults, AlignerParams::default());
    assert!(serde_json::from_str::<AlignerParams>(r#"{"gap": 1}"#).is_err());
}
