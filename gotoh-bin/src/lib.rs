use std::{
    error::Error,
    fs::File,
    io::{BufRead, BufReader},
    ops::ControlFlow,
    path::PathBuf,
};

use bio::io::fasta;
use clap::{value_parser, Parser};
use derive_more::AddAssign;
use gotoh_align::{cli::AlignerArgs, AlignerParams};
use gotoh_types::*;
use itertools::Itertools;
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

pub type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(clap::ValueEnum, Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Alphabet {
    #[default]
    Dna,
    Protein,
}

#[derive(clap::ValueEnum, Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatrixType {
    /// BLOSUM62, for proteins only.
    Blosum62,
    /// `--match` on identical residues, `--mismatch` elsewhere.
    #[default]
    Simple,
}

#[derive(clap::Args, Debug, Clone, Serialize, Deserialize)]
pub struct GenerateArgs {
    /// Length of generated sequences.
    #[clap(short = 'n', long)]
    pub length: Option<usize>,

    /// Relative number of edits between a generated pair.
    #[clap(short, long, default_value_t = 0.1)]
    pub error_rate: f32,

    /// Number of generated pairs.
    #[clap(short = 'x', long, default_value_t = 1, hide_short_help = true)]
    pub cnt: usize,

    /// Seed for the generator. Random when not set.
    #[clap(long, hide_short_help = true)]
    pub seed: Option<u64>,
}

/// Align pairs of sequences with affine gap penalties.
#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[clap(author, about, disable_version_flag(true))]
#[clap(group(
    clap::ArgGroup::new("input_type")
        .required(true)
        .args(&["input", "length"]),
))]
pub struct Cli {
    /// A .seq, .txt, or Fasta file with sequence pairs to align, or a directory of them.
    #[clap(short, long, value_parser = value_parser!(PathBuf), display_order = 1)]
    pub input: Option<PathBuf>,

    /// Write one JSON record per alignment.
    #[clap(short, long, value_parser = value_parser!(PathBuf), display_order = 1)]
    pub output: Option<PathBuf>,

    /// Read aligner parameters from a JSON file instead of the flags below.
    #[clap(long, value_parser = value_parser!(PathBuf))]
    pub params: Option<PathBuf>,

    #[clap(long, value_enum, default_value_t)]
    pub alphabet: Alphabet,

    #[clap(long, value_enum, default_value_t)]
    pub matrix: MatrixType,

    /// Score of identical residues for the simple matrix.
    #[clap(long = "match", default_value_t = 1., allow_negative_numbers = true)]
    pub match_score: Score,

    /// Score of distinct residues for the simple matrix.
    #[clap(long, default_value_t = -1., allow_negative_numbers = true)]
    pub mismatch: Score,

    #[clap(flatten)]
    pub aligner: AlignerArgs,

    /// Report all disjoint local alignments of each pair.
    #[clap(long, help_heading = "Multiple local alignment")]
    pub multiple: bool,

    /// Drop multiple local alignments scoring less than this.
    #[clap(
        long,
        default_value_t = 0.,
        allow_negative_numbers = true,
        requires = "multiple",
        help_heading = "Multiple local alignment"
    )]
    pub min_score: Score,

    /// Print less. Pass twice to only print the summary.
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub silent: u8,

    /// Options to generate input pairs.
    #[clap(flatten, next_help_heading = "Generated input")]
    pub generate: GenerateArgs,
}

impl Cli {
    pub fn aligner_params(&self) -> CliResult<AlignerParams> {
        let Some(path) = &self.params else {
            return Ok(self.aligner.params());
        };
        let params: AlignerParams = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        info!("Loaded parameters from {}: {params:?}", path.display());
        Ok(params)
    }

    pub fn scoring_matrix<R: Residue>(&self) -> ScoringMatrix<R> {
        ScoringMatrix::builder(self.mismatch)
            .match_score(self.match_score)
            .build()
    }

    /// Call the given function for each pair in the input.
    pub fn process_input_pairs(
        &self,
        mut run_pair: impl FnMut(&[u8], &[u8]) -> CliResult<ControlFlow<()>>,
    ) -> CliResult<()> {
        if let Some(input) = &self.input {
            let files = if input.is_file() {
                vec![input.clone()]
            } else {
                input
                    .read_dir()?
                    .map(|entry| entry.map(|e| e.path()))
                    .collect::<Result<Vec<_>, _>>()?
            };

            for f in files {
                let ext = f.extension().and_then(|e| e.to_str()).unwrap_or_default();
                match ext {
                    "seq" | "txt" => {
                        let lines = BufReader::new(File::open(&f)?)
                            .lines()
                            .collect::<Result<Vec<_>, _>>()?;
                        for (a, b) in lines.iter().tuples() {
                            let (a, b) = if ext == "seq" {
                                (
                                    a.strip_prefix('>').ok_or("expected '>' line")?,
                                    b.strip_prefix('<').ok_or("expected '<' line")?,
                                )
                            } else {
                                (a.as_str(), b.as_str())
                            };
                            if run_pair(a.as_bytes(), b.as_bytes())?.is_break() {
                                return Ok(());
                            }
                        }
                    }
                    "fna" | "fa" | "fasta" => {
                        for (a, b) in fasta::Reader::new(BufReader::new(File::open(&f)?))
                            .records()
                            .tuples()
                        {
                            if run_pair(a?.seq(), b?.seq())?.is_break() {
                                return Ok(());
                            }
                        }
                    }
                    ext => {
                        return Err(format!(
                            "Unknown file extension {ext:?} of {}. Must be in {{seq,txt,fna,fa,fasta}}.",
                            f.display()
                        )
                        .into())
                    }
                }
            }
        } else {
            let n = self.generate.length.ok_or("either --input or --length is required")?;
            let seed = self.generate.seed.unwrap_or_else(|| {
                let seed = ChaCha8Rng::from_entropy().gen_range(0..1_000);
                eprintln!("Seed: {seed}");
                seed
            });
            let rng = &mut ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..self.generate.cnt {
                let (a, b) = match self.alphabet {
                    Alphabet::Dna => generated::<Nucleotide>(n, self.generate.error_rate, rng),
                    Alphabet::Protein => generated::<AminoAcid>(n, self.generate.error_rate, rng),
                };
                if run_pair(a.as_bytes(), b.as_bytes())?.is_break() {
                    break;
                }
            }
        }
        Ok(())
    }
}

fn generated<R: Residue>(n: usize, e: f32, rng: &mut ChaCha8Rng) -> (String, String) {
    let (a, b) = gotoh_test::generate_pair::<R>(n, e, rng);
    (residues_to_string(&a), residues_to_string(&b))
}

/// One output line of `--output`.
#[derive(Serialize, Debug)]
pub struct AlignmentRecord {
    pub pair: usize,
    pub score: Score,
    pub percent_identity: f64,
    pub length: usize,
    pub mismatches: usize,
    pub gap_openings: usize,
    pub query_range: DirectedRange,
    pub subject_range: DirectedRange,
    pub cigar: String,
    pub query: String,
    pub subject: String,
}

impl AlignmentRecord {
    pub fn new<R: Residue>(pair: usize, aln: &PairwiseAlignment<R>) -> Self {
        Self {
            pair,
            score: aln.score,
            percent_identity: aln.percent_identity(),
            length: aln.length,
            mismatches: aln.mismatches,
            gap_openings: aln.gap_openings,
            query_range: aln.query_range,
            subject_range: aln.subject_range,
            cigar: aln.cigar.to_string(),
            query: aln.query_string(),
            subject: aln.subject_string(),
        }
    }

    pub fn print(&self) {
        println!(
            "pair {:>5} score {:>8.1} identity {:>6.2}% length {:>6} mismatches {:>5} gaps {:>4} query {}..{} subject {}..{} {:?}",
            self.pair,
            self.score,
            self.percent_identity,
            self.length,
            self.mismatches,
            self.gap_openings,
            self.query_range.start,
            self.query_range.end,
            self.subject_range.start,
            self.subject_range.end,
            self.subject_range.strand,
        );
    }
}

/// Totals over all processed pairs.
#[derive(Default, Debug, Clone, Copy, AddAssign)]
pub struct Summary {
    pub pairs: usize,
    pub alignments: usize,
    pub score: f64,
    pub length: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub gap_openings: usize,
}

impl Summary {
    pub fn pair<R: Residue>(alignments: &[PairwiseAlignment<R>]) -> Self {
        let mut s = Summary {
            pairs: 1,
            ..Default::default()
        };
        for aln in alignments {
            s += Summary {
                pairs: 0,
                alignments: 1,
                score: aln.score as f64,
                length: aln.length,
                matches: aln.matches,
                mismatches: aln.mismatches,
                gap_openings: aln.gap_openings,
            };
        }
        s
    }

    pub fn print(&self) {
        let avg = |x: f64| {
            if self.alignments == 0 {
                0.
            } else {
                x / self.alignments as f64
            }
        };
        println!(
            "pairs {:>5} alignments {:>5} avg score {:>8.2} avg length {:>8.1} identity {:>6.2}% mismatches {:>6} gaps {:>5}",
            self.pairs,
            self.alignments,
            avg(self.score),
            avg(self.length as f64),
            if self.length == 0 {
                0.
            } else {
                100. * self.matches as f64 / self.length as f64
            },
            self.mismatches,
            self.gap_openings,
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn summary_accumulates() {
        let m = ScoringMatrix::<Nucleotide>::nucleotide(1., -1.);
        let a: NucleotideSequence = "ACGT".parse().unwrap();
        let aln = gotoh_align::align(
            a.residues(),
            a.residues(),
            &m,
            GapPenalties::default(),
            AlignmentMode::Global,
        )
        .unwrap();
        let mut total = Summary::default();
        total += Summary::pair(&[aln.clone()]);
        total += Summary::pair(&[aln.clone(), aln]);
        assert_eq!(total.pairs, 2);
        assert_eq!(total.alignments, 3);
        assert_eq!(total.score, 12.);
        assert_eq!(total.matches, 12);
    }

    #[test]
    fn simple_matrix_from_flags() {
        let cli = Cli::parse_from(["gotoh", "-n", "10", "--match", "2", "--mismatch", "-3"]);
        let m = cli.scoring_matrix::<Nucleotide>();
        assert_eq!(m.score(Nucleotide::A, Nucleotide::A), 2.);
        assert_eq!(m.score(Nucleotide::A, Nucleotide::C), -3.);
        assert_eq!(cli.aligner_params().unwrap(), AlignerParams::default());
    }

    #[test]
    fn generated_pairs() {
        let cli = Cli::parse_from(["gotoh", "-n", "20", "-x", "3", "--seed", "7"]);
        let mut pairs = vec![];
        cli.process_input_pairs(|a, b| {
            pairs.push((a.to_vec(), b.to_vec()));
            Ok(ControlFlow::Continue(()))
        })
        .unwrap();
        assert_eq!(pairs.len(), 3);
        assert!(pairs.iter().all(|(a, _)| a.len() == 20));
    }
}
