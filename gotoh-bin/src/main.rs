use std::{
    error::Error,
    fs::File,
    io::{BufWriter, Write},
    ops::ControlFlow,
};

use clap::Parser;
use gotoh_align::{AlignerParams, MultipleLocalAligner};
use gotoh_bin::*;
use gotoh_types::*;
use log::{debug, warn};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let params = cli.aligner_params()?;

    let total = match (cli.alphabet, cli.matrix) {
        (Alphabet::Dna, MatrixType::Simple) => {
            run(&cli, params, &cli.scoring_matrix::<Nucleotide>())?
        }
        (Alphabet::Dna, MatrixType::Blosum62) => {
            return Err("blosum62 scores amino acids; use --alphabet protein".into());
        }
        (Alphabet::Protein, MatrixType::Simple) => {
            run(&cli, params, &cli.scoring_matrix::<AminoAcid>())?
        }
        (Alphabet::Protein, MatrixType::Blosum62) => run(&cli, params, blosum62())?,
    };

    if total.pairs > 0 {
        total.print();
    }
    Ok(())
}

fn run<R: Residue>(
    cli: &Cli,
    params: AlignerParams,
    matrix: &ScoringMatrix<R>,
) -> Result<Summary, Box<dyn Error>> {
    if cli.multiple && params.mode != AlignmentMode::Local {
        warn!("--multiple always uses local alignment");
    }
    let mut output = match &cli.output {
        Some(path) => Some(BufWriter::new(File::create(path)?)),
        None => None,
    };

    let mut total = Summary::default();
    cli.process_input_pairs(|a, b| {
        let query = Sequence::<R>::from_bytes(a)?;
        let subject = Sequence::<R>::from_bytes(b)?;
        debug!(
            "pair {}: query length {} subject length {}",
            total.pairs,
            query.len(),
            subject.len()
        );

        let alignments = if cli.multiple {
            MultipleLocalAligner::<R, _>::new(matrix, params.gaps, cli.min_score)
                .align(&query, &subject)?
        } else {
            vec![gotoh_align::align(
                &query,
                &subject,
                matrix,
                params.gaps,
                params.mode,
            )?]
        };

        for aln in &alignments {
            let record = AlignmentRecord::new(total.pairs, aln);
            if cli.silent == 0 {
                record.print();
            }
            if let Some(out) = &mut output {
                serde_json::to_writer(&mut *out, &record)?;
                writeln!(out)?;
            }
        }
        total += Summary::pair(&alignments);
        Ok(ControlFlow::Continue(()))
    })?;

    if let Some(out) = &mut output {
        out.flush()?;
    }
    Ok(total)
}

#[cfg(test)]
mod test {
    #[test]
    fn cli_test() {
        <gotoh_bin::Cli as clap::CommandFactory>::command().debug_assert();
    }
}
