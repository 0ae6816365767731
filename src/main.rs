use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser};
use log::{info, warn};
use nw_aligner::{
    load_config, read_sequence, write_result, write_score_matrix, NeedlemanWunsch,
    ScoringModel, Sequence,
};

#[derive(Parser)]
#[command(name = "nw-align")]
#[command(about = "Global pairwise alignment listing every optimal alignment")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    input_a: InputA,

    #[command(flatten)]
    input_b: InputB,

    /// Scoring configuration file (KEY = VALUE lines)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Gap penalty override
    #[arg(long, allow_hyphen_values = true)]
    gap: Option<f64>,

    /// Match award override
    #[arg(long = "match", allow_hyphen_values = true)]
    match_award: Option<f64>,

    /// Mismatch penalty override
    #[arg(long, allow_hyphen_values = true)]
    mismatch: Option<f64>,

    /// Maximum sequence length override
    #[arg(long)]
    max_length: Option<usize>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print at most this many alignments
    #[arg(long)]
    max_solutions: Option<usize>,

    /// Also print the score matrix before the alignments
    #[arg(long)]
    show_matrix: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct InputA {
    /// First sequence file (FASTA-style)
    #[arg(short = 'a', long)]
    file_a: Option<PathBuf>,

    /// First sequence given literally
    #[arg(long)]
    seq_a: Option<String>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct InputB {
    /// Second sequence file (FASTA-style)
    #[arg(short = 'b', long)]
    file_b: Option<PathBuf>,

    /// Second sequence given literally
    #[arg(long)]
    seq_b: Option<String>,
}

fn load_input(file: Option<&PathBuf>, literal: Option<&str>) -> Result<Sequence> {
    match (file, literal) {
        (Some(path), _) => read_sequence(path)
            .with_context(|| format!("Failed to load sequence from {}", path.display())),
        (None, Some(text)) => Ok(Sequence::from(text)),
        (None, None) => bail!("No sequence supplied"),
    }
}

fn resolve_scoring(cli: &Cli) -> Result<ScoringModel> {
    let mut scoring = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Invalid configuration {}", path.display()))?,
        None => ScoringModel::default(),
    };

    if let Some(gap) = cli.gap {
        scoring = scoring.with_gap_penalty(gap);
    }
    if let Some(award) = cli.match_award {
        scoring = scoring.with_match_award(award);
    }
    if let Some(mismatch) = cli.mismatch {
        scoring = scoring.with_mismatch_penalty(mismatch);
    }
    if let Some(max) = cli.max_length {
        scoring = scoring.with_max_sequence_length(max);
    }

    scoring.validate().context("Invalid scoring parameters")?;
    Ok(scoring)
}

fn run(cli: &Cli) -> Result<()> {
    let seq_a = load_input(cli.input_a.file_a.as_ref(), cli.input_a.seq_a.as_deref())?;
    let seq_b = load_input(cli.input_b.file_b.as_ref(), cli.input_b.seq_b.as_deref())?;
    let scoring = resolve_scoring(cli)?;
    info!("Using scoring model {:?}", scoring);

    let mut aligner = NeedlemanWunsch::new(scoring);
    let (scores, directions) = aligner
        .build_matrices(seq_a.as_bytes(), seq_b.as_bytes())
        .context("Cannot align the supplied sequences")?;
    let result =
        aligner.enumerate_solutions(&scores, &directions, seq_a.as_bytes(), seq_b.as_bytes());

    if let Some(limit) = cli.max_solutions {
        if result.alignments.len() > limit {
            warn!(
                "Printing {} of {} optimal alignments",
                limit,
                result.alignments.len()
            );
        }
    }

    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    if cli.show_matrix {
        write_score_matrix(&mut writer, &scores)?;
        writeln!(writer)?;
    }
    write_result(&mut writer, &result, cli.max_solutions)?;
    writer.flush()?;

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    run(&cli)
}
