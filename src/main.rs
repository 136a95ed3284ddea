use std::path::PathBuf;

use anyhow::Context;
use bumpalo::Bump;
use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use span_lattice::config::DecodeConfig;
use span_lattice::lattice::{InputPaths, LatticeFormatter};
use span_lattice::lexer::LexerOptions;
use span_lattice::phrase::{Sentence, split_sentences};
use walkdir::WalkDir;

const DEFAULT_LOG_LEVEL: tracing::Level = tracing::Level::INFO;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One JSON summary per sentence
    Summary,
    /// S-expression dump of every path and the span matrix
    Sexpr,
}

#[derive(Parser, Debug)]
#[command(name = "span-lattice", version)]
#[command(about = "Build span lattices for tokenized input sentences", long_about = None)]
struct Cli {
    /// JSON decode config; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Longest span to build
    #[arg(short = 'm', long)]
    max_phrase_length: Option<usize>,

    /// Number of translation tables (option slots per path)
    #[arg(short = 't', long)]
    tables: Option<usize>,

    #[arg(long, value_enum, default_value_t = Format::Summary)]
    format: Format,

    /// Mark paths of at most N words as used and prune the rest before reporting
    #[arg(long, value_name = "N")]
    keep_max: Option<usize>,

    /// Only split tokens on whitespace
    #[arg(long)]
    no_split_punctuation: bool,

    #[arg(short = 'v', long, help = "Enable verbose output.")]
    verbose: bool,

    /// Input files or directories, one sentence per line
    #[arg(name = "PATH", required = true)]
    paths: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logger(&cli);

    let config = load_config(&cli)?;
    tracing::debug!(?config, "decode config");

    let options = LexerOptions {
        split_punctuation: !cli.no_split_punctuation,
    };

    for file in collect_files(&cli.paths)? {
        let source = std::fs::read(&file)
            .with_context(|| format!("Failed to read input file `{}`", file.display()))?;
        let sentences = split_sentences(&source);
        tracing::debug!(file = %file.display(), sentences = sentences.len(), "processing input");

        let reports = sentences
            .par_iter()
            .map(|line| report_sentence(line, &config, options, &cli))
            .collect::<anyhow::Result<Vec<String>>>()?;

        for report in reports {
            println!("{report}");
        }
    }

    Ok(())
}

fn setup_logger(cli: &Cli) {
    let mut log_level_warnings: Vec<String> = vec![];
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        let env_val = std::env::var("LOG_LEVEL").map(|s| s.trim().to_string());

        match env_val.as_deref() {
            Ok("DEBUG" | "debug") => tracing::Level::DEBUG,
            Ok("INFO" | "info") => tracing::Level::INFO,
            Ok("TRACE" | "trace") => tracing::Level::TRACE,
            Ok("VERBOSE" | "verbose") => tracing::Level::DEBUG,
            Ok(other) => {
                log_level_warnings.push(format!(
                    "Invalid `LOG_LEVEL` environment variable value: `{other}`"
                ));
                DEFAULT_LOG_LEVEL
            }
            Err(_) => DEFAULT_LOG_LEVEL,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();
    tracing::trace!("Initial logging level set to `{log_level}`.");

    for warning in log_level_warnings.drain(..) {
        tracing::warn!("{warning}");
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<DecodeConfig> {
    let mut config = match &cli.config {
        Some(path) => DecodeConfig::from_path(path)?,
        None => DecodeConfig::default(),
    };
    if let Some(max_phrase_length) = cli.max_phrase_length {
        config.max_phrase_length = max_phrase_length;
    }
    if let Some(tables) = cli.tables {
        config.num_translation_tables = tables;
    }
    config.validate()?;
    Ok(config)
}

fn collect_files(paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry?;
                if entry.file_type().is_file() {
                    tracing::trace!("Found file at {:#?}.", entry.path());
                    files.push(entry.into_path());
                } else {
                    tracing::trace!("Skipping non-file: {:#?}.", entry.path());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    if files.is_empty() {
        tracing::warn!("No input files found under {}", display_paths(paths));
    }
    Ok(files)
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn report_sentence(
    line: &[u8],
    config: &DecodeConfig,
    options: LexerOptions,
    cli: &Cli,
) -> anyhow::Result<String> {
    let arena = Bump::new();
    let sentence = Sentence::with_options(line, options, &arena);
    let mut paths: InputPaths<'_> = InputPaths::build(&sentence, config, &arena);

    if let Some(keep_max) = cli.keep_max {
        for path in &paths {
            if path.num_words() <= keep_max {
                path.mark_used();
            }
        }
        paths.prune_unused();
    }

    Ok(match cli.format {
        Format::Summary => serde_json::to_string(&paths.summary())?,
        Format::Sexpr => LatticeFormatter::new().with_matrix().format(&paths),
    })
}
