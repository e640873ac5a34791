//! Cube Merge - Command Line Interface
//!
//! Loads a truth table (a king-and-rook endgame table or a PLA file),
//! minimizes every selected output bit and prints the resulting terms.

use clap::{Parser, ValueEnum};
use cube_merge::pla::PLAType;
use cube_merge::{
    minimize_output, read_state_file, BoardConfig, Budget, Completion, MergeConfig,
    MinimizeError, MoveEncoder, OutputPattern, PLAReader, PLAWriter, PassStrategy, TruthTable,
};
use log::info;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// Merge every row with its most similar partner in one sweep (default)
    Greedy,
    /// Merge only the single most similar pair per pass
    Global,
}

impl From<Strategy> for PassStrategy {
    fn from(val: Strategy) -> Self {
        match val {
            Strategy::Greedy => PassStrategy::GreedyPerRow,
            Strategy::Global => PassStrategy::GlobalBest,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "cube-merge")]
#[command(about = "Heuristic two-level minimizer by pairwise term merging", long_about = None)]
#[command(version)]
struct Args {
    /// Input file: an endgame state table, or a PLA file with --pla
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Read FILE as an endgame table for an N x N board
    #[arg(short = 'b', long = "board", value_name = "N", required_unless_present = "pla")]
    board: Option<usize>,

    /// Read FILE as a PLA file (.type f or fr)
    #[arg(long = "pla", conflicts_with = "board")]
    pla: bool,

    /// Keep only rows whose outputs match PATTERN (0, 1, or . for any)
    #[arg(short = 'f', long = "filter", value_name = "PATTERN")]
    filter: Option<OutputPattern>,

    /// Minimize only this output bit (all bits by default)
    #[arg(short = 'k', long = "output-bit", value_name = "K")]
    output_bit: Option<usize>,

    /// Pair selection per pass
    #[arg(long = "strategy", value_enum, default_value = "greedy")]
    strategy: Strategy,

    /// Stop merging after SECS seconds and print the partial result
    #[arg(short = 't', long = "timeout", value_name = "SECS")]
    timeout: Option<f64>,

    /// Stop merging after N passes per output bit
    #[arg(long = "max-passes", value_name = "N")]
    max_passes: Option<usize>,

    /// Simplify terms after every pass, not just at the end
    #[arg(long = "simplify-each-pass")]
    simplify_each_pass: bool,

    /// Write the (filtered) table as a .type fr PLA file
    #[arg(long = "emit-pla", value_name = "FILE")]
    emit_pla: Option<PathBuf>,

    /// Provide execution summary
    #[arg(short = 's', long = "summary")]
    summary: bool,

    /// Suppress printing of terms
    #[arg(short = 'x', long = "no-output")]
    no_output: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Could not initialise logging: {}", e);
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), MinimizeError> {
    let mut table = load_table(args)?;
    if args.summary {
        eprintln!(
            "Input table: {} rows, {} inputs, {} outputs",
            table.len(),
            table.input_width(),
            table.output_width()
        );
    }

    if let Some(pattern) = &args.filter {
        table = table.filter(pattern)?;
        info!("{} rows match the output filter", table.len());
    }

    if let Some(path) = &args.emit_pla {
        table.to_pla_file(path, PLAType::FR)?;
        if args.summary {
            eprintln!("Wrote table to: {}", path.display());
        }
    }

    let config = MergeConfig::default()
        .with_strategy(args.strategy.into())
        .with_simplify_each_pass(args.simplify_each_pass);
    let budget = budget(args)?;

    let bits: Vec<usize> = match args.output_bit {
        Some(bit) => vec![bit],
        None => (0..table.output_width()).collect(),
    };

    let mut total_terms = 0;
    let mut total_literals = 0;
    for bit in bits {
        let outcome = minimize_output(&table, bit, &config, &budget)?;
        total_terms += outcome.len();
        total_literals += outcome.literal_count();

        if !args.no_output {
            let status = match outcome.completion() {
                Completion::FixedPoint => String::new(),
                Completion::Partial(reason) => format!(" (partial: {})", reason),
            };
            println!(
                "# {}: {} terms, {} literals{}",
                table.output_labels().name(bit),
                outcome.len(),
                outcome.literal_count(),
                status
            );
            for term in outcome.terms() {
                println!("{}", term.display_with(table.input_labels()));
            }
        }

        if args.summary {
            eprintln!(
                "Output {}: {} -> {} terms in {} passes ({} merges, {:?})",
                bit,
                outcome.initial_len(),
                outcome.len(),
                outcome.passes(),
                outcome.merges(),
                outcome.elapsed()
            );
        }
    }

    if args.summary {
        eprintln!("Total: {} terms, {} literals", total_terms, total_literals);
    }
    Ok(())
}

fn load_table(args: &Args) -> Result<TruthTable, MinimizeError> {
    if args.pla {
        return Ok(TruthTable::from_pla_file(&args.input)?);
    }
    // clap guarantees --board when --pla is absent
    let size = args.board.unwrap_or_default();
    let encoder = MoveEncoder::new(BoardConfig::for_board(size)?);
    let pairs = read_state_file(&args.input)?;
    info!("read {} state pairs from {}", pairs.len(), args.input.display());
    Ok(encoder.build_table(pairs)?)
}

fn budget(args: &Args) -> Result<Budget, MinimizeError> {
    let mut budget = Budget::unlimited();
    if let Some(secs) = args.timeout {
        let timeout = Duration::try_from_secs_f64(secs).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("--timeout: {}", e))
        })?;
        budget = budget.with_timeout(timeout);
    }
    if let Some(passes) = args.max_passes {
        budget = budget.with_max_passes(passes);
    }
    Ok(budget)
}
