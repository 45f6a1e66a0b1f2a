use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use bubble_ist::{
    config::{parse_dimension, RunConfig},
    driver::{self, Progress},
};
use clap::{ArgAction, Parser};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "bubble-ist",
    about = "Build the n - 1 independent spanning trees of the bubble-sort network and write one file per tree."
)]
struct Cli {
    /// Size of the permutations (2..=8). Asked for interactively when omitted.
    #[arg(allow_negative_numbers = true)]
    n: Option<String>,
    /// Directory receiving tree{t}.txt, created if missing.
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,
    /// Build the trees concurrently, one task per tree.
    #[arg(long)]
    parallel: bool,
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn run(cli: Cli) -> Result<()> {
    let input = match cli.n {
        Some(n) => n,
        None => prompt("Enter the size of permutations (n): ")?,
    };
    let dimension = parse_dimension(&input)?;

    let config = RunConfig::new(dimension)
        .with_out_dir(cli.out_dir)
        .with_parallel(cli.parallel);

    let summary = driver::run(&config, |progress| match progress {
        Progress::Universe { vertices, elapsed } => {
            println!("Total number of permutations (nodes): {vertices}");
            println!(
                "Time to generate all permutations: {} milliseconds",
                elapsed.as_millis()
            );
        }
        Progress::Tree(report) => {
            println!();
            match &report.exported {
                Some(path) => println!("Tree {} info saved to {}", report.index, path.display()),
                None => println!("Tree {} was not saved", report.index),
            }
            println!(
                "Time to generate Tree {}: {} milliseconds",
                report.index,
                report.elapsed.as_millis()
            );
        }
    })
    .with_context(|| format!("cannot build trees for n = {dimension}"))?;

    println!(
        "\nTotal time to generate all trees: {} milliseconds",
        summary.elapsed.as_millis()
    );

    let total = summary.trees.len();
    if summary.spanning() == total && summary.exported() == total {
        println!("\nSuccessfully generated {total} independent spanning trees.");
    } else {
        println!(
            "\nGenerated {} of {total} trees, {} of them spanning.",
            summary.exported(),
            summary.spanning()
        );
    }
    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{message}")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read the size from stdin")?;
    Ok(line)
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();
}
