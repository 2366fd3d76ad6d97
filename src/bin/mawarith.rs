//! Thin CLI shell over the `mawarith` library: reads one Arabic description
//! from an argument or stdin, runs the pipeline, and prints the result.
//!
//! Kept separate from the pure core so the core itself never depends on
//! `clap`, `tracing`, or any I/O — mirroring `legalis-cli` sitting on top
//! of `legalis-core` in the source workspace this crate is adapted from.

use std::io::{self, Read};

use clap::{Parser, ValueEnum};
use mawarith::{compute_inheritance, InheritanceResult, Outcome, ShareEntry};
use tracing_subscriber::EnvFilter;

use mawarith::error::CliError;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Compute Islamic inheritance (fara'id) shares from an Arabic description.
#[derive(Parser, Debug)]
#[command(name = "mawarith", version, about)]
struct Cli {
    /// The Arabic text to analyze. Reads stdin if omitted.
    text: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Enable verbose diagnostic logging.
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn read_text(cli: &Cli) -> Result<String, CliError> {
    match &cli.text {
        Some(t) => Ok(t.clone()),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            if buf.trim().is_empty() {
                return Err(CliError::EmptyInput);
            }
            Ok(buf)
        }
    }
}

fn print_text(result: &InheritanceResult) {
    println!("الجنس المستنتج للمتوفى: {:?}", result.decedent_gender);
    println!();
    for (name, entry) in &result.results {
        match entry {
            ShareEntry::Blocked => println!("{name}: محجوب"),
            ShareEntry::Assigned {
                fraction, percent, ..
            } => println!("{name}: {fraction} ({percent:.2}%)"),
        }
    }
    println!();
    for line in &result.reasoning {
        println!("{line}");
    }
    match &result.outcome {
        Outcome::Resolved => {}
        Outcome::EmptyHeirList => {
            tracing::warn!("لم يتم العثور على أي وارث في النص المدخل");
        }
        Outcome::DistributionNotUnity { total } => {
            tracing::warn!(total, "مجموع الأنصبة لا يساوي الواحد الصحيح");
        }
        Outcome::UnsupportedConfiguration { reason } => {
            tracing::warn!(reason, "تهيئة غير مدعومة");
        }
    }
}

#[cfg(feature = "serde")]
fn print_json(result: &InheritanceResult) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

#[cfg(not(feature = "serde"))]
fn print_json(_result: &InheritanceResult) -> Result<(), CliError> {
    eprintln!("JSON output requires the \"serde\" feature");
    std::process::exit(1);
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let text = read_text(&cli)?;
    tracing::debug!(chars = text.chars().count(), "read input text");

    let result = compute_inheritance(&text);

    match cli.format {
        OutputFormat::Text => print_text(&result),
        OutputFormat::Json => print_json(&result)?,
    }

    Ok(())
}
