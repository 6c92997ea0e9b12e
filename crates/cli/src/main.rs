//! # gcs - build and query Golomb-coded sets from the command line
//!
//! ## Commands
//!
//! ```text
//! gcs build <wordlist>     Build a set from a newline-separated word list
//! gcs query <item>...      Test each item for membership
//! ```
//!
//! ## Configuration
//!
//! Flags win over environment variables, which win over defaults:
//!
//! ```text
//! --table <path>   / GCS_TABLE_PATH   set file        (default: "table.gcs")
//! --divisor <P>    / GCS_DIVISOR      1/P false-positive rate (default: 1024)
//! RUST_LOG                            log filter for stderr  (default: "warn")
//! ```
//!
//! ## Example
//!
//! ```text
//! $ printf 'apple\nbanana\ncherry\n' > fruit.txt
//! $ gcs build fruit.txt
//! Number of words: 3
//! False positives: 0.000977
//! Size: 13
//! Bits per word: 34.666667
//! $ gcs query apple grapefruit
//! Querying for "apple": TRUE
//! Querying for "grapefruit": FALSE
//! ```

mod wordlist;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::GcsConfig;
use gcs::{GcsBuilder, GcsQuery};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Build and query Golomb-coded sets.
#[derive(Parser, Debug)]
#[command(name = "gcs")]
#[command(about = "Build and query Golomb-coded sets")]
struct Args {
    /// Set file to write or read (overrides GCS_TABLE_PATH)
    #[arg(short, long, global = true)]
    table: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a set from a newline-separated word list
    Build {
        /// Path to the word list
        wordlist: PathBuf,

        /// False-positive divisor P, a power of two (overrides GCS_DIVISOR)
        #[arg(short = 'p', long)]
        divisor: Option<u32>,
    },
    /// Test items for membership
    Query {
        /// Items to look up
        #[arg(required = true)]
        items: Vec<String>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut cfg = GcsConfig::from_env().context("invalid environment configuration")?;
    if let Some(table) = args.table {
        cfg.table_path = table;
    }

    match args.command {
        Command::Build { wordlist: list_path, divisor } => {
            if let Some(p) = divisor {
                cfg.divisor = p;
            }
            cfg.validate()?;
            build(&cfg, &list_path)
        }
        Command::Query { items } => query(&cfg, &items),
    }
}

fn build(cfg: &GcsConfig, list_path: &Path) -> Result<()> {
    let words = wordlist::read_items(list_path)?;
    let n = u32::try_from(words.len()).context("word list has more than u32::MAX items")?;

    let mut builder = GcsBuilder::new(n, cfg.divisor)?;
    for w in &words {
        builder.add(w)?;
    }
    let summary = builder
        .write_to_path(&cfg.table_path)
        .with_context(|| format!("cannot write {}", cfg.table_path.display()))?;
    info!(path = %cfg.table_path.display(), stored = summary.stored, "set built");

    println!("Number of words: {}", summary.n);
    println!("False positives: {:.6}", cfg.false_positive_rate());
    println!("Size: {}", summary.bytes);
    match summary.bits_per_item() {
        Some(bpi) => println!("Bits per word: {:.6}", bpi),
        None => println!("Bits per word: n/a"),
    }
    Ok(())
}

fn query(cfg: &GcsConfig, items: &[String]) -> Result<()> {
    let mut set = GcsQuery::open(&cfg.table_path)
        .with_context(|| format!("cannot open table {}", cfg.table_path.display()))?;
    info!(n = set.header().n, p = set.header().p, "table opened");

    for item in items {
        let found = set.query(item)?;
        println!(
            "Querying for \"{}\": {}",
            item,
            if found { "TRUE" } else { "FALSE" }
        );
    }
    Ok(())
}
