//! packofs CLI
//!
//! Builds an offset index from a `git verify-pack -v` listing and answers
//! offset lookups against it.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use packofs::listing::{self, ListingSummary};
use packofs::{Config, HashAlgorithm, OffsetIndex};
use tracing_subscriber::{fmt, EnvFilter};

/// packofs
#[derive(Parser, Debug)]
#[command(name = "packofs")]
#[command(about = "Offset to object id lookups over a pack listing")]
#[command(version)]
struct Args {
    /// Listing produced by `git verify-pack -v` ("-" for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Object id algorithm of the pack
    #[arg(long, default_value = "sha1")]
    hash: HashAlgorithm,

    /// Number of records to pre-allocate
    #[arg(short, long, default_value = "1024")]
    capacity: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the object id stored at each offset
    Lookup {
        /// Offsets to resolve
        #[arg(required = true, allow_negative_numbers = true)]
        offsets: Vec<i64>,
    },

    /// Print listing and index statistics
    Stats,
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,packofs=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .capacity_hint(args.capacity)
        .hash_algorithm(args.hash)
        .build();

    let loaded = if args.input.as_os_str() == "-" {
        listing::load_listing(io::stdin().lock(), &config)
    } else {
        listing::load_listing_file(&args.input, &config)
    };

    let (mut index, summary) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Failed to load listing {}: {}", args.input.display(), e);
            return ExitCode::FAILURE;
        }
    };

    match args.command {
        Commands::Lookup { offsets } => lookup(&mut index, &offsets),
        Commands::Stats => {
            print_stats(&index, &summary);
            ExitCode::SUCCESS
        }
    }
}

fn lookup(index: &mut OffsetIndex, offsets: &[i64]) -> ExitCode {
    let mut missing = 0usize;

    for &offset in offsets {
        match index.lookup(offset) {
            Some(id) => println!("{} {}", offset, id),
            None => {
                println!("{} missing", offset);
                missing += 1;
            }
        }
    }

    if missing > 0 {
        tracing::warn!("{} of {} offsets not found", missing, offsets.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_stats(index: &OffsetIndex, summary: &ListingSummary) {
    let stats = index.stats();
    println!("objects:              {}", summary.objects);
    println!("delta objects:        {}", summary.deltas);
    println!("skipped lines:        {}", summary.skipped_lines);
    println!("index entries:        {}", stats.entries);
    println!("sorted:               {}", index.is_sorted());
    println!("out-of-order inserts: {}", stats.out_of_order_inserts);
    println!("sort passes:          {}", stats.sort_passes);
    println!("heap bytes:           {}", stats.heap_bytes);
}
