// src/main.rs

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::Args;
use std::time::Instant;
use tle_history::output::{write_json, OutputTarget};
use tle_history::{collect_history, HistoryWalker, Query, TimeBounds};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr so stdout only ever carries the JSON result
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let start_time = Instant::now();

    if let (Some(start), Some(end)) = (args.start, args.end) {
        if start > end {
            bail!("--start ({start}) is after --end ({end})");
        }
    }

    let query = Query {
        branch: args.branch.clone(),
        path: args.path.clone(),
        object_id: args.norad_id.clone(),
        bounds: TimeBounds::from_dates(args.start, args.end),
    };

    let walker = HistoryWalker::open(&args.repo)
        .with_context(|| format!("Failed to open git repository at {}", args.repo.display()))?;

    let entries = collect_history(&walker, &query, args.show_progress()).with_context(|| {
        format!(
            "Failed to extract history of {} from {} on {}",
            query.object_id,
            query.path.display(),
            query.branch
        )
    })?;

    tracing::info!("Extraction finished in {:.2?}", start_time.elapsed());

    let target = OutputTarget::parse(&args.output);
    write_json(&entries, &target).with_context(|| match &target {
        OutputTarget::Stdout => "Failed to write results to stdout".to_string(),
        OutputTarget::File(path) => format!("Failed to write results to {}", path.display()),
    })?;

    Ok(())
}
