use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::warn;

use coverage_core::monitor::{BkMonitor, CoverageMonitor, GreedyMonitor, MonitorConfig};

mod recording;

use recording::load_recording_coverage;

/// Frame coverage CLI — ingest per-recording hash sidecars and report
/// cumulative, order-independent coverage.
#[derive(Parser)]
#[command(name = "coverage-cli", version)]
struct Args {
    /// Recording sidecar files (JSON, each `{"hashes": ["0x1234...", ...]}`)
    #[arg(required = true)]
    recordings: Vec<PathBuf>,

    /// Hamming-distance radius under which two hashes are considered near
    #[arg(short, long, default_value_t = 5)]
    radius: u32,

    /// Monitor backend: `bk` (order-independent, required) or `greedy`
    /// (order-dependent, first-seen-wins, optional per spec)
    #[arg(long, value_enum, default_value_t = Backend::Bk)]
    backend: Backend,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Backend {
    Bk,
    Greedy,
}

#[derive(Serialize)]
struct Summary {
    recordings_ingested: usize,
    recordings_skipped_duplicate: usize,
    recordings_failed: usize,
    item_seen: usize,
    coverage_count: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::try_init().ok();

    let args = Args::parse();
    let config = MonitorConfig::new(args.radius)?;

    let mut monitor: Box<dyn CoverageMonitor> = match args.backend {
        Backend::Bk => Box::new(BkMonitor::new(config)),
        Backend::Greedy => Box::new(GreedyMonitor::new(config)),
    };

    let mut ingested = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for path in &args.recordings {
        match load_recording_coverage(path) {
            Ok(cov) => {
                if monitor.is_seen(&cov) {
                    skipped += 1;
                } else {
                    monitor.add_cov(&cov);
                    ingested += 1;
                }
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to load recording");
                failed += 1;
            }
        }
    }

    let summary = Summary {
        recordings_ingested: ingested,
        recordings_skipped_duplicate: skipped,
        recordings_failed: failed,
        item_seen: monitor.item_seen().len(),
        coverage_count: monitor.coverage_count(),
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    println!("{json}");

    Ok(())
}
