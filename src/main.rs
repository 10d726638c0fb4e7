//! diskviz — interactive disk usage visualiser.
//!
//! Thin binary entry point. All logic lives in the `diskviz-core`
//! and `diskviz-gui` crates.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;
use diskviz_core::graph::DEFAULT_TOP_N;
use diskviz_core::scan::{SampleSource, ScanSource, SnapshotFile};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "diskviz", version, about = "Treemap, file-type charts and a force graph of disk usage")]
struct Args {
    /// JSON scan snapshot to open. The built-in sample tree is shown when omitted.
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Number of largest files placed in the force graph.
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top_n: usize,

    /// Log filter, e.g. `debug` or `diskviz_core=trace`. Overrides RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialise structured logging: flag, then RUST_LOG, then `info`.
    let filter = match args.log_level.as_deref() {
        Some(directive) => EnvFilter::try_new(directive)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("diskviz starting");

    let source: Box<dyn ScanSource> = match args.snapshot {
        Some(path) => Box::new(SnapshotFile::new(path)),
        None => Box::new(SampleSource),
    };

    // Build application state *before* opening the window so the first
    // rendered frame already has the scan and every derived view.
    let state = diskviz_gui::DiskVizState::build(source, args.top_n)?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("diskviz -- Disk Usage Visualiser")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "diskviz",
        options,
        Box::new(|cc| Ok(Box::new(diskviz_gui::DiskVizApp::with_state(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
