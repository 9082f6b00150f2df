//! watchfx - run the watch home page on the desktop
//!
//! Plays the home page animation against a headless widget host, either in
//! real time or on virtual time, and logs every step through `tracing`.

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use watchfx_app::{HeadlessRuntime, HomePage, RealtimeRuntime, RunConfig, WatchfxConfig};
use watchfx_platform::{HeadlessUi, HostUi, TimerQueue};

/// Run the watchfx home page
#[derive(Parser, Debug)]
#[command(name = "watchfx")]
#[command(about = "Play the watchfx home page animation")]
#[command(version)]
struct Args {
    /// Config file, or a directory containing watchfx.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run on virtual time without sleeping
    #[arg(long)]
    headless: bool,

    /// Number of times to play the animation
    #[arg(long, default_value = "1")]
    repeat: u32,

    /// Abort if the animation delivers more frames than this
    #[arg(long, default_value = "10000")]
    max_frames: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => WatchfxConfig::load(path)?,
        None => WatchfxConfig::default(),
    };

    let ui = Rc::new(HeadlessUi::new());
    let timers = Rc::new(TimerQueue::new());
    let mut page = HomePage::new(ui.clone(), timers.clone(), config);
    page.on_init();
    page.build()?;

    let cfg = RunConfig {
        repeat: args.repeat,
        max_frames: args.max_frames,
    };

    let report = if args.headless {
        HeadlessRuntime::run(&mut page, &timers, cfg)?
    } else {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .context("Failed to start tokio runtime")?;
        runtime.block_on(RealtimeRuntime::run(&mut page, &timers, cfg))?
    };

    if let Some(rect) = page.rect() {
        tracing::info!("Final rect state: {:?}", ui.widget(rect));
    }
    tracing::info!(
        "Delivered {} frames over {:?}, {} run(s) completed, {} widget updates",
        report.frames,
        report.elapsed,
        report.completed_runs,
        ui.mutation_count()
    );

    page.on_destroy();
    Ok(())
}
