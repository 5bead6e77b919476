use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use carousel::constants::FRAME_TIME;
use carousel::{Config, Document, Page};

/// Mount carousel and navigation widgets on an HTML page and preview them.
#[derive(Parser, Debug)]
#[command(name = "carousel", version, about)]
struct Args {
    /// HTML page to load
    page: PathBuf,

    /// TOML file with the autoplay interval and hook names
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Autoplay interval in milliseconds, overrides the config file
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// Replay this many seconds of virtual time without a window, then print widget state
    #[arg(long, value_name = "SECONDS")]
    headless: Option<u64>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = match args.verbose {
        0 => "carousel=warn",
        1 => "carousel=info",
        2 => "carousel=debug",
        _ => "carousel=trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(ms) = args.interval_ms {
        config.autoplay_interval_ms = ms;
        config.validate().context("Invalid --interval-ms")?;
    }

    let html = fs::read_to_string(&args.page)
        .with_context(|| format!("Failed to read page {}", args.page.display()))?;
    info!(page = %args.page.display(), "document ready");
    let page = Page::mount(Document::parse(&html), &config);

    match args.headless {
        Some(seconds) => run_headless(page, Duration::from_secs(seconds)),
        None => {
            let base_dir = args.page.parent().unwrap_or(Path::new("."));
            run_preview(page, base_dir)
        }
    }
}

fn run_headless(mut page: Page, duration: Duration) -> Result<()> {
    page.run_for(duration, Duration::from_secs_f32(FRAME_TIME));
    print!("{}", page.report());
    page.dispose();
    Ok(())
}

#[cfg(feature = "preview")]
fn run_preview(page: Page, base_dir: &Path) -> Result<()> {
    let page = carousel::preview::run(page, base_dir);
    print!("{}", page.report());
    Ok(())
}

#[cfg(not(feature = "preview"))]
fn run_preview(_page: Page, _base_dir: &Path) -> Result<()> {
    anyhow::bail!("this build has no preview window (enable the `preview` feature) - use --headless")
}
