//! rrg - Relative Rotation Graph viewer.

mod app;
mod cli;
mod input;
mod report;
mod state;
mod ui;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rrg_data::SymbolDirectory;
use rrg_metrics::{run_batch, TailSmoother};
use winit::event_loop::EventLoop;

use app::App;
use cli::{Cli, Settings};
use state::DocumentState;

fn run() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = cli.load_config()?;
    let settings = Settings::resolve(&cli, &config)?;

    let source = SymbolDirectory::new(&settings.data_dir);
    let output = run_batch(
        &source,
        &settings.benchmark,
        &settings.watchlist,
        settings.timeframe,
        settings.metric.clone(),
    )
    .with_context(|| format!("cannot compute rotation against {}", settings.benchmark))?;

    if cli.print {
        let stdout = std::io::stdout();
        report::write_report(&mut stdout.lock(), &settings.benchmark, &output)?;
        return Ok(());
    }

    if output.trails.is_empty() {
        bail!("none of the {} symbols could be plotted", settings.watchlist.len());
    }

    let smoother = TailSmoother::new(settings.tail_curve);
    let document = DocumentState::new(&settings.benchmark, output.trails, &smoother);

    let event_loop = EventLoop::new()?;
    let mut app = App::new(document, settings.display, settings.hit_radius_px);
    event_loop.run_app(&mut app)?;

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
