//! Halfcube: a spinning, lit cube rendered in the terminal
//!
//! Software rasterizer drawing into half-block cells:
//! - Two depth-tested sub-pixels per character cell
//! - Flat shading with an orbiting key light
//! - Silhouette outlines
//!
//! Keys: q/Esc quit, +/- zoom, space pauses the spin.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod compositor;
mod config;
mod rasterizer;
mod scene;
mod terminal;

use std::fs::File;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use app::AppState;
use config::{config_to_string, load_config, save_config, Config};
use terminal::{Action, Terminal};

/// Spinning half-block cube for the terminal
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// RON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Starting zoom (clamped to 0.1..=5.0)
    #[arg(short, long)]
    zoom: Option<f64>,

    /// Target frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Print the effective config as RON and exit
    #[arg(long)]
    dump_config: bool,

    /// Save the effective config to this RON file and exit
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// Write log output here instead of stderr (the frame owns the screen)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(log::LevelFilter::Warn);
    }
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn effective_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(zoom) = args.zoom {
        config.animation.zoom = zoom;
    }
    if let Some(fps) = args.fps {
        config.display.target_fps = fps;
    }
    config.validate().context("invalid settings")?;
    Ok(config)
}

/// Render until the user quits
fn run(term: &mut Terminal, app: &mut AppState, config: &Config) -> Result<()> {
    let frame_budget = Duration::from_secs_f64(1.0 / config.display.target_fps as f64);
    let mut paused = false;
    let mut last = Instant::now();
    let mut frames: u64 = 0;

    loop {
        let frame_start = Instant::now();
        // Clamp so a stall does not make the cube jump
        let elapsed = frame_start
            .duration_since(last)
            .as_secs_f64()
            .min(config.display.max_frame_time);
        last = frame_start;

        for action in term.poll_actions().context("reading input")? {
            match action {
                Action::Quit => {
                    log::info!("Quit after {} frames", frames);
                    return Ok(());
                }
                Action::ZoomIn => app.zoom_by(config.animation.zoom_step),
                Action::ZoomOut => app.zoom_by(1.0 / config.animation.zoom_step),
                Action::TogglePause => {
                    paused = !paused;
                    log::debug!("Paused: {}", paused);
                }
            }
        }

        app.begin_frame();
        let stats = app.advance_and_render(elapsed, if paused { 0.0 } else { 1.0 });
        let changes = term.present(&app.composite()).context("writing frame")?;
        frames += 1;
        log::trace!(
            "frame {}: faces {:?}, {} outline edges, {} color changes",
            frames,
            stats.visible_faces,
            stats.silhouette_edges,
            changes
        );

        if let Some(rest) = frame_budget.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let config = effective_config(&args)?;
    if args.dump_config {
        println!("{}", config_to_string(&config)?);
        return Ok(());
    }
    if let Some(path) = &args.write_config {
        save_config(&config, path).with_context(|| format!("writing config {}", path.display()))?;
        log::info!("Wrote config to {}", path.display());
        return Ok(());
    }

    log::info!("Halfcube v{}", VERSION);

    let (width, height) = terminal::framebuffer_size();
    let mut app = AppState::new(width, height, &config).context("allocating framebuffer")?;

    // The guard restores the terminal before any error is reported
    let result = {
        let mut term = Terminal::enter().context("entering raw mode")?;
        run(&mut term, &mut app, &config)
    };

    app.shutdown();
    result
}
