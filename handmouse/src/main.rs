//! handmouse — drive the mouse pointer with hand gestures.
//!
//! Reads per-frame hand landmarks (JSON lines from an external detector)
//! and turns them into pointer moves, clicks and scroll bursts.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use handmouse::config::{Backend, Config, FALLBACK_SCREEN};
use handmouse::motion::Size;
use handmouse::output::{LogSink, PointerSink};
use handmouse::session::{self, Session, SessionOptions};
use handmouse::source::{JsonLinesSource, LandmarkSource};
use handmouse::FrameOrchestrator;

#[derive(Parser, Debug)]
#[command(name = "handmouse", about = "Touchless mouse control from hand landmarks")]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/handmouse/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Landmark stream in JSON lines; "-" reads stdin
    #[arg(long)]
    input: Option<String>,

    /// Pointer backend
    #[arg(long, value_enum)]
    backend: Option<Backend>,

    /// Screen resolution as WxH (default: ask the backend)
    #[arg(long)]
    screen: Option<String>,

    /// Stop after N frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// Stop after N seconds
    #[arg(long)]
    exit_after: Option<u64>,

    /// Write per-frame overlay reports (JSON lines) to this path
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Map fingertips outside the active region past the screen edge
    #[arg(long)]
    no_clamp: bool,

    /// Write the effective config (file plus flags) to this path and exit
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,

    /// Show version and exit
    #[arg(long)]
    version: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("handmouse {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "handmouse=info".into()),
        )
        .init();

    info!("handmouse v{} starting", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    if let Some(path) = &cli.write_config {
        config
            .save(path)
            .with_context(|| format!("writing config {}", path.display()))?;
        info!("wrote config to {}", path.display());
        return Ok(());
    }

    let mut sink = open_sink(config.output.backend)?;
    info!(
        "pointer backend: {} (requested {})",
        sink.name(),
        config.output.backend.as_str()
    );

    let screen = match config.screen_size() {
        Some(size) => size,
        None => sink.screen_size().unwrap_or_else(|| {
            warn!("screen size unknown, assuming {}", FALLBACK_SCREEN);
            FALLBACK_SCREEN
        }),
    };

    let orchestrator = FrameOrchestrator::new(screen).with_mapping(config.region_mapping());
    let options = SessionOptions {
        max_frames: config.session.max_frames,
        exit_after: config.session.exit_after_secs.map(Duration::from_secs),
        status_interval: match config.session.status_interval_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        },
    };

    let stop_flag = session::install_signal_handlers();
    let mut session = Session::new(orchestrator, options, stop_flag);
    if let Some(path) = &config.session.overlay_path {
        let file = File::create(path)
            .with_context(|| format!("creating overlay output {}", path.display()))?;
        info!("writing overlay reports to {}", path.display());
        session = session.with_overlay(Box::new(BufWriter::new(file)));
    }

    let mut source = open_source(&config.input.path)?;
    let stats = session
        .run(source.as_mut(), sink.as_mut())
        .context("frame loop aborted")?;

    info!(
        "handmouse exiting ({}), {} frame(s) with a hand out of {}",
        stats.stop.as_str(),
        stats.counts.hand_frames,
        stats.counts.frames
    );
    Ok(())
}

/// Load the config file and apply command-line overrides.
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            Config::load(path).with_context(|| format!("loading config {}", path.display()))?
        }
        None => Config::load_default().context("loading default config")?,
    };

    if let Some(input) = &cli.input {
        config.input.path = input.clone();
    }
    if let Some(backend) = cli.backend {
        config.output.backend = backend;
    }
    if let Some(screen) = &cli.screen {
        let size = Size::parse(screen)
            .with_context(|| format!("invalid --screen {screen:?}, expected WxH"))?;
        config.screen.width = size.width;
        config.screen.height = size.height;
    }
    if cli.max_frames.is_some() {
        config.session.max_frames = cli.max_frames;
    }
    if cli.exit_after.is_some() {
        config.session.exit_after_secs = cli.exit_after;
    }
    if cli.overlay.is_some() {
        config.session.overlay_path = cli.overlay.clone();
    }
    if cli.no_clamp {
        config.session.clamp_to_screen = false;
    }

    config.validate()?;
    Ok(config)
}

fn open_source(path: &str) -> anyhow::Result<Box<dyn LandmarkSource>> {
    if path == "-" {
        info!("reading landmarks from stdin");
        return Ok(Box::new(JsonLinesSource::new(io::stdin().lock())));
    }
    let file = File::open(path).with_context(|| format!("opening landmark stream {path}"))?;
    info!("reading landmarks from {}", path);
    Ok(Box::new(JsonLinesSource::new(BufReader::new(file))))
}

fn open_sink(backend: Backend) -> anyhow::Result<Box<dyn PointerSink>> {
    match backend {
        Backend::Log => Ok(Box::new(LogSink::new())),
        Backend::Enigo => enigo_sink(),
        Backend::Auto => {
            if cfg!(feature = "enigo") {
                info!("auto-detected: enigo backend compiled in");
                enigo_sink()
            } else {
                info!("auto-detected: no injection backend compiled in, using log backend");
                Ok(Box::new(LogSink::new()))
            }
        }
    }
}

#[cfg(feature = "enigo")]
fn enigo_sink() -> anyhow::Result<Box<dyn PointerSink>> {
    Ok(Box::new(handmouse::output::EnigoSink::new()?))
}

#[cfg(not(feature = "enigo"))]
fn enigo_sink() -> anyhow::Result<Box<dyn PointerSink>> {
    anyhow::bail!("the enigo backend is not compiled in; rebuild with --features enigo")
}
