//! gesture_cam — entry point.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gesture_actions::{InputBackend, LogBackend, TableDispatcher};
use gesture_cam::app::{run_pipeline, FrameOverlay, LogOverlay, StopSignal};
use gesture_cam::config::AppConfig;
use gesture_cam::replay::ReplaySource;
use gesture_cam::sim::SimFrameSource;
use gesture_cam::source::{EmbeddedLandmarks, FrameSource, LandmarkFrame};
use gesture_cam::visualizer::Visualizer;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum BackendKind {
    /// Log actions only
    Log,
    /// Inject real key / mouse events through /dev/uinput
    Uinput,
}

#[derive(Parser, Debug)]
#[command(name = "gesture_cam", version, about = "Static hand gestures → keyboard / mouse actions")]
struct Cli {
    /// Replay JSON-lines landmark records from a file (`-` for stdin) instead of the simulator
    #[arg(long, value_name = "PATH")]
    replay: Option<PathBuf>,

    /// JSON config file with classifier threshold and action table
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the OK thumb-index distance threshold (normalized units)
    #[arg(long, value_name = "DIST")]
    threshold: Option<f32>,

    /// Run without a window and log label changes instead (needs --replay)
    #[arg(long, requires = "replay")]
    headless: bool,

    /// Where recognized actions are sent
    #[arg(long, value_enum, default_value_t = BackendKind::Log)]
    backend: BackendKind,
}

type BoxedSource  = Box<dyn FrameSource<Frame = LandmarkFrame>>;
type BoxedOverlay = Box<dyn FrameOverlay<LandmarkFrame>>;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gesture_cam=info,gesture_actions=info,hand_gesture=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Gesture Cam — static hand-gesture controller        ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let mut cfg = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None       => AppConfig::default(),
    };
    if let Some(t) = cli.threshold {
        cfg = cfg.with_threshold(t)?;
    }
    let classifier = cfg.classifier()?;

    let backend = open_backend(cli.backend)?;
    info!(backend = backend.name(), bindings = cfg.actions.len(), "input backend ready");
    let mut dispatcher = TableDispatcher::new(cfg.actions, backend);
    for (label, action) in dispatcher.table().iter() {
        info!(label = label.as_str(), %action, "binding");
    }

    let stop = StopSignal::new();
    let (mut source, mut overlay): (BoxedSource, BoxedOverlay) = match &cli.replay {
        Some(path) => {
            let source = open_replay(path)?;
            let overlay: BoxedOverlay = if cli.headless {
                Box::new(LogOverlay::default())
            } else {
                Box::new(open_window(None, &stop)?)
            };
            (source, overlay)
        }
        None => {
            println!("  Mode: keyboard simulation — press 1–6 in the window, 0 hides the hand, Q quits");
            println!();
            let (tx, rx) = mpsc::channel();
            let overlay: BoxedOverlay = Box::new(open_window(Some(tx), &stop)?);
            let source: BoxedSource = Box::new(SimFrameSource::new(rx));
            (source, overlay)
        }
    };

    let stats = run_pipeline(
        source.as_mut(),
        &mut EmbeddedLandmarks,
        &classifier,
        &mut dispatcher,
        overlay.as_mut(),
        &stop,
    )?;

    println!();
    println!("  {} frames, {} actions ({:?})", stats.frames, stats.actions, stats.reason);
    for (label, n) in &stats.labels {
        println!("    {:<18} {:>8}", label.display_name(), n);
    }
    Ok(())
}

fn open_backend(kind: BackendKind) -> Result<Box<dyn InputBackend>> {
    match kind {
        BackendKind::Log => Ok(Box::new(LogBackend)),
        #[cfg(feature = "uinput")]
        BackendKind::Uinput => Ok(Box::new(gesture_actions::UinputBackend::open()?)),
        #[cfg(not(feature = "uinput"))]
        BackendKind::Uinput => Err(anyhow!("the uinput backend needs a build with `--features uinput`")),
    }
}

fn open_replay(path: &Path) -> Result<BoxedSource> {
    if path == Path::new("-") {
        info!("replaying landmarks from stdin");
        return Ok(Box::new(ReplaySource::new(io::stdin().lock())));
    }
    let source = ReplaySource::open(path)
        .with_context(|| format!("cannot open replay file {}", path.display()))?;
    info!(path = %path.display(), "replaying landmarks");
    Ok(Box::new(source))
}

fn open_window(sim_tx: Option<mpsc::Sender<gesture_cam::sim::SimInput>>, stop: &StopSignal) -> Result<Visualizer> {
    Visualizer::new(sim_tx, stop.clone()).map_err(|e| anyhow!("cannot open overlay window: {}", e))
}
