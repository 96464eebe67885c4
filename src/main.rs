//! Grid Replay Viewer - play recorded grid game replays side by side.

mod core;
mod gui;

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::core::config::AppSettings;
use crate::core::error::AppError;
use crate::core::playback::PlaybackState;
use crate::core::session::Session;
use crate::core::source;
use crate::gui::{HUD_MIN_WIDTH, MultiReplayApp};

/// Default window size when the settings file has none.
const DEFAULT_WINDOW_SIZE: (f32, f32) = (1280.0, 800.0);

#[derive(Parser, Debug)]
#[command(name = "grid-replay-viewer")]
#[command(about = "Play recorded grid game replays side by side in lock-step")]
struct Cli {
    /// Folder with replay logs; a picker opens when omitted
    #[arg(long)]
    folder: Option<PathBuf>,

    /// Initial playback speed in frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Blank a panel once its replay has ended instead of holding the last frame
    #[arg(long)]
    blank_after_end: bool,

    /// Show panel name bars from the start
    #[arg(long)]
    show_names: bool,

    /// File name suffix of replay logs
    #[arg(long)]
    extension: Option<String>,

    /// Settings file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Initial playback state from CLI flags over settings.
fn initial_state(cli: &Cli, settings: &AppSettings) -> PlaybackState {
    PlaybackState {
        fps: cli.fps.unwrap_or_else(|| settings.get_default_fps()),
        hold_last: settings.hold_last && !cli.blank_after_end,
        show_names: settings.show_names || cli.show_names,
        ..PlaybackState::default()
    }
}

/// Resolve the folder, discover logs and load them into a session.
fn build_session(cli: &Cli, settings: &AppSettings) -> Result<Session, AppError> {
    let folder = match &cli.folder {
        Some(folder) => folder.clone(),
        None => rfd::FileDialog::new()
            .set_title("Select replay folder")
            .pick_folder()
            .ok_or(AppError::NoFolderSelected)?,
    };

    let suffix = cli.extension.as_deref().unwrap_or(&settings.log_suffix);
    let paths = source::discover_logs(&folder, suffix)?;
    info!(folder = %folder.display(), files = paths.len(), "loading replays");

    Session::load(&paths, initial_state(cli, settings))
}

/// Log a startup error and show it in a message box.
fn report_error(err: &AppError) {
    let level = if err.is_fatal() {
        error!(error = %err, "{}", err.title());
        rfd::MessageLevel::Error
    } else {
        warn!(error = %err, "{}", err.title());
        rfd::MessageLevel::Warning
    };
    rfd::MessageDialog::new()
        .set_level(level)
        .set_title(err.title())
        .set_description(err.detailed_info())
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

fn main() -> eframe::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = AppSettings::load(cli.config.as_deref());

    let session = match build_session(&cli, &settings) {
        Ok(session) => session,
        Err(AppError::NoFolderSelected) => {
            info!("no folder selected, exiting");
            std::process::exit(1);
        }
        Err(err) => {
            report_error(&err);
            std::process::exit(1);
        }
    };

    for name in session.names() {
        info!(label = %name.short, file = %name.full, "panel");
    }

    let (width, height) = settings.window_size.unwrap_or(DEFAULT_WINDOW_SIZE);
    let width = width.max(HUD_MIN_WIDTH);
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_min_inner_size([HUD_MIN_WIDTH, 480.0]),
        ..Default::default()
    };

    let colors = settings.colors;
    eframe::run_native(
        "Grid Replay Viewer",
        options,
        Box::new(|cc| Ok(Box::new(MultiReplayApp::new(cc, session, colors)))),
    )
}
