//! A comparison session: loaded replays, their labels, shared playback and
//! the current panel layout.
//!
//! The session answers the renderer's per-tick question "what does panel
//! `i` show right now" and accepts the user's commands. It is the only
//! owner of its replays and state.

use std::path::PathBuf;

use tracing::{info, warn};

use super::error::AppError;
use super::layout::{PANEL_PADDING, PanelLayout, Rect, Viewport, cell_size};
use super::naming::{DisplayName, display_names};
use super::playback::{Command, FrameView, PlaybackController, PlaybackState};
use super::replay::{Frame, Replay};
use super::source;

/// Height of the HUD bar above the panels.
pub const HUD_HEIGHT: u32 = 48;

/// Everything the renderer needs for one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView<'a> {
    /// Panel position in load order
    pub index: usize,
    /// Panel rectangle in window pixels
    pub rect: Rect,
    /// Edge of one grid cell in pixels
    pub cell_size: u32,
    /// Board width in cells
    pub grid_width: usize,
    /// Board height in cells
    pub grid_height: usize,
    /// Frame to draw; `None` draws a blank panel
    pub frame: Option<&'a Frame>,
    /// Label to draw in the name bar; `None` hides the bar
    pub label: Option<&'a str>,
    /// Frame counter line
    pub counter: String,
}

/// A set of replays played in lock-step.
#[derive(Debug, Clone)]
pub struct Session {
    replays: Vec<Replay>,
    names: Vec<DisplayName>,
    controller: PlaybackController,
    layout: PanelLayout,
}

impl Session {
    /// Build a session from already parsed replays.
    ///
    /// Labels are derived from each replay's `source_label`.
    pub fn new(replays: Vec<Replay>, state: PlaybackState) -> Result<Self, AppError> {
        if replays.is_empty() {
            return Err(AppError::NoReplaysLoaded { attempted: 0 });
        }

        let labels: Vec<&str> = replays.iter().map(|r| r.source_label.as_str()).collect();
        let names = display_names(&labels);
        let max_frames = replays.iter().map(Replay::len).max().unwrap_or(1);

        Ok(Self {
            replays,
            names,
            controller: PlaybackController::new(max_frames, state),
            layout: PanelLayout::new(HUD_HEIGHT),
        })
    }

    /// Read every path, skipping files that fail with a warning.
    ///
    /// Fails only when no file could be loaded.
    pub fn load(paths: &[PathBuf], state: PlaybackState) -> Result<Self, AppError> {
        let mut replays = Vec::with_capacity(paths.len());

        for path in paths {
            match source::read_replay(path) {
                Ok(replay) => replays.push(replay),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping replay"),
            }
        }

        if replays.is_empty() {
            return Err(AppError::NoReplaysLoaded {
                attempted: paths.len(),
            });
        }

        info!(
            loaded = replays.len(),
            skipped = paths.len() - replays.len(),
            "session ready"
        );
        Self::new(replays, state)
    }

    /// Number of panels.
    pub fn len(&self) -> usize {
        self.replays.len()
    }

    pub fn names(&self) -> &[DisplayName] {
        &self.names
    }

    pub fn state(&self) -> &PlaybackState {
        self.controller.state()
    }

    pub fn max_frames(&self) -> usize {
        self.controller.max_frames()
    }

    /// Advance playback by one tick.
    pub fn tick(&mut self) {
        self.controller.tick();
    }

    /// Apply a user command.
    pub fn apply(&mut self, command: Command) {
        self.controller.apply(command);
    }

    /// Lay panels out for `viewport`.
    ///
    /// # Returns
    /// `true` if the layout was recomputed.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        self.layout.update(viewport, self.replays.len())
    }

    /// What replay `index` shows at the current cursor.
    pub fn frame_for(&self, index: usize) -> Option<FrameView<'_>> {
        self.replays
            .get(index)
            .map(|replay| self.controller.frame_for(replay))
    }

    /// Label for panel `index` under the current name toggles.
    pub fn label_for(&self, index: usize) -> Option<&str> {
        let state = self.controller.state();
        if !state.show_names {
            return None;
        }
        self.names.get(index).map(|name| {
            if state.show_full_names {
                name.full.as_str()
            } else {
                name.short.as_str()
            }
        })
    }

    /// Renderer view of panel `index`; `None` before the first
    /// [`resize`](Self::resize) or for an unknown index.
    pub fn panel(&self, index: usize) -> Option<PanelView<'_>> {
        let replay = self.replays.get(index)?;
        let rect = self.layout.rect(index)?;
        let label = self.label_for(index);
        let view = self.frame_for(index)?;

        let total = replay.len();
        let counter = match view {
            FrameView::Frame { index, frame } => format!(
                "Frame {}/{} • Round {}",
                index + 1,
                total,
                frame
                    .round
                    .map_or_else(|| "-".to_string(), |r| r.to_string())
            ),
            FrameView::Blank => format!("Frame {total}/{total} • ended"),
        };

        Some(PanelView {
            index,
            rect,
            cell_size: cell_size(
                rect,
                replay.width,
                replay.height,
                label.is_some(),
                PANEL_PADDING,
            ),
            grid_width: replay.width,
            grid_height: replay.height,
            frame: view.frame(),
            label,
            counter,
        })
    }

    /// Views of all laid-out panels.
    pub fn panels(&self) -> Vec<PanelView<'_>> {
        (0..self.replays.len())
            .filter_map(|i| self.panel(i))
            .collect()
    }

    /// Status line for the HUD.
    pub fn hud_text(&self) -> String {
        let state = self.controller.state();
        format!(
            "{} games • Frame {}/{} • FPS {} • {}",
            self.replays.len(),
            self.controller.cursor() + 1,
            self.controller.max_frames(),
            state.fps,
            if state.paused { "PAUSED" } else { "PLAYING" }
        )
    }
}
