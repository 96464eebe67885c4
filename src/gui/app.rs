//! Main application state and GUI logic.
//!
//! This module defines the main application struct and implements the
//! eframe::App trait: it schedules playback ticks, forwards user input to
//! the session, and draws the HUD and panels.

use eframe::egui;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::core::config::ColorSettings;
use crate::core::layout::Viewport;
use crate::core::playback::{Command, LARGE_STEP};
use crate::core::session::{HUD_HEIGHT, Session};

use super::controls::ControlsRenderer;
use super::panel::{PanelRenderer, to_color32};

/// Paces playback ticks at the session's frames per second.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Last time a tick was taken
    last_update: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
        }
    }

    /// Duration of one frame at `fps`.
    pub fn interval(fps: u32) -> Duration {
        Duration::from_secs_f32(1.0 / fps.max(1) as f32)
    }

    /// Check if enough time has elapsed to take the next tick.
    pub fn should_advance(&self, fps: u32) -> bool {
        self.last_update.elapsed() >= Self::interval(fps)
    }

    /// Time left until the next tick is due.
    pub fn until_next(&self, fps: u32) -> Duration {
        Self::interval(fps).saturating_sub(self.last_update.elapsed())
    }

    /// Mark that a tick has occurred.
    pub fn mark_advanced(&mut self) {
        self.last_update = Instant::now();
    }
}

/// Result of processing keyboard input for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
enum KeyAction {
    Command(Command),
    Quit,
}

/// Main application: one session drawn as a grid of panels.
pub struct MultiReplayApp {
    /// Replays, labels, playback and layout
    session: Session,
    /// Palette and cell appearance
    colors: ColorSettings,
    /// Tick pacing
    clock: FrameClock,
}

impl MultiReplayApp {
    /// Create a new application instance.
    pub fn new(_cc: &eframe::CreationContext<'_>, session: Session, colors: ColorSettings) -> Self {
        Self {
            session,
            colors,
            clock: FrameClock::new(),
        }
    }

    /// Apply a command, restarting the tick timer when playback resumes.
    fn apply(&mut self, command: Command) {
        let was_paused = self.session.state().paused;
        self.session.apply(command);
        if was_paused && !self.session.state().paused {
            self.clock.mark_advanced();
        }
        debug!(?command, cursor = self.session.state().cursor, "command applied");
    }

    /// Take a playback tick if one is due and schedule the next repaint.
    fn advance_playback(&mut self, ctx: &egui::Context) {
        let state = self.session.state();
        if state.paused {
            return;
        }
        let fps = state.fps;

        if self.clock.should_advance(fps) {
            self.session.tick();
            self.clock.mark_advanced();
        }
        ctx.request_repaint_after(self.clock.until_next(fps));
    }

    /// Map keyboard shortcuts to an action.
    fn handle_keyboard_shortcuts(&self, ctx: &egui::Context) -> Option<KeyAction> {
        ctx.input(|i| {
            let command = if i.key_pressed(egui::Key::Escape) {
                return Some(KeyAction::Quit);
            } else if i.key_pressed(egui::Key::Space) || i.key_pressed(egui::Key::P) {
                Command::TogglePlay
            } else if i.key_pressed(egui::Key::ArrowRight) {
                Command::Step(1)
            } else if i.key_pressed(egui::Key::ArrowLeft) {
                Command::Step(-1)
            } else if i.key_pressed(egui::Key::CloseBracket) {
                Command::Step(LARGE_STEP)
            } else if i.key_pressed(egui::Key::OpenBracket) {
                Command::Step(-LARGE_STEP)
            } else if i.key_pressed(egui::Key::N) {
                Command::ToggleNames
            } else if i.key_pressed(egui::Key::F) {
                Command::ToggleFullNames
            } else if i.key_pressed(egui::Key::B) {
                Command::ToggleHoldLast
            } else if i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals) {
                Command::Speed(1)
            } else if i.key_pressed(egui::Key::Minus) {
                Command::Speed(-1)
            } else {
                return None;
            };
            Some(KeyAction::Command(command))
        })
    }

    /// Draw the HUD and all panels into the whole window.
    fn render(&mut self, ui: &mut egui::Ui) -> Option<Command> {
        let window = ui.max_rect();
        let viewport = Viewport::new(
            window.width().max(0.0) as u32,
            window.height().max(0.0) as u32,
        );
        if self.session.resize(viewport) {
            debug!(
                width = viewport.width,
                height = viewport.height,
                panels = self.session.len(),
                "layout recomputed"
            );
        }

        let hud = egui::Rect::from_min_size(
            window.min,
            egui::vec2(window.width(), HUD_HEIGHT as f32),
        );
        let status = self.session.hud_text();
        let action =
            ControlsRenderer::new(self.session.state(), &status, &self.colors).render(ui, hud);

        let painter = ui.painter().clone();
        for view in self.session.panels() {
            let renderer = PanelRenderer::new(&view, &self.colors);
            renderer.render(&painter, window.min);

            let id = ui.id().with(("panel", view.index));
            let rect = renderer.panel_rect(window.min);
            let response = ui.interact(rect, id, egui::Sense::hover());
            let tooltip = response
                .hover_pos()
                .and_then(|pos| renderer.hover_text(window.min, pos));
            if let Some(text) = tooltip {
                response.on_hover_text_at_pointer(text);
            }
        }

        action
    }
}

impl eframe::App for MultiReplayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.handle_keyboard_shortcuts(ctx) {
            Some(KeyAction::Quit) => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
            Some(KeyAction::Command(command)) => self.apply(command),
            None => {}
        }

        self.advance_playback(ctx);

        let background = to_color32(self.colors.background);
        let mut action = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(background))
            .show(ctx, |ui| {
                action = self.render(ui);
            });

        if let Some(command) = action {
            self.apply(command);
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_interval() {
        assert_eq!(FrameClock::interval(1), Duration::from_secs(1));
        assert_eq!(FrameClock::interval(0), Duration::from_secs(1));
    }

    #[test]
    fn test_should_advance_timing() {
        let mut clock = FrameClock::new();
        clock.mark_advanced();

        // Should not advance immediately at 8 FPS
        assert!(!clock.should_advance(8));
        assert!(clock.until_next(8) > Duration::ZERO);

        // Wait for one frame at 60 FPS (~17ms)
        thread::sleep(Duration::from_millis(20));
        assert!(clock.should_advance(60));
        assert_eq!(clock.until_next(60), Duration::ZERO);
    }
}
