//! HUD controls module.
//!
//! This module renders the HUD bar: transport buttons, display toggles,
//! speed buttons and the session status line.

use eframe::egui::{self, Pos2, Rect};

use crate::core::config::ColorSettings;
use crate::core::playback::{Command, LARGE_STEP, PlaybackState};

use super::panel::to_color32;

/// Button width in pixels.
const BUTTON_WIDTH: f32 = 78.0;

/// Button height in pixels.
const BUTTON_HEIGHT: f32 = 36.0;

/// Horizontal gap between buttons.
const BUTTON_GAP: f32 = 8.0;

/// Left inset of the first button.
const HUD_INSET: f32 = 10.0;

/// Number of HUD buttons.
const BUTTON_COUNT: usize = 10;

/// Width kept free for the status text right of the buttons.
const STATUS_WIDTH: f32 = 360.0;

/// Narrowest window that fits every button and the status text side by side.
pub const HUD_MIN_WIDTH: f32 = 2.0 * HUD_INSET
    + BUTTON_COUNT as f32 * BUTTON_WIDTH
    + (BUTTON_COUNT - 1) as f32 * BUTTON_GAP
    + HUD_INSET
    + STATUS_WIDTH;

/// Renders the HUD and returns any command triggered by a click.
pub struct ControlsRenderer<'a> {
    /// Current playback state, for button labels
    state: &'a PlaybackState,
    /// Status text shown right of the buttons
    status: &'a str,
    /// Palette
    colors: &'a ColorSettings,
}

impl<'a> ControlsRenderer<'a> {
    pub fn new(state: &'a PlaybackState, status: &'a str, colors: &'a ColorSettings) -> Self {
        Self {
            state,
            status,
            colors,
        }
    }

    /// Render the HUD into `bar` and return any triggered command.
    pub fn render(&self, ui: &mut egui::Ui, bar: Rect) -> Option<Command> {
        ui.painter()
            .rect_filled(bar, 0.0, to_color32(self.colors.header_background));

        let mut action: Option<Command> = None;
        let mut x = bar.left() + HUD_INSET;
        let y = bar.center().y - BUTTON_HEIGHT / 2.0;

        for (label, hover, command) in self.buttons() {
            let rect = Rect::from_min_size(
                Pos2::new(x, y),
                egui::vec2(BUTTON_WIDTH, BUTTON_HEIGHT),
            );
            if ui
                .put(rect, egui::Button::new(label))
                .on_hover_text(hover)
                .clicked()
            {
                action = Some(command);
            }
            x += BUTTON_WIDTH + BUTTON_GAP;
        }

        // Status never paints over the buttons, even below the minimum width.
        let status_area = Rect::from_min_max(
            Pos2::new(x - BUTTON_GAP + HUD_INSET, bar.top()),
            bar.max,
        );
        ui.painter().with_clip_rect(status_area).text(
            Pos2::new(bar.right() - HUD_INSET, bar.center().y),
            egui::Align2::RIGHT_CENTER,
            self.status,
            egui::FontId::proportional(16.0),
            to_color32(self.colors.text_header),
        );

        action
    }

    /// Buttons in display order: label, hover text, command.
    fn buttons(&self) -> [(&'static str, &'static str, Command); BUTTON_COUNT] {
        let play = if self.state.paused {
            "⏯ Play"
        } else {
            "⏸ Pause"
        };
        let names = if self.state.show_names {
            "Hide Names"
        } else {
            "Show Names"
        };
        let full = if self.state.show_full_names {
            "Short"
        } else {
            "Full"
        };
        let end_policy = if self.state.hold_last { "Blank" } else { "Hold" };

        [
            ("⏮ -10", "Back 10 frames ([)", Command::Step(-LARGE_STEP)),
            ("◀ -1", "Previous frame (←)", Command::Step(-1)),
            (play, "Play / pause (Space)", Command::TogglePlay),
            ("+1 ▶", "Next frame (→)", Command::Step(1)),
            ("+10 ⏭", "Forward 10 frames (])", Command::Step(LARGE_STEP)),
            (names, "Show or hide names (N)", Command::ToggleNames),
            (full, "Short or full names (F)", Command::ToggleFullNames),
            (
                end_policy,
                "Hold last frame or blank finished games (B)",
                Command::ToggleHoldLast,
            ),
            ("Speed-", "Slower (-)", Command::Speed(-1)),
            ("Speed+", "Faster (+)", Command::Speed(1)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_labels_follow_state() {
        let colors = ColorSettings::default();
        let mut state = PlaybackState::default();
        let renderer = ControlsRenderer::new(&state, "", &colors);
        let labels: Vec<_> = renderer.buttons().iter().map(|b| b.0).collect();
        assert_eq!(labels[2], "⏸ Pause");
        assert_eq!(labels[5], "Show Names");
        assert_eq!(labels[7], "Blank");

        state.paused = true;
        state.show_names = true;
        state.hold_last = false;
        let renderer = ControlsRenderer::new(&state, "", &colors);
        let labels: Vec<_> = renderer.buttons().iter().map(|b| b.0).collect();
        assert_eq!(labels[2], "⏯ Play");
        assert_eq!(labels[5], "Hide Names");
        assert_eq!(labels[7], "Hold");
    }

    #[test]
    fn test_min_width_fits_buttons_and_status() {
        let buttons = BUTTON_COUNT as f32 * (BUTTON_WIDTH + BUTTON_GAP) - BUTTON_GAP;
        assert!(HUD_MIN_WIDTH >= 2.0 * HUD_INSET + buttons + STATUS_WIDTH);

        // Widest status line at 16 px is well under the reserved width.
        let widest = "999 games • Frame 99999/99999 • FPS 60 • PLAYING";
        assert!(widest.chars().count() as f32 * 7.0 <= STATUS_WIDTH);
    }

    #[test]
    fn test_buttons_cover_command_surface() {
        let colors = ColorSettings::default();
        let state = PlaybackState::default();
        let renderer = ControlsRenderer::new(&state, "", &colors);
        let commands: Vec<_> = renderer.buttons().iter().map(|b| b.2).collect();
        assert!(commands.contains(&Command::Step(-10)));
        assert!(commands.contains(&Command::Step(1)));
        assert!(commands.contains(&Command::TogglePlay));
        assert!(commands.contains(&Command::ToggleHoldLast));
        assert!(commands.contains(&Command::Speed(-1)));
    }
}
