//! Panel rendering module.
//!
//! Draws one replay panel: background, optional name bar, frame counter,
//! board grid and cells. All geometry comes from the session's `PanelView`.

use eframe::egui::{self, Color32, Painter, Pos2, Rect, Stroke};

use crate::core::config::ColorSettings;
use crate::core::layout::{self, NAME_BAR_HEIGHT, PANEL_PADDING};
use crate::core::replay::{CellAppearance, CellCode};
use crate::core::session::PanelView;

/// Corner radius of panel and name bar backgrounds.
const PANEL_ROUNDING: f32 = 14.0;

/// Corner radius of wall blocks.
const WALL_ROUNDING: f32 = 4.0;

/// Height reserved for the frame counter line.
const COUNTER_HEIGHT: f32 = 16.0;

/// Gap between the counter line and the board.
const COUNTER_GAP: f32 = 8.0;

/// Convert a color array to egui Color32.
#[inline]
pub fn to_color32(color: [u8; 3]) -> Color32 {
    Color32::from_rgb(color[0], color[1], color[2])
}

/// Convert a layout rectangle to egui coordinates relative to `origin`.
pub fn to_egui_rect(rect: layout::Rect, origin: Pos2) -> Rect {
    Rect::from_min_size(
        origin + egui::vec2(rect.x as f32, rect.y as f32),
        egui::vec2(rect.w as f32, rect.h as f32),
    )
}

/// Renders a single replay panel.
pub struct PanelRenderer<'a> {
    /// What to draw
    view: &'a PanelView<'a>,
    /// Palette and cell appearance
    colors: &'a ColorSettings,
}

impl<'a> PanelRenderer<'a> {
    pub fn new(view: &'a PanelView<'a>, colors: &'a ColorSettings) -> Self {
        Self { view, colors }
    }

    /// Draw the panel with window origin `origin`.
    pub fn render(&self, painter: &Painter, origin: Pos2) {
        let rect = self.panel_rect(origin);
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }

        painter.rect_filled(
            rect,
            PANEL_ROUNDING,
            to_color32(self.colors.panel_background),
        );

        let top = self.draw_name_bar(painter, rect);
        painter.text(
            Pos2::new(rect.left() + PANEL_PADDING as f32, top + 4.0),
            egui::Align2::LEFT_TOP,
            &self.view.counter,
            egui::FontId::proportional(13.0),
            to_color32(self.colors.text_counter),
        );

        let board = self.board_rect(rect);

        // Keep oversized boards from bleeding into neighbouring panels.
        let painter = painter.with_clip_rect(rect);
        self.draw_grid(&painter, board);
        self.draw_cells(&painter, board);
    }

    /// Panel rectangle in window coordinates.
    pub fn panel_rect(&self, origin: Pos2) -> Rect {
        to_egui_rect(self.view.rect, origin)
    }

    /// Board area inside the panel rectangle `rect`.
    fn board_rect(&self, rect: Rect) -> Rect {
        let top = if self.view.label.is_some() {
            rect.top() + NAME_BAR_HEIGHT as f32
        } else {
            rect.top()
        };
        let cell = self.view.cell_size as f32;
        let board_w = self.view.grid_width as f32 * cell;
        let board_h = self.view.grid_height as f32 * cell;
        Rect::from_min_size(
            Pos2::new(
                rect.left() + ((rect.width() - board_w) / 2.0).max(0.0),
                top + COUNTER_HEIGHT + COUNTER_GAP,
            ),
            egui::vec2(board_w, board_h),
        )
    }

    /// Tooltip for the occupied cell under `pointer`, e.g. `"Wall '#' (row 2, col 5)"`.
    ///
    /// Empty cells, blank panels and points outside the board give `None`.
    pub fn hover_text(&self, origin: Pos2, pointer: Pos2) -> Option<String> {
        let frame = self.view.frame?;
        let panel = self.panel_rect(origin);
        let board = self.board_rect(panel);
        if !panel.contains(pointer) || !board.contains(pointer) || self.view.cell_size == 0 {
            return None;
        }

        let cell = self.view.cell_size as f32;
        let col = ((pointer.x - board.left()) / cell) as usize;
        let row = ((pointer.y - board.top()) / cell) as usize;
        if row >= self.view.grid_height || col >= self.view.grid_width {
            return None;
        }

        match frame.cell(row, col) {
            CellCode::Empty => None,
            code => Some(format!(
                "{} '{}' (row {row}, col {col})",
                code.describe(),
                code.as_char()
            )),
        }
    }

    /// Draw the name bar if a label is set; returns the y where content starts.
    fn draw_name_bar(&self, painter: &Painter, rect: Rect) -> f32 {
        let Some(label) = self.view.label else {
            return rect.top();
        };

        let bar = Rect::from_min_size(
            rect.min,
            egui::vec2(rect.width(), NAME_BAR_HEIGHT as f32),
        );
        painter.rect_filled(bar, PANEL_ROUNDING, to_color32(self.colors.header_background));
        painter.text(
            Pos2::new(bar.left() + PANEL_PADDING as f32, bar.center().y),
            egui::Align2::LEFT_CENTER,
            label,
            egui::FontId::proportional(16.0),
            to_color32(self.colors.text_header),
        );
        bar.bottom()
    }

    /// Draw the cell grid lines.
    fn draw_grid(&self, painter: &Painter, board: Rect) {
        let cell = self.view.cell_size as f32;
        let stroke = Stroke::new(1.0, to_color32(self.colors.grid));

        for r in 0..=self.view.grid_height {
            let y = board.top() + r as f32 * cell;
            painter.line_segment(
                [Pos2::new(board.left(), y), Pos2::new(board.right(), y)],
                stroke,
            );
        }
        for c in 0..=self.view.grid_width {
            let x = board.left() + c as f32 * cell;
            painter.line_segment(
                [Pos2::new(x, board.top()), Pos2::new(x, board.bottom())],
                stroke,
            );
        }
    }

    /// Draw the occupied cells of the current frame. Blank panels draw none.
    fn draw_cells(&self, painter: &Painter, board: Rect) {
        let Some(frame) = self.view.frame else {
            return;
        };
        let cell = self.view.cell_size as f32;

        for row in 0..self.view.grid_height {
            for col in 0..self.view.grid_width {
                let code = frame.cell(row, col);
                let Some(color) = self.colors.appearance(code) else {
                    continue;
                };

                let min = Pos2::new(
                    board.left() + col as f32 * cell,
                    board.top() + row as f32 * cell,
                );
                let cell_rect = Rect::from_min_size(min, egui::vec2(cell, cell));

                match code {
                    CellCode::Wall => {
                        painter.rect_filled(
                            cell_rect.shrink(1.0),
                            WALL_ROUNDING,
                            to_color32(color),
                        );
                    }
                    _ => {
                        painter.circle_filled(cell_rect.center(), cell * 0.4, to_color32(color));
                    }
                }
            }
        }
    }
}
