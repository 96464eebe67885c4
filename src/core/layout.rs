//! Multi-panel layout and per-panel cell scale.
//!
//! Panels are arranged in the most nearly square grid that fits them,
//! below a fixed-height HUD bar. All geometry is in whole pixels.

/// Gap kept around every panel, on all four sides.
pub const PANEL_MARGIN: u32 = 6;

/// Padding between a panel border and its board.
pub const PANEL_PADDING: u32 = 8;

/// Height of the name bar shown when names are visible.
pub const NAME_BAR_HEIGHT: u32 = 28;

/// Smallest cell edge ever returned.
pub const MIN_CELL_SIZE: u32 = 4;

/// Cell edge used for grids with a zero dimension.
pub const DEFAULT_CELL_SIZE: u32 = 16;

/// Axis-aligned rectangle in window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Size of the drawable window area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Columns and rows of the panel grid for `count` panels.
///
/// `cols = ceil(sqrt(count))`, `rows = ceil(count / cols)`.
pub fn grid_shape(count: usize) -> (usize, usize) {
    if count == 0 {
        return (0, 0);
    }
    let mut cols = (count as f64).sqrt().ceil() as usize;
    // Float rounding can overshoot by one for large perfect squares.
    while cols > 1 && (cols - 1) * (cols - 1) >= count {
        cols -= 1;
    }
    while cols * cols < count {
        cols += 1;
    }
    let rows = count.div_ceil(cols);
    (cols, rows)
}

/// One rectangle per panel, row-major, below a HUD of `hud_height` pixels.
pub fn layout(count: usize, viewport: Viewport, hud_height: u32) -> Vec<Rect> {
    let (cols, rows) = grid_shape(count);
    if cols == 0 {
        return Vec::new();
    }

    let panel_w = viewport.width / cols as u32;
    let panel_h = viewport.height.saturating_sub(hud_height) / rows as u32;

    (0..count)
        .map(|i| {
            let (row, col) = ((i / cols) as u32, (i % cols) as u32);
            Rect {
                x: col * panel_w + PANEL_MARGIN,
                y: hud_height + row * panel_h + PANEL_MARGIN,
                w: panel_w.saturating_sub(2 * PANEL_MARGIN),
                h: panel_h.saturating_sub(2 * PANEL_MARGIN),
            }
        })
        .collect()
}

/// Pixel edge of one cell for a `grid_w × grid_h` board drawn inside `panel`.
///
/// `padding` is kept free on every side of the board. Never below
/// [`MIN_CELL_SIZE`]; the board is centred rather than stretched, so it may
/// not fill the panel exactly.
pub fn cell_size(
    panel: Rect,
    grid_w: usize,
    grid_h: usize,
    reserve_header: bool,
    padding: u32,
) -> u32 {
    if grid_w == 0 || grid_h == 0 {
        return DEFAULT_CELL_SIZE;
    }

    let header = if reserve_header { NAME_BAR_HEIGHT } else { 0 };
    let avail_w = panel.w.saturating_sub(padding.saturating_mul(2));
    let avail_h = panel
        .h
        .saturating_sub(padding.saturating_mul(2).saturating_add(header));

    let by_w = avail_w / u32::try_from(grid_w).unwrap_or(u32::MAX);
    let by_h = avail_h / u32::try_from(grid_h).unwrap_or(u32::MAX);
    by_w.min(by_h).max(MIN_CELL_SIZE)
}

/// Panel rectangles memoized on `(viewport, count)`.
#[derive(Debug, Clone)]
pub struct PanelLayout {
    hud_height: u32,
    key: Option<(Viewport, usize)>,
    rects: Vec<Rect>,
}

impl PanelLayout {
    pub fn new(hud_height: u32) -> Self {
        Self {
            hud_height,
            key: None,
            rects: Vec::new(),
        }
    }

    /// Recompute if the viewport or panel count changed.
    ///
    /// # Returns
    /// `true` if the rectangles were recomputed.
    pub fn update(&mut self, viewport: Viewport, count: usize) -> bool {
        if self.key == Some((viewport, count)) {
            return false;
        }
        self.rects = layout(count, viewport, self.hud_height);
        self.key = Some((viewport, count));
        true
    }

    /// Rectangle of panel `index`, if laid out.
    pub fn rect(&self, index: usize) -> Option<Rect> {
        self.rects.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_grid_shape_small_counts() {
        assert_eq!(grid_shape(0), (0, 0));
        assert_eq!(grid_shape(1), (1, 1));
        assert_eq!(grid_shape(2), (2, 1));
        assert_eq!(grid_shape(3), (2, 2));
        assert_eq!(grid_shape(4), (2, 2));
        assert_eq!(grid_shape(5), (3, 2));
        assert_eq!(grid_shape(7), (3, 3));
        assert_eq!(grid_shape(10), (4, 3));
    }

    #[test]
    fn test_grid_shape_up_to_twelve() {
        for n in 1..=12usize {
            let (cols, rows) = grid_shape(n);
            assert_eq!(cols, (n as f64).sqrt().ceil() as usize);
            assert!(rows * cols >= n);
            assert!(n > (rows - 1) * cols);
        }
    }

    #[test]
    fn test_layout_single_panel() {
        let rects = layout(1, Viewport::new(1280, 800), 48);
        assert_eq!(
            rects,
            vec![Rect {
                x: 6,
                y: 54,
                w: 1268,
                h: 740,
            }]
        );
    }

    #[test]
    fn test_layout_row_major() {
        let rects = layout(3, Viewport::new(800, 648), 48);
        // 2 cols × 2 rows of 400×300
        assert_eq!(
            rects[0],
            Rect {
                x: 6,
                y: 54,
                w: 388,
                h: 288,
            }
        );
        assert_eq!(
            rects[1],
            Rect {
                x: 406,
                y: 54,
                w: 388,
                h: 288,
            }
        );
        assert_eq!(
            rects[2],
            Rect {
                x: 6,
                y: 354,
                w: 388,
                h: 288,
            }
        );
    }

    #[test]
    fn test_layout_tiny_viewport_saturates() {
        let rects = layout(9, Viewport::new(10, 20), 48);
        assert_eq!(rects.len(), 9);
        assert!(rects.iter().all(|r| r.w == 0 && r.h == 0));
    }

    #[test]
    fn test_layout_zero_panels() {
        assert!(layout(0, Viewport::new(800, 600), 48).is_empty());
    }

    #[test]
    fn test_cell_size_fits_smaller_axis() {
        let panel = Rect {
            x: 0,
            y: 0,
            w: 216,
            h: 116,
        };
        // 200 / 10 = 20, 100 / 5 = 20
        assert_eq!(cell_size(panel, 10, 5, false, PANEL_PADDING), 20);
        // header eats 28 → 72 / 5 = 14
        assert_eq!(cell_size(panel, 10, 5, true, PANEL_PADDING), 14);
    }

    #[test]
    fn test_cell_size_uses_given_padding() {
        let panel = Rect {
            x: 0,
            y: 0,
            w: 120,
            h: 120,
        };
        assert_eq!(cell_size(panel, 10, 10, false, 0), 12);
        // 120 - 2 * 10 = 100
        assert_eq!(cell_size(panel, 10, 10, false, 10), 10);
        assert_eq!(cell_size(panel, 10, 10, false, u32::MAX), MIN_CELL_SIZE);
    }

    #[test]
    fn test_cell_size_floor() {
        let panel = Rect {
            x: 0,
            y: 0,
            w: 20,
            h: 20,
        };
        assert_eq!(cell_size(panel, 100, 100, true, PANEL_PADDING), MIN_CELL_SIZE);
    }

    #[test]
    fn test_cell_size_zero_grid() {
        let panel = Rect {
            x: 0,
            y: 0,
            w: 400,
            h: 400,
        };
        assert_eq!(cell_size(panel, 0, 0, false, PANEL_PADDING), DEFAULT_CELL_SIZE);
        assert_eq!(cell_size(panel, 5, 0, false, PANEL_PADDING), DEFAULT_CELL_SIZE);
    }

    #[test]
    fn test_panel_layout_memoizes() {
        let mut cache = PanelLayout::new(48);
        assert!(cache.update(Viewport::new(800, 600), 4));
        assert!(!cache.update(Viewport::new(800, 600), 4));
        assert!(cache.update(Viewport::new(801, 600), 4));
        assert!(cache.update(Viewport::new(801, 600), 5));
        assert!(cache.rect(4).is_some());
        assert!(cache.rect(5).is_none());
    }

    proptest! {
        #[test]
        fn prop_grid_holds_every_panel(n in 1usize..500) {
            let (cols, rows) = grid_shape(n);
            prop_assert!(cols * cols >= n);
            prop_assert!((cols - 1) * (cols - 1) < n);
            prop_assert!(rows * cols >= n);
            prop_assert!(n > (rows - 1) * cols);
        }

        #[test]
        fn prop_panels_stay_inside_viewport(
            n in 1usize..30,
            w in 0u32..3000,
            h in 0u32..3000,
        ) {
            let hud = 48;
            for r in layout(n, Viewport::new(w, h), hud) {
                if r.w > 0 {
                    prop_assert!(r.x + r.w <= w);
                }
                if r.h > 0 {
                    prop_assert!(r.y + r.h <= h);
                    prop_assert!(r.y >= hud);
                }
            }
        }
    }
}
