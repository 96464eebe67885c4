//! Replay data structures.
//!
//! This module defines the normalized representation of a recorded game:
//! cell codes, single-step grid frames, and the replay that owns them.

/// Kind of object occupying one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellCode {
    /// Impassable wall (`#`)
    Wall,
    /// Mine (`@`)
    Mine,
    /// Tank owned by player 1 (`1`)
    TankA,
    /// Tank owned by player 2 (`2`)
    TankB,
    /// Nothing drawn. Unrecognized characters also land here.
    Empty,
}

impl CellCode {
    /// Classify a stored grid character.
    pub fn from_char(ch: char) -> Self {
        match ch {
            '#' => Self::Wall,
            '@' => Self::Mine,
            '1' => Self::TankA,
            '2' => Self::TankB,
            _ => Self::Empty,
        }
    }

    /// Canonical character for this code.
    pub fn as_char(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Mine => '@',
            Self::TankA => '1',
            Self::TankB => '2',
            Self::Empty => ' ',
        }
    }

    /// Human readable name, shown in the panel hover tooltip.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Wall => "Wall",
            Self::Mine => "Mine",
            Self::TankA => "Player 1 Tank",
            Self::TankB => "Player 2 Tank",
            Self::Empty => "Empty",
        }
    }
}

/// Maps a cell code to an opaque visual token chosen by the renderer.
///
/// The core never decides what a wall or a tank looks like; the shell
/// injects an implementation (a colour palette, a sprite table, ...).
pub trait CellAppearance {
    /// Whatever the renderer needs to draw one cell.
    type Token;

    fn appearance(&self, cell: CellCode) -> Self::Token;
}

/// One time-step snapshot of the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Round index from the step header, if known
    pub round: Option<i64>,
    /// Grid rows, top row first. Characters are stored verbatim.
    rows: Vec<Vec<char>>,
}

impl Frame {
    /// Build a frame from raw rows, right-padding each with spaces to the
    /// longest row of this frame.
    pub fn from_rows<S: AsRef<str>>(round: Option<i64>, rows: &[S]) -> Self {
        let rows: Vec<Vec<char>> = rows.iter().map(|r| r.as_ref().chars().collect()).collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut frame = Self { round, rows };
        frame.pad_to(width, frame.rows.len());
        frame
    }

    /// Pad with blank rows and trailing-space columns up to `width × height`.
    ///
    /// Never truncates.
    pub(crate) fn pad_to(&mut self, width: usize, height: usize) {
        if self.rows.len() < height {
            self.rows.resize_with(height, Vec::new);
        }
        for row in &mut self.rows {
            if row.len() < width {
                row.resize(width, ' ');
            }
        }
    }

    /// Number of columns (0 for a frame without rows).
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Raw stored character at (`row`, `col`).
    pub fn char_at(&self, row: usize, col: usize) -> Option<char> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Classified cell at (`row`, `col`); out of range reads as empty.
    pub fn cell(&self, row: usize, col: usize) -> CellCode {
        self.char_at(row, col)
            .map_or(CellCode::Empty, CellCode::from_char)
    }

    /// Row `index` rendered back to text.
    #[cfg(test)]
    pub fn row_string(&self, index: usize) -> Option<String> {
        self.rows.get(index).map(|r| r.iter().collect())
    }
}

/// A fully parsed recording: equal-size frames in file order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replay {
    /// Grid width shared by every frame
    pub width: usize,
    /// Grid height shared by every frame
    pub height: usize,
    /// Frames in file order, never empty
    pub frames: Vec<Frame>,
    /// File name, for full-name display
    pub source_label: String,
}

impl Replay {
    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }
}
