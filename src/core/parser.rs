//! Parser for stepped-grid replay logs (`.viz.txt` format).
//!
//! A log is a sequence of lines read as a two-token grammar:
//!
//! ```text
//! log    := (header body | other)*
//! header := "===" ... "Game Step" <int> ... "==="
//! body   := line*   (until the next "===" line, or a blank line right before one)
//! ```
//!
//! Each body becomes one [`Frame`]; all frames are then padded to the
//! replay-wide width and height.

use thiserror::Error;
use tracing::debug;

use super::replay::{Frame, Replay};

/// Token that opens every marker line.
const MARKER_PREFIX: &str = "===";

/// Phrase identifying a step header among marker lines.
const STEP_PHRASE: &str = "Game Step";

/// Word after which the round index is expected.
const STEP_WORD: &str = "Step";

/// Errors that can occur while turning a log into a replay.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text contains no step headers at all
    #[error("no frames found")]
    NoFrames,

    /// The file bytes are not valid UTF-8 text
    #[error("cannot decode file as text: {reason}")]
    Decode { reason: String },
}

/// One classified input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    /// A step header; `round` is `None` when the index is missing or malformed
    StepHeader { round: Option<i64> },
    /// Any other `===` line. Ends a body but starts nothing.
    Rule,
    /// A grid row (possibly blank), kept verbatim
    Body(&'a str),
}

impl Line<'_> {
    fn is_marker(&self) -> bool {
        matches!(self, Line::StepHeader { .. } | Line::Rule)
    }

    fn is_blank(&self) -> bool {
        matches!(self, Line::Body(text) if text.trim().is_empty())
    }
}

/// Classify a single line.
pub(crate) fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    if !trimmed.starts_with(MARKER_PREFIX) {
        return Line::Body(line);
    }
    if !trimmed.contains(STEP_PHRASE) {
        return Line::Rule;
    }

    let mut words = trimmed.split_whitespace();
    let round = words
        .by_ref()
        .position(|w| w == STEP_WORD)
        .and_then(|_| words.next())
        .and_then(|w| w.parse::<i64>().ok());

    Line::StepHeader { round }
}

/// Split text into classified lines. `\r\n` endings are accepted.
pub(crate) fn tokenize(text: &str) -> Vec<Line<'_>> {
    text.lines().map(classify).collect()
}

/// Parse log text into a replay with an empty source label.
///
/// # Returns
/// * `Ok(Replay)` - at least one frame was found; all frames share `W×H`
/// * `Err(ParseError::NoFrames)` - no step header anywhere in the text
pub fn parse(text: &str) -> Result<Replay, ParseError> {
    let lines = tokenize(text);
    let mut frames = collect_frames(&lines);

    if frames.is_empty() {
        return Err(ParseError::NoFrames);
    }

    let width = frames.iter().map(Frame::width).max().unwrap_or(0);
    let height = frames.iter().map(Frame::height).max().unwrap_or(0);
    for frame in &mut frames {
        frame.pad_to(width, height);
    }

    Ok(Replay {
        width,
        height,
        frames,
        source_label: String::new(),
    })
}

/// Parse log text into a replay labelled with `source_label`.
pub fn parse_named(text: &str, source_label: impl Into<String>) -> Result<Replay, ParseError> {
    let mut replay = parse(text)?;
    replay.source_label = source_label.into();
    Ok(replay)
}

/// Group body lines under their step headers, one frame per header.
///
/// Frames are only padded to their own widest row here.
fn collect_frames(lines: &[Line<'_>]) -> Vec<Frame> {
    let mut frames = Vec::new();
    let mut previous_round: i64 = -1;
    let mut i = 0;

    while i < lines.len() {
        let Line::StepHeader { round } = lines[i] else {
            i += 1;
            continue;
        };

        let round = round.unwrap_or_else(|| {
            debug!(
                line = i + 1,
                fallback = previous_round + 1,
                "step header without a usable index"
            );
            previous_round + 1
        });
        previous_round = round;
        i += 1;

        let mut rows = Vec::new();
        while let Some(line) = lines.get(i) {
            if line.is_marker() {
                break;
            }
            if line.is_blank() && lines.get(i + 1).is_some_and(Line::is_marker) {
                break;
            }
            if let Line::Body(text) = line {
                rows.push(*text);
            }
            i += 1;
        }

        frames.push(Frame::from_rows(Some(round), &rows));
    }

    frames
}

/// Decode raw file bytes and parse them.
pub fn parse_bytes(bytes: &[u8], source_label: impl Into<String>) -> Result<Replay, ParseError> {
    let text = std::str::from_utf8(bytes).map_err(|e| ParseError::Decode {
        reason: e.to_string(),
    })?;
    parse_named(text, source_label)
}
