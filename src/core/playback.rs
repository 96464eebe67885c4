//! Playback state management for synchronized multi-replay playback.
//!
//! This module provides the PlaybackState structure holding the shared frame
//! cursor and display toggles, and the PlaybackController that mutates it.
//! Every replay in a session is shown at the same cursor; replays shorter
//! than the cursor either hold their last frame or go blank.

use super::replay::{Frame, Replay};

/// Default playback speed in frames per second.
pub const DEFAULT_FPS: u32 = 8;

/// Minimum allowed playback speed.
pub const MIN_FPS: u32 = 1;

/// Maximum allowed playback speed.
pub const MAX_FPS: u32 = 60;

/// Step size of the coarse seek buttons.
pub const LARGE_STEP: i64 = 10;

/// Shared playback state for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackState {
    /// Current frame index, always in `[0, max_frames - 1]`.
    pub cursor: usize,

    /// Whether automatic advancing is suspended.
    pub paused: bool,

    /// Frames advanced per second while playing, in `[MIN_FPS, MAX_FPS]`.
    pub fps: u32,

    /// Whether finished replays keep showing their last frame (otherwise blank).
    pub hold_last: bool,

    /// Whether panel labels are drawn at all.
    pub show_names: bool,

    /// Whether labels show the full file name instead of the short label.
    pub show_full_names: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            cursor: 0,
            paused: false,
            fps: DEFAULT_FPS,
            hold_last: true,
            show_names: false,
            show_full_names: false,
        }
    }
}

/// User commands accepted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pause and move the cursor by the given number of frames
    Step(i64),
    /// Toggle between play and pause
    TogglePlay,
    /// Show or hide panel labels
    ToggleNames,
    /// Switch labels between short and full names
    ToggleFullNames,
    /// Switch the end policy between hold-last and blank
    ToggleHoldLast,
    /// Change the speed by the given number of frames per second
    Speed(i32),
}

/// What a panel should show at the current cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameView<'a> {
    /// A frame to draw, with its index inside the replay
    Frame { index: usize, frame: &'a Frame },
    /// The replay has ended and the blank policy is active
    Blank,
}

impl<'a> FrameView<'a> {
    /// The frame, if any.
    pub fn frame(self) -> Option<&'a Frame> {
        match self {
            Self::Frame { frame, .. } => Some(frame),
            Self::Blank => None,
        }
    }
}

/// Owns the playback state and the frame bound it is clamped to.
///
/// There is no finished state: playing wraps to frame 0 forever.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    state: PlaybackState,
    max_frames: usize,
}

impl PlaybackController {
    /// Create a controller for replays whose longest has `max_frames` frames.
    ///
    /// `max_frames` is raised to 1 so the cursor range is never empty.
    pub fn new(max_frames: usize, mut state: PlaybackState) -> Self {
        let max_frames = max_frames.max(1);
        state.fps = state.fps.clamp(MIN_FPS, MAX_FPS);
        state.cursor = state.cursor.min(max_frames - 1);
        Self { state, max_frames }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn max_frames(&self) -> usize {
        self.max_frames
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    /// Advance one frame if playing, wrapping at `max_frames`.
    pub fn tick(&mut self) {
        if !self.state.paused {
            self.state.cursor = (self.state.cursor + 1) % self.max_frames;
        }
    }

    /// Pause and move the cursor by `delta`, clamped to the valid range.
    pub fn seek(&mut self, delta: i64) {
        self.state.paused = true;
        let last = (self.max_frames - 1) as i64;
        let target = (self.state.cursor as i64).saturating_add(delta).clamp(0, last);
        self.state.cursor = target as usize;
    }

    /// Toggle between play and pause.
    pub fn toggle_play(&mut self) {
        self.state.paused = !self.state.paused;
    }

    /// Change the speed by `delta`, clamped to `[MIN_FPS, MAX_FPS]`.
    pub fn set_fps(&mut self, delta: i32) {
        let fps = (self.state.fps as i64 + delta as i64).clamp(MIN_FPS as i64, MAX_FPS as i64);
        self.state.fps = fps as u32;
    }

    pub fn toggle_names(&mut self) {
        self.state.show_names = !self.state.show_names;
    }

    pub fn toggle_full_names(&mut self) {
        self.state.show_full_names = !self.state.show_full_names;
    }

    pub fn toggle_hold_last(&mut self) {
        self.state.hold_last = !self.state.hold_last;
    }

    /// Apply a user command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Step(delta) => self.seek(delta),
            Command::TogglePlay => self.toggle_play(),
            Command::ToggleNames => self.toggle_names(),
            Command::ToggleFullNames => self.toggle_full_names(),
            Command::ToggleHoldLast => self.toggle_hold_last(),
            Command::Speed(delta) => self.set_fps(delta),
        }
    }

    /// What `replay` should show at the current cursor.
    ///
    /// Past its end a replay shows its last frame under hold-last and
    /// [`FrameView::Blank`] otherwise.
    pub fn frame_for<'a>(&self, replay: &'a Replay) -> FrameView<'a> {
        let cursor = self.state.cursor;
        if let Some(frame) = replay.frames.get(cursor) {
            return FrameView::Frame {
                index: cursor,
                frame,
            };
        }

        match replay.frames.last() {
            Some(frame) if self.state.hold_last => FrameView::Frame {
                index: replay.frames.len() - 1,
                frame,
            },
            _ => FrameView::Blank,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser;
    use proptest::prelude::*;

    fn replay_with_frames(count: usize) -> Replay {
        let mut text = String::new();
        for i in 0..count {
            text.push_str(&format!("=== Game Step {i} ===\n{}\n", i % 10));
        }
        parser::parse(&text).unwrap()
    }

    #[test]
    fn test_new_default_values() {
        let controller = PlaybackController::new(10, PlaybackState::default());
        let state = controller.state();
        assert_eq!(state.cursor, 0);
        assert!(!state.paused);
        assert_eq!(state.fps, DEFAULT_FPS);
        assert!(state.hold_last);
        assert!(!state.show_names);
        assert!(!state.show_full_names);
        assert_eq!(controller.max_frames(), 10);
    }

    #[test]
    fn test_new_clamps_initial_state() {
        let state = PlaybackState {
            cursor: 50,
            fps: 500,
            ..PlaybackState::default()
        };
        let controller = PlaybackController::new(10, state);
        assert_eq!(controller.cursor(), 9);
        assert_eq!(controller.state().fps, MAX_FPS);

        let controller = PlaybackController::new(0, PlaybackState::default());
        assert_eq!(controller.max_frames(), 1);
    }

    #[test]
    fn test_tick_advances_and_wraps() {
        let mut controller = PlaybackController::new(3, PlaybackState::default());
        controller.tick();
        assert_eq!(controller.cursor(), 1);
        controller.tick();
        assert_eq!(controller.cursor(), 2);
        controller.tick();
        assert_eq!(controller.cursor(), 0);
    }

    #[test]
    fn test_tick_does_nothing_when_paused() {
        let mut controller = PlaybackController::new(3, PlaybackState::default());
        controller.toggle_play();
        controller.tick();
        assert_eq!(controller.cursor(), 0);
    }

    #[test]
    fn test_seek_pauses_and_clamps() {
        let mut controller = PlaybackController::new(20, PlaybackState::default());
        controller.seek(5);
        assert!(controller.state().paused);
        assert_eq!(controller.cursor(), 5);

        controller.seek(-LARGE_STEP);
        assert_eq!(controller.cursor(), 0);

        controller.seek(100);
        assert_eq!(controller.cursor(), 19);

        controller.seek(1);
        assert_eq!(controller.cursor(), 19); // no wrap when stepping
    }

    #[test]
    fn test_seek_extreme_deltas() {
        let mut controller = PlaybackController::new(5, PlaybackState::default());
        controller.seek(i64::MAX);
        assert_eq!(controller.cursor(), 4);
        controller.seek(i64::MIN);
        assert_eq!(controller.cursor(), 0);
    }

    #[test]
    fn test_toggle_play() {
        let mut controller = PlaybackController::new(5, PlaybackState::default());
        controller.toggle_play();
        assert!(controller.state().paused);
        controller.toggle_play();
        assert!(!controller.state().paused);
    }

    #[test]
    fn test_set_fps_clamps_values() {
        let mut controller = PlaybackController::new(5, PlaybackState::default());

        controller.set_fps(2);
        assert_eq!(controller.state().fps, 10);

        controller.set_fps(-100);
        assert_eq!(controller.state().fps, MIN_FPS);

        controller.set_fps(100);
        assert_eq!(controller.state().fps, MAX_FPS);
    }

    #[test]
    fn test_toggles() {
        let mut controller = PlaybackController::new(5, PlaybackState::default());
        controller.apply(Command::ToggleNames);
        controller.apply(Command::ToggleFullNames);
        controller.apply(Command::ToggleHoldLast);
        let state = controller.state();
        assert!(state.show_names);
        assert!(state.show_full_names);
        assert!(!state.hold_last);
    }

    #[test]
    fn test_apply_maps_every_command() {
        let mut controller = PlaybackController::new(30, PlaybackState::default());
        controller.apply(Command::Step(LARGE_STEP));
        assert_eq!(controller.cursor(), 10);
        assert!(controller.state().paused);

        controller.apply(Command::TogglePlay);
        assert!(!controller.state().paused);

        controller.apply(Command::Speed(-1));
        assert_eq!(controller.state().fps, DEFAULT_FPS - 1);
    }

    #[test]
    fn test_frame_for_hold_vs_blank() {
        let short = replay_with_frames(5);
        let long = replay_with_frames(10);
        let mut controller = PlaybackController::new(10, PlaybackState::default());
        controller.seek(7);

        match controller.frame_for(&short) {
            FrameView::Frame { index, frame } => {
                assert_eq!(index, 4);
                assert_eq!(frame, &short.frames[4]);
            }
            FrameView::Blank => panic!("expected held frame"),
        }
        assert_eq!(
            controller.frame_for(&long).frame(),
            Some(&long.frames[7])
        );

        controller.toggle_hold_last();
        assert_eq!(controller.frame_for(&short), FrameView::Blank);
        assert!(controller.frame_for(&long).frame().is_some());
    }

    #[test]
    fn test_frame_for_within_range() {
        let replay = replay_with_frames(3);
        let mut controller = PlaybackController::new(3, PlaybackState::default());
        controller.tick();
        assert_eq!(
            controller.frame_for(&replay),
            FrameView::Frame {
                index: 1,
                frame: &replay.frames[1]
            }
        );
    }

    proptest! {
        #[test]
        fn prop_seek_stays_in_bounds(
            max_frames in 1usize..200,
            deltas in proptest::collection::vec(-300i64..300, 0..40),
        ) {
            let mut controller = PlaybackController::new(max_frames, PlaybackState::default());
            for delta in deltas {
                controller.seek(delta);
                prop_assert!(controller.cursor() < max_frames);
            }
        }

        #[test]
        fn prop_tick_wraps_modulo(max_frames in 1usize..100, ticks in 0usize..500) {
            let mut controller = PlaybackController::new(max_frames, PlaybackState::default());
            for _ in 0..ticks {
                controller.tick();
                prop_assert!(controller.cursor() < max_frames);
            }
            prop_assert_eq!(controller.cursor(), ticks % max_frames);
        }
    }
}
