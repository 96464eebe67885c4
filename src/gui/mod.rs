//! GUI module for the replay viewer.
//!
//! This module contains the egui-based user interface: the application
//! window, the HUD controls and the per-replay panels.

mod app;
mod controls;
mod panel;

pub use app::MultiReplayApp;
pub use controls::HUD_MIN_WIDTH;
