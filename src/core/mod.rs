//! Core module for replay data structures, parsing, layout and playback.

pub mod config;
pub mod error;
pub mod layout;
pub mod naming;
pub mod parser;
pub mod playback;
pub mod replay;
pub mod session;
pub mod source;
