//! # Introduction
//!
//! ctorviz reads a small C++ snippet containing one class and some object
//! declarations, works out how each constructor argument reaches each member,
//! and plays the construction of every object back step by step in a terminal
//! UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Scanner → Class / Constructor / Binding / Objects → SourceModel
//!        → TraceBuilder → Traces → Session → TUI
//! ```
//!
//! 1. [`parser`]: heuristic extraction of the class, its constructor, the
//!    member-to-parameter binding and every object declaration.
//! 2. [`trace`]: one [`trace::Trace`] of construction steps per object.
//! 3. [`playback`]: the [`playback::Session`] state machine: stepping,
//!    auto-play, threshold-gated runtime effects and the console.
//! 4. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use ctorviz::playback::{PlaybackStatus, Session};
//!
//! let mut session = Session::default();
//! session
//!     .load_source("class P { int x; public: P(int v) { x = v; } };\nP p(3);")
//!     .unwrap();
//! assert_eq!(session.advance(), PlaybackStatus::Stepping(0));
//! ```

pub mod parser;
pub mod playback;
pub mod trace;
pub mod ui;
