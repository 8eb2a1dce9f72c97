//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with syntax highlighting and the line of
//!   the current step
//! - [`steps`]: The active object's construction steps
//! - [`class`]: Constructor signature and member binding
//! - [`objects`]: Every discovered object with its members and lifecycle flags
//! - [`console`]: Messages appended by playback
//! - [`status`]: Progress bar, position and keybindings
//!
//! Each pane module exports a primary `render_*` function taking the frame,
//! its area and the data it draws.

pub mod class;
pub mod console;
pub mod objects;
pub mod source;
pub mod status;
pub mod steps;

// Re-export render functions for convenience
pub use class::render_class_pane;
pub use console::render_console_pane;
pub use objects::render_objects_pane;
pub use source::{render_source_pane, SourceScrollState};
pub use status::{render_progress_bar, render_status_bar, StatusRenderData};
pub use steps::render_steps_pane;
