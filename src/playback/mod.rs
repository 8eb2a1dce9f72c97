//! Step-by-step playback of construction traces
//!
//! [`Session`] is the single owner of loaded state. It exposes read-only views
//! for rendering and a small control surface (`advance`, `restart`, `tick`,
//! `jump_to_step`, ...) for the host loop.

pub mod config;
pub mod console;
pub mod controller;
pub mod errors;
pub mod runtime;

pub use config::PlaybackConfig;
pub use controller::{PlaybackState, PlaybackStatus, Session};
pub use errors::PlaybackError;
pub use runtime::RuntimeState;
