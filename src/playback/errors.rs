use thiserror::Error;

/// Invalid playback requests
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("no source is loaded")]
    NothingLoaded,

    #[error("step {index} is out of range (trace has {len} steps)")]
    StepOutOfRange { index: usize, len: usize },
}
