use std::time::Duration;

/// Timing and capacity settings for a playback session
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackConfig {
    /// Time for one step's progress to go from 0 to 1
    pub step_duration: Duration,
    /// Progress at which a step's runtime effect fires
    pub effect_threshold: f64,
    /// Progress at which a step's console message is appended
    pub message_threshold: f64,
    /// Console lines kept; older lines are dropped first
    pub console_capacity: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            step_duration: Duration::from_millis(1100),
            effect_threshold: 0.75,
            message_threshold: 0.8,
            console_capacity: 7,
        }
    }
}

impl PlaybackConfig {
    pub fn with_step_duration(mut self, step_duration: Duration) -> Self {
        self.step_duration = step_duration;
        self
    }
}
