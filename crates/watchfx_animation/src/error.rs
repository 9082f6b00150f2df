//! Animation error types

use thiserror::Error;

/// Errors raised while configuring an animation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// Curve name not recognized
    #[error("Unknown curve: {0}")]
    UnknownCurve(String),

    /// Numeric curve style id not recognized
    #[error("Unknown curve id: {0}")]
    UnknownCurveId(u8),

    /// Frame rate or duration cannot produce any ticks
    #[error("Invalid timing: fps={fps}, duration={secs}s")]
    InvalidTiming { fps: u32, secs: f64 },

    /// No per-frame callback was supplied
    #[error("Animation has no frame callback")]
    MissingFrameCallback,

    /// Timer-driven animation built without a timer service
    #[error("Timer-driven animation requires a timer service")]
    MissingTimerService,
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
