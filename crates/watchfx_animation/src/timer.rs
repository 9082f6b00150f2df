//! Timer capability consumed by animations
//!
//! The animation crate never measures time itself. A host provides a
//! [`TimerService`] that hands out [`TimerHandle`]s and later reports which
//! handle fired; the owner of the animation forwards that handle to
//! [`Fx::on_timer`](crate::Fx::on_timer).

use slotmap::new_key_type;
use std::rc::Rc;
use std::time::Duration;

new_key_type! {
    /// Identifier of a live periodic timer
    pub struct TimerHandle;
}

/// How a periodic timer schedules its next firing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimerMode {
    /// Next firing is one interval after the previous one actually fired
    Standard,
    /// Firings stay on the `start + k * interval` grid, skipping missed slots
    #[default]
    Smooth,
}

/// Parameters for a new periodic timer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimerRequest {
    /// Wait before the first firing
    pub delay: Duration,
    /// Period between firings
    pub interval: Duration,
    pub mode: TimerMode,
}

impl TimerRequest {
    pub fn new(interval: Duration) -> Self {
        Self {
            delay: Duration::ZERO,
            interval,
            mode: TimerMode::default(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_mode(mut self, mode: TimerMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Platform timer capability
///
/// Implementations are single-threaded and use interior mutability, so an
/// animation and the event loop can share one service.
pub trait TimerService {
    /// Start a periodic timer
    fn create(&self, request: TimerRequest) -> TimerHandle;

    /// Stop a timer. Returns false if the handle was not live.
    fn stop(&self, handle: TimerHandle) -> bool;
}

/// Timer service shared between animations and their event loop
pub type SharedTimers = Rc<dyn TimerService>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = TimerRequest::new(Duration::from_millis(100))
            .with_delay(Duration::from_millis(20))
            .with_mode(TimerMode::Standard);

        assert_eq!(request.interval, Duration::from_millis(100));
        assert_eq!(request.delay, Duration::from_millis(20));
        assert_eq!(request.mode, TimerMode::Standard);
    }

    #[test]
    fn test_smooth_is_default() {
        let request = TimerRequest::new(Duration::from_millis(16));
        assert_eq!(request.mode, TimerMode::Smooth);
        assert_eq!(request.delay, Duration::ZERO);
    }
}
