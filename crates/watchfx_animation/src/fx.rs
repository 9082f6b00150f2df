//! Tick-driven tween
//!
//! An [`Fx`] walks a position from `x_start` to `x_end` in fixed increments,
//! maps each position through its curve, and hands the result to a frame
//! callback. Ticks come either from a [`TimerService`] timer owned by the
//! animation, or from the caller via [`Fx::step`].
//!
//! ```text
//!   timer fires ──► on_timer(handle) ──┐
//!                                      ├──► advance: position += speed
//!   caller ───────► step() ────────────┘        │
//!                                               ▼
//!                                  on_frame(curve(position))
//!                                               │ position reached x_end?
//!                                               ▼
//!                      on_frame(end) ► on_stop() ► release timer ► disabled
//! ```

use std::fmt;
use std::time::Duration;

use crate::easing::Curve;
use crate::error::{AnimationError, Result};
use crate::timer::{SharedTimers, TimerHandle, TimerMode, TimerRequest};

/// Maps a position onto an output value
pub type CurveFn = Box<dyn Fn(f64) -> f64>;

/// Receives every output value
pub type FrameCallback = Box<dyn FnMut(f64)>;

/// Runs once when the animation reaches its end
pub type StopCallback = Box<dyn FnMut()>;

/// Slack, as a fraction of one step, when deciding whether the position
/// reached the end, so an accumulated `speed` that lands a hair short of
/// `x_end` still finishes.
const END_TOLERANCE: f64 = 1e-6;

const DEFAULT_FPS: u32 = 60;

/// Where ticks come from
enum Driver {
    /// Caller invokes [`Fx::step`] once per frame
    External,
    /// Animation owns at most one timer at a time
    Timer {
        timers: SharedTimers,
        mode: TimerMode,
        handle: Option<TimerHandle>,
    },
}

/// How the interpolation function is produced
enum Shape {
    Preset {
        begin: f64,
        end: f64,
        curve: Curve,
    },
    Custom {
        x_start: f64,
        x_end: f64,
        curve: CurveFn,
    },
}

/// A single running tween
pub struct Fx {
    x_start: f64,
    x_end: f64,
    position: f64,
    speed: f64,
    interval: Duration,
    delay: Duration,
    curve: CurveFn,
    /// Exact output for the final frame
    end_value: f64,
    on_frame: FrameCallback,
    on_stop: Option<StopCallback>,
    enabled: bool,
    driver: Driver,
}

impl Fx {
    /// Tween between two output values along a built-in curve
    ///
    /// The position runs over `0..=fps * duration` in steps of one tick.
    pub fn preset(begin: f64, end: f64, curve: Curve) -> FxBuilder {
        FxBuilder::new(Shape::Preset { begin, end, curve })
    }

    /// Tween a position from `x_start` to `x_end` through a custom function
    ///
    /// The distance is divided evenly over `fps * duration` ticks.
    pub fn custom<F>(x_start: f64, x_end: f64, curve: F) -> FxBuilder
    where
        F: Fn(f64) -> f64 + 'static,
    {
        FxBuilder::new(Shape::Custom {
            x_start,
            x_end,
            curve: Box::new(curve),
        })
    }

    /// Replay from the beginning
    ///
    /// Any live timer is released and a fresh one started; in external mode
    /// the animation is simply re-armed for [`Fx::step`].
    pub fn restart(&mut self) {
        self.position = self.x_start;
        self.set_enable(false);
        self.set_enable(true);
    }

    /// Start or stop ticking without touching the position
    pub fn set_enable(&mut self, enable: bool) {
        self.enabled = enable;
        if enable {
            self.register_timer();
        } else {
            self.release_timer();
        }
    }

    /// Advance one tick in external mode
    ///
    /// Does nothing while disabled, or when the animation owns a timer.
    pub fn step(&mut self) {
        if !matches!(self.driver, Driver::External) {
            tracing::warn!("Fx::step ignored on a timer-driven animation");
            return;
        }
        if self.enabled {
            self.advance();
        }
    }

    /// Deliver a timer firing
    ///
    /// Returns true if `handle` is this animation's live timer and a tick was
    /// processed. Firings from released timers are ignored.
    pub fn on_timer(&mut self, handle: TimerHandle) -> bool {
        let owns = matches!(
            self.driver,
            Driver::Timer { handle: Some(live), .. } if live == handle
        );
        if !owns || !self.enabled {
            return false;
        }
        self.advance();
        true
    }

    fn advance(&mut self) {
        self.position += self.speed;

        if self.reached_end() {
            self.position = self.x_end;
            (self.on_frame)(self.end_value);
            tracing::debug!("Fx finished at {}", self.end_value);

            if let Some(on_stop) = self.on_stop.as_mut() {
                on_stop();
            }
            self.release_timer();
            self.enabled = false;
            return;
        }

        let value = (self.curve)(self.position);
        tracing::trace!(position = self.position, value, "Fx tick");
        (self.on_frame)(value);
    }

    fn reached_end(&self) -> bool {
        let slack = self.speed.abs() * END_TOLERANCE;
        if self.speed >= 0.0 {
            self.position >= self.x_end - slack
        } else {
            self.position <= self.x_end + slack
        }
    }

    fn register_timer(&mut self) {
        let request = TimerRequest::new(self.interval).with_delay(self.delay);
        if let Driver::Timer {
            timers,
            mode,
            handle,
        } = &mut self.driver
        {
            if let Some(old) = handle.take() {
                timers.stop(old);
            }
            let new = timers.create(request.with_mode(*mode));
            tracing::debug!("Fx registered {:?} timer {:?}", mode, new);
            *handle = Some(new);
        }
    }

    fn release_timer(&mut self) {
        if let Driver::Timer { timers, handle, .. } = &mut self.driver {
            if let Some(old) = handle.take() {
                timers.stop(old);
                tracing::debug!("Fx released timer {:?}", old);
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True when ticks come from [`Fx::step`]
    pub fn is_external(&self) -> bool {
        matches!(self.driver, Driver::External)
    }

    /// Current position counter (not the output value)
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Time between ticks (`1000 / fps` ms)
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Live timer, if the animation is timer-driven and running
    pub fn timer(&self) -> Option<TimerHandle> {
        match &self.driver {
            Driver::Timer { handle, .. } => *handle,
            Driver::External => None,
        }
    }
}

impl Drop for Fx {
    fn drop(&mut self) {
        self.release_timer();
    }
}

impl fmt::Debug for Fx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fx")
            .field("x_start", &self.x_start)
            .field("x_end", &self.x_end)
            .field("position", &self.position)
            .field("speed", &self.speed)
            .field("interval", &self.interval)
            .field("enabled", &self.enabled)
            .field("timer", &self.timer())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Fx`]
pub struct FxBuilder {
    shape: Shape,
    fps: u32,
    duration: Duration,
    delay: Duration,
    on_frame: Option<FrameCallback>,
    on_stop: Option<StopCallback>,
    enable: bool,
    external: bool,
    smooth: bool,
    timers: Option<SharedTimers>,
}

impl FxBuilder {
    fn new(shape: Shape) -> Self {
        Self {
            shape,
            fps: DEFAULT_FPS,
            duration: Duration::from_secs(1),
            delay: Duration::ZERO,
            on_frame: None,
            on_stop: None,
            enable: false,
            external: false,
            smooth: true,
            timers: None,
        }
    }

    /// Frames per second
    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Total running time
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Wait before the first tick
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Called with every output value
    pub fn on_frame<F: FnMut(f64) + 'static>(mut self, f: F) -> Self {
        self.on_frame = Some(Box::new(f));
        self
    }

    /// Called once after the final frame
    pub fn on_stop<F: FnMut() + 'static>(mut self, f: F) -> Self {
        self.on_stop = Some(Box::new(f));
        self
    }

    /// Start ticking as soon as the animation is built
    pub fn enabled(mut self, enable: bool) -> Self {
        self.enable = enable;
        self
    }

    /// Drive ticks from a timer service
    pub fn timers(mut self, timers: SharedTimers) -> Self {
        self.timers = Some(timers);
        self
    }

    /// Use the jitter-smoothing timer variant (default) or a standard timer
    pub fn smooth_timer(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    /// Ticks are delivered by the caller through [`Fx::step`]
    pub fn external(mut self) -> Self {
        self.external = true;
        self
    }

    /// Build the animation
    ///
    /// # Errors
    ///
    /// Fails when the frame rate or duration is not positive, when no frame
    /// callback was set, or when a timer-driven animation has no timer service.
    pub fn build(self) -> Result<Fx> {
        let secs = self.duration.as_secs_f64();
        let total_ticks = self.fps as f64 * secs;
        if self.fps == 0 || !total_ticks.is_finite() || total_ticks <= 0.0 {
            return Err(AnimationError::InvalidTiming {
                fps: self.fps,
                secs,
            });
        }
        let on_frame = self.on_frame.ok_or(AnimationError::MissingFrameCallback)?;

        let driver = if self.external {
            Driver::External
        } else {
            let timers = self.timers.ok_or(AnimationError::MissingTimerService)?;
            let mode = if self.smooth {
                TimerMode::Smooth
            } else {
                TimerMode::Standard
            };
            Driver::Timer {
                timers,
                mode,
                handle: None,
            }
        };

        let (x_start, x_end, speed, curve, end_value) = match self.shape {
            Shape::Preset { begin, end, curve } => (
                0.0,
                total_ticks,
                1.0,
                Box::new(move |x: f64| curve.apply(x, begin, end, total_ticks)) as CurveFn,
                end,
            ),
            Shape::Custom {
                x_start,
                x_end,
                curve,
            } => {
                let end_value = curve(x_end);
                (x_start, x_end, (x_end - x_start) / total_ticks, curve, end_value)
            }
        };

        let mut fx = Fx {
            x_start,
            x_end,
            position: x_start,
            speed,
            interval: Duration::from_nanos(1_000_000_000 / u64::from(self.fps)),
            delay: self.delay,
            curve,
            end_value,
            on_frame,
            on_stop: self.on_stop,
            enabled: false,
            driver,
        };
        fx.set_enable(self.enable);
        Ok(fx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<f64>>>, impl FnMut(f64) + 'static) {
        let values = Rc::new(RefCell::new(Vec::new()));
        let sink = values.clone();
        (values, move |v| sink.borrow_mut().push(v))
    }

    fn run_to_end(fx: &mut Fx) -> usize {
        let mut ticks = 0;
        while fx.is_enabled() {
            fx.step();
            ticks += 1;
            assert!(ticks < 10_000, "animation never finished");
        }
        ticks
    }

    #[test]
    fn test_every_preset_ends_on_exact_value() {
        for curve in Curve::ALL {
            let (values, sink) = recorder();
            let mut fx = Fx::preset(0.0, 100.0, curve)
                .fps(10)
                .duration(Duration::from_secs(1))
                .on_frame(sink)
                .external()
                .build()
                .unwrap();

            fx.restart();
            assert_eq!(run_to_end(&mut fx), 10, "{curve}");
            assert_eq!(values.borrow().len(), 10, "{curve}");
            assert_eq!(values.borrow().last().copied(), Some(100.0), "{curve}");
        }
    }

    #[test]
    fn test_linear_values_per_tick() {
        let (values, sink) = recorder();
        let mut fx = Fx::preset(20.0, 70.0, Curve::Linear)
            .fps(5)
            .duration(Duration::from_secs(2))
            .on_frame(sink)
            .external()
            .build()
            .unwrap();

        fx.restart();
        run_to_end(&mut fx);

        let values = values.borrow();
        assert_eq!(values.len(), 10);
        for (i, value) in values.iter().enumerate() {
            let k = (i + 1) as f64;
            assert!((value - (20.0 + 50.0 * k / 10.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_custom_curve_clamps_final_value() {
        let (values, sink) = recorder();
        // 0.1 * 30 accumulates to slightly off 3.0
        let mut fx = Fx::custom(0.0, 3.0, |x| x * x)
            .fps(30)
            .duration(Duration::from_secs(1))
            .on_frame(sink)
            .external()
            .build()
            .unwrap();

        fx.restart();
        assert_eq!(run_to_end(&mut fx), 30);
        assert_eq!(values.borrow().last().copied(), Some(9.0));
        assert_eq!(fx.position(), 3.0);
    }

    #[test]
    fn test_tiny_custom_range_runs_every_tick() {
        for x_end in [1.0, 1e-8, 1e-9, 1e-12] {
            let (values, sink) = recorder();
            let mut fx = Fx::custom(0.0, x_end, |x| x)
                .fps(10)
                .duration(Duration::from_secs(1))
                .on_frame(sink)
                .external()
                .build()
                .unwrap();

            fx.restart();
            assert_eq!(run_to_end(&mut fx), 10, "x_end={x_end:e}");

            let values = values.borrow();
            assert_eq!(values.len(), 10, "x_end={x_end:e}");
            assert!(values[0] < x_end / 5.0, "x_end={x_end:e}");
            assert_eq!(values.last().copied(), Some(x_end));
        }
    }

    #[test]
    fn test_custom_descending_range() {
        let (values, sink) = recorder();
        let mut fx = Fx::custom(10.0, 0.0, |x| x)
            .fps(4)
            .duration(Duration::from_secs(1))
            .on_frame(sink)
            .external()
            .build()
            .unwrap();

        fx.restart();
        assert_eq!(run_to_end(&mut fx), 4);
        assert_eq!(*values.borrow(), vec![7.5, 5.0, 2.5, 0.0]);
    }

    #[test]
    fn test_on_stop_runs_once() {
        let stops = Rc::new(Cell::new(0));
        let counter = stops.clone();
        let mut fx = Fx::preset(0.0, 1.0, Curve::EaseOutQuad)
            .fps(4)
            .duration(Duration::from_secs(1))
            .on_frame(|_| {})
            .on_stop(move || counter.set(counter.get() + 1))
            .external()
            .build()
            .unwrap();

        fx.restart();
        run_to_end(&mut fx);
        fx.step();
        fx.step();
        assert_eq!(stops.get(), 1);
    }

    #[test]
    fn test_step_ignored_while_disabled() {
        let (values, sink) = recorder();
        let mut fx = Fx::preset(0.0, 10.0, Curve::Linear)
            .fps(10)
            .on_frame(sink)
            .external()
            .build()
            .unwrap();

        fx.step();
        assert!(values.borrow().is_empty());
        assert_eq!(fx.position(), 0.0);
    }

    #[test]
    fn test_restart_replays_from_start() {
        let (values, sink) = recorder();
        let mut fx = Fx::preset(0.0, 100.0, Curve::Linear)
            .fps(10)
            .on_frame(sink)
            .external()
            .enabled(true)
            .build()
            .unwrap();

        for _ in 0..4 {
            fx.step();
        }
        values.borrow_mut().clear();

        fx.restart();
        run_to_end(&mut fx);
        let expected: Vec<f64> = (1..=10).map(|k| k as f64 * 10.0).collect();
        assert_eq!(*values.borrow(), expected);
    }

    #[test]
    fn test_disable_and_resume() {
        let (values, sink) = recorder();
        let mut fx = Fx::preset(0.0, 100.0, Curve::Linear)
            .fps(10)
            .on_frame(sink)
            .external()
            .enabled(true)
            .build()
            .unwrap();

        fx.step();
        fx.step();
        fx.set_enable(false);
        for _ in 0..5 {
            fx.step();
        }
        assert_eq!(values.borrow().len(), 2);

        fx.set_enable(true);
        fx.step();
        assert_eq!(values.borrow().last().copied(), Some(30.0));
    }

    #[test]
    fn test_build_errors() {
        let no_fps = Fx::preset(0.0, 1.0, Curve::Linear)
            .fps(0)
            .on_frame(|_| {})
            .external()
            .build();
        assert!(matches!(no_fps, Err(AnimationError::InvalidTiming { fps: 0, .. })));

        let no_time = Fx::preset(0.0, 1.0, Curve::Linear)
            .duration(Duration::ZERO)
            .on_frame(|_| {})
            .external()
            .build();
        assert!(matches!(no_time, Err(AnimationError::InvalidTiming { .. })));

        let no_frame = Fx::preset(0.0, 1.0, Curve::Linear).external().build();
        assert!(matches!(no_frame, Err(AnimationError::MissingFrameCallback)));

        let no_timers = Fx::preset(0.0, 1.0, Curve::Linear).on_frame(|_| {}).build();
        assert!(matches!(no_timers, Err(AnimationError::MissingTimerService)));
    }

    #[test]
    fn test_interval_from_fps() {
        let fx = Fx::preset(0.0, 1.0, Curve::Linear)
            .fps(50)
            .on_frame(|_| {})
            .external()
            .build()
            .unwrap();
        assert_eq!(fx.interval(), Duration::from_millis(20));
        assert!(fx.is_external());
        assert!(!fx.is_enabled());
    }
}
