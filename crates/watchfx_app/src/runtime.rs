//! Page runners
//!
//! Both runners play the home page `repeat` times and pump the timer queue
//! until the animation stops. The headless runner jumps the virtual clock
//! straight to each deadline; the realtime runner sleeps until it.

use std::time::Duration;

use anyhow::{bail, Result};
use watchfx_platform::TimerQueue;

use crate::page::HomePage;

/// Configuration for a page run
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    /// Number of times to play the animation back to back
    pub repeat: u32,
    /// Upper bound on delivered frames before the run is aborted
    pub max_frames: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            repeat: 1,
            max_frames: 10_000,
        }
    }
}

impl RunConfig {
    fn validate(&self) -> Result<()> {
        if self.repeat == 0 {
            bail!("repeat must be > 0");
        }
        if self.max_frames == 0 {
            bail!("max_frames must be > 0");
        }
        Ok(())
    }
}

/// Outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Frames delivered to the page
    pub frames: u64,
    /// Plays that reached their final frame
    pub completed_runs: u32,
    /// Virtual time consumed
    pub elapsed: Duration,
}

/// Deterministic runner on virtual time
pub struct HeadlessRuntime;

impl HeadlessRuntime {
    pub fn run(page: &mut HomePage, timers: &TimerQueue, cfg: RunConfig) -> Result<RunReport> {
        cfg.validate()?;
        let started_at = timers.now();
        let mut frames = 0;

        for play in 0..cfg.repeat {
            tracing::debug!("Headless play {}", play + 1);
            page.play();
            while page.is_animating() {
                let Some(deadline) = timers.next_deadline() else {
                    break;
                };
                frames += pump(page, timers, deadline);
                if frames >= cfg.max_frames && page.is_animating() {
                    bail!("animation still running after {} frames", frames);
                }
            }
        }

        Ok(RunReport {
            frames,
            completed_runs: page.completed_runs(),
            elapsed: timers.now() - started_at,
        })
    }
}

/// Wall-clock runner on a tokio timer
pub struct RealtimeRuntime;

impl RealtimeRuntime {
    pub async fn run(page: &mut HomePage, timers: &TimerQueue, cfg: RunConfig) -> Result<RunReport> {
        cfg.validate()?;
        let started_at = timers.now();
        // Wall-clock instant that corresponds to virtual time zero
        let origin = tokio::time::Instant::now() - started_at;
        let mut frames = 0;

        for play in 0..cfg.repeat {
            tracing::info!("Playing home animation ({}/{})", play + 1, cfg.repeat);
            page.play();
            while page.is_animating() {
                let Some(deadline) = timers.next_deadline() else {
                    break;
                };
                tokio::time::sleep_until(origin + deadline).await;
                frames += pump(page, timers, origin.elapsed());
                if frames >= cfg.max_frames && page.is_animating() {
                    bail!("animation still running after {} frames", frames);
                }
            }
        }

        Ok(RunReport {
            frames,
            completed_runs: page.completed_runs(),
            elapsed: timers.now() - started_at,
        })
    }
}

/// Advance the queue and hand every firing to the page
fn pump(page: &mut HomePage, timers: &TimerQueue, now: Duration) -> u64 {
    timers
        .advance_to(now)
        .into_iter()
        .filter(|&handle| page.on_timer(handle))
        .count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WatchfxConfig;
    use std::rc::Rc;
    use watchfx_platform::HeadlessUi;

    fn built_page(config: WatchfxConfig) -> (HomePage, Rc<TimerQueue>) {
        let timers = Rc::new(TimerQueue::new());
        let mut page = HomePage::new(Rc::new(HeadlessUi::new()), timers.clone(), config);
        page.build().unwrap();
        (page, timers)
    }

    #[test]
    fn test_rejects_zero_budgets() {
        let (mut page, timers) = built_page(WatchfxConfig::default());
        let zero_repeat = RunConfig {
            repeat: 0,
            ..RunConfig::default()
        };
        assert!(HeadlessRuntime::run(&mut page, &timers, zero_repeat).is_err());

        let zero_frames = RunConfig {
            max_frames: 0,
            ..RunConfig::default()
        };
        assert!(HeadlessRuntime::run(&mut page, &timers, zero_frames).is_err());
    }

    #[test]
    fn test_headless_frame_count() {
        let mut config = WatchfxConfig::default();
        config.animation.fps = 10;
        let (mut page, timers) = built_page(config);

        let report = HeadlessRuntime::run(&mut page, &timers, RunConfig::default()).unwrap();
        assert_eq!(report.frames, 10);
        assert_eq!(report.completed_runs, 1);
        // First tick fires immediately, the remaining nine 100ms apart
        assert_eq!(report.elapsed, Duration::from_millis(900));
    }

    #[test]
    fn test_frame_budget_aborts() {
        let (mut page, timers) = built_page(WatchfxConfig::default());
        let cfg = RunConfig {
            repeat: 1,
            max_frames: 5,
        };
        let err = HeadlessRuntime::run(&mut page, &timers, cfg).unwrap_err();
        assert!(err.to_string().contains("5 frames"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_realtime_matches_headless() {
        let mut config = WatchfxConfig::default();
        config.animation.fps = 20;
        config.animation.duration_secs = 0.5;
        let (mut page, timers) = built_page(config);

        let cfg = RunConfig {
            repeat: 2,
            max_frames: 100,
        };
        let report = RealtimeRuntime::run(&mut page, &timers, cfg).await.unwrap();
        assert_eq!(report.frames, 20);
        assert_eq!(report.completed_runs, 2);
    }
}
