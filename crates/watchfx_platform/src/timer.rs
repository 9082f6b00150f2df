//! Virtual-clock timer queue
//!
//! A deterministic [`TimerService`]. Time only moves when the owner calls
//! [`TimerQueue::advance_to`] or [`TimerQueue::advance_by`]; a realtime
//! runner sleeps until [`TimerQueue::next_deadline`] and then advances to the
//! wall-clock elapsed time, while tests and headless runs jump straight there.
//!
//! Every advance fires each due timer at most once. A timer that fell behind
//! is rescheduled according to its [`TimerMode`]:
//!
//! - `Standard`: one interval after the moment it actually fired, so lateness
//!   shifts every later firing
//! - `Smooth`: the next slot on its `anchor + k * interval` grid, so lateness
//!   is absorbed by skipping slots instead of drifting

use std::cell::{Cell, RefCell};
use std::time::Duration;

use slotmap::SlotMap;
use smallvec::SmallVec;
use watchfx_animation::{TimerHandle, TimerMode, TimerRequest, TimerService};

/// Handles fired by one advance, in firing order
pub type Fired = SmallVec<[TimerHandle; 4]>;

/// Intervals are floored to this so a timer cannot fire forever in place
const MIN_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug)]
struct TimerEntry {
    interval: Duration,
    mode: TimerMode,
    /// First firing time; grid origin for smooth timers
    anchor: Duration,
    next_fire: Duration,
    fire_count: u64,
    /// Creation order, breaks ties between equal deadlines
    seq: u64,
}

impl TimerEntry {
    fn reschedule(&mut self, now: Duration) {
        self.next_fire = match self.mode {
            TimerMode::Standard => now + self.interval,
            TimerMode::Smooth => {
                let interval = self.interval.as_nanos();
                let elapsed = now.saturating_sub(self.anchor).as_nanos();
                let slot = elapsed / interval + 1;
                self.anchor + nanos(slot * interval)
            }
        };
    }
}

fn nanos(value: u128) -> Duration {
    Duration::from_nanos(u64::try_from(value).unwrap_or(u64::MAX))
}

/// Single-threaded timer service driven by a virtual clock
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Cell<Duration>,
    next_seq: Cell<u64>,
    timers: RefCell<SlotMap<TimerHandle, TimerEntry>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Number of live timers
    pub fn len(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.borrow().is_empty()
    }

    pub fn is_live(&self, handle: TimerHandle) -> bool {
        self.timers.borrow().contains_key(handle)
    }

    /// How many times a live timer has fired
    pub fn fire_count(&self, handle: TimerHandle) -> Option<u64> {
        self.timers.borrow().get(handle).map(|t| t.fire_count)
    }

    /// Earliest pending firing time across all live timers
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.borrow().values().map(|t| t.next_fire).min()
    }

    /// Move the clock forward to `now` and fire every due timer once
    ///
    /// The clock never moves backwards; an earlier `now` only fires timers
    /// that are already due.
    pub fn advance_to(&self, now: Duration) -> Fired {
        let now = now.max(self.now.get());
        self.now.set(now);

        let mut timers = self.timers.borrow_mut();
        let mut due: SmallVec<[(Duration, u64, TimerHandle); 4]> = timers
            .iter()
            .filter(|(_, t)| t.next_fire <= now)
            .map(|(handle, t)| (t.next_fire, t.seq, handle))
            .collect();
        due.sort_unstable_by_key(|&(deadline, seq, _)| (deadline, seq));

        let mut fired = Fired::new();
        for (_, _, handle) in due {
            if let Some(timer) = timers.get_mut(handle) {
                timer.fire_count += 1;
                timer.reschedule(now);
                fired.push(handle);
            }
        }

        if !fired.is_empty() {
            tracing::trace!("{} timer(s) fired at {:?}", fired.len(), now);
        }
        fired
    }

    /// Move the clock forward by `dt`
    pub fn advance_by(&self, dt: Duration) -> Fired {
        self.advance_to(self.now.get() + dt)
    }
}

impl TimerService for TimerQueue {
    fn create(&self, request: TimerRequest) -> TimerHandle {
        let interval = if request.interval < MIN_INTERVAL {
            tracing::warn!(
                "Timer interval {:?} raised to {:?}",
                request.interval,
                MIN_INTERVAL
            );
            MIN_INTERVAL
        } else {
            request.interval
        };

        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);

        let anchor = self.now.get() + request.delay;
        let handle = self.timers.borrow_mut().insert(TimerEntry {
            interval,
            mode: request.mode,
            anchor,
            next_fire: anchor,
            fire_count: 0,
            seq,
        });
        tracing::debug!(
            "Created {:?} timer {:?}: first at {:?}, every {:?}",
            request.mode,
            handle,
            anchor,
            interval
        );
        handle
    }

    fn stop(&self, handle: TimerHandle) -> bool {
        let stopped = self.timers.borrow_mut().remove(handle).is_some();
        if !stopped {
            tracing::trace!("Stop ignored for dead timer {:?}", handle);
        }
        stopped
    }
}
