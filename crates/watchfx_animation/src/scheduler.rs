//! Animation scheduler
//!
//! Owns a page's animations and routes ticks to them.

use crate::fx::Fx;
use crate::timer::TimerHandle;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct FxId;
}

/// Routes timer firings and external steps to the animations it owns
pub struct AnimationScheduler {
    animations: SlotMap<FxId, Fx>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            animations: SlotMap::with_key(),
        }
    }

    pub fn add(&mut self, fx: Fx) -> FxId {
        self.animations.insert(fx)
    }

    pub fn get(&self, id: FxId) -> Option<&Fx> {
        self.animations.get(id)
    }

    pub fn get_mut(&mut self, id: FxId) -> Option<&mut Fx> {
        self.animations.get_mut(id)
    }

    /// Remove an animation; dropping it releases its timer
    pub fn remove(&mut self, id: FxId) -> Option<Fx> {
        self.animations.remove(id)
    }

    /// Deliver a timer firing to the animation that owns `handle`
    ///
    /// Returns false for handles no animation owns (for example a timer that
    /// was released earlier in the same batch of firings).
    pub fn dispatch(&mut self, handle: TimerHandle) -> bool {
        let handled = self
            .animations
            .values_mut()
            .any(|fx| fx.on_timer(handle));
        if !handled {
            tracing::trace!("No animation owns timer {:?}", handle);
        }
        handled
    }

    /// Step every externally driven animation once
    pub fn step_external(&mut self) {
        for fx in self.animations.values_mut().filter(|fx| fx.is_external()) {
            fx.step();
        }
    }

    /// Check if any animations are still running
    pub fn has_active_animations(&self) -> bool {
        self.animations.values().any(|fx| fx.is_enabled())
    }

    /// Iterate over all animations (immutable)
    pub fn iter(&self) -> impl Iterator<Item = (FxId, &Fx)> {
        self.animations.iter()
    }

    /// Get the number of animations in the scheduler
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
