//! Home page
//!
//! One filled rounded rectangle. Playing the page tweens the rectangle's
//! color and geometry from its resting state to the configured target.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::{Context, Result};
use watchfx_animation::{
    mix_border, mix_color, AnimationScheduler, Border, Fx, FxId, SharedTimers, TimerHandle,
};
use watchfx_platform::{HostUi, Prop, Widget, WidgetId};

use crate::config::WatchfxConfig;

/// Resting geometry of the rectangle on a 466x466 screen
pub const RECT_BORDER: Border = Border::new(200.0, 200.0, 200.0, 60.0, 30.0);

/// Resting color of the rectangle
pub const RECT_COLOR: u32 = 0x181818;

/// The watch's home page
pub struct HomePage {
    ui: Rc<dyn HostUi>,
    timers: SharedTimers,
    config: WatchfxConfig,
    scheduler: AnimationScheduler,
    rect: Option<WidgetId>,
    animation: Option<FxId>,
    completed_runs: Rc<Cell<u32>>,
}

impl HomePage {
    pub fn new(ui: Rc<dyn HostUi>, timers: SharedTimers, config: WatchfxConfig) -> Self {
        Self {
            ui,
            timers,
            config,
            scheduler: AnimationScheduler::new(),
            rect: None,
            animation: None,
            completed_runs: Rc::new(Cell::new(0)),
        }
    }

    pub fn on_init(&mut self) {
        tracing::debug!("page onInit invoked");
    }

    /// Create the rectangle and prepare (but do not start) its animation
    pub fn build(&mut self) -> Result<()> {
        let rect = self.ui.create_widget(Widget::FillRect {
            border: RECT_BORDER,
            color: RECT_COLOR,
        });
        self.rect = Some(rect);

        let animation = &self.config.animation;
        let from_color = RECT_COLOR;
        let to_color = self.config.target.color;
        let to_border = self.config.target.border();
        let ui = self.ui.clone();
        let completed = self.completed_runs.clone();

        let fx = Fx::preset(0.0, 1.0, animation.curve()?)
            .fps(animation.fps)
            .duration(animation.duration()?)
            .delay(animation.delay())
            .smooth_timer(animation.smooth_timer)
            .timers(self.timers.clone())
            .on_frame(move |progress| {
                let color = mix_color(from_color, to_color, progress);
                let border = mix_border(&RECT_BORDER, &to_border, progress);
                let applied = ui
                    .set_property(rect, Prop::Color(color))
                    .and_then(|()| ui.set_property(rect, Prop::More(border)));
                if let Err(e) = applied {
                    tracing::warn!("Failed to update rect: {}", e);
                }
            })
            .on_stop(move || {
                completed.set(completed.get() + 1);
                tracing::debug!("home animation stopped");
            })
            .build()
            .context("Failed to build home page animation")?;

        self.animation = Some(self.scheduler.add(fx));
        tracing::info!(
            "Home page built: {} curve at {} fps over {}s",
            animation.curve,
            animation.fps,
            animation.duration_secs
        );
        Ok(())
    }

    /// Play the animation from the beginning
    pub fn play(&mut self) {
        match self.animation.and_then(|id| self.scheduler.get_mut(id)) {
            Some(fx) => fx.restart(),
            None => tracing::warn!("play() before build()"),
        }
    }

    /// Forward a timer firing; returns true if it produced a frame
    pub fn on_timer(&mut self, handle: TimerHandle) -> bool {
        self.scheduler.dispatch(handle)
    }

    pub fn is_animating(&self) -> bool {
        self.scheduler.has_active_animations()
    }

    /// Number of times the animation ran to completion
    pub fn completed_runs(&self) -> u32 {
        self.completed_runs.get()
    }

    pub fn rect(&self) -> Option<WidgetId> {
        self.rect
    }

    pub fn on_destroy(&mut self) {
        if let Some(fx) = self.animation.and_then(|id| self.scheduler.get_mut(id)) {
            fx.set_enable(false);
        }
        tracing::debug!("page onDestroy invoked");
    }
}
