//! watchfx Platform Layer
//!
//! Host capabilities consumed by watchfx pages:
//!
//! - **Timers**: [`TimerQueue`], a single-threaded [`TimerService`] on a
//!   virtual clock with standard and smooth scheduling
//! - **UI**: the [`HostUi`] widget capability and its in-memory
//!   [`HeadlessUi`] implementation
//!
//! [`TimerService`]: watchfx_animation::TimerService

pub mod error;
pub mod timer;
pub mod ui;

pub use error::{PlatformError, Result};
pub use timer::{Fired, TimerQueue};
pub use ui::{HeadlessUi, HostUi, Prop, Widget, WidgetId};
