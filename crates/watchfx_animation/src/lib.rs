//! watchfx Animation System
//!
//! Tick-driven tweens for small watch UIs.
//!
//! # Features
//!
//! - **Curves**: linear and quadratic ease presets, or any custom `Fn(f64) -> f64`
//! - **Fx driver**: advances one animation per timer tick and reports each value
//! - **Timers**: pluggable [`TimerService`] with standard and smooth timer modes
//! - **Mixing**: packed-RGB color and border geometry interpolation
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::time::Duration;
//! use watchfx_animation::{Curve, Fx};
//!
//! let values = Rc::new(RefCell::new(Vec::new()));
//! let sink = values.clone();
//!
//! let mut fx = Fx::preset(0.0, 100.0, Curve::Linear)
//!     .fps(10)
//!     .duration(Duration::from_secs(1))
//!     .on_frame(move |v| sink.borrow_mut().push(v))
//!     .external()
//!     .build()
//!     .unwrap();
//!
//! fx.restart();
//! while fx.is_enabled() {
//!     fx.step();
//! }
//! assert_eq!(values.borrow().last().copied(), Some(100.0));
//! ```

pub mod easing;
pub mod error;
pub mod fx;
pub mod mix;
pub mod scheduler;
pub mod timer;

pub use easing::Curve;
pub use error::{AnimationError, Result};
pub use fx::{Fx, FxBuilder};
pub use mix::{mix_border, mix_color, Border};
pub use scheduler::{AnimationScheduler, FxId};
pub use timer::{SharedTimers, TimerHandle, TimerMode, TimerRequest, TimerService};
