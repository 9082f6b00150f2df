//! watchfx application
//!
//! The watch's home page plus the runners that drive it:
//!
//! - [`HomePage`]: builds the rectangle widget and owns its animation
//! - [`HeadlessRuntime`]: plays the page on virtual time, no sleeping
//! - [`RealtimeRuntime`]: plays the page against the wall clock with tokio
//! - [`WatchfxConfig`]: `watchfx.toml` loading

pub mod config;
pub mod page;
pub mod runtime;

pub use config::WatchfxConfig;
pub use page::HomePage;
pub use runtime::{HeadlessRuntime, RealtimeRuntime, RunConfig, RunReport};
