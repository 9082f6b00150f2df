//! Platform error types

use thiserror::Error;

use crate::ui::WidgetId;

/// Platform-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlatformError {
    /// Widget id does not refer to a live widget
    #[error("Widget not found: {0:?}")]
    WidgetNotFound(WidgetId),

    /// Property does not apply to this kind of widget
    #[error("Property {prop} not supported by {kind} widget")]
    UnsupportedProperty { kind: &'static str, prop: &'static str },
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
