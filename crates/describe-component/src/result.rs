//! Result and error types for describe-component.

use thiserror::Error;

use crate::guard::ModeSet;

/// Result type for describe-component operations
pub type DescribeResult<T> = Result<T, DescribeError>;

/// Errors that can occur while describing and rendering components
#[derive(Debug, Error)]
pub enum DescribeError {
    /// `set_props` or `clear_props` was called after a guarded render
    #[error("{message}")]
    PropsAlreadyRendered {
        /// Render modes that already produced a wrapper
        modes: ModeSet,
        /// Fully interpolated message
        message: String,
    },

    /// Rendering engine failure
    #[error("Render failed: {message}")]
    Render {
        /// Error message
        message: String,
    },

    /// Selector could not be parsed
    #[error("Invalid selector `{selector}`: {message}")]
    Selector {
        /// Offending selector
        selector: String,
        /// Error message
        message: String,
    },

    /// A lifecycle hook failed
    #[error("Hook failed: {message}")]
    Hook {
        /// Error message
        message: String,
    },

    /// Invalid run configuration
    #[error("Invalid configuration: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DescribeError {
    /// Create a render error
    #[must_use]
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Create a hook error
    #[must_use]
    pub fn hook(message: impl Into<String>) -> Self {
        Self::Hook {
            message: message.into(),
        }
    }

    /// Check whether this is the prop mutation guard firing
    #[must_use]
    pub const fn is_already_rendered(&self) -> bool {
        matches!(self, Self::PropsAlreadyRendered { .. })
    }
}
