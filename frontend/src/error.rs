//! Error types for the Anagrams client bootstrap.
//!
//! - [`BootError`] - failures of the one-shot startup sequence
//! - [`CookieError`] - rejected cookie operations
//!
//! Cookie *degradation* (cookies disabled by the browser) is never an error:
//! reads come back empty and writes are dropped.

use thiserror::Error;
use wasm_bindgen::JsValue;

// =============================================================================
// Bootstrap Errors
// =============================================================================

/// Errors raised while bootstrapping the application.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BootError {
    /// The entry component could not be turned into a composition.
    #[error("Cannot construct composition '{component}': {reason}")]
    Construction { component: String, reason: String },

    /// The mount anchor is not present in the hosting document.
    #[error("Mount anchor '#{0}' not found in document")]
    AnchorNotFound(String),

    /// No global window/document is available.
    #[error("No hosting document available")]
    NoDocument,

    /// Boot configuration could not be read.
    #[error("Invalid boot configuration: {0}")]
    Config(String),

    /// A DOM call failed.
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<JsValue> for BootError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        BootError::Js(message)
    }
}

impl From<BootError> for JsValue {
    fn from(err: BootError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<serde_json::Error> for BootError {
    fn from(err: serde_json::Error) -> Self {
        BootError::Config(err.to_string())
    }
}

// =============================================================================
// Cookie Errors
// =============================================================================

/// Errors from the cookie-access capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CookieError {
    /// The cookie name is empty, contains separators, or is a reserved
    /// attribute name.
    #[error("Invalid cookie name: {0:?}")]
    InvalidName(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for bootstrap operations.
pub type BootResult<T> = Result<T, BootError>;

/// Result type for cookie operations.
pub type CookieResult<T> = Result<T, CookieError>;
