//! Error codes and the error value type
//!
//! Every failure that flows through a drive is an `ErrorInfo`: a rejected
//! future's error, the error re-injected into a computation, and the
//! terminal failure of the driven future itself.

use serde::{Deserialize, Serialize};

/// A yielded value matched no future-producing shape
pub const TYPE_ERROR: &str = "TypeError";

/// A callback-style function dropped its completion callback without calling it
pub const CALLBACK_DROPPED: &str = "CallbackDropped";

/// Error value with code and message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        ErrorInfo {
            code: code.into(),
            message: message.into(),
        }
    }
}
