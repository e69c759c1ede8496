//! Type definitions for the driver
//!
//! This module contains the core data types:
//! - Runtime values (Val) and JSON conversions
//! - Yieldable values (Yielded) and the future/callback aliases

pub mod values;
pub mod yieldable;

// Re-export all types for convenient access
pub use values::{json_to_val, val_to_json, Val};
pub use yieldable::{CallbackFn, Completion, FactoryFn, Settlement, ValFuture, Yielded};
