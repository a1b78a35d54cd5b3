//! Error handling.
//!
//! This module provides:
//! - Error type definitions for orchestration failures
//! - Categorization of transport errors into probe failures

mod categorization;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use types::{InitializationError, SourceError};
