//! DNS resolution.
//!
//! This module provides async resolvability checks using `hickory-resolver`
//! behind the `Resolve` trait, so the classifier can be driven by a mock.

mod resolution;

// Re-export public API
pub use resolution::{is_resolvable, Resolve};
