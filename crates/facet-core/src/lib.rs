//! Facet Core - shared value types
//!
//! Small, dependency-light types used across the facet crates: colors
//! and axis-aligned bounds. No rendering or I/O lives here.

mod types;

pub use types::{Aabb, Color};
