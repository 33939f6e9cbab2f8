//! Data models
//!
//! Wire shapes of the `/app` resources, camelCase on the wire.
//! Entity IDs are `i64` (server-side `Long`); dynamic-analysis task ids are
//! strings.

pub mod dish;
pub mod dynamic;
pub mod task;

// Re-exports
pub use dish::*;
pub use dynamic::*;
pub use task::*;
