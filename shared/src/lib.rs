//! Shared types for the admin API
//!
//! Wire types used by both the backend and `app-client`: response
//! envelopes, paging queries and the dish / task models.

pub mod models;
pub mod request;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use request::PageQuery;
pub use response::{AjaxResult, TableDataInfo};
