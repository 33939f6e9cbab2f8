//! App Client - HTTP client for the admin backend
//!
//! Accessors for the dish, detection-task and dynamic-analysis endpoints
//! under `/app`.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod request;

pub use client::{AppClient, Blob, HttpClient, NetworkHttpClient, ResponseBody};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use request::{join_ids, FilePart, MultipartForm, RequestBody, RequestDescriptor, ResponseType};

// Re-export shared types for convenience
pub use shared::models;
pub use shared::{AjaxResult, PageQuery, TableDataInfo};
