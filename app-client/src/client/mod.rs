//! Client module.
//!
//! [`HttpClient`] is the transport seam; [`AppClient`] groups the
//! accessors by resource on top of it.

mod app_client;
pub mod http;

// Re-export main types
pub use app_client::{AppClient, DishApi, DynamicApi, TaskApi};
pub use http::{Blob, HttpClient, NetworkHttpClient, ResponseBody};
