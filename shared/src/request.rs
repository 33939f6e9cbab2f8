//! Request types for the shared crate
//!
//! Paging and ordering parameters understood by every `/list` endpoint.

use serde::{Deserialize, Serialize};

/// Paging query parameters
///
/// Flattened into resource queries; absent fields fall back to the server's
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// Page number (1-based)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_num: Option<u32>,

    /// Items per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    /// Column to order by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by_column: Option<String>,

    /// "ascending" or "descending"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_asc: Option<String>,
}

impl PageQuery {
    pub fn new(page_num: u32, page_size: u32) -> Self {
        Self {
            page_num: Some(page_num),
            page_size: Some(page_size),
            ..Default::default()
        }
    }

    pub fn order_by(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order_by_column = Some(column.into());
        self.is_asc = Some(if ascending { "ascending" } else { "descending" }.to_string());
        self
    }
}
