//! API Response types
//!
//! Envelopes returned by the admin backend. Every JSON endpoint answers with
//! one of two shapes:
//! ```json
//! { "code": 200, "msg": "操作成功", "data": { ... } }
//! { "total": 2, "rows": [ ... ], "code": 200, "msg": "查询成功" }
//! ```
//! Controllers may also put arbitrary keys next to `code`/`msg` (upload and
//! submit results do), so [`AjaxResult`] keeps them in `extra`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Success code
pub const CODE_SUCCESS: i32 = 200;
/// Session expired or token missing
pub const CODE_UNAUTHORIZED: i32 = 401;
/// Business warning (operation refused, not a crash)
pub const CODE_WARN: i32 = 601;

/// Generic response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AjaxResult<T = Value> {
    pub code: i32,
    #[serde(default)]
    pub msg: String,
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Top-level keys other than `code`, `msg` and `data`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn none<T>() -> Option<T> {
    None
}

impl<T> AjaxResult<T> {
    /// Success without payload, like `toAjax` on the server
    pub fn ok(msg: impl Into<String>) -> Self {
        Self::error(CODE_SUCCESS, msg)
    }

    pub fn error(code: i32, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
            extra: Map::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == CODE_SUCCESS
    }

    /// Attach an extra top-level key
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Decode the extra top-level keys into a typed struct
    pub fn extra_as<U: DeserializeOwned>(&self) -> Result<U, serde_json::Error> {
        serde_json::from_value(Value::Object(self.extra.clone()))
    }
}

/// Paginated table response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDataInfo<T> {
    #[serde(default)]
    pub total: i64,
    #[serde(default = "Vec::new")]
    pub rows: Vec<T>,
    pub code: i32,
    #[serde(default)]
    pub msg: String,
}

impl<T> TableDataInfo<T> {
    pub fn is_success(&self) -> bool {
        self.code == CODE_SUCCESS
    }
}
