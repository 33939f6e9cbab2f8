//! Dynamic Analysis Model
//!
//! After a package is submitted it can be run on the analysis device, either
//! as a plain dynamic session or instrumented with Frida. Task ids on these
//! endpoints are strings; the server generates one when none is given.

use serde::{Deserialize, Serialize};

/// Body of `POST /app/dynamic/start`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAnalysisRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    /// Server-side package path, as returned by an upload
    pub apk_path: String,
}

impl StartAnalysisRequest {
    pub fn new(apk_path: impl Into<String>) -> Self {
        Self {
            task_id: None,
            apk_path: apk_path.into(),
        }
    }

    pub fn with_task_id(mut self, task_id: impl ToString) -> Self {
        self.task_id = Some(task_id.to_string());
        self
    }
}

/// Body of `POST /app/dynamic/frida/start`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FridaStartRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    /// Android package name of the app under test
    pub package_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apk_path: Option<String>,
    /// Hook module to load; the server runs all modules when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_module: Option<String>,
    /// Server default is `normal`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// Seconds to wait after spawn before hooking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_time: Option<u32>,
}

impl FridaStartRequest {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            ..Default::default()
        }
    }

    pub fn with_task_id(mut self, task_id: impl ToString) -> Self {
        self.task_id = Some(task_id.to_string());
        self
    }
}

/// Running session, read from the top level of the start envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSession {
    pub task_id: String,
    /// Web VNC address for watching the device screen
    pub vnc_url: String,
    /// Only reported by Frida sessions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

/// Answer of `GET /app/dynamic/vncUrl`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VncInfo {
    pub vnc_url: String,
}

/// Answer of `GET /app/dynamic/frida/report/info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FridaReportInfo {
    /// Report path on the analysis host
    pub report_path: String,
    pub file_name: String,
}
