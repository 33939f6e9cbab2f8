//! Detection Task Model
//!
//! A task scans one or more uploaded APK/IPA packages. Packages reach the
//! server either as multipart uploads or by URL, and the server answers with
//! the stored file paths that a later submit refers to.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::request::PageQuery;

/// Task lifecycle state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
    /// Any state this client does not know about
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// Whether the task can no longer change without a restart
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

/// Task entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub task_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Server-side paths of the packages under test
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_paths: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apk_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_by: Option<String>,
    #[serde(
        default,
        with = "crate::util::opt_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub create_time: Option<NaiveDateTime>,
    #[serde(
        default,
        with = "crate::util::opt_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub update_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

/// Task list filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

/// Body of `POST /app/task/submit`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTaskRequest {
    pub task_name: String,
    /// Paths returned by a previous upload
    pub file_paths: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

impl SubmitTaskRequest {
    pub fn new(task_name: impl Into<String>, file_paths: Vec<String>) -> Self {
        Self {
            task_name: task_name.into(),
            file_paths,
            remark: None,
        }
    }
}

/// Submit result, read from the top level of the response envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTaskResult {
    pub task_id: i64,
    pub task_name: String,
    /// First package path of the task
    pub apk_path: String,
    pub file_count: u32,
}

/// A package stored by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Stored (unique) file name
    pub file_name: String,
    #[serde(default)]
    pub original_filename: String,
    /// Absolute path on the analysis host
    pub file_path: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub url: Option<String>,
}

/// Result of a multi-file upload; the vectors are index-aligned
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedBatch {
    #[serde(default)]
    pub file_names: Vec<String>,
    #[serde(default)]
    pub file_paths: Vec<String>,
    #[serde(default)]
    pub original_filenames: Vec<String>,
    #[serde(default)]
    pub file_sizes: Vec<u64>,
}

impl UploadedBatch {
    pub fn len(&self) -> usize {
        self.file_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file_names.is_empty()
    }
}

/// Sample package available for quick tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleFile {
    pub file_name: String,
    pub file_path: String,
    #[serde(default)]
    pub file_size: u64,
}
