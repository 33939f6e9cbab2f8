//! Dynamic analysis endpoints (`/app/dynamic`)
//!
//! The server-sent log streams (`/logs`, `/frida/logs`) are not covered:
//! they never complete, so they do not fit a single request/response call.

use serde::Serialize;
use serde_json::json;

use crate::request::RequestDescriptor;
use crate::ClientResult;

const BASE: &str = "/app/dynamic";

/// `POST /app/dynamic/start` with body `{taskId?, apkPath}`
pub fn start<B: Serialize + ?Sized>(data: &B) -> ClientResult<RequestDescriptor> {
    RequestDescriptor::post(format!("{BASE}/start")).json(data)
}

/// `POST /app/dynamic/stop` with body `{taskId}`
pub fn stop(task_id: &str) -> RequestDescriptor {
    RequestDescriptor::post(format!("{BASE}/stop")).json_value(json!({ "taskId": task_id }))
}

/// `GET /app/dynamic/vncUrl`
pub fn vnc_url() -> RequestDescriptor {
    RequestDescriptor::get(format!("{BASE}/vncUrl"))
}

/// `POST /app/dynamic/frida/start`
pub fn frida_start<B: Serialize + ?Sized>(data: &B) -> ClientResult<RequestDescriptor> {
    RequestDescriptor::post(format!("{BASE}/frida/start")).json(data)
}

/// `POST /app/dynamic/frida/stop` with body `{taskId}`
pub fn frida_stop(task_id: &str) -> RequestDescriptor {
    RequestDescriptor::post(format!("{BASE}/frida/stop")).json_value(json!({ "taskId": task_id }))
}

/// `GET /app/dynamic/frida/report/info?taskId=`
pub fn frida_report_info(task_id: &str) -> RequestDescriptor {
    RequestDescriptor::get(format!("{BASE}/frida/report/info")).query("taskId", task_id)
}

/// `GET /app/dynamic/frida/report/download?taskId=`, spreadsheet bytes
pub fn frida_report_download(task_id: &str) -> RequestDescriptor {
    RequestDescriptor::get(format!("{BASE}/frida/report/download"))
        .query("taskId", task_id)
        .blob()
}
