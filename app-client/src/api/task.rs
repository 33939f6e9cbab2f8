//! Detection task endpoints (`/app/task`)

use std::fmt::Display;

use serde::Serialize;
use serde_json::json;

use crate::request::{FilePart, MultipartForm, RequestDescriptor};
use crate::ClientResult;

const BASE: &str = "/app/task";

/// `GET /app/task/list`
pub fn list<Q: Serialize + ?Sized>(query: &Q) -> ClientResult<RequestDescriptor> {
    RequestDescriptor::get(format!("{BASE}/list")).params(query)
}

/// `GET /app/task/{id}`
pub fn get(id: impl Display) -> RequestDescriptor {
    RequestDescriptor::get(format!("{BASE}/{id}"))
}

/// `POST /app/task`
pub fn create<B: Serialize + ?Sized>(data: &B) -> ClientResult<RequestDescriptor> {
    RequestDescriptor::post(BASE).json(data)
}

/// `POST /app/task/submit`, starts analysis of already uploaded files
pub fn submit<B: Serialize + ?Sized>(data: &B) -> ClientResult<RequestDescriptor> {
    RequestDescriptor::post(format!("{BASE}/submit")).json(data)
}

/// `POST /app/task/upload`, one package in field `file`
pub fn upload_app(file: FilePart) -> RequestDescriptor {
    RequestDescriptor::post(format!("{BASE}/upload")).multipart(MultipartForm::new().part("file", file))
}

/// `POST /app/task/uploads`, every package in a repeated `files` field
pub fn upload_apps(files: impl IntoIterator<Item = FilePart>) -> RequestDescriptor {
    let form = files
        .into_iter()
        .fold(MultipartForm::new(), |form, file| form.part("files", file));
    RequestDescriptor::post(format!("{BASE}/uploads")).multipart(form)
}

/// `POST /app/task/download` with body `{url}`; the server fetches the package
pub fn download_app_from_url(url: &str) -> RequestDescriptor {
    RequestDescriptor::post(format!("{BASE}/download")).json_value(json!({ "url": url }))
}

/// `GET /app/task/samples`
pub fn get_sample_list() -> RequestDescriptor {
    RequestDescriptor::get(format!("{BASE}/samples"))
}

/// `PUT /app/task`
pub fn update<B: Serialize + ?Sized>(data: &B) -> ClientResult<RequestDescriptor> {
    RequestDescriptor::put(BASE).json(data)
}

/// `DELETE /app/task/{id}`
pub fn delete(id: impl Display) -> RequestDescriptor {
    RequestDescriptor::delete(format!("{BASE}/{id}"))
}

/// `DELETE /app/task/{ids}` with ids already joined (see [`crate::join_ids`])
pub fn delete_batch(ids: &str) -> RequestDescriptor {
    RequestDescriptor::delete(format!("{BASE}/{ids}"))
}

/// `PUT /app/task/cancel/{id}`
pub fn cancel(id: impl Display) -> RequestDescriptor {
    RequestDescriptor::put(format!("{BASE}/cancel/{id}"))
}

/// `PUT /app/task/restart/{id}`
pub fn restart(id: impl Display) -> RequestDescriptor {
    RequestDescriptor::put(format!("{BASE}/restart/{id}"))
}

/// `GET /app/task/report/{id}`, report file bytes
pub fn download_report(id: impl Display) -> RequestDescriptor {
    RequestDescriptor::get(format!("{BASE}/report/{id}")).blob()
}

/// `GET /app/task/export`, spreadsheet bytes
pub fn export<Q: Serialize + ?Sized>(query: &Q) -> ClientResult<RequestDescriptor> {
    Ok(RequestDescriptor::get(format!("{BASE}/export")).params(query)?.blob())
}
