//! Dish endpoints (`/app/dish`)

use std::fmt::Display;

use serde::Serialize;

use crate::request::RequestDescriptor;
use crate::ClientResult;

const BASE: &str = "/app/dish";

/// `GET /app/dish/list`
pub fn list<Q: Serialize + ?Sized>(query: &Q) -> ClientResult<RequestDescriptor> {
    RequestDescriptor::get(format!("{BASE}/list")).params(query)
}

/// `GET /app/dish/{id}`
pub fn get(id: impl Display) -> RequestDescriptor {
    RequestDescriptor::get(format!("{BASE}/{id}"))
}

/// `POST /app/dish`
pub fn create<B: Serialize + ?Sized>(data: &B) -> ClientResult<RequestDescriptor> {
    RequestDescriptor::post(BASE).json(data)
}

/// `PUT /app/dish`; the body must carry the id
pub fn update<B: Serialize + ?Sized>(data: &B) -> ClientResult<RequestDescriptor> {
    RequestDescriptor::put(BASE).json(data)
}

/// `DELETE /app/dish/{id}`
pub fn delete(id: impl Display) -> RequestDescriptor {
    RequestDescriptor::delete(format!("{BASE}/{id}"))
}

/// `DELETE /app/dish/{ids}` with ids already joined (see [`crate::join_ids`])
pub fn delete_batch(ids: &str) -> RequestDescriptor {
    RequestDescriptor::delete(format!("{BASE}/{ids}"))
}

/// `POST /app/dish/export`, form-encoded filter, spreadsheet bytes back
pub fn export<Q: Serialize + ?Sized>(query: &Q) -> ClientResult<RequestDescriptor> {
    Ok(RequestDescriptor::post(format!("{BASE}/export")).form(query)?.blob())
}
