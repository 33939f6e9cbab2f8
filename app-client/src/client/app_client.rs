//! `AppClient` and its per-resource handles.
//!
//! Each handle method builds the descriptor with the matching function in
//! [`crate::api`], sends it through the client's [`HttpClient`] and decodes
//! the body. Errors are passed through untouched.

use std::fmt::Display;

use serde::de::DeserializeOwned;
use shared::models::{
    AnalysisSession, Dish, DishQuery, FridaReportInfo, FridaStartRequest, SampleFile,
    StartAnalysisRequest, SubmitTaskRequest, SubmitTaskResult, Task, TaskQuery, UploadedBatch,
    UploadedFile, VncInfo,
};
use shared::{AjaxResult, TableDataInfo};

use super::http::{Blob, HttpClient, NetworkHttpClient, ResponseBody};
use crate::api::{dish, dynamic, task};
use crate::request::{FilePart, RequestDescriptor};
use crate::{ClientConfig, ClientResult};

/// Admin API client
///
/// # Example
///
/// ```no_run
/// use app_client::{AppClient, ClientConfig};
///
/// # async fn example() -> Result<(), app_client::ClientError> {
/// let client = AppClient::new(&ClientConfig::new("http://localhost:8080").with_token("token"))?;
/// let dish = client.dish().get(42).await?;
/// let report = client.task().download_report(7).await?;
/// report.save_to("report.xlsx").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AppClient<C = NetworkHttpClient> {
    http: C,
}

impl AppClient<NetworkHttpClient> {
    /// Create a client backed by the network HTTP client
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::with_http(NetworkHttpClient::new(config)?))
    }
}

impl<C: HttpClient> AppClient<C> {
    /// Create a client over any [`HttpClient`]
    pub fn with_http(http: C) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn dish(&self) -> DishApi<'_, C> {
        DishApi { client: self }
    }

    pub fn task(&self) -> TaskApi<'_, C> {
        TaskApi { client: self }
    }

    pub fn dynamic(&self) -> DynamicApi<'_, C> {
        DynamicApi { client: self }
    }

    /// Send a descriptor as-is
    pub async fn send(&self, descriptor: RequestDescriptor) -> ClientResult<ResponseBody> {
        self.http.request(descriptor).await
    }

    async fn fetch<T: DeserializeOwned>(&self, descriptor: RequestDescriptor) -> ClientResult<T> {
        self.send(descriptor).await?.into_json()
    }

    async fn fetch_blob(&self, descriptor: RequestDescriptor) -> ClientResult<Blob> {
        self.send(descriptor).await?.into_blob()
    }
}

/// `/app/dish` operations
pub struct DishApi<'a, C> {
    client: &'a AppClient<C>,
}

impl<C: HttpClient> DishApi<'_, C> {
    pub async fn list(&self, query: &DishQuery) -> ClientResult<TableDataInfo<Dish>> {
        self.client.fetch(dish::list(query)?).await
    }

    pub async fn get(&self, id: impl Display) -> ClientResult<AjaxResult<Dish>> {
        self.client.fetch(dish::get(id)).await
    }

    pub async fn create(&self, data: &Dish) -> ClientResult<AjaxResult> {
        self.client.fetch(dish::create(data)?).await
    }

    pub async fn update(&self, data: &Dish) -> ClientResult<AjaxResult> {
        self.client.fetch(dish::update(data)?).await
    }

    pub async fn delete(&self, id: impl Display) -> ClientResult<AjaxResult> {
        self.client.fetch(dish::delete(id)).await
    }

    pub async fn delete_batch(&self, ids: &str) -> ClientResult<AjaxResult> {
        self.client.fetch(dish::delete_batch(ids)).await
    }

    pub async fn export(&self, query: &DishQuery) -> ClientResult<Blob> {
        self.client.fetch_blob(dish::export(query)?).await
    }
}

/// `/app/task` operations
pub struct TaskApi<'a, C> {
    client: &'a AppClient<C>,
}

impl<C: HttpClient> TaskApi<'_, C> {
    pub async fn list(&self, query: &TaskQuery) -> ClientResult<TableDataInfo<Task>> {
        self.client.fetch(task::list(query)?).await
    }

    pub async fn get(&self, id: impl Display) -> ClientResult<AjaxResult<Task>> {
        self.client.fetch(task::get(id)).await
    }

    pub async fn create(&self, data: &Task) -> ClientResult<AjaxResult> {
        self.client.fetch(task::create(data)?).await
    }

    pub async fn submit(&self, data: &SubmitTaskRequest) -> ClientResult<SubmitTaskResult> {
        self.client.fetch(task::submit(data)?).await
    }

    pub async fn upload_app(&self, file: FilePart) -> ClientResult<UploadedFile> {
        self.client.fetch(task::upload_app(file)).await
    }

    pub async fn upload_apps(&self, files: Vec<FilePart>) -> ClientResult<UploadedBatch> {
        self.client.fetch(task::upload_apps(files)).await
    }

    pub async fn download_app_from_url(&self, url: &str) -> ClientResult<AjaxResult> {
        self.client.fetch(task::download_app_from_url(url)).await
    }

    pub async fn get_sample_list(&self) -> ClientResult<AjaxResult<Vec<SampleFile>>> {
        self.client.fetch(task::get_sample_list()).await
    }

    pub async fn update(&self, data: &Task) -> ClientResult<AjaxResult> {
        self.client.fetch(task::update(data)?).await
    }

    pub async fn delete(&self, id: impl Display) -> ClientResult<AjaxResult> {
        self.client.fetch(task::delete(id)).await
    }

    pub async fn delete_batch(&self, ids: &str) -> ClientResult<AjaxResult> {
        self.client.fetch(task::delete_batch(ids)).await
    }

    pub async fn cancel(&self, id: impl Display) -> ClientResult<AjaxResult> {
        self.client.fetch(task::cancel(id)).await
    }

    pub async fn restart(&self, id: impl Display) -> ClientResult<AjaxResult> {
        self.client.fetch(task::restart(id)).await
    }

    pub async fn download_report(&self, id: impl Display) -> ClientResult<Blob> {
        self.client.fetch_blob(task::download_report(id)).await
    }

    pub async fn export(&self, query: &TaskQuery) -> ClientResult<Blob> {
        self.client.fetch_blob(task::export(query)?).await
    }
}

/// `/app/dynamic` operations
pub struct DynamicApi<'a, C> {
    client: &'a AppClient<C>,
}

impl<C: HttpClient> DynamicApi<'_, C> {
    pub async fn start(&self, data: &StartAnalysisRequest) -> ClientResult<AnalysisSession> {
        self.client.fetch(dynamic::start(data)?).await
    }

    pub async fn stop(&self, task_id: &str) -> ClientResult<AjaxResult> {
        self.client.fetch(dynamic::stop(task_id)).await
    }

    pub async fn vnc_url(&self) -> ClientResult<VncInfo> {
        self.client.fetch(dynamic::vnc_url()).await
    }

    pub async fn frida_start(&self, data: &FridaStartRequest) -> ClientResult<AnalysisSession> {
        self.client.fetch(dynamic::frida_start(data)?).await
    }

    pub async fn frida_stop(&self, task_id: &str) -> ClientResult<AjaxResult> {
        self.client.fetch(dynamic::frida_stop(task_id)).await
    }

    pub async fn frida_report_info(&self, task_id: &str) -> ClientResult<FridaReportInfo> {
        self.client.fetch(dynamic::frida_report_info(task_id)).await
    }

    pub async fn frida_report_download(&self, task_id: &str) -> ClientResult<Blob> {
        self.client.fetch_blob(dynamic::frida_report_download(task_id)).await
    }
}
