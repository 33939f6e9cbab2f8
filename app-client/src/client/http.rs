// app-client/src/client/http.rs
// HTTP 客户端 - 网络通信

use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use reqwest::header::{AUTHORIZATION, CONTENT_DISPOSITION};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::response::{CODE_SUCCESS, CODE_UNAUTHORIZED};
use std::path::Path;
use std::sync::Arc;

use crate::request::{MultipartForm, RequestBody, RequestDescriptor, ResponseType, CONTENT_TYPE};
use crate::{ClientConfig, ClientError, ClientResult};

/// Raw binary response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    /// File name announced in `Content-Disposition`
    pub file_name: Option<String>,
}

impl Blob {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the bytes to disk
    pub async fn save_to(&self, path: impl AsRef<Path>) -> ClientResult<()> {
        tokio::fs::write(path, &self.bytes).await?;
        Ok(())
    }
}

/// Successful response body, shaped by the descriptor's `response_type`
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Blob(Blob),
}

impl ResponseBody {
    /// Decode a JSON body into `T`
    pub fn into_json<T: DeserializeOwned>(self) -> ClientResult<T> {
        match self {
            Self::Json(value) => Ok(serde_json::from_value(value)?),
            Self::Blob(_) => Err(ClientError::InvalidResponse(
                "expected a JSON body, got binary".into(),
            )),
        }
    }

    pub fn into_blob(self) -> ClientResult<Blob> {
        match self {
            Self::Blob(blob) => Ok(blob),
            Self::Json(_) => Err(ClientError::InvalidResponse(
                "expected a binary body, got JSON".into(),
            )),
        }
    }
}

/// HTTP 客户端 trait
///
/// Sends one [`RequestDescriptor`] and resolves to the response body on
/// success. Every failure (transport, non-2xx, failure envelope) is
/// reported as a [`ClientError`].
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn request(&self, descriptor: RequestDescriptor) -> ClientResult<ResponseBody>;
}

#[async_trait]
impl<C: HttpClient + ?Sized> HttpClient for Arc<C> {
    async fn request(&self, descriptor: RequestDescriptor) -> ClientResult<ResponseBody> {
        (**self).request(descriptor).await
    }
}

/// 网络 HTTP 客户端
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout_duration())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
        response_type: ResponseType,
    ) -> ClientResult<ResponseBody> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            tracing::warn!(%status, "Request rejected");
            return Err(status_error(status, text));
        }

        let headers = response.headers().clone();
        let content_type = headers
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        match response_type {
            ResponseType::Json => {
                let bytes = response.bytes().await?;
                let body: Value = if bytes.is_empty() {
                    Value::Null
                } else {
                    serde_json::from_slice(&bytes)?
                };
                check_envelope(&body)?;
                Ok(ResponseBody::Json(body))
            }
            ResponseType::Blob => {
                let bytes = response.bytes().await?.to_vec();
                // 下载失败时服务端返回 JSON 错误信息
                if content_type
                    .as_deref()
                    .is_some_and(|ct| ct.starts_with("application/json"))
                {
                    let body: Value = serde_json::from_slice(&bytes)?;
                    check_envelope(&body)?;
                }
                let file_name = headers
                    .get(CONTENT_DISPOSITION)
                    .and_then(|v| v.to_str().ok())
                    .and_then(content_disposition_file_name);
                Ok(ResponseBody::Blob(Blob {
                    bytes,
                    content_type,
                    file_name,
                }))
            }
        }
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn request(&self, descriptor: RequestDescriptor) -> ClientResult<ResponseBody> {
        let RequestDescriptor {
            url,
            method,
            params,
            data,
            headers,
            response_type,
        } = descriptor;

        let url = self.url(&url);
        tracing::debug!(%method, %url, "Sending request");

        let mut req = self.client.request(method, &url);
        if !params.is_empty() {
            req = req.query(&params);
        }
        if let Some(auth) = self.auth_header() {
            req = req.header(AUTHORIZATION, auth);
        }

        // multipart 的 Content-Type 需要 boundary，交给 reqwest 生成
        let is_multipart = matches!(data, Some(RequestBody::Multipart(_)));
        for (name, value) in &headers {
            if is_multipart && name.eq_ignore_ascii_case(CONTENT_TYPE) {
                continue;
            }
            req = req.header(name.as_str(), value.as_str());
        }

        req = match data {
            None => req,
            Some(RequestBody::Json(body)) => req.json(&body),
            Some(RequestBody::Form(pairs)) => req.form(&pairs),
            Some(RequestBody::Multipart(form)) => req.multipart(to_reqwest_form(form)?),
        };

        let response = req.send().await?;
        self.handle_response(response, response_type).await
    }
}

fn to_reqwest_form(form: MultipartForm) -> ClientResult<Form> {
    let mut out = Form::new();
    for (field, file) in form.fields {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        out = out.part(field, part);
    }
    Ok(out)
}

/// 服务端返回的错误响应格式
#[derive(serde::Deserialize)]
struct ApiErrorResponse {
    code: i32,
    #[serde(default)]
    msg: String,
}

fn status_error(status: StatusCode, text: String) -> ClientError {
    // 尝试解析为 API 错误响应
    if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&text) {
        if api_err.code == CODE_UNAUTHORIZED {
            return ClientError::Unauthorized(api_err.msg);
        }
        return ClientError::Api {
            code: api_err.code,
            message: api_err.msg,
        };
    }
    // 降级到按状态码处理
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(text),
        StatusCode::FORBIDDEN => ClientError::Forbidden(text),
        StatusCode::NOT_FOUND => ClientError::NotFound(text),
        StatusCode::BAD_REQUEST => ClientError::Validation(text),
        _ => ClientError::Internal(format!("{}: {}", status, text)),
    }
}

/// A 2xx body can still carry a failure code; surface it as an error
fn check_envelope(body: &Value) -> ClientResult<()> {
    let Some(code) = body.get("code").and_then(Value::as_i64) else {
        return Ok(());
    };
    if code == i64::from(CODE_SUCCESS) {
        return Ok(());
    }

    let message = body
        .get("msg")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    tracing::warn!(code, %message, "Backend reported failure");

    if code == i64::from(CODE_UNAUTHORIZED) {
        return Err(ClientError::Unauthorized(message));
    }
    Err(ClientError::Api {
        code: i32::try_from(code).unwrap_or(i32::MAX),
        message,
    })
}

/// Extract the file name from a `Content-Disposition` value.
///
/// `filename*` wins over `filename`; both may be percent-encoded.
fn content_disposition_file_name(value: &str) -> Option<String> {
    let mut plain = None;
    for param in value.split(';').map(str::trim) {
        let Some((key, raw)) = param.split_once('=') else {
            continue;
        };
        let raw = raw.trim().trim_matches('"');
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                // charset'language'value
                let encoded = raw.splitn(3, '\'').nth(2).unwrap_or(raw);
                return Some(percent_decode_str(encoded).decode_utf8_lossy().into_owned());
            }
            "filename" => {
                plain = Some(percent_decode_str(raw).decode_utf8_lossy().into_owned());
            }
            _ => {}
        }
    }
    plain
}
