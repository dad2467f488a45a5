//! Async execution of `HttpRequest` values over reqwest, and the
//! `ApiClient` facade built on top of it.
//!
//! # Design
//! `execute` is the single I/O point: it maps plain request data onto a
//! reqwest builder and reads the full response back into an `HttpResponse`.
//! Status interpretation is left to `BackendClient::parse_*`, so a 4xx/5xx
//! comes back as data and only network failures surface as
//! `ApiError::Transport`. No retry, timeout or cancellation is layered on
//! top; whatever reqwest does by default applies.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{debug, trace};

use crate::client::BackendClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{FormPart, HttpMethod, HttpRequest, HttpResponse, RequestBody, RequestOptions};
use crate::types::FileUpload;

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn to_form(parts: Vec<FormPart>) -> Result<Form, reqwest::Error> {
    parts.into_iter().try_fold(Form::new(), |form, FormPart { name, file }| {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        Ok(form.part(name, part))
    })
}

/// Send `request` and read the whole response.
///
/// Non-2xx statuses are returned as `Ok`.
pub async fn execute(http: &reqwest::Client, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    let HttpRequest {
        method,
        url,
        headers,
        body,
    } = request;
    debug!(method = method.as_str(), %url, "sending request");

    let mut builder = http.request(to_reqwest_method(method), &url);
    for (name, value) in &headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder = match body {
        Some(RequestBody::Json(payload)) => builder.body(payload),
        Some(RequestBody::Multipart(parts)) => builder.multipart(to_form(parts)?),
        None => builder,
    };

    let response = builder.send().await?;
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(k, v)| (k.as_str().to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
        .collect();
    let body = response.text().await?;
    debug!(status, %url, "received response");
    trace!(%body, "response body");

    Ok(HttpResponse { status, headers, body })
}

/// Async client for the backend API.
///
/// Cheap to clone; clones share reqwest's connection pool and nothing else.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: BackendClient,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self {
            inner: BackendClient::from_config(&config),
            http,
        }
    }

    pub fn backend(&self) -> &BackendClient {
        &self.inner
    }

    /// Send a JSON request to `endpoint` and return the parsed body.
    ///
    /// Fails with `ApiError::Status` on any non-2xx response.
    pub async fn fetch_api(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let request = self.inner.build_fetch(endpoint, &options)?;
        let response = execute(&self.http, request).await?;
        self.inner.parse_fetch(response)
    }

    /// `GET /api/test`.
    pub async fn test_backend_connection(&self) -> Result<Value, ApiError> {
        let request = self.inner.build_test_connection();
        let response = execute(&self.http, request).await?;
        self.inner.parse_test_connection(response)
    }

    /// `POST /api/upload` with `file` as the `image` part.
    ///
    /// The body is parsed as JSON regardless of status; a rejected upload
    /// resolves to the backend's error document rather than `Err`.
    pub async fn upload_image(&self, file: FileUpload) -> Result<Value, ApiError> {
        let request = self.inner.build_upload_image(file);
        let response = execute(&self.http, request).await?;
        self.inner.parse_upload_image(response)
    }

    /// Read `path` from disk and upload it with `upload_image`.
    pub async fn upload_image_path(&self, path: impl AsRef<Path>) -> Result<Value, ApiError> {
        let file = FileUpload::from_path(path).await?;
        self.upload_image(file).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

/// `ApiClient::test_backend_connection` against `DEFAULT_BASE_URL`.
pub async fn test_backend_connection() -> Result<Value, ApiError> {
    ApiClient::default().test_backend_connection().await
}

/// `ApiClient::upload_image` against `DEFAULT_BASE_URL`.
pub async fn upload_image(file: FileUpload) -> Result<Value, ApiError> {
    ApiClient::default().upload_image(file).await
}
