//! Stateless HTTP request builder and response parser for the backend API.
//!
//! # Design
//! `BackendClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. `ApiClient` in `transport` glues the two together over
//! reqwest; everything here stays free of I/O.

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{merge_headers, FormPart, HttpMethod, HttpRequest, HttpResponse, RequestBody, RequestOptions};
use crate::types::FileUpload;

pub const TEST_ENDPOINT: &str = "/api/test";
pub const UPLOAD_ENDPOINT: &str = "/api/upload";

/// Multipart field name the backend reads the uploaded image from.
pub const IMAGE_FIELD: &str = "image";

/// Synchronous, stateless client for the backend API.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a JSON request to `endpoint`.
    ///
    /// `content-type: application/json` is always sent unless `options`
    /// carries its own `Content-Type`.
    pub fn build_fetch(&self, endpoint: &str, options: &RequestOptions) -> Result<HttpRequest, ApiError> {
        if !endpoint.starts_with('/') {
            return Err(ApiError::InvalidEndpoint(endpoint.to_string()));
        }
        let defaults = vec![("content-type".to_string(), "application/json".to_string())];
        Ok(HttpRequest {
            method: options.method.unwrap_or_default(),
            url: format!("{}{endpoint}", self.base_url),
            headers: merge_headers(defaults, &options.headers),
            body: options.body.clone().map(RequestBody::Json),
        })
    }

    /// Check the status, then parse the body as JSON.
    pub fn parse_fetch(&self, response: HttpResponse) -> Result<Value, ApiError> {
        check_status(&response)?;
        parse_json(&response)
    }

    pub fn build_test_connection(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}{TEST_ENDPOINT}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: None,
        }
    }

    pub fn parse_test_connection(&self, response: HttpResponse) -> Result<Value, ApiError> {
        self.parse_fetch(response)
    }

    /// Build a multipart POST with `file` as the single `image` part.
    ///
    /// No headers are set here; the transport supplies the multipart
    /// `content-type` with its boundary.
    pub fn build_upload_image(&self, file: FileUpload) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{UPLOAD_ENDPOINT}", self.base_url),
            headers: Vec::new(),
            body: Some(RequestBody::Multipart(vec![FormPart {
                name: IMAGE_FIELD.to_string(),
                file,
            }])),
        }
    }

    /// Parse the upload response as JSON whatever its status.
    ///
    /// A 4xx/5xx with a JSON body (e.g. `{"detail":"File too large"}`) is
    /// returned as `Ok`. Use `parse_upload_image_checked` to reject it instead.
    pub fn parse_upload_image(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }

    /// Like `parse_upload_image`, but with the same status check as `parse_fetch`.
    pub fn parse_upload_image_checked(&self, response: HttpResponse) -> Result<Value, ApiError> {
        self.parse_fetch(response)
    }
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Status {
        status: response.status,
        body: response.body.clone(),
    })
}

fn parse_json(response: &HttpResponse) -> Result<Value, ApiError> {
    serde_json::from_str(&response.body).map_err(ApiError::Deserialization)
}
