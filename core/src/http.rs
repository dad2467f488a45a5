//! HTTP transport types for the build/execute/parse split.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! `BackendClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network; `transport::execute` is the only
//! place that performs I/O. Tests can therefore check request construction
//! and status handling without a server.
//!
//! All fields use owned types (`String`, `Vec`) so requests can be moved into
//! spawned tasks without lifetime concerns.

use serde::Serialize;

use crate::error::ApiError;
use crate::types::FileUpload;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A named file part of a multipart form body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub file: FileUpload,
}

/// Request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// Raw payload sent as-is; the `content-type` header comes from the
    /// request's header list.
    Json(String),

    /// Multipart form. The transport generates the boundary and sets the
    /// `content-type` header itself.
    Multipart(Vec<FormPart>),
}

/// An HTTP request described as plain data.
///
/// Built by `BackendClient::build_*` methods and executed by
/// `transport::execute`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header value whose name matches `name`, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Per-call options for `BackendClient::build_fetch`.
///
/// Headers listed here win over the client's defaults (matched
/// case-insensitively). An unset `method` means GET.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: Option<HttpMethod>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the request body.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_string(value).map_err(ApiError::Serialization)?;
        Ok(self.body(body))
    }
}

/// Merge `overrides` on top of `defaults`.
///
/// An override replaces the default with the same name (ASCII
/// case-insensitive) in place; any other override is appended in order.
pub fn merge_headers(
    defaults: Vec<(String, String)>,
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    let mut merged = defaults;
    for (name, value) in overrides {
        match merged.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some(slot) => *slot = (name.clone(), value.clone()),
            None => merged.push((name.clone(), value.clone())),
        }
    }
    merged
}
