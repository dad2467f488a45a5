//! Async client for the local image-analysis backend.
//!
//! # Overview
//! Wraps reqwest with a fixed base URL, default JSON headers and a status
//! check, plus a multipart upload helper. Two calls make up the public
//! surface: `test_backend_connection` and `upload_image`, both resolving to
//! the backend's JSON document.
//!
//! # Design
//! - `BackendClient` is stateless and does no I/O: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`.
//! - `transport::execute` runs a request over reqwest; `ApiClient` combines
//!   the two into async methods.
//! - The base URL comes from `ClientConfig` at construction time and
//!   defaults to `http://localhost:3001`.
//! - `upload_image` does not reject non-2xx responses, unlike `fetch_api`.
//!   `BackendClient::parse_upload_image_checked` is available for callers
//!   that want the stricter behaviour.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::BackendClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{FormPart, HttpMethod, HttpRequest, HttpResponse, RequestBody, RequestOptions};
pub use transport::{execute, test_backend_connection, upload_image, ApiClient};
pub use types::FileUpload;
