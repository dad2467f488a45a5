use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub const IMAGE_FIELD: &str = "image";

const ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:3001",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:3001",
];

const VIDEO_EXTENSIONS: [&str; 3] = ["mp4", "avi", "mov"];

/// Upload validation settings.
#[derive(Clone, Debug)]
pub struct UploadLimits {
    pub max_upload_size: usize,
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_upload_size: 10 * 1024 * 1024,
            allowed_extensions: ["jpg", "jpeg", "png", "mp4", "avi", "mov"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub status: String,
    pub message: String,
    pub version: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessingResult {
    pub kind: String,
    pub size: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadReceipt {
    pub filename: String,
    pub status: String,
    pub result: ProcessingResult,
    pub message: String,
}

#[derive(Clone, Debug)]
pub struct StoredUpload {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

pub type Store = Arc<RwLock<HashMap<String, StoredUpload>>>;

#[derive(Clone)]
struct AppState {
    limits: Arc<UploadLimits>,
    store: Store,
}

pub fn app() -> Router {
    app_with_limits(UploadLimits::default())
}

pub fn app_with_limits(limits: UploadLimits) -> Router {
    let state = AppState {
        limits: Arc::new(limits),
        store: Arc::new(RwLock::new(HashMap::new())),
    };
    let origins: Vec<HeaderValue> = ALLOWED_ORIGINS
        .into_iter()
        .map(HeaderValue::from_static)
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/test", get(test_connection))
        .route("/api/upload", post(upload))
        .route("/uploads/{filename}", get(get_upload))
        // Size is enforced by `upload` so oversized files get the JSON 413.
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "detail": message.into() }))).into_response()
}

async fn test_connection() -> Json<ConnectionStatus> {
    Json(ConnectionStatus {
        status: "ok".to_string(),
        message: "Backend connection successful".to_string(),
        version: "1.0.0".to_string(),
    })
}

async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut image = None;
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => return err.into_response(),
        };
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(String::from);
        match field.bytes().await {
            Ok(bytes) => image = Some((filename, content_type, bytes)),
            Err(err) => return err.into_response(),
        }
    }

    let Some((filename, content_type, bytes)) = image else {
        return detail(StatusCode::BAD_REQUEST, format!("missing multipart field '{IMAGE_FIELD}'"));
    };

    let limits = &state.limits;
    if bytes.len() > limits.max_upload_size {
        return detail(StatusCode::PAYLOAD_TOO_LARGE, "File too large");
    }

    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if !limits.allowed_extensions.contains(&ext) {
        return detail(
            StatusCode::BAD_REQUEST,
            format!(
                "File type not allowed. Allowed types: {}",
                limits.allowed_extensions.join(", ")
            ),
        );
    }

    let kind = if VIDEO_EXTENSIONS.contains(&ext.as_str()) { "video" } else { "image" };
    let size = bytes.len();
    state.store.write().await.insert(
        filename.clone(),
        StoredUpload {
            content_type,
            bytes: bytes.to_vec(),
        },
    );
    tracing::debug!(%filename, size, kind, "stored upload");

    Json(UploadReceipt {
        filename,
        status: "success".to_string(),
        result: ProcessingResult {
            kind: kind.to_string(),
            size,
        },
        message: "File processed successfully".to_string(),
    })
    .into_response()
}

async fn get_upload(State(state): State<AppState>, Path(filename): Path<String>) -> Response {
    let store = state.store.read().await;
    let Some(upload) = store.get(&filename) else {
        return detail(StatusCode::NOT_FOUND, "Not Found");
    };
    let content_type = upload
        .content_type
        .clone()
        .unwrap_or_else(|| "application/octet-stream".to_string());
    ([(header::CONTENT_TYPE, content_type)], upload.bytes.clone()).into_response()
}
