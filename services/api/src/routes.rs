use crate::infra::AppState;
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde_json::json;
use tracing::info;
use water_compliance::analysis::{analyze, AnalysisOutcome};
use water_compliance::error::{AppError, UploadError};
use water_compliance::table::UsageTable;

const UPLOAD_FIELD: &str = "file";

pub(crate) fn router() -> Router {
    Router::new()
        .route("/", get(root_status))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/analyze", post(analyze_endpoint))
}

pub(crate) async fn root_status() -> Json<serde_json::Value> {
    Json(json!({ "status": "API Running" }))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Accepts a `multipart/form-data` upload whose `file` part is a usage export,
/// either CSV or an Excel workbook.
pub(crate) async fn analyze_endpoint(
    mut multipart: Multipart,
) -> Result<Json<AnalysisOutcome>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("<unnamed>").to_string();
        let contents = field.bytes().await.map_err(multipart_error)?;
        info!(file = %file_name, bytes = contents.len(), "received usage export");

        let table = UsageTable::from_bytes(&contents)?;
        return Ok(Json(analyze(&table)));
    }

    Err(UploadError::MissingFile {
        field: UPLOAD_FIELD,
    }
    .into())
}

fn multipart_error(err: MultipartError) -> AppError {
    AppError::Upload(UploadError::Multipart(Box::new(err)))
}
