use crate::error::{AppError, Operation, OperationExt};
use crate::metrics::{self, LifecycleEvent};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Response;
use axum::routing::{delete, get, patch};
use axum::{Json, middleware};
use portal_common::models::{ApprovedResponse, CreateCertificate, MessageResponse};
use portal_common::store::{CertificateModel, parse_id};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

type ApiResult<T> = std::result::Result<T, AppError>;

pub const WELCOME_MESSAGE: &str = "Welcome to Innovation Excellence Portal API";

pub fn router(state: AppState, body_limit_bytes: usize) -> axum::Router {
    axum::Router::new()
        .route("/", get(welcome))
        .route(
            "/certificates",
            get(list_certificates).post(create_certificate),
        )
        .route("/certificates/{id}/approve", patch(approve_certificate))
        .route("/certificates/{id}", delete(delete_certificate))
        .route("/metrics", get(prometheus_metrics))
        .layer(middleware::from_fn(metrics::metrics_middleware))
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

async fn create_certificate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let body = body.map_err(AppError::from_bytes_rejection)?;
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let payload =
        CreateCertificate::from_body(content_type, &body).map_err(AppError::from_body_error)?;
    let certificate = state
        .store
        .create(payload)
        .await
        .during(Operation::Submit)?;

    metrics::inc_certificate_event(LifecycleEvent::Submitted);
    info!(id = %certificate.id, "certificate submitted");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Certificate submitted for approval")),
    ))
}

async fn list_certificates(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CertificateModel>>> {
    let list = state.store.list().await.during(Operation::Fetch)?;
    Ok(Json(list))
}

async fn approve_certificate(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<ApprovedResponse>> {
    let Path(id) =
        id.map_err(|rejection| AppError::from_path_rejection(Operation::Approve, rejection))?;
    let id = parse_id(&id).during(Operation::Approve)?;
    let certificate = state.store.approve(id).await.during(Operation::Approve)?;

    metrics::inc_certificate_event(LifecycleEvent::Approved);
    info!(id = %certificate.id, "certificate approved");
    Ok(Json(ApprovedResponse {
        message: "Certificate approved successfully".to_string(),
        data: certificate,
    }))
}

async fn delete_certificate(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) =
        id.map_err(|rejection| AppError::from_path_rejection(Operation::Delete, rejection))?;
    let id = parse_id(&id).during(Operation::Delete)?;
    state.store.delete(id).await.during(Operation::Delete)?;

    metrics::inc_certificate_event(LifecycleEvent::Deleted);
    info!(id = %id, "certificate deleted");
    Ok(Json(MessageResponse::new("Certificate deleted successfully")))
}

async fn prometheus_metrics() -> Response {
    metrics::render_metrics()
}
