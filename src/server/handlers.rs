use super::{
    store::SessionStore,
    types::{
        CreateSessionResponse, ErrorResponse, GenerateRequest, HealthResponse, KeywordRequest,
        SelectSuggestionRequest, SessionSnapshot,
    },
};
use crate::{
    Error,
    stylist::{GenerationState, ImageUpload},
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

pub const FILE_NAME_HEADER: &str = "x-file-name";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SessionStore>,
}

pub type HandlerResult<T> = Result<T, (StatusCode, Json<ErrorResponse>)>;

fn error_response(e: Error) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &e {
        Error::SessionNotFound { .. } => StatusCode::NOT_FOUND,
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!("Request failed: {}", e);
    }
    (
        status,
        Json(ErrorResponse {
            error: e.user_message(),
        }),
    )
}

fn snapshot(session_id: Uuid, state: &GenerationState) -> Json<SessionSnapshot> {
    Json(SessionSnapshot::new(session_id, state))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let (session_id, _) = state.store.create().await;
    (StatusCode::CREATED, Json(CreateSessionResponse { session_id }))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> HandlerResult<Json<SessionSnapshot>> {
    let stylist = state.store.get(session_id).await.map_err(error_response)?;
    Ok(snapshot(session_id, &stylist.snapshot().await))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> HandlerResult<StatusCode> {
    state
        .store
        .remove(session_id)
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn upload_image(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> HandlerResult<Json<SessionSnapshot>> {
    let stylist = state.store.get(session_id).await.map_err(error_response)?;

    let media_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let mut upload = ImageUpload::new(body.to_vec(), media_type).map_err(error_response)?;
    if let Some(name) = headers.get(FILE_NAME_HEADER).and_then(|v| v.to_str().ok()) {
        upload = upload.with_file_name(name);
    }

    Ok(snapshot(session_id, &stylist.set_image(upload).await))
}

/// Serves the original upload back for preview.
pub async fn get_image(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> HandlerResult<Response> {
    let stylist = state.store.get(session_id).await.map_err(error_response)?;
    match stylist.snapshot().await.uploaded_image {
        Some(image) => {
            Ok(([(header::CONTENT_TYPE, image.media_type)], image.bytes).into_response())
        }
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No image uploaded".to_string(),
            }),
        )),
    }
}

pub async fn set_keyword(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<KeywordRequest>,
) -> HandlerResult<Json<SessionSnapshot>> {
    let stylist = state.store.get(session_id).await.map_err(error_response)?;
    Ok(snapshot(session_id, &stylist.set_keyword(&request.keyword).await))
}

pub async fn generate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<GenerateRequest>,
) -> HandlerResult<Json<SessionSnapshot>> {
    let stylist = state.store.get(session_id).await.map_err(error_response)?;
    let keyword = match request.keyword {
        Some(keyword) => keyword,
        None => stylist.snapshot().await.keyword,
    };
    info!("Generate requested for session {}", session_id);

    // Detached so a dropped connection cannot leave the session in flight.
    let settled = tokio::spawn(async move { stylist.generate(&keyword).await })
        .await
        .map_err(|e| error_response(Error::internal(e.to_string())))?;
    Ok(snapshot(session_id, &settled))
}

pub async fn select_suggestion(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SelectSuggestionRequest>,
) -> HandlerResult<Json<SessionSnapshot>> {
    let stylist = state.store.get(session_id).await.map_err(error_response)?;
    info!(
        "Suggestion '{}' selected for session {}",
        request.suggestion, session_id
    );

    let settled = tokio::spawn(async move { stylist.select_suggestion(&request.suggestion).await })
        .await
        .map_err(|e| error_response(Error::internal(e.to_string())))?;
    Ok(snapshot(session_id, &settled))
}

pub async fn reset(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> HandlerResult<Json<SessionSnapshot>> {
    let stylist = state.store.get(session_id).await.map_err(error_response)?;
    Ok(snapshot(session_id, &stylist.reset().await))
}

pub async fn dismiss_error(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> HandlerResult<Json<SessionSnapshot>> {
    let stylist = state.store.get(session_id).await.map_err(error_response)?;
    Ok(snapshot(session_id, &stylist.dismiss_error().await))
}
