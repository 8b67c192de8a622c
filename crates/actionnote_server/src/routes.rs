//! API routes.

use crate::error::ApiError;
use crate::schemas::{
    ActionItemListParams, ActionItemListResponse, ExtractActionItemsRequest,
    ExtractActionItemsResponse, HealthResponse, MarkActionItemDoneRequest,
    MarkActionItemDoneResponse, NoteCreateRequest, NoteListResponse,
};
use crate::server::SharedState;
use actionnote_core::{
    normalize_text_input, persist_extraction, run_extraction, ActionItemService, ExtractionMethod,
    Note, NoteService, SqliteActionItemRepository, SqliteNoteRepository,
};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::info;

// ============================================================================
// System Routes
// ============================================================================

pub fn system_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
}

async fn index(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    let html_path = state.settings.frontend_dir.join("index.html");
    match tokio::fs::read_to_string(&html_path).await {
        Ok(html) => Ok(Html(html)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(ApiError::NotFound(
            format!("Frontend file not found: {}", html_path.display()),
        )),
        Err(err) => Err(ApiError::internal(
            format!("failed to read {}: {err}", html_path.display()),
            state.settings.debug,
        )),
    }
}

async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        app: state.settings.app_name.clone(),
        version: state.settings.app_version.clone(),
    })
}

// ============================================================================
// Note Routes
// ============================================================================

pub fn note_routes() -> Router<SharedState> {
    Router::new()
        .route("/notes", post(create_note).get(list_notes))
        .route("/notes/:note_id", get(get_note))
}

async fn create_note(
    State(state): State<SharedState>,
    payload: Result<Json<NoteCreateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let Json(request) = payload?;
    let note = state
        .with_conn(move |conn| {
            NoteService::new(SqliteNoteRepository::try_new(conn)?).create_note(&request.content)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(note)))
}

async fn list_notes(State(state): State<SharedState>) -> Result<Json<NoteListResponse>, ApiError> {
    let listed = state
        .with_conn(|conn| NoteService::new(SqliteNoteRepository::try_new(conn)?).list_notes())
        .await?;
    Ok(Json(NoteListResponse {
        notes: listed.items,
        count: listed.count,
    }))
}

async fn get_note(
    State(state): State<SharedState>,
    note_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Note>, ApiError> {
    let Path(note_id) = note_id?;
    let note = state
        .with_conn(move |conn| {
            NoteService::new(SqliteNoteRepository::try_new(conn)?).get_note(note_id)
        })
        .await?;
    Ok(Json(note))
}

// ============================================================================
// Action Item Routes
// ============================================================================

pub fn action_item_routes() -> Router<SharedState> {
    Router::new()
        .route("/action-items", get(list_action_items))
        .route("/action-items/extract", post(extract))
        .route("/action-items/extract-llm", post(extract_llm))
        .route("/action-items/:action_item_id/done", post(mark_done))
}

async fn extract(
    State(state): State<SharedState>,
    payload: Result<Json<ExtractActionItemsRequest>, JsonRejection>,
) -> Result<Json<ExtractActionItemsResponse>, ApiError> {
    let Json(request) = payload?;
    let method = ExtractionMethod::from_use_llm(request.use_llm);
    extract_with_method(state, request, method).await
}

async fn extract_llm(
    State(state): State<SharedState>,
    payload: Result<Json<ExtractActionItemsRequest>, JsonRejection>,
) -> Result<Json<ExtractActionItemsResponse>, ApiError> {
    let Json(request) = payload?;
    extract_with_method(state, request, ExtractionMethod::Llm).await
}

async fn extract_with_method(
    state: SharedState,
    request: ExtractActionItemsRequest,
    method: ExtractionMethod,
) -> Result<Json<ExtractActionItemsResponse>, ApiError> {
    let text = normalize_text_input("text", &request.text)?;

    let llm = state.llm();
    let source = text.clone();
    let items = tokio::task::spawn_blocking(move || run_extraction(method, &*llm, &source))
        .await
        .map_err(|err| {
            ApiError::internal(
                format!("Extraction failed: {err}"),
                state.settings.debug,
            )
        })?;
    info!(
        "event=extract module=server status=ok method={} item_count={}",
        method.as_str(),
        items.len()
    );

    let save_note = request.save_note;
    let record = state
        .with_conn(move |conn| persist_extraction(conn, &text, save_note, &items, method))
        .await?;

    Ok(Json(ExtractActionItemsResponse {
        note_id: record.note_id,
        items: record.items,
        extraction_method: record.method,
    }))
}

async fn list_action_items(
    State(state): State<SharedState>,
    params: Result<Query<ActionItemListParams>, QueryRejection>,
) -> Result<Json<ActionItemListResponse>, ApiError> {
    let Query(params) = params?;
    let listed = state
        .with_conn(move |conn| {
            ActionItemService::new(SqliteActionItemRepository::try_new(conn)?)
                .list_action_items(params.note_id)
        })
        .await?;
    Ok(Json(ActionItemListResponse {
        items: listed.items,
        count: listed.count,
    }))
}

async fn mark_done(
    State(state): State<SharedState>,
    action_item_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<MarkActionItemDoneRequest>, JsonRejection>,
) -> Result<Json<MarkActionItemDoneResponse>, ApiError> {
    let Path(action_item_id) = action_item_id?;
    let Json(request) = payload?;
    let result = state
        .with_conn(move |conn| {
            ActionItemService::new(SqliteActionItemRepository::try_new(conn)?)
                .mark_done(action_item_id, request.done)
        })
        .await?;
    Ok(Json(MarkActionItemDoneResponse {
        id: result.id,
        done: result.done,
    }))
}
