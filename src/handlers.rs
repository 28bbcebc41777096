use crate::aggregator::{SaveReport, save_waste_items};
use crate::bucket::BucketKey;
use crate::catalog::Catalog;
use crate::closing::{MoveReport, load_buckets, move_selected};
use crate::errors::AppError;
use crate::history::list_history;
use crate::models::{
    BucketResponse, CategoryRequest, ClosingResponse, DigitRequest, HistoryEntry, MoveRequest,
    ProductRequest, SessionResponse, ToggleRequest, WASTED_SUFFIX,
};
use crate::state::{AppState, Session};
use crate::ui::{render_closing, render_entry};
use axum::{Json, extract::State, response::Html};
use chrono::Local;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub bucket: BucketKey,
    pub report: SaveReport,
}

#[derive(Debug, Serialize)]
pub struct MoveResponse {
    pub report: MoveReport,
    pub closing: ClosingResponse,
}

pub async fn index() -> Html<String> {
    Html(render_entry(&current_bucket()))
}

pub async fn closing_page() -> Html<String> {
    Html(render_closing())
}

pub async fn get_catalog(State(state): State<AppState>) -> Json<Catalog> {
    Json(state.catalog.as_ref().clone())
}

pub async fn get_current_bucket() -> Json<BucketResponse> {
    Json(BucketResponse {
        bucket: current_bucket(),
    })
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.session.lock().await;
    Json(to_session_response(&session))
}

pub async fn add_digit(
    State(state): State<AppState>,
    Json(payload): Json<DigitRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.editor.add_digit(payload.digit)?;
    Ok(Json(to_session_response(&session)))
}

pub async fn select_category(
    State(state): State<AppState>,
    Json(payload): Json<CategoryRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.editor.select_category(payload.index)?;
    Ok(Json(to_session_response(&session)))
}

pub async fn select_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let product = payload.product.trim();
    if product.is_empty() {
        return Err(AppError::bad_request("product must not be empty"));
    }
    let mut session = state.session.lock().await;
    session.editor.select_product(product)?;
    Ok(Json(to_session_response(&session)))
}

pub async fn clear_amount(State(state): State<AppState>) -> Json<SessionResponse> {
    let mut session = state.session.lock().await;
    session.editor.clear();
    Json(to_session_response(&session))
}

pub async fn reset_list(State(state): State<AppState>) -> Json<SessionResponse> {
    let mut session = state.session.lock().await;
    session.editor.reset();
    Json(to_session_response(&session))
}

/// Commits the list to the current bucket. The list is emptied up front,
/// so the caller sees a cleared list whatever the per-item outcome was.
pub async fn save_session(State(state): State<AppState>) -> Result<Json<SaveResponse>, AppError> {
    let entries = state.session.lock().await.editor.take();
    if entries.is_empty() {
        return Err(AppError::bad_request("nothing to save"));
    }

    let now = Local::now();
    let bucket = BucketKey::at(now.naive_local());
    let report = save_waste_items(state.store.as_ref(), &bucket, &entries, now.timestamp_millis()).await;
    if report.failed.is_empty() {
        info!(%bucket, items = report.saved.len(), "waste list saved");
    } else {
        warn!(%bucket, failed = report.failed.len(), "waste list partially saved");
    }

    Ok(Json(SaveResponse { bucket, report }))
}

pub async fn get_closing(State(state): State<AppState>) -> Json<ClosingResponse> {
    Json(closing_snapshot(&state).await)
}

pub async fn toggle_item(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ClosingResponse>, AppError> {
    if payload.item.trim().is_empty() {
        return Err(AppError::bad_request("item must not be empty"));
    }
    if payload.item.ends_with(WASTED_SUFFIX) {
        return Err(AppError::bad_request("wasted lines cannot be selected"));
    }
    state.session.lock().await.selection.toggle(&payload.item);
    Ok(Json(closing_snapshot(&state).await))
}

pub async fn move_items(
    State(state): State<AppState>,
    Json(payload): Json<MoveRequest>,
) -> Json<MoveResponse> {
    let mut selection = std::mem::take(&mut state.session.lock().await.selection);
    let report = move_selected(state.store.as_ref(), &payload.bucket, &mut selection).await;
    info!(
        bucket = %payload.bucket,
        moved = report.moved.len(),
        missing = report.missing.len(),
        failed = report.failed.len(),
        "closing batch finished"
    );

    Json(MoveResponse {
        report,
        closing: closing_snapshot(&state).await,
    })
}

pub async fn get_history(State(state): State<AppState>) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let entries = list_history(state.store.as_ref()).await?;
    Ok(Json(entries))
}

async fn closing_snapshot(state: &AppState) -> ClosingResponse {
    let buckets = load_buckets(state.store.as_ref(), Local::now().date_naive()).await;
    let selected = state.session.lock().await.selection.selected();
    ClosingResponse { buckets, selected }
}

fn to_session_response(session: &Session) -> SessionResponse {
    SessionResponse {
        pending_amount: session.editor.pending_amount().to_string(),
        category: session.editor.category(),
        entries: session.editor.entries().to_vec(),
    }
}

fn current_bucket() -> BucketKey {
    BucketKey::at(Local::now().naive_local())
}
