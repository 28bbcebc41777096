use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/closing", get(handlers::closing_page))
        .route("/api/catalog", get(handlers::get_catalog))
        .route("/api/bucket/current", get(handlers::get_current_bucket))
        .route("/api/session", get(handlers::get_session))
        .route("/api/session/digit", post(handlers::add_digit))
        .route("/api/session/category", post(handlers::select_category))
        .route("/api/session/product", post(handlers::select_product))
        .route("/api/session/clear", post(handlers::clear_amount))
        .route("/api/session/reset", post(handlers::reset_list))
        .route("/api/session/save", post(handlers::save_session))
        .route("/api/closing", get(handlers::get_closing))
        .route("/api/closing/toggle", post(handlers::toggle_item))
        .route("/api/closing/move", post(handlers::move_items))
        .route("/api/history", get(handlers::get_history))
        .with_state(state)
}
