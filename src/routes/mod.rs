use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    middleware,
    routing::get,
};

use crate::{
    middleware::session::session_cookie,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub mod cart;
pub mod doc;
pub mod health;
pub mod web;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new().nest("/carts", cart::router())
}

/// Every route of the application with state bound. Transport layers
/// (tracing, request ids, limits) are added by the binary.
pub fn create_app(state: AppState) -> Router {
    let pages = web::router().layer(middleware::from_fn_with_state(
        state.clone(),
        session_cookie,
    ));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(pages)
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
