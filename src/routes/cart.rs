use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};

use crate::{
    dto::cart::{CartList, DiscountRequest, TotalQuery},
    error::{AppError, AppResult},
    models::Cart,
    response::{ApiResponse, Meta},
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(search_carts))
        .route("/{id}", get(get_cart))
        .route("/by-user/{user_id}", get(get_cart_by_user))
        .route("/{id}/discount", post(apply_discount))
}

#[utoipa::path(
    get,
    path = "/api/carts",
    params(
        ("total" = String, Query, description = "Minimum cart total, inclusive")
    ),
    responses(
        (status = 200, description = "Carts with total >= threshold, ascending by total", body = ApiResponse<CartList>),
        (status = 400, description = "Missing or malformed total"),
    ),
    tag = "Carts"
)]
pub async fn search_carts(
    State(state): State<AppState>,
    Query(query): Query<TotalQuery>,
) -> AppResult<Json<ApiResponse<CartList>>> {
    let items =
        cart_service::find_all_cart_total_greater_than(state.carts.as_ref(), query.total).await?;
    let meta = Meta::count(items.len());
    Ok(Json(ApiResponse::success("Carts", CartList { items }, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/api/carts/{id}",
    params(
        ("id" = String, Path, description = "Cart ID")
    ),
    responses(
        (status = 200, description = "Get cart", body = ApiResponse<Cart>),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Carts"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let cart = cart_service::find_by_id(state.carts.as_ref(), &id).await?;
    Ok(Json(ApiResponse::success("Cart", cart, None)))
}

#[utoipa::path(
    get,
    path = "/api/carts/by-user/{user_id}",
    params(
        ("user_id" = String, Path, description = "Owner of the cart")
    ),
    responses(
        (status = 200, description = "First cart owned by the user", body = ApiResponse<Cart>),
        (status = 404, description = "User has no cart"),
    ),
    tag = "Carts"
)]
pub async fn get_cart_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let cart = cart_service::find_one_by_user_id(state.carts.as_ref(), &user_id).await?;
    Ok(Json(ApiResponse::success("Cart", cart, None)))
}

#[utoipa::path(
    post,
    path = "/api/carts/{id}/discount",
    params(
        ("id" = String, Path, description = "Cart ID")
    ),
    request_body = DiscountRequest,
    responses(
        (status = 200, description = "Discount applied, rounded to cents and subtracted from the current total", body = ApiResponse<Cart>),
        (status = 400, description = "Resulting total is out of range"),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Carts"
)]
pub async fn apply_discount(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<DiscountRequest>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let cart = cart_service::apply_discount(state.carts.as_ref(), &id, payload.discount)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success("Discount applied", cart, None)))
}
