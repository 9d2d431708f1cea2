//! Browser-facing pages: session echo, cart search and discount.

use axum::{
    Form, Router,
    extract::{State, rejection::FormRejection},
    response::{Html, Redirect},
    routing::{get, post},
};

use crate::{
    dto::{
        cart::{ApplyDiscountForm, SearchCartForm},
        session::SetValueParams,
    },
    error::PageResult,
    middleware::session::SessionId,
    services::cart_service,
    state::AppState,
    views,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/home", get(home))
        .route("/setValue", get(set_value).post(set_value))
        .route("/searchCart", post(search_cart))
        .route("/applyDiscount", post(apply_discount))
}

async fn index() -> Redirect {
    Redirect::to("/home")
}

pub async fn home(State(state): State<AppState>, session: SessionId) -> PageResult<Html<String>> {
    let names = state.sessions.attribute_names(session.as_str()).await?;
    Ok(Html(views::home_page(&names)))
}

/// Stores `key = value` in the session when both are present, then shows the home page.
/// Missing, empty or unparseable parameters are ignored.
pub async fn set_value(
    State(state): State<AppState>,
    session: SessionId,
    params: Result<Form<SetValueParams>, FormRejection>,
) -> PageResult<Html<String>> {
    let params = params.map(|Form(p)| p).unwrap_or_default();
    if let Some((key, value)) = params.attribute() {
        state.sessions.set(session.as_str(), key, value).await?;
        tracing::debug!(session_id = %session.as_str(), key, "session attribute set");
    }
    home(State(state), session).await
}

pub async fn search_cart(
    State(state): State<AppState>,
    Form(form): Form<SearchCartForm>,
) -> PageResult<Html<String>> {
    let carts = cart_service::find_all_cart_total_greater_than(state.carts.as_ref(), form.total)
        .await?;
    Ok(Html(views::cart_page(form.total, &carts)))
}

/// Applies the discount, then renders the same listing `/searchCart` would for `total`.
pub async fn apply_discount(
    State(state): State<AppState>,
    Form(form): Form<ApplyDiscountForm>,
) -> PageResult<Html<String>> {
    cart_service::apply_discount(state.carts.as_ref(), &form.cart_id, form.discount).await?;
    let carts = cart_service::find_all_cart_total_greater_than(state.carts.as_ref(), form.total)
        .await?;
    Ok(Html(views::cart_page(form.total, &carts)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{http::StatusCode, response::IntoResponse};

    use super::*;
    use crate::{
        config::SessionConfig,
        session::{MockSessionStore, SessionError},
    };

    #[tokio::test]
    async fn session_store_failure_renders_error_page() {
        let mut sessions = MockSessionStore::new();
        sessions
            .expect_attribute_names()
            .returning(|_| Err(SessionError::Database(sea_orm::DbErr::Custom("down".into()))));

        let mut state = AppState::in_memory(SessionConfig::default());
        state.sessions = Arc::new(sessions);

        let response = home(State(state), SessionId("s".into()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn set_value_with_missing_value_does_not_write() {
        let mut sessions = MockSessionStore::new();
        sessions.expect_set().never();
        sessions
            .expect_attribute_names()
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let mut state = AppState::in_memory(SessionConfig::default());
        state.sessions = Arc::new(sessions);

        let params = SetValueParams {
            key: Some("k".into()),
            value: None,
        };
        let response = set_value(State(state), SessionId("s".into()), Ok(Form(params)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
