#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use cart_discount_demo::{
    config::SessionConfig,
    models::{Cart, Product},
    routes::create_app,
    state::AppState,
};
use rust_decimal::Decimal;
use tower::ServiceExt;

/// A cart holding a single line item worth `cents`.
pub fn cart_worth(id: &str, cents: i64) -> Cart {
    Cart::new(
        id,
        format!("{id}@example.com"),
        format!("session-{id}"),
        vec![Product::new(
            format!("{id}-1"),
            "Aragorn",
            "Rivendell",
            "https://example.com/a.png",
            Decimal::new(cents, 2),
            1,
        )],
    )
}

pub async fn app_with(carts: &[Cart]) -> anyhow::Result<(AppState, Router)> {
    let state = AppState::in_memory(SessionConfig::default());
    for cart in carts {
        state.carts.save(cart).await?;
    }
    let app = create_app(state.clone());
    Ok((state, app))
}

pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub async fn send(app: &Router, request: Request<Body>) -> anyhow::Result<Response<Body>> {
    Ok(app.clone().oneshot(request).await?)
}

pub async fn body_text(response: Response<Body>) -> anyhow::Result<String> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}
