mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;

use common::{app_with, body_text, cart_worth, send};

async fn json(app: &axum::Router, request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let response = send(app, request).await?;
    let status = response.status();
    let body = serde_json::from_str(&body_text(response).await?)?;
    Ok((status, body))
}

#[tokio::test]
async fn search_returns_carts_at_or_above_total() -> anyhow::Result<()> {
    let (_state, app) =
        app_with(&[cart_worth("a", 3000), cart_worth("b", 1000), cart_worth("c", 2000)]).await?;

    let (status, body) = json(&app, Request::get("/api/carts?total=20").body(Body::empty())?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 2);

    let ids: Vec<_> = body["data"]["items"]
        .as_array()
        .map(|items| items.iter().filter_map(|c| c["id"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(ids, ["c", "a"]);
    Ok(())
}

#[tokio::test]
async fn search_without_total_is_bad_request() -> anyhow::Result<()> {
    let (_state, app) = app_with(&[]).await?;
    let response = send(&app, Request::get("/api/carts").body(Body::empty())?).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn lookup_by_id_and_user() -> anyhow::Result<()> {
    let (_state, app) = app_with(&[cart_worth("a", 3000)]).await?;

    let (status, body) = json(&app, Request::get("/api/carts/a").body(Body::empty())?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], "30.00");
    assert_eq!(body["data"]["total_products"], 1);

    let (status, body) = json(
        &app,
        Request::get("/api/carts/by-user/a@example.com").body(Body::empty())?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], "a");

    let (status, _) = json(&app, Request::get("/api/carts/zzz").body(Body::empty())?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = json(
        &app,
        Request::get("/api/carts/by-user/nobody@example.com").body(Body::empty())?,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn discount_endpoint_compounds_and_404s_unknown_carts() -> anyhow::Result<()> {
    let (state, app) = app_with(&[cart_worth("a", 5000)]).await?;

    let discount = |id: &str, amount: &str| {
        Request::post(format!("/api/carts/{id}/discount"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(format!("{{\"discount\":\"{amount}\"}}")))
    };

    let (status, body) = json(&app, discount("a", "10")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], "40.00");
    assert_eq!(body["data"]["discount"], "10");

    let (_, body) = json(&app, discount("a", "5")?).await?;
    assert_eq!(body["data"]["total"], "35.00");
    assert_eq!(body["data"]["discount"], "5");

    let (status, _) = json(&app, discount("missing", "5")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(state.carts.count().await?, 1);
    Ok(())
}

#[tokio::test]
async fn discount_endpoint_rounds_to_cents_and_rejects_overflow() -> anyhow::Result<()> {
    let (state, app) = app_with(&[cart_worth("a", 5000)]).await?;

    let discount = |amount: &str| {
        Request::post("/api/carts/a/discount")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(format!("{{\"discount\":\"{amount}\"}}")))
    };

    let (status, body) = json(&app, discount("0.005")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["discount"], "0.01");
    assert_eq!(body["data"]["total"], "49.99");

    let (status, body) = json(&app, discount("-79228162514264337593543950335")?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().is_some_and(|m| m.starts_with("Bad Request")));

    let stored = state
        .carts
        .find_by_id("a")
        .await?
        .ok_or_else(|| anyhow::anyhow!("cart a missing"))?;
    assert_eq!(stored.total.to_string(), "49.99");
    Ok(())
}

#[tokio::test]
async fn openapi_docs_are_served() -> anyhow::Result<()> {
    let (_state, app) = app_with(&[]).await?;
    let response = send(&app, Request::get("/docs").body(Body::empty())?).await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}
