use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

/// Id of the browser session the request belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Reads the session cookie, issuing a new id (and cookie) when the request has none.
pub async fn session_cookie(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> (CookieJar, Response) {
    let cookie_name = state.session_config.cookie_name.clone();
    let existing = jar
        .get(&cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|id| !id.is_empty());

    let (session_id, jar) = match existing {
        Some(id) => (id, jar),
        None => {
            let id = Uuid::new_v4().to_string();
            tracing::debug!(session_id = %id, "new session issued");
            let cookie = Cookie::build((cookie_name, id.clone()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .build();
            (id, jar.add(cookie))
        }
    };

    request.extensions_mut().insert(SessionId(session_id));
    let response = next.run(request).await;
    (jar, response)
}

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionId>()
            .cloned()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("session middleware not installed")))
    }
}
