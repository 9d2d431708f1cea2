use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::{
    repositories::StoreError,
    response::{ApiResponse, Meta},
    services::cart_service::CartServiceError,
    session::SessionError,
    views,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Store error")]
    Store(#[from] StoreError),

    #[error("Session error")]
    Session(#[from] SessionError),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl From<CartServiceError> for AppError {
    fn from(err: CartServiceError) -> Self {
        match err {
            CartServiceError::NotFound => AppError::NotFound,
            CartServiceError::InvalidDiscount(err) => AppError::BadRequest(err.to_string()),
            CartServiceError::Store(err) => AppError::Store(err),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::Session(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn log(&self) {
        match self {
            AppError::Store(err) => tracing::error!(error = %err, "cart store failure"),
            AppError::Session(err) => tracing::error!(error = %err, "session store failure"),
            AppError::Internal(err) => tracing::error!(error = %err, "internal error"),
            AppError::NotFound | AppError::BadRequest(_) => {}
        }
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();
        let body = ApiResponse {
            message: self.to_string(),
            data: Some(ErrorData {
                error: self.to_string(),
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// [`AppError`] raised by an HTML handler; rendered as the generic error page.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        PageError(err)
    }
}

impl From<CartServiceError> for PageError {
    fn from(err: CartServiceError) -> Self {
        PageError(err.into())
    }
}

impl From<SessionError> for PageError {
    fn from(err: SessionError) -> Self {
        PageError(err.into())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let PageError(err) = self;
        err.log();
        let status = err.status();
        (status, Html(views::error_page(status, &err.to_string()))).into_response()
    }
}

pub type PageResult<T> = Result<T, PageError>;
