//! Handler response types.

use crate::views::ViewRenderer;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use roster_core::RosterError;
use tracing::{error, warn};

/// Application error type for Axum, rendered as an HTML error page.
#[derive(Debug)]
pub struct AppError(pub RosterError);

impl From<RosterError> for AppError {
    fn from(err: RosterError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(code = self.0.error_code(), "Request failed: {}", self.0);
        } else {
            warn!(code = self.0.error_code(), "Request rejected: {}", self.0);
        }

        error_page(status, &self.0.to_string())
    }
}

/// Renders the error view. Server-side failures hide `message`.
pub fn error_page(status: StatusCode, message: &str) -> Response {
    let message = if status.is_server_error() {
        "An unexpected error occurred."
    } else {
        message
    };

    page(status, ViewRenderer::default().error(status.as_u16(), message))
}

/// Result type for Axum handlers.
pub type WebResult<T = Response> = Result<T, AppError>;

/// Builds an HTML response with the given status.
pub fn page(status: StatusCode, html: String) -> Response {
    (status, Html(html)).into_response()
}

/// Builds a 200 HTML response.
pub fn ok(html: String) -> Response {
    page(StatusCode::OK, html)
}
