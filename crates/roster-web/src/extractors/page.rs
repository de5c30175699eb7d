//! Extractors whose rejections render the HTML error page.
//!
//! Axum's stock extractors reject with a plain-text body. Each wrapper here
//! extracts through the stock extractor and turns its rejection into a
//! [`PageRejection`], keeping the rejection's status code.

use crate::responses::error_page;
use axum::{
    extract::{
        rejection::{FormRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{
    FormRejection as MultiFormRejection, QueryRejection as MultiQueryRejection,
};
use tracing::warn;

/// Form body (`application/x-www-form-urlencoded`).
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Form), rejection(PageRejection))]
pub struct PageForm<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(PageRejection))]
pub struct PagePath<T>(pub T);

/// Query string.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(PageRejection))]
pub struct PageQuery<T>(pub T);

/// Form body that may repeat keys.
#[derive(Debug, FromRequest)]
#[from_request(via(axum_extra::extract::Form), rejection(PageRejection))]
pub struct PageMultiForm<T>(pub T);

/// Query string that may repeat keys.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum_extra::extract::Query), rejection(PageRejection))]
pub struct PageMultiQuery<T>(pub T);

/// A request the extractors could not make sense of.
#[derive(Debug)]
pub struct PageRejection {
    status: StatusCode,
    message: String,
}

impl PageRejection {
    /// Returns the status the error page is served with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for PageRejection {
    fn into_response(self) -> Response {
        warn!(status = %self.status, "Request rejected: {}", self.message);
        error_page(self.status, &self.message)
    }
}

macro_rules! page_rejection_from {
    ($($rejection:ty),+ $(,)?) => {
        $(
            impl From<$rejection> for PageRejection {
                fn from(rejection: $rejection) -> Self {
                    Self {
                        status: rejection.status(),
                        message: rejection.body_text(),
                    }
                }
            }
        )+
    };
}

page_rejection_from!(FormRejection, PathRejection, QueryRejection);

impl From<MultiFormRejection> for PageRejection {
    fn from(rejection: MultiFormRejection) -> Self {
        match rejection {
            MultiFormRejection::RawFormRejection(inner) => Self {
                status: inner.status(),
                message: inner.body_text(),
            },
            other => Self {
                status: StatusCode::BAD_REQUEST,
                message: format!("Failed to deserialize form: {other}"),
            },
        }
    }
}

impl From<MultiQueryRejection> for PageRejection {
    fn from(rejection: MultiQueryRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: format!("Failed to deserialize query string: {rejection}"),
        }
    }
}
