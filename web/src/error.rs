//! Fallback error display for failed navigations.
//!
//! Users get a generic message plus, for `NotFound` and `MissingParameter`,
//! the name of what was missing. The underlying error chain is only shown
//! when the service runs with `--dev`.

use std::error::Error;

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use todo_core::LoadError;

use crate::templates::ErrorTemplate;

const GENERIC_DETAILS: &str = "Unexpected error occurred";

#[derive(Debug)]
pub struct PageError {
    status: StatusCode,
    title: String,
    details: String,
    reason: String,
    diagnostic: Option<String>,
}

impl PageError {
    pub fn from_load(err: LoadError, dev: bool) -> Self {
        let diagnostic = dev.then(|| error_chain(&err));
        match &err {
            LoadError::NotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                title: "404".to_string(),
                details: "Page not found".to_string(),
                reason: err.to_string(),
                diagnostic,
            },
            LoadError::MissingParameter(_) => Self {
                status: StatusCode::BAD_REQUEST,
                title: "Error".to_string(),
                details: GENERIC_DETAILS.to_string(),
                reason: err.to_string(),
                diagnostic,
            },
            LoadError::Remote(_) => {
                tracing::warn!(error = %error_chain(&err), "remote service failed");
                Self {
                    status: StatusCode::BAD_GATEWAY,
                    title: "Error".to_string(),
                    details: GENERIC_DETAILS.to_string(),
                    reason: String::new(),
                    diagnostic,
                }
            }
        }
    }

    /// Unknown route.
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            title: "404".to_string(),
            details: "Page not found".to_string(),
            reason: String::new(),
            diagnostic: None,
        }
    }

    pub fn render_failed(err: askama::Error, dev: bool) -> Self {
        tracing::error!(error = %err, "template rendering failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            title: "Error".to_string(),
            details: GENERIC_DETAILS.to_string(),
            reason: String::new(),
            diagnostic: dev.then(|| error_chain(&err)),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let page = ErrorTemplate {
            title: self.title,
            details: self.details,
            reason: self.reason,
            diagnostic: self.diagnostic.unwrap_or_default(),
        };
        match page.render() {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "error page rendering failed");
                (self.status, page.details).into_response()
            }
        }
    }
}

/// `err` followed by each of its sources, one per line.
fn error_chain(err: &dyn Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str("\ncaused by: ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
