use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Form(String),
    InvalidParam { field: &'static str, reason: String },
    Db(sqlx::Error),
    Decode(String),
    Template(askama::Error),
}

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl AppError {
    /// Short machine-readable error kind, stable across releases.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Form(_) => "form",
            AppError::InvalidParam { .. } => "invalid_param",
            AppError::Db(_) => "database",
            AppError::Decode(_) => "decode",
            AppError::Template(_) => "template",
        }
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        AppError::InvalidParam { field, reason: reason.into() }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Form(e) => write!(f, "Could not parse form: {e}"),
            AppError::InvalidParam { field, reason } => write!(f, "Invalid '{field}': {reason}"),
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Decode(e) => write!(f, "Decode error: {e}"),
            AppError::Template(e) => write!(f, "Template error: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Form(_) | AppError::InvalidParam { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        // Server-side details stay in the log.
        let message = if status.is_server_error() {
            log::error!("{self}");
            "Internal Server Error".to_string()
        } else {
            log::debug!("Rejected request: {self}");
            self.to_string()
        };
        HttpResponse::build(status).json(ErrorBody { error: self.kind(), message })
    }
}

/// Render an Askama template into a 200 HTML response.
pub fn render(tmpl: impl askama::Template) -> Result<HttpResponse, AppError> {
    let html = tmpl.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}
