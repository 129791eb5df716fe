use actix_web::HttpResponse;
use askama::Template;

use crate::errors::{AppError, render};
use crate::models::room;
use crate::templates_structs::{ErrorTemplate, IndexTemplate};

pub const PAGE_TITLE: &str = "pagination";

/// GET /
pub async fn index() -> HttpResponse {
    let tmpl = IndexTemplate {
        title: PAGE_TITLE.to_string(),
        source: super::POPULATE_PATH.to_string(),
        columns: room::ROOMS.dt_names(),
    };
    render(tmpl).unwrap_or_else(|e| error_page(&e))
}

/// Render the error page for a failed page render. Falls back to plain text
/// when the error template itself fails.
pub fn error_page(err: &AppError) -> HttpResponse {
    log::error!("{err}");
    let tmpl = ErrorTemplate {
        title: "error".to_string(),
        message: "The page could not be rendered.".to_string(),
    };
    match tmpl.render() {
        Ok(html) => HttpResponse::InternalServerError()
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            log::error!("Error page render failed: {e}");
            HttpResponse::InternalServerError().body("Internal Server Error")
        }
    }
}

/// Fallback for unknown routes.
pub async fn not_found() -> HttpResponse {
    let html = include_str!("../../templates/errors/404.html");
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
