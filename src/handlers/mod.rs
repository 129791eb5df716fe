pub mod datatable_handlers;
pub mod page_handlers;

use actix_web::web;

use crate::errors::AppError;

pub const POPULATE_PATH: &str = "/populateDataTable";

/// Register the application routes.
/// Form bodies that cannot be parsed get the same JSON error contract as
/// every other failed request.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::FormConfig::default()
            .error_handler(|err, _req| AppError::Form(err.to_string()).into()),
    )
    .route("/", web::get().to(page_handlers::index))
    .route(POPULATE_PATH, web::post().to(datatable_handlers::populate));
}
