// Template context structures for Askama templates.

use askama::Template;

/// Host page for the server-side grid.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: String,
    /// Endpoint the grid posts its draws to.
    pub source: String,
    pub columns: Vec<&'static str>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}
