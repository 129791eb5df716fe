use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::datatable::{queries, DtTable, PageRequest, SortSpec};
use crate::models::room;

/// Fields posted by the grid on each draw. Everything arrives as text;
/// `columns[i][...]` and `search[regex]` are accepted and ignored.
#[derive(Debug, Default, Deserialize)]
pub struct DataTableForm {
    pub start: Option<String>,
    pub length: Option<String>,
    pub draw: Option<String>,
    #[serde(rename = "search[value]")]
    pub search_value: Option<String>,
    #[serde(rename = "order[0][column]")]
    pub order_column: Option<String>,
    #[serde(rename = "order[0][dir]")]
    pub order_dir: Option<String>,
}

fn parse_count(field: &'static str, raw: Option<&str>) -> Result<u64, AppError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::invalid(field, "is required"))?;
    raw.parse::<u64>()
        .map_err(|_| AppError::invalid(field, format!("must be a non-negative integer, got '{raw}'")))
}

impl DataTableForm {
    pub fn into_page_request(self, table: &DtTable) -> Result<PageRequest, AppError> {
        let start = parse_count("start", self.start.as_deref())?;
        let length = parse_count("length", self.length.as_deref())?;
        let sort = SortSpec::from_params(
            self.order_column.as_deref(),
            self.order_dir.as_deref(),
            table.columns.len(),
        )?;
        Ok(PageRequest {
            start,
            length,
            draw: self.draw.unwrap_or_default(),
            search: self.search_value.filter(|s| !s.is_empty()),
            sort,
        })
    }
}

/// Answer one grid draw for `table`.
pub async fn paginate(
    pool: &DbPool,
    table: &DtTable,
    form: DataTableForm,
) -> Result<HttpResponse, AppError> {
    let req = form.into_page_request(table)?;
    let response = queries::find_page(pool, table, &req).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// POST /populateDataTable
pub async fn populate(
    pool: web::Data<DbPool>,
    form: web::Form<DataTableForm>,
) -> Result<HttpResponse, AppError> {
    paginate(&pool, &room::ROOMS, form.into_inner()).await
}
