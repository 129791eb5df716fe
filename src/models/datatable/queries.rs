use sqlx::SqlitePool;

use super::builder::{build_count_query, build_page_query};
use super::decode::decode_rows;
use super::{DtTable, PageRequest, PageResponse, PageResult};
use crate::errors::AppError;

/// Clamp a window bound into SQLite's signed range. Anything past
/// `i64::MAX` behaves the same as `i64::MAX` for LIMIT/OFFSET.
fn to_sql_int(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

async fn run_count(pool: &SqlitePool, sql: &str, params: &[String]) -> Result<i64, AppError> {
    let mut q = sqlx::query_scalar::<_, i64>(sql);
    for p in params {
        q = q.bind(p.as_str());
    }
    Ok(q.fetch_one(pool).await?)
}

/// Unfiltered row count of the whole table.
pub async fn count_all(pool: &SqlitePool, table: &DtTable) -> Result<i64, AppError> {
    let (sql, params) = build_count_query(table, None);
    run_count(pool, &sql, &params).await
}

/// Rows matching the search predicate, ignoring the page window.
pub async fn count_filtered(pool: &SqlitePool, table: &DtTable, term: &str) -> Result<i64, AppError> {
    let (sql, params) = build_count_query(table, Some(term));
    run_count(pool, &sql, &params).await
}

/// Fetch one page of decoded rows plus the filtered count.
/// Without a search term the filtered count is the table total.
pub async fn fetch_page(
    pool: &SqlitePool,
    table: &DtTable,
    req: &PageRequest,
) -> Result<PageResult, AppError> {
    let search = req.search_term();
    let (sql, params) = build_page_query(table, search, &req.sort);
    log::debug!("datatable page query on '{}': {sql} {params:?}", table.name);

    let mut q = sqlx::query(&sql);
    for p in &params {
        q = q.bind(p.as_str());
    }
    let rows = q
        .bind(to_sql_int(req.length))
        .bind(to_sql_int(req.start))
        .fetch_all(pool)
        .await?;
    let rows = decode_rows(&rows, table.columns)?;

    let filtered = match search {
        Some(term) => count_filtered(pool, table, term).await?,
        None => count_all(pool, table).await?,
    };

    Ok(PageResult { rows, filtered })
}

/// Everything the grid needs for one draw.
pub async fn find_page(
    pool: &SqlitePool,
    table: &DtTable,
    req: &PageRequest,
) -> Result<PageResponse, AppError> {
    if req.is_first_draw() {
        log::debug!("first draw for '{}'", table.name);
    }

    let page = fetch_page(pool, table, req).await?;
    let records_total = if req.search_term().is_some() {
        count_all(pool, table).await?
    } else {
        page.filtered
    };

    Ok(PageResponse {
        draw: req.draw.clone(),
        records_total,
        records_filtered: page.filtered,
        data: page.rows,
    })
}
