// src/models/datatable/decode.rs

use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row};

use super::{DtColumn, DtRow};
use crate::errors::AppError;

/// Text a SQL NULL is rendered as.
pub const NULL_TEXT: &str = "NULL";

/// Convert one result row into display-name -> value.
/// Result columns with no mapping are skipped; a column mapped under
/// several display names appears under each of them.
pub fn decode_row(row: &SqliteRow, columns: &[DtColumn]) -> Result<DtRow, AppError> {
    let mut out = DtRow::new();
    for (i, col) in row.columns().iter().enumerate() {
        let mut mapped = columns.iter().filter(|c| c.db_name == col.name()).peekable();
        if mapped.peek().is_none() {
            continue;
        }
        let value: Option<String> = row
            .try_get(i)
            .map_err(|e| AppError::Decode(format!("column '{}': {e}", col.name())))?;
        let value = value.unwrap_or_else(|| NULL_TEXT.to_string());
        for dt in mapped {
            out.insert(dt.dt_name.to_string(), value.clone());
        }
    }
    Ok(out)
}

/// Decode every row in result order.
pub fn decode_rows(rows: &[SqliteRow], columns: &[DtColumn]) -> Result<Vec<DtRow>, AppError> {
    rows.iter().map(|row| decode_row(row, columns)).collect()
}
