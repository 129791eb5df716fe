// src/models/datatable/mod.rs

use serde::Serialize;
use std::collections::BTreeMap;

use crate::errors::AppError;

pub mod builder;
pub mod decode;
pub mod queries;

/// One grid column: the name the client sees and the column it reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DtColumn {
    pub dt_name: &'static str,
    pub db_name: &'static str,
    /// Whether the search box filters on this column.
    pub searchable: bool,
}

impl DtColumn {
    /// A displayed and searched column.
    pub const fn new(dt_name: &'static str, db_name: &'static str) -> Self {
        Self { dt_name, db_name, searchable: true }
    }

    /// A column that is displayed but never matched against the search box.
    pub const fn display_only(dt_name: &'static str, db_name: &'static str) -> Self {
        Self { dt_name, db_name, searchable: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// `LIKE 'term%'`
    #[default]
    Prefix,
    /// `LIKE '%term%'`
    Contains,
}

/// A table exposed to the grid.
/// All names here are SQL identifiers baked in at compile time, never user input.
#[derive(Debug, Clone, PartialEq)]
pub struct DtTable {
    pub name: &'static str,
    pub columns: &'static [DtColumn],
    pub sort_column: DtColumn,
    pub search_mode: SearchMode,
}

impl DtTable {
    /// Column the page is ordered by: the requested grid column if any,
    /// otherwise the table's default sorting column.
    pub fn sort_target(&self, sort: &SortSpec) -> &DtColumn {
        sort.column
            .and_then(|i| self.columns.get(i))
            .unwrap_or(&self.sort_column)
    }

    /// Distinct database columns referenced by the mapping, in declaration order.
    pub fn db_columns(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = vec![];
        for col in self.columns {
            if !out.contains(&col.db_name) {
                out.push(col.db_name);
            }
        }
        out
    }

    /// Columns the search predicate runs over.
    pub fn searchable_columns(&self) -> Vec<DtColumn> {
        self.columns.iter().copied().filter(|c| c.searchable).collect()
    }

    pub fn dt_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.dt_name).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSpec {
    /// Index into `DtTable::columns`; `None` means the default sorting column.
    pub column: Option<usize>,
    pub dir: SortDir,
}

impl SortSpec {
    /// Parse the grid's `order[0][column]` / `order[0][dir]` pair.
    pub fn from_params(
        column: Option<&str>,
        dir: Option<&str>,
        column_count: usize,
    ) -> Result<Self, AppError> {
        let column = match column.map(str::trim).filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => {
                let idx = raw
                    .parse::<usize>()
                    .map_err(|_| AppError::invalid("order[0][column]", "must be a column index"))?;
                if idx >= column_count {
                    return Err(AppError::invalid(
                        "order[0][column]",
                        format!("index {idx} out of range (table has {column_count} columns)"),
                    ));
                }
                Some(idx)
            }
        };
        let dir = if dir.map(str::trim) == Some("desc") { SortDir::Desc } else { SortDir::Asc };
        Ok(SortSpec { column, dir })
    }

    pub fn dir_sql(&self) -> &'static str {
        match self.dir {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

/// Parameters of one grid draw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRequest {
    pub start: u64,
    pub length: u64,
    pub draw: String,
    pub search: Option<String>,
    pub sort: SortSpec,
}

impl PageRequest {
    pub const FIRST_DRAW: &'static str = "1";

    pub fn is_first_draw(&self) -> bool {
        self.draw == Self::FIRST_DRAW
    }

    /// The search term, if the search box holds anything.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}

/// One decoded row: display column name -> value.
/// Ordered so identical queries serialize identically.
pub type DtRow = BTreeMap<String, String>;

/// Rows of one page plus the number of rows the filter matched overall.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageResult {
    pub rows: Vec<DtRow>,
    pub filtered: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub draw: String,
    pub records_total: i64,
    pub records_filtered: i64,
    pub data: Vec<DtRow>,
}
