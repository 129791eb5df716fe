// src/models/datatable/builder.rs

use super::{DtColumn, DtTable, SearchMode, SortSpec};

/// Escape LIKE metacharacters so the term matches literally under `ESCAPE '\'`.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// LIKE pattern for a search-box term.
pub fn search_pattern(term: &str, mode: SearchMode) -> String {
    let escaped = escape_like(term);
    match mode {
        SearchMode::Prefix => format!("{escaped}%"),
        SearchMode::Contains => format!("%{escaped}%"),
    }
}

/// Build the OR-combined search predicate over the searchable columns.
/// Returns (sql_fragment, params_vec); every param is the same pattern.
pub fn build_where_clause(columns: &[DtColumn], pattern: &str) -> (String, Vec<String>) {
    let mut seen: Vec<&str> = vec![];
    let mut parts: Vec<String> = vec![];
    for col in columns.iter().filter(|c| c.searchable) {
        if seen.contains(&col.db_name) {
            continue;
        }
        seen.push(col.db_name);
        parts.push(format!("{} LIKE ? ESCAPE '\\'", col.db_name));
    }
    let params = vec![pattern.to_string(); parts.len()];
    (parts.join(" OR "), params)
}

/// A table with no searchable column ignores the search box.
fn where_for(table: &DtTable, search: Option<&str>) -> (String, Vec<String>) {
    match search.filter(|s| !s.is_empty()) {
        Some(term) => {
            let searchable = table.searchable_columns();
            if searchable.is_empty() {
                return (String::new(), vec![]);
            }
            let pattern = search_pattern(term, table.search_mode);
            let (sql, params) = build_where_clause(&searchable, &pattern);
            (format!(" WHERE {sql}"), params)
        }
        None => (String::new(), vec![]),
    }
}

/// Page query. The caller binds `params` in order, then LIMIT, then OFFSET.
pub fn build_page_query(
    table: &DtTable,
    search: Option<&str>,
    sort: &SortSpec,
) -> (String, Vec<String>) {
    let select = table
        .db_columns()
        .iter()
        .map(|c| format!("CAST({c} AS TEXT) AS {c}"))
        .collect::<Vec<_>>()
        .join(", ");
    let (where_sql, params) = where_for(table, search);
    let order_col = table.sort_target(sort).db_name;
    let sql = format!(
        "SELECT {select} FROM {}{where_sql} ORDER BY {order_col} {} LIMIT ? OFFSET ?",
        table.name,
        sort.dir_sql(),
    );
    (sql, params)
}

/// Row count under the same predicate as `build_page_query`.
pub fn build_count_query(table: &DtTable, search: Option<&str>) -> (String, Vec<String>) {
    let (where_sql, params) = where_for(table, search);
    (format!("SELECT COUNT(*) FROM {}{where_sql}", table.name), params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::datatable::SortDir;

    const COLS: &[DtColumn] = &[DtColumn::new("name", "name"), DtColumn::new("topic", "topic")];

    fn table(mode: SearchMode) -> DtTable {
        DtTable {
            name: "rooms",
            columns: COLS,
            sort_column: DtColumn::new("name", "name"),
            search_mode: mode,
        }
    }

    #[test]
    fn prefix_and_contains_patterns() {
        assert_eq!(search_pattern("Ga", SearchMode::Prefix), "Ga%");
        assert_eq!(search_pattern("Ga", SearchMode::Contains), "%Ga%");
    }

    #[test]
    fn metacharacters_are_escaped() {
        assert_eq!(search_pattern("50%_off\\", SearchMode::Prefix), "50\\%\\_off\\\\%");
    }

    #[test]
    fn where_clause_ors_every_column() {
        let (sql, params) = build_where_clause(COLS, "Ga%");
        assert_eq!(sql, "name LIKE ? ESCAPE '\\' OR topic LIKE ? ESCAPE '\\'");
        assert_eq!(params, vec!["Ga%", "Ga%"]);
    }

    #[test]
    fn display_only_columns_are_selected_but_not_searched() {
        const MIXED: &[DtColumn] = &[
            DtColumn::new("name", "name"),
            DtColumn::display_only("topic", "topic"),
        ];
        let t = DtTable { columns: MIXED, ..table(SearchMode::Prefix) };
        let (sql, params) = build_page_query(&t, Some("B"), &SortSpec::default());
        assert_eq!(
            sql,
            "SELECT CAST(name AS TEXT) AS name, CAST(topic AS TEXT) AS topic FROM rooms \
             WHERE name LIKE ? ESCAPE '\\' ORDER BY name ASC LIMIT ? OFFSET ?"
        );
        assert_eq!(params, vec!["B%"]);
    }

    #[test]
    fn no_searchable_column_ignores_search() {
        const SHOWN: &[DtColumn] = &[DtColumn::display_only("topic", "topic")];
        let t = DtTable { columns: SHOWN, ..table(SearchMode::Prefix) };
        let (sql, params) = build_count_query(&t, Some("B"));
        assert_eq!(sql, "SELECT COUNT(*) FROM rooms");
        assert!(params.is_empty());
    }

    #[test]
    fn unfiltered_page_query() {
        let (sql, params) = build_page_query(&table(SearchMode::Prefix), None, &SortSpec::default());
        assert_eq!(
            sql,
            "SELECT CAST(name AS TEXT) AS name, CAST(topic AS TEXT) AS topic FROM rooms \
             ORDER BY name ASC LIMIT ? OFFSET ?"
        );
        assert!(params.is_empty());
    }

    #[test]
    fn empty_search_is_unfiltered() {
        let (sql, params) = build_count_query(&table(SearchMode::Prefix), Some(""));
        assert_eq!(sql, "SELECT COUNT(*) FROM rooms");
        assert!(params.is_empty());
    }

    #[test]
    fn filtered_page_query_sorted_desc_by_second_column() {
        let sort = SortSpec { column: Some(1), dir: SortDir::Desc };
        let (sql, params) = build_page_query(&table(SearchMode::Contains), Some("ar"), &sort);
        assert_eq!(
            sql,
            "SELECT CAST(name AS TEXT) AS name, CAST(topic AS TEXT) AS topic FROM rooms \
             WHERE name LIKE ? ESCAPE '\\' OR topic LIKE ? ESCAPE '\\' \
             ORDER BY topic DESC LIMIT ? OFFSET ?"
        );
        assert_eq!(params, vec!["%ar%", "%ar%"]);
    }

    #[test]
    fn count_query_shares_predicate() {
        let t = table(SearchMode::Prefix);
        let (count_sql, count_params) = build_count_query(&t, Some("Ga"));
        let (_, page_params) = build_page_query(&t, Some("Ga"), &SortSpec::default());
        assert_eq!(
            count_sql,
            "SELECT COUNT(*) FROM rooms WHERE name LIKE ? ESCAPE '\\' OR topic LIKE ? ESCAPE '\\'"
        );
        assert_eq!(count_params, page_params);
    }
}
