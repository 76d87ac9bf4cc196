//! Sortable, searchable, paginated record tables.
//!
//! The engine works on borrowed rows and never reorders the caller's slice:
//!
//! ```text
//! records ──filter (search column)──► stable sort ──► page slice ──► TableView
//! ```
//!
//! All table state lives in the query string ([`TableQuery`]), so every
//! header, page link and search form is a plain `GET`.

use serde::{Deserialize, Serialize};

use super::data_table::{CellView, Column};

/// Rows per page when the query does not say.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Largest page size a query may request.
pub const MAX_PAGE_SIZE: usize = 100;

// =============================================================================
// Query Parameters
// =============================================================================

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Table state carried in the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TableQuery {
    /// Search text.
    pub q: Option<String>,
    /// Key of the sort column.
    pub sort: Option<String>,
    /// Sort direction; ascending when absent.
    pub dir: Option<SortDirection>,
    /// 1-based page number.
    pub page: Option<usize>,
    /// Rows per page.
    pub per_page: Option<usize>,
}

impl TableQuery {
    /// Trimmed, non-empty search text.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// Build a link to `base` carrying this state.
    #[must_use]
    pub fn href(&self, base: &str) -> String {
        let mut params = Vec::new();
        if let Some(q) = self.search() {
            params.push(format!("q={}", urlencoding::encode(q)));
        }
        if let Some(sort) = &self.sort {
            params.push(format!("sort={}", urlencoding::encode(sort)));
            params.push(format!("dir={}", self.dir.unwrap_or_default().as_str()));
        }
        if let Some(page) = self.page.filter(|p| *p > 1) {
            params.push(format!("page={page}"));
        }
        if let Some(per_page) = self.per_page {
            params.push(format!("per_page={per_page}"));
        }

        if params.is_empty() {
            base.to_string()
        } else {
            format!("{base}?{}", params.join("&"))
        }
    }

    /// Same state on another page.
    #[must_use]
    pub fn with_page(&self, page: usize) -> Self {
        Self {
            page: Some(page),
            ..self.clone()
        }
    }

    /// State after clicking the header of `key`: ascending first, then
    /// toggling, always back to page 1.
    #[must_use]
    pub fn with_sort_toggled(&self, key: &str) -> Self {
        let dir = match (&self.sort, self.dir) {
            (Some(current), dir) if current == key => dir.unwrap_or_default().toggled(),
            _ => SortDirection::Asc,
        };
        Self {
            sort: Some(key.to_string()),
            dir: Some(dir),
            page: None,
            ..self.clone()
        }
    }
}

// =============================================================================
// Engine
// =============================================================================

/// The rows selected for one page, borrowed from the source slice.
#[derive(Debug)]
pub struct TableWindow<'r, R> {
    /// Rows on the current page, in display order.
    pub rows: Vec<&'r R>,
    /// Number of source records.
    pub total: usize,
    /// Number of records matching the search.
    pub filtered: usize,
    /// Current page, 1-based; 1 when there are no pages.
    pub page: usize,
    /// Number of pages; 0 when nothing matches.
    pub page_count: usize,
    /// Rows per page in effect.
    pub per_page: usize,
    /// Sort column in effect, if the query named a sortable column.
    pub sort: Option<(&'static str, SortDirection)>,
}

/// A record table over rows of type `R`.
pub struct RecordTable<'c, R> {
    columns: &'c [Column<R>],
    search_key: &'c str,
    page_size: usize,
    row_key: Option<fn(&R) -> String>,
}

impl<'c, R> RecordTable<'c, R> {
    /// Table over `columns`, searching the column named `search_key`.
    #[must_use]
    pub const fn new(columns: &'c [Column<R>], search_key: &'c str) -> Self {
        Self {
            columns,
            search_key,
            page_size: DEFAULT_PAGE_SIZE,
            row_key: None,
        }
    }

    /// Default rows per page when the query does not set one.
    #[must_use]
    pub const fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Function giving each row's identifier for action links.
    #[must_use]
    pub const fn row_key(mut self, row_key: fn(&R) -> String) -> Self {
        self.row_key = Some(row_key);
        self
    }

    fn column(&self, key: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Select the rows for the page described by `query`.
    pub fn window<'r>(&self, records: &'r [R], query: &TableQuery) -> TableWindow<'r, R> {
        let mut rows: Vec<&R> = records.iter().collect();

        if let (Some(needle), Some(column)) = (query.search(), self.column(self.search_key)) {
            let needle = needle.to_lowercase();
            rows.retain(|row| {
                (column.value)(row)
                    .plain_text()
                    .to_lowercase()
                    .contains(&needle)
            });
        }

        let sort = query
            .sort
            .as_deref()
            .and_then(|key| self.column(key))
            .filter(|column| column.sortable)
            .map(|column| (column, query.dir.unwrap_or_default()));
        if let Some((column, dir)) = sort {
            // `sort_by` is stable, so equal keys keep their source order.
            rows.sort_by(|a, b| {
                let ordering = (column.value)(a).cmp(&(column.value)(b));
                match dir {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        let per_page = query
            .per_page
            .unwrap_or(self.page_size)
            .clamp(1, MAX_PAGE_SIZE);
        let filtered = rows.len();
        let page_count = filtered.div_ceil(per_page);
        let page = query.page.unwrap_or(1).clamp(1, page_count.max(1));

        let rows = rows
            .into_iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .collect();

        TableWindow {
            rows,
            total: records.len(),
            filtered,
            page,
            page_count,
            per_page,
            sort: sort.map(|(column, dir)| (column.key, dir)),
        }
    }

    /// Render the page described by `query`; links point at `base_path`.
    pub fn render(&self, records: &[R], query: &TableQuery, base_path: &str) -> TableView {
        let window = self.window(records, query);

        let headers = self
            .columns
            .iter()
            .map(|column| {
                let indicator = match window.sort {
                    Some((key, SortDirection::Asc)) if key == column.key => "▲",
                    Some((key, SortDirection::Desc)) if key == column.key => "▼",
                    _ => "",
                };
                HeaderView {
                    label: column.label,
                    sortable: column.sortable,
                    href: query.with_sort_toggled(column.key).href(base_path),
                    indicator,
                }
            })
            .collect();

        let rows = window
            .rows
            .iter()
            .map(|row| RowView {
                id: self.row_key.map(|key| key(row)).unwrap_or_default(),
                cells: self.columns.iter().map(|c| c.cell(row)).collect(),
            })
            .collect::<Vec<_>>();

        let is_empty = window.filtered == 0;
        let has_prev = !is_empty && window.page > 1;
        let has_next = !is_empty && window.page < window.page_count;
        let first_row = (window.page - 1) * window.per_page + 1;

        TableView {
            headers,
            total: window.total,
            filtered: window.filtered,
            page: window.page,
            page_count: window.page_count,
            has_prev,
            has_next,
            prev_href: query.with_page(window.page.saturating_sub(1).max(1)).href(base_path),
            next_href: query.with_page(window.page + 1).href(base_path),
            is_empty,
            search: query.search().unwrap_or_default().to_string(),
            sort: query.sort.clone().unwrap_or_default(),
            dir: query.dir.unwrap_or_default().as_str(),
            per_page: window.per_page,
            showing: if is_empty {
                String::new()
            } else {
                format!(
                    "Showing {}-{} of {}",
                    first_row,
                    first_row + rows.len() - 1,
                    window.filtered
                )
            },
            rows,
        }
    }
}

// =============================================================================
// View Types
// =============================================================================

/// A column header.
#[derive(Debug, Clone)]
pub struct HeaderView {
    pub label: &'static str,
    pub sortable: bool,
    /// Link that sorts by this column (toggling direction if already sorted).
    pub href: String,
    /// `▲`, `▼` or empty.
    pub indicator: &'static str,
}

/// A rendered row.
#[derive(Debug, Clone)]
pub struct RowView {
    pub id: String,
    pub cells: Vec<CellView>,
}

/// A rendered table page.
#[derive(Debug, Clone)]
pub struct TableView {
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
    pub total: usize,
    pub filtered: usize,
    pub page: usize,
    pub page_count: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_href: String,
    pub next_href: String,
    /// Nothing to show: no records, or none matching the search.
    pub is_empty: bool,
    pub search: String,
    pub sort: String,
    pub dir: &'static str,
    pub per_page: usize,
    pub showing: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::data_table::FieldValue;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        v: u32,
    }

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column::sortable("name", "Name", |r: &Row| FieldValue::text(r.name)),
            Column::sortable("v", "Value", |r: &Row| FieldValue::from(r.v)),
            Column::new("fixed", "Fixed", |_: &Row| FieldValue::text("x")),
        ]
    }

    fn query() -> TableQuery {
        TableQuery::default()
    }

    fn names<'r>(window: &TableWindow<'r, Row>) -> Vec<&'static str> {
        window.rows.iter().map(|r| r.name).collect()
    }

    fn numbered(n: u32) -> Vec<Row> {
        (1..=n).map(|v| Row { name: "row", v }).collect()
    }

    #[test]
    fn test_sort_by_name_ascending() {
        let records = vec![Row { name: "B", v: 2 }, Row { name: "A", v: 1 }];
        let columns = columns();
        let table = RecordTable::new(&columns, "name");

        let q = TableQuery {
            sort: Some("name".into()),
            dir: Some(SortDirection::Asc),
            ..query()
        };
        let window = table.window(&records, &q);
        assert_eq!(names(&window), ["A", "B"]);
        assert_eq!(records[0].name, "B", "source slice must not be reordered");
    }

    #[test]
    fn test_sort_descending() {
        let records = vec![Row { name: "A", v: 1 }, Row { name: "C", v: 3 }, Row { name: "B", v: 2 }];
        let columns = columns();
        let table = RecordTable::new(&columns, "name");
        let q = TableQuery {
            sort: Some("v".into()),
            dir: Some(SortDirection::Desc),
            ..query()
        };
        assert_eq!(names(&table.window(&records, &q)), ["C", "B", "A"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let records = vec![
            Row { name: "first", v: 1 },
            Row { name: "second", v: 1 },
            Row { name: "third", v: 0 },
        ];
        let columns = columns();
        let table = RecordTable::new(&columns, "name");
        for dir in [SortDirection::Asc, SortDirection::Desc] {
            let q = TableQuery {
                sort: Some("v".into()),
                dir: Some(dir),
                ..query()
            };
            let window = table.window(&records, &q);
            let ones: Vec<_> = names(&window).into_iter().filter(|n| *n != "third").collect();
            assert_eq!(ones, ["first", "second"]);
        }
    }

    #[test]
    fn test_unknown_or_unsortable_column_keeps_source_order() {
        let records = vec![Row { name: "B", v: 2 }, Row { name: "A", v: 1 }];
        let columns = columns();
        let table = RecordTable::new(&columns, "name");
        for key in ["fixed", "missing"] {
            let q = TableQuery {
                sort: Some(key.into()),
                ..query()
            };
            let window = table.window(&records, &q);
            assert_eq!(names(&window), ["B", "A"]);
            assert!(window.sort.is_none());
        }
    }

    #[test]
    fn test_search_matches_only_search_column() {
        let records = vec![Row { name: "B", v: 2 }, Row { name: "A", v: 1 }];
        let columns = columns();
        let table = RecordTable::new(&columns, "name");

        let q = TableQuery {
            q: Some("A".into()),
            ..query()
        };
        let window = table.window(&records, &q);
        assert_eq!(window.rows, [&Row { name: "A", v: 1 }]);

        // "2" appears only in the value column, which is not searched.
        let q = TableQuery {
            q: Some("2".into()),
            ..query()
        };
        assert!(table.window(&records, &q).rows.is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let records = vec![
            Row { name: "Smartphone X", v: 1 },
            Row { name: "Laptop Pro", v: 2 },
        ];
        let columns = columns();
        let table = RecordTable::new(&columns, "name");
        let q = TableQuery {
            q: Some("  PHONE ".into()),
            ..query()
        };
        assert_eq!(names(&table.window(&records, &q)), ["Smartphone X"]);
    }

    #[test]
    fn test_empty_input_is_empty_for_any_query() {
        let records: Vec<Row> = Vec::new();
        let columns = columns();
        let table = RecordTable::new(&columns, "name");
        let queries = [
            query(),
            TableQuery {
                q: Some("a".into()),
                sort: Some("v".into()),
                dir: Some(SortDirection::Desc),
                page: Some(4),
                per_page: Some(5),
            },
        ];
        for q in queries {
            let view = table.render(&records, &q, "/things");
            assert!(view.is_empty);
            assert_eq!(view.page_count, 0);
            assert!(!view.has_prev && !view.has_next);
            assert!(view.rows.is_empty());
        }
    }

    #[test]
    fn test_no_matches_suppresses_pagination() {
        let records = numbered(25);
        let columns = columns();
        let table = RecordTable::new(&columns, "name");
        let q = TableQuery {
            q: Some("zzz".into()),
            page: Some(2),
            ..query()
        };
        let view = table.render(&records, &q, "/things");
        assert!(view.is_empty);
        assert_eq!(view.total, 25);
        assert_eq!(view.filtered, 0);
        assert_eq!(view.page_count, 0);
        assert!(!view.has_prev && !view.has_next);
    }

    #[test]
    fn test_pagination_last_page_is_partial() {
        let records = numbered(25);
        let columns = columns();
        let table = RecordTable::new(&columns, "name").page_size(10);

        let window = table.window(&records, &query().with_page(3));
        assert_eq!(window.page_count, 3);
        assert_eq!(window.rows.len(), 5);
        assert_eq!(window.rows[0].v, 21);
    }

    #[test]
    fn test_pages_beyond_last_clamp() {
        let records = numbered(25);
        let columns = columns();
        let table = RecordTable::new(&columns, "name").page_size(10);

        let window = table.window(&records, &query().with_page(9));
        assert_eq!(window.page, 3);
        assert_eq!(window.rows.len(), 5);

        let view = table.render(&records, &query().with_page(3), "/things");
        assert!(view.has_prev);
        assert!(!view.has_next);
        assert_eq!(view.showing, "Showing 21-25 of 25");

        let window = table.window(&records, &query().with_page(0));
        assert_eq!(window.page, 1);
    }

    #[test]
    fn test_page_size_is_capped() {
        let records = numbered(150);
        let columns = columns();
        let table = RecordTable::new(&columns, "name");
        let q = TableQuery {
            per_page: Some(1_000),
            ..query()
        };
        let window = table.window(&records, &q);
        assert_eq!(window.per_page, MAX_PAGE_SIZE);
        assert_eq!(window.rows.len(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_header_links_toggle_direction() {
        let records = vec![Row { name: "A", v: 1 }];
        let columns = columns();
        let table = RecordTable::new(&columns, "name");

        let view = table.render(&records, &query(), "/things");
        assert_eq!(view.headers[0].href, "/things?sort=name&dir=asc");
        assert_eq!(view.headers[0].indicator, "");

        let q = TableQuery {
            q: Some("a b".into()),
            sort: Some("name".into()),
            dir: Some(SortDirection::Asc),
            page: Some(2),
            per_page: None,
        };
        let view = table.render(&records, &q, "/things");
        assert_eq!(view.headers[0].href, "/things?q=a%20b&sort=name&dir=desc");
        assert_eq!(view.headers[0].indicator, "▲");
        assert_eq!(view.headers[1].href, "/things?q=a%20b&sort=v&dir=asc");
    }

    #[test]
    fn test_row_keys_are_rendered() {
        let records = vec![Row { name: "A", v: 7 }];
        let columns = columns();
        let table = RecordTable::new(&columns, "name").row_key(|r| r.v.to_string());
        let view = table.render(&records, &query(), "/things");
        assert_eq!(view.rows[0].id, "7");
        assert_eq!(view.rows[0].cells[0].text, "A");
    }
}
