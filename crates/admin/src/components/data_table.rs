//! Data table component types.
//!
//! Column specifications describe how one row type is shown in a record
//! table: which field each column reads, whether it can be sorted, and how
//! its cells are rendered. The table engine in
//! [`record_table`](super::record_table) processes every column the same way.

use std::cmp::Ordering;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use ims_core::Price;

// =============================================================================
// Field Values
// =============================================================================

/// A comparable cell value produced by a column accessor.
///
/// Values have a total order: text compares case-insensitively (ties broken
/// by the raw text), numbers numerically, dates chronologically with missing
/// dates first. Values of different variants order by variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Date(Option<NaiveDate>),
}

impl FieldValue {
    /// Text value from anything string-like.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Text(_) => 0,
            Self::Integer(_) => 1,
            Self::Decimal(_) => 2,
            Self::Date(_) => 3,
        }
    }

    /// Plain text used for search matching and default rendering.
    #[must_use]
    pub fn plain_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Integer(n) => n.to_string(),
            Self::Decimal(d) => d.to_string(),
            Self::Date(Some(d)) => d.format("%Y-%m-%d").to_string(),
            Self::Date(None) => String::new(),
        }
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<Price> for FieldValue {
    fn from(value: Price) -> Self {
        Self::Decimal(value.amount())
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(Some(value))
    }
}

impl From<Option<NaiveDate>> for FieldValue {
    fn from(value: Option<NaiveDate>) -> Self {
        Self::Date(value)
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Decimal(a), Self::Decimal(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// =============================================================================
// Cell Rendering
// =============================================================================

/// Color family of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Info,
    Accent,
    Success,
    Warning,
    Danger,
}

impl Tone {
    /// CSS class applied to the badge.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Neutral => "badge badge-neutral",
            Self::Info => "badge badge-info",
            Self::Accent => "badge badge-accent",
            Self::Success => "badge badge-success",
            Self::Warning => "badge badge-warning",
            Self::Danger => "badge badge-danger",
        }
    }
}

/// How a column's value is turned into a cell.
#[derive(Debug, Clone, Copy)]
pub enum CellRenderer {
    /// Plain text.
    Text,
    /// Dollar amount, e.g. `$1,299.99`.
    Currency,
    /// Whole number with thousands separators.
    Integer,
    /// Whole number followed by `%`.
    Percent,
    /// Date such as `May 15, 2023`; blank when missing.
    Date,
    /// `mailto:` link.
    Email,
    /// `tel:` link.
    Phone,
    /// Neutral badge.
    Badge,
    /// Badge colored by its text.
    StatusBadge(fn(&str) -> Tone),
}

/// A rendered table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub text: String,
    pub href: Option<String>,
    pub badge_class: Option<&'static str>,
    pub numeric: bool,
}

impl CellView {
    fn text(text: String) -> Self {
        Self {
            text,
            href: None,
            badge_class: None,
            numeric: false,
        }
    }

    fn numeric(text: String) -> Self {
        Self {
            numeric: true,
            ..Self::text(text)
        }
    }
}

/// Insert thousands separators into an integer.
pub(crate) fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

impl CellRenderer {
    /// Render one value.
    #[must_use]
    pub fn render(self, value: &FieldValue) -> CellView {
        match (self, value) {
            (Self::Currency, FieldValue::Decimal(amount)) => {
                CellView::numeric(Price::new(*amount).to_string())
            }
            (Self::Integer, FieldValue::Integer(n)) => CellView::numeric(group_thousands(*n)),
            (Self::Percent, FieldValue::Integer(n)) => CellView::numeric(format!("{n}%")),
            (Self::Date, FieldValue::Date(date)) => CellView::text(
                date.map(|d| d.format("%b %-d, %Y").to_string())
                    .unwrap_or_default(),
            ),
            (Self::Email, value) => {
                let text = value.plain_text();
                CellView {
                    href: Some(format!("mailto:{text}")),
                    ..CellView::text(text)
                }
            }
            (Self::Phone, value) => {
                let text = value.plain_text();
                let dialable: String = text
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == '+')
                    .collect();
                CellView {
                    href: Some(format!("tel:{dialable}")),
                    ..CellView::text(text)
                }
            }
            (Self::Badge, value) => CellView {
                badge_class: Some(Tone::Neutral.css_class()),
                ..CellView::text(value.plain_text())
            },
            (Self::StatusBadge(tone), value) => {
                let text = value.plain_text();
                CellView {
                    badge_class: Some(tone(&text).css_class()),
                    ..CellView::text(text)
                }
            }
            (_, value) => CellView::text(value.plain_text()),
        }
    }
}

// =============================================================================
// Columns
// =============================================================================

/// Column definition for a record table over rows of type `R`.
pub struct Column<R> {
    /// Unique key for the column, used in `sort=` query parameters.
    pub key: &'static str,
    /// Display label for the column header.
    pub label: &'static str,
    /// Whether the column is sortable.
    pub sortable: bool,
    /// Reads the column's value from a row.
    pub value: fn(&R) -> FieldValue,
    /// How cells are rendered.
    pub renderer: CellRenderer,
}

impl<R> Column<R> {
    /// Create a new sortable column.
    #[must_use]
    pub const fn sortable(key: &'static str, label: &'static str, value: fn(&R) -> FieldValue) -> Self {
        Self {
            key,
            label,
            sortable: true,
            value,
            renderer: CellRenderer::Text,
        }
    }

    /// Create a new non-sortable column.
    #[must_use]
    pub const fn new(key: &'static str, label: &'static str, value: fn(&R) -> FieldValue) -> Self {
        Self {
            key,
            label,
            sortable: false,
            value,
            renderer: CellRenderer::Text,
        }
    }

    /// Set the cell renderer.
    #[must_use]
    pub fn render_as(mut self, renderer: CellRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Render this column's cell for `row`.
    #[must_use]
    pub fn cell(&self, row: &R) -> CellView {
        self.renderer.render(&(self.value)(row))
    }
}

// =============================================================================
// Table Configuration
// =============================================================================

/// Presentation settings for a record table.
#[derive(Debug, Clone)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: String,
    /// Search placeholder text.
    pub search_placeholder: String,
    /// Title for empty state.
    pub empty_title: String,
    /// Description for empty state.
    pub empty_description: Option<String>,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub fn new(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            search_placeholder: "Search...".to_string(),
            empty_title: "No records found".to_string(),
            empty_description: None,
        }
    }

    /// Set search placeholder.
    #[must_use]
    pub fn search_placeholder(mut self, placeholder: &str) -> Self {
        self.search_placeholder = placeholder.to_string();
        self
    }

    /// Set empty state configuration.
    #[must_use]
    pub fn empty_state(mut self, title: &str, description: Option<&str>) -> Self {
        self.empty_title = title.to_string();
        self.empty_description = description.map(ToString::to_string);
        self
    }
}
