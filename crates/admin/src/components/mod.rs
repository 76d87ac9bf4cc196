//! Reusable view components.
//!
//! - [`data_table`] - Column specifications and cell rendering
//! - [`record_table`] - The sort/search/paginate engine over any row type
//! - [`shell`] - Navigation and header chrome

pub mod data_table;
pub mod record_table;
pub mod shell;

pub use data_table::{CellRenderer, CellView, Column, DataTableConfig, FieldValue, Tone};
pub use record_table::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, RecordTable, SortDirection, TableQuery, TableView,
    TableWindow,
};
pub use shell::{IdentityView, NavItem, ShellView};
