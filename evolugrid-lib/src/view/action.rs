use std::fmt;

use crate::query::SortOrder;

/// What activating a trigger does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Sort on `key` and reload from the start.
    Sort {
        /// Sort key of the column.
        key: String,
        /// Requested direction.
        order: SortOrder,
    },
    /// Load a zero-based page.
    Page(u64),
    /// Open the CSV export of the current filters.
    ExportCsv,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sort { key, order } => write!(f, "sort:{}:{}", key, order.as_str()),
            Self::Page(page) => write!(f, "page:{page}"),
            Self::ExportCsv => f.write_str("export-csv"),
        }
    }
}
