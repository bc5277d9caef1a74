//! Request parameter assembly and query string encoding.

use crate::filter::FilterEntry;
use crate::filter::FilterValue;

/// Reserved parameter carrying the row offset.
pub const OFFSET_PARAM: &str = "offset";
/// Reserved parameter carrying the page size.
pub const LIMIT_PARAM: &str = "limit";
/// Reserved parameter carrying the sort field.
pub const SORT_KEY_PARAM: &str = "sort_key";
/// Reserved parameter carrying the sort direction.
pub const SORT_ORDER_PARAM: &str = "sort_order";

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortOrder {
    /// Returns the wire representation (`asc` or `desc`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// The current sort, both parts optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    /// Field to sort on.
    pub key: Option<String>,
    /// Direction to sort in.
    pub order: Option<SortOrder>,
}

impl SortState {
    /// Creates a sort on `key` in the given direction.
    pub fn new(key: impl Into<String>, order: SortOrder) -> Self {
        Self {
            key: Some(key.into()),
            order: Some(order),
        }
    }
}

/// Position of the requested window in the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Number of rows to skip.
    pub offset: u64,
    /// Maximum number of rows to return.
    pub limit: u64,
}

impl Cursor {
    /// Cursor for a zero-based page number.
    ///
    /// The offset saturates at `u64::MAX` instead of overflowing.
    pub fn page(page: u64, limit: u64) -> Self {
        Self {
            offset: page.saturating_mul(limit),
            limit,
        }
    }
}

/// Appends the reserved `offset`, `limit`, `sort_key` and `sort_order`
/// entries to the filters.
///
/// The reserved entries come last so they win over colliding user filters.
/// Absent sort parts are sent as empty values.
pub fn build_query(mut filters: Vec<FilterEntry>, cursor: Cursor, sort: &SortState) -> Vec<FilterEntry> {
    filters.push(FilterEntry::new(OFFSET_PARAM, cursor.offset));
    filters.push(FilterEntry::new(LIMIT_PARAM, cursor.limit));
    filters.push(FilterEntry::new(
        SORT_KEY_PARAM,
        sort.key.clone().map(FilterValue::from).unwrap_or_else(FilterValue::empty),
    ));
    filters.push(FilterEntry::new(
        SORT_ORDER_PARAM,
        sort.order
            .map(|order| FilterValue::from(order.as_str()))
            .unwrap_or_else(FilterValue::empty),
    ));
    filters
}

/// Flattens entries to `name=value` pairs joined with `&`, percent-encoded.
pub fn encode_query(entries: &[FilterEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{}={}",
                urlencoding::encode(&entry.name),
                urlencoding::encode(&entry.value.to_string())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Appends an encoded query string to a URL, inserting `?` or `&`.
pub fn append_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    if url.ends_with('?') || url.ends_with('&') {
        format!("{url}{query}")
    } else if url.contains('?') {
        format!("{url}&{query}")
    } else {
        format!("{url}?{query}")
    }
}
