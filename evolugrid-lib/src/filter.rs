//! Filter entries and filter source resolution.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::descriptor::GridDescriptor;
use crate::host::Host;

/// A name/value pair sent as a query parameter to scope the result set.
///
/// # Example
///
/// ```
/// use evolugrid_lib::filter::FilterEntry;
///
/// let entry = FilterEntry::new("status", "open");
/// assert_eq!(entry.value.to_string(), "open");
///
/// let entry = FilterEntry::new("year", 2024);
/// assert_eq!(entry.value.to_string(), "2024");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterEntry {
    /// Parameter name.
    pub name: String,
    /// Parameter value.
    pub value: FilterValue,
}

impl FilterEntry {
    /// Creates a new filter entry.
    pub fn new(name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A filter value: either text or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Numeric value.
    Number(serde_json::Number),
    /// Text value.
    Text(String),
}

impl FilterValue {
    /// The empty text value, sent for absent sort parameters.
    pub fn empty() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for FilterValue {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for FilterValue {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

/// Callback returning the current filters, configured on the grid options.
pub type FilterCallback = Arc<dyn Fn() -> Vec<FilterEntry> + Send + Sync>;

/// Where the filters for a request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterSource {
    /// Passed explicitly by the caller.
    Explicit,
    /// Returned by the configured filter callback.
    Callback,
    /// Serialized from the configured filter form.
    Form,
    /// No source configured.
    None,
}

/// Returns the source [`resolve_filters`] will consult for this descriptor.
pub fn filter_source(descriptor: &GridDescriptor, has_explicit: bool) -> FilterSource {
    if has_explicit {
        FilterSource::Explicit
    } else if descriptor.filter_callback.is_some() {
        FilterSource::Callback
    } else if descriptor.filter_form_selector.is_some() {
        FilterSource::Form
    } else {
        FilterSource::None
    }
}

/// Returns the filters to apply to the next request.
///
/// Exactly one source is consulted, in precedence order: the explicit
/// override, the filter callback, the filter form, then nothing. Results from
/// different sources are never merged.
pub fn resolve_filters(
    descriptor: &GridDescriptor,
    host: &dyn Host,
    explicit: Option<Vec<FilterEntry>>,
) -> Vec<FilterEntry> {
    let source = filter_source(descriptor, explicit.is_some());
    log::trace!("resolving filters from {:?}", source);

    match source {
        FilterSource::Explicit => explicit.unwrap_or_default(),
        FilterSource::Callback => descriptor
            .filter_callback
            .as_ref()
            .map(|callback| callback())
            .unwrap_or_default(),
        FilterSource::Form => descriptor
            .filter_form_selector
            .as_deref()
            .map(|selector| host.serialize_form(selector))
            .unwrap_or_default(),
        FilterSource::None => Vec::new(),
    }
}
