//! CSV export URL.

use crate::descriptor::GridDescriptor;
use crate::filter::FilterEntry;
use crate::query::append_query;
use crate::query::encode_query;

/// Parameter asking the endpoint for CSV output.
pub const OUTPUT_PARAM: &str = "output";

/// Builds the URL exporting the full filtered result set as CSV.
///
/// Pagination and sort parameters are never included.
///
/// # Example
///
/// ```
/// use evolugrid_lib::descriptor::{ColumnSpec, GridOptions};
/// use evolugrid_lib::export::build_export_url;
/// use evolugrid_lib::filter::FilterEntry;
///
/// let descriptor = GridOptions::new("/items")
///     .columns(vec![ColumnSpec::field("Id", "id")])
///     .resolve()
///     .unwrap();
/// let url = build_export_url(&descriptor, &[FilterEntry::new("q", "a b")]);
/// assert_eq!(url, "/items?q=a%20b&output=csv");
/// ```
pub fn build_export_url(descriptor: &GridDescriptor, filters: &[FilterEntry]) -> String {
    let mut params = filters.to_vec();
    params.push(FilterEntry::new(OUTPUT_PARAM, "csv"));
    append_query(&descriptor.endpoint_url, &encode_query(&params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ColumnSpec;
    use crate::descriptor::GridOptions;

    fn descriptor(url: &str) -> GridDescriptor {
        GridOptions::new(url)
            .columns(vec![ColumnSpec::field("Id", "id")])
            .resolve()
            .unwrap()
    }

    #[test]
    fn test_no_filters() {
        assert_eq!(build_export_url(&descriptor("/items"), &[]), "/items?output=csv");
    }

    #[test]
    fn test_existing_query_string() {
        let url = build_export_url(&descriptor("/items?tenant=3"), &[FilterEntry::new("year", 2024)]);
        assert_eq!(url, "/items?tenant=3&year=2024&output=csv");
    }
}
