//! Response payload returned by the grid endpoint.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// One data row: a JSON object keyed by field name.
pub type Row = serde_json::Map<String, Value>;

/// The JSON body returned for one page of grid data.
///
/// # Example
///
/// ```
/// use evolugrid_lib::response::ResponsePayload;
///
/// let payload: ResponsePayload =
///     serde_json::from_str(r#"{"count": null, "data": [{"id": 1}]}"#).unwrap();
/// assert_eq!(payload.count, None);
/// assert_eq!(payload.data.len(), 1);
/// assert!(payload.descriptor.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsePayload {
    /// Total number of rows matching the filters, `None` when unknown.
    #[serde(default)]
    pub count: Option<u64>,
    /// Rows of this page, at most `limit` of them.
    #[serde(default)]
    pub data: Vec<Row>,
    /// Partial descriptor override merged over the instance options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<Value>,
}

impl ResponsePayload {
    /// Creates a payload from rows and a total count.
    pub fn new(count: Option<u64>, data: Vec<Row>) -> Self {
        Self {
            count,
            data,
            descriptor: None,
        }
    }

    /// Attaches a descriptor override.
    pub fn with_descriptor(mut self, descriptor: Value) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    /// Returns the number of rows in this page.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
