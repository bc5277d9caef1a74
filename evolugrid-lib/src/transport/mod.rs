//! Transport adapter: how the grid fetches a page of data.

mod http;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::filter::FilterEntry;
use crate::response::ResponsePayload;

pub use http::HttpTransport;
pub use http::HttpTransportBuilder;

/// Fetches one page of grid data.
///
/// Implementations issue `GET <endpoint_url>` with `params` flattened into the
/// query string and decode the JSON body. They must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches the payload for the given parameters.
    async fn fetch(&self, endpoint_url: &str, params: &[FilterEntry]) -> Result<ResponsePayload, TransportError>;
}
