//! Evolugrid
//!
//! A data-driven grid controller: fetches pages of rows from an HTTP JSON
//! endpoint and renders them as a sortable table with a pager or infinite
//! scroll.

pub mod cell;
pub mod descriptor;
pub mod display;
pub mod error;
pub mod export;
pub mod filter;
pub mod host;
pub mod query;
pub mod render;
pub mod response;
pub mod transport;
pub mod view;

mod grid;

pub use grid::*;
pub use error::Error;
pub use response::ResponsePayload;
