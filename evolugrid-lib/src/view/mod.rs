//! Element tree the grid renders into.
//!
//! The grid owns one container [`Element`]. Triggers (sort links, pager
//! arrows, the export link) carry an [`Action`]; the host wires user input on
//! such an element to [`Grid::activate`](crate::Grid::activate).

mod action;
mod element;
mod html;

pub use action::Action;
pub use element::Element;
pub use element::Node;
pub use element::Tag;
pub use html::escape_html;
