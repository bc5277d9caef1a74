//! The host page the grid is embedded in.

use crate::filter::FilterEntry;
use crate::view::Element;

/// Controls disabled while a request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controls<'a> {
    /// The dedicated submit trigger.
    SubmitButton(&'a str),
    /// Every button of the filter form.
    FormButtons(&'a str),
}

/// Host environment collaborators of a grid.
///
/// The grid renders into its own container element and calls back into the
/// host for everything outside it: the filter form, the controls, the loader,
/// the count target and opening URLs. Calls are made while the grid's state
/// is locked, so implementations must not call back into the grid.
pub trait Host: Send + Sync {
    /// Serializes the current field values of the form matching `selector`.
    fn serialize_form(&self, selector: &str) -> Vec<FilterEntry> {
        let _ = selector;
        Vec::new()
    }

    /// Enables or disables the given controls.
    fn set_controls_enabled(&self, controls: Controls<'_>, enabled: bool) {
        let _ = (controls, enabled);
    }

    /// Shows or hides the loader element.
    fn set_loader_visible(&self, selector: &str, visible: bool) {
        let _ = (selector, visible);
    }

    /// Writes the total count (or nothing, when unknown) into the target.
    fn set_count(&self, selector: &str, count: Option<u64>) {
        let _ = (selector, count);
    }

    /// Opens `url` in a new browsing context.
    fn open_url(&self, url: &str) {
        log::warn!("host cannot open {url}");
    }

    /// Called after every change to the grid's container.
    fn container_updated(&self, container: &Element) {
        let _ = container;
    }
}

/// A host with no form, controls or loader.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl Host for NullHost {}
