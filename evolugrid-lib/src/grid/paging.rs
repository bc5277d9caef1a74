//! Discrete paging.

use super::Grid;
use super::GridState;
use super::Outcome;
use super::RequestKind;
use crate::descriptor::GridDescriptor;
use crate::error::Error;
use crate::filter::FilterEntry;
use crate::render::RenderMode;
use crate::render::full_render;
use crate::response::ResponsePayload;

impl Grid {
    /// Loads and renders the zero-based `page`.
    ///
    /// Filters come from `explicit_filters` when given, otherwise from the
    /// filter callback or the filter form. While the request is in flight the
    /// controls are disabled and, when a loader is configured, the loader
    /// replaces the container.
    pub async fn refresh(&self, page: u64, explicit_filters: Option<Vec<FilterEntry>>) -> Result<Outcome, Error> {
        let pending = {
            let mut state = self.lock().await;
            self.begin(&mut state, RequestKind::Page(page), explicit_filters)
        };
        self.run(pending).await
    }

    pub(super) fn apply_page(&self, state: &mut GridState, descriptor: &GridDescriptor, payload: &ResponsePayload, page: u64) {
        full_render(&mut state.container, descriptor, payload, RenderMode::Paging { page });
        state.navigation.current_page = page;
    }
}
