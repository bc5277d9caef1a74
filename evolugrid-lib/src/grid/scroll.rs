//! Infinite scroll.

use super::Grid;
use super::GridState;
use super::Outcome;
use super::RequestKind;
use super::ScrollPhase;
use crate::descriptor::GridDescriptor;
use crate::error::Error;
use crate::render::RenderMode;
use crate::render::append_render;
use crate::render::full_render;
use crate::render::reveal_no_results;
use crate::response::ResponsePayload;

impl Grid {
    /// Fetches the next rows at the scroll offset.
    ///
    /// With `reset` the offset rewinds to zero and the table is rebuilt;
    /// otherwise the rows are appended to the existing table.
    pub async fn scroll(&self, reset: bool) -> Result<Outcome, Error> {
        let pending = {
            let mut state = self.lock().await;
            if reset {
                state.navigation.scroll.rewind();
            }
            self.begin(&mut state, RequestKind::Scroll { reset }, None)
        };
        self.run(pending).await
    }

    /// Handles the host's "end of content is in view" event.
    ///
    /// Fetches more rows when ready, does nothing while a fetch is in flight
    /// and reveals the "no more results" indicator once exhausted.
    pub async fn on_boundary_reached(&self) -> Result<Outcome, Error> {
        let pending = {
            let mut state = self.lock().await;
            if !state.descriptor.infinite_scroll {
                return Ok(Outcome::Ignored);
            }
            match state.navigation.scroll.phase() {
                ScrollPhase::Loading => return Ok(Outcome::Busy),
                ScrollPhase::Exhausted => {
                    if reveal_no_results(&mut state.container) {
                        self.inner.host.container_updated(&state.container);
                    }
                    return Ok(Outcome::Exhausted);
                }
                ScrollPhase::Ready => self.begin(&mut state, RequestKind::Scroll { reset: false }, None),
            }
        };
        self.run(pending).await
    }

    pub(super) fn apply_scroll(
        &self,
        state: &mut GridState,
        descriptor: &GridDescriptor,
        payload: &ResponsePayload,
        reset: bool,
        limit: u64,
    ) {
        if reset || !append_render(&mut state.container, descriptor, &payload.data) {
            full_render(&mut state.container, descriptor, payload, RenderMode::Scroll);
        }

        let scroll = &mut state.navigation.scroll;
        scroll.offset = scroll.offset.saturating_add(limit);
        if payload.count.is_some_and(|count| count < scroll.offset) {
            log::debug!("no more results after offset {}", scroll.offset);
            scroll.no_more_results = true;
        }
    }
}
