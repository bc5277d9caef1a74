//! The grid instance.
//!
//! A [`Grid`] owns everything one widget needs: its descriptor, navigation
//! state, container element and request sequence counter. Two grids never
//! share state.
//!
//! Every refresh or scroll issues exactly one request. The state lock is
//! released while the request is in flight, so the host may start another
//! operation meanwhile; each request carries a sequence number and only the
//! latest one issued may touch state or the container when it completes.

mod paging;
mod scroll;
mod state;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tokio::sync::MutexGuard;

use crate::descriptor;
use crate::descriptor::GridDescriptor;
use crate::descriptor::GridOptions;
use crate::descriptor::resolve_descriptor;
use crate::error::ConfigError;
use crate::error::Error;
use crate::export::build_export_url;
use crate::filter::FilterEntry;
use crate::filter::resolve_filters;
use crate::host::Host;
use crate::query::Cursor;
use crate::query::SortOrder;
use crate::query::SortState;
use crate::query::build_query;
use crate::transport::Transport;
use crate::view::Action;
use crate::view::Element;

pub use state::LoadStatus;
pub use state::NavigationState;
pub use state::ScrollPhase;
pub use state::ScrollState;

/// Class of the container element.
pub const CONTAINER_CLASS: &str = "evolugrid";

/// What an operation ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The response was rendered.
    Rendered,
    /// A newer request was issued before this one completed; its response
    /// was discarded.
    Superseded,
    /// A scroll fetch is already in flight; nothing was requested.
    Busy,
    /// No more rows; the "no more results" indicator is shown.
    Exhausted,
    /// The event does not apply in the current navigation mode.
    Ignored,
    /// The CSV export URL was handed to the host.
    Exported {
        /// The export URL.
        url: String,
    },
}

/// A data grid bound to one endpoint.
///
/// Cheap to clone; clones share the same instance.
///
/// # Example
///
/// ```ignore
/// let options = GridOptions::new("/api/items")
///     .limit(50)
///     .columns(vec![ColumnSpec::field("Name", "name").sortable()]);
///
/// let grid = Grid::initialize(options, Arc::new(NullHost), Arc::new(HttpTransport::new())).await?;
/// grid.refresh(1, None).await?;
/// println!("{}", grid.html().await);
/// ```
#[derive(Clone)]
pub struct Grid {
    inner: Arc<GridInner>,
}

struct GridInner {
    defaults: Value,
    options: GridOptions,
    host: Arc<dyn Host>,
    transport: Arc<dyn Transport>,
    state: Mutex<GridState>,
}

struct GridState {
    /// Descriptor of the latest render cycle.
    descriptor: GridDescriptor,
    navigation: NavigationState,
    container: Element,
    /// Sequence number of the latest request issued.
    latest_request: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Page(u64),
    Scroll { reset: bool },
}

/// A request issued under the lock, awaiting its response.
struct PendingRequest {
    sequence: u64,
    kind: RequestKind,
    endpoint_url: String,
    limit: u64,
    params: Vec<FilterEntry>,
}

impl Grid {
    /// Creates a grid without loading anything.
    ///
    /// Fails if the options do not resolve to a valid descriptor.
    pub fn new(options: GridOptions, host: Arc<dyn Host>, transport: Arc<dyn Transport>) -> Result<Self, ConfigError> {
        let defaults = descriptor::defaults();
        let descriptor = resolve_descriptor(&defaults, &options, None)?;

        let state = GridState {
            descriptor,
            navigation: NavigationState::default(),
            container: Element::div().with_class(CONTAINER_CLASS),
            latest_request: 0,
        };

        Ok(Self {
            inner: Arc::new(GridInner {
                defaults,
                options,
                host,
                transport,
                state: Mutex::new(state),
            }),
        })
    }

    /// Creates a grid and, when `loadOnInit` is set, loads the first page.
    ///
    /// Configuration errors are fatal. A failed initial load is logged and
    /// the grid is returned anyway.
    pub async fn initialize(
        options: GridOptions,
        host: Arc<dyn Host>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ConfigError> {
        let grid = Self::new(options, host, transport)?;

        let (load_on_init, infinite_scroll) = {
            let state = grid.lock().await;
            (state.descriptor.load_on_init, state.descriptor.infinite_scroll)
        };

        if load_on_init {
            let result = if infinite_scroll {
                grid.scroll(true).await
            } else {
                grid.refresh(0, None).await
            };
            if let Err(e) = result {
                log::error!("initial load failed: {e}");
            }
        }

        Ok(grid)
    }

    /// Handles activation of a rendered trigger.
    pub async fn activate(&self, action: &Action) -> Result<Outcome, Error> {
        match action {
            Action::Sort { key, order } => self.sort(key.clone(), *order).await,
            Action::Page(page) => self.refresh(*page, None).await,
            Action::ExportCsv => Ok(Outcome::Exported {
                url: self.export_csv(None).await,
            }),
        }
    }

    /// Sorts on `key` and reloads from the first page (or the first rows).
    pub async fn sort(&self, key: impl Into<String>, order: SortOrder) -> Result<Outcome, Error> {
        let infinite_scroll = {
            let mut state = self.lock().await;
            state.navigation.sort = SortState::new(key, order);
            state.descriptor.infinite_scroll
        };
        self.reload(infinite_scroll).await
    }

    /// Handles a filter form submission.
    ///
    /// Navigation state goes back to its initial values, then the grid reloads
    /// from the start.
    pub async fn submit_filters(&self) -> Result<Outcome, Error> {
        let infinite_scroll = {
            let mut state = self.lock().await;
            state.navigation = NavigationState::default();
            state.descriptor.infinite_scroll
        };
        self.reload(infinite_scroll).await
    }

    async fn reload(&self, infinite_scroll: bool) -> Result<Outcome, Error> {
        if infinite_scroll {
            self.scroll(true).await
        } else {
            self.refresh(0, None).await
        }
    }

    /// Opens the CSV export of the current filters and returns its URL.
    pub async fn export_csv(&self, explicit_filters: Option<Vec<FilterEntry>>) -> String {
        let state = self.lock().await;
        let filters = resolve_filters(&state.descriptor, self.inner.host.as_ref(), explicit_filters);
        let url = build_export_url(&state.descriptor, &filters);
        log::info!("exporting CSV: {url}");
        self.inner.host.open_url(&url);
        url
    }

    /// Returns a copy of the container element.
    pub async fn container(&self) -> Element {
        self.lock().await.container.clone()
    }

    /// Returns the container serialized as HTML.
    pub async fn html(&self) -> String {
        self.lock().await.container.to_html()
    }

    /// Returns a snapshot of the navigation state.
    pub async fn navigation(&self) -> NavigationState {
        self.lock().await.navigation.clone()
    }

    /// Returns the descriptor of the latest render cycle.
    pub async fn descriptor(&self) -> GridDescriptor {
        self.lock().await.descriptor.clone()
    }

    async fn lock(&self) -> MutexGuard<'_, GridState> {
        self.inner.state.lock().await
    }

    /// Issues a request: resolves filters, builds the query and enters the
    /// loading state. Must be called with the lock held.
    fn begin(&self, state: &mut GridState, kind: RequestKind, explicit_filters: Option<Vec<FilterEntry>>) -> PendingRequest {
        let host = self.inner.host.as_ref();
        state.latest_request += 1;

        let limit = state.descriptor.limit;
        let cursor = match kind {
            RequestKind::Page(page) => Cursor::page(page, limit),
            RequestKind::Scroll { .. } => Cursor {
                offset: state.navigation.scroll.offset,
                limit,
            },
        };
        let filters = resolve_filters(&state.descriptor, host, explicit_filters);
        let params = build_query(filters, cursor, &state.navigation.sort);

        log::debug!(
            "request #{} {:?} offset={} limit={}",
            state.latest_request,
            kind,
            cursor.offset,
            cursor.limit
        );

        self.set_loading(state, kind, true);

        PendingRequest {
            sequence: state.latest_request,
            kind,
            endpoint_url: state.descriptor.endpoint_url.clone(),
            limit,
            params,
        }
    }

    /// Awaits the response and applies it if the request is still the latest.
    async fn run(&self, pending: PendingRequest) -> Result<Outcome, Error> {
        let result = self
            .inner
            .transport
            .fetch(&pending.endpoint_url, &pending.params)
            .await;

        let mut state = self.lock().await;
        if pending.sequence != state.latest_request {
            log::debug!(
                "discarding response #{} (latest is #{})",
                pending.sequence,
                state.latest_request
            );
            return Ok(Outcome::Superseded);
        }

        let payload = match result {
            Ok(payload) => payload,
            Err(e) => {
                log::error!("request #{} failed: {e}", pending.sequence);
                self.fail(&mut state, pending.kind);
                return Err(e.into());
            }
        };

        let descriptor = match resolve_descriptor(&self.inner.defaults, &self.inner.options, payload.descriptor.as_ref()) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                log::error!("invalid descriptor override in response #{}: {e}", pending.sequence);
                self.fail(&mut state, pending.kind);
                return Err(e.into());
            }
        };

        if payload.len() as u64 > pending.limit {
            log::warn!(
                "response #{} has {} rows, more than the limit of {}",
                pending.sequence,
                payload.len(),
                pending.limit
            );
        }

        if let Some(selector) = &descriptor.count_target_selector {
            self.inner.host.set_count(selector, payload.count);
        }

        match pending.kind {
            RequestKind::Page(page) => self.apply_page(&mut state, &descriptor, &payload, page),
            RequestKind::Scroll { reset } => self.apply_scroll(&mut state, &descriptor, &payload, reset, pending.limit),
        }

        // Leave the loading state through the descriptor that entered it.
        self.set_loading(&mut state, pending.kind, false);
        state.descriptor = descriptor;
        self.inner.host.container_updated(&state.container);

        log::debug!("request #{} rendered {} rows", pending.sequence, payload.len());
        Ok(Outcome::Rendered)
    }

    /// Restores interactive state after the latest request failed.
    fn fail(&self, state: &mut GridState, kind: RequestKind) {
        self.set_loading(state, kind, false);
        state.navigation.status = LoadStatus::Failed;
        self.inner.host.container_updated(&state.container);
    }

    /// Enters or leaves the loading state: controls, loader and readiness.
    fn set_loading(&self, state: &mut GridState, kind: RequestKind, loading: bool) {
        let host = self.inner.host.as_ref();

        if let Some(controls) = state.descriptor.controls() {
            host.set_controls_enabled(controls, !loading);
        }

        match kind {
            RequestKind::Page(_) => {
                if loading {
                    state.navigation.status = LoadStatus::Loading;
                } else if state.navigation.status == LoadStatus::Loading {
                    state.navigation.status = LoadStatus::Idle;
                }
                if let Some(selector) = &state.descriptor.loader_element_selector {
                    host.set_loader_visible(selector, loading);
                    state.container.hidden = loading;
                    if loading {
                        host.container_updated(&state.container);
                    }
                }
            }
            RequestKind::Scroll { .. } => {
                state.navigation.scroll.ready = !loading;
                if loading {
                    state.navigation.status = LoadStatus::Loading;
                } else if state.navigation.status == LoadStatus::Loading {
                    state.navigation.status = LoadStatus::Idle;
                }
            }
        }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid").field("options", &self.inner.options).finish()
    }
}
