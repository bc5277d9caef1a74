//! Grid descriptor: the merged configuration driving every operation.
//!
//! A descriptor is resolved from three JSON layers, later layers winning:
//! the built-in [`defaults`], the instance [`GridOptions`], and the override
//! a server may return with each response. Resolution always starts again
//! from the layers; a descriptor is never patched in place.

mod column;
mod merge;
mod options;

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use serde_json::json;

use crate::error::ConfigError;
use crate::filter::FilterCallback;
use crate::host::Controls;

pub use column::Column;
pub use column::ColumnDisplay;
pub use column::ColumnSpec;
pub use merge::deep_merge;
pub use options::GridOptions;

/// Page size used when no layer sets one.
pub const DEFAULT_LIMIT: u64 = 100;

/// Selector receiving the total count when no layer sets one.
pub const DEFAULT_COUNT_TARGET: &str = "#count";

/// Key of the endpoint URL, which only the instance options may set.
pub(crate) const ENDPOINT_URL_KEY: &str = "endpointUrl";

/// Built-in defaults, the first configuration layer.
pub fn defaults() -> Value {
    json!({
        "limit": DEFAULT_LIMIT,
        "exportCsv": true,
        "loadOnInit": true,
        "infiniteScroll": false,
        "countTargetSelector": DEFAULT_COUNT_TARGET,
    })
}

/// Configuration for one render cycle of a grid instance.
#[derive(Clone)]
pub struct GridDescriptor {
    /// Data endpoint; fixed at initialization.
    pub endpoint_url: String,
    /// CSS classes of the table element, space separated.
    pub table_classes: Option<String>,
    /// Maximum number of rows per request.
    pub limit: u64,
    /// Id given to the pager element.
    pub pager_target_id: Option<String>,
    /// Columns, in display order. Never empty.
    pub columns: Vec<Column>,
    /// Whether the pager offers CSV export.
    pub export_csv: bool,
    /// Whether the first page loads during initialization.
    pub load_on_init: bool,
    /// Row field whose value becomes the row's CSS class.
    pub row_class_field: Option<String>,
    /// Loader element shown while a page loads.
    pub loader_element_selector: Option<String>,
    /// Infinite scroll instead of discrete pages.
    pub infinite_scroll: bool,
    /// Element receiving the total count.
    pub count_target_selector: Option<String>,
    /// Filter form serialized into filters.
    pub filter_form_selector: Option<String>,
    /// Submit trigger of the filter form.
    pub filter_submit_selector: Option<String>,
    /// Callback producing filters; consulted before the form.
    pub filter_callback: Option<FilterCallback>,
}

impl GridDescriptor {
    /// Returns the controls disabled while a request is in flight.
    ///
    /// The dedicated submit trigger when one is configured, otherwise every
    /// button of the filter form.
    pub fn controls(&self) -> Option<Controls<'_>> {
        if let Some(selector) = &self.filter_submit_selector {
            Some(Controls::SubmitButton(selector.as_str()))
        } else {
            self.filter_form_selector.as_deref().map(Controls::FormButtons)
        }
    }
}

impl fmt::Debug for GridDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridDescriptor")
            .field("endpoint_url", &self.endpoint_url)
            .field("table_classes", &self.table_classes)
            .field("limit", &self.limit)
            .field("pager_target_id", &self.pager_target_id)
            .field("columns", &self.columns)
            .field("export_csv", &self.export_csv)
            .field("load_on_init", &self.load_on_init)
            .field("row_class_field", &self.row_class_field)
            .field("loader_element_selector", &self.loader_element_selector)
            .field("infinite_scroll", &self.infinite_scroll)
            .field("count_target_selector", &self.count_target_selector)
            .field("filter_form_selector", &self.filter_form_selector)
            .field("filter_submit_selector", &self.filter_submit_selector)
            .field("filter_callback", &self.filter_callback.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Shape of the merged JSON before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDescriptor {
    endpoint_url: Option<String>,
    table_classes: Option<String>,
    limit: Option<u64>,
    pager_target_id: Option<String>,
    columns: Option<Vec<ColumnSpec>>,
    export_csv: Option<bool>,
    load_on_init: Option<bool>,
    row_class_field: Option<String>,
    loader_element_selector: Option<String>,
    infinite_scroll: Option<bool>,
    count_target_selector: Option<String>,
    filter_form_selector: Option<String>,
    filter_submit_selector: Option<String>,
}

/// Resolves the descriptor for one render cycle.
///
/// Merges `defaults`, the instance options and the optional server override,
/// then validates the result. The override cannot change `endpointUrl`; the
/// key is dropped with a warning.
///
/// # Example
///
/// ```
/// use evolugrid_lib::descriptor::{defaults, resolve_descriptor, ColumnSpec, GridOptions};
/// use serde_json::json;
///
/// let options = GridOptions::new("/items").columns(vec![ColumnSpec::field("Id", "id")]);
/// let descriptor = resolve_descriptor(&defaults(), &options, Some(&json!({"limit": 10}))).unwrap();
/// assert_eq!(descriptor.limit, 10);
/// assert_eq!(descriptor.endpoint_url, "/items");
/// ```
pub fn resolve_descriptor(
    defaults: &Value,
    options: &GridOptions,
    server_override: Option<&Value>,
) -> Result<GridDescriptor, ConfigError> {
    let mut merged = defaults.clone();
    deep_merge(&mut merged, options.settings());

    if let Some(server_override) = server_override {
        let mut layer = match server_override {
            Value::Object(map) => map.clone(),
            Value::Null => serde_json::Map::new(),
            _ => return Err(ConfigError::Invalid("descriptor override must be an object".into())),
        };
        if layer.remove(ENDPOINT_URL_KEY).is_some() {
            log::warn!("ignoring {ENDPOINT_URL_KEY} in server descriptor override");
        }
        deep_merge(&mut merged, Value::Object(layer));
    }

    let raw: RawDescriptor =
        serde_json::from_value(merged).map_err(|e| ConfigError::Invalid(e.to_string()))?;

    let endpoint_url = raw
        .endpoint_url
        .filter(|url| !url.is_empty())
        .ok_or(ConfigError::MissingField(ENDPOINT_URL_KEY))?;

    let specs = raw
        .columns
        .filter(|columns| !columns.is_empty())
        .ok_or(ConfigError::MissingField("columns"))?;

    let limit = raw.limit.unwrap_or(DEFAULT_LIMIT);
    if limit == 0 {
        return Err(ConfigError::ZeroLimit);
    }

    let columns = specs
        .into_iter()
        .enumerate()
        .map(|(index, spec)| Column::compile(index, spec, options.display_functions()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GridDescriptor {
        endpoint_url,
        table_classes: raw.table_classes,
        limit,
        pager_target_id: raw.pager_target_id,
        columns,
        export_csv: raw.export_csv.unwrap_or(true),
        load_on_init: raw.load_on_init.unwrap_or(true),
        row_class_field: raw.row_class_field,
        loader_element_selector: raw.loader_element_selector,
        infinite_scroll: raw.infinite_scroll.unwrap_or(false),
        count_target_selector: raw.count_target_selector,
        filter_form_selector: raw.filter_form_selector,
        filter_submit_selector: raw.filter_submit_selector,
        filter_callback: options.filter_callback_ref().cloned(),
    })
}
