//! Instance options for a grid.

use std::fmt;
use std::sync::Arc;

use serde_json::Map;
use serde_json::Value;

use super::ColumnSpec;
use super::GridDescriptor;
use super::ENDPOINT_URL_KEY;
use super::defaults;
use super::resolve_descriptor;
use crate::display::DisplayRegistry;
use crate::error::ConfigError;
use crate::filter::FilterCallback;
use crate::filter::FilterEntry;
use crate::response::Row;

/// Options for one grid instance, the second configuration layer.
///
/// The JSON settings use the same camelCase keys a server override uses, so
/// options can be loaded from a file with [`GridOptions::from_json`] or built
/// in code. The filter callback and display functions are not JSON and live
/// beside the settings.
///
/// # Example
///
/// ```
/// use evolugrid_lib::descriptor::{ColumnSpec, GridOptions};
/// use serde_json::json;
///
/// let options = GridOptions::new("/api/orders")
///     .limit(25)
///     .table_classes("table striped")
///     .filter_form_selector("#search")
///     .display_function("money", |row| json!(format!("${}", row["total"])))
///     .columns(vec![
///         ColumnSpec::field("Order", "id").sortable(),
///         ColumnSpec::function("Total", "money").with_field_key("total").sortable(),
///     ]);
///
/// let descriptor = options.resolve().unwrap();
/// assert_eq!(descriptor.limit, 25);
/// ```
#[derive(Clone, Default)]
pub struct GridOptions {
    settings: Map<String, Value>,
    filter_callback: Option<FilterCallback>,
    display_functions: DisplayRegistry,
}

impl GridOptions {
    /// Creates options for a grid fetching from `endpoint_url`.
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self::default().set(ENDPOINT_URL_KEY, Value::String(endpoint_url.into()))
    }

    /// Creates options from a JSON object of settings.
    pub fn from_json(settings: Value) -> Result<Self, ConfigError> {
        match settings {
            Value::Object(settings) => Ok(Self {
                settings,
                ..Default::default()
            }),
            _ => Err(ConfigError::Invalid("grid options must be a JSON object".into())),
        }
    }

    /// Sets a raw setting by its JSON key.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Sets the columns.
    pub fn columns(self, columns: Vec<ColumnSpec>) -> Self {
        let columns = columns.iter().map(ColumnSpec::to_value).collect::<Vec<_>>();
        self.set("columns", Value::Array(columns))
    }

    /// Sets the page size.
    pub fn limit(self, limit: u64) -> Self {
        self.set("limit", limit)
    }

    /// Sets the CSS classes of the table.
    pub fn table_classes(self, classes: impl Into<String>) -> Self {
        self.set("tableClasses", Value::String(classes.into()))
    }

    /// Sets the id of the pager element.
    pub fn pager_target_id(self, id: impl Into<String>) -> Self {
        self.set("pagerTargetId", Value::String(id.into()))
    }

    /// Enables or disables the CSV export trigger.
    pub fn export_csv(self, enabled: bool) -> Self {
        self.set("exportCsv", enabled)
    }

    /// Controls whether the first page loads during initialization.
    pub fn load_on_init(self, enabled: bool) -> Self {
        self.set("loadOnInit", enabled)
    }

    /// Sets the row field used as the row's CSS class.
    pub fn row_class_field(self, field: impl Into<String>) -> Self {
        self.set("rowClassField", Value::String(field.into()))
    }

    /// Sets the loader element toggled while a page loads.
    pub fn loader_element_selector(self, selector: impl Into<String>) -> Self {
        self.set("loaderElementSelector", Value::String(selector.into()))
    }

    /// Switches between infinite scroll and discrete paging.
    pub fn infinite_scroll(self, enabled: bool) -> Self {
        self.set("infiniteScroll", enabled)
    }

    /// Sets the element receiving the total count.
    pub fn count_target_selector(self, selector: impl Into<String>) -> Self {
        self.set("countTargetSelector", Value::String(selector.into()))
    }

    /// Sets the filter form.
    pub fn filter_form_selector(self, selector: impl Into<String>) -> Self {
        self.set("filterFormSelector", Value::String(selector.into()))
    }

    /// Sets the submit trigger of the filter form.
    pub fn filter_submit_selector(self, selector: impl Into<String>) -> Self {
        self.set("filterSubmitSelector", Value::String(selector.into()))
    }

    /// Sets the filter callback, consulted before the filter form.
    pub fn filter_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn() -> Vec<FilterEntry> + Send + Sync + 'static,
    {
        self.filter_callback = Some(Arc::new(callback));
        self
    }

    /// Registers a display function columns can refer to by name.
    pub fn display_function<F>(mut self, name: impl Into<String>, function: F) -> Self
    where
        F: Fn(&Row) -> Value + Send + Sync + 'static,
    {
        self.display_functions.register(name, function);
        self
    }

    /// Replaces the display function registry.
    pub fn display_registry(mut self, registry: DisplayRegistry) -> Self {
        self.display_functions = registry;
        self
    }

    /// Returns the JSON settings layer.
    pub fn settings(&self) -> Value {
        Value::Object(self.settings.clone())
    }

    /// Returns the filter callback, if any.
    pub fn filter_callback_ref(&self) -> Option<&FilterCallback> {
        self.filter_callback.as_ref()
    }

    /// Returns the display function registry.
    pub fn display_functions(&self) -> &DisplayRegistry {
        &self.display_functions
    }

    /// Resolves these options over the built-in defaults.
    pub fn resolve(&self) -> Result<GridDescriptor, ConfigError> {
        resolve_descriptor(&defaults(), self, None)
    }
}

impl fmt::Debug for GridOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridOptions")
            .field("settings", &self.settings)
            .field("filter_callback", &self.filter_callback.as_ref().map(|_| ".."))
            .field("display_functions", &self.display_functions)
            .finish()
    }
}
