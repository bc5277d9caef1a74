//! Display logic for columns.
//!
//! Columns never carry executable text. Custom rendering is either a
//! function registered with the grid options under a name, or an expression
//! in a small closed language (see [`expr`]) that can only read row fields.

pub mod expr;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::response::Row;

pub use expr::Expr;
pub use expr::ExprError;

/// A display function: row in, renderable value out.
pub type DisplayFn = Arc<dyn Fn(&Row) -> Value + Send + Sync>;

/// Display functions available to column descriptors, by name.
///
/// # Example
///
/// ```
/// use evolugrid_lib::display::DisplayRegistry;
/// use serde_json::json;
///
/// let mut registry = DisplayRegistry::new();
/// registry.register("upper_name", |row| {
///     json!(row.get("name").and_then(|v| v.as_str()).unwrap_or_default().to_uppercase())
/// });
/// assert!(registry.get("upper_name").is_some());
/// ```
#[derive(Clone, Default)]
pub struct DisplayRegistry {
    functions: HashMap<String, DisplayFn>,
}

impl DisplayRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a function under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(&Row) -> Value + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Arc::new(function));
    }

    /// Looks up a function by name.
    pub fn get(&self, name: &str) -> Option<DisplayFn> {
        self.functions.get(name).cloned()
    }

    /// Returns the registered names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }
}

impl fmt::Debug for DisplayRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("DisplayRegistry").field("functions", &names).finish()
    }
}
