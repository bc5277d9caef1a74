//! Column descriptors.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::display::DisplayFn;
use crate::display::DisplayRegistry;
use crate::display::Expr;
use crate::error::ColumnErrorReason;
use crate::error::ConfigError;

/// A column as written in grid options or a server descriptor.
///
/// # Example
///
/// ```
/// use evolugrid_lib::descriptor::ColumnSpec;
///
/// let columns = vec![
///     ColumnSpec::field("Name", "name").sortable(),
///     ColumnSpec::function("Price", "money").with_field_key("price").sortable(),
///     ColumnSpec::expression("Total", "price * qty"),
/// ];
/// # assert_eq!(columns.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    /// Header content, rendered as HTML.
    #[serde(default)]
    pub title: String,
    /// Data field read by the column, also its sort key.
    #[serde(default)]
    pub field_key: Option<String>,
    /// Name of a registered display function.
    #[serde(default)]
    pub display_fn: Option<String>,
    /// Display expression source.
    #[serde(default)]
    pub display_expression: Option<String>,
    /// Whether the header gets sort triggers.
    #[serde(default)]
    pub sortable: bool,
}

impl ColumnSpec {
    /// A column showing a data field.
    pub fn field(title: impl Into<String>, field_key: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            field_key: Some(field_key.into()),
            ..Default::default()
        }
    }

    /// A column rendered by a registered display function.
    pub fn function(title: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            display_fn: Some(name.into()),
            ..Default::default()
        }
    }

    /// A column rendered by a display expression.
    pub fn expression(title: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            display_expression: Some(source.into()),
            ..Default::default()
        }
    }

    /// Sets the field key (the sort key for function and expression columns).
    pub fn with_field_key(mut self, field_key: impl Into<String>) -> Self {
        self.field_key = Some(field_key.into());
        self
    }

    /// Marks the column as sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Converts the column to its JSON configuration form.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("title".to_string(), Value::String(self.title.clone()));
        let optional = [
            ("fieldKey", &self.field_key),
            ("displayFn", &self.display_fn),
            ("displayExpression", &self.display_expression),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                map.insert(key.to_string(), Value::String(value.clone()));
            }
        }
        map.insert("sortable".to_string(), Value::Bool(self.sortable));
        Value::Object(map)
    }
}

/// How a column turns a row into a value. Exactly one case is active.
#[derive(Clone)]
pub enum ColumnDisplay {
    /// Read a field of the row.
    Field(String),
    /// Call a registered display function.
    Function(DisplayFn),
    /// Evaluate a compiled display expression.
    Expression(Arc<Expr>),
}

impl fmt::Debug for ColumnDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(key) => f.debug_tuple("Field").field(key).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
            Self::Expression(expr) => f.debug_tuple("Expression").field(&expr.source()).finish(),
        }
    }
}

/// A validated column.
#[derive(Debug, Clone)]
pub struct Column {
    /// Header content, rendered as HTML.
    pub title: String,
    /// Data field, if any.
    pub field_key: Option<String>,
    /// Display logic.
    pub display: ColumnDisplay,
    /// Whether the header gets sort triggers.
    pub sortable: bool,
}

impl Column {
    /// Validates a [`ColumnSpec`] and compiles its display logic.
    ///
    /// `displayExpression` takes precedence over `displayFn`, which takes
    /// precedence over `fieldKey`. Setting both an expression and a function
    /// is rejected.
    pub fn compile(index: usize, spec: ColumnSpec, registry: &DisplayRegistry) -> Result<Self, ConfigError> {
        let fail = |reason: ColumnErrorReason| ConfigError::column(index, spec.title.clone(), reason);

        if spec.sortable && spec.field_key.is_none() {
            return Err(fail(ColumnErrorReason::SortWithoutField));
        }

        let display = match (&spec.display_expression, &spec.display_fn, &spec.field_key) {
            (Some(_), Some(_), _) => return Err(fail(ColumnErrorReason::AmbiguousDisplay)),
            (Some(source), None, _) => {
                let expr = Expr::parse(source).map_err(|e| fail(e.into()))?;
                ColumnDisplay::Expression(Arc::new(expr))
            }
            (None, Some(name), _) => match registry.get(name) {
                Some(function) => ColumnDisplay::Function(function),
                None => return Err(fail(ColumnErrorReason::UnknownFunction(name.clone()))),
            },
            (None, None, Some(key)) => ColumnDisplay::Field(key.clone()),
            (None, None, None) => return Err(fail(ColumnErrorReason::NoDisplay)),
        };

        Ok(Self {
            title: spec.title,
            field_key: spec.field_key,
            display,
            sortable: spec.sortable,
        })
    }

    /// Returns the key sent as `sort_key` when this column is sorted.
    pub fn sort_key(&self) -> Option<&str> {
        self.field_key.as_deref()
    }
}
