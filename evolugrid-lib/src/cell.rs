//! Cell value resolution.

use serde_json::Number;
use serde_json::Value;

use crate::descriptor::Column;
use crate::descriptor::ColumnDisplay;
use crate::response::Row;

/// Resolves the rendered content of one cell, `None` for an empty cell.
///
/// The column's display variant decides how the value is obtained: a compiled
/// expression or a registered function is invoked with the row, a field
/// column reads `row[field_key]`. The result then goes through
/// [`render_value`].
pub fn resolve_cell(row: &Row, column: &Column) -> Option<String> {
    match &column.display {
        ColumnDisplay::Expression(expr) => render_value(&expr.eval(row)),
        ColumnDisplay::Function(function) => render_value(&function(row)),
        ColumnDisplay::Field(key) => row.get(key).and_then(render_value),
    }
}

/// Renders a resolved value as cell HTML.
///
/// Numeric zero renders as `"0"`. Every other falsy value (null, `false`,
/// the empty string) renders as an empty cell.
pub fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) if is_zero(n) => Some("0".to_string()),
        value if !is_truthy(value) => None,
        Value::Number(n) => Some(format_number(n)),
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// JavaScript truthiness for JSON values.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => !is_zero(n),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn is_zero(n: &Number) -> bool {
    n.as_f64() == Some(0.0)
}

/// Formats a number the way a browser would print it.
///
/// Integral floats lose their fractional part (`2.0` prints as `2`).
pub fn format_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}
