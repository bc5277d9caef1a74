use std::cmp::Ordering;

use serde_json::Value;

use super::BinaryOp;
use super::Node;
use super::UnaryOp;
use crate::cell::format_number;
use crate::cell::is_truthy;
use crate::response::Row;

pub(super) fn eval(node: &Node, row: &Row) -> Value {
    match node {
        Node::Literal(value) => value.clone(),
        Node::Field(path) => lookup(row, path),
        Node::Unary(UnaryOp::Not, operand) => Value::Bool(!is_truthy(&eval(operand, row))),
        Node::Unary(UnaryOp::Neg, operand) => match as_f64(&eval(operand, row)) {
            Some(n) => number(-n),
            None => Value::Null,
        },
        Node::And(left, right) => {
            let left = eval(left, row);
            if is_truthy(&left) { eval(right, row) } else { left }
        }
        Node::Or(left, right) => {
            let left = eval(left, row);
            if is_truthy(&left) { left } else { eval(right, row) }
        }
        Node::Conditional {
            condition,
            then,
            otherwise,
        } => {
            if is_truthy(&eval(condition, row)) {
                eval(then, row)
            } else {
                eval(otherwise, row)
            }
        }
        Node::Binary(op, left, right) => binary(*op, eval(left, row), eval(right, row)),
    }
}

fn lookup(row: &Row, path: &[String]) -> Value {
    let Some((first, rest)) = path.split_first() else {
        return Value::Null;
    };
    let Some(mut current) = row.get(first) else {
        if first == "row" && rest.is_empty() {
            return Value::Object(row.clone());
        }
        return Value::Null;
    };
    for segment in rest {
        match current.get(segment.as_str()) {
            Some(next) => current = next,
            None => return Value::Null,
        }
    }
    current.clone()
}

fn binary(op: BinaryOp, left: Value, right: Value) -> Value {
    match op {
        BinaryOp::Add => {
            if left.is_string() || right.is_string() {
                Value::String(to_text(&left) + &to_text(&right))
            } else {
                arithmetic(&left, &right, |a, b| Some(a + b))
            }
        }
        BinaryOp::Sub => arithmetic(&left, &right, |a, b| Some(a - b)),
        BinaryOp::Mul => arithmetic(&left, &right, |a, b| Some(a * b)),
        BinaryOp::Div => arithmetic(&left, &right, |a, b| (b != 0.0).then(|| a / b)),
        BinaryOp::Rem => arithmetic(&left, &right, |a, b| (b != 0.0).then(|| a % b)),
        BinaryOp::Eq => Value::Bool(loose_eq(&left, &right)),
        BinaryOp::Ne => Value::Bool(!loose_eq(&left, &right)),
        BinaryOp::Lt => Value::Bool(compare(&left, &right) == Some(Ordering::Less)),
        BinaryOp::Le => Value::Bool(matches!(
            compare(&left, &right),
            Some(Ordering::Less | Ordering::Equal)
        )),
        BinaryOp::Gt => Value::Bool(compare(&left, &right) == Some(Ordering::Greater)),
        BinaryOp::Ge => Value::Bool(matches!(
            compare(&left, &right),
            Some(Ordering::Greater | Ordering::Equal)
        )),
    }
}

fn arithmetic(left: &Value, right: &Value, f: impl Fn(f64, f64) -> Option<f64>) -> Value {
    match (as_f64(left), as_f64(right)) {
        (Some(a), Some(b)) => f(a, b).map(number).unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

/// Strict equality, except that numbers compare by value (`1 == 1.0`).
fn loose_eq(left: &Value, right: &Value) -> bool {
    match (as_f64(left), as_f64(right)) {
        (Some(a), Some(b)) => a == b,
        _ => left == right,
    }
}

fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(_), Value::Number(_)) => as_f64(left)?.partial_cmp(&as_f64(right)?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    value.as_f64()
}

/// Converts an arithmetic result back to JSON, preferring integers.
pub(super) fn number(n: f64) -> Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

fn to_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
