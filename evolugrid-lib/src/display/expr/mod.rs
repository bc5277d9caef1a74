//! Closed expression language for server-driven cell display.
//!
//! An expression reads fields of the row and combines them with literals and
//! a handful of operators. It cannot call functions or reach anything outside
//! the row it is evaluated against.
//!
//! ```text
//! status == "late" ? "<b>" + title + "</b>" : title
//! price * quantity
//! customer.name || "(anonymous)"
//! ```
//!
//! Semantics follow JavaScript where it matters for display: `+` concatenates
//! as soon as one side is a string, `&&` and `||` return one of their
//! operands, and `null`, `false`, `0`, `""` and missing fields are falsy.

mod eval;
mod lexer;
mod parser;

use serde_json::Value;

use crate::response::Row;

/// A compiled display expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    source: String,
    root: Node,
}

impl Expr {
    /// Parses an expression.
    ///
    /// # Example
    ///
    /// ```
    /// use evolugrid_lib::display::Expr;
    /// use serde_json::json;
    ///
    /// let expr = Expr::parse("first + ' ' + last").unwrap();
    /// let row = json!({"first": "Ada", "last": "Lovelace"});
    /// assert_eq!(expr.eval(row.as_object().unwrap()), json!("Ada Lovelace"));
    /// ```
    pub fn parse(source: &str) -> Result<Self, ExprError> {
        let tokens = lexer::tokenize(source)?;
        let root = parser::Parser::new(tokens).parse()?;
        Ok(Self {
            source: source.to_string(),
            root,
        })
    }

    /// Evaluates the expression against a row.
    pub fn eval(&self, row: &Row) -> Value {
        eval::eval(&self.root, row)
    }

    /// Returns the source text this expression was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Expression parse error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message} at position {position}")]
pub struct ExprError {
    /// Byte offset into the source.
    pub position: usize,
    /// What went wrong.
    pub message: String,
}

impl ExprError {
    pub(crate) fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

/// Syntax tree node.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Literal(Value),
    /// Dotted path into the row; the first segment is a top-level field.
    Field(Vec<String>),
    Unary(UnaryOp, Box<Node>),
    Binary(BinaryOp, Box<Node>, Box<Node>),
    And(Box<Node>, Box<Node>),
    Or(Box<Node>, Box<Node>),
    Conditional {
        condition: Box<Node>,
        then: Box<Node>,
        otherwise: Box<Node>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnaryOp {
    Not,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}
