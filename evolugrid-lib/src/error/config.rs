//! Configuration error types

use crate::display::ExprError;

/// Errors raised while resolving a grid descriptor.
///
/// These are fatal at initialization: no grid is returned and nothing is
/// rendered.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A required field is absent after the merge.
    #[error("Missing required descriptor field: {0}")]
    MissingField(&'static str),

    /// A descriptor field has the wrong shape.
    #[error("Invalid descriptor: {0}")]
    Invalid(String),

    /// `limit` must be a positive integer.
    #[error("Descriptor limit must be positive")]
    ZeroLimit,

    /// A column could not be compiled.
    #[error("Column {index} ({title:?}): {reason}")]
    Column {
        /// Position of the column in the descriptor.
        index: usize,
        /// Column title, for diagnostics.
        title: String,
        /// What was wrong with it.
        reason: ColumnErrorReason,
    },
}

/// Why a column descriptor was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColumnErrorReason {
    /// Neither `fieldKey`, `displayFn` nor `displayExpression` is set.
    #[error("no fieldKey, displayFn or displayExpression")]
    NoDisplay,

    /// Both `displayFn` and `displayExpression` are set.
    #[error("displayFn and displayExpression are mutually exclusive")]
    AmbiguousDisplay,

    /// `displayFn` names a function that was never registered.
    #[error("unknown display function {0:?}")]
    UnknownFunction(String),

    /// The column is sortable but has no field to sort on.
    #[error("sortable column needs a fieldKey")]
    SortWithoutField,

    /// `displayExpression` failed to parse.
    #[error("invalid display expression: {0}")]
    Expression(#[from] ExprError),
}

impl ConfigError {
    pub(crate) fn column(index: usize, title: impl Into<String>, reason: impl Into<ColumnErrorReason>) -> Self {
        Self::Column {
            index,
            title: title.into(),
            reason: reason.into(),
        }
    }
}
