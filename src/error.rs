//! Errors raised at the boundary of the comparator
//!
//! Check failures are never errors: they are reported as `CheckResult`s.
//! The variants here cover inputs the checks cannot run on at all.

use thiserror::Error;

/// Which side of the comparison a dataset came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Source => write!(f, "source"),
            Side::Target => write!(f, "target"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// The primary key column does not exist in one of the datasets
    #[error("primary key column '{column}' not found in {side} data")]
    MissingPrimaryKey { column: String, side: Side },

    /// A comparator was requested before `Session::initialize` ran
    #[error("session is not initialized, call Session::initialize first")]
    SessionNotInitialized,

    /// Columns handed to `Dataset::from_columns` have different lengths
    #[error("column '{column}' has {actual} values, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// A check parameter has the wrong shape or an out-of-range value
    #[error("invalid parameter '{name}' for {check}: {reason}")]
    InvalidParameter {
        check: String,
        name: String,
        reason: String,
    },

    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),
}

pub type Result<T> = std::result::Result<T, Error>;
