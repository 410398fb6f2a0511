//! Two-level `(table, column)` identity shared by match sets and golden standards.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// A column qualified by the table that owns it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColumnId {
    pub table: String,
    pub column: String,
}

impl ColumnId {
    /// Creates an identifier, rejecting empty table or column names.
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Result<Self> {
        let table = table.into();
        let column = column.into();
        if table.is_empty() {
            return Err(ModelError::EmptyIdentifier { field: "table" });
        }
        if column.is_empty() {
            return Err(ModelError::EmptyIdentifier { field: "column" });
        }
        Ok(Self { table, column })
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// Key of a correspondence: source column paired with target column.
pub type ColumnPair = (ColumnId, ColumnId);
