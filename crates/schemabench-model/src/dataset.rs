use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Location of a tabular dataset and the table it represents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRef {
    pub path: PathBuf,
    pub table_name: String,
    /// Header columns, when the loader read the file.
    #[serde(default)]
    pub columns: Vec<String>,
}

impl DatasetRef {
    pub fn new(path: impl Into<PathBuf>, table_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            table_name: table_name.into(),
            columns: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = columns;
        self
    }
}
