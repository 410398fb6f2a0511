//! Golden standard loading.
//!
//! Golden standards are JSON documents listing the correct correspondences
//! for a dataset pair:
//!
//! ```json
//! {
//!   "matches": [
//!     {"source_table": "a", "source_column": "id",
//!      "target_table": "b", "target_column": "key"}
//!   ]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use schemabench_model::{ColumnId, GoldenStandard};

use crate::error::{IngestError, Result};

#[derive(Debug, Deserialize)]
struct GoldenStandardFile {
    matches: Vec<ExpectedMatch>,
}

#[derive(Debug, Deserialize)]
struct ExpectedMatch {
    source_table: String,
    source_column: String,
    target_table: String,
    target_column: String,
}

/// Parses a golden standard document; `path` is used for error context only.
pub fn parse_golden_standard(contents: &str, path: &Path) -> Result<GoldenStandard> {
    let file: GoldenStandardFile =
        serde_json::from_str(contents).map_err(|source| IngestError::GoldenStandardParse {
            path: path.to_path_buf(),
            source,
        })?;
    let mut pairs = Vec::with_capacity(file.matches.len());
    for (index, entry) in file.matches.into_iter().enumerate() {
        let entry_error = |source| IngestError::GoldenStandardEntry {
            path: path.to_path_buf(),
            index,
            source,
        };
        let source = ColumnId::new(entry.source_table, entry.source_column).map_err(entry_error)?;
        let target = ColumnId::new(entry.target_table, entry.target_column).map_err(entry_error)?;
        pairs.push((source, target));
    }
    Ok(pairs.into_iter().collect())
}

/// Loads the golden standard at `path`.
pub fn load_golden_standard(path: &Path) -> Result<GoldenStandard> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let golden = parse_golden_standard(&contents, path)?;
    debug!(path = %path.display(), expected = golden.len(), "loaded golden standard");
    Ok(golden)
}
