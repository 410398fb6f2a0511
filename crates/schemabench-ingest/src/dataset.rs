//! Dataset loaders: resolve a configured file into a [`DatasetRef`].

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::debug;

use schemabench_model::DatasetRef;

use crate::error::{IngestError, Result};

/// Arguments shared by the file-backed loaders.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetArgs {
    /// Path to the dataset file.
    pub data_path: PathBuf,
    /// Table name override; defaults to the file stem.
    #[serde(default)]
    pub table_name: Option<String>,
}

/// Derives the owning table name from a dataset path (its file stem).
pub fn table_name_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map_or_else(|| path.display().to_string(), str::to_string)
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn ensure_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Reads the header row of a CSV file.
///
/// Leading blank rows are skipped; the first non-blank row is the header.
pub fn read_csv_header(path: &Path) -> Result<Vec<String>> {
    ensure_file(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        let headers: Vec<String> = record.iter().map(normalize_header).collect();
        if headers.iter().all(String::is_empty) {
            continue;
        }
        return Ok(headers);
    }
    Err(IngestError::EmptyCsv {
        path: path.to_path_buf(),
    })
}

fn dataset_ref(args: &DatasetArgs) -> DatasetRef {
    let table_name = args
        .table_name
        .clone()
        .unwrap_or_else(|| table_name_from_path(&args.data_path));
    DatasetRef::new(args.data_path.clone(), table_name)
}

/// Loads a CSV dataset, recording its header columns.
pub fn load_csv_dataset(args: &DatasetArgs) -> Result<DatasetRef> {
    let columns = read_csv_header(&args.data_path)?;
    let dataset = dataset_ref(args).with_columns(columns);
    debug!(
        path = %dataset.path.display(),
        table = %dataset.table_name,
        column_count = dataset.columns.len(),
        "loaded csv dataset"
    );
    Ok(dataset)
}

/// Loads a dataset reference without reading the file's contents.
pub fn load_file_dataset(args: &DatasetArgs) -> Result<DatasetRef> {
    ensure_file(&args.data_path)?;
    let dataset = dataset_ref(args);
    debug!(
        path = %dataset.path.display(),
        table = %dataset.table_name,
        "loaded dataset reference"
    );
    Ok(dataset)
}
