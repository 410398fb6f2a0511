//! Name-to-constructor table for dataset loaders.

use serde::Deserialize;
use serde_json::Value;

use schemabench_model::DatasetRef;

use crate::dataset::{DatasetArgs, load_csv_dataset, load_file_dataset};
use crate::error::{IngestError, Result};

/// Constructor signature shared by every registered loader.
pub type LoaderFn = fn(&str, &Value) -> Result<DatasetRef>;

const LOADERS: &[(&str, LoaderFn)] = &[("csv", csv_loader), ("file", file_loader)];

fn parse_args(loader: &str, args: &Value) -> Result<DatasetArgs> {
    DatasetArgs::deserialize(args).map_err(|source| IngestError::InvalidArgs {
        loader: loader.to_string(),
        source,
    })
}

fn csv_loader(name: &str, args: &Value) -> Result<DatasetRef> {
    load_csv_dataset(&parse_args(name, args)?)
}

fn file_loader(name: &str, args: &Value) -> Result<DatasetRef> {
    load_file_dataset(&parse_args(name, args)?)
}

/// Names of all registered loaders, in registration order.
pub fn loader_names() -> Vec<&'static str> {
    LOADERS.iter().map(|(name, _)| *name).collect()
}

/// Looks up a loader by name without running it.
pub fn resolve_loader(name: &str) -> Result<LoaderFn> {
    LOADERS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, loader)| *loader)
        .ok_or_else(|| IngestError::UnknownLoader {
            name: name.to_string(),
            known: loader_names().join(", "),
        })
}

/// Resolves and runs the named loader.
pub fn load_dataset(name: &str, args: &Value) -> Result<DatasetRef> {
    let loader = resolve_loader(name)?;
    loader(name, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_loader_lists_known_names() {
        let err = resolve_loader("parquet").unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnknownLoader { ref name, ref known }
                if name == "parquet" && known == "csv, file"
        ));
    }

    #[test]
    fn invalid_args_are_reported_per_loader() {
        let err = load_dataset("csv", &serde_json::json!({"path": "a.csv"})).unwrap_err();
        assert!(matches!(err, IngestError::InvalidArgs { ref loader, .. } if loader == "csv"));
    }
}
