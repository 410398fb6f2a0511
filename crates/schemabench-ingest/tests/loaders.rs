use std::fs;

use schemabench_ingest::{IngestError, load_dataset, load_golden_standard};
use schemabench_model::ColumnId;

#[test]
fn csv_loader_reads_header_and_table_name() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("customers.csv");
    fs::write(&path, "\n id , Full  Name,email\n1,Ada,a@x\n").expect("write csv");

    let dataset = load_dataset("csv", &serde_json::json!({ "data_path": path })).expect("load");

    assert_eq!(dataset.table_name, "customers");
    assert_eq!(dataset.columns, vec!["id", "Full Name", "email"]);
    assert_eq!(dataset.path, path);
}

#[test]
fn table_name_override_wins() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("source.csv");
    fs::write(&path, "a,b\n").expect("write csv");

    let dataset = load_dataset(
        "file",
        &serde_json::json!({ "data_path": path, "table_name": "Table1" }),
    )
    .expect("load");

    assert_eq!(dataset.table_name, "Table1");
    assert!(dataset.columns.is_empty());
}

#[test]
fn missing_and_empty_files_are_errors() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let missing = dir.path().join("missing.csv");
    let err = load_dataset("csv", &serde_json::json!({ "data_path": missing })).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));

    let empty = dir.path().join("empty.csv");
    fs::write(&empty, "\n\n").expect("write csv");
    let err = load_dataset("csv", &serde_json::json!({ "data_path": empty })).unwrap_err();
    assert!(matches!(err, IngestError::EmptyCsv { .. }));
}

#[test]
fn golden_standard_loads_pairs() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("golden.json");
    fs::write(
        &path,
        r#"{"matches": [
            {"source_table": "s", "source_column": "id", "target_table": "t", "target_column": "key"},
            {"source_table": "s", "source_column": "name", "target_table": "t", "target_column": "label"}
        ]}"#,
    )
    .expect("write golden standard");

    let golden = load_golden_standard(&path).expect("load golden standard");

    assert_eq!(golden.len(), 2);
    assert!(golden.contains(
        &ColumnId::new("s", "id").unwrap(),
        &ColumnId::new("t", "key").unwrap()
    ));
}

#[test]
fn golden_standard_missing_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let err = load_golden_standard(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}
