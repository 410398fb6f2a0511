//! End-to-end runs of the COMA matcher against stand-in launcher scripts.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use schemabench_match::{Coma, ComaConfig, MatchError, Matcher};
use schemabench_model::{ColumnId, DatasetRef};

/// Writes a shell script that stands in for `java`; `$out` holds the output path.
fn fake_java(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-java");
    let script = format!(
        "#!/bin/sh\n\
         for arg in \"$@\"; do\n\
           case \"$arg\" in\n\
             -DoutputFile=*) out=\"${{arg#-DoutputFile=}}\" ;;\n\
           esac\n\
         done\n\
         {body}\n"
    );
    fs::write(&path, script).expect("write script");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod script");
    path
}

fn coma(dir: &Path, body: &str, timeout_secs: u64) -> Coma {
    Coma::new(ComaConfig {
        java: fake_java(dir, body),
        scratch_dir: Some(dir.join("scratch")),
        timeout_secs,
        ..ComaConfig::default()
    })
}

/// Number of entries left in the configured scratch directory.
fn leftover_scratch(matcher: &Coma) -> usize {
    let dir = matcher.config().scratch_dir.as_deref().expect("scratch dir");
    fs::read_dir(dir).map_or(0, Iterator::count)
}

fn datasets() -> (DatasetRef, DatasetRef) {
    (
        DatasetRef::new("data/source.csv", "source"),
        DatasetRef::new("data/target.csv", "target"),
    )
}

#[test]
fn parses_output_and_removes_scratch_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let matcher = coma(
        dir.path(),
        r#"printf 'S.id <-> T.key:0.9\nS.name <-> T.label:0.4\n + 2 correspondences\n' > "$out""#,
        10,
    );
    let (source, target) = datasets();

    let matches = matcher
        .get_matches(&source, &target, "example")
        .expect("matches");

    assert_eq!(matches.len(), 2);
    let first = matches.iter().next().unwrap();
    assert_eq!(first.source, ColumnId::new("source", "id").unwrap());
    assert_eq!(first.target, ColumnId::new("target", "key").unwrap());
    assert_eq!(first.similarity, "0.9");
    assert_eq!(leftover_scratch(&matcher), 0);
}

#[test]
fn missing_output_file_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let matcher = coma(dir.path(), "exit 0", 10);
    let (source, target) = datasets();

    let err = matcher.get_matches(&source, &target, "example").unwrap_err();

    assert!(matches!(err, MatchError::OutputMissing { .. }));
    assert_eq!(leftover_scratch(&matcher), 0);
}

#[test]
fn slow_process_times_out() {
    let dir = tempfile::tempdir().expect("temp dir");
    let matcher = coma(dir.path(), "exec sleep 10", 1);
    let (source, target) = datasets();

    let err = matcher.get_matches(&source, &target, "example").unwrap_err();

    assert!(matches!(err, MatchError::Timeout { .. }));
    assert_eq!(leftover_scratch(&matcher), 0);
}

#[test]
fn failing_process_discards_partial_output() {
    let dir = tempfile::tempdir().expect("temp dir");
    let matcher = coma(
        dir.path(),
        r#"printf 'S.id <-> T.key:0.9\nEND\n' > "$out"; exit 3"#,
        10,
    );
    let (source, target) = datasets();

    let err = matcher.get_matches(&source, &target, "example").unwrap_err();

    assert!(matches!(err, MatchError::ProcessFailed { .. }));
    assert_eq!(leftover_scratch(&matcher), 0);
}

#[test]
fn diagnostics_on_stderr_fail_the_run() {
    let dir = tempfile::tempdir().expect("temp dir");
    let matcher = coma(
        dir.path(),
        r#"printf 'S.id <-> T.key:0.9\nEND\n' > "$out"; echo 'Exception in thread main' >&2"#,
        10,
    );
    let (source, target) = datasets();

    let err = matcher.get_matches(&source, &target, "example").unwrap_err();

    match err {
        MatchError::ProcessFailed { status, stderr } => {
            assert!(status.success());
            assert_eq!(stderr, "Exception in thread main");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_output_still_removes_scratch_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let matcher = coma(dir.path(), r#"printf 'not a match\nEND\n' > "$out""#, 10);
    let (source, target) = datasets();

    let err = matcher.get_matches(&source, &target, "example").unwrap_err();

    assert!(matches!(err, MatchError::Format { line_number: 1, .. }));
    assert_eq!(leftover_scratch(&matcher), 0);
}

#[test]
fn concurrent_runs_use_separate_scratch_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let java = fake_java(
        dir.path(),
        r#"case "$*" in
             *first*) printf 'S.a <-> T.a:0.9\nEND\n' > "$out" ;;
             *) printf 'S.b <-> T.b:0.8\nS.c <-> T.c:0.7\nEND\n' > "$out" ;;
           esac
           sleep 1"#,
    );
    let matcher = Coma::new(ComaConfig {
        java,
        ..ComaConfig::default()
    });
    let first = (
        DatasetRef::new("data/first.csv", "source"),
        DatasetRef::new("data/target.csv", "target"),
    );
    let second = (
        DatasetRef::new("data/second.csv", "source"),
        DatasetRef::new("data/target.csv", "target"),
    );

    let (a, b) = std::thread::scope(|scope| {
        let a = scope.spawn(|| matcher.get_matches(&first.0, &first.1, "first"));
        std::thread::sleep(std::time::Duration::from_millis(300));
        let b = scope.spawn(|| matcher.get_matches(&second.0, &second.1, "second"));
        (
            a.join().expect("first run panicked"),
            b.join().expect("second run panicked"),
        )
    });

    let a = a.expect("first run");
    let b = b.expect("second run");
    assert_eq!(a.len(), 1);
    assert!(a.contains(
        &ColumnId::new("source", "a").unwrap(),
        &ColumnId::new("target", "a").unwrap()
    ));
    assert_eq!(b.len(), 2);
}
