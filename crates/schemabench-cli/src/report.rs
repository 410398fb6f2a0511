//! JSON report written at the end of a job.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use schemabench_model::MatchSet;

/// Outcome of a job: the matches produced and their scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobReport {
    pub name: String,
    pub dataset_name: String,
    pub generated_at: DateTime<Utc>,
    /// Correspondences in the matcher's order.
    pub matches: MatchSet,
    pub metrics: BTreeMap<String, f64>,
}

/// Writes `report` as `<dir>/<name>.json`, creating `dir` if needed.
///
/// The report is written to a temporary file in `dir` and renamed into
/// place, so a failed write leaves no partial report behind.
pub fn write_report(dir: &Path, report: &JobReport) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("create output dir {}", dir.display()))?;
    let path = dir.join(format!("{}.json", report.name));
    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("create temporary report in {}", dir.display()))?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, report)
            .with_context(|| format!("serialize report {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("write report {}", path.display()))?;
    }
    temp.as_file()
        .sync_all()
        .with_context(|| format!("sync report {}", path.display()))?;
    temp.persist(&path)
        .with_context(|| format!("move report into place at {}", path.display()))?;
    debug!(path = %path.display(), "report persisted");
    Ok(path)
}

/// Reads a report previously written by [`write_report`].
pub fn read_report(path: &Path) -> Result<JobReport> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parse report {}", path.display()))
}
