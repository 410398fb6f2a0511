//! COMA matcher backed by the external `coma.jar` artifact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use serde::Deserialize;
use tempfile::TempDir;
use tracing::{debug, info, info_span, warn};

use schemabench_model::{DatasetRef, MatchSet};

use crate::Matcher;
use crate::error::{MatchError, Result};
use crate::parse::parse_coma_output;
use crate::process::run_with_timeout;

/// Strategy labels understood by the COMA artifact.
pub const KNOWN_STRATEGIES: &[&str] = &["COMA_OPT", "COMA_OPT_INST"];

const MAIN_CLASS: &str = "Main";
const OUTPUT_FILE_NAME: &str = "output.txt";
const SCRATCH_PREFIX: &str = "coma-";

fn default_strategy() -> String {
    "COMA_OPT".to_string()
}

fn default_java() -> PathBuf {
    PathBuf::from("java")
}

fn default_jar_path() -> PathBuf {
    PathBuf::from("algorithms/coma/artifact/coma.jar")
}

const fn default_timeout_secs() -> u64 {
    60
}

/// Parameters of a COMA run.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComaConfig {
    /// Maximum number of candidates per column (0 lets COMA decide).
    #[serde(default)]
    pub max_n: u32,
    #[serde(default = "default_strategy")]
    pub strategy: String,
    /// Java launcher.
    #[serde(default = "default_java")]
    pub java: PathBuf,
    #[serde(default = "default_jar_path")]
    pub jar_path: PathBuf,
    /// Parent of the per-run scratch directories; the system temp dir when unset.
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ComaConfig {
    fn default() -> Self {
        Self {
            max_n: 0,
            strategy: default_strategy(),
            java: default_java(),
            jar_path: default_jar_path(),
            scratch_dir: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ComaConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn read_output(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            MatchError::OutputMissing {
                path: path.to_path_buf(),
            }
        } else {
            MatchError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Schema matcher that shells out to COMA.
#[derive(Debug, Clone)]
pub struct Coma {
    config: ComaConfig,
}

impl Coma {
    pub fn new(config: ComaConfig) -> Self {
        if !KNOWN_STRATEGIES.contains(&config.strategy.as_str()) {
            warn!(strategy = %config.strategy, "unrecognized COMA strategy, passing through");
        }
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ComaConfig {
        &self.config
    }

    /// Creates a fresh scratch directory for one run, removed when dropped.
    fn scratch(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        let builder = builder.prefix(SCRATCH_PREFIX);
        match &self.config.scratch_dir {
            Some(dir) => {
                fs::create_dir_all(dir).map_err(|source| MatchError::Io {
                    path: dir.clone(),
                    source,
                })?;
                builder.tempdir_in(dir).map_err(|source| MatchError::Io {
                    path: dir.clone(),
                    source,
                })
            }
            None => builder.tempdir().map_err(|source| MatchError::Io {
                path: std::env::temp_dir(),
                source,
            }),
        }
    }

    /// Builds the launcher invocation for a dataset pair.
    pub fn command(&self, source: &DatasetRef, target: &DatasetRef, output: &Path) -> Command {
        let mut command = Command::new(&self.config.java);
        command
            .arg("-cp")
            .arg(&self.config.jar_path)
            .arg(format!("-DinputFile1={}", source.path.display()))
            .arg(format!("-DinputFile2={}", target.path.display()))
            .arg(format!("-DoutputFile={}", output.display()))
            .arg(format!("-DmaxN={}", self.config.max_n))
            .arg(format!("-Dstrategy={}", self.config.strategy))
            .arg(MAIN_CLASS);
        command
    }
}

impl Matcher for Coma {
    fn name(&self) -> &str {
        "coma"
    }

    fn get_matches(
        &self,
        source: &DatasetRef,
        target: &DatasetRef,
        dataset_name: &str,
    ) -> Result<MatchSet> {
        let span = info_span!("coma", dataset = %dataset_name, strategy = %self.config.strategy);
        let _guard = span.enter();

        let scratch = self.scratch()?;
        let output_path = scratch.path().join(OUTPUT_FILE_NAME);
        debug!(scratch = %scratch.path().display(), "created scratch directory");
        let mut command = self.command(source, target, &output_path);
        info!(
            source = %source.path.display(),
            target = %target.path.display(),
            max_n = self.config.max_n,
            "launching matcher"
        );
        let output = run_with_timeout(&mut command, self.config.timeout())?;
        debug!(
            status = %output.status,
            stdout_bytes = output.stdout.len(),
            duration_ms = output.elapsed.as_millis(),
            "matcher exited"
        );
        if !output.status.success() || !output.stderr.trim().is_empty() {
            return Err(MatchError::ProcessFailed {
                status: output.status,
                stderr: output.stderr.trim().to_string(),
            });
        }

        let contents = read_output(&output_path)?;
        let matches = parse_coma_output(&contents, &source.table_name, &target.table_name)?;
        info!(match_count = matches.len(), "matcher finished");
        Ok(matches)
    }
}
