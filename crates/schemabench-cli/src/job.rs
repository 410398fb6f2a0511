//! Preparing and running a schema matching job.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, info_span};

use schemabench_ingest::{LoaderFn, load_golden_standard, resolve_loader};
use schemabench_match::{Matcher, build_matcher};
use schemabench_metrics::{Metric, evaluate_all, resolve_metrics};

use crate::config::JobConfig;
use crate::report::{JobReport, write_report};

/// A job whose components have all been resolved.
///
/// Every registry lookup happens in [`Job::prepare`], so configuration
/// mistakes surface before the matcher process is launched.
pub struct Job {
    config: JobConfig,
    source_loader: LoaderFn,
    target_loader: LoaderFn,
    matcher: Box<dyn Matcher>,
    metrics: Vec<Metric>,
}

impl Job {
    pub fn prepare(config: JobConfig) -> Result<Self> {
        let source_loader = resolve_loader(&config.source.kind).context("resolve source loader")?;
        let target_loader = resolve_loader(&config.target.kind).context("resolve target loader")?;
        let matcher = build_matcher(&config.algorithm.kind, &config.algorithm.args)
            .context("resolve algorithm")?;
        let metrics = resolve_metrics(&config.metrics.names).context("resolve metrics")?;
        for metric in &metrics {
            metric
                .validate(&config.metrics.args)
                .context("validate metric options")?;
        }
        Ok(Self {
            config,
            source_loader,
            target_loader,
            matcher,
            metrics,
        })
    }

    /// Replaces the configured matcher.
    #[must_use]
    pub fn with_matcher(mut self, matcher: Box<dyn Matcher>) -> Self {
        self.matcher = matcher;
        self
    }

    #[must_use]
    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    /// Runs the pipeline: load datasets, match, load golden standard, score.
    pub fn run(&self) -> Result<JobReport> {
        let config = &self.config;
        let span = info_span!("job", name = %config.name, dataset = %config.dataset_name);
        let _guard = span.enter();
        let started = Instant::now();

        let source = (self.source_loader)(&config.source.kind, &config.source.args)
            .context("load source dataset")?;
        let target = (self.target_loader)(&config.target.kind, &config.target.args)
            .context("load target dataset")?;
        info!(
            source_table = %source.table_name,
            target_table = %target.table_name,
            "datasets loaded"
        );

        let matches = self
            .matcher
            .get_matches(&source, &target, &config.dataset_name)
            .with_context(|| format!("run matcher '{}'", self.matcher.name()))?;

        let golden = load_golden_standard(&config.golden_standard)
            .context("load golden standard")?;

        let metrics = evaluate_all(&self.metrics, &matches, &golden, &config.metrics.args)
            .context("evaluate metrics")?;
        info!(
            match_count = matches.len(),
            expected = golden.len(),
            duration_ms = started.elapsed().as_millis(),
            "job complete"
        );

        Ok(JobReport {
            name: config.name.clone(),
            dataset_name: config.dataset_name.clone(),
            generated_at: Utc::now(),
            matches,
            metrics,
        })
    }
}

/// Loads the configuration at `config_path`, runs the job and writes its report.
///
/// Returns the report and the path it was written to. Nothing is written
/// when any stage fails.
pub fn run_job(config_path: &Path) -> Result<(JobReport, PathBuf)> {
    let config = JobConfig::load(config_path)?;
    let job = Job::prepare(config)?;
    let report = job.run()?;
    let path = write_report(&job.config().output_dir, &report)?;
    info!(path = %path.display(), "report written");
    Ok((report, path))
}
