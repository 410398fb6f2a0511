//! Job runner library for schema matching experiments.

pub mod config;
pub mod job;
pub mod logging;
pub mod report;
pub mod summary;

pub use config::{ComponentConfig, ConfigError, DEFAULT_OUTPUT_DIR, JobConfig, MetricsConfig};
pub use job::{Job, run_job};
pub use report::{JobReport, read_report, write_report};
