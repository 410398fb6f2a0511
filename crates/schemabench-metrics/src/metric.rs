//! Registry of the metrics a job can request by name.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use schemabench_model::{GoldenStandard, MatchSet};

use crate::error::{MetricError, Result};
use crate::scores::{
    MetricFn, MetricOptions, f1_score, precision, precision_at_n_percent, recall,
    recall_at_sizeof_ground_truth,
};

/// A registered metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    Precision,
    Recall,
    F1Score,
    PrecisionAtNPercent,
    RecallAtSizeofGroundTruth,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Precision,
        Metric::Recall,
        Metric::F1Score,
        Metric::PrecisionAtNPercent,
        Metric::RecallAtSizeofGroundTruth,
    ];

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Precision => "precision",
            Self::Recall => "recall",
            Self::F1Score => "f1_score",
            Self::PrecisionAtNPercent => "precision_at_n_percent",
            Self::RecallAtSizeofGroundTruth => "recall_at_sizeof_ground_truth",
        }
    }

    #[must_use]
    pub fn function(&self) -> MetricFn {
        match self {
            Self::Precision => precision,
            Self::Recall => recall,
            Self::F1Score => f1_score,
            Self::PrecisionAtNPercent => precision_at_n_percent,
            Self::RecallAtSizeofGroundTruth => recall_at_sizeof_ground_truth,
        }
    }

    /// Checks that `options` carries what this metric needs.
    ///
    /// Running the metric on an empty match set exercises the same option
    /// checks the real evaluation performs.
    pub fn validate(&self, options: &MetricOptions) -> Result<()> {
        self.evaluate(&MatchSet::new(), &GoldenStandard::default(), options)
            .map(|_| ())
    }

    pub fn evaluate(
        &self,
        matches: &MatchSet,
        golden: &GoldenStandard,
        options: &MetricOptions,
    ) -> Result<f64> {
        (self.function())(matches, golden, options)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = MetricError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.name() == name)
            .ok_or_else(|| MetricError::UnknownMetric {
                name: name.to_string(),
                known: Self::ALL.map(|metric| metric.name()).join(", "),
            })
    }
}

/// Resolves metric names, failing on the first unknown one.
pub fn resolve_metrics<S: AsRef<str>>(names: &[S]) -> Result<Vec<Metric>> {
    names.iter().map(|name| name.as_ref().parse()).collect()
}

/// Evaluates every metric with the same inputs and options.
pub fn evaluate_all(
    metrics: &[Metric],
    matches: &MatchSet,
    golden: &GoldenStandard,
    options: &MetricOptions,
) -> Result<BTreeMap<String, f64>> {
    let mut results = BTreeMap::new();
    for metric in metrics {
        let value = metric.evaluate(matches, golden, options)?;
        debug!(metric = metric.name(), value, "metric evaluated");
        results.insert(metric.name().to_string(), value);
    }
    Ok(results)
}
