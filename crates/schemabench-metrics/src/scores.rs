//! Metric functions.
//!
//! Every metric has the same signature, [`MetricFn`]. Metrics that need
//! parameters read them from [`MetricOptions`].

use serde::{Deserialize, Serialize};

use schemabench_model::{Correspondence, GoldenStandard, MatchSet};

use crate::error::{MetricError, Result};

/// Uniform metric signature.
pub type MetricFn = fn(&MatchSet, &GoldenStandard, &MetricOptions) -> Result<f64>;

/// Optional metric parameters, taken from the job's `metrics.args`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricOptions {
    /// Percentage of top-ranked matches kept by `precision_at_n_percent`.
    #[serde(default)]
    pub n: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Confusion {
    true_positives: usize,
    false_positives: usize,
    false_negatives: usize,
}

fn confusion(considered: &[&Correspondence], golden: &GoldenStandard) -> Confusion {
    let true_positives = considered
        .iter()
        .filter(|c| golden.contains(&c.source, &c.target))
        .count();
    Confusion {
        true_positives,
        false_positives: considered.len() - true_positives,
        false_negatives: golden.len().saturating_sub(true_positives),
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn precision_of(considered: &[&Correspondence], golden: &GoldenStandard) -> f64 {
    let c = confusion(considered, golden);
    ratio(c.true_positives, c.true_positives + c.false_positives)
}

fn recall_of(considered: &[&Correspondence], golden: &GoldenStandard) -> f64 {
    let c = confusion(considered, golden);
    ratio(c.true_positives, c.true_positives + c.false_negatives)
}

fn top(matches: &MatchSet, count: usize) -> Vec<&Correspondence> {
    let mut ranked = matches.ranked();
    ranked.truncate(count);
    ranked
}

/// Share of produced matches that are in the golden standard.
pub fn precision(matches: &MatchSet, golden: &GoldenStandard, _: &MetricOptions) -> Result<f64> {
    Ok(precision_of(&matches.ranked(), golden))
}

/// Share of golden standard correspondences that were produced.
pub fn recall(matches: &MatchSet, golden: &GoldenStandard, _: &MetricOptions) -> Result<f64> {
    Ok(recall_of(&matches.ranked(), golden))
}

/// Harmonic mean of precision and recall.
pub fn f1_score(matches: &MatchSet, golden: &GoldenStandard, options: &MetricOptions) -> Result<f64> {
    let p = precision(matches, golden, options)?;
    let r = recall(matches, golden, options)?;
    if p + r == 0.0 {
        Ok(0.0)
    } else {
        Ok(2.0 * p * r / (p + r))
    }
}

/// Precision over the top `n` percent of ranked matches.
///
/// Keeps `ceil(n / 100 * |matches|)` matches; `n` must lie in `[0, 100]`.
pub fn precision_at_n_percent(
    matches: &MatchSet,
    golden: &GoldenStandard,
    options: &MetricOptions,
) -> Result<f64> {
    const METRIC: &str = "precision_at_n_percent";
    let n = options.n.ok_or(MetricError::MissingOption {
        metric: METRIC,
        option: "n",
    })?;
    if !(0.0..=100.0).contains(&n) {
        return Err(MetricError::InvalidOption {
            metric: METRIC,
            option: "n",
            value: n,
            reason: "expected a percentage between 0 and 100",
        });
    }
    let keep = ((n / 100.0) * matches.len() as f64).ceil() as usize;
    Ok(precision_of(&top(matches, keep), golden))
}

/// Recall over as many top-ranked matches as the golden standard holds.
pub fn recall_at_sizeof_ground_truth(
    matches: &MatchSet,
    golden: &GoldenStandard,
    _: &MetricOptions,
) -> Result<f64> {
    Ok(recall_of(&top(matches, golden.len()), golden))
}
