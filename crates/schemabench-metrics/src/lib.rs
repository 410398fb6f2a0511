pub mod error;
pub mod metric;
pub mod scores;

pub use error::{MetricError, Result};
pub use metric::{Metric, evaluate_all, resolve_metrics};
pub use scores::{
    MetricFn, MetricOptions, f1_score, precision, precision_at_n_percent, recall,
    recall_at_sizeof_ground_truth,
};
