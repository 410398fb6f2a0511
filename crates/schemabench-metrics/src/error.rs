use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MetricError {
    #[error("unknown metric '{name}' (known: {known})")]
    UnknownMetric { name: String, known: String },

    #[error("metric '{metric}' requires option '{option}'")]
    MissingOption {
        metric: &'static str,
        option: &'static str,
    },

    #[error("metric '{metric}' got invalid {option} = {value}: {reason}")]
    InvalidOption {
        metric: &'static str,
        option: &'static str,
        value: f64,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, MetricError>;
