pub mod column;
pub mod correspondence;
pub mod dataset;
pub mod error;
pub mod golden;

pub use column::{ColumnId, ColumnPair};
pub use correspondence::{Correspondence, MatchSet};
pub use dataset::DatasetRef;
pub use error::{ModelError, Result};
pub use golden::GoldenStandard;
