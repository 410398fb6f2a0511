//! Schema matchers.
//!
//! A [`Matcher`] turns a pair of datasets into a ranked [`MatchSet`]. The only
//! shipped implementation, [`Coma`], runs the COMA Java artifact as a child
//! process and parses the file it writes.

pub mod coma;
pub mod error;
pub mod parse;
pub mod process;
pub mod registry;

use schemabench_model::{DatasetRef, MatchSet};

pub use coma::{Coma, ComaConfig, KNOWN_STRATEGIES};
pub use error::{MatchError, Result};
pub use parse::{RawMatch, output_lines, parse_coma_output, parse_match_line};
pub use process::{ProcessOutput, run_with_timeout};
pub use registry::{MatcherFactory, build_matcher, matcher_names, resolve_matcher};

/// A schema matching algorithm.
pub trait Matcher {
    /// Registry name of the matcher.
    fn name(&self) -> &str;

    /// Computes correspondences between `source` and `target` columns.
    ///
    /// `dataset_name` identifies the experiment dataset; matchers may use it
    /// for logging or ignore it.
    fn get_matches(
        &self,
        source: &DatasetRef,
        target: &DatasetRef,
        dataset_name: &str,
    ) -> Result<MatchSet>;
}
