use std::collections::BTreeSet;

use crate::column::{ColumnId, ColumnPair};

/// Known-correct correspondences for a dataset pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoldenStandard {
    expected: BTreeSet<ColumnPair>,
}

impl GoldenStandard {
    #[must_use]
    pub fn len(&self) -> usize {
        self.expected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expected.is_empty()
    }

    #[must_use]
    pub fn contains(&self, source: &ColumnId, target: &ColumnId) -> bool {
        self.expected.contains(&(source.clone(), target.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnPair> {
        self.expected.iter()
    }
}

impl FromIterator<ColumnPair> for GoldenStandard {
    fn from_iter<I: IntoIterator<Item = ColumnPair>>(iter: I) -> Self {
        Self {
            expected: iter.into_iter().collect(),
        }
    }
}
