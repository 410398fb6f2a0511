//! Correspondence records and the ranked match set a matcher produces.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::column::{ColumnId, ColumnPair};

/// A single column-to-column correspondence with the matcher's similarity.
///
/// The similarity is kept as the raw token the matcher emitted; use
/// [`Correspondence::score`] for a numeric view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CorrespondenceRecord", into = "CorrespondenceRecord")]
pub struct Correspondence {
    pub source: ColumnId,
    pub target: ColumnId,
    pub similarity: String,
}

/// Flat serialized shape of a [`Correspondence`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CorrespondenceRecord {
    source_table: String,
    source_column: String,
    target_table: String,
    target_column: String,
    similarity: String,
}

impl From<CorrespondenceRecord> for Correspondence {
    fn from(record: CorrespondenceRecord) -> Self {
        Self {
            source: ColumnId {
                table: record.source_table,
                column: record.source_column,
            },
            target: ColumnId {
                table: record.target_table,
                column: record.target_column,
            },
            similarity: record.similarity,
        }
    }
}

impl From<Correspondence> for CorrespondenceRecord {
    fn from(value: Correspondence) -> Self {
        Self {
            source_table: value.source.table,
            source_column: value.source.column,
            target_table: value.target.table,
            target_column: value.target.column,
            similarity: value.similarity,
        }
    }
}

impl Correspondence {
    pub fn new(source: ColumnId, target: ColumnId, similarity: impl Into<String>) -> Self {
        Self {
            source,
            target,
            similarity: similarity.into(),
        }
    }

    /// Parses the similarity token, if it is a finite number.
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        self.similarity
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    #[must_use]
    pub fn key(&self) -> ColumnPair {
        (self.source.clone(), self.target.clone())
    }
}

/// Ordered correspondences with unique `(source, target)` keys.
///
/// Insertion order is the matcher's ranking order. Re-inserting a key
/// replaces the similarity but keeps the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Correspondence>", into = "Vec<Correspondence>")]
pub struct MatchSet {
    entries: Vec<Correspondence>,
    #[serde(skip)]
    index: HashMap<ColumnPair, usize>,
}

impl MatchSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a correspondence, returning the previous similarity for the key.
    pub fn insert(&mut self, correspondence: Correspondence) -> Option<String> {
        let key = correspondence.key();
        if let Some(&position) = self.index.get(&key) {
            let previous = std::mem::replace(
                &mut self.entries[position].similarity,
                correspondence.similarity,
            );
            return Some(previous);
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(correspondence);
        None
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Correspondence> {
        self.entries.iter()
    }

    #[must_use]
    pub fn get(&self, source: &ColumnId, target: &ColumnId) -> Option<&Correspondence> {
        let key = (source.clone(), target.clone());
        self.index.get(&key).map(|&position| &self.entries[position])
    }

    #[must_use]
    pub fn contains(&self, source: &ColumnId, target: &ColumnId) -> bool {
        self.get(source, target).is_some()
    }

    /// Correspondences sorted by descending score.
    ///
    /// The sort is stable, so ties keep the matcher's order. Similarities
    /// that do not parse as numbers rank last.
    #[must_use]
    pub fn ranked(&self) -> Vec<&Correspondence> {
        let mut ranked: Vec<&Correspondence> = self.entries.iter().collect();
        ranked.sort_by(|left, right| match (left.score(), right.score()) {
            (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        ranked
    }
}

impl From<Vec<Correspondence>> for MatchSet {
    fn from(entries: Vec<Correspondence>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<MatchSet> for Vec<Correspondence> {
    fn from(value: MatchSet) -> Self {
        value.entries
    }
}

impl FromIterator<Correspondence> for MatchSet {
    fn from_iter<I: IntoIterator<Item = Correspondence>>(iter: I) -> Self {
        let mut set = Self::new();
        for correspondence in iter {
            set.insert(correspondence);
        }
        set
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a Correspondence;
    type IntoIter = std::slice::Iter<'a, Correspondence>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
