//! Per-sequence interval merging
//!
//! [`RangeMerger`] keeps, for every sequence key (chromosome, protein
//! accession, ...), a set of closed [`Range`]s that never intersect one
//! another. Inserting a range absorbs every stored range it intersects.
//!
//! Ranges that merely touch (`[0,5]` and `[6,10]`) are *not* merged; use
//! [`Range::continuous_to`] when adjacency should count as continuity.
//!
//! # Example
//!
//! ```
//! use ferro_interface::range::{Range, RangeMerger};
//!
//! let mut merger = RangeMerger::new();
//! merger.add_range("chr1", Range::new(0, 5));
//! merger.add_range("chr1", Range::new(10, 15));
//! merger.add_range("chr1", Range::new(4, 11));
//!
//! let ranges: Vec<_> = merger.get_ranges("chr1").unwrap().iter().copied().collect();
//! assert_eq!(ranges, vec![Range::new(0, 15)]);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A closed integer range `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Range {
    pub min: u64,
    pub max: u64,
}

impl Range {
    /// Create a range, swapping the bounds if given in reverse order
    pub fn new(a: u64, b: u64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Number of integers covered
    pub fn len(&self) -> u64 {
        self.max - self.min + 1
    }

    /// A range always covers at least one integer
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check if a value lies within this range
    pub fn contains(&self, value: u64) -> bool {
        value >= self.min && value <= self.max
    }

    /// True if the two ranges share at least one integer
    pub fn intersects(&self, other: &Range) -> bool {
        self.min.max(other.min) <= self.max.min(other.max)
    }

    /// True if the two ranges intersect or are directly adjacent
    pub fn continuous_to(&self, other: &Range) -> bool {
        self.intersects(other)
            || self.max.checked_add(1) == Some(other.min)
            || other.max.checked_add(1) == Some(self.min)
    }

    /// Smallest range covering both
    pub fn union(&self, other: &Range) -> Range {
        Range {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Sequence key to non-intersecting ranges
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeMerger {
    ranges: BTreeMap<String, BTreeSet<Range>>,
}

impl RangeMerger {
    /// Create an empty merger
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a range under `key`, absorbing every stored range it intersects
    ///
    /// The stored ranges are scanned once; each intersecting range widens the
    /// incoming one and is removed, then the widened range is stored.
    pub fn add_range(&mut self, key: impl Into<String>, range: Range) {
        let key = key.into();
        let Some(stored) = self.ranges.get_mut(&key) else {
            self.ranges.insert(key, BTreeSet::from([range]));
            return;
        };

        let mut merged = range;
        let mut absorbed = Vec::new();
        for existing in stored.iter() {
            if existing.intersects(&merged) {
                merged = merged.union(existing);
                absorbed.push(*existing);
            }
        }

        for existing in &absorbed {
            stored.remove(existing);
        }
        stored.insert(merged);
    }

    /// Ranges stored under `key`, in ascending order
    pub fn get_ranges(&self, key: &str) -> Option<&BTreeSet<Range>> {
        self.ranges.get(key)
    }

    /// All sequence keys, in ascending order
    pub fn get_sequences(&self) -> impl Iterator<Item = &str> {
        self.ranges.keys().map(String::as_str)
    }

    /// Union another merger into this one
    pub fn merge(&mut self, other: &RangeMerger) {
        for (key, range) in other.iter() {
            self.add_range(key, *range);
        }
    }

    /// Iterate `(key, range)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Range)> {
        self.ranges
            .iter()
            .flat_map(|(key, set)| set.iter().map(move |r| (key.as_str(), r)))
    }

    /// Total number of stored ranges
    pub fn len(&self) -> usize {
        self.ranges.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
