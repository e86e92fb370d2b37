//! Coordinate conventions and genomic intervals
//!
//! Four coordinate systems meet in this crate, each with its own basis:
//!
//! | System | Basis | Notes |
//! |--------|-------|-------|
//! | Genomic | 0-based inclusive | `Gene`, `Exon`, queried regions, [`GenomicInterval`] |
//! | Transcript residue | 1-based inclusive | Index into the translated coding sequence |
//! | Protein residue | 1-based inclusive | Index into the canonical (UniProt) sequence |
//! | Structural | native | PDB residue number plus optional insertion code |
//!
//! Alignment offsets and string slices are 0-based; the helpers below are
//! the only place where a residue position and an index are converted.
//!
//! # Examples
//!
//! ```
//! use ferro_interface::coords::{GenomicInterval, index_to_residue, residue_to_index};
//!
//! assert_eq!(index_to_residue(0), 1);
//! assert_eq!(residue_to_index(1), 0);
//!
//! let interval: GenomicInterval = "chr7:100-102".parse().unwrap();
//! assert_eq!(interval.len(), 3);
//! assert_eq!(interval.to_string(), "chr7:100-102");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InterfaceError;

/// Convert a 1-based residue position to a 0-based sequence index
///
/// # Panics
///
/// Panics in debug builds if `pos` is 0.
#[inline]
pub const fn residue_to_index(pos: u64) -> usize {
    (pos - 1) as usize
}

/// Convert a 0-based sequence index to a 1-based residue position
#[inline]
pub const fn index_to_residue(idx: usize) -> u64 {
    idx as u64 + 1
}

/// Check whether two closed ranges `[a_start, a_end]` and `[b_start, b_end]` overlap
///
/// Spelled out as the six possible arrangements: `b` nested in `a`, `a`
/// nested in `b`, or either boundary of one falling inside the other.
pub fn closed_ranges_overlap(a_start: u64, a_end: u64, b_start: u64, b_end: u64) -> bool {
    let inside = |pos: u64, start: u64, end: u64| pos >= start && pos <= end;

    (b_start >= a_start && b_end <= a_end)
        || (a_start >= b_start && a_end <= b_end)
        || inside(b_start, a_start, a_end)
        || inside(b_end, a_start, a_end)
        || inside(a_start, b_start, b_end)
        || inside(a_end, b_start, b_end)
}

/// A closed genomic interval on one chromosome (0-based, inclusive)
///
/// `start <= end` always holds; strand is carried by the owning gene, not
/// by the interval.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GenomicInterval {
    /// Chromosome name (e.g., "chr1", "1", "X")
    pub chromosome: String,
    /// First base (0-based, inclusive)
    pub start: u64,
    /// Last base (0-based, inclusive)
    pub end: u64,
}

impl GenomicInterval {
    /// Create a new interval, swapping the bounds if given in reverse order
    pub fn new(chromosome: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            chromosome: chromosome.into(),
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// Number of bases covered
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// An interval always covers at least one base
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check if a position is within this interval
    pub fn contains(&self, pos: u64) -> bool {
        pos >= self.start && pos <= self.end
    }
}

impl fmt::Display for GenomicInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chromosome, self.start, self.end)
    }
}

impl FromStr for GenomicInterval {
    type Err = InterfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InterfaceError::InvalidCoordinates {
            msg: format!("expected 'chrom:start-end', found '{}'", s),
        };

        let (chromosome, range) = s.rsplit_once(':').ok_or_else(invalid)?;
        let (start, end) = range.split_once('-').ok_or_else(invalid)?;
        let start: u64 = start.trim().parse().map_err(|_| invalid())?;
        let end: u64 = end.trim().parse().map_err(|_| invalid())?;

        if chromosome.is_empty() {
            return Err(invalid());
        }

        Ok(GenomicInterval::new(chromosome, start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_residue_index_conversion() {
        assert_eq!(residue_to_index(1), 0);
        assert_eq!(residue_to_index(100), 99);
        assert_eq!(index_to_residue(0), 1);
        assert_eq!(index_to_residue(99), 100);
    }

    #[test]
    fn test_closed_ranges_overlap() {
        // nested either way
        assert!(closed_ranges_overlap(1, 10, 3, 4));
        assert!(closed_ranges_overlap(3, 4, 1, 10));
        // boundary inside the other range
        assert!(closed_ranges_overlap(1, 5, 5, 9));
        assert!(closed_ranges_overlap(5, 9, 1, 5));
        assert!(closed_ranges_overlap(1, 5, 3, 9));
        // disjoint and adjacent
        assert!(!closed_ranges_overlap(1, 5, 6, 9));
        assert!(!closed_ranges_overlap(10, 20, 1, 9));
    }

    #[test]
    fn test_interval_new_normalizes_order() {
        let interval = GenomicInterval::new("chr1", 199, 197);
        assert_eq!(interval.start, 197);
        assert_eq!(interval.end, 199);
        assert_eq!(interval.len(), 3);
        assert!(interval.contains(198));
        assert!(!interval.contains(200));
    }

    #[test]
    fn test_interval_display_and_parse() {
        let interval = GenomicInterval::new("chr1", 100, 102);
        assert_eq!(interval.to_string(), "chr1:100-102");

        let parsed: GenomicInterval = "chr1:100-102".parse().unwrap();
        assert_eq!(parsed, interval);
    }

    #[test]
    fn test_interval_parse_errors() {
        assert!("chr1".parse::<GenomicInterval>().is_err());
        assert!("chr1:100".parse::<GenomicInterval>().is_err());
        assert!("chr1:a-b".parse::<GenomicInterval>().is_err());
        assert!(":1-2".parse::<GenomicInterval>().is_err());
    }
}
