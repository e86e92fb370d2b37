//! Pairwise sequence alignment
//!
//! Two modes are provided:
//!
//! - [`AlignmentMode::Global`] (Needleman-Wunsch with affine gaps), used to
//!   reconcile a translated transcript with its canonical protein.
//! - [`AlignmentMode::Local`] (Smith-Waterman with affine gaps), used to place
//!   a canonical protein onto the observed residues of a structure chain.
//!
//! # Coordinate System
//!
//! | Field | Basis | Notes |
//! |-------|-------|-------|
//! | `Alignment.start_a`, `Alignment.start_b` | 0-based | Offset of the first aligned residue in each input |
//! | Aligned strings | n/a | Equal length, `-` marks a gap |
//!
//! Alignments are deterministic: identical inputs always produce identical
//! output.

mod matrix;
mod pairwise;

pub use matrix::SubstitutionMatrix;
pub use pairwise::PairwiseAligner;

use serde::{Deserialize, Serialize};

use crate::error::InterfaceError;

/// Gap character used in aligned strings
pub const GAP: char = '-';

/// Alignment algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignmentMode {
    /// End-to-end alignment of both sequences
    Global,
    /// Best-scoring pair of subsequences
    Local,
}

/// Substitution and gap scoring
///
/// Gap penalties are positive costs: a gap of length `k` costs
/// `gap_open + (k - 1) * gap_extend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringScheme {
    pub matrix: SubstitutionMatrix,
    pub gap_open: i32,
    pub gap_extend: i32,
}

impl Default for ScoringScheme {
    fn default() -> Self {
        Self {
            matrix: SubstitutionMatrix::Blosum62,
            gap_open: 10,
            gap_extend: 1,
        }
    }
}

impl ScoringScheme {
    /// Scheme with flat match/mismatch scores
    pub fn identity(match_score: i32, mismatch_score: i32, gap_open: i32, gap_extend: i32) -> Self {
        Self {
            matrix: SubstitutionMatrix::Identity {
                match_score,
                mismatch_score,
            },
            gap_open,
            gap_extend,
        }
    }
}

/// Result of a pairwise alignment
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alignment {
    /// First sequence with gaps inserted
    pub aligned_a: String,
    /// Second sequence with gaps inserted
    pub aligned_b: String,
    /// Offset of the first aligned residue in the first input (0-based)
    pub start_a: usize,
    /// Offset of the first aligned residue in the second input (0-based)
    pub start_b: usize,
    /// Alignment score
    pub score: i32,
}

impl Alignment {
    /// Number of alignment columns
    pub fn len(&self) -> usize {
        self.aligned_a.len()
    }

    /// True when no alignment was found
    pub fn is_empty(&self) -> bool {
        self.aligned_a.is_empty()
    }

    /// Iterate alignment columns as `(a, b)` character pairs
    pub fn columns(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.aligned_a.chars().zip(self.aligned_b.chars())
    }

    /// Number of columns where both residues are identical
    pub fn identities(&self) -> usize {
        self.columns()
            .filter(|(a, b)| *a != GAP && a.eq_ignore_ascii_case(b))
            .count()
    }
}

/// Something that can align two sequences
///
/// [`PairwiseAligner`] is the standard implementation; the trait exists so
/// mapping code can be driven by a different or instrumented aligner.
pub trait SequenceAligner {
    /// Align `a` against `b`
    ///
    /// Fails with [`InterfaceError::InvalidSequenceInput`] if either
    /// sequence is empty. A local alignment with no positive-scoring
    /// column is returned as an empty [`Alignment`], not an error.
    fn align(&self, a: &str, b: &str, mode: AlignmentMode) -> Result<Alignment, InterfaceError>;
}

impl<T: SequenceAligner + ?Sized> SequenceAligner for &T {
    fn align(&self, a: &str, b: &str, mode: AlignmentMode) -> Result<Alignment, InterfaceError> {
        (**self).align(a, b, mode)
    }
}

impl SequenceAligner for Box<dyn SequenceAligner> {
    fn align(&self, a: &str, b: &str, mode: AlignmentMode) -> Result<Alignment, InterfaceError> {
        (**self).align(a, b, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_scheme() {
        let scheme = ScoringScheme::default();
        assert_eq!(scheme.matrix, SubstitutionMatrix::Blosum62);
        assert_eq!(scheme.gap_open, 10);
        assert_eq!(scheme.gap_extend, 1);
    }

    #[test]
    fn test_alignment_columns_and_identities() {
        let alignment = Alignment {
            aligned_a: "MK-LA".to_string(),
            aligned_b: "MKVIA".to_string(),
            start_a: 0,
            start_b: 0,
            score: 0,
        };
        assert_eq!(alignment.len(), 5);
        assert_eq!(alignment.columns().nth(2), Some(('-', 'V')));
        assert_eq!(alignment.identities(), 3);
    }

    #[test]
    fn test_empty_alignment() {
        let alignment = Alignment::default();
        assert!(alignment.is_empty());
        assert_eq!(alignment.columns().count(), 0);
    }
}
