//! Coding exon

use serde::{Deserialize, Serialize};

/// A coding exon of a [`Gene`](super::Gene)
///
/// `start`/`end` follow transcription direction: `start <= end` on the
/// forward strand and `start > end` on the reverse strand. Both are 0-based
/// and inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exon {
    /// 5'-most base (0-based, inclusive)
    pub start: u64,
    /// 3'-most base (0-based, inclusive)
    pub end: u64,
    /// Residues encoded by this exon, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<String>,
    /// First transcript residue touched by this exon (1-based)
    pub protein_start: u64,
    /// Last transcript residue touched by this exon (1-based)
    pub protein_end: u64,
    /// Leading bases that finish a codon begun in the previous exon (0, 1 or 2)
    #[serde(default)]
    pub overlapping_bases: u8,
}

impl Exon {
    /// Create an exon with its protein annotation
    pub fn new(start: u64, end: u64, protein_start: u64, protein_end: u64, overlapping_bases: u8) -> Self {
        Self {
            start,
            end,
            sequence: None,
            protein_start,
            protein_end,
            overlapping_bases,
        }
    }

    /// Lowest genomic coordinate
    pub fn min(&self) -> u64 {
        self.start.min(self.end)
    }

    /// Highest genomic coordinate
    pub fn max(&self) -> u64 {
        self.start.max(self.end)
    }

    pub fn is_forward(&self) -> bool {
        self.start <= self.end
    }

    /// Number of bases
    pub fn len(&self) -> u64 {
        self.max() - self.min() + 1
    }

    /// An exon always covers at least one base
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check if a genomic position lies within this exon
    pub fn contains(&self, pos: u64) -> bool {
        pos >= self.min() && pos <= self.max()
    }

    /// Distance of `pos` from the 5' end, in transcription direction
    ///
    /// `pos` must lie within the exon.
    pub(crate) fn offset_of(&self, pos: u64) -> u64 {
        if self.is_forward() {
            pos - self.start
        } else {
            self.start - pos
        }
    }

    /// Genomic position `offset` bases downstream of the 5' end
    pub(crate) fn position_at(&self, offset: u64) -> u64 {
        if self.is_forward() {
            self.start + offset
        } else {
            self.start - offset
        }
    }

    /// Transcript residue (1-based) encoded at genomic position `pos`
    ///
    /// Bases inside the carry-over belong to `protein_start`, the residue
    /// whose codon they complete. Returns `None` outside the exon.
    pub fn residue_at(&self, pos: u64) -> Option<u64> {
        if !self.contains(pos) {
            return None;
        }
        let delta = self.offset_of(pos);
        let carry = self.overlapping_bases as u64;
        if delta < carry {
            return Some(self.protein_start);
        }
        let first_full = self.protein_start + u64::from(carry > 0);
        Some(first_full + (delta - carry) / 3)
    }

    /// Offsets (from the 5' end, inclusive) of the bases encoding `residue` within this exon
    pub(crate) fn codon_offsets(&self, residue: u64) -> Option<(u64, u64)> {
        if residue < self.protein_start || residue > self.protein_end {
            return None;
        }
        let carry = self.overlapping_bases as u64;
        let last = self.len() - 1;
        if carry > 0 && residue == self.protein_start {
            return Some((0, (carry - 1).min(last)));
        }
        let k = residue - self.protein_start - u64::from(carry > 0);
        let from = carry + 3 * k;
        if from > last {
            return None;
        }
        Some((from, (from + 2).min(last)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_exon_geometry() {
        let exon = Exon::new(100, 199, 1, 34, 0);
        assert!(exon.is_forward());
        assert_eq!(exon.len(), 100);
        assert_eq!(exon.offset_of(103), 3);
        assert_eq!(exon.position_at(3), 103);
    }

    #[test]
    fn test_reverse_exon_geometry() {
        let exon = Exon::new(199, 100, 1, 34, 0);
        assert!(!exon.is_forward());
        assert_eq!(exon.min(), 100);
        assert_eq!(exon.max(), 199);
        assert_eq!(exon.offset_of(197), 2);
        assert_eq!(exon.position_at(2), 197);
    }

    #[test]
    fn test_residue_at() {
        let exon = Exon::new(100, 199, 1, 34, 0);
        assert_eq!(exon.residue_at(100), Some(1));
        assert_eq!(exon.residue_at(102), Some(1));
        assert_eq!(exon.residue_at(103), Some(2));
        assert_eq!(exon.residue_at(199), Some(34));
        assert_eq!(exon.residue_at(99), None);
    }

    #[test]
    fn test_residue_at_with_carry_over() {
        // two bases complete residue 4, residue 5 starts at offset 2
        let exon = Exon::new(500, 520, 4, 11, 2);
        assert_eq!(exon.residue_at(500), Some(4));
        assert_eq!(exon.residue_at(501), Some(4));
        assert_eq!(exon.residue_at(502), Some(5));
        assert_eq!(exon.residue_at(505), Some(6));
    }

    #[test]
    fn test_codon_offsets() {
        let exon = Exon::new(500, 520, 4, 11, 2);
        assert_eq!(exon.codon_offsets(4), Some((0, 1)));
        assert_eq!(exon.codon_offsets(5), Some((2, 4)));
        // 21 bases: 2 carry + 6 full codons + 1 leftover base of residue 11
        assert_eq!(exon.codon_offsets(11), Some((20, 20)));
        assert_eq!(exon.codon_offsets(12), None);
        assert_eq!(exon.codon_offsets(3), None);
    }
}
