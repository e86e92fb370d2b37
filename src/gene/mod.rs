//! Gene and transcript model
//!
//! A [`Gene`] is one genomic instance of a protein-coding transcript: its
//! coding exons in transcription order, its coding bounds, the translated
//! transcript and the canonical protein it should be reconciled with.
//!
//! # Coordinate System
//!
//! | Field | Basis | Notes |
//! |-------|-------|-------|
//! | `Gene.start`, `Gene.end` | 0-based inclusive | `start > end` marks the reverse strand |
//! | `Gene.coding_start`, `Gene.coding_end` | 0-based inclusive | Always `coding_start <= coding_end` |
//! | `Exon.start`, `Exon.end` | 0-based inclusive | 5' to 3', so reversed on the reverse strand |
//! | `Exon.protein_start`, `Exon.protein_end` | 1-based inclusive | Transcript residues |
//!
//! Exons are always stored 5' to 3', whatever the genomic direction.

mod exon;
mod residue_map;
mod translate;

pub use exon::Exon;
pub use residue_map::ResidueMap;
pub use translate::{translate, translate_codon, Base, STOP_RESIDUE, UNKNOWN_RESIDUE};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::coords::{closed_ranges_overlap, GenomicInterval};
use crate::error::InterfaceError;

/// Strand orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Strand {
    #[serde(rename = "+")]
    #[default]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Plus => write!(f, "+"),
            Strand::Minus => write!(f, "-"),
        }
    }
}

/// One genomic instance of a protein-coding gene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gene {
    /// Gene or transcript identifier
    pub id: String,
    /// Chromosome name
    pub chromosome: String,
    /// 5' end of the gene (0-based, inclusive)
    pub start: u64,
    /// 3' end of the gene (0-based, inclusive)
    pub end: u64,
    /// Coding exons, 5' to 3'
    pub exons: Vec<Exon>,
    /// Lowest coding base (0-based, inclusive)
    pub coding_start: u64,
    /// Highest coding base (0-based, inclusive)
    pub coding_end: u64,
    /// Canonical protein accession this gene encodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_accession: Option<String>,
    /// Translated coding sequence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_sequence: Option<String>,
    /// Canonical protein sequence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uniprot_sequence: Option<String>,
    /// Canonical to transcript residue map, filled in by alignment
    #[serde(default)]
    pub residue_map: ResidueMap,
}

impl Gene {
    /// Build a gene from full exon bounds in transcription order
    ///
    /// Exons are clipped to the coding range, non-coding exons are dropped,
    /// and every remaining exon is annotated with the transcript residues it
    /// covers. Each pair may be given in either order; the strand is taken
    /// from the exon order (or from the single exon's own order).
    ///
    /// # Example
    ///
    /// ```
    /// use ferro_interface::gene::{Gene, Strand};
    ///
    /// // Two exons, coding from 105 to 214
    /// let gene = Gene::from_exon_bounds("G1", "chr1", &[(100, 150), (200, 220)], 105, 214).unwrap();
    /// assert_eq!(gene.strand(), Strand::Plus);
    /// assert_eq!(gene.exons.len(), 2);
    /// assert_eq!(gene.coding_length(), 46 + 15);
    /// // 46 coding bases in exon 1, so exon 2 opens by finishing residue 16
    /// assert_eq!(gene.exons[1].protein_start, 16);
    /// assert_eq!(gene.exons[1].overlapping_bases, 2);
    /// ```
    pub fn from_exon_bounds(
        id: impl Into<String>,
        chromosome: impl Into<String>,
        exon_bounds: &[(u64, u64)],
        coding_start: u64,
        coding_end: u64,
    ) -> Result<Self, InterfaceError> {
        let id = id.into();
        let (first, last) = match (exon_bounds.first(), exon_bounds.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => {
                return Err(InterfaceError::InvalidCoordinates {
                    msg: format!("gene {} has no exons", id),
                })
            }
        };

        let forward = if exon_bounds.len() > 1 {
            first.0.min(first.1) <= last.0.min(last.1)
        } else {
            first.0 <= first.1
        };
        let coding_min = coding_start.min(coding_end);
        let coding_max = coding_start.max(coding_end);

        let mut exons = Vec::with_capacity(exon_bounds.len());
        let mut cumulative = 0u64;
        for &(a, b) in exon_bounds {
            let (lo, hi) = (a.min(b), a.max(b));
            if hi < coding_min || lo > coding_max {
                continue;
            }
            let (lo, hi) = (lo.max(coding_min), hi.min(coding_max));
            let len = hi - lo + 1;
            let (start, end) = if forward { (lo, hi) } else { (hi, lo) };

            exons.push(Exon::new(
                start,
                end,
                cumulative / 3 + 1,
                (cumulative + len - 1) / 3 + 1,
                ((3 - cumulative % 3) % 3) as u8,
            ));
            cumulative += len;
        }

        if exons.is_empty() {
            return Err(InterfaceError::InvalidCoordinates {
                msg: format!(
                    "gene {} has no exon within coding range {}-{}",
                    id, coding_min, coding_max
                ),
            });
        }

        let gene_min = exon_bounds.iter().map(|(a, b)| *a.min(b)).min().unwrap_or(coding_min);
        let gene_max = exon_bounds.iter().map(|(a, b)| *a.max(b)).max().unwrap_or(coding_max);
        let (start, end) = if forward {
            (gene_min, gene_max)
        } else {
            (gene_max, gene_min)
        };

        Ok(Self {
            id,
            chromosome: chromosome.into(),
            start,
            end,
            exons,
            coding_start: coding_min,
            coding_end: coding_max,
            protein_accession: None,
            transcript_sequence: None,
            uniprot_sequence: None,
            residue_map: ResidueMap::new(),
        })
    }

    /// Set the canonical protein accession
    pub fn with_protein_accession(mut self, accession: impl Into<String>) -> Self {
        self.protein_accession = Some(accession.into());
        self
    }

    /// Set the translated transcript and slice it into the exons
    pub fn with_transcript_sequence(mut self, sequence: impl Into<String>) -> Self {
        self.transcript_sequence = Some(sequence.into());
        self.set_exon_sequences();
        self
    }

    /// Set the transcript by translating a coding DNA sequence
    pub fn with_coding_sequence(self, cds: &str) -> Self {
        self.with_transcript_sequence(translate(cds))
    }

    /// Set the canonical protein sequence
    pub fn with_uniprot_sequence(mut self, sequence: impl Into<String>) -> Self {
        self.uniprot_sequence = Some(sequence.into());
        self
    }

    /// Strand, derived from the order of `start` and `end`
    pub fn strand(&self) -> Strand {
        if self.start <= self.end {
            Strand::Plus
        } else {
            Strand::Minus
        }
    }

    pub fn is_forward(&self) -> bool {
        self.strand() == Strand::Plus
    }

    /// Lowest genomic coordinate
    pub fn min(&self) -> u64 {
        self.start.min(self.end)
    }

    /// Highest genomic coordinate
    pub fn max(&self) -> u64 {
        self.start.max(self.end)
    }

    /// Total number of coding bases
    pub fn coding_length(&self) -> u64 {
        self.exons.iter().map(Exon::len).sum()
    }

    /// Check whether the gene overlaps `[min, max]` on `chromosome`
    pub fn overlaps(&self, chromosome: &str, min: u64, max: u64) -> bool {
        self.chromosome == chromosome
            && closed_ranges_overlap(self.min(), self.max(), min.min(max), min.max(max))
    }

    /// Slice each exon's residues out of the translated transcript
    pub fn set_exon_sequences(&mut self) {
        let Some(sequence) = self.transcript_sequence.as_deref() else {
            return;
        };
        for exon in &mut self.exons {
            let from = exon.protein_start.saturating_sub(1) as usize;
            let to = (exon.protein_end as usize).min(sequence.len());
            exon.sequence = sequence.get(from..to).map(str::to_string);
        }
    }

    /// Transcript residue (1-based) encoded at a genomic position
    ///
    /// Returns `None` if the position is outside every coding exon.
    pub fn transcript_aa_position(&self, pos: u64) -> Option<u64> {
        self.exons.iter().find_map(|exon| exon.residue_at(pos))
    }

    /// Genomic intervals encoding a transcript residue, 5' to 3'
    ///
    /// A codon split across an exon junction yields one interval per exon.
    /// Collection stops once three bases are found; a model that would
    /// attribute more than three bases to one residue is logged and the
    /// extra bases are kept.
    pub fn genome_positions(&self, residue: u64) -> Vec<GenomicInterval> {
        let mut intervals = Vec::new();
        let mut bases = 0u64;

        for exon in &self.exons {
            let Some((from, to)) = exon.codon_offsets(residue) else {
                continue;
            };
            bases += to - from + 1;
            if bases > 3 {
                log::warn!(
                    "gene {}: residue {} spans {} bases across exons",
                    self.id,
                    residue,
                    bases
                );
            }
            intervals.push(GenomicInterval::new(
                self.chromosome.clone(),
                exon.position_at(from),
                exon.position_at(to),
            ));
            if bases >= 3 {
                break;
            }
        }

        intervals
    }

    /// Merge learned `(uniprot, transcript)` pairs into the residue map
    pub fn add_uniprot_to_transcript_aa<I: IntoIterator<Item = (u64, u64)>>(&mut self, pairs: I) {
        self.residue_map.extend(pairs);
    }

    /// Genomic intervals encoding a canonical (UniProt) residue
    ///
    /// Empty until the residue map has learned that residue.
    pub fn uniprot_genome_positions(&self, uniprot: u64) -> Vec<GenomicInterval> {
        self.residue_map
            .transcript_position(uniprot)
            .map(|transcript| self.genome_positions(transcript))
            .unwrap_or_default()
    }
}
