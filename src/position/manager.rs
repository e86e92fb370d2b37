//! Genomic region to residue position conversion

use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use super::{AAPosition, PositionId};
use crate::align::{AlignmentMode, PairwiseAligner, SequenceAligner, GAP};
use crate::coords::closed_ranges_overlap;
use crate::error::InterfaceError;
use crate::gene::{Gene, STOP_RESIDUE};

/// Per-query factory and owner of [`AAPosition`]s
///
/// Positions are memoized on `start#end#gene`, so converting the same
/// region twice yields the same [`PositionId`].
#[derive(Debug, Clone)]
pub struct PositionManager<A: SequenceAligner = PairwiseAligner> {
    aligner: A,
    positions: Vec<AAPosition>,
    index: HashMap<String, PositionId>,
}

impl Default for PositionManager<PairwiseAligner> {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionManager<PairwiseAligner> {
    /// Create a manager using the default aligner
    pub fn new() -> Self {
        Self::with_aligner(PairwiseAligner::default())
    }
}

impl<A: SequenceAligner> PositionManager<A> {
    /// Create a manager using the given aligner
    pub fn with_aligner(aligner: A) -> Self {
        Self {
            aligner,
            positions: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn aligner(&self) -> &A {
        &self.aligner
    }

    /// Convert a genomic region into residue positions on `gene`'s protein
    ///
    /// `min` and `max` are 0-based inclusive genomic bounds. The result is
    /// empty or holds one position. Failures (missing sequences, alignment
    /// errors) are logged and produce an empty result so a caller looping
    /// over several genes is never interrupted.
    pub fn aa_positions(&mut self, gene: &mut Gene, min: u64, max: u64) -> Vec<PositionId> {
        match self.try_aa_positions(gene, min, max) {
            Ok(position) => position.into_iter().collect(),
            Err(e) => {
                log::warn!(
                    "gene {}: cannot map {}:{}-{} to residues: {} (transcript: {:?}, protein: {:?})",
                    gene.id,
                    gene.chromosome,
                    min,
                    max,
                    e,
                    gene.transcript_sequence,
                    gene.uniprot_sequence
                );
                Vec::new()
            }
        }
    }

    /// Like [`aa_positions`](Self::aa_positions), but surfacing errors
    ///
    /// `Ok(None)` means the region simply does not encode any residue of the
    /// canonical protein.
    pub fn try_aa_positions(
        &mut self,
        gene: &mut Gene,
        min: u64,
        max: u64,
    ) -> Result<Option<PositionId>, InterfaceError> {
        let (min, max) = (min.min(max), min.max(max));
        if !closed_ranges_overlap(gene.coding_start, gene.coding_end, min, max) {
            log::debug!("gene {}: {}-{} is outside the coding range", gene.id, min, max);
            return Ok(None);
        }
        let min = min.max(gene.coding_start);
        let max = max.min(gene.coding_end);

        let (five_prime, three_prime) = if gene.is_forward() {
            (min, max)
        } else {
            (max, min)
        };
        let (Some(start_t), Some(end_t)) = (
            five_prime_residue(gene, five_prime),
            three_prime_residue(gene, three_prime),
        ) else {
            log::debug!("gene {}: {}-{} has no coding exon", gene.id, min, max);
            return Ok(None);
        };
        if start_t > end_t {
            log::debug!("gene {}: {}-{} lies within an intron", gene.id, min, max);
            return Ok(None);
        }

        let transcript = gene.transcript_sequence.as_deref().ok_or_else(|| {
            InterfaceError::conversion(format!("gene {} has no transcript sequence", gene.id))
        })?;
        let uniprot = gene.uniprot_sequence.as_deref().ok_or_else(|| {
            InterfaceError::conversion(format!("gene {} has no canonical protein sequence", gene.id))
        })?;

        let leading = transcript.chars().take_while(|c| *c == STOP_RESIDUE).count() as u64;
        let trimmed = transcript
            .trim_start_matches(STOP_RESIDUE)
            .trim_end_matches(STOP_RESIDUE);
        if end_t <= leading {
            return Ok(None);
        }
        let start_t = start_t.saturating_sub(leading).max(1);
        let end_t = end_t - leading;

        let alignment = self.aligner.align(trimmed, uniprot, AlignmentMode::Global)?;

        let mut transcript_cursor = alignment.start_a as u64;
        let mut protein_cursor = alignment.start_b as u64;
        let mut start_aa = None;
        let mut end_aa = None;
        let mut pairs = Vec::with_capacity(alignment.len());
        for (t, p) in alignment.columns() {
            if t != GAP {
                transcript_cursor += 1;
            }
            if p != GAP {
                protein_cursor += 1;
            }
            if t == GAP || p == GAP {
                continue;
            }
            pairs.push((protein_cursor, transcript_cursor + leading));
            if transcript_cursor >= start_t && transcript_cursor <= end_t {
                start_aa.get_or_insert(protein_cursor);
                end_aa = Some(protein_cursor);
            }
        }
        gene.add_uniprot_to_transcript_aa(pairs);

        let (Some(start_aa), Some(end_aa)) = (start_aa, end_aa) else {
            log::debug!(
                "gene {}: transcript residues {}-{} are not aligned to the protein",
                gene.id,
                start_t,
                end_t
            );
            return Ok(None);
        };

        log::debug!(
            "gene {}: {}-{} -> transcript {}-{} -> protein {}-{}",
            gene.id,
            min,
            max,
            start_t + leading,
            end_t + leading,
            start_aa,
            end_aa
        );
        Ok(Some(self.get_or_create(start_aa, end_aa, gene, min, max)))
    }

    /// Fetch the memoized position for `start#end#gene`, creating it if needed
    pub fn get_or_create(
        &mut self,
        start: u64,
        end: u64,
        gene: &Gene,
        genomic_min: u64,
        genomic_max: u64,
    ) -> PositionId {
        let key = format!("{}#{}#{}", start, end, gene.id);
        if let Some(id) = self.index.get(&key) {
            return *id;
        }

        let id = PositionId(self.positions.len());
        let description = format!("{}:{}-{}", gene.chromosome, genomic_min, genomic_max);
        self.positions.push(AAPosition::new(
            start,
            end,
            gene.id.clone(),
            description,
            genomic_min,
            genomic_max,
        ));
        self.index.insert(key, id);
        id
    }

    pub fn get(&self, id: PositionId) -> Option<&AAPosition> {
        self.positions.get(id.0)
    }

    pub fn get_mut(&mut self, id: PositionId) -> Option<&mut AAPosition> {
        self.positions.get_mut(id.0)
    }

    /// All positions, in creation order
    pub fn iter(&self) -> impl Iterator<Item = (PositionId, &AAPosition)> {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, pos)| (PositionId(i), pos))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of (position, structure) pairs known not to map
    pub fn unmapped_count(&self) -> usize {
        self.positions
            .iter()
            .map(|pos| pos.not_on_structures().count())
            .sum()
    }
}

impl<A: SequenceAligner> Index<PositionId> for PositionManager<A> {
    type Output = AAPosition;

    fn index(&self, id: PositionId) -> &AAPosition {
        &self.positions[id.0]
    }
}

impl<A: SequenceAligner> IndexMut<PositionId> for PositionManager<A> {
    fn index_mut(&mut self, id: PositionId) -> &mut AAPosition {
        &mut self.positions[id.0]
    }
}

/// Transcript residue at the 5' end of a region
///
/// An intronic endpoint snaps downstream to the first base of the next exon.
fn five_prime_residue(gene: &Gene, pos: u64) -> Option<u64> {
    if let Some(residue) = gene.transcript_aa_position(pos) {
        return Some(residue);
    }
    let forward = gene.is_forward();
    gene.exons
        .iter()
        .find(|exon| if forward { exon.min() > pos } else { exon.max() < pos })
        .and_then(|exon| exon.residue_at(exon.start))
}

/// Transcript residue at the 3' end of a region
///
/// An intronic endpoint snaps upstream to the last base of the previous exon.
fn three_prime_residue(gene: &Gene, pos: u64) -> Option<u64> {
    if let Some(residue) = gene.transcript_aa_position(pos) {
        return Some(residue);
    }
    let forward = gene.is_forward();
    gene.exons
        .iter()
        .rev()
        .find(|exon| if forward { exon.max() < pos } else { exon.min() > pos })
        .and_then(|exon| exon.residue_at(exon.end))
}
