//! Protein residues onto structure chains, and interface detection

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::model::{pdb_position, ChainMapping, ProteinEntry, Side, Structure, StructureModel};
use super::source::StructureSource;
use crate::align::{Alignment, AlignmentMode, PairwiseAligner, SequenceAligner, GAP};
use crate::position::{PositionId, PositionManager};

/// structure id -> `"label:chain"` residues
pub type ResidueSets = BTreeMap<String, BTreeSet<String>>;

/// Local alignment of the canonical protein onto one chain
struct ChainAlignment {
    chain_id: String,
    alignment: Alignment,
    /// Residue labels of the chain, in sequence order
    labels: Vec<String>,
}

impl ChainAlignment {
    /// Structural residues for canonical residues `start..=end`, with the residue they encode
    fn residues_in(&self, structure_id: &str, start: u64, end: u64, warn_unaligned: bool) -> Vec<(String, u64)> {
        let mut protein_cursor = self.alignment.start_a as u64;
        let mut chain_index = self.alignment.start_b;
        let mut hits = Vec::new();

        for (p, c) in self.alignment.columns() {
            match (p == GAP, c == GAP) {
                (false, false) => {
                    protein_cursor += 1;
                    if protein_cursor >= start && protein_cursor <= end {
                        if let Some(label) = self.labels.get(chain_index) {
                            hits.push((pdb_position(label, &self.chain_id), protein_cursor));
                        }
                    }
                    chain_index += 1;
                }
                // residue not observed in the chain
                (false, true) => protein_cursor += 1,
                (true, false) => {
                    if warn_unaligned && protein_cursor >= start && protein_cursor < end {
                        log::warn!(
                            "structure {} chain {}: residue {} is not aligned to reference protein",
                            structure_id,
                            self.chain_id,
                            self.labels.get(chain_index).map_or("?", String::as_str)
                        );
                    }
                    chain_index += 1;
                }
                (true, true) => {}
            }
            if protein_cursor > end {
                break;
            }
        }

        hits
    }
}

/// Locates residue positions on structures and flags interface residues
///
/// One mapper serves one query. Its containers only grow as more
/// structures and partners are processed.
#[derive(Debug, Clone)]
pub struct StructureMapper<A: SequenceAligner = PairwiseAligner> {
    aligner: A,
    warn_unaligned: bool,
    residues: ResidueSets,
    residues_a: ResidueSets,
    residues_b: ResidueSets,
    interface: ResidueSets,
    interface_positions_a: BTreeSet<PositionId>,
    interface_positions_b: BTreeSet<PositionId>,
}

impl Default for StructureMapper<PairwiseAligner> {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureMapper<PairwiseAligner> {
    /// Create a mapper using the default aligner
    pub fn new() -> Self {
        Self::with_aligner(PairwiseAligner::default())
    }
}

impl<A: SequenceAligner> StructureMapper<A> {
    /// Create a mapper using the given aligner
    pub fn with_aligner(aligner: A) -> Self {
        Self {
            aligner,
            warn_unaligned: true,
            residues: ResidueSets::new(),
            residues_a: ResidueSets::new(),
            residues_b: ResidueSets::new(),
            interface: ResidueSets::new(),
            interface_positions_a: BTreeSet::new(),
            interface_positions_b: BTreeSet::new(),
        }
    }

    /// Whether chain residues missing from the canonical protein are logged
    pub fn with_warn_unaligned(mut self, warn: bool) -> Self {
        self.warn_unaligned = warn;
        self
    }

    pub fn aligner(&self) -> &A {
        &self.aligner
    }

    /// Locate each residue position on `structure`
    ///
    /// For every chain of `protein` on the structure whose coverage overlaps
    /// a position, the canonical sequence is locally aligned to the chain's
    /// observed residues and each covered residue is recorded as a
    /// `"label:chain"` hit under `side`. The chains are looked up by
    /// accession alone, so a homodimer's position may be found on the
    /// partner's chain. A position with no hit on any chain of the protein
    /// is marked as not on this structure and skipped by later calls.
    /// Returns the number of positions found on the structure.
    pub fn search_structure_residues<S, B>(
        &mut self,
        source: &S,
        side: Side,
        protein: &ProteinEntry,
        structure: &StructureModel,
        residues: &[PositionId],
        positions: &mut PositionManager<B>,
    ) -> usize
    where
        S: StructureSource + ?Sized,
        B: SequenceAligner,
    {
        let pending: Vec<PositionId> = residues
            .iter()
            .copied()
            .filter(|id| {
                positions
                    .get(*id)
                    .is_some_and(|pos| !pos.is_not_on_structure(&structure.id))
            })
            .collect();
        if pending.is_empty() {
            return 0;
        }

        let parsed = match source.fetch_structure(&structure.id) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("{}, skipping", e);
                return 0;
            }
        };
        let mappings = structure.chains_for(&protein.accession);

        let mut alignments: HashMap<String, Option<ChainAlignment>> = HashMap::new();
        let mut found = 0;

        for id in pending {
            let (start, end) = (positions[id].start(), positions[id].end());
            let mut hits = Vec::new();

            for mapping in mappings.iter().filter(|m| m.overlaps(start, end)) {
                let chain = alignments
                    .entry(mapping.chain_id.clone())
                    .or_insert_with(|| self.align_chain(&parsed, mapping, protein));
                if let Some(chain) = chain {
                    hits.extend(chain.residues_in(&structure.id, start, end, self.warn_unaligned));
                }
            }

            let pos = &mut positions[id];
            if hits.is_empty() {
                log::debug!("{} is not on structure {}", pos, structure.id);
                pos.mark_not_on_structure(&structure.id);
                continue;
            }

            for (pdb, residue) in hits {
                pos.add_structure_residue(&structure.id, &pdb, residue);
                self.residues
                    .entry(structure.id.clone())
                    .or_default()
                    .insert(pdb.clone());
                self.side_residues_mut(side)
                    .entry(structure.id.clone())
                    .or_default()
                    .insert(pdb);
            }
            found += 1;
        }

        found
    }

    /// Flag residue positions in contact with `partner` on `structure`
    ///
    /// Each position's structural residues (from
    /// [`search_structure_residues`](Self::search_structure_residues)) are
    /// intersected with the source's contact set between the chains of
    /// `protein` on `side` and those of `partner` on the other side.
    /// Returns the number of positions found at the interface.
    pub fn search_interfaces<S, B>(
        &mut self,
        source: &S,
        side: Side,
        protein: &str,
        partner: &str,
        structure: &StructureModel,
        residues: &[PositionId],
        positions: &mut PositionManager<B>,
    ) -> usize
    where
        S: StructureSource + ?Sized,
        B: SequenceAligner,
    {
        if residues.is_empty() {
            return 0;
        }
        let chains_self = structure.chains.chain_ids_for_side(side, protein);
        let chains_partner = structure.chains.chain_ids_for_side(side.other(), partner);
        if chains_self.is_empty() || chains_partner.is_empty() {
            log::debug!(
                "structure {}: no chains for {} and {}",
                structure.id,
                protein,
                partner
            );
            return 0;
        }

        let contacts = source.get_contacts(&structure.id, &chains_self, &chains_partner);
        self.record_interfaces(side, partner, &structure.id, contacts, residues, positions)
    }

    /// Flag residue positions in contact with a bound ligand
    ///
    /// Hits are recorded with the ligand name as the partner.
    pub fn search_ligand_interfaces<S, B>(
        &mut self,
        source: &S,
        side: Side,
        protein: &str,
        ligand: &str,
        structure: &StructureModel,
        residues: &[PositionId],
        positions: &mut PositionManager<B>,
    ) -> usize
    where
        S: StructureSource + ?Sized,
        B: SequenceAligner,
    {
        if residues.is_empty() {
            return 0;
        }
        let chains = structure.chains.chain_ids_for_side(side, protein);
        if chains.is_empty() {
            return 0;
        }

        let contacts = source.get_ligand_contacts(&structure.id, &chains, ligand);
        self.record_interfaces(side, ligand, &structure.id, contacts, residues, positions)
    }

    fn record_interfaces<B: SequenceAligner>(
        &mut self,
        side: Side,
        partner: &str,
        structure_id: &str,
        contacts: Vec<String>,
        residues: &[PositionId],
        positions: &mut PositionManager<B>,
    ) -> usize {
        if contacts.is_empty() {
            return 0;
        }
        let contacts: BTreeSet<String> = contacts.into_iter().collect();
        let mut flagged = 0;

        for &id in residues {
            let Some(pos) = positions.get_mut(id) else {
                continue;
            };
            let hits: Vec<String> = pos
                .structure_residues(structure_id)
                .map(|found| found.intersection(&contacts).cloned().collect())
                .unwrap_or_default();
            if hits.is_empty() {
                continue;
            }

            for hit in hits {
                pos.add_interface_residue(structure_id, partner, &hit);
                self.interface
                    .entry(structure_id.to_string())
                    .or_default()
                    .insert(hit);
            }
            self.interface_positions_mut(side).insert(id);
            flagged += 1;
        }

        flagged
    }

    fn align_chain(
        &self,
        structure: &Structure,
        mapping: &ChainMapping,
        protein: &ProteinEntry,
    ) -> Option<ChainAlignment> {
        let chain = match structure.require_chain(&mapping.chain_id) {
            Ok(chain) => chain,
            Err(e) => {
                log::warn!("{}, skipping", e);
                return None;
            }
        };
        if chain.is_empty() {
            log::warn!(
                "structure {}: chain {} has no observed residues, skipping",
                structure.id,
                chain.id
            );
            return None;
        }

        match self
            .aligner
            .align(&protein.sequence, &chain.sequence(), AlignmentMode::Local)
        {
            Ok(alignment) => Some(ChainAlignment {
                chain_id: chain.id.clone(),
                alignment,
                labels: chain.residues.iter().map(|r| r.label()).collect(),
            }),
            Err(e) => {
                log::warn!(
                    "structure {}: cannot align {} to chain {}: {}",
                    structure.id,
                    protein.accession,
                    chain.id,
                    e
                );
                None
            }
        }
    }

    fn side_residues_mut(&mut self, side: Side) -> &mut ResidueSets {
        match side {
            Side::A => &mut self.residues_a,
            Side::B => &mut self.residues_b,
        }
    }

    fn interface_positions_mut(&mut self, side: Side) -> &mut BTreeSet<PositionId> {
        match side {
            Side::A => &mut self.interface_positions_a,
            Side::B => &mut self.interface_positions_b,
        }
    }

    /// Structural residues found for either protein
    pub fn residues(&self) -> &ResidueSets {
        &self.residues
    }

    /// Structural residues found for one protein
    pub fn side_residues(&self, side: Side) -> &ResidueSets {
        match side {
            Side::A => &self.residues_a,
            Side::B => &self.residues_b,
        }
    }

    /// Structural residues confirmed at an interface
    pub fn interface_residues(&self) -> &ResidueSets {
        &self.interface
    }

    /// Positions of protein A found at an interface
    pub fn interface_aa_positions_a(&self) -> &BTreeSet<PositionId> {
        &self.interface_positions_a
    }

    /// Positions of protein B found at an interface
    pub fn interface_aa_positions_b(&self) -> &BTreeSet<PositionId> {
        &self.interface_positions_b
    }

    pub fn interface_aa_positions(&self, side: Side) -> &BTreeSet<PositionId> {
        match side {
            Side::A => &self.interface_positions_a,
            Side::B => &self.interface_positions_b,
        }
    }

    pub fn has_residues_on_structure(&self) -> bool {
        has_any(&self.residues)
    }

    pub fn protein_a_has_residues_on_structure(&self) -> bool {
        has_any(&self.residues_a)
    }

    pub fn protein_b_has_residues_on_structure(&self) -> bool {
        has_any(&self.residues_b)
    }

    pub fn has_interface_on_structure(&self) -> bool {
        has_any(&self.interface)
    }

    pub fn protein_a_has_interface_on_structure(&self) -> bool {
        !self.interface_positions_a.is_empty()
    }

    pub fn protein_b_has_interface_on_structure(&self) -> bool {
        !self.interface_positions_b.is_empty()
    }
}

fn has_any(sets: &ResidueSets) -> bool {
    sets.values().any(|set| !set.is_empty())
}
