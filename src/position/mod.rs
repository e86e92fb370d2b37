//! Residue positions
//!
//! An [`AAPosition`] is one queried protein region: a 1-based inclusive
//! residue range on a gene's canonical protein, together with everything
//! learned about it while walking candidate structures. Positions live in
//! the arena of a [`PositionManager`] and are referred to by [`PositionId`].
//!
//! Positions only accumulate: structure hits, interface hits and negative
//! "not on this structure" markers are added, never removed.

mod manager;

pub use manager::PositionManager;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::coords::closed_ranges_overlap;

/// Handle to an [`AAPosition`] owned by a [`PositionManager`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PositionId(pub(crate) usize);

impl PositionId {
    /// Index of the position in its manager
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A queried region of a gene's canonical protein
///
/// Identity is `(start, end, description)`; the accumulated maps do not
/// take part in equality or hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AAPosition {
    start: u64,
    end: u64,
    description: String,
    gene_id: String,
    genomic_min: u64,
    genomic_max: u64,
    /// structure id -> "label:chain" hits
    structure_residues: BTreeMap<String, BTreeSet<String>>,
    /// structure id -> hits confirmed at an interface
    interface_residues: BTreeMap<String, BTreeSet<String>>,
    /// partner accession (or ligand) -> interface hits
    partner_interfaces: BTreeMap<String, BTreeSet<String>>,
    /// structure id -> "label:chain" -> canonical residue
    pdb_to_protein: BTreeMap<String, BTreeMap<String, u64>>,
    not_on_structure: BTreeSet<String>,
}

impl AAPosition {
    /// Create a position covering residues `start..=end` of `gene_id`'s protein
    pub fn new(
        start: u64,
        end: u64,
        gene_id: impl Into<String>,
        description: impl Into<String>,
        genomic_min: u64,
        genomic_max: u64,
    ) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
            description: description.into(),
            gene_id: gene_id.into(),
            genomic_min,
            genomic_max,
            structure_residues: BTreeMap::new(),
            interface_residues: BTreeMap::new(),
            partner_interfaces: BTreeMap::new(),
            pdb_to_protein: BTreeMap::new(),
            not_on_structure: BTreeSet::new(),
        }
    }

    /// First residue (1-based, inclusive)
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Last residue (1-based, inclusive)
    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn gene_id(&self) -> &str {
        &self.gene_id
    }

    /// Genomic bounds of the query that produced this position (0-based, inclusive)
    pub fn genomic_bounds(&self) -> (u64, u64) {
        (self.genomic_min, self.genomic_max)
    }

    /// Number of residues covered
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// A position always covers at least one residue
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, residue: u64) -> bool {
        residue >= self.start && residue <= self.end
    }

    /// Check whether `[start, end]` overlaps this position
    pub fn overlaps(&self, start: u64, end: u64) -> bool {
        closed_ranges_overlap(self.start, self.end, start, end)
    }

    /// Record a structural residue found for canonical residue `residue`
    pub fn add_structure_residue(&mut self, structure: &str, pdb_position: &str, residue: u64) {
        self.structure_residues
            .entry(structure.to_string())
            .or_default()
            .insert(pdb_position.to_string());
        self.pdb_to_protein
            .entry(structure.to_string())
            .or_default()
            .insert(pdb_position.to_string(), residue);
    }

    /// Record an interface hit against `partner` on `structure`
    pub fn add_interface_residue(&mut self, structure: &str, partner: &str, pdb_position: &str) {
        self.interface_residues
            .entry(structure.to_string())
            .or_default()
            .insert(pdb_position.to_string());
        self.partner_interfaces
            .entry(partner.to_string())
            .or_default()
            .insert(pdb_position.to_string());
    }

    /// Structural residues found on `structure`
    pub fn structure_residues(&self, structure: &str) -> Option<&BTreeSet<String>> {
        self.structure_residues.get(structure)
    }

    /// Interface residues found on `structure`
    pub fn interface_residues(&self, structure: &str) -> Option<&BTreeSet<String>> {
        self.interface_residues.get(structure)
    }

    /// Interface residues found against `partner`, across all structures
    pub fn partner_interfaces(&self, partner: &str) -> Option<&BTreeSet<String>> {
        self.partner_interfaces.get(partner)
    }

    /// Structures this position was found on
    pub fn structures(&self) -> impl Iterator<Item = &str> {
        self.structure_residues.keys().map(String::as_str)
    }

    /// Partners this position has interface residues with
    pub fn partners(&self) -> impl Iterator<Item = &str> {
        self.partner_interfaces.keys().map(String::as_str)
    }

    /// Canonical residue behind a structural residue
    pub fn protein_position(&self, structure: &str, pdb_position: &str) -> Option<u64> {
        self.pdb_to_protein
            .get(structure)
            .and_then(|residues| residues.get(pdb_position))
            .copied()
    }

    /// `(structural residue, canonical residue)` pairs on `structure`
    pub fn pdb_positions(&self, structure: &str) -> impl Iterator<Item = (&str, u64)> {
        self.pdb_to_protein
            .get(structure)
            .into_iter()
            .flat_map(|residues| residues.iter().map(|(pdb, pos)| (pdb.as_str(), *pos)))
    }

    /// Record that this position has no residue on `structure`
    pub fn mark_not_on_structure(&mut self, structure: &str) {
        self.not_on_structure.insert(structure.to_string());
    }

    pub fn is_not_on_structure(&self, structure: &str) -> bool {
        self.not_on_structure.contains(structure)
    }

    /// Structures this position is known not to map to
    pub fn not_on_structures(&self) -> impl Iterator<Item = &str> {
        self.not_on_structure.iter().map(String::as_str)
    }

    pub fn has_structure_residues(&self) -> bool {
        self.structure_residues.values().any(|set| !set.is_empty())
    }

    pub fn has_interface_residues(&self) -> bool {
        self.interface_residues.values().any(|set| !set.is_empty())
    }
}

impl PartialEq for AAPosition {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end && self.description == other.description
    }
}

impl Eq for AAPosition {}

impl Hash for AAPosition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
        self.description.hash(state);
    }
}

impl fmt::Display for AAPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{} ({})", self.gene_id, self.start, self.end, self.description)
    }
}
