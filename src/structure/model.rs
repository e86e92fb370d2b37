//! Structure data shapes
//!
//! # Coordinate System
//!
//! | Field | Basis | Notes |
//! |-------|-------|-------|
//! | `StructureResidue.number` | native | Author numbering from the structure file, may be negative |
//! | `ChainMapping.start`, `ChainMapping.end` | 1-based inclusive | Canonical protein residues covered by the chain |
//!
//! Structural residues are identified as `"label:chain"`, where the label is
//! the residue number plus its optional insertion code (`"52A:B"`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::coords::closed_ranges_overlap;
use crate::error::InterfaceError;

/// Which protein of an interacting pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// The interaction partner's side
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Format a structural residue identifier, e.g. `"52A:B"`
pub fn pdb_position(label: &str, chain: &str) -> String {
    format!("{}:{}", label, chain)
}

/// Chain part of a `"label:chain"` identifier
pub fn pdb_position_chain(position: &str) -> Option<&str> {
    position.rsplit_once(':').map(|(_, chain)| chain)
}

/// One observed residue of a structure chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureResidue {
    /// Residue number in the structure's own numbering
    pub number: i32,
    /// Insertion code, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insertion_code: Option<char>,
    /// One-letter amino acid code
    pub code: char,
}

impl StructureResidue {
    pub fn new(number: i32, code: char) -> Self {
        Self {
            number,
            insertion_code: None,
            code,
        }
    }

    /// Residue number followed by the insertion code, e.g. `"52A"`
    pub fn label(&self) -> String {
        match self.insertion_code {
            Some(code) => format!("{}{}", self.number, code),
            None => self.number.to_string(),
        }
    }
}

/// A polymer chain with its observed residues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureChain {
    pub id: String,
    pub residues: Vec<StructureResidue>,
}

impl StructureChain {
    pub fn new(id: impl Into<String>, residues: Vec<StructureResidue>) -> Self {
        Self {
            id: id.into(),
            residues,
        }
    }

    /// Chain of consecutively numbered residues starting at `first`
    pub fn from_sequence(id: impl Into<String>, sequence: &str, first: i32) -> Self {
        let residues = sequence
            .chars()
            .zip(first..)
            .map(|(code, number)| StructureResidue::new(number, code))
            .collect();
        Self::new(id, residues)
    }

    /// Observed residue sequence
    pub fn sequence(&self) -> String {
        self.residues.iter().map(|r| r.code).collect()
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

/// A parsed 3D structure, reduced to its observed residues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structure {
    pub id: String,
    pub chains: Vec<StructureChain>,
}

impl Structure {
    pub fn new(id: impl Into<String>, chains: Vec<StructureChain>) -> Self {
        Self {
            id: id.into(),
            chains,
        }
    }

    pub fn chain(&self, id: &str) -> Option<&StructureChain> {
        self.chains.iter().find(|chain| chain.id == id)
    }

    /// Like [`chain`](Self::chain), but a missing chain is a `ChainNotFound` error
    pub fn require_chain(&self, id: &str) -> Result<&StructureChain, InterfaceError> {
        self.chain(id).ok_or_else(|| InterfaceError::ChainNotFound {
            structure: self.id.clone(),
            chain: id.to_string(),
        })
    }
}

/// Canonical protein residues covered by one chain of a structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainMapping {
    pub structure_id: String,
    pub chain_id: String,
    /// Canonical protein accession
    pub protein: String,
    /// First covered residue (1-based, inclusive)
    pub start: u64,
    /// Last covered residue (1-based, inclusive)
    pub end: u64,
    /// Covered part of the canonical sequence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<String>,
}

impl ChainMapping {
    pub fn new(
        structure_id: impl Into<String>,
        chain_id: impl Into<String>,
        protein: impl Into<String>,
        start: u64,
        end: u64,
    ) -> Self {
        Self {
            structure_id: structure_id.into(),
            chain_id: chain_id.into(),
            protein: protein.into(),
            start: start.min(end),
            end: start.max(end),
            sequence: None,
        }
    }

    /// Set the covered sequence by slicing the canonical protein
    ///
    /// Has no effect once a sequence is set.
    pub fn set_sequence_from(&mut self, protein_sequence: &str) {
        if self.sequence.is_some() {
            return;
        }
        let from = self.start.saturating_sub(1) as usize;
        let to = (self.end as usize).min(protein_sequence.len());
        self.sequence = protein_sequence.get(from..to).map(str::to_string);
    }

    /// Check whether residues `[start, end]` overlap this chain's coverage
    pub fn overlaps(&self, start: u64, end: u64) -> bool {
        closed_ranges_overlap(self.start, self.end, start, end)
    }
}

/// Provenance of a structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureKind {
    /// Solved experimentally
    #[default]
    Experimental,
    /// Homology model
    Model,
    /// Computationally predicted
    Predicted,
}

/// Chain mappings of a single protein or of an interacting pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureChains {
    One(Vec<ChainMapping>),
    Two(Vec<ChainMapping>, Vec<ChainMapping>),
}

impl StructureChains {
    /// Every chain mapping for `accession`, whichever side it is on
    pub fn chains_for(&self, accession: &str) -> Vec<&ChainMapping> {
        match self {
            StructureChains::One(chains) => filter_chains(chains, accession),
            StructureChains::Two(a, b) => a
                .iter()
                .chain(b.iter())
                .filter(|chain| chain.protein == accession)
                .collect(),
        }
    }

    /// Chain mappings for `accession` playing the role of `side`
    ///
    /// A single-protein structure has no sides, so every chain of the
    /// protein qualifies.
    pub fn chains_for_side(&self, side: Side, accession: &str) -> Vec<&ChainMapping> {
        match (self, side) {
            (StructureChains::One(chains), _) => filter_chains(chains, accession),
            (StructureChains::Two(a, _), Side::A) => filter_chains(a, accession),
            (StructureChains::Two(_, b), Side::B) => filter_chains(b, accession),
        }
    }

    /// Chain identifiers for `accession` playing the role of `side`
    pub fn chain_ids_for_side(&self, side: Side, accession: &str) -> Vec<String> {
        self.chains_for_side(side, accession)
            .into_iter()
            .map(|chain| chain.chain_id.clone())
            .collect()
    }

    /// Same chains with sides A and B exchanged
    pub fn swapped(self) -> Self {
        match self {
            StructureChains::Two(a, b) => StructureChains::Two(b, a),
            one => one,
        }
    }
}

fn filter_chains<'a>(chains: &'a [ChainMapping], accession: &str) -> Vec<&'a ChainMapping> {
    chains.iter().filter(|chain| chain.protein == accession).collect()
}

/// A structure known to contain one protein, or an interacting pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureModel {
    pub id: String,
    #[serde(default)]
    pub kind: StructureKind,
    pub chains: StructureChains,
}

impl StructureModel {
    /// Structure of a single protein
    pub fn single(id: impl Into<String>, kind: StructureKind, chains: Vec<ChainMapping>) -> Self {
        Self {
            id: id.into(),
            kind,
            chains: StructureChains::One(chains),
        }
    }

    /// Structure of an interacting pair
    pub fn interaction(
        id: impl Into<String>,
        kind: StructureKind,
        chains_a: Vec<ChainMapping>,
        chains_b: Vec<ChainMapping>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            chains: StructureChains::Two(chains_a, chains_b),
        }
    }

    pub fn is_interaction(&self) -> bool {
        matches!(self.chains, StructureChains::Two(..))
    }

    pub fn chains_for(&self, accession: &str) -> Vec<&ChainMapping> {
        self.chains.chains_for(accession)
    }

    pub fn chains_for_side(&self, side: Side, accession: &str) -> Vec<&ChainMapping> {
        self.chains.chains_for_side(side, accession)
    }
}

/// Canonical protein record from a protein data provider
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProteinEntry {
    pub accession: String,
    #[serde(default)]
    pub gene_names: Vec<String>,
    pub sequence: String,
    /// Cross-referenced structure identifiers
    #[serde(default)]
    pub pdb_refs: Vec<String>,
    /// Isoform accession -> sequence
    #[serde(default)]
    pub isoforms: BTreeMap<String, String>,
}

impl ProteinEntry {
    pub fn new(accession: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            accession: accession.into(),
            sequence: sequence.into(),
            ..Default::default()
        }
    }

    /// Sequence of an isoform, or the canonical sequence for the entry's own accession
    pub fn isoform_sequence(&self, accession: &str) -> Option<&str> {
        if accession == self.accession {
            return Some(&self.sequence);
        }
        self.isoforms.get(accession).map(String::as_str)
    }
}
