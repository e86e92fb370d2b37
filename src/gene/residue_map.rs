//! Canonical protein to transcript residue mapping

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bidirectional 1-based map between canonical (UniProt) and transcript
/// residue positions.
///
/// The map only grows. Re-inserting a key overwrites it, which is harmless
/// because a given gene always produces the same pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidueMap {
    uniprot_to_transcript: BTreeMap<u64, u64>,
    transcript_to_uniprot: BTreeMap<u64, u64>,
}

impl ResidueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that canonical residue `uniprot` corresponds to transcript residue `transcript`
    pub fn insert(&mut self, uniprot: u64, transcript: u64) {
        self.uniprot_to_transcript.insert(uniprot, transcript);
        self.transcript_to_uniprot.insert(transcript, uniprot);
    }

    /// Record a batch of `(uniprot, transcript)` pairs
    pub fn extend<I: IntoIterator<Item = (u64, u64)>>(&mut self, pairs: I) {
        for (uniprot, transcript) in pairs {
            self.insert(uniprot, transcript);
        }
    }

    /// Transcript residue for a canonical residue
    pub fn transcript_position(&self, uniprot: u64) -> Option<u64> {
        self.uniprot_to_transcript.get(&uniprot).copied()
    }

    /// Canonical residue for a transcript residue
    pub fn uniprot_position(&self, transcript: u64) -> Option<u64> {
        self.transcript_to_uniprot.get(&transcript).copied()
    }

    /// Number of canonical residues mapped
    pub fn len(&self) -> usize {
        self.uniprot_to_transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uniprot_to_transcript.is_empty()
    }
}
