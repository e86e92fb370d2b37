//! Collaborator traits for structure and protein data
//!
//! Implementations might include:
//! - [`MockProvider`](super::MockProvider) for testing
//! - A client for an interaction-structure database
//! - A local cache of parsed structure files

use super::model::{ProteinEntry, Structure, StructureModel};
use crate::error::InterfaceError;

/// Trait for providing 3D structures and their contacts
///
/// Contact computation (distance or accessibility based) is the source's
/// business; this crate only consumes the resulting residue sets.
pub trait StructureSource {
    /// Get a parsed structure by identifier
    fn get_structure(&self, id: &str) -> Option<Structure>;

    /// Get a parsed structure, failing with `StructureNotFound` when absent
    fn fetch_structure(&self, id: &str) -> Result<Structure, InterfaceError> {
        self.get_structure(id)
            .ok_or_else(|| InterfaceError::StructureNotFound { id: id.to_string() })
    }

    /// Residues of `chains_a` in contact with any residue of `chains_b`
    ///
    /// Residues are returned as `"label:chain"` identifiers.
    fn get_contacts(&self, id: &str, chains_a: &[String], chains_b: &[String]) -> Vec<String>;

    /// Residues of `chains` in contact with ligand `ligand`
    fn get_ligand_contacts(&self, _id: &str, _chains: &[String], _ligand: &str) -> Vec<String> {
        Vec::new()
    }

    /// Structures containing both proteins, with `a` on side A
    fn get_interaction_structures(&self, a: &str, b: &str) -> Vec<StructureModel>;

    /// Check if any structure is known for the pair
    fn has_interaction(&self, a: &str, b: &str) -> bool {
        !self.get_interaction_structures(a, b).is_empty()
    }

    /// Structures of a single protein
    fn get_protein_structures(&self, _accession: &str) -> Vec<StructureModel> {
        Vec::new()
    }
}

/// Blanket implementation for boxed trait objects
impl StructureSource for Box<dyn StructureSource> {
    fn get_structure(&self, id: &str) -> Option<Structure> {
        (**self).get_structure(id)
    }

    fn fetch_structure(&self, id: &str) -> Result<Structure, InterfaceError> {
        (**self).fetch_structure(id)
    }

    fn get_contacts(&self, id: &str, chains_a: &[String], chains_b: &[String]) -> Vec<String> {
        (**self).get_contacts(id, chains_a, chains_b)
    }

    fn get_ligand_contacts(&self, id: &str, chains: &[String], ligand: &str) -> Vec<String> {
        (**self).get_ligand_contacts(id, chains, ligand)
    }

    fn get_interaction_structures(&self, a: &str, b: &str) -> Vec<StructureModel> {
        (**self).get_interaction_structures(a, b)
    }

    fn has_interaction(&self, a: &str, b: &str) -> bool {
        (**self).has_interaction(a, b)
    }

    fn get_protein_structures(&self, accession: &str) -> Vec<StructureModel> {
        (**self).get_protein_structures(accession)
    }
}

/// Trait for providing canonical protein records
pub trait ProteinProvider {
    /// Get a protein entry by accession
    fn get_protein(&self, accession: &str) -> Result<ProteinEntry, InterfaceError>;

    /// Check if a protein entry exists
    fn has_protein(&self, accession: &str) -> bool {
        self.get_protein(accession).is_ok()
    }
}

/// Blanket implementation for boxed trait objects
impl ProteinProvider for Box<dyn ProteinProvider> {
    fn get_protein(&self, accession: &str) -> Result<ProteinEntry, InterfaceError> {
        (**self).get_protein(accession)
    }

    fn has_protein(&self, accession: &str) -> bool {
        (**self).has_protein(accession)
    }
}
