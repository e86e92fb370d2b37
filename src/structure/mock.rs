//! Mock structure and protein provider for testing

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use super::model::{
    pdb_position_chain, ChainMapping, ProteinEntry, Structure, StructureChain, StructureChains,
    StructureKind, StructureModel,
};
use super::source::{ProteinProvider, StructureSource};
use crate::error::InterfaceError;
use crate::gene::Gene;

/// A residue-residue contact within one structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub structure: String,
    /// `"label:chain"`
    pub first: String,
    /// `"label:chain"`
    pub second: String,
}

/// A residue in contact with a bound ligand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LigandContactRecord {
    pub structure: String,
    pub ligand: String,
    /// `"label:chain"`
    pub residue: String,
}

/// On-disk layout of a mock fixture
#[derive(Debug, Default, Deserialize)]
struct Fixture {
    #[serde(default)]
    structures: Vec<Structure>,
    #[serde(default)]
    models: Vec<StructureModel>,
    #[serde(default)]
    contacts: Vec<ContactRecord>,
    #[serde(default)]
    ligand_contacts: Vec<LigandContactRecord>,
    #[serde(default)]
    proteins: Vec<ProteinEntry>,
    #[serde(default)]
    genes: Vec<Gene>,
}

/// In-memory [`StructureSource`] and [`ProteinProvider`]
///
/// Contacts are stored once per residue pair and answered in both
/// directions.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    structures: HashMap<String, Structure>,
    models: Vec<StructureModel>,
    contacts: Vec<ContactRecord>,
    ligand_contacts: Vec<LigandContactRecord>,
    proteins: HashMap<String, ProteinEntry>,
    genes: Vec<Gene>,
}

impl MockProvider {
    /// Create an empty mock provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a fixture from a JSON file
    pub fn from_json(path: &Path) -> Result<Self, InterfaceError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Load a fixture from a JSON string
    ///
    /// The object may hold `structures`, `models`, `contacts`,
    /// `ligand_contacts`, `proteins` and `genes` arrays; all are optional.
    pub fn from_json_str(content: &str) -> Result<Self, InterfaceError> {
        let fixture: Fixture = serde_json::from_str(content)?;

        let mut provider = Self::new();
        for structure in fixture.structures {
            provider.add_structure(structure);
        }
        for protein in fixture.proteins {
            provider.add_protein(protein);
        }
        provider.models = fixture.models;
        provider.contacts = fixture.contacts;
        provider.ligand_contacts = fixture.ligand_contacts;
        provider.genes = fixture.genes;
        Ok(provider)
    }

    pub fn add_structure(&mut self, structure: Structure) {
        self.structures.insert(structure.id.clone(), structure);
    }

    pub fn add_model(&mut self, model: StructureModel) {
        self.models.push(model);
    }

    /// Add a contact between two `"label:chain"` residues
    pub fn add_contact(&mut self, structure: &str, first: &str, second: &str) {
        self.contacts.push(ContactRecord {
            structure: structure.to_string(),
            first: first.to_string(),
            second: second.to_string(),
        });
    }

    /// Add a residue in contact with `ligand`
    pub fn add_ligand_contact(&mut self, structure: &str, ligand: &str, residue: &str) {
        self.ligand_contacts.push(LigandContactRecord {
            structure: structure.to_string(),
            ligand: ligand.to_string(),
            residue: residue.to_string(),
        });
    }

    pub fn add_protein(&mut self, protein: ProteinEntry) {
        self.proteins.insert(protein.accession.clone(), protein);
    }

    pub fn add_gene(&mut self, gene: Gene) {
        self.genes.push(gene);
    }

    /// Genes carried by the fixture
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// Create a provider with a small interacting pair
    ///
    /// - `P11111` (20 residues) is encoded by `GENEA`, forward strand on
    ///   chr1, exons 1000-1029 and 1100-1129.
    /// - `P22222` (14 residues) is encoded by `GENEB`, reverse strand on
    ///   chr1, one exon 2041-2000.
    /// - Structure `1abc` holds both: chain A is `P11111` numbered from 101,
    ///   chain B is `P22222` residues 2-11 numbered from 3. Residues
    ///   105-107 of chain A touch chain B.
    /// - Structure `2xyz` is a predicted model of `P11111` residues 1-10,
    ///   with residue 7 touching a heme.
    pub fn with_test_data() -> Self {
        const SEQ_A: &str = "MKVLAWHCDEFGIKLMNPQR";
        const SEQ_B: &str = "GSTNYEWPLKRMAC";

        let mut provider = Self::new();

        let mut entry_a = ProteinEntry::new("P11111", SEQ_A);
        entry_a.gene_names = vec!["GENEA".to_string()];
        entry_a.pdb_refs = vec!["1abc".to_string(), "2xyz".to_string()];
        provider.add_protein(entry_a);

        let mut entry_b = ProteinEntry::new("P22222", SEQ_B);
        entry_b.gene_names = vec!["GENEB".to_string()];
        entry_b.pdb_refs = vec!["1abc".to_string()];
        provider.add_protein(entry_b);

        if let Ok(gene) =
            Gene::from_exon_bounds("GENEA", "chr1", &[(1000, 1029), (1100, 1129)], 1000, 1129)
        {
            provider.add_gene(
                gene.with_protein_accession("P11111")
                    .with_transcript_sequence(SEQ_A),
            );
        }
        if let Ok(gene) = Gene::from_exon_bounds("GENEB", "chr1", &[(2041, 2000)], 2000, 2041) {
            provider.add_gene(
                gene.with_protein_accession("P22222")
                    .with_transcript_sequence(SEQ_B),
            );
        }

        provider.add_structure(Structure::new(
            "1abc",
            vec![
                StructureChain::from_sequence("A", SEQ_A, 101),
                StructureChain::from_sequence("B", &SEQ_B[1..11], 3),
            ],
        ));
        provider.add_model(StructureModel::interaction(
            "1abc",
            StructureKind::Experimental,
            vec![ChainMapping::new("1abc", "A", "P11111", 1, 20)],
            vec![ChainMapping::new("1abc", "B", "P22222", 2, 11)],
        ));
        provider.add_contact("1abc", "105:A", "5:B");
        provider.add_contact("1abc", "106:A", "6:B");
        provider.add_contact("1abc", "107:A", "6:B");
        provider.add_contact("1abc", "115:A", "10:B");

        provider.add_structure(Structure::new(
            "2xyz",
            vec![StructureChain::from_sequence("A", &SEQ_A[..10], 1)],
        ));
        provider.add_model(StructureModel::single(
            "2xyz",
            StructureKind::Predicted,
            vec![ChainMapping::new("2xyz", "A", "P11111", 1, 10)],
        ));
        provider.add_ligand_contact("2xyz", "HEM", "7:A");

        provider
    }
}

fn on_chains(position: &str, chains: &[String]) -> bool {
    pdb_position_chain(position).is_some_and(|chain| chains.iter().any(|c| c == chain))
}

impl StructureSource for MockProvider {
    fn get_structure(&self, id: &str) -> Option<Structure> {
        self.structures.get(id).cloned()
    }

    fn get_contacts(&self, id: &str, chains_a: &[String], chains_b: &[String]) -> Vec<String> {
        let mut found = BTreeSet::new();
        for contact in self.contacts.iter().filter(|c| c.structure == id) {
            for (this, other) in [
                (&contact.first, &contact.second),
                (&contact.second, &contact.first),
            ] {
                if on_chains(this, chains_a) && on_chains(other, chains_b) {
                    found.insert(this.clone());
                }
            }
        }
        found.into_iter().collect()
    }

    fn get_ligand_contacts(&self, id: &str, chains: &[String], ligand: &str) -> Vec<String> {
        self.ligand_contacts
            .iter()
            .filter(|c| c.structure == id && c.ligand == ligand && on_chains(&c.residue, chains))
            .map(|c| c.residue.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn get_interaction_structures(&self, a: &str, b: &str) -> Vec<StructureModel> {
        let has = |chains: &[ChainMapping], accession: &str| {
            chains.iter().any(|chain| chain.protein == accession)
        };

        self.models
            .iter()
            .filter_map(|model| match &model.chains {
                StructureChains::Two(side_a, side_b) => {
                    if has(side_a, a) && has(side_b, b) {
                        Some(model.clone())
                    } else if has(side_a, b) && has(side_b, a) {
                        let mut swapped = model.clone();
                        swapped.chains = swapped.chains.swapped();
                        Some(swapped)
                    } else {
                        None
                    }
                }
                StructureChains::One(_) => None,
            })
            .collect()
    }

    fn get_protein_structures(&self, accession: &str) -> Vec<StructureModel> {
        self.models
            .iter()
            .filter(|model| !model.is_interaction() && !model.chains_for(accession).is_empty())
            .cloned()
            .collect()
    }
}

impl ProteinProvider for MockProvider {
    fn get_protein(&self, accession: &str) -> Result<ProteinEntry, InterfaceError> {
        self.proteins
            .get(accession)
            .cloned()
            .ok_or_else(|| InterfaceError::ProteinNotFound {
                accession: accession.to_string(),
            })
    }
}
