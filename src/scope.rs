//! Per-query context
//!
//! A [`QueryScope`] owns everything one interaction query accumulates: a
//! cache of the genes it may touch, the [`PositionManager`] holding its
//! residue positions, and the [`StructureMapper`] collecting structure and
//! interface hits. Collaborators (structure source, protein provider) are
//! only borrowed. Dropping the scope discards all query state.
//!
//! # Example
//!
//! ```
//! use ferro_interface::scope::{InteractionQuery, QueryScope, ResultQuality};
//! use ferro_interface::structure::MockProvider;
//!
//! let provider = MockProvider::with_test_data();
//! let mut scope = QueryScope::new(&provider, &provider);
//! for gene in provider.genes() {
//!     scope.add_gene(gene.clone());
//! }
//!
//! let query = InteractionQuery::new("chr1", 1012, 1020, "P11111", "P22222");
//! let report = scope.run(&query).unwrap();
//! assert_eq!(report.quality_a, ResultQuality::HasInterface);
//! assert_eq!(report.positions_a[0].start(), 5);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::align::{PairwiseAligner, SequenceAligner};
use crate::config::InterfaceConfig;
use crate::error::InterfaceError;
use crate::gene::Gene;
use crate::position::{AAPosition, PositionId, PositionManager};
use crate::range::{Range, RangeMerger};
use crate::structure::{ProteinProvider, Side, StructureMapper, StructureSource};

/// A genomic region and the two molecules believed to interact there
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InteractionQuery {
    pub chromosome: String,
    /// 0-based inclusive
    pub start: u64,
    /// 0-based inclusive
    pub end: u64,
    pub protein_a: String,
    pub protein_b: String,
}

impl InteractionQuery {
    pub fn new(
        chromosome: impl Into<String>,
        start: u64,
        end: u64,
        protein_a: impl Into<String>,
        protein_b: impl Into<String>,
    ) -> Self {
        Self {
            chromosome: chromosome.into(),
            start: start.min(end),
            end: start.max(end),
            protein_a: protein_a.into(),
            protein_b: protein_b.into(),
        }
    }
}

impl fmt::Display for InteractionQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{} {}/{}",
            self.chromosome, self.start, self.end, self.protein_a, self.protein_b
        )
    }
}

/// How far a query got for one side of the interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultQuality {
    /// No structure holds the pair
    #[default]
    None,
    /// A structure holds the pair, but none of the queried residues
    HasStructure,
    /// Queried residues were found on a structure
    HasResidue,
    /// Queried residues were found at the interface
    HasInterface,
}

impl fmt::Display for ResultQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResultQuality::None => "none",
            ResultQuality::HasStructure => "has-structure",
            ResultQuality::HasResidue => "has-residue",
            ResultQuality::HasInterface => "has-interface",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of one [`QueryScope::run`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryReport {
    /// Residue positions of protein A encoded by the region
    pub positions_a: Vec<AAPosition>,
    /// Residue positions of protein B encoded by the region
    pub positions_b: Vec<AAPosition>,
    pub quality_a: ResultQuality,
    pub quality_b: ResultQuality,
    /// Genomic ranges, per chromosome, encoding interface residues
    pub interface_ranges: RangeMerger,
    /// Genomic ranges, per chromosome, encoding residues seen on a structure
    pub structure_ranges: RangeMerger,
    /// Identifiers of the interaction structures examined
    pub structures: Vec<String>,
    /// Number of (position, structure) pairs known not to map
    pub unmapped: usize,
}

impl QueryReport {
    /// Positions of both sides, A first
    pub fn positions(&self) -> impl Iterator<Item = &AAPosition> {
        self.positions_a.iter().chain(self.positions_b.iter())
    }

    /// The better of the two sides
    pub fn overall_quality(&self) -> ResultQuality {
        self.quality_a.max(self.quality_b)
    }
}

/// Context for a single interaction query
///
/// Genes added to a scope are owned by it, so the residue maps learned
/// while mapping the region never leak into another query. A scope is meant
/// to serve one query; running a second one reuses the positions and
/// structure hits of the first.
pub struct QueryScope<'a, S: ?Sized, P: ?Sized, A: SequenceAligner = PairwiseAligner> {
    source: &'a S,
    proteins: &'a P,
    genes: BTreeMap<String, Gene>,
    positions: PositionManager<A>,
    mapper: StructureMapper<A>,
}

impl<'a, S, P> QueryScope<'a, S, P, PairwiseAligner>
where
    S: StructureSource + ?Sized,
    P: ProteinProvider + ?Sized,
{
    /// Create a scope using the default aligner
    pub fn new(source: &'a S, proteins: &'a P) -> Self {
        Self::with_aligner(source, proteins, PairwiseAligner::default())
    }

    /// Create a scope whose scoring and diagnostics follow `config`
    pub fn with_config(source: &'a S, proteins: &'a P, config: &InterfaceConfig) -> Self {
        let mut scope = Self::with_aligner(
            source,
            proteins,
            PairwiseAligner::new(config.to_scoring_scheme()),
        );
        scope.mapper = scope.mapper.with_warn_unaligned(config.warn_unaligned());
        scope
    }
}

impl<'a, S, P, A> QueryScope<'a, S, P, A>
where
    S: StructureSource + ?Sized,
    P: ProteinProvider + ?Sized,
    A: SequenceAligner,
{
    /// Create a scope using the given aligner for both genes and chains
    pub fn with_aligner(source: &'a S, proteins: &'a P, aligner: A) -> Self
    where
        A: Clone,
    {
        Self {
            source,
            proteins,
            genes: BTreeMap::new(),
            positions: PositionManager::with_aligner(aligner.clone()),
            mapper: StructureMapper::with_aligner(aligner),
        }
    }

    /// Add a gene to the scope's cache, replacing any gene with the same id
    pub fn add_gene(&mut self, gene: Gene) {
        self.genes.insert(gene.id.clone(), gene);
    }

    pub fn gene(&self, id: &str) -> Option<&Gene> {
        self.genes.get(id)
    }

    pub fn genes(&self) -> impl Iterator<Item = &Gene> {
        self.genes.values()
    }

    /// Residue positions of one cached gene for a genomic region
    ///
    /// The gene's canonical sequence is fetched from the protein provider
    /// when missing. Fails with `GeneNotFound` if no gene with `gene_id` was
    /// added.
    pub fn gene_aa_positions(
        &mut self,
        gene_id: &str,
        start: u64,
        end: u64,
    ) -> Result<Vec<PositionId>, InterfaceError> {
        let gene = self
            .genes
            .get_mut(gene_id)
            .ok_or_else(|| InterfaceError::GeneNotFound {
                id: gene_id.to_string(),
            })?;
        if gene.uniprot_sequence.is_none() {
            if let Some(accession) = gene.protein_accession.as_deref() {
                gene.uniprot_sequence = Some(self.proteins.get_protein(accession)?.sequence);
            }
        }
        Ok(self.positions.aa_positions(gene, start, end))
    }

    pub fn positions(&self) -> &PositionManager<A> {
        &self.positions
    }

    pub fn mapper(&self) -> &StructureMapper<A> {
        &self.mapper
    }

    /// Resolve which residues of the region sit on, and at the interface of,
    /// the structures holding the two proteins
    ///
    /// Errors only when a protein entry cannot be fetched. Genes whose
    /// mapping fails, missing structures and unmappable residues all show
    /// up as gaps in the report instead.
    pub fn run(&mut self, query: &InteractionQuery) -> Result<QueryReport, InterfaceError> {
        let entry_a = self.proteins.get_protein(&query.protein_a)?;
        let entry_b = self.proteins.get_protein(&query.protein_b)?;
        let structures = self
            .source
            .get_interaction_structures(&query.protein_a, &query.protein_b);
        log::debug!("{}: {} interaction structures", query, structures.len());

        let mut ids_a = Vec::new();
        let mut ids_b = Vec::new();
        for gene in self.genes.values_mut() {
            if !gene.overlaps(&query.chromosome, query.start, query.end) {
                continue;
            }
            let accession = gene.protein_accession.clone();
            for (entry, ids) in [(&entry_a, &mut ids_a), (&entry_b, &mut ids_b)] {
                if accession.as_deref() != Some(entry.accession.as_str()) {
                    continue;
                }
                if gene.uniprot_sequence.is_none() {
                    gene.uniprot_sequence = Some(entry.sequence.clone());
                }
                for id in self.positions.aa_positions(gene, query.start, query.end) {
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
            }
        }
        log::debug!(
            "{}: {} positions on {}, {} on {}",
            query,
            ids_a.len(),
            entry_a.accession,
            ids_b.len(),
            entry_b.accession
        );

        for structure in &structures {
            self.mapper.search_structure_residues(
                self.source,
                Side::A,
                &entry_a,
                structure,
                &ids_a,
                &mut self.positions,
            );
            self.mapper.search_structure_residues(
                self.source,
                Side::B,
                &entry_b,
                structure,
                &ids_b,
                &mut self.positions,
            );
            self.mapper.search_interfaces(
                self.source,
                Side::A,
                &entry_a.accession,
                &entry_b.accession,
                structure,
                &ids_a,
                &mut self.positions,
            );
            self.mapper.search_interfaces(
                self.source,
                Side::B,
                &entry_b.accession,
                &entry_a.accession,
                structure,
                &ids_b,
                &mut self.positions,
            );
        }

        let has_structure = !structures.is_empty();
        let mut report = QueryReport {
            quality_a: self.quality(Side::A, has_structure),
            quality_b: self.quality(Side::B, has_structure),
            structures: structures.iter().map(|s| s.id.clone()).collect(),
            unmapped: self.positions.unmapped_count(),
            ..QueryReport::default()
        };

        for &id in ids_a.iter().chain(ids_b.iter()) {
            self.project(id, &mut report);
        }
        report.positions_a = ids_a.iter().map(|&id| self.positions[id].clone()).collect();
        report.positions_b = ids_b.iter().map(|&id| self.positions[id].clone()).collect();

        Ok(report)
    }

    fn quality(&self, side: Side, has_structure: bool) -> ResultQuality {
        if !self.mapper.interface_aa_positions(side).is_empty() {
            ResultQuality::HasInterface
        } else if self
            .mapper
            .side_residues(side)
            .values()
            .any(|set| !set.is_empty())
        {
            ResultQuality::HasResidue
        } else if has_structure {
            ResultQuality::HasStructure
        } else {
            ResultQuality::None
        }
    }

    /// Project a position's structural residues back onto the genome
    fn project(&self, id: PositionId, report: &mut QueryReport) {
        let pos = &self.positions[id];
        let Some(gene) = self.genes.get(pos.gene_id()) else {
            return;
        };

        for structure in pos.structures() {
            let interface = pos.interface_residues(structure);
            for (pdb, residue) in pos.pdb_positions(structure) {
                let at_interface = interface.is_some_and(|set| set.contains(pdb));
                for interval in gene.uniprot_genome_positions(residue) {
                    let range = Range::new(interval.start, interval.end);
                    report
                        .structure_ranges
                        .add_range(interval.chromosome.clone(), range);
                    if at_interface {
                        report.interface_ranges.add_range(interval.chromosome, range);
                    }
                }
            }
        }
    }
}
