// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-interface: residue mapping for molecular interaction interfaces
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! Given a genomic region and two interacting proteins, this crate finds
//! which residues of each protein the region encodes, locates those
//! residues on 3D structures of the pair, flags the ones at the contact
//! interface, and projects them back to genomic intervals.
//!
//! # Example
//!
//! ```
//! use ferro_interface::{InteractionQuery, MockProvider, QueryScope, ResultQuality};
//!
//! // A small interacting pair with genes and one complex structure
//! let provider = MockProvider::with_test_data();
//!
//! let mut scope = QueryScope::new(&provider, &provider);
//! for gene in provider.genes() {
//!     scope.add_gene(gene.clone());
//! }
//!
//! // Region chr1:1012-1020 encodes residues 5-7 of P11111
//! let query = InteractionQuery::new("chr1", 1012, 1020, "P11111", "P22222");
//! let report = scope.run(&query).unwrap();
//!
//! assert_eq!(report.overall_quality(), ResultQuality::HasInterface);
//! for (chromosome, range) in report.interface_ranges.iter() {
//!     println!("interface: {}:{}", chromosome, range);
//! }
//! ```

pub mod align;
pub mod config;
pub mod coords;
pub mod error;
pub mod gene;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod position;
pub mod range;
pub mod scope;
pub mod structure;

// Re-export commonly used types
pub use align::{Alignment, AlignmentMode, PairwiseAligner, ScoringScheme, SequenceAligner};
pub use config::InterfaceConfig;
pub use coords::GenomicInterval;
pub use error::{ErrorCode, InterfaceError};
pub use gene::{Exon, Gene, Strand};
pub use position::{AAPosition, PositionId, PositionManager};
pub use range::{Range, RangeMerger};
pub use scope::{InteractionQuery, QueryReport, QueryScope, ResultQuality};
pub use structure::{
    ChainMapping, MockProvider, ProteinEntry, ProteinProvider, Side, StructureMapper,
    StructureModel, StructureSource,
};

/// Result type alias for ferro-interface operations
pub type Result<T> = std::result::Result<T, InterfaceError>;
