//! 3D structures, their collaborators, and residue/interface mapping
//!
//! A [`StructureModel`] says which chains of a structure carry which
//! protein, and which residues of the protein each chain covers. The
//! [`StructureMapper`] aligns the canonical protein onto each chain's
//! observed residues to locate [`AAPosition`](crate::position::AAPosition)s
//! in structure numbering, then intersects those with the contact sets a
//! [`StructureSource`] supplies.

mod mapper;
mod mock;
mod model;
mod source;

pub use mapper::{ResidueSets, StructureMapper};
pub use mock::{ContactRecord, LigandContactRecord, MockProvider};
pub use model::{
    pdb_position, pdb_position_chain, ChainMapping, ProteinEntry, Side, Structure, StructureChain,
    StructureChains, StructureKind, StructureModel, StructureResidue,
};
pub use source::{ProteinProvider, StructureSource};
