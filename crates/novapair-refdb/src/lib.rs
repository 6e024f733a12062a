//! Reference database loading.
//!
//! Every table is read fully into memory before verification starts and is
//! read-only afterwards. Lookups on a missing key return an empty slice,
//! never an error, so the verifiers can compose them with plain `any`.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`pairs`] | subject → associated ids (KEGG, DrugBank, ChEMBL, MATADOR) |
//! | [`idmap`] | KEGG id → namespace → ids, PubChem SID → CID |
//! | [`evidence`] | disease evidence tables keyed by entity name |
//! | [`candidates`] | scored candidate lists produced upstream |
//! | [`loader`] | the [`ReferenceLoader`] handle and the assembled databases |

pub mod pairs;
pub mod idmap;
pub mod evidence;
pub mod candidates;
pub mod loader;

pub use pairs::PairTable;
pub use idmap::{IdentifierMap, SubstanceMap};
pub use evidence::EvidenceTable;
pub use candidates::{load_scored_pairs, CandidateTable};
pub use loader::{load_evidence_tables, DrugTargetDatabase, FolderLoader, MemoryLoader, ReferenceLoader};
