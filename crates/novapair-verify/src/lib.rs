//! novapair-verify — Confirmation of predicted pairs against reference databases.
//!
//! Two verifiers share one aggregator:
//! - [`drug_target`]: KEGG / DrugBank / ChEMBL / MATADOR checks through identifier maps
//! - [`association`]: miRNA–disease evidence tags by prefix match
//! - [`topk`]: confirmed counts at rank cutoffs
//!
//! [`report`] turns the results into report files and console lines.

pub mod drug_target;
pub mod association;
pub mod normalise;
pub mod topk;
pub mod report;

pub use drug_target::{verify_drug_target_pairs, DrugTargetSources, DrugTargetVerification, SourceFlags};
pub use association::{verify_associations, verify_top_bottom, EvidenceTags, ValidationSummary};
pub use normalise::{NameNormaliser, SubstringNormaliser};
pub use topk::{aggregate, CutoffStat};
pub use report::{AnnotatedTable, FileReportWriter, ReportWriter, StreamReportWriter};
