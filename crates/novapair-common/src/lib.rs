//! novapair-common — Shared types, errors, and configuration used across all novapair crates.

pub mod error;
pub mod entities;
pub mod config;

// Re-export commonly used types
pub use error::{NovapairError, Result};
pub use entities::{CandidatePair, KeyCasing, Namespace};
pub use config::{RunConfig, DatabaseFiles, EvidenceSourceSpec, ReportConfig};
