//! Core entity types shared by the loaders and the verifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Candidate pair
// ---------------------------------------------------------------------------

/// A scored subject–object association produced by an upstream ranking model.
/// Position in the candidate list is the rank; nothing here reorders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePair {
    pub subject: String, // drug id or miRNA name
    pub object: String,  // target id or disease name
    pub score: f64,
}

impl CandidatePair {
    pub fn new(subject: impl Into<String>, object: impl Into<String>, score: f64) -> Self {
        Self {
            subject: subject.into(),
            object: object.into(),
            score,
        }
    }
}

// ---------------------------------------------------------------------------
// Identifier namespaces
// ---------------------------------------------------------------------------

/// Identifier namespaces reachable through the drug and target maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    #[serde(rename = "drugbank")]
    DrugBank,
    Chembl,
    #[serde(rename = "pubchem_cid")]
    PubChemCid,
    Uniprot,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::DrugBank => "drugbank",
            Namespace::Chembl => "chembl",
            Namespace::PubChemCid => "pubchem_cid",
            Namespace::Uniprot => "uniprot",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Evidence key casing
// ---------------------------------------------------------------------------

/// Which spelling of a candidate entity id an evidence table is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCasing {
    /// Keys follow the normalised spelling (e.g. `hsa-miR-21`).
    Normalised,
    /// Keys follow the candidate list's own spelling (e.g. `hsa-mir-21`).
    #[default]
    Raw,
}
