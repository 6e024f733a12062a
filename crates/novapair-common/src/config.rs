//! Run configuration for verification jobs.
//!
//! Every field has a default matching the reference database layout, so an
//! empty file (or no file at all) yields a working configuration. Values
//! can be supplied as YAML, JSON or TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::entities::KeyCasing;
use crate::error::{NovapairError, Result};

/// Complete verification run configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    /// Reference database folder and file names
    #[serde(default)]
    pub database: DatabaseFiles,

    /// Disease evidence sources for association verification
    #[serde(default)]
    pub evidence: EvidenceConfig,

    /// Report options
    #[serde(default)]
    pub report: ReportConfig,
}

// ── Database Files ────────────────────────────────────────────────────────────

/// Fixed file names inside the reference database folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseFiles {
    /// Database folder; usually given on the command line instead
    pub folder: Option<PathBuf>,

    #[serde(default = "default_kegg")]
    pub kegg: String,

    #[serde(default = "default_drugbank")]
    pub drugbank: String,

    #[serde(default = "default_chembl")]
    pub chembl: String,

    #[serde(default = "default_matador")]
    pub matador: String,

    /// PubChem substance → compound id substitution table
    #[serde(default = "default_pubchem_sid_map")]
    pub pubchem_sid_map: String,

    /// KEGG drug → drugbank / chembl / pubchem SID map
    #[serde(default = "default_kegg_drug_map")]
    pub kegg_drug_map: String,

    #[serde(default = "default_target_uniprot")]
    pub target_uniprot: String,

    #[serde(default = "default_target_chembl")]
    pub target_chembl: String,
}

fn default_kegg() -> String { "kegg.txt".to_string() }
fn default_drugbank() -> String { "drugbank.txt".to_string() }
fn default_chembl() -> String { "chembl.txt".to_string() }
fn default_matador() -> String { "matador.tsv".to_string() }
fn default_pubchem_sid_map() -> String { "pubchem_SIDs_to_CIDs.txt".to_string() }
fn default_kegg_drug_map() -> String { "kegg_drug_map.txt".to_string() }
fn default_target_uniprot() -> String { "target_kegg_uniprot.txt".to_string() }
fn default_target_chembl() -> String { "target_kegg_chembl.txt".to_string() }

impl Default for DatabaseFiles {
    fn default() -> Self {
        Self {
            folder: None,
            kegg: default_kegg(),
            drugbank: default_drugbank(),
            chembl: default_chembl(),
            matador: default_matador(),
            pubchem_sid_map: default_pubchem_sid_map(),
            kegg_drug_map: default_kegg_drug_map(),
            target_uniprot: default_target_uniprot(),
            target_chembl: default_target_chembl(),
        }
    }
}

// ── Evidence Sources ──────────────────────────────────────────────────────────

/// Disease evidence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceConfig {
    /// Disease prefix of the evidence files, e.g. "breast_cancer"
    pub disease: Option<String>,

    /// Substring rewritten in candidate ids before matching normalised tables
    #[serde(default = "default_normalise_from")]
    pub normalise_from: String,

    #[serde(default = "default_normalise_to")]
    pub normalise_to: String,

    /// Sources in check order
    #[serde(default = "default_sources")]
    pub sources: Vec<EvidenceSourceSpec>,
}

fn default_normalise_from() -> String { "mir".to_string() }
fn default_normalise_to() -> String { "miR".to_string() }

fn default_sources() -> Vec<EvidenceSourceSpec> {
    vec![
        EvidenceSourceSpec {
            name: "dbDEMC".to_string(),
            suffix: "_dbDEMC.csv".to_string(),
            column: "miRNA_ID".to_string(),
            casing: KeyCasing::Normalised,
            required: true,
        },
        EvidenceSourceSpec {
            name: "HMDD3.0".to_string(),
            suffix: "_hmdd3.csv".to_string(),
            column: "mir".to_string(),
            casing: KeyCasing::Raw,
            required: true,
        },
        EvidenceSourceSpec {
            name: "miRCancer".to_string(),
            suffix: "_miRCancer.csv".to_string(),
            column: "mirId".to_string(),
            casing: KeyCasing::Raw,
            required: false,
        },
    ]
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            disease: None,
            normalise_from: default_normalise_from(),
            normalise_to: default_normalise_to(),
            sources: default_sources(),
        }
    }
}

/// One disease-specific evidence table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceSourceSpec {
    /// Tag written into the Evidence column
    pub name: String,

    /// File name suffix appended to the disease prefix
    pub suffix: String,

    /// Column holding entity names
    pub column: String,

    #[serde(default)]
    pub casing: KeyCasing,

    /// Missing required files abort the run; optional ones are skipped
    #[serde(default)]
    pub required: bool,
}

impl EvidenceSourceSpec {
    /// File name for a given disease, e.g. `breast_cancer_dbDEMC.csv`.
    pub fn file_name(&self, disease: &str) -> String {
        format!("{disease}{}", self.suffix)
    }
}

// ── Report Configuration ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Rank cutoffs for the top-K statistics
    #[serde(default = "default_cutoffs")]
    pub cutoffs: Vec<usize>,

    /// Decimal places kept for scores in the drug–target report
    #[serde(default = "default_score_decimals")]
    pub score_decimals: u32,
}

fn default_cutoffs() -> Vec<usize> { vec![10, 30, 50, 100, 200, 500, 1000] }
fn default_score_decimals() -> u32 { 4 }

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            cutoffs: default_cutoffs(),
            score_decimals: default_score_decimals(),
        }
    }
}

// ── Helper Methods ─────────────────────────────────────────────────────────────

impl RunConfig {
    /// Load from YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load from JSON file
    pub fn from_json(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load from TOML file
    pub fn from_toml(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load by file extension (`.yaml`/`.yml`, `.json`, anything else as TOML)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(NovapairError::MissingFile(path.to_path_buf()));
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let config = match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml(path)?,
            Some("json") => Self::from_json(path)?,
            _ => Self::from_toml(path)?,
        };
        config.validate()?;
        debug!(path = %path.display(), "Loaded run configuration");
        Ok(config)
    }

    /// Save to YAML file
    pub fn to_yaml(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings that cannot produce a meaningful report.
    pub fn validate(&self) -> Result<()> {
        if self.report.cutoffs.iter().any(|&k| k == 0) {
            return Err(NovapairError::Config("cutoffs must be positive".to_string()));
        }
        if self.evidence.sources.is_empty() {
            return Err(NovapairError::Config("at least one evidence source is required".to_string()));
        }
        if self.evidence.normalise_from.is_empty() {
            return Err(NovapairError::Config("normalise_from must not be empty".to_string()));
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
