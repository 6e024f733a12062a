//! Run settings for the `novapair` binary.
//! Reads an optional configuration file and lets command-line values override it.

use std::path::{Path, PathBuf};

use anyhow::Context;
use novapair_common::RunConfig;

mod tests;

/// Load the configuration file, or defaults when none is given.
pub fn load(path: Option<&Path>) -> anyhow::Result<RunConfig> {
    match path {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(RunConfig::default()),
    }
}

/// Write `config` as YAML, e.g. as a starting point for a run configuration.
pub fn write_template(config: &RunConfig, path: &Path) -> anyhow::Result<()> {
    config
        .to_yaml(path)
        .with_context(|| format!("Failed to write configuration template to {}", path.display()))
}

/// Apply command-line overrides and re-validate.
pub fn apply_overrides(
    mut config: RunConfig,
    database: Option<PathBuf>,
    disease: Option<String>,
    cutoffs: Vec<usize>,
) -> anyhow::Result<RunConfig> {
    if database.is_some() {
        config.database.folder = database;
    }
    if disease.is_some() {
        config.evidence.disease = disease;
    }
    if !cutoffs.is_empty() {
        config.report.cutoffs = cutoffs;
    }
    config.validate()?;
    Ok(config)
}

/// The database folder; required for every subcommand.
pub fn database_folder(config: &RunConfig) -> anyhow::Result<&Path> {
    config.database.folder.as_deref().ok_or_else(|| {
        anyhow::anyhow!("No database folder: pass --database or set database.folder in the configuration")
    })
}

/// The disease prefix of the evidence files.
pub fn disease(config: &RunConfig) -> anyhow::Result<&str> {
    config.evidence.disease.as_deref().ok_or_else(|| {
        anyhow::anyhow!("No disease: pass --disease or set evidence.disease in the configuration")
    })
}
