//! Reference loader handle and the assembled databases.
//!
//! [`ReferenceLoader`] hides where reference files come from. The folder
//! implementation reads the fixed-named dumps from disk; the in-memory one
//! serves literal text to tests.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use novapair_common::{DatabaseFiles, EvidenceSourceSpec, NovapairError, Result};
use tracing::{debug, info};

use crate::evidence::EvidenceTable;
use crate::idmap::{IdentifierMap, SubstanceMap};
use crate::pairs::PairTable;

/// Source of named reference files.
pub trait ReferenceLoader {
    /// Open a reference file. `Ok(None)` when it does not exist.
    fn open(&self, name: &str) -> Result<Option<Box<dyn BufRead + '_>>>;

    /// Where `name` would be read from, for error messages.
    fn locate(&self, name: &str) -> PathBuf;

    /// Open a file that must exist.
    fn require(&self, name: &str) -> Result<Box<dyn BufRead + '_>> {
        self.open(name)?
            .ok_or_else(|| NovapairError::MissingFile(self.locate(name)))
    }
}

// ── Folder loader ───────────────────────────────────────────────────────────

/// Reads reference files from a database folder.
#[derive(Debug, Clone)]
pub struct FolderLoader {
    folder: PathBuf,
}

impl FolderLoader {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self { folder: folder.into() }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }
}

impl ReferenceLoader for FolderLoader {
    fn open(&self, name: &str) -> Result<Option<Box<dyn BufRead + '_>>> {
        let path = self.locate(name);
        if !path.exists() {
            return Ok(None);
        }
        debug!("Opening {:?}", path);
        let file = File::open(&path)?;
        Ok(Some(Box::new(BufReader::new(file))))
    }

    fn locate(&self, name: &str) -> PathBuf {
        self.folder.join(name)
    }
}

// ── In-memory loader ────────────────────────────────────────────────────────

/// Serves reference files from strings.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: HashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named file.
    pub fn with(mut self, name: &str, content: &str) -> Self {
        self.files.insert(name.to_string(), content.to_string());
        self
    }
}

impl ReferenceLoader for MemoryLoader {
    fn open(&self, name: &str) -> Result<Option<Box<dyn BufRead + '_>>> {
        Ok(self
            .files
            .get(name)
            .map(|content| Box::new(content.as_bytes()) as Box<dyn BufRead + '_>))
    }

    fn locate(&self, name: &str) -> PathBuf {
        PathBuf::from(name)
    }
}

// ── Drug–target database ────────────────────────────────────────────────────

/// Every table the drug–target verifier reads.
#[derive(Debug, Clone, Default)]
pub struct DrugTargetDatabase {
    pub kegg: PairTable,
    pub drugbank: PairTable,
    pub chembl: PairTable,
    pub matador: PairTable,
    pub drug_map: IdentifierMap,
    pub target_map: IdentifierMap,
}

impl DrugTargetDatabase {
    /// Load all drug–target reference files. Every file is required.
    pub fn load(loader: &dyn ReferenceLoader, files: &DatabaseFiles) -> Result<Self> {
        let substances = SubstanceMap::from_reader(loader.require(&files.pubchem_sid_map)?)?;
        let drug_map = IdentifierMap::drug_map(loader.require(&files.kegg_drug_map)?, &substances)?;
        let target_map = IdentifierMap::target_map(
            loader.require(&files.target_uniprot)?,
            loader.require(&files.target_chembl)?,
        )?;

        let kegg = PairTable::from_reader(loader.require(&files.kegg)?)?;
        let drugbank = PairTable::from_reader(loader.require(&files.drugbank)?)?;
        let chembl = PairTable::from_reader(loader.require(&files.chembl)?)?;
        let matador = PairTable::from_matador_reader(loader.require(&files.matador)?)?;

        info!(
            "Reference database ready: kegg {} drugs, drugbank {}, chembl {}, matador {}, drug map {}, target map {}",
            kegg.len(),
            drugbank.len(),
            chembl.len(),
            matador.len(),
            drug_map.len(),
            target_map.len()
        );

        Ok(Self {
            kegg,
            drugbank,
            chembl,
            matador,
            drug_map,
            target_map,
        })
    }
}

// ── Evidence tables ─────────────────────────────────────────────────────────

/// Load the evidence tables for `disease` in check order.
///
/// Missing required files are fatal; missing optional ones are skipped.
pub fn load_evidence_tables(
    loader: &dyn ReferenceLoader,
    disease: &str,
    specs: &[EvidenceSourceSpec],
) -> Result<Vec<EvidenceTable>> {
    let mut tables = Vec::with_capacity(specs.len());

    for spec in specs {
        let name = spec.file_name(disease);
        let reader = match loader.open(&name)? {
            Some(reader) => reader,
            None if spec.required => return Err(NovapairError::MissingFile(loader.locate(&name))),
            None => {
                info!(source = %spec.name, "Optional evidence file {} not found, skipping", name);
                continue;
            }
        };
        let table = EvidenceTable::from_csv_reader(
            &spec.name,
            spec.casing,
            &spec.column,
            reader,
            &loader.locate(&name),
        )?;
        tables.push(table);
    }

    info!(
        "Loaded {} evidence tables for {}: {}",
        tables.len(),
        disease,
        tables.iter().map(|t| t.name()).collect::<Vec<_>>().join(", ")
    );
    Ok(tables)
}
