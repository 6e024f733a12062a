//! Disease-specific evidence tables (dbDEMC, HMDD, miRCancer exports).

use std::io::Read;
use std::path::Path;

use novapair_common::{KeyCasing, NovapairError, Result};
use tracing::debug;

/// Entity names of one evidence source, in file order.
#[derive(Debug, Clone)]
pub struct EvidenceTable {
    name: String,
    casing: KeyCasing,
    keys: Vec<String>,
}

impl EvidenceTable {
    pub fn new(name: impl Into<String>, casing: KeyCasing, keys: Vec<String>) -> Self {
        Self {
            name: name.into(),
            casing,
            keys,
        }
    }

    /// Read the `column` of a CSV export with a header row.
    ///
    /// Header and cells are taken verbatim. A missing column is fatal; empty
    /// cells and short rows are ignored.
    pub fn from_csv_reader<R: Read>(
        name: &str,
        casing: KeyCasing,
        column: &str,
        reader: R,
        source: &Path,
    ) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let index = rdr
            .headers()?
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| NovapairError::MissingColumn {
                file: source.to_path_buf(),
                column: column.to_string(),
            })?;

        let mut keys = Vec::new();
        for record in rdr.records() {
            let record = record?;
            match record.get(index) {
                Some(key) if !key.is_empty() => keys.push(key.to_string()),
                _ => {}
            }
        }

        debug!(source = name, rows = keys.len(), "Loaded evidence table");
        Ok(Self::new(name, casing, keys))
    }

    /// Tag written into the Evidence column.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn casing(&self) -> KeyCasing {
        self.casing
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// True iff some key starts with `id`. An empty id matches nothing.
    pub fn has_prefix(&self, id: &str) -> bool {
        !id.is_empty() && self.keys.iter().any(|key| key.starts_with(id))
    }
}
