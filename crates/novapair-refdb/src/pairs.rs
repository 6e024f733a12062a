//! Pair-form reference tables: subject id → ordered list of associated ids.

use std::collections::HashMap;
use std::io::BufRead;

use novapair_common::Result;
use tracing::{debug, warn};

/// MATADOR column holding the whitespace-separated protein ids.
const MATADOR_PROTEIN_FIELD: usize = 6;

/// Subject → associated ids, built once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct PairTable {
    pairs: HashMap<String, Vec<String>>,
}

impl PairTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subject with its associated ids (test fixtures, builders).
    pub fn with(mut self, subject: &str, ids: &[&str]) -> Self {
        self.insert(subject, ids.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Replace the ids associated with `subject`. Empty lists are not stored.
    pub fn insert(&mut self, subject: &str, ids: Vec<String>) {
        if ids.is_empty() {
            return;
        }
        self.pairs.insert(subject.to_string(), ids);
    }

    /// Append ids to `subject`, keeping earlier ones. Empty lists are not stored.
    pub fn extend(&mut self, subject: &str, ids: Vec<String>) {
        if ids.is_empty() {
            return;
        }
        self.pairs.entry(subject.to_string()).or_default().extend(ids);
    }

    /// Ids associated with `subject`; empty when the subject is unknown.
    pub fn associated(&self, subject: &str) -> &[String] {
        self.pairs.get(subject).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True iff `object` is among the ids associated with `subject`.
    pub fn contains(&self, subject: &str, object: &str) -> bool {
        self.associated(subject).iter().any(|id| id == object)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    // ── Parsers ───────────────────────────────────────────────────────────────

    /// Parse whitespace-separated `subject id1 id2 …` lines (no header).
    ///
    /// Blank and single-token lines are skipped. A subject listed twice keeps
    /// the ids of its last line.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = Self::new();
        let mut skipped = 0usize;

        for line in reader.lines() {
            let line = line?;
            let mut tokens = line.split_whitespace();
            let Some(subject) = tokens.next() else {
                continue;
            };
            let ids: Vec<String> = tokens.map(String::from).collect();
            if ids.is_empty() {
                skipped += 1;
                continue;
            }
            table.insert(subject, ids);
        }

        debug!(subjects = table.len(), skipped, "Parsed pair table");
        Ok(table)
    }

    /// Parse a MATADOR interaction export (tab-separated, one header line).
    ///
    /// Field 0 is the chemical id, field 6 the protein ids. Repeated chemicals
    /// accumulate their proteins. Lines with too few fields are dropped.
    pub fn from_matador_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = Self::new();
        let mut dropped = 0usize;

        for line in reader.lines().skip(1) {
            let line = line?;
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() <= MATADOR_PROTEIN_FIELD {
                dropped += 1;
                continue;
            }
            let proteins: Vec<String> = fields[MATADOR_PROTEIN_FIELD]
                .split_whitespace()
                .map(String::from)
                .collect();
            table.extend(fields[0], proteins);
        }

        if dropped > 0 {
            warn!(dropped, "Dropped malformed MATADOR lines");
        }
        debug!(chemicals = table.len(), "Parsed MATADOR table");
        Ok(table)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
