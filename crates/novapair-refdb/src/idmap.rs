//! Identifier maps between KEGG ids and external namespaces.
//!
//! Two maps are built from the database folder:
//! - drug map: KEGG drug → {drugbank, chembl, pubchem_cid}
//! - target map: KEGG target → {uniprot, chembl}
//!
//! PubChem ids arrive as substance ids (SIDs) and are substituted by their
//! compound ids (CIDs) through [`SubstanceMap`]; unknown SIDs are dropped.

use std::collections::HashMap;
use std::io::BufRead;

use novapair_common::{Namespace, Result};
use tracing::{debug, warn};

/// Field separator of the KEGG drug map export.
const DRUG_MAP_SEPARATOR: char = '$';
/// kegg id, drugbank ids, chembl ids, pubchem SIDs, unused.
const DRUG_MAP_FIELDS: usize = 5;

/// key → namespace → ids.
#[derive(Debug, Clone, Default)]
pub struct IdentifierMap {
    entries: HashMap<String, HashMap<Namespace, Vec<String>>>,
}

impl IdentifierMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add ids for one key and namespace (test fixtures, builders).
    pub fn with(mut self, key: &str, namespace: Namespace, ids: &[&str]) -> Self {
        self.insert(key, namespace, ids.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Set the ids of `key` in `namespace`. An empty list records nothing.
    pub fn insert(&mut self, key: &str, namespace: Namespace, ids: Vec<String>) {
        if ids.is_empty() {
            return;
        }
        self.entries
            .entry(key.to_string())
            .or_default()
            .insert(namespace, ids);
    }

    /// Ids of `key` in `namespace`; empty when either is absent.
    pub fn ids(&self, key: &str, namespace: Namespace) -> &[String] {
        self.entries
            .get(key)
            .and_then(|by_ns| by_ns.get(&namespace))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ── Builders ──────────────────────────────────────────────────────────────

    /// Merge a `key id1 id2 …` file (one header line) into `namespace`.
    ///
    /// Used for `target_kegg_uniprot.txt` and `target_kegg_chembl.txt`.
    pub fn merge_namespace_reader<R: BufRead>(&mut self, reader: R, namespace: Namespace) -> Result<()> {
        let mut merged = 0usize;
        for line in reader.lines().skip(1) {
            let line = line?;
            let mut tokens = line.split_whitespace();
            let Some(key) = tokens.next() else {
                continue;
            };
            let ids: Vec<String> = tokens.map(String::from).collect();
            if ids.is_empty() {
                continue;
            }
            self.insert(key, namespace, ids);
            merged += 1;
        }
        debug!(%namespace, merged, "Merged identifier namespace");
        Ok(())
    }

    /// Build the target map from the uniprot and chembl cross-reference files.
    pub fn target_map<R1: BufRead, R2: BufRead>(uniprot: R1, chembl: R2) -> Result<Self> {
        let mut map = Self::new();
        map.merge_namespace_reader(uniprot, Namespace::Uniprot)?;
        map.merge_namespace_reader(chembl, Namespace::Chembl)?;
        Ok(map)
    }

    /// Build the drug map from the `$`-separated KEGG drug export.
    ///
    /// A blank field means the drug has no ids in that namespace. PubChem
    /// SIDs are replaced by CIDs; SIDs missing from `substances` are dropped.
    pub fn drug_map<R: BufRead>(reader: R, substances: &SubstanceMap) -> Result<Self> {
        let mut map = Self::new();
        let mut dropped = 0usize;

        for line in reader.lines().skip(1) {
            let line = line?;
            let line = line.trim_end_matches('\r');
            let fields: Vec<&str> = line.split(DRUG_MAP_SEPARATOR).collect();
            if fields.len() != DRUG_MAP_FIELDS {
                if !line.trim().is_empty() {
                    dropped += 1;
                }
                continue;
            }
            let kegg_id = fields[0].trim();
            if kegg_id.is_empty() {
                dropped += 1;
                continue;
            }

            map.insert(kegg_id, Namespace::DrugBank, split_ids(fields[1]));
            map.insert(kegg_id, Namespace::Chembl, split_ids(fields[2]));

            let cids: Vec<String> = fields[3]
                .split_whitespace()
                .filter_map(|sid| substances.cid(sid))
                .map(String::from)
                .collect();
            map.insert(kegg_id, Namespace::PubChemCid, cids);
        }

        if dropped > 0 {
            warn!(dropped, "Dropped malformed KEGG drug map lines");
        }
        debug!(drugs = map.len(), "Built drug identifier map");
        Ok(map)
    }
}

/// Whitespace-separated ids; the blank sentinel yields an empty list.
fn split_ids(field: &str) -> Vec<String> {
    field.split_whitespace().map(String::from).collect()
}

// ── PubChem substance → compound ────────────────────────────────────────────

/// PubChem SID → CID substitution table.
#[derive(Debug, Clone, Default)]
pub struct SubstanceMap {
    sid_to_cid: HashMap<String, String>,
}

impl SubstanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sid: &str, cid: &str) -> Self {
        self.sid_to_cid.insert(sid.to_string(), cid.to_string());
        self
    }

    /// Parse `sid cid` lines (one header line). Other token counts are dropped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut map = Self::new();
        let mut dropped = 0usize;

        for line in reader.lines().skip(1) {
            let line = line?;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            match tokens.as_slice() {
                [] => continue,
                [sid, cid] => {
                    map.sid_to_cid.insert(sid.to_string(), cid.to_string());
                }
                _ => dropped += 1,
            }
        }

        if dropped > 0 {
            warn!(dropped, "Dropped malformed PubChem SID lines");
        }
        debug!(substances = map.len(), "Parsed PubChem SID map");
        Ok(map)
    }

    pub fn cid(&self, sid: &str) -> Option<&str> {
        self.sid_to_cid.get(sid).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sid_to_cid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sid_to_cid.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
