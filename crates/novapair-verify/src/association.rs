//! Entity–disease association verification against evidence tables.
//!
//! Each candidate's entity id is prefix-matched against every evidence
//! table in check order. The names of matching tables form the candidate's
//! evidence tags; no match renders as `unconfirmed`.

use novapair_common::CandidatePair;
use novapair_refdb::EvidenceTable;
use serde::Serialize;
use tracing::info;

use crate::normalise::{keyed_id, NameNormaliser};
use crate::report::{format_float, AnnotatedTable};

/// Placeholder written when no source matches.
pub const UNCONFIRMED: &str = "unconfirmed";

/// Column index the evidence column is inserted at.
pub const EVIDENCE_POSITION: usize = 3;

pub const EVIDENCE_COLUMN: &str = "Evidence";
pub const TOP_EVIDENCE_COLUMN: &str = "Evidence(top)";
pub const BOTTOM_EVIDENCE_COLUMN: &str = "Evidence(bottom)";

/// Sources corroborating one candidate, in check order. Only grows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EvidenceTags(Vec<String>);

impl EvidenceTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a source; a source already present is not repeated.
    pub fn add(&mut self, source: &str) {
        if !self.0.iter().any(|s| s == source) {
            self.0.push(source.to_string());
        }
    }

    pub fn is_confirmed(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn sources(&self) -> &[String] {
        &self.0
    }

    /// Comma-joined sources, or `unconfirmed`.
    pub fn label(&self) -> String {
        if self.0.is_empty() {
            UNCONFIRMED.to_string()
        } else {
            self.0.join(",")
        }
    }
}

/// A candidate with its evidence tags and 1-based rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedAssociation {
    pub rank: usize,
    pub pair: CandidatePair,
    pub evidence: EvidenceTags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub validated: usize,
    pub total: usize,
}

impl ValidationSummary {
    /// validated / total; 0 for an empty candidate list.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.validated as f64 / self.total as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationVerification {
    pub rows: Vec<AnnotatedAssociation>,
    pub summary: ValidationSummary,
}

impl AssociationVerification {
    /// Candidate columns with the evidence column inserted at [`EVIDENCE_POSITION`].
    ///
    /// `score_cells` are the source's score cells, written back unchanged;
    /// rows past its end render the parsed score.
    pub fn to_table(
        &self,
        headers: &[String; 3],
        score_cells: &[String],
        evidence_column: &str,
    ) -> AnnotatedTable {
        let mut table = AnnotatedTable::new(headers.to_vec());
        table.insert_column(EVIDENCE_POSITION, evidence_column);
        for (i, row) in self.rows.iter().enumerate() {
            table.push_row(vec![
                row.pair.subject.clone(),
                row.pair.object.clone(),
                score_cell(row, score_cells.get(i)),
                row.evidence.label(),
            ]);
        }
        table
    }
}

fn score_cell(row: &AnnotatedAssociation, source: Option<&String>) -> String {
    match source {
        Some(cell) => cell.clone(),
        None => format_float(row.pair.score),
    }
}

/// Collect the names of every table with a key starting with the entity id.
pub fn collect_evidence(
    entity: &str,
    tables: &[EvidenceTable],
    normaliser: &dyn NameNormaliser,
) -> EvidenceTags {
    let normalised = normaliser.normalise(entity);
    let mut tags = EvidenceTags::new();
    for table in tables {
        if table.has_prefix(keyed_id(entity, &normalised, table.casing())) {
            tags.add(table.name());
        }
    }
    tags
}

/// Tag every candidate and count the validated ones.
pub fn verify_associations(
    pairs: &[CandidatePair],
    tables: &[EvidenceTable],
    normaliser: &dyn NameNormaliser,
) -> AssociationVerification {
    let rows: Vec<AnnotatedAssociation> = pairs
        .iter()
        .enumerate()
        .map(|(i, pair)| AnnotatedAssociation {
            rank: i + 1,
            pair: pair.clone(),
            evidence: collect_evidence(&pair.subject, tables, normaliser),
        })
        .collect();

    let summary = ValidationSummary {
        validated: rows.iter().filter(|r| r.evidence.is_confirmed()).count(),
        total: rows.len(),
    };
    info!(
        "Verified {} associations: {} validated",
        summary.total, summary.validated
    );

    AssociationVerification { rows, summary }
}

// ── Top / bottom slices ─────────────────────────────────────────────────────

/// Independent verification of the highest- and lowest-scored slices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopBottomVerification {
    pub top: AssociationVerification,
    pub bottom: AssociationVerification,
}

impl TopBottomVerification {
    /// Top rows then bottom rows. Each slice fills its own evidence column
    /// and leaves the other slice's column empty.
    pub fn to_table(
        &self,
        headers: &[String; 3],
        top_scores: &[String],
        bottom_scores: &[String],
    ) -> AnnotatedTable {
        let mut table = AnnotatedTable::new(headers.to_vec());
        table.insert_column(EVIDENCE_POSITION, TOP_EVIDENCE_COLUMN);
        table.insert_column(EVIDENCE_POSITION + 1, BOTTOM_EVIDENCE_COLUMN);

        let slices = [(&self.top, top_scores, true), (&self.bottom, bottom_scores, false)];
        for (slice, scores, is_top) in slices {
            for (i, row) in slice.rows.iter().enumerate() {
                let (top, bottom) = if is_top {
                    (row.evidence.label(), String::new())
                } else {
                    (String::new(), row.evidence.label())
                };
                table.push_row(vec![
                    row.pair.subject.clone(),
                    row.pair.object.clone(),
                    score_cell(row, scores.get(i)),
                    top,
                    bottom,
                ]);
            }
        }
        table
    }
}

pub fn verify_top_bottom(
    tops: &[CandidatePair],
    bottoms: &[CandidatePair],
    tables: &[EvidenceTable],
    normaliser: &dyn NameNormaliser,
) -> TopBottomVerification {
    TopBottomVerification {
        top: verify_associations(tops, tables, normaliser),
        bottom: verify_associations(bottoms, tables, normaliser),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
