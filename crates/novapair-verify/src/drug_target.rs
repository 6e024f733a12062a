//! Drug–target verification.
//!
//! Each candidate (d, t) is checked against four sources independently:
//!
//! | Marker | Source | Lookup |
//! |--------|--------|--------|
//! | K | KEGG | t ∈ kegg[d] |
//! | D | DrugBank | drugbank ids of d × uniprot ids of t in drugbank |
//! | C | ChEMBL | chembl ids of d × chembl ids of t in chembl |
//! | M | MATADOR | pubchem CIDs of d × uniprot ids of t in matador |
//!
//! A pair is confirmed when any check hits. Missing keys and namespaces
//! resolve to an empty id list, so a check that cannot be resolved is false.

use novapair_common::{CandidatePair, Namespace};
use novapair_refdb::{DrugTargetDatabase, IdentifierMap, PairTable};
use serde::Serialize;
use tracing::info;

/// Borrowed view over every table the verifier reads.
#[derive(Debug, Clone, Copy)]
pub struct DrugTargetSources<'a> {
    pub kegg: &'a PairTable,
    pub drugbank: &'a PairTable,
    pub chembl: &'a PairTable,
    pub matador: &'a PairTable,
    pub drug_map: &'a IdentifierMap,
    pub target_map: &'a IdentifierMap,
}

impl<'a> From<&'a DrugTargetDatabase> for DrugTargetSources<'a> {
    fn from(db: &'a DrugTargetDatabase) -> Self {
        Self {
            kegg: &db.kegg,
            drugbank: &db.drugbank,
            chembl: &db.chembl,
            matador: &db.matador,
            drug_map: &db.drug_map,
            target_map: &db.target_map,
        }
    }
}

/// Which sources corroborate one pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SourceFlags {
    pub chembl: bool,
    pub drugbank: bool,
    pub kegg: bool,
    pub matador: bool,
}

impl SourceFlags {
    pub fn confirmed(&self) -> bool {
        self.kegg || self.drugbank || self.chembl || self.matador
    }

    /// Report markers in C, D, K, M order; a blank is a single space.
    pub fn markers(&self) -> [&'static str; 4] {
        let mark = |set: bool, letter: &'static str| if set { letter } else { " " };
        [
            mark(self.chembl, "C"),
            mark(self.drugbank, "D"),
            mark(self.kegg, "K"),
            mark(self.matador, "M"),
        ]
    }
}

/// One verified candidate with its 1-based rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrugTargetRow {
    pub rank: usize,
    pub pair: CandidatePair,
    pub flags: SourceFlags,
}

/// (drug, target, confirmed) as handed to the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmedPair {
    pub drug: String,
    pub target: String,
    pub confirmed: bool,
}

impl ConfirmedPair {
    /// 1 when confirmed, 0 otherwise.
    pub fn flag(&self) -> u8 {
        u8::from(self.confirmed)
    }
}

/// Rows in candidate order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrugTargetVerification {
    pub rows: Vec<DrugTargetRow>,
}

impl DrugTargetVerification {
    pub fn confirmed_pairs(&self) -> Vec<ConfirmedPair> {
        self.rows
            .iter()
            .map(|row| ConfirmedPair {
                drug: row.pair.subject.clone(),
                target: row.pair.object.clone(),
                confirmed: row.flags.confirmed(),
            })
            .collect()
    }

    /// Confirmation flag per rank, the aggregator's input.
    pub fn confirmed_flags(&self) -> Vec<bool> {
        self.rows.iter().map(|row| row.flags.confirmed()).collect()
    }

    pub fn confirmed_count(&self) -> usize {
        self.rows.iter().filter(|row| row.flags.confirmed()).count()
    }
}

/// True iff some drug id has some target id among its associated ids.
fn cross_referenced(drug_ids: &[String], target_ids: &[String], table: &PairTable) -> bool {
    drug_ids.iter().any(|drug_id| {
        let associated = table.associated(drug_id);
        target_ids.iter().any(|target_id| associated.contains(target_id))
    })
}

/// Evaluate the four source checks for one pair.
pub fn check_pair(drug: &str, target: &str, sources: &DrugTargetSources<'_>) -> SourceFlags {
    let uniprot = sources.target_map.ids(target, Namespace::Uniprot);

    SourceFlags {
        kegg: sources.kegg.contains(drug, target),
        drugbank: cross_referenced(
            sources.drug_map.ids(drug, Namespace::DrugBank),
            uniprot,
            sources.drugbank,
        ),
        chembl: cross_referenced(
            sources.drug_map.ids(drug, Namespace::Chembl),
            sources.target_map.ids(target, Namespace::Chembl),
            sources.chembl,
        ),
        matador: cross_referenced(
            sources.drug_map.ids(drug, Namespace::PubChemCid),
            uniprot,
            sources.matador,
        ),
    }
}

/// Verify every candidate pair, preserving input order as rank.
pub fn verify_drug_target_pairs(
    pairs: &[CandidatePair],
    sources: &DrugTargetSources<'_>,
) -> DrugTargetVerification {
    let rows: Vec<DrugTargetRow> = pairs
        .iter()
        .enumerate()
        .map(|(i, pair)| DrugTargetRow {
            rank: i + 1,
            pair: pair.clone(),
            flags: check_pair(&pair.subject, &pair.object, sources),
        })
        .collect();

    let verification = DrugTargetVerification { rows };
    info!(
        "Verified {} drug–target pairs: {} confirmed",
        verification.rows.len(),
        verification.confirmed_count()
    );
    verification
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        kegg: PairTable,
        drugbank: PairTable,
        chembl: PairTable,
        matador: PairTable,
        drug_map: IdentifierMap,
        target_map: IdentifierMap,
    }

    impl Fixture {
        fn empty() -> Self {
            Self {
                kegg: PairTable::new(),
                drugbank: PairTable::new(),
                chembl: PairTable::new(),
                matador: PairTable::new(),
                drug_map: IdentifierMap::new(),
                target_map: IdentifierMap::new(),
            }
        }

        fn cross_referenced() -> Self {
            Self {
                kegg: PairTable::new().with("D00109", &["hsa:5742"]),
                drugbank: PairTable::new().with("DB00945", &["P23219"]),
                chembl: PairTable::new().with("CHEMBL25", &["CHEMBL221"]),
                matador: PairTable::new().with("2244", &["P35354"]),
                drug_map: IdentifierMap::new()
                    .with("D00109", Namespace::DrugBank, &["DB00945"])
                    .with("D00109", Namespace::Chembl, &["CHEMBL25"])
                    .with("D00109", Namespace::PubChemCid, &["2244"]),
                target_map: IdentifierMap::new()
                    .with("hsa:5742", Namespace::Uniprot, &["P23219"])
                    .with("hsa:5742", Namespace::Chembl, &["CHEMBL221"])
                    .with("hsa:5743", Namespace::Uniprot, &["P35354"]),
            }
        }

        fn sources(&self) -> DrugTargetSources<'_> {
            DrugTargetSources {
                kegg: &self.kegg,
                drugbank: &self.drugbank,
                chembl: &self.chembl,
                matador: &self.matador,
                drug_map: &self.drug_map,
                target_map: &self.target_map,
            }
        }
    }

    #[test]
    fn test_kegg_only_scenario() {
        let mut fx = Fixture::empty();
        fx.kegg = PairTable::new().with("D1", &["T1"]);
        let pairs = vec![CandidatePair::new("D1", "T1", 0.9), CandidatePair::new("D2", "T2", 0.5)];

        let result = verify_drug_target_pairs(&pairs, &fx.sources());

        assert_eq!(result.rows[0].flags.markers(), [" ", " ", "K", " "]);
        assert_eq!(result.rows[1].flags.markers(), [" ", " ", " ", " "]);
        let confirmed: Vec<(String, String, u8)> = result
            .confirmed_pairs()
            .into_iter()
            .map(|p| {
                let flag = p.flag();
                (p.drug, p.target, flag)
            })
            .collect();
        assert_eq!(
            confirmed,
            vec![
                ("D1".to_string(), "T1".to_string(), 1),
                ("D2".to_string(), "T2".to_string(), 0)
            ]
        );
    }

    #[test]
    fn test_all_sources_hit() {
        let fx = Fixture::cross_referenced();
        let flags = check_pair("D00109", "hsa:5742", &fx.sources());
        assert!(flags.kegg);
        assert!(flags.drugbank);
        assert!(flags.chembl);
        assert!(!flags.matador); // matador lists P35354, not P23219
        assert_eq!(flags.markers(), ["C", "D", "K", " "]);
    }

    #[test]
    fn test_matador_through_pubchem() {
        let fx = Fixture::cross_referenced();
        let flags = check_pair("D00109", "hsa:5743", &fx.sources());
        assert_eq!(
            flags,
            SourceFlags { chembl: false, drugbank: false, kegg: false, matador: true }
        );
        assert!(flags.confirmed());
    }

    #[test]
    fn test_kegg_hit_independent_of_other_tables() {
        let mut fx = Fixture::empty();
        fx.kegg = PairTable::new().with("D7", &["T0", "T7"]);
        let flags = check_pair("D7", "T7", &fx.sources());
        assert!(flags.kegg);
        assert!(flags.confirmed());
    }

    #[test]
    fn test_unknown_ids_are_unconfirmed() {
        let fx = Fixture::cross_referenced();
        let flags = check_pair("D99999", "hsa:0", &fx.sources());
        assert_eq!(flags, SourceFlags::default());
        assert!(!flags.confirmed());
    }

    #[test]
    fn test_missing_namespace_degrades_single_check() {
        let mut fx = Fixture::cross_referenced();
        // target known for uniprot only: chembl check cannot resolve
        fx.target_map = IdentifierMap::new().with("hsa:5742", Namespace::Uniprot, &["P23219"]);
        let flags = check_pair("D00109", "hsa:5742", &fx.sources());
        assert!(!flags.chembl);
        assert!(flags.drugbank);
    }

    #[test]
    fn test_rank_is_one_based_input_order() {
        let fx = Fixture::empty();
        let pairs = vec![
            CandidatePair::new("B", "x", 0.1),
            CandidatePair::new("A", "y", 0.9),
        ];
        let result = verify_drug_target_pairs(&pairs, &fx.sources());
        assert_eq!(result.rows[0].rank, 1);
        assert_eq!(result.rows[0].pair.subject, "B");
        assert_eq!(result.rows[1].rank, 2);
        assert_eq!(result.confirmed_flags(), vec![false, false]);
    }
}
