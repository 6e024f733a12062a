//! Scored candidate lists produced by the upstream ranking model.
//!
//! Unlike reference tables these are required input: a line that cannot be
//! read as a candidate aborts the load instead of being dropped.

use std::io::{BufRead, Read};
use std::path::Path;

use novapair_common::{CandidatePair, NovapairError, Result};
use tracing::debug;

/// Parse whitespace-separated `drug target score` lines (no header).
pub fn load_scored_pairs<R: BufRead>(reader: R, source: &Path) -> Result<Vec<CandidatePair>> {
    let mut pairs = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => continue,
            [subject, object, score] => {
                let score = parse_score(score, source, line_no + 1)?;
                pairs.push(CandidatePair::new(*subject, *object, score));
            }
            other => {
                return Err(NovapairError::Parse {
                    file: source.to_path_buf(),
                    line: line_no + 1,
                    message: format!("expected 3 fields, found {}", other.len()),
                })
            }
        }
    }

    debug!(pairs = pairs.len(), "Loaded scored candidate pairs");
    Ok(pairs)
}

fn parse_score(raw: &str, source: &Path, line: usize) -> Result<f64> {
    raw.trim().parse::<f64>().map_err(|e| NovapairError::Parse {
        file: source.to_path_buf(),
        line,
        message: format!("invalid score '{raw}': {e}"),
    })
}

/// A three-column candidate table (entity, disease, score) read from CSV.
///
/// The header names and score cells are kept so the annotated report
/// repeats them verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateTable {
    pub headers: [String; 3],
    pub pairs: Vec<CandidatePair>,
    /// Score cells as written in the source, one per pair
    pub score_cells: Vec<String>,
}

impl CandidateTable {
    pub fn new(headers: [&str; 3], pairs: Vec<CandidatePair>) -> Self {
        let score_cells = pairs.iter().map(|p| p.score.to_string()).collect();
        Self {
            headers: headers.map(String::from),
            pairs,
            score_cells,
        }
    }

    /// Read a CSV candidate table with a header row of exactly three columns.
    pub fn from_csv_reader<R: Read>(reader: R, source: &Path) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

        let header = rdr.headers()?.clone();
        if header.len() != 3 {
            return Err(NovapairError::MissingColumn {
                file: source.to_path_buf(),
                column: format!("expected entity, disease, score columns; found {}", header.len()),
            });
        }
        let headers = [header[0].to_string(), header[1].to_string(), header[2].to_string()];

        let mut pairs = Vec::new();
        let mut score_cells = Vec::new();
        for (row, record) in rdr.records().enumerate() {
            let record = record?;
            // header is line 1
            let line = row + 2;
            let score = parse_score(&record[2], source, line)?;
            pairs.push(CandidatePair::new(&record[0], &record[1], score));
            score_cells.push(record[2].to_string());
        }

        debug!(pairs = pairs.len(), "Loaded candidate table");
        Ok(Self { headers, pairs, score_cells })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scored_pairs_keep_order() {
        let text = "D1 T1 0.9\n\nD2\tT2\t0.5\n";
        let pairs = load_scored_pairs(text.as_bytes(), Path::new("pairs.txt")).unwrap();
        assert_eq!(
            pairs,
            vec![CandidatePair::new("D1", "T1", 0.9), CandidatePair::new("D2", "T2", 0.5)]
        );
    }

    #[test]
    fn test_scored_pairs_bad_score() {
        let err = load_scored_pairs("D1 T1 high\n".as_bytes(), Path::new("pairs.txt")).unwrap_err();
        assert!(matches!(err, NovapairError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_scored_pairs_wrong_field_count() {
        let err = load_scored_pairs("D1 T1\n".as_bytes(), Path::new("pairs.txt")).unwrap_err();
        assert!(matches!(err, NovapairError::Parse { .. }));
    }

    #[test]
    fn test_candidate_table_headers() {
        let text = "miRNA,disease,score\nhsa-mir-21,Breast Neoplasms,0.98\nhsa-mir-155,Breast Neoplasms,0.91\n";
        let table = CandidateTable::from_csv_reader(text.as_bytes(), Path::new("c.csv")).unwrap();
        assert_eq!(table.headers, ["miRNA", "disease", "score"].map(String::from));
        assert_eq!(table.len(), 2);
        assert_eq!(table.pairs[1].subject, "hsa-mir-155");
        assert!((table.pairs[0].score - 0.98).abs() < 1e-12);
    }

    #[test]
    fn test_candidate_table_keeps_score_cells() {
        let text = "miRNA,disease,score\nhsa-mir-7,Lung,3.2e-07\nhsa-mir-8,Lung,1\n";
        let table = CandidateTable::from_csv_reader(text.as_bytes(), Path::new("c.csv")).unwrap();
        assert_eq!(table.score_cells, vec!["3.2e-07", "1"]);
        assert!((table.pairs[0].score - 3.2e-7).abs() < 1e-15);
        assert_eq!(table.pairs[1].score, 1.0);
    }

    #[test]
    fn test_candidate_table_needs_three_columns() {
        let text = "miRNA,score\nhsa-mir-21,0.98\n";
        let err = CandidateTable::from_csv_reader(text.as_bytes(), Path::new("c.csv")).unwrap_err();
        assert!(matches!(err, NovapairError::MissingColumn { .. }));
    }
}
