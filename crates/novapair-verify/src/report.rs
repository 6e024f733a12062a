//! Report rendering and writing.
//!
//! The drug–target report is a fixed tab layout (fields joined by two tabs
//! so columns line up in a terminal). Association reports are CSV tables
//! with a header row and no index column. Console summary lines are built
//! here too; the caller decides where they go.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use novapair_common::Result;
use tracing::info;

use crate::association::ValidationSummary;
use crate::drug_target::DrugTargetRow;
use crate::topk::CutoffStat;

/// Separator between drug–target report fields.
const DTI_FIELD_SEPARATOR: &str = "\t\t";

/// A header row plus string cells, ready for CSV output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotatedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl AnnotatedTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self { headers, rows: Vec::new() }
    }

    /// Insert a header at `index` (clamped to the end).
    pub fn insert_column(&mut self, index: usize, name: &str) {
        let index = index.min(self.headers.len());
        self.headers.insert(index, name.to_string());
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

// ── Formatting ──────────────────────────────────────────────────────────────

/// Round half to even at `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}

/// Shortest round-trip rendering with at least one fractional digit
/// (`0.9`, `0.1235`, `1.0`).
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// `rank, drug, target, score, C, D, K, M` joined by two tabs.
pub fn drug_target_line(row: &DrugTargetRow, score_decimals: u32) -> String {
    let [c, d, k, m] = row.flags.markers();
    [
        row.rank.to_string().as_str(),
        row.pair.subject.as_str(),
        row.pair.object.as_str(),
        format_float(round_to(row.pair.score, score_decimals)).as_str(),
        c,
        d,
        k,
        m,
    ]
    .join(DTI_FIELD_SEPARATOR)
}

pub fn cutoff_line(stat: &CutoffStat) -> String {
    format!(
        "Top-{} novel DTIs, NO. confirmed:{}, Percentage:{:.2}%",
        stat.cutoff, stat.confirmed, stat.percentage
    )
}

/// Validated count and fraction with `precision` decimals.
pub fn validation_line(summary: &ValidationSummary, precision: usize) -> String {
    format!(
        "Validated number: {}, Percentage: {:.*}",
        summary.validated,
        precision,
        summary.fraction()
    )
}

// ── Writers ─────────────────────────────────────────────────────────────────

/// Destination for verification reports.
pub trait ReportWriter {
    fn write_drug_target(&mut self, rows: &[DrugTargetRow]) -> Result<()>;
    fn write_table(&mut self, table: &AnnotatedTable) -> Result<()>;
}

/// Writes reports to any byte sink.
pub struct StreamReportWriter<W: Write> {
    out: W,
    score_decimals: u32,
}

impl<W: Write> StreamReportWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, score_decimals: 4 }
    }

    pub fn with_score_decimals(mut self, decimals: u32) -> Self {
        self.score_decimals = decimals;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportWriter for StreamReportWriter<W> {
    fn write_drug_target(&mut self, rows: &[DrugTargetRow]) -> Result<()> {
        for row in rows {
            writeln!(self.out, "{}", drug_target_line(row, self.score_decimals))?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn write_table(&mut self, table: &AnnotatedTable) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(&mut self.out);
        wtr.write_record(&table.headers)?;
        for row in &table.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Creates (or truncates) one report file per write.
#[derive(Debug, Clone)]
pub struct FileReportWriter {
    path: PathBuf,
    score_decimals: u32,
}

impl FileReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), score_decimals: 4 }
    }

    pub fn with_score_decimals(mut self, decimals: u32) -> Self {
        self.score_decimals = decimals;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn stream(&self) -> Result<StreamReportWriter<BufWriter<File>>> {
        let file = File::create(&self.path)?;
        Ok(StreamReportWriter::new(BufWriter::new(file)).with_score_decimals(self.score_decimals))
    }
}

impl ReportWriter for FileReportWriter {
    fn write_drug_target(&mut self, rows: &[DrugTargetRow]) -> Result<()> {
        self.stream()?.write_drug_target(rows)?;
        info!("Wrote {} drug–target rows to {:?}", rows.len(), self.path);
        Ok(())
    }

    fn write_table(&mut self, table: &AnnotatedTable) -> Result<()> {
        self.stream()?.write_table(table)?;
        info!("Wrote {} annotated rows to {:?}", table.rows.len(), self.path);
        Ok(())
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drug_target::SourceFlags;
    use novapair_common::CandidatePair;

    fn row(rank: usize, score: f64, flags: SourceFlags) -> DrugTargetRow {
        DrugTargetRow {
            rank,
            pair: CandidatePair::new("D00109", "hsa:5742", score),
            flags,
        }
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(0.9), "0.9");
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(0.1235), "0.1235");
    }

    #[test]
    fn test_round_to_four_places() {
        assert_eq!(format_float(round_to(0.123456, 4)), "0.1235");
        assert_eq!(format_float(round_to(0.98765432, 4)), "0.9877");
        assert_eq!(format_float(round_to(0.5, 4)), "0.5");
    }

    #[test]
    fn test_drug_target_line_layout() {
        let flags = SourceFlags { kegg: true, matador: true, ..Default::default() };
        let line = drug_target_line(&row(1, 0.987654, flags), 4);
        assert_eq!(line, "1\t\tD00109\t\thsa:5742\t\t0.9877\t\t \t\t \t\tK\t\tM");
    }

    #[test]
    fn test_unconfirmed_line_has_blank_markers() {
        let line = drug_target_line(&row(2, 0.5, SourceFlags::default()), 4);
        assert!(line.ends_with("0.5\t\t \t\t \t\t \t\t "));
    }

    #[test]
    fn test_console_lines() {
        let stat = CutoffStat { cutoff: 10, confirmed: 3, percentage: 30.0 };
        assert_eq!(cutoff_line(&stat), "Top-10 novel DTIs, NO. confirmed:3, Percentage:30.00%");

        let summary = ValidationSummary { validated: 2, total: 3 };
        assert_eq!(validation_line(&summary, 3), "Validated number: 2, Percentage: 0.667");
        assert_eq!(validation_line(&summary, 1), "Validated number: 2, Percentage: 0.7");
    }

    #[test]
    fn test_stream_writer_drug_target() {
        let mut writer = StreamReportWriter::new(Vec::new());
        writer
            .write_drug_target(&[row(1, 0.9, SourceFlags { chembl: true, ..Default::default() })])
            .unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text, "1\t\tD00109\t\thsa:5742\t\t0.9\t\tC\t\t \t\t \t\t \n");
    }

    #[test]
    fn test_stream_writer_table() {
        let mut table = AnnotatedTable::new(vec!["miRNA".into(), "disease".into(), "score".into()]);
        table.insert_column(3, "Evidence");
        table.push_row(vec!["hsa-mir-21".into(), "Breast, ductal".into(), "0.9".into(), "dbDEMC,HMDD3.0".into()]);

        let mut writer = StreamReportWriter::new(Vec::new());
        writer.write_table(&table).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            text,
            "miRNA,disease,score,Evidence\nhsa-mir-21,\"Breast, ductal\",0.9,\"dbDEMC,HMDD3.0\"\n"
        );
    }

    #[test]
    fn test_insert_column_clamps() {
        let mut table = AnnotatedTable::new(vec!["a".into()]);
        table.insert_column(3, "Evidence");
        assert_eq!(table.headers, vec!["a", "Evidence"]);
    }
}
