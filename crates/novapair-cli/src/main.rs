//! novapair — Confirmation reports for predicted drug–target and miRNA–disease pairs.
//! Entry point for the command-line binary.

mod config;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use novapair_common::RunConfig;
use novapair_refdb::{load_evidence_tables, load_scored_pairs, CandidateTable, DrugTargetDatabase, FolderLoader};
use novapair_verify::association::EVIDENCE_COLUMN;
use novapair_verify::report::{cutoff_line, validation_line};
use novapair_verify::{
    aggregate, verify_associations, verify_drug_target_pairs, verify_top_bottom, DrugTargetSources,
    FileReportWriter, ReportWriter, SubstringNormaliser,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "novapair", version, about = "Verify predicted pairs against curated reference databases")]
struct Cli {
    /// Run configuration (TOML, YAML or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify ranked drug–target pairs against KEGG, DrugBank, ChEMBL and MATADOR
    Dti {
        /// Whitespace-separated `drug target score` lines, best first
        #[arg(long)]
        pairs: PathBuf,

        /// Reference database folder
        #[arg(long)]
        database: Option<PathBuf>,

        /// Annotated report path
        #[arg(long)]
        output: PathBuf,

        /// Rank cutoff for the top-K summary (repeatable)
        #[arg(long = "cutoff")]
        cutoffs: Vec<usize>,
    },
    /// Tag miRNA–disease candidates with disease evidence sources
    Mda {
        /// CSV with entity, disease, score columns
        #[arg(long)]
        pairs: PathBuf,

        /// Disease prefix of the evidence files
        #[arg(long)]
        disease: Option<String>,

        #[arg(long)]
        database: Option<PathBuf>,

        #[arg(long)]
        output: PathBuf,
    },
    /// Tag the top- and bottom-scored slices separately and combine them
    MdaTopBottom {
        #[arg(long)]
        tops: PathBuf,

        #[arg(long)]
        bottoms: PathBuf,

        #[arg(long)]
        disease: Option<String>,

        #[arg(long)]
        database: Option<PathBuf>,

        #[arg(long)]
        output: PathBuf,
    },
    /// Write the effective configuration as a YAML template
    ConfigTemplate {
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("novapair=info,warn")),
        )
        .init();

    let cli = Cli::parse();
    info!("novapair {}", env!("CARGO_PKG_VERSION"));

    let base = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Dti { pairs, database, output, cutoffs } => {
            let config = config::apply_overrides(base, database, None, cutoffs)?;
            run_dti(&config, &pairs, &output)
        }
        Commands::Mda { pairs, disease, database, output } => {
            let config = config::apply_overrides(base, database, disease, vec![])?;
            run_mda(&config, &pairs, &output)
        }
        Commands::MdaTopBottom { tops, bottoms, disease, database, output } => {
            let config = config::apply_overrides(base, database, disease, vec![])?;
            run_top_bottom(&config, &tops, &bottoms, &output)
        }
        Commands::ConfigTemplate { output } => {
            config::write_template(&base, &output)?;
            info!("Wrote configuration template to {}", output.display());
            Ok(())
        }
    }
}

fn open(path: &Path) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn read_candidate_table(path: &Path) -> anyhow::Result<CandidateTable> {
    let table = CandidateTable::from_csv_reader(open(path)?, path)
        .with_context(|| format!("Failed to read candidates from {}", path.display()))?;
    Ok(table)
}

fn normaliser(config: &RunConfig) -> SubstringNormaliser {
    SubstringNormaliser::new(&config.evidence.normalise_from, &config.evidence.normalise_to)
}

fn run_dti(config: &RunConfig, pairs_path: &Path, output: &Path) -> anyhow::Result<()> {
    let loader = FolderLoader::new(config::database_folder(config)?);
    let db = DrugTargetDatabase::load(&loader, &config.database)
        .context("Failed to load drug–target reference database")?;

    let pairs = load_scored_pairs(open(pairs_path)?, pairs_path)
        .with_context(|| format!("Failed to read candidates from {}", pairs_path.display()))?;
    info!("Loaded {} candidate pairs", pairs.len());

    let result = verify_drug_target_pairs(&pairs, &DrugTargetSources::from(&db));
    FileReportWriter::new(output)
        .with_score_decimals(config.report.score_decimals)
        .write_drug_target(&result.rows)?;

    for stat in aggregate(&result.confirmed_flags(), &config.report.cutoffs) {
        println!("{}", cutoff_line(&stat));
    }
    Ok(())
}

fn run_mda(config: &RunConfig, pairs_path: &Path, output: &Path) -> anyhow::Result<()> {
    let loader = FolderLoader::new(config::database_folder(config)?);
    let tables = load_evidence_tables(&loader, config::disease(config)?, &config.evidence.sources)?;
    let candidates = read_candidate_table(pairs_path)?;

    let result = verify_associations(&candidates.pairs, &tables, &normaliser(config));
    println!("{}", validation_line(&result.summary, 3));

    FileReportWriter::new(output).write_table(&result.to_table(
        &candidates.headers,
        &candidates.score_cells,
        EVIDENCE_COLUMN,
    ))?;
    Ok(())
}

fn run_top_bottom(config: &RunConfig, tops_path: &Path, bottoms_path: &Path, output: &Path) -> anyhow::Result<()> {
    let loader = FolderLoader::new(config::database_folder(config)?);
    let tables = load_evidence_tables(&loader, config::disease(config)?, &config.evidence.sources)?;
    let tops = read_candidate_table(tops_path)?;
    let bottoms = read_candidate_table(bottoms_path)?;

    let result = verify_top_bottom(&tops.pairs, &bottoms.pairs, &tables, &normaliser(config));
    println!("{}", validation_line(&result.top.summary, 1));
    println!("{}", validation_line(&result.bottom.summary, 1));

    // combined table takes the top slice's column names
    let table = result.to_table(&tops.headers, &tops.score_cells, &bottoms.score_cells);
    FileReportWriter::new(output).write_table(&table)?;
    Ok(())
}
