//! Operator command line for catalog listing and click-table merges.

use std::ops::Range;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use arrival_picker::api::PickerConfig;
use arrival_picker::model::ClickTable;
use arrival_picker::sources::{self, CatalogSelection, CsvEventCatalog, EventCatalog};
use arrival_picker::store::StoreMerger;
use arrival_picker::telemetry;
use chrono::NaiveDateTime;
use clap::Parser;

#[derive(Parser)]
#[command(name = "arrival-picker")]
#[command(version)]
#[command(about = "Seismic arrival-time picking utilities")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Run configuration file (JSON); defaults apply when it does not exist
    #[arg(long, global = true, default_value = "arrival_picker.json")]
    config: PathBuf,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Lists the events a run would process
    Events {
        /// Earthquake list with `time` and `place` columns
        #[arg(long)]
        csv: PathBuf,

        /// Directory holding one sub-directory per event
        #[arg(long)]
        base_dir: PathBuf,

        /// Keep events at or after this origin time (e.g. "2025-06-01 00:00:00")
        #[arg(long)]
        from: Option<String>,

        /// Keep events at or before this origin time
        #[arg(long)]
        to: Option<String>,

        /// Keep data rows START:END (zero based, end exclusive, file order)
        #[arg(long, value_parser = parse_rows, conflicts_with_all = ["from", "to"])]
        rows: Option<Range<usize>>,

        /// Prefix of the per-event channel table file
        #[arg(long)]
        metadata_prefix: Option<String>,
    },

    /// Merges an exported click table into both configured stores
    Merge {
        /// Click table to merge (same layout as the stores)
        #[arg(long)]
        input: PathBuf,
    },

    /// Prints the effective configuration
    Config,
}

fn main() {
    let _ = telemetry::init_default_tracing();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = PickerConfig::load(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;

    match cli.command {
        Commands::Events {
            csv,
            base_dir,
            from,
            to,
            rows,
            metadata_prefix,
        } => list_events(csv, base_dir, from, to, rows, metadata_prefix),
        Commands::Merge { input } => merge(&config, &input),
        Commands::Config => {
            println!("{}", config.to_json_pretty()?);
            Ok(())
        }
    }
}

fn list_events(
    csv: PathBuf,
    base_dir: PathBuf,
    from: Option<String>,
    to: Option<String>,
    rows: Option<Range<usize>>,
    metadata_prefix: Option<String>,
) -> Result<()> {
    let selection = match (rows, from, to) {
        (Some(rows), _, _) => CatalogSelection::Rows(rows),
        (None, None, None) => CatalogSelection::All,
        (None, from, to) => CatalogSelection::DateRange {
            from: parse_bound(from.as_deref(), NaiveDateTime::MIN)?,
            to: parse_bound(to.as_deref(), NaiveDateTime::MAX)?,
        },
    };
    let mut catalog = CsvEventCatalog::new(csv, base_dir).with_selection(selection);
    if let Some(prefix) = metadata_prefix {
        catalog = catalog.with_metadata_prefix(prefix);
    }

    let events = catalog.list().context("failed to read event catalog")?;
    for event in &events {
        println!(
            "{}\t{}\t{}",
            event.event_id,
            event.directory.display(),
            event.metadata_path.display()
        );
    }
    eprintln!("{} event(s)", events.len());
    Ok(())
}

fn parse_bound(raw: Option<&str>, fallback: NaiveDateTime) -> Result<NaiveDateTime> {
    match raw {
        None => Ok(fallback),
        Some(raw) => match sources::parse_origin_time(raw) {
            Some(time) => Ok(time),
            None => bail!("unrecognized date-time `{raw}`"),
        },
    }
}

fn parse_rows(raw: &str) -> std::result::Result<Range<usize>, String> {
    sources::parse_row_range(raw).ok_or_else(|| format!("expected START:END, got `{raw}`"))
}

fn merge(config: &PickerConfig, input: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let table = ClickTable::from_json_str(&raw)
        .with_context(|| format!("{} is not a click table", input.display()))?;

    let report = StoreMerger::new()
        .save(&table, &config.store.paths())
        .context("failed to save click stores")?;
    for path in &report.written {
        eprintln!("wrote {}", path.display());
    }
    println!(
        "updated {} station record(s); stores now hold {}",
        report.updated_count, report.total_pairs
    );
    Ok(())
}
