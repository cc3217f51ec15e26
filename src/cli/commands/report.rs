//! `wrec report` command - Text reports from JSON files and collections

use chrono::Local;
use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::cli::commands::records::Session;
use crate::cli::table::{ColumnDef, TableConfig, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::identity::RecordKind;
use crate::core::loader;
use crate::core::record::Record;
use crate::core::shortid::ShortIdIndex;
use crate::core::store::StoreError;
use crate::entities::{Facility, Protocol, TaxonomyEntry, WasteEntry};

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Convert any JSON file into an indented text report
    Json(JsonArgs),

    /// Render a collection as a text table
    Table(TableArgs),
}

#[derive(clap::Args, Debug)]
pub struct JsonArgs {
    /// JSON file to read
    pub input: PathBuf,

    /// Text file to write (default: stdout)
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct TableArgs {
    /// Collection to report on (waste, protocol, facility, taxonomy)
    pub kind: RecordKind,

    /// Text file to write (default: stdout)
    pub output: Option<PathBuf>,
}

pub fn run(cmd: ReportCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ReportCommands::Json(args) => run_json(args),
        ReportCommands::Table(args) => {
            let session = Session::open(global)?;
            let content = match args.kind {
                RecordKind::Waste => table_report::<WasteEntry>(&session)?,
                RecordKind::Protocol => table_report::<Protocol>(&session)?,
                RecordKind::Facility => table_report::<Facility>(&session)?,
                RecordKind::Taxonomy => table_report::<TaxonomyEntry>(&session)?,
            };
            write_output(&content, args.output)
        }
    }
}

fn run_json(args: JsonArgs) -> Result<()> {
    let content = json_report(&args.input)?;
    write_output(&content, args.output)
}

/// Re-indent the JSON document in `input`
///
/// Any JSON value is accepted, not only collections.
pub fn json_report(input: &Path) -> Result<String, StoreError> {
    let raw = std::fs::read_to_string(input).map_err(|e| StoreError::io(input, e))?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| StoreError::malformed(input, e))?;
    loader::to_json_string(&value).map_err(|e| StoreError::malformed(input, e))
}

fn table_report<R: Record>(session: &Session) -> Result<String> {
    let store = session.store::<R>()?;
    let short_ids = ShortIdIndex::load(&session.project, R::KIND);
    let columns = ColumnDef::for_schema(R::SCHEMA);
    let rows: Vec<TableRow> = store
        .records()
        .iter()
        .map(|r| TableRow::for_record(r, &short_ids))
        .collect();

    let mut out = format!(
        "{} report\nSource: {}\nGenerated: {}\nRecords: {}\n\n",
        R::KIND.label(),
        store.path().display(),
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        store.len()
    );
    out.push_str(
        &TableFormatter::new(&columns, R::KIND.as_str())
            .with_config(TableConfig::for_file())
            .render(&rows, OutputFormat::Tsv),
    );
    Ok(out)
}

fn write_output(content: &str, output_path: Option<PathBuf>) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(&path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            writer.flush().into_diagnostic()?;
            println!(
                "{} Report written to {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
        None => print!("{}", content),
    }
    Ok(())
}
