//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    catalog::CatalogArgs, completions::CompletionsArgs, config::ConfigCommands,
    facility::FacilityCommands, init::InitArgs, protocol::ProtocolCommands,
    report::ReportCommands, taxonomy::TaxonomyCommands, waste::WasteCommands,
};

#[derive(Parser)]
#[command(name = "wrec")]
#[command(author, version, about = "Waste Records - municipal waste data manager")]
#[command(long_about = "Manage waste inventories, collection/transportation protocols, facilities and taxonomy entries stored as plain JSON files.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Only log errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Log debug detail to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project root (default: auto-detect by finding .wrec/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new waste records project
    Init(InitArgs),

    /// Waste inventory entries (waste_data.json)
    #[command(subcommand)]
    Waste(WasteCommands),

    /// Collection and transportation protocols (c_t_data.json)
    #[command(subcommand, visible_alias = "ct")]
    Protocol(ProtocolCommands),

    /// Waste facilities (facility_data.json)
    #[command(subcommand)]
    Facility(FacilityCommands),

    /// Category and method taxonomy entries (waste_cat.json)
    #[command(subcommand)]
    Taxonomy(TaxonomyCommands),

    /// List the values offered by the pickers
    Catalog(CatalogArgs),

    /// Generate text reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table for lists, labelled fields for show
    #[default]
    Auto,
    /// JSON, indented like the collection files
    Json,
    /// YAML
    Yaml,
    /// Aligned columns
    Tsv,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}
