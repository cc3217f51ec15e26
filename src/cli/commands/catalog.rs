//! `wrec catalog` command - List the values offered by the pickers

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::loader;
use crate::entities::Catalog;

#[derive(clap::Args, Debug)]
pub struct CatalogArgs {
    /// Catalog to list (default: all)
    #[arg(value_enum)]
    pub name: Option<Catalog>,
}

pub fn run(args: CatalogArgs, global: &GlobalOpts) -> Result<()> {
    let catalogs: Vec<Catalog> = match args.name {
        Some(catalog) => vec![catalog],
        None => Catalog::all().to_vec(),
    };

    match global.format {
        OutputFormat::Json => println!("{}", catalogs_json(&catalogs).into_diagnostic()?),
        OutputFormat::Id | OutputFormat::Tsv | OutputFormat::Csv => {
            for catalog in &catalogs {
                for entry in catalog.entries() {
                    println!("{}", entry);
                }
            }
        }
        _ => {
            for (i, catalog) in catalogs.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("{}", style(catalog).bold());
                for entry in catalog.entries() {
                    println!("  {}", entry);
                }
            }
        }
    }

    Ok(())
}

fn catalogs_json(catalogs: &[Catalog]) -> serde_json::Result<String> {
    let map: serde_json::Map<String, serde_json::Value> = catalogs
        .iter()
        .map(|c| (c.to_string(), serde_json::json!(c.entries())))
        .collect();
    loader::to_json_string(&map)
}
