//! `wrec taxonomy` command - Category and method taxonomy entries

use clap::Subcommand;
use miette::Result;

use crate::cli::commands::records::{
    self, set_list, DeleteArgs, ExportArgs, FieldArgs, ImportArgs, ListArgs, ShowArgs,
};
use crate::cli::GlobalOpts;
use crate::core::fields::FieldSet;
use crate::entities::TaxonomyEntry;

#[derive(Subcommand, Debug)]
pub enum TaxonomyCommands {
    /// List taxonomy entries
    List(ListArgs),

    /// Record a new taxonomy entry
    New(NewArgs),

    /// Show a taxonomy entry's details
    Show(ShowArgs),

    /// Change fields of a taxonomy entry
    Edit(EditArgs),

    /// Delete a taxonomy entry
    Delete(DeleteArgs),

    /// Write all taxonomy entries to a JSON file
    Export(ExportArgs),

    /// Load taxonomy entries from a JSON file and keep using that file
    Import(ImportArgs),

    /// Go back to the default waste_cat.json file
    Unbind,
}

/// Taxonomy entry fields
#[derive(clap::Args, Debug, Default)]
pub struct TaxonomyFields {
    /// City, town or barangay
    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub area: Option<String>,

    #[arg(long)]
    pub frequency: Option<String>,

    /// Collection methods, comma-separated (see `wrec catalog methods`)
    #[arg(long, value_delimiter = ',')]
    pub method: Vec<String>,

    /// Transportation modes, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub transportation: Vec<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

impl FieldArgs for TaxonomyFields {
    fn to_fields(&self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields.set_opt("City", self.city.clone());
        fields.set_opt("Area", self.area.clone());
        fields.set_opt("Frequency", self.frequency.clone());
        set_list(&mut fields, "Method", &self.method);
        set_list(&mut fields, "Transportation", &self.transportation);
        fields.set_opt("Notes", self.notes.clone());
        fields
    }
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    #[command(flatten)]
    pub fields: TaxonomyFields,

    /// Prompt for fields not given as flags
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Record ID or short ID (@N)
    pub id: String,

    #[command(flatten)]
    pub fields: TaxonomyFields,

    /// Prompt for every field, starting from the current values
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

pub fn run(cmd: TaxonomyCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        TaxonomyCommands::List(args) => records::run_list::<TaxonomyEntry>(args, global),
        TaxonomyCommands::New(args) => {
            records::run_new::<TaxonomyEntry>(args.fields.to_fields(), args.interactive, global)
        }
        TaxonomyCommands::Show(args) => records::run_show::<TaxonomyEntry>(args, global),
        TaxonomyCommands::Edit(args) => records::run_edit::<TaxonomyEntry>(
            &args.id,
            args.fields.to_fields(),
            args.interactive,
            global,
        ),
        TaxonomyCommands::Delete(args) => records::run_delete::<TaxonomyEntry>(args, global),
        TaxonomyCommands::Export(args) => records::run_export::<TaxonomyEntry>(args, global),
        TaxonomyCommands::Import(args) => records::run_import::<TaxonomyEntry>(args, global),
        TaxonomyCommands::Unbind => records::run_unbind::<TaxonomyEntry>(global),
    }
}
