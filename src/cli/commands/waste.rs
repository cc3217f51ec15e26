//! `wrec waste` command - Waste inventory management

use clap::Subcommand;
use miette::Result;

use crate::cli::commands::records::{
    self, set_list, DeleteArgs, ExportArgs, FieldArgs, ImportArgs, ListArgs, ShowArgs,
};
use crate::cli::GlobalOpts;
use crate::core::fields::FieldSet;
use crate::entities::WasteEntry;

#[derive(Subcommand, Debug)]
pub enum WasteCommands {
    /// List waste entries
    List(ListArgs),

    /// Record a new waste entry
    New(NewArgs),

    /// Show a waste entry's details
    Show(ShowArgs),

    /// Change fields of a waste entry
    Edit(EditArgs),

    /// Delete a waste entry
    Delete(DeleteArgs),

    /// Write all waste entries to a JSON file
    Export(ExportArgs),

    /// Load waste entries from a JSON file and keep using that file
    Import(ImportArgs),

    /// Go back to the default waste_data.json file
    Unbind,
}

/// Waste entry fields
#[derive(clap::Args, Debug, Default)]
pub struct WasteFields {
    /// City, town or barangay
    #[arg(long)]
    pub city: Option<String>,

    /// Waste categories, comma-separated (see `wrec catalog categories`)
    #[arg(long, value_delimiter = ',')]
    pub category: Vec<String>,

    /// Quantity (e.g. "12" or "12 tons")
    #[arg(long)]
    pub quantity: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

impl FieldArgs for WasteFields {
    fn to_fields(&self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields.set_opt("City", self.city.clone());
        set_list(&mut fields, "Category", &self.category);
        fields.set_opt("Quantity", self.quantity.clone());
        fields.set_opt("Notes", self.notes.clone());
        fields
    }
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    #[command(flatten)]
    pub fields: WasteFields,

    /// Prompt for fields not given as flags
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Record ID or short ID (@N)
    pub id: String,

    #[command(flatten)]
    pub fields: WasteFields,

    /// Prompt for every field, starting from the current values
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

pub fn run(cmd: WasteCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        WasteCommands::List(args) => records::run_list::<WasteEntry>(args, global),
        WasteCommands::New(args) => {
            records::run_new::<WasteEntry>(args.fields.to_fields(), args.interactive, global)
        }
        WasteCommands::Show(args) => records::run_show::<WasteEntry>(args, global),
        WasteCommands::Edit(args) => records::run_edit::<WasteEntry>(
            &args.id,
            args.fields.to_fields(),
            args.interactive,
            global,
        ),
        WasteCommands::Delete(args) => records::run_delete::<WasteEntry>(args, global),
        WasteCommands::Export(args) => records::run_export::<WasteEntry>(args, global),
        WasteCommands::Import(args) => records::run_import::<WasteEntry>(args, global),
        WasteCommands::Unbind => records::run_unbind::<WasteEntry>(global),
    }
}
