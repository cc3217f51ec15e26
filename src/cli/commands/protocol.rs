//! `wrec protocol` command - Collection and transportation protocols

use clap::Subcommand;
use miette::Result;

use crate::cli::commands::records::{
    self, set_list, DeleteArgs, ExportArgs, FieldArgs, ImportArgs, ListArgs, ShowArgs,
};
use crate::cli::GlobalOpts;
use crate::core::fields::FieldSet;
use crate::entities::Protocol;

#[derive(Subcommand, Debug)]
pub enum ProtocolCommands {
    /// List protocols
    List(ListArgs),

    /// Record a new collection/transportation protocol
    New(NewArgs),

    /// Show a protocol's details
    Show(ShowArgs),

    /// Change fields of a protocol
    Edit(EditArgs),

    /// Delete a protocol
    Delete(DeleteArgs),

    /// Write all protocols to a JSON file
    Export(ExportArgs),

    /// Load protocols from a JSON file and keep using that file
    Import(ImportArgs),

    /// Go back to the default c_t_data.json file
    Unbind,
}

/// Protocol fields
#[derive(clap::Args, Debug, Default)]
pub struct ProtocolFields {
    /// City, town or barangay
    #[arg(long)]
    pub city: Option<String>,

    /// Area served
    #[arg(long)]
    pub area: Option<String>,

    /// Collection frequency (e.g. "Weekly")
    #[arg(long)]
    pub frequency: Option<String>,

    /// Collection methods, comma-separated (see `wrec catalog methods`)
    #[arg(long = "method", value_delimiter = ',')]
    pub methods: Vec<String>,

    /// Transportation modes, comma-separated (see `wrec catalog transportation`)
    #[arg(long, value_delimiter = ',')]
    pub transportation: Vec<String>,
}

impl FieldArgs for ProtocolFields {
    fn to_fields(&self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields.set_opt("City", self.city.clone());
        fields.set_opt("Area", self.area.clone());
        fields.set_opt("Frequency", self.frequency.clone());
        set_list(&mut fields, "Methods", &self.methods);
        set_list(&mut fields, "Transportation", &self.transportation);
        fields
    }
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    #[command(flatten)]
    pub fields: ProtocolFields,

    /// Prompt for fields not given as flags
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Record ID or short ID (@N)
    pub id: String,

    #[command(flatten)]
    pub fields: ProtocolFields,

    /// Prompt for every field, starting from the current values
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

pub fn run(cmd: ProtocolCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ProtocolCommands::List(args) => records::run_list::<Protocol>(args, global),
        ProtocolCommands::New(args) => {
            records::run_new::<Protocol>(args.fields.to_fields(), args.interactive, global)
        }
        ProtocolCommands::Show(args) => records::run_show::<Protocol>(args, global),
        ProtocolCommands::Edit(args) => records::run_edit::<Protocol>(
            &args.id,
            args.fields.to_fields(),
            args.interactive,
            global,
        ),
        ProtocolCommands::Delete(args) => records::run_delete::<Protocol>(args, global),
        ProtocolCommands::Export(args) => records::run_export::<Protocol>(args, global),
        ProtocolCommands::Import(args) => records::run_import::<Protocol>(args, global),
        ProtocolCommands::Unbind => records::run_unbind::<Protocol>(global),
    }
}
