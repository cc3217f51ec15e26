//! `wrec facility` command - Waste facility registry

use clap::Subcommand;
use miette::Result;

use crate::cli::commands::records::{
    self, set_list, DeleteArgs, ExportArgs, FieldArgs, ImportArgs, ListArgs, ShowArgs,
};
use crate::cli::GlobalOpts;
use crate::core::fields::FieldSet;
use crate::entities::Facility;

#[derive(Subcommand, Debug)]
pub enum FacilityCommands {
    /// List facilities
    List(ListArgs),

    /// Register a new facility
    New(NewArgs),

    /// Show a facility's details
    Show(ShowArgs),

    /// Change fields of a facility
    Edit(EditArgs),

    /// Delete a facility
    Delete(DeleteArgs),

    /// Write all facilities to a JSON file
    Export(ExportArgs),

    /// Load facilities from a JSON file and keep using that file
    Import(ImportArgs),

    /// Go back to the default facility_data.json file
    Unbind,
}

/// Facility fields
#[derive(clap::Args, Debug, Default)]
pub struct FacilityFields {
    /// Facility name
    #[arg(long)]
    pub name: Option<String>,

    /// Facility area
    #[arg(long)]
    pub area: Option<String>,

    /// Operating hours (e.g. "6am-6pm")
    #[arg(long)]
    pub hours: Option<String>,

    /// Street address
    #[arg(long)]
    pub address: Option<String>,

    /// Facility type (default for new facilities: Landfills)
    #[arg(long = "type")]
    pub facility_type: Option<String>,

    /// Disposal methods, comma-separated (see `wrec catalog disposal-methods`)
    #[arg(long = "disposal", value_delimiter = ',')]
    pub disposal_methods: Vec<String>,
}

impl FieldArgs for FacilityFields {
    fn to_fields(&self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields.set_opt("FacilityName", self.name.clone());
        fields.set_opt("FacilityArea", self.area.clone());
        fields.set_opt("OperatingHours", self.hours.clone());
        fields.set_opt("Address", self.address.clone());
        fields.set_opt("FacilityType", self.facility_type.clone());
        set_list(&mut fields, "DisposalMethods", &self.disposal_methods);
        fields
    }
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    #[command(flatten)]
    pub fields: FacilityFields,

    /// Prompt for fields not given as flags
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Record ID or short ID (@N)
    pub id: String,

    #[command(flatten)]
    pub fields: FacilityFields,

    /// Prompt for every field, starting from the current values
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

pub fn run(cmd: FacilityCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        FacilityCommands::List(args) => records::run_list::<Facility>(args, global),
        FacilityCommands::New(args) => {
            records::run_new::<Facility>(args.fields.to_fields(), args.interactive, global)
        }
        FacilityCommands::Show(args) => records::run_show::<Facility>(args, global),
        FacilityCommands::Edit(args) => records::run_edit::<Facility>(
            &args.id,
            args.fields.to_fields(),
            args.interactive,
            global,
        ),
        FacilityCommands::Delete(args) => records::run_delete::<Facility>(args, global),
        FacilityCommands::Export(args) => records::run_export::<Facility>(args, global),
        FacilityCommands::Import(args) => records::run_import::<Facility>(args, global),
        FacilityCommands::Unbind => records::run_unbind::<Facility>(global),
    }
}
