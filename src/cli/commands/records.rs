//! Commands shared by every record kind
//!
//! Each kind module (`waste`, `protocol`, `facility`, `taxonomy`) owns its
//! clap definitions and field flags, then dispatches here. The functions
//! are generic over [`Record`], so list/new/show/edit/delete behave the
//! same for every collection.

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::effective_format;
use crate::cli::table::{ColumnDef, TableConfig, TableFormatter, TableRow};
use crate::cli::wizard::RecordWizard;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::fields::{FieldSet, FieldValue};
use crate::core::form::FormState;
use crate::core::identity::RecordId;
use crate::core::loader;
use crate::core::project::Project;
use crate::core::record::Record;
use crate::core::shortid::ShortIdIndex;
use crate::core::store::{RecordStore, StoreError};
use crate::core::transfer;
use crate::core::Config;

/// Field flags of a kind's `new`/`edit` commands
pub trait FieldArgs {
    /// Flags that were given, keyed by JSON field name
    fn to_fields(&self) -> FieldSet;
}

/// Insert a list flag only when at least one value was given
pub fn set_list(fields: &mut FieldSet, name: &str, values: &[String]) {
    if !values.is_empty() {
        fields.set(name, FieldValue::List(values.to_vec()));
    }
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only show records with a field containing this text (case-insensitive)
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Limit output to N records
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show count only
    #[arg(long)]
    pub count: bool,

    /// Wrap long cells at this width instead of truncating
    #[arg(long, short = 'w')]
    pub wrap: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Record ID or short ID (@N)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Record ID or short ID (@N)
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// File to write the collection to
    pub path: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// JSON file to load; it becomes the kind's backing file
    pub path: PathBuf,
}

/// Project, configuration and output format for one invocation
pub struct Session {
    pub project: Project,
    pub config: Config,
    pub format: OutputFormat,
}

impl Session {
    pub fn open(global: &GlobalOpts) -> Result<Self> {
        let project =
            Project::locate(global.project.as_deref()).map_err(|e| miette::miette!("{}", e))?;
        let config = Config::load(Some(&project));
        let format = effective_format(global.format, &config);
        Ok(Self {
            project,
            config,
            format,
        })
    }

    /// Open the collection `R` currently reads and writes
    pub fn store<R: Record>(&self) -> Result<RecordStore<R>> {
        Ok(transfer::open_active::<R>(&self.project, &self.config)?)
    }

    /// Resolve `@N` or a literal ID
    pub fn resolve_id<R: Record>(&self, reference: &str) -> Result<RecordId> {
        let short_ids = ShortIdIndex::load(&self.project, R::KIND);
        let resolved = short_ids.resolve(reference).ok_or_else(|| {
            miette::miette!(
                "unknown short ID '{}'; run `wrec {} list` to refresh short IDs",
                reference,
                R::KIND
            )
        })?;
        RecordId::parse(&resolved).map_err(|e| miette::miette!("{}", e))
    }

    fn save_short_ids<R: Record>(&self, index: &ShortIdIndex) {
        if let Err(e) = index.save(&self.project, R::KIND) {
            tracing::warn!(kind = %R::KIND, error = %e, "could not save short IDs");
        }
    }
}

fn find<'a, R: Record>(store: &'a RecordStore<R>, id: &RecordId) -> Result<&'a R, StoreError> {
    store.get(id).ok_or_else(|| StoreError::NotFound {
        kind: R::KIND,
        id: id.clone(),
    })
}

fn matches_search<R: Record>(record: &R, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    record.id().as_str().to_lowercase().contains(&needle)
        || record
            .row()
            .iter()
            .any(|cell| cell.to_lowercase().contains(&needle))
}

pub fn run_list<R: Record>(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let store = session.store::<R>()?;

    let mut records: Vec<&R> = store
        .records()
        .iter()
        .filter(|r| args.search.as_deref().map_or(true, |s| matches_search(*r, s)))
        .collect();
    if let Some(limit) = args.limit {
        records.truncate(limit);
    }

    if args.count {
        println!("{}", records.len());
        return Ok(());
    }

    let mut short_ids = ShortIdIndex::load(&session.project, R::KIND);
    short_ids.rebuild(records.iter().map(|r| r.id()));
    session.save_short_ids::<R>(&short_ids);

    if records.is_empty() {
        match session.format {
            OutputFormat::Json | OutputFormat::Yaml => println!("[]"),
            OutputFormat::Id | OutputFormat::Csv => {}
            _ => {
                println!("No {} records found.", R::KIND);
                println!();
                println!(
                    "Create one with: {}",
                    style(format!("wrec {} new", R::KIND)).yellow()
                );
            }
        }
        return Ok(());
    }

    match session.format {
        OutputFormat::Json => {
            println!("{}", loader::to_json_string(&records).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&records).into_diagnostic()?);
        }
        format => {
            let columns = ColumnDef::for_schema(R::SCHEMA);
            let rows: Vec<TableRow> = records
                .iter()
                .map(|r| TableRow::for_record(*r, &short_ids))
                .collect();
            let config = match args.wrap {
                Some(width) => TableConfig::with_wrap(width),
                None => TableConfig::default(),
            };
            TableFormatter::new(&columns, R::KIND.as_str())
                .with_config(config)
                .output(&rows, format);
        }
    }

    Ok(())
}

pub fn run_new<R: Record>(given: FieldSet, interactive: bool, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let mut store = session.store::<R>()?;

    let mut fields = given;
    if interactive {
        let prompted = RecordWizard::new().run(R::KIND, R::SCHEMA, &fields, None)?;
        fields.merge(&prompted);
    }
    fields.apply_defaults(R::SCHEMA);

    let mut form = FormState::<R>::new();
    form.fill(&fields);
    let record = form.submit(&mut store)?;

    let mut short_ids = ShortIdIndex::load(&session.project, R::KIND);
    let short = short_ids.add(record.id().to_string());
    session.save_short_ids::<R>(&short_ids);

    match session.format {
        OutputFormat::Id => println!("{}", record.id()),
        OutputFormat::Json => println!("{}", loader::to_json_string(&record).into_diagnostic()?),
        _ => {
            println!(
                "{} Created {} {} {}",
                style("✓").green(),
                R::KIND.label(),
                style(format!("@{}", short)).cyan(),
                style(record.id()).cyan()
            );
            println!("   {}", style(store.path().display()).dim());
        }
    }

    Ok(())
}

pub fn run_show<R: Record>(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let store = session.store::<R>()?;
    let id = session.resolve_id::<R>(&args.id)?;
    let record = find(&store, &id)?;

    match session.format {
        OutputFormat::Json => println!("{}", loader::to_json_string(record).into_diagnostic()?),
        OutputFormat::Yaml => print!("{}", serde_yml::to_string(record).into_diagnostic()?),
        OutputFormat::Id => println!("{}", record.id()),
        OutputFormat::Tsv | OutputFormat::Csv | OutputFormat::Md => {
            let short_ids = ShortIdIndex::load(&session.project, R::KIND);
            let columns = ColumnDef::for_schema(R::SCHEMA);
            TableFormatter::new(&columns, R::KIND.as_str())
                .with_config(TableConfig {
                    show_summary: false,
                    ..TableConfig::default()
                })
                .output(&[TableRow::for_record(record, &short_ids)], session.format);
        }
        OutputFormat::Auto => {
            let fields = record.to_fields();
            println!("{}", style("─".repeat(60)).dim());
            println!("{}: {}", style("ID").bold(), style(record.id()).cyan());
            for spec in R::SCHEMA {
                let value = fields.text(spec.name);
                if value.is_empty() {
                    println!("{}: {}", style(spec.label).bold(), style("-").dim());
                } else {
                    println!("{}: {}", style(spec.label).bold(), value);
                }
            }
            println!("{}", style("─".repeat(60)).dim());
        }
    }

    Ok(())
}

pub fn run_edit<R: Record>(
    reference: &str,
    given: FieldSet,
    interactive: bool,
    global: &GlobalOpts,
) -> Result<()> {
    let session = Session::open(global)?;
    let mut store = session.store::<R>()?;
    let id = session.resolve_id::<R>(reference)?;
    let current = find(&store, &id)?.clone();

    let mut form = FormState::<R>::new();
    form.select(&current);

    let mut changes = given;
    if interactive {
        let current_fields = current.to_fields();
        let prompted =
            RecordWizard::new().run(R::KIND, R::SCHEMA, &changes, Some(&current_fields))?;
        changes.merge(&prompted);
    } else if changes.is_empty() {
        return Err(miette::miette!(
            "nothing to change; pass field flags or use --interactive"
        ));
    }

    form.fill(&changes);
    let record = form.submit(&mut store)?;

    match session.format {
        OutputFormat::Id => println!("{}", record.id()),
        OutputFormat::Json => println!("{}", loader::to_json_string(&record).into_diagnostic()?),
        _ => println!(
            "{} Updated {} {}",
            style("✓").green(),
            R::KIND.label(),
            style(record.id()).cyan()
        ),
    }

    Ok(())
}

pub fn run_delete<R: Record>(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let mut store = session.store::<R>()?;
    let id = session.resolve_id::<R>(&args.id)?;

    let Some(record) = store.get(&id) else {
        println!(
            "{} No {} with ID {}; nothing deleted",
            style("!").yellow(),
            R::KIND.label(),
            style(&id).cyan()
        );
        return Ok(());
    };

    if session.config.confirm_delete() && !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Delete {} {} ({})?",
                R::KIND.label(),
                id,
                record.title()
            ))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let removed = store.delete(&id)?;
    println!(
        "{} Deleted {} {} record(s) with ID {}",
        style("✓").green(),
        removed,
        R::KIND,
        style(&id).cyan()
    );

    Ok(())
}

pub fn run_export<R: Record>(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    let store = session.store::<R>()?;
    let count = transfer::export(&store, &args.path)?;

    println!(
        "{} Exported {} {} record(s) to {}",
        style("✓").green(),
        count,
        R::KIND,
        style(args.path.display()).cyan()
    );
    Ok(())
}

pub fn run_import<R: Record>(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    // The current file is replaced, so it is not read
    let active = transfer::active_path(&session.project, &session.config, R::KIND)?;
    let mut store = RecordStore::<R>::from_records(active, Vec::new());

    let count = transfer::import_and_bind(&session.project, &mut store, &args.path)?;

    println!(
        "{} Imported {} {} record(s) from {}",
        style("✓").green(),
        count,
        R::KIND,
        style(store.path().display()).cyan()
    );
    println!(
        "   {} commands now use this file. Run {} to revert.",
        R::KIND,
        style(format!("wrec {} unbind", R::KIND)).yellow()
    );
    Ok(())
}

pub fn run_unbind<R: Record>(global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global)?;
    match transfer::unbind(&session.project, R::KIND)? {
        Some(previous) => {
            let default = transfer::active_path(&session.project, &session.config, R::KIND)?;
            println!(
                "{} Unbound {} from {}",
                style("✓").green(),
                R::KIND,
                style(previous.display()).dim()
            );
            println!("   now using {}", style(default.display()).cyan());
        }
        None => println!(
            "{} {} is not bound to an imported file",
            style("!").yellow(),
            R::KIND
        ),
    }
    Ok(())
}
