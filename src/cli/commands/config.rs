//! `wrec config` command - Configuration inspection

use clap::Subcommand;
use console::style;
use miette::Result;
use std::path::Path;

use crate::cli::GlobalOpts;
use crate::core::config::CONFIG_KEYS;
use crate::core::project::Project;
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration values
    Show(ShowArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    // Config commands also work outside a project
    let project = Project::locate(global.project.as_deref()).ok();

    match cmd {
        ConfigCommands::Show(args) => run_show(args, project.as_ref()),
        ConfigCommands::Path => run_path(project.as_ref()),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs, project: Option<&Project>) -> Result<()> {
    let config = Config::load(project);

    if let Some(key) = &args.key {
        let value = config
            .get(key)
            .ok_or_else(|| miette::miette!("Unknown config key '{}'", key))?;
        println!("{}", value);
        return Ok(());
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    for (key, _) in CONFIG_KEYS {
        let value = config.get(key).unwrap_or_default();
        println!("  {}: {}", style(key).cyan(), style(value).yellow());
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Environment variables (WREC_DATA_DIR, WREC_FORMAT)");
    println!("  2. Project config (.wrec/config.yaml)");
    println!("  3. Global config (~/.config/wrec/config.yaml)");

    Ok(())
}

fn run_path(project: Option<&Project>) -> Result<()> {
    println!("{}", style("Configuration file paths:").bold());
    println!();

    match Config::global_config_path() {
        Some(path) => print_path("Global:", &path),
        None => println!("  {} {}", style("Global:").cyan(), style("(unavailable)").dim()),
    }

    println!();
    match project {
        Some(project) => print_path("Project:", &Config::project_config_path(project)),
        None => println!(
            "  {} {}",
            style("Project:").cyan(),
            style("(not in a waste records project)").dim()
        ),
    }

    Ok(())
}

fn print_path(label: &str, path: &Path) {
    println!("  {} {}", style(label).cyan(), path.display());
    let status = if path.exists() {
        style("(exists)").green()
    } else {
        style("(not created)").dim()
    };
    println!("  {:width$} {}", "", status, width = label.len());
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();

    for (key, description) in CONFIG_KEYS {
        println!("  {:<20} {}", style(key).cyan(), style(description).dim());
    }

    println!();
    println!(
        "{}",
        style("Set them in .wrec/config.yaml or ~/.config/wrec/config.yaml.").dim()
    );

    Ok(())
}
