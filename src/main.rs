use clap::Parser;
use miette::Result;
use wrec::cli::{Cli, Commands};
use wrec::cli::commands;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    wrec::core::logging::init_logging(global.verbose, global.quiet);

    match cli.command {
        Commands::Init(args) => commands::init::run(args),
        Commands::Waste(cmd) => commands::waste::run(cmd, &global),
        Commands::Protocol(cmd) => commands::protocol::run(cmd, &global),
        Commands::Facility(cmd) => commands::facility::run(cmd, &global),
        Commands::Taxonomy(cmd) => commands::taxonomy::run(cmd, &global),
        Commands::Catalog(args) => commands::catalog::run(args, &global),
        Commands::Report(cmd) => commands::report::run(cmd, &global),
        Commands::Config(cmd) => commands::config::run(cmd, &global),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
