mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands, DbAction};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so report output on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Record {
            file,
            project,
            branch,
            source,
            timestamp,
        } => commands::record::run(&file, project, branch, source, timestamp),
        Commands::Ingest { file } => commands::ingest::run(file.as_deref()),
        Commands::Report { json } => commands::report::run(json),
        Commands::Status => commands::status::run(),
        Commands::Totals { by } => commands::totals::run(by),
        Commands::Db { action } => match action {
            Some(DbAction::Info) | None => commands::db::run_info(),
            Some(DbAction::SetCeiling { mb }) => commands::db::run_set_ceiling(&mb),
            Some(DbAction::Clear) => commands::db::run_clear(),
        },
        Commands::Version => commands::version::run(),
    }
}
