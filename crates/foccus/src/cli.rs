use clap::{Parser, Subcommand, ValueEnum};
use foccus_telemetry::Source;

#[derive(Parser)]
#[command(name = "foccus")]
#[command(version)]
#[command(about = "Coding time accounting from editor heartbeats")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a single heartbeat for a file
    Record {
        /// Path of the file being edited
        #[arg(short, long)]
        file: String,

        #[arg(short, long)]
        project: Option<String>,

        #[arg(short, long)]
        branch: Option<String>,

        /// Who produced the edit: human, ai or debugging
        #[arg(short, long, default_value = "human")]
        source: Source,

        /// Unix seconds (defaults to now)
        #[arg(short, long)]
        timestamp: Option<i64>,
    },

    /// Import heartbeats from JSONL
    Ingest {
        /// Path to heartbeat JSONL (reads stdin if omitted)
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Show the coding dashboard
    Report {
        /// Emit the dashboard as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print time coded today
    Status,

    /// All-time totals grouped by language or project
    Totals {
        #[arg(long, value_enum, default_value_t = TotalsBy::Language)]
        by: TotalsBy,
    },

    /// Inspect or manage the heartbeat store
    Db {
        #[command(subcommand)]
        action: Option<DbAction>,
    },

    /// Print version information
    Version,
}

#[derive(Subcommand)]
pub enum DbAction {
    /// Show store location, size and ceiling
    Info,
    /// Set the store size ceiling in MB (clamped to the supported range)
    SetCeiling { mb: String },
    /// Delete every stored heartbeat
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TotalsBy {
    Language,
    Project,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_version() {
        let cli = Cli::try_parse_from(["foccus", "version"]);
        assert!(cli.is_ok());
        assert!(matches!(cli.unwrap().command, Commands::Version));
    }

    #[test]
    fn test_cli_parse_record() {
        let cli = Cli::try_parse_from([
            "foccus", "record", "--file", "src/main.rs", "--project", "foccus", "--source", "ai",
        ])
        .unwrap();

        if let Commands::Record {
            file,
            project,
            branch,
            source,
            timestamp,
        } = cli.command
        {
            assert_eq!(file, "src/main.rs");
            assert_eq!(project.as_deref(), Some("foccus"));
            assert_eq!(branch, None);
            assert_eq!(source, Source::Ai);
            assert_eq!(timestamp, None);
        } else {
            panic!("Expected Record command");
        }
    }

    #[test]
    fn test_cli_rejects_unknown_source() {
        let cli = Cli::try_parse_from(["foccus", "record", "--file", "a.rs", "--source", "robot"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_ingest() {
        let cli = Cli::try_parse_from(["foccus", "ingest", "--file", "beats.jsonl"]).unwrap();
        if let Commands::Ingest { file } = cli.command {
            assert_eq!(file, Some("beats.jsonl".to_string()));
        } else {
            panic!("Expected Ingest command");
        }
    }

    #[test]
    fn test_cli_parse_totals() {
        let cli = Cli::try_parse_from(["foccus", "totals"]).unwrap();
        assert!(matches!(cli.command, Commands::Totals { by: TotalsBy::Language }));

        let cli = Cli::try_parse_from(["foccus", "totals", "--by", "project"]).unwrap();
        assert!(matches!(cli.command, Commands::Totals { by: TotalsBy::Project }));
    }

    #[test]
    fn test_cli_parse_db_actions() {
        for args in [
            vec!["foccus", "db"],
            vec!["foccus", "db", "info"],
            vec!["foccus", "db", "set-ceiling", "42"],
            vec!["foccus", "db", "clear"],
        ] {
            let cli = Cli::try_parse_from(&args);
            assert!(cli.is_ok(), "Failed to parse {:?}", args);
        }

        let cli = Cli::try_parse_from(["foccus", "db", "set-ceiling", "abc"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Db { action: Some(DbAction::SetCeiling { ref mb }) } if mb == "abc"
        ));
    }
}
