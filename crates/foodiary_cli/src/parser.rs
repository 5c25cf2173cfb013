//! Root CLI parser and global options.

use clap::Parser;
use std::path::PathBuf;

use crate::commands::Commands;

/// Command-line interface for the food diary.
#[derive(Debug, Parser)]
#[command(name = "foodiary")]
#[command(about = "Keep a diary of restaurants you have visited")]
#[command(version)]
pub struct Cli {
    /// Config file to read before applying flags
    #[arg(long, global = true, env = "FOODIARY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Diary JSON file, overriding the config
    #[arg(long = "data-file", global = true, env = "FOODIARY_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long = "log-level", global = true, env = "FOODIARY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files
    #[arg(long = "log-dir", global = true, env = "FOODIARY_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// One line typed into the interactive shell.
#[derive(Debug, Parser)]
#[command(name = "foodiary", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::{Cli, ShellLine};
    use crate::commands::Commands;
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn cli_parser_builds() {
        Cli::command().debug_assert();
        ShellLine::command().debug_assert();
    }

    #[test]
    fn global_args_parse_after_subcommand() {
        let cli = Cli::parse_from([
            "foodiary",
            "list",
            "--data-file",
            "/tmp/diary.json",
            "--log-level",
            "warn",
        ]);
        assert_eq!(cli.data_file, Some(PathBuf::from("/tmp/diary.json")));
        assert_eq!(cli.log_level.as_deref(), Some("warn"));
        assert!(matches!(cli.command, Commands::List));
    }

    #[test]
    fn shell_line_has_no_binary_name() {
        let line = ShellLine::try_parse_from("delete 2".split_whitespace()).expect("valid line");
        assert!(matches!(line.command, Commands::Delete { .. }));
    }
}
