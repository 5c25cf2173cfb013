//! Food diary command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration from file, environment and flags.
//! - Start logging when a log directory is configured.
//! - Run one subcommand, or the interactive shell, against the diary file.

mod commands;
mod parser;
mod session;
mod shell;

use anyhow::Context;
use clap::Parser;
use foodiary_core::{init_logging, load_config, AppConfig, JsonFoodDiaryStorage};
use log::info;
use std::path::{Path, PathBuf};

use crate::commands::Invocation;
use crate::parser::Cli;
use crate::session::Session;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli);

    if let Some(log_dir) = config.log_dir.as_deref() {
        let log_dir = absolute(log_dir)?;
        if let Err(err) = init_logging(config.effective_log_level(), &log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let data_file = config.effective_data_file();
    info!(
        "event=cli_start module=cli status=ok data_file={} version={}",
        data_file.display(),
        foodiary_core::core_version()
    );
    let mut session = Session::open(JsonFoodDiaryStorage::new(data_file));

    match cli.command.into_invocation()? {
        Invocation::Shell => shell::run(&mut session)?,
        Invocation::Run(command) => {
            let result = session.execute(command.as_ref());
            session
                .save_if_changed()
                .context("failed to save the food diary")?;
            match result {
                Ok(outcome) => println!("{}", session.describe(command.as_ref(), &outcome)),
                Err(err) => anyhow::bail!("{err}"),
            }
        }
    }
    Ok(())
}

/// Config file values overlaid with flags and `FOODIARY_*` variables.
fn resolve_config(cli: &Cli) -> AppConfig {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(foodiary_core::config::DEFAULT_CONFIG_FILE));
    let from_file = match load_config(&path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!(
                "warning: ignoring config `{}`: {err}; using defaults",
                path.display()
            );
            AppConfig::default()
        }
    };
    from_file.merged(AppConfig {
        data_file: cli.data_file.clone(),
        log_level: cli.log_level.clone(),
        log_dir: cli.log_dir.clone(),
    })
}

fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to read working directory")?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::{absolute, resolve_config};
    use crate::parser::Cli;
    use clap::Parser;
    use std::path::{Path, PathBuf};

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config_path = dir.path().join("config.json");
        std::fs::write(
            &config_path,
            r#"{ "data_file": "from-config.json", "log_level": "warn" }"#,
        )
        .expect("write config");

        let cli = Cli::parse_from([
            "foodiary",
            "--config",
            config_path.to_str().expect("utf-8 path"),
            "--data-file",
            "from-flag.json",
            "list",
        ]);
        let config = resolve_config(&cli);
        assert_eq!(config.effective_data_file(), PathBuf::from("from-flag.json"));
        assert_eq!(config.effective_log_level(), "warn");
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config_path = dir.path().join("config.json");
        std::fs::write(&config_path, "[1, 2").expect("write config");

        let cli = Cli::parse_from([
            "foodiary",
            "--config",
            config_path.to_str().expect("utf-8 path"),
            "list",
        ]);
        assert!(resolve_config(&cli).data_file.is_none());
    }

    #[test]
    fn relative_log_dir_becomes_absolute() {
        let resolved = absolute(Path::new("logs")).expect("cwd readable");
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("logs"));
    }
}
