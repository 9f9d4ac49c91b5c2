use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "rtg-dialogs",
    about = "Dialog list core of the rtg Telegram client (headless driver)"
)]
pub struct Cli {
    /// Path to config file (default: ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Replay a JSON-lines script through the dialogs core and print the result
    Run {
        /// Script file to replay (default: stdin)
        #[arg(short, long)]
        script: Option<PathBuf>,
    },
    /// Print the persisted dialogs snapshot
    ShowCache,
    /// Delete the persisted dialogs snapshot
    ClearCache,
}

impl Cli {
    pub fn command_or_default(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Run { script: None })
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn defaults_to_run_from_stdin_when_command_is_missing() {
        let cli = Cli::parse_from(["rtg-dialogs"]);

        assert!(matches!(
            cli.command_or_default(),
            Command::Run { script: None }
        ));
    }

    #[test]
    fn parses_run_with_script_and_config() {
        let cli = Cli::parse_from([
            "rtg-dialogs",
            "run",
            "--script",
            "startup.jsonl",
            "--config",
            "custom.toml",
        ]);

        match cli.command_or_default() {
            Command::Run { script } => assert_eq!(
                script.as_deref().map(|p| p.to_string_lossy().to_string()),
                Some("startup.jsonl".to_owned())
            ),
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(
            cli.config
                .as_deref()
                .map(|p| p.to_string_lossy().to_string()),
            Some("custom.toml".to_owned())
        );
    }

    #[test]
    fn parses_cache_commands() {
        let cli = Cli::parse_from(["rtg-dialogs", "clear-cache"]);

        assert!(matches!(cli.command_or_default(), Command::ClearCache));
    }
}
