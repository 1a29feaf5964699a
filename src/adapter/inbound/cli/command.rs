//! Command-line interface definitions.
//!
//! Defines the CLI structure for the haltctl operator console using `clap`:
//! watching the status feed, issuing halt/resume commands, probing health,
//! and managing configuration.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::paths;

/// Operator console for halting and resuming an autonomous trading system
#[derive(Parser, Debug)]
#[command(name = "haltctl")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the haltctl CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stream live status until interrupted
    Watch(ConfigPathArg),

    /// Print the next status snapshot and exit
    Status(StatusArgs),

    /// Probe the control-plane health endpoint
    Health(ConfigPathArg),

    /// Halt trading
    Halt(HaltArgs),

    /// Resume trading
    Resume(ResumeArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `haltctl config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults and overrides applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for the `status` subcommand.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Seconds to wait for a snapshot before giving up.
    #[arg(long, default_value = "15")]
    pub timeout: u64,
}

/// Arguments for the `halt` subcommand.
#[derive(Parser, Debug)]
pub struct HaltArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Free-text reason recorded with the command.
    #[arg(long)]
    pub reason: String,

    /// Ask the control plane to flatten open positions while halting.
    #[arg(long)]
    pub liquidate: bool,

    /// Skip the confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `resume` subcommand.
#[derive(Parser, Debug)]
pub struct ResumeArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Free-text reason recorded with the command.
    #[arg(long)]
    pub reason: String,

    /// Skip the confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `config init` subcommand.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the generated configuration file.
    #[arg(default_value_os_t = paths::default_config())]
    pub path: PathBuf,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_factory_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_name_and_version() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "haltctl");
        assert!(cmd.get_version().is_some());
    }

    #[test]
    fn color_defaults_to_auto() {
        let cli = Cli::parse_from(["haltctl", "health"]);
        assert!(matches!(cli.color, ColorChoice::Auto));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["haltctl", "watch", "--json", "-vv"]);
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn halt_requires_reason() {
        let result = Cli::try_parse_from(["haltctl", "halt"]);
        assert!(result.is_err());
    }

    #[test]
    fn halt_parses_flags() {
        let cli = Cli::parse_from([
            "haltctl",
            "halt",
            "--reason",
            "drawdown",
            "--liquidate",
            "--yes",
            "-c",
            "/tmp/h.toml",
        ]);
        match cli.command {
            Commands::Halt(args) => {
                assert_eq!(args.reason, "drawdown");
                assert!(args.liquidate);
                assert!(args.yes);
                assert_eq!(args.config, PathBuf::from("/tmp/h.toml"));
            }
            other => panic!("expected halt, got {other:?}"),
        }
    }

    #[test]
    fn resume_has_no_liquidate_flag() {
        let result =
            Cli::try_parse_from(["haltctl", "resume", "--reason", "ok", "--liquidate"]);
        assert!(result.is_err());
    }

    #[test]
    fn status_timeout_defaults() {
        let cli = Cli::parse_from(["haltctl", "status"]);
        match cli.command {
            Commands::Status(args) => {
                assert_eq!(args.timeout, 15);
                assert_eq!(args.config, paths::default_config());
            }
            other => panic!("expected status, got {other:?}"),
        }
    }

    #[test]
    fn config_init_force() {
        let cli = Cli::parse_from(["haltctl", "config", "init", "/tmp/x.toml", "--force"]);
        match cli.command {
            Commands::Config(ConfigCommand::Init(args)) => {
                assert!(args.force);
                assert_eq!(args.path, PathBuf::from("/tmp/x.toml"));
            }
            other => panic!("expected config init, got {other:?}"),
        }
    }
}
