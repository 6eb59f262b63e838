//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// keypad-calc: a four-function keypad calculator for the terminal
#[derive(Parser, Debug)]
#[command(name = "keypad-calc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Engine configuration file (JSON)
    #[arg(long, global = true, env = "KEYPAD_CALC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a key script and print the display
    Replay(ReplayArgs),

    /// Use the calculator interactively in the terminal
    Interactive,

    /// Show the effective engine configuration
    Config,
}

/// Arguments for the replay command
#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// Keys to press, e.g. "7+3=" or "5/0=<wait>"
    pub script: String,

    /// Print the display after every key
    #[arg(long)]
    pub frames: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::ColorChoice;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_replay() {
        let cli = Cli::parse_from(["keypad-calc", "replay", "7+3=", "--frames"]);
        if let Commands::Replay(args) = cli.command {
            assert_eq!(args.script, "7+3=");
            assert!(args.frames);
            assert!(!args.json);
        } else {
            panic!("expected Replay command");
        }
    }

    #[test]
    fn test_parse_replay_json() {
        let cli = Cli::parse_from(["keypad-calc", "replay", "--json", "1+1="]);
        assert!(matches!(cli.command, Commands::Replay(ReplayArgs { json: true, .. })));
    }

    #[test]
    fn test_parse_interactive() {
        let cli = Cli::parse_from(["keypad-calc", "interactive"]);
        assert!(matches!(cli.command, Commands::Interactive));
    }

    #[test]
    fn test_parse_config_with_path() {
        let cli = Cli::parse_from(["keypad-calc", "config", "--config", "keypad.json"]);
        assert!(matches!(cli.command, Commands::Config));
        assert_eq!(cli.config, Some(PathBuf::from("keypad.json")));
    }

    #[test]
    fn test_global_verbose_flag() {
        let cli = Cli::parse_from(["keypad-calc", "-vv", "config"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_global_quiet_after_subcommand() {
        let cli = Cli::parse_from(["keypad-calc", "replay", "1", "-q"]);
        assert!(cli.quiet);
    }

    #[test]
    fn test_color_arg() {
        let cli = Cli::parse_from(["keypad-calc", "--color", "never", "config"]);
        assert_eq!(cli.color, ColorArg::Never);
        assert_eq!(ColorChoice::from(cli.color), ColorChoice::Never);
        assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
        assert_eq!(ColorChoice::from(ColorArg::default()), ColorChoice::Auto);
    }

    #[test]
    fn test_missing_subcommand_fails() {
        assert!(Cli::try_parse_from(["keypad-calc"]).is_err());
    }
}
