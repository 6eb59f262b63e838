//! keypad-calc: four-function keypad calculator
//!
//! ## Usage
//!
//! ```bash
//! keypad-calc interactive              # Calculator in the terminal
//! keypad-calc replay "7+3="            # Prints 10
//! keypad-calc replay "5/0=<wait>" --frames
//! keypad-calc --config keypad.json config
//! ```

use clap::Parser;
use console::style;
use keypad_calc_cli::{
    logging, parse_script, run_interactive, run_script, Cli, CliConfig, CliResult, Commands,
    ReplayArgs, ReplayReport, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);

    console::set_colors_enabled(config.color.should_color());
    logging::init(config.verbosity);

    match cli.command {
        Commands::Replay(args) => run_replay(&config, &args),
        Commands::Interactive => run_interactive(config.engine_config()?),
        Commands::Config => run_config(&config),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.into())
        .with_engine_config_path(cli.config.as_deref())
}

fn run_replay(config: &CliConfig, args: &ReplayArgs) -> CliResult<()> {
    let tokens = parse_script(&args.script)?;
    let report = run_script(&tokens, config.engine_config()?)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    if args.frames {
        print_frames(&report);
    } else {
        println!("{}", report.display);
    }
    Ok(())
}

fn print_frames(report: &ReplayReport) {
    let width = report
        .steps
        .iter()
        .map(|s| s.input.chars().count())
        .max()
        .unwrap_or(0);
    for step in &report.steps {
        let display = if step.error {
            style(&step.display).red().to_string()
        } else {
            step.display.clone()
        };
        println!("{:>width$}  {display}", step.input);
    }
}

fn run_config(config: &CliConfig) -> CliResult<()> {
    let engine_config = config.engine_config()?;
    if config.verbosity.is_verbose() {
        match &config.engine_config_path {
            Some(path) => eprintln!("Loaded from {}", path.display()),
            None => eprintln!("Using built-in defaults"),
        }
    }
    println!("{}", serde_json::to_string_pretty(&engine_config)?);
    Ok(())
}
