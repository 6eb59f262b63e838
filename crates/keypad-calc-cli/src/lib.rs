//! keypad-calc CLI library
//!
//! Terminal front end for the keypad calculator engine: an interactive
//! raw-mode session, scripted key replay and configuration display.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod logging;
pub mod replay;
pub mod terminal;

pub use commands::{Cli, ColorArg, Commands, ReplayArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use replay::{parse_script, run_script, ReplayReport, ReplayStep, ScriptToken};
pub use terminal::{map_key, run_interactive, TerminalFrontend, TerminalInput};
