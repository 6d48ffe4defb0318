//! ScholarLens CLI library.
//!
//! Configuration, page extraction, output formatting, and the commands behind
//! the `scholarlens` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod repl;

pub use cli::{Cli, Command};
pub use commands::Context;
pub use config::Config;
pub use error::{CliError, Result};
pub use extract::AutoExtractor;
pub use output::Formatter;
