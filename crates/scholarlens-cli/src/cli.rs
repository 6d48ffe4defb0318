//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// ScholarLens CLI - Classify research papers with page-cited evidence.
#[derive(Debug, Parser)]
#[command(name = "scholarlens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SCHOLARLENS_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (values only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the registered dimensions
    Dimensions,

    /// Load a document and make it the active one
    Load(LoadArgs),

    /// Forget the active document
    Clear,

    /// Classify the active document
    Classify(ClassifyArgs),

    /// Ask a question about the active document
    Ask(AskArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the load command.
#[derive(Debug, Parser)]
pub struct LoadArgs {
    /// PDF or plain-text file (form feeds separate pages)
    pub file: String,
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Dimensions to classify (e.g. participantsGroup sampleSize)
    pub dimensions: Vec<String>,

    /// Classify every registered dimension
    #[arg(short, long, conflicts_with = "dimensions")]
    pub all: bool,

    /// Load this file first instead of using the active document
    #[arg(long)]
    pub file: Option<String>,
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// Question about the document
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Load this file first instead of using the active document
    #[arg(long)]
    pub file: Option<String>,
}

impl AskArgs {
    /// The query words joined into one question
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_repl() {
        let cli = Cli::parse_from(["scholarlens"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_classify_command() {
        let cli = Cli::parse_from([
            "scholarlens",
            "classify",
            "participantsGroup",
            "sampleSize",
            "--file",
            "paper.pdf",
        ]);
        match cli.command {
            Some(Command::Classify(args)) => {
                assert_eq!(args.dimensions, vec!["participantsGroup", "sampleSize"]);
                assert_eq!(args.file.as_deref(), Some("paper.pdf"));
                assert!(!args.all);
            }
            _ => panic!("Expected Classify command"),
        }
    }

    #[test]
    fn test_all_conflicts_with_dimensions() {
        let result = Cli::try_parse_from(["scholarlens", "classify", "--all", "sampleSize"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_ask_joins_query_words() {
        let cli = Cli::parse_from(["scholarlens", "ask", "What", "was", "measured?"]);
        match cli.command {
            Some(Command::Ask(args)) => assert_eq!(args.query_text(), "What was measured?"),
            _ => panic!("Expected Ask command"),
        }
    }

    #[test]
    fn test_ask_requires_query() {
        assert!(Cli::try_parse_from(["scholarlens", "ask"]).is_err());
    }

    #[test]
    fn test_global_format_flag() {
        let cli = Cli::parse_from(["scholarlens", "dimensions", "--format", "json"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(matches!(cli.command, Some(Command::Dimensions)));
    }
}
