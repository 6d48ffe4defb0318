//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::cli::{AskArgs, ClassifyArgs, Command, LoadArgs};
use crate::commands::{self, Context};
use crate::config::{Config, Settings};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use scholarlens_domain::traits::{DocumentStore, LlmProvider};
use std::path::PathBuf;
use tracing::warn;

/// Run the interactive REPL.
pub async fn run_repl<L, S>(ctx: &Context<L, S>, settings: &Settings, formatter: &Formatter) -> Result<()>
where
    L: LlmProvider,
    S: DocumentStore,
{
    println!("{}", formatter.info("ScholarLens REPL - Type 'help' for commands, 'exit' to quit"));
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(settings.history_size)
        .map_err(|e| CliError::Config(format!("Invalid history size: {}", e)))?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(|e| {
        CliError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to initialize editor: {}", e),
        ))
    })?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    // Pick up the document persisted by an earlier session
    match ctx.session.restore(&ctx.extractor) {
        Ok(Some(document)) => println!("{}", formatter.document_loaded(&document)),
        Ok(None) => {}
        Err(e) => {
            warn!(error = %e, "Could not restore stored document");
            eprintln!("{}", formatter.warning(&e.to_string()));
        }
    }

    loop {
        let prompt = match ctx.session.current() {
            Some(document) => format!("scholarlens [{}]> ", document.name),
            None => "scholarlens (no document)> ".to_string(),
        };

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(ReplCommand::Command(cmd)) => {
                        if let Err(e) = execute_repl_command(cmd, ctx, formatter).await {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug)]
enum ReplCommand {
    Exit,
    Help,
    Command(Command),
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    let Some((&name, args)) = parts.split_first() else {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    };

    match name {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "dimensions" | "dims" => Ok(ReplCommand::Command(Command::Dimensions)),
        "clear" => Ok(ReplCommand::Command(Command::Clear)),
        "load" => parse_load_command(line, args),
        "classify" => parse_classify_command(args),
        "ask" => parse_ask_command(args),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            name
        ))),
    }
}

/// Execute a REPL command.
async fn execute_repl_command<L, S>(cmd: Command, ctx: &Context<L, S>, formatter: &Formatter) -> Result<()>
where
    L: LlmProvider,
    S: DocumentStore,
{
    match cmd {
        Command::Dimensions => commands::execute_dimensions(ctx.engine.registry(), formatter),
        Command::Load(args) => commands::execute_load(args, ctx, formatter),
        Command::Clear => commands::execute_clear(ctx, formatter),
        Command::Classify(args) => commands::execute_classify(args, ctx, formatter).await,
        Command::Ask(args) => commands::execute_ask(args, ctx, formatter).await,
        Command::Repl => Err(CliError::InvalidInput("Already in REPL mode".to_string())),
    }
}

fn parse_load_command(line: &str, args: &[&str]) -> Result<ReplCommand> {
    if args.is_empty() {
        return Err(CliError::InvalidInput("Usage: load <file>".to_string()));
    }

    // Keep spaces inside the path
    let file = line["load".len()..].trim().trim_matches('"').to_string();
    Ok(ReplCommand::Command(Command::Load(LoadArgs { file })))
}

fn parse_classify_command(args: &[&str]) -> Result<ReplCommand> {
    let all = args.is_empty() || args == ["all"];
    let dimensions = if all {
        Vec::new()
    } else {
        args.iter()
            .flat_map(|arg| arg.split(','))
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect()
    };

    Ok(ReplCommand::Command(Command::Classify(ClassifyArgs {
        dimensions,
        all,
        file: None,
    })))
}

fn parse_ask_command(args: &[&str]) -> Result<ReplCommand> {
    if args.is_empty() {
        return Err(CliError::InvalidInput("Usage: ask <question>".to_string()));
    }

    Ok(ReplCommand::Command(Command::Ask(AskArgs {
        query: args.iter().map(|s| s.to_string()).collect(),
        file: None,
    })))
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  load <file>                    - Load a PDF or text file as the active document");
    println!("  classify [dim ...|all]         - Classify dimensions (all when none given)");
    println!("  ask <question>                 - Ask a question about the active document");
    println!("  dimensions, dims               - List dimensions");
    println!("  clear                          - Forget the active document");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
}
