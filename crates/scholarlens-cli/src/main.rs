//! ScholarLens CLI - Classify research papers from the command line.

use clap::Parser;
use scholarlens_cli::commands;
use scholarlens_cli::repl;
use scholarlens_cli::{Cli, Command, Config, Context, Formatter};
use scholarlens_flows::{FlowEngine, SchemaRegistry};
use scholarlens_llm::OllamaProvider;
use scholarlens_store::SqliteDocumentStore;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> scholarlens_cli::Result<()> {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => {
            let path = Config::path()?;
            if path.exists() {
                Config::load_from(&path)?
            } else {
                let cfg = Config::default();
                cfg.save_to(&path).ok();
                cfg
            }
        }
    };

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    // Listing dimensions needs neither a model nor a store
    if let Some(Command::Dimensions) = cli.command {
        return commands::execute_dimensions(&SchemaRegistry::builtin(), &formatter);
    }

    let provider = OllamaProvider::with_timeout(
        &config.llm.endpoint,
        &config.llm.model,
        Duration::from_secs(config.llm.timeout_secs),
    )?
    .with_max_attempts(config.llm.max_attempts);

    let database = config.database_path()?;
    if let Some(parent) = database.parent() {
        std::fs::create_dir_all(parent)?;
    }
    debug!(database = %database.display(), model = %config.llm.model, "Starting");
    let store = SqliteDocumentStore::open(&database)?;

    let ctx = Context::new(FlowEngine::new(provider, config.flows.clone()), store);

    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&ctx, &config.settings, &formatter).await?;
        }
        Some(Command::Dimensions) => {
            commands::execute_dimensions(ctx.engine.registry(), &formatter)?;
        }
        Some(Command::Load(args)) => {
            commands::execute_load(args, &ctx, &formatter)?;
        }
        Some(Command::Clear) => {
            commands::execute_clear(&ctx, &formatter)?;
        }
        Some(Command::Classify(args)) => {
            commands::execute_classify(args, &ctx, &formatter).await?;
        }
        Some(Command::Ask(args)) => {
            commands::execute_ask(args, &ctx, &formatter).await?;
        }
    }

    Ok(())
}
