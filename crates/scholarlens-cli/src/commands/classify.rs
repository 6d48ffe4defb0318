//! Classify command implementation.

use super::Context;
use crate::cli::ClassifyArgs;
use crate::error::Result;
use crate::output::Formatter;
use scholarlens_domain::traits::{DocumentStore, LlmProvider};
use tracing::info;

/// Execute the classify command.
///
/// With no dimensions (or `--all`) every registered dimension is classified.
/// Failed dimensions are reported next to the successful ones.
pub async fn execute_classify<L, S>(
    args: ClassifyArgs,
    ctx: &Context<L, S>,
    formatter: &Formatter,
) -> Result<()>
where
    L: LlmProvider,
    S: DocumentStore,
{
    let document = ctx.document(args.file.as_deref())?;

    let dimensions: Vec<String> = if args.all || args.dimensions.is_empty() {
        ctx.engine
            .registry()
            .iter()
            .map(|schema| schema.field.to_string())
            .collect()
    } else {
        args.dimensions
    };
    info!(document = %document.id, count = dimensions.len(), "Classifying");

    let outcomes = ctx.session.classify_many(&ctx.engine, &dimensions).await?;
    println!("{}", formatter.format_outcomes(&outcomes, ctx.engine.registry())?);

    let failed = outcomes.iter().filter(|(_, outcome)| outcome.is_err()).count();
    if failed > 0 {
        eprintln!(
            "{}",
            formatter.warning(&format!("{} of {} dimension(s) failed", failed, outcomes.len()))
        );
    }

    Ok(())
}
