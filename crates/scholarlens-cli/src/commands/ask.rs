//! Ask command implementation.

use super::Context;
use crate::cli::AskArgs;
use crate::error::Result;
use crate::output::Formatter;
use scholarlens_domain::traits::{DocumentStore, LlmProvider};

/// Execute the ask command.
pub async fn execute_ask<L, S>(args: AskArgs, ctx: &Context<L, S>, formatter: &Formatter) -> Result<()>
where
    L: LlmProvider,
    S: DocumentStore,
{
    ctx.document(args.file.as_deref())?;
    let result = ctx.session.answer(&ctx.engine, &args.query_text()).await?;
    println!("{}", formatter.format_answer(&result)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{context, paper};
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use scholarlens_flows::FlowError;
    use scholarlens_llm::MockProvider;
    use tempfile::TempDir;

    fn args(query: &str, file: Option<String>) -> AskArgs {
        AskArgs {
            query: query.split_whitespace().map(str::to_string).collect(),
            file,
        }
    }

    #[tokio::test]
    async fn test_ask_sends_query_with_corpus() {
        let dir = TempDir::new().unwrap();
        let path = paper(&dir).to_string_lossy().into_owned();
        let llm = MockProvider::new(
            r#"{"answer": "Writing anxiety decreased.", "answerable": true, "sources": [{"page": 3, "text": "Writing anxiety decreased significantly."}]}"#,
        );
        let ctx = context(llm.clone());
        let formatter = Formatter::new(OutputFormat::Json, false);

        execute_ask(args("What happened to anxiety?", Some(path)), &ctx, &formatter)
            .await
            .unwrap();

        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.contains("User query: What happened to anxiety?"));
        assert!(prompt.contains("Page 3: Writing anxiety"));
    }

    #[tokio::test]
    async fn test_short_query_never_reaches_the_model() {
        let dir = TempDir::new().unwrap();
        let path = paper(&dir).to_string_lossy().into_owned();
        let llm = MockProvider::default();
        let ctx = context(llm.clone());
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let result = execute_ask(args("Why", Some(path)), &ctx, &formatter).await;

        assert!(matches!(
            result,
            Err(CliError::Flow(FlowError::QueryTooShort { .. }))
        ));
        assert_eq!(llm.call_count(), 0);
    }
}
