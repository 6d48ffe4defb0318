//! Load command implementation.

use super::Context;
use crate::cli::LoadArgs;
use crate::error::Result;
use crate::output::Formatter;
use scholarlens_domain::traits::{DocumentStore, LlmProvider};

/// Execute the load command.
pub fn execute_load<L, S>(args: LoadArgs, ctx: &Context<L, S>, formatter: &Formatter) -> Result<()>
where
    L: LlmProvider,
    S: DocumentStore,
{
    let document = ctx.load_file(&args.file)?;
    println!("{}", formatter.document_loaded(&document));
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

    #[test]
    fn test_load_replaces_active_document() {
        let dir = TempDir::new().unwrap();
        let path = paper(&dir).to_string_lossy().into_owned();
        let ctx = context(MockProvider::default());
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        execute_load(LoadArgs { file: path.clone() }, &ctx, &formatter).unwrap();
        let first = ctx.session.current().unwrap().id;
        execute_load(LoadArgs { file: path }, &ctx, &formatter).unwrap();
        let second = ctx.session.current().unwrap().id;

        assert_ne!(first, second);
    }

    #[test]
    fn test_load_empty_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "").unwrap();
        let ctx = context(MockProvider::default());
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let result = execute_load(
            LoadArgs { file: path.to_string_lossy().into_owned() },
            &ctx,
            &formatter,
        );
        assert!(matches!(result, Err(CliError::Flow(FlowError::Extraction(_)))));
        assert!(ctx.session.current().is_none());
    }
}
