//! Clear command implementation.

use super::Context;
use crate::error::Result;
use crate::output::Formatter;
use scholarlens_domain::traits::{DocumentStore, LlmProvider};

/// Execute the clear command.
pub fn execute_clear<L, S>(ctx: &Context<L, S>, formatter: &Formatter) -> Result<()>
where
    L: LlmProvider,
    S: DocumentStore,
{
    ctx.session.clear()?;
    println!("{}", formatter.success("Document cleared"));
    Ok(())
}
