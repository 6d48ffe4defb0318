//! Dimensions command implementation.

use crate::error::Result;
use crate::output::Formatter;
use scholarlens_flows::SchemaRegistry;

/// Execute the dimensions command.
pub fn execute_dimensions(registry: &SchemaRegistry, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_dimensions(registry)?);
    Ok(())
}
