//! Get command - prints a single value.

use cfgtree::Tree;

use crate::cli::GetArgs;
use crate::output::OutputFormat;

/// Run the get command
pub fn run(
    tree: &Tree,
    args: &GetArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let value = tree
        .get(&args.key)
        .ok_or_else(|| format!("Key '{}' not found", args.key))?;

    match format {
        OutputFormat::Human => println!("{value}"),
        OutputFormat::Json => println!("{}", serde_json::to_string(&value)?),
    }

    Ok(())
}
