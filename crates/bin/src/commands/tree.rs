//! Tree command - prints every leaf below a key.

use cfgtree::Tree;

use crate::cli::TreeArgs;
use crate::output::{OutputFormat, print_table};

/// Run the tree command
pub fn run(
    tree: &Tree,
    args: &TreeArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let subtree = tree
        .tree(&args.key)
        .ok_or_else(|| format!("Key '{}' not found", args.key))?;

    match format {
        OutputFormat::Human => {
            let mut rows = Vec::new();
            collect_leaves(&subtree, &mut rows);
            if rows.is_empty() {
                println!("No values found.");
                return Ok(());
            }
            print_table(&["KEY", "VALUE"], &rows);
        }
        OutputFormat::Json => {
            let value = subtree
                .to_value("")
                .map(|v| v.to_json())
                .unwrap_or(serde_json::Value::Null);
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}

/// Depth-first list of `[path, value]` rows for nodes without branches.
fn collect_leaves(tree: &Tree, rows: &mut Vec<Vec<String>>) {
    let branches = tree.branches();
    if branches.is_empty() {
        if let Some(value) = tree.get("") {
            rows.push(vec![tree.path(), value.to_string()]);
        }
        return;
    }
    for branch in branches.values() {
        collect_leaves(branch, rows);
    }
}
