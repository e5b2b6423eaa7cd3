//! Subcommand implementations.

pub mod get;
pub mod helpers;
pub mod tree;

use cfgtree::{Tree, Value, codec::Format};

use crate::cli::LoadArgs;

/// Builds the configuration tree described by `args`.
///
/// Files are merged at the root in the order given, then `--set` overrides are
/// applied on top.
pub fn load_config(args: &LoadArgs) -> cfgtree::Result<Tree> {
    let tree = Tree::new();
    for file in &args.files {
        match Format::from_path(file) {
            Format::Json => tree.load_json_file("", file, args.replace)?,
            Format::Yaml => tree.load_yaml_file("", file, args.replace)?,
        }
        tracing::info!(file = %file.display(), replace = args.replace, "Loaded configuration file");
    }
    for (key, raw) in &args.overrides {
        tree.set(key, parse_override(raw));
    }
    Ok(tree)
}

/// Reads an override as JSON when possible so `--set port=80` stores an integer.
fn parse_override(raw: &str) -> Value {
    serde_json::from_str::<serde_json::Value>(raw)
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(raw))
}
