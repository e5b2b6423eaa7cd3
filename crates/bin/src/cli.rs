//! CLI argument definitions for the cfgtree binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Inspect layered JSON and YAML configuration
#[derive(Parser, Debug)]
#[command(name = "cfgtree")]
#[command(about = "cfgtree: merge configuration files into one tree and query it")]
#[command(version)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human", env = "CFGTREE_FORMAT")]
    pub format: OutputFormat,

    /// Log filter used when the loaded configuration has no `log.file`
    #[arg(long, global = true, default_value = "warn", env = "CFGTREE_LOG")]
    pub log: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the value stored at a key
    Get(GetArgs),
    /// Print every leaf below a key
    Tree(TreeArgs),
    /// Print the MD5 hex digest of a string
    Digest(DigestArgs),
    /// Print a random alphanumeric string
    Rand(RandArgs),
}

/// Where the configuration comes from
#[derive(clap::Args, Debug)]
pub struct LoadArgs {
    /// Configuration file to load; repeat to layer files in order.
    /// `.yaml`/`.yml` files are read as YAML, anything else as JSON.
    #[arg(short = 'f', long = "file")]
    pub files: Vec<PathBuf>,

    /// Later files overwrite values set by earlier ones instead of only filling gaps
    #[arg(long)]
    pub replace: bool,

    /// Override a value after all files are loaded, e.g. `--set server.port=9090`.
    /// The right-hand side is read as JSON when it parses, otherwise as a string.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub overrides: Vec<(String, String)>,
}

/// Arguments for the get command
#[derive(clap::Args, Debug)]
pub struct GetArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Dot-separated key, case-insensitive
    pub key: String,
}

/// Arguments for the tree command
#[derive(clap::Args, Debug)]
pub struct TreeArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Dot-separated key of the subtree to print; the whole tree when omitted
    #[arg(default_value = "")]
    pub key: String,
}

/// Arguments for the digest command
#[derive(clap::Args, Debug)]
pub struct DigestArgs {
    /// Text to hash
    pub text: String,
}

/// Arguments for the rand command
#[derive(clap::Args, Debug)]
pub struct RandArgs {
    /// Length of the generated string
    #[arg(default_value_t = 16)]
    pub len: usize,
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}
