//! Digest and rand commands - thin wrappers over the library helpers.

use cfgtree::util;

use crate::cli::{DigestArgs, RandArgs};
use crate::output::OutputFormat;

/// Run the digest command
pub fn digest(args: &DigestArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let digest = util::md5_hex(&args.text);
    match format {
        OutputFormat::Human => println!("{digest}"),
        OutputFormat::Json => {
            let value = serde_json::json!({ "text": args.text, "md5": digest });
            println!("{}", serde_json::to_string(&value)?);
        }
    }
    Ok(())
}

/// Run the rand command
pub fn rand(args: &RandArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let random = util::rand_string(args.len)?;
    match format {
        OutputFormat::Human => println!("{random}"),
        OutputFormat::Json => println!("{}", serde_json::to_string(&random)?),
    }
    Ok(())
}
