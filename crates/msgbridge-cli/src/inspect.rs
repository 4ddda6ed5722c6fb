//! `msgbridge inspect`

use anyhow::{Context, Result};
use msgbridge_schema::read_srv_file;
use std::path::Path;

pub fn run(srv: &Path, package: &str) -> Result<()> {
    let schema = read_srv_file(package, srv)
        .with_context(|| format!("Failed to read service {}", srv.display()))?;
    let json = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
    println!("{json}");
    Ok(())
}
