//! Generates bindings for the sample services in `srv/`.

use anyhow::{Context, Result};
use msgbridge_codegen::{GeneratorConfig, LinkMode, generate_service, write_artifacts};
use msgbridge_schema::read_srv_file;
use std::env;
use std::path::PathBuf;

const PACKAGE: &str = "fixtures";
const SERVICES: &[&str] = &["Add", "Greet", "Primitives", "Label"];

fn main() -> Result<()> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    println!("cargo:rerun-if-changed=srv");

    // Symbols come from the native double compiled into this crate.
    let config = GeneratorConfig {
        link: LinkMode::Ambient,
        ..Default::default()
    };

    let mut artifacts = Vec::with_capacity(SERVICES.len());
    for service in SERVICES {
        let path = manifest_dir.join("srv").join(format!("{service}.srv"));
        println!("cargo:rerun-if-changed={}", path.display());

        let schema = read_srv_file(PACKAGE, &path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let generated = generate_service(&schema, &config)
            .with_context(|| format!("Failed to generate bindings for {service}"))?;
        artifacts.push(generated);
    }

    write_artifacts(&out_dir, &artifacts).context("Failed to write generated bindings")?;
    Ok(())
}
