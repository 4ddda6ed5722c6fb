//! `msgbridge generate`

use crate::project::Project;
use crate::verify;
use anyhow::{Context, Result};
use msgbridge_codegen::{ServiceArtifacts, write_artifacts};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments of the generate command
pub struct GenerateArgs {
    pub config: Option<PathBuf>,
    pub output: PathBuf,
    pub srv: Vec<PathBuf>,
    pub package: Option<String>,
    pub verify_c: bool,
    pub include: Vec<PathBuf>,
}

/// manifest.json structure
#[derive(Debug, Serialize)]
struct Manifest<'a> {
    package: &'a str,
    services: &'a [ServiceArtifacts],
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let project = Project::resolve(args.config.as_deref(), args.package, &args.srv)?;

    println!(
        "Generating bindings for {} service(s) in package {}",
        project.services.len(),
        project.package
    );

    let artifacts = project.generate_all()?;
    let written = write_artifacts(&args.output, &artifacts)
        .with_context(|| format!("Failed to write output to {}", args.output.display()))?;
    let manifest_path = write_manifest(&args.output, &project.package, &artifacts)?;

    for artifact in &artifacts {
        println!(
            "✓ {} ({} symbols, link target {})",
            artifact.service,
            artifact.symbols.len(),
            artifact.link_target
        );
    }
    println!("✓ Wrote {} files to {}", written.len() + 1, args.output.display());
    tracing::debug!(manifest = %manifest_path.display(), "wrote manifest");

    if args.verify_c {
        let c_units: Vec<PathBuf> = written
            .iter()
            .filter(|path| path.extension().is_some_and(|ext| ext == "c"))
            .cloned()
            .collect();
        verify::verify_c_units(&c_units, &args.include)?;
    }

    Ok(())
}

fn write_manifest(output: &Path, package: &str, artifacts: &[ServiceArtifacts]) -> Result<PathBuf> {
    let manifest = Manifest {
        package,
        services: artifacts,
    };
    let json = serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
    let path = output.join("manifest.json");
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
