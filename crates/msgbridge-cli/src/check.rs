//! `msgbridge check`

use crate::project::{DEFAULT_CONFIG, Project};
use anyhow::Result;
use std::path::PathBuf;

pub fn run(config: Option<PathBuf>) -> Result<()> {
    let path = config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    println!("Checking configuration: {}", path.display());

    let project = Project::from_config_file(&path)?;
    let artifacts = project.generate_all()?;

    println!("✓ Package: {}", project.package);
    println!("✓ Link target: {}", project.generator.link_target(&project.package));
    for artifact in &artifacts {
        println!("✓ Service: {} ({} symbols)", artifact.service, artifact.symbols.len());
    }
    println!("\nConfiguration is valid!");

    Ok(())
}
