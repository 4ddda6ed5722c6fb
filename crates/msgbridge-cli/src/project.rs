//! Resolving configuration file and command-line overrides

use anyhow::{Context, Result};
use msgbridge_codegen::{GeneratorConfig, ProjectConfig, ServiceArtifacts, generate_service};
use msgbridge_schema::{ServiceSchema, read_srv_file};
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG: &str = "msgbridge.toml";

/// Everything needed to generate a set of services
#[derive(Debug, Clone)]
pub struct Project {
    pub package: String,
    pub subfolder: Option<String>,
    pub generator: GeneratorConfig,
    pub services: Vec<PathBuf>,
}

impl Project {
    /// Load `config`, or `./msgbridge.toml` when `config` is `None` and the
    /// file exists, then apply overrides.
    pub fn resolve(
        config: Option<&Path>,
        package: Option<String>,
        extra_services: &[PathBuf],
    ) -> Result<Self> {
        let config_path = match config {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG);
                default.is_file().then_some(default)
            }
        };

        let mut project = match config_path {
            Some(path) => Self::from_config_file(&path)?,
            None => Self {
                package: String::new(),
                subfolder: None,
                generator: GeneratorConfig::default(),
                services: Vec::new(),
            },
        };

        if let Some(package) = package {
            project.package = package;
        }
        project.services.extend(extra_services.iter().cloned());

        if project.package.is_empty() {
            anyhow::bail!("No package name: pass --package or set [package] name in {DEFAULT_CONFIG}");
        }
        if project.services.is_empty() {
            anyhow::bail!("No services to generate: pass --srv or list services in {DEFAULT_CONFIG}");
        }

        Ok(project)
    }

    /// Load and validate a configuration file; service paths become
    /// relative to the working directory.
    pub fn from_config_file(path: &Path) -> Result<Self> {
        let config = ProjectConfig::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        let base_dir = path.parent().unwrap_or(Path::new("."));
        config
            .validate(base_dir)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        Ok(Self {
            services: config.service_paths(base_dir),
            package: config.package.name,
            subfolder: config.package.subfolder,
            generator: config.generator,
        })
    }

    /// Read one service definition, applying the configured subfolder.
    pub fn load_service(&self, path: &Path) -> Result<ServiceSchema> {
        let schema = read_srv_file(&self.package, path)
            .with_context(|| format!("Failed to read service {}", path.display()))?;
        match &self.subfolder {
            Some(subfolder) => schema
                .with_subfolder(subfolder)
                .with_context(|| format!("Invalid subfolder `{subfolder}`")),
            None => Ok(schema),
        }
    }

    /// Generate every service, stopping at the first failure.
    pub fn generate_all(&self) -> Result<Vec<ServiceArtifacts>> {
        self.services
            .iter()
            .map(|path| {
                let schema = self.load_service(path)?;
                generate_service(&schema, &self.generator)
                    .with_context(|| format!("Failed to generate bindings for {}", path.display()))
            })
            .collect()
    }
}
