//! Generator configuration and the `msgbridge.toml` project file

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Runtime crate path used by generated code unless configured otherwise
pub const DEFAULT_RUNTIME_CRATE: &str = "msgbridge_runtime";

/// Error type for configuration loading and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// How generated extern blocks name their native library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkMode {
    /// `#[link(name = "<link target>")]` on every extern block
    #[default]
    Dylib,
    /// No link attribute; symbols resolve from whatever the final binary links
    Ambient,
}

/// What to do with members whose kind has no mapping (arrays, nested messages)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmappedPolicy {
    /// Abort generation of the service with a mapping error
    #[default]
    Reject,
    /// Leave the member out of the Rust bindings and emit a C reader stub
    Stub,
}

/// Options controlling emitted code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub link: LinkMode,

    /// Overrides `<package>__msgbridge_c`
    pub link_name: Option<String>,

    /// Crate name generated code uses to reach the runtime
    pub runtime_crate: String,

    pub unmapped: UnmappedPolicy,

    /// Parse generated Rust and check it against the generated C
    pub validate_output: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            link: LinkMode::Dylib,
            link_name: None,
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
            unmapped: UnmappedPolicy::Reject,
            validate_output: true,
        }
    }
}

impl GeneratorConfig {
    /// The native library name for `package`.
    pub fn link_target(&self, package: &str) -> String {
        match &self.link_name {
            Some(name) => name.clone(),
            None => crate::naming::default_link_target(package),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_identifier(&self.runtime_crate) {
            return Err(ConfigError::Invalid(format!(
                "runtime_crate `{}` is not a crate identifier",
                self.runtime_crate
            )));
        }
        if let Some(name) = &self.link_name {
            let valid = !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
            if !valid {
                return Err(ConfigError::Invalid(format!(
                    "link_name `{name}` is not a library name"
                )));
            }
        }
        Ok(())
    }
}

/// msgbridge.toml structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub package: PackageSection,

    #[serde(default)]
    pub generator: GeneratorConfig,

    /// `.srv` files, relative to the configuration file
    #[serde(default)]
    pub services: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSection {
    pub name: String,

    #[serde(default)]
    pub subfolder: Option<String>,
}

impl ProjectConfig {
    /// Load configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Service file paths resolved against `base_dir`.
    pub fn service_paths(&self, base_dir: &Path) -> Vec<PathBuf> {
        self.services.iter().map(|path| base_dir.join(path)).collect()
    }

    /// Validate names and check that service files exist under `base_dir`.
    pub fn validate(&self, base_dir: &Path) -> Result<(), ConfigError> {
        if self.package.name.is_empty() {
            return Err(ConfigError::Invalid("package name cannot be empty".to_string()));
        }
        msgbridge_schema::validate_package_name(&self.package.name)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if let Some(subfolder) = &self.package.subfolder {
            msgbridge_schema::validate_package_name(subfolder)
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }

        self.generator.validate()?;

        for path in self.service_paths(base_dir) {
            if !path.is_file() {
                return Err(ConfigError::Invalid(format!(
                    "service file not found: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
