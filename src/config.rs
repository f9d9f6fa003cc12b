//! @ai:module:intent Configuration for an apidrift run
//! @ai:module:layer infrastructure
//! @ai:module:public_api Config, DocsConfig, CodeConfig
//! @ai:module:stateless true

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// @ai:intent Main configuration, usually read from `apidrift.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Canonical identities excluded from the report
    #[serde(default)]
    pub allowlist: Vec<String>,
    #[serde(default)]
    pub docs: DocsConfig,
    #[serde(default)]
    pub code: CodeConfig,
}

/// @ai:intent Where documentation sources live and which files count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocsConfig {
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
    /// In order of preference when one document exists under several extensions
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Document names starting with any of these are skipped
    #[serde(default = "default_exclude_prefixes")]
    pub exclude_prefixes: Vec<String>,
}

/// @ai:intent Where the code manifest lives and which modules to check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeConfig {
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,
    /// Library name -> root modules scanned for that library
    #[serde(default)]
    pub modules: BTreeMap<String, Vec<String>>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            extensions: default_extensions(),
            exclude_prefixes: default_exclude_prefixes(),
        }
    }
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            modules: BTreeMap::new(),
        }
    }
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("doc/source")
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "rst".to_string(), "ipynb".to_string()]
}

fn default_exclude_prefixes() -> Vec<String> {
    vec!["_templates".to_string(), "_build".to_string()]
}

fn default_manifest() -> PathBuf {
    PathBuf::from("api-manifest.json")
}

impl Config {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Reject configurations that cannot discover any document
    /// @ai:effects pure
    pub fn validate(&self) -> Result<()> {
        if self.docs.extensions.is_empty() {
            return Err(Error::InvalidConfig(
                "docs.extensions must list at least one extension".to_string(),
            ));
        }

        if let Some(ext) = self.docs.extensions.iter().find(|e| e.is_empty() || e.starts_with('.')) {
            return Err(Error::InvalidConfig(format!(
                "docs.extensions entries must be bare extensions, got `{ext}`"
            )));
        }

        Ok(())
    }
}

impl CodeConfig {
    /// @ai:intent All root modules across libraries, deduplicated and sorted
    /// @ai:effects pure
    pub fn root_modules(&self) -> Vec<String> {
        let mut modules: Vec<String> = self.modules.values().flatten().cloned().collect();
        modules.sort();
        modules.dedup();
        modules
    }
}
