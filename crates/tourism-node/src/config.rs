//! Node configuration.
//!
//! Handles loading and validation of node configuration from
//! config files and command-line arguments.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tourism_api::DEFAULT_MAX_BODY_SIZE;
use tourism_governance::VotingRules;
use tourism_storage::json_store::DEFAULT_FILE_NAME;

/// Node configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Node name
    pub name: String,
    /// Data directory
    pub data_dir: PathBuf,
    /// HTTP API configuration
    pub api: ApiConfig,
    /// Storage configuration
    pub storage: StorageConfig,
    /// Quorum and voting rules
    pub governance: VotingRules,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            name: "tourism-node".to_string(),
            data_dir: PathBuf::from("./data"),
            api: ApiConfig::default(),
            storage: StorageConfig::default(),
            governance: VotingRules::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn reject_traversal(path: &Path) -> anyhow::Result<()> {
    if path.to_string_lossy().contains("..") {
        anyhow::bail!("Invalid path '{}': directory traversal detected", path.display());
    }
    Ok(())
}

impl NodeConfig {
    /// Load configuration from file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        reject_traversal(path)?;

        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        let config: NodeConfig = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
        Ok(config)
    }

    /// Save configuration to file.
    pub fn to_file(&self, path: &Path) -> anyhow::Result<()> {
        reject_traversal(path)?;

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .map_err(|e| anyhow::anyhow!("Failed to write config file '{}': {}", path.display(), e))?;
        Ok(())
    }

    /// Path of the JSON dataset file.
    pub fn dataset_path(&self) -> PathBuf {
        self.data_dir.join(&self.storage.file_name)
    }

    /// Validate configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        reject_traversal(&self.data_dir)?;
        if let Some(log_file) = &self.logging.log_file {
            reject_traversal(log_file)?;
        }

        let file_name = &self.storage.file_name;
        if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name == ".." {
            anyhow::bail!("Storage file name must be a plain file name, got '{}'", file_name);
        }

        if self.api.max_body_size == 0 {
            anyhow::bail!("API max_body_size cannot be 0");
        }

        if self.governance.eligible_voters == 0 {
            anyhow::bail!("Governance eligible_voters cannot be 0");
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            anyhow::bail!(
                "Unknown log format '{}', expected one of {:?}",
                self.logging.format,
                LOG_FORMATS
            );
        }

        Ok(())
    }
}

/// HTTP API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Listen address
    pub http_addr: SocketAddr,
    /// Maximum request body size (bytes)
    pub max_body_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            http_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

/// Where the governance dataset lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON document under the data directory
    Json,
    /// Process memory, lost on exit
    Memory,
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Dataset file name inside `data_dir`
    pub file_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Json,
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

/// Supported log output formats.
pub const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive
    pub level: String,
    /// Log format (json|pretty)
    pub format: String,
    /// Also write JSON logs to this file
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            log_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = NodeConfig::default();
        assert_eq!(config.name, "tourism-node");
        assert_eq!(config.storage.backend, StorageBackend::Json);
        assert_eq!(config.governance.eligible_voters, 100);
        assert_eq!(config.dataset_path(), PathBuf::from("./data/governance.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = NodeConfig::default();
        config.governance.eligible_voters = 0;
        assert!(config.validate().is_err());

        let mut config = NodeConfig::default();
        config.api.max_body_size = 0;
        assert!(config.validate().is_err());

        let mut config = NodeConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());

        let mut config = NodeConfig::default();
        config.data_dir = PathBuf::from("../../etc");
        assert!(config.validate().is_err());

        let mut config = NodeConfig::default();
        config.storage.file_name = "nested/governance.json".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
name = "ranchi-node"

[storage]
backend = "memory"

[governance]
quorum_gates_approval = true
"#
        )
        .unwrap();

        let config = NodeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.name, "ranchi-node");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.file_name, DEFAULT_FILE_NAME);
        assert!(config.governance.quorum_gates_approval);
        assert_eq!(config.governance.eligible_voters, 100);
        assert_eq!(config.api.max_body_size, DEFAULT_MAX_BODY_SIZE);
    }

    #[test]
    fn test_to_file_and_back() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("node.toml");

        let mut config = NodeConfig::default();
        config.api.http_addr = "0.0.0.0:9100".parse().unwrap();
        config.logging.format = "json".to_string();
        config.to_file(&path).unwrap();

        let loaded = NodeConfig::from_file(&path).unwrap();
        assert_eq!(loaded.api.http_addr, config.api.http_addr);
        assert_eq!(loaded.logging.format, "json");
    }

    #[test]
    fn test_from_file_rejects_traversal() {
        let err = NodeConfig::from_file(Path::new("../secrets/node.toml")).unwrap_err();
        assert!(err.to_string().contains("directory traversal"));
    }

    #[test]
    fn test_bad_toml_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name = ").unwrap();

        let err = NodeConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
