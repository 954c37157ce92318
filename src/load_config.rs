use crate::config::PackConfig;
use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::{error, info};

/// Loads a YAML pack config file. Keys left out take their defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PackConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!("Failed to read config file {:?}: {}", path_ref, e));
        }
    };

    // An empty file deserializes to YAML null, which serde treats as missing.
    if config_content.trim().is_empty() {
        info!(config_path = ?path_ref, "Config file empty, using defaults");
        return Ok(PackConfig::default());
    }

    let config: PackConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    if config.ignore_file.trim().is_empty() {
        error!(config_path = ?path_ref, "ignore_file must not be empty");
        anyhow::bail!("Invalid config: ignore_file must not be empty");
    }

    config.trace_loaded();
    Ok(config)
}
