use crate::error::{PipelineError, Result};
use serde::Deserialize;
use std::fs; // For reading the file
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Represents the overall application configuration read from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the four classifier artifacts.
    pub model_dir: PathBuf,
    /// Optional vocabulary file; the bundled tables are used when absent.
    #[serde(default)]
    pub vocabulary: Option<PathBuf>,
    #[serde(default)]
    pub execution: ExecutionMode,
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

/// How a batch is spread over threads. Both modes produce identical output.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    #[default]
    Parallel,
    Sequential,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PersistenceConfig {
    pub database: Option<PathBuf>,
    pub spreadsheet: Option<PathBuf>,
    pub json_output: Option<PathBuf>,
}

impl PersistenceConfig {
    pub fn is_empty(&self) -> bool {
        self.database.is_none() && self.spreadsheet.is_none() && self.json_output.is_none()
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.model_dir.as_os_str().is_empty() {
            return Err(PipelineError::ConfigValidationError(
                "PipelineConfig: model_dir must not be empty".to_string(),
            ));
        }
        if let Some(path) = &self.vocabulary {
            if path.as_os_str().is_empty() {
                return Err(PipelineError::ConfigValidationError(
                    "PipelineConfig: vocabulary path must not be empty when set".to_string(),
                ));
            }
        }
        let sinks = [
            ("database", &self.persistence.database),
            ("spreadsheet", &self.persistence.spreadsheet),
            ("json_output", &self.persistence.json_output),
        ];
        for (field, path) in sinks {
            if matches!(path, Some(p) if p.as_os_str().is_empty()) {
                return Err(PipelineError::ConfigValidationError(format!(
                    "PersistenceConfig: {} path must not be empty when set",
                    field
                )));
            }
        }
        Ok(())
    }
}

/// Loads, parses and validates the application configuration YAML file.
#[instrument(skip_all, fields(path = %config_path.as_ref().display()))]
pub fn load_pipeline_config<P: AsRef<Path>>(config_path: P) -> Result<PipelineConfig> {
    let path_ref = config_path.as_ref();
    let config_content = fs::read_to_string(path_ref).map_err(|e| {
        PipelineError::ConfigError(format!(
            "Failed to read pipeline config file '{}': {}",
            path_ref.display(),
            e
        ))
    })?;

    let config: PipelineConfig = serde_yaml::from_str(&config_content).map_err(|e| {
        PipelineError::ConfigError(format!(
            "Failed to parse pipeline config YAML from '{}': {}",
            path_ref.display(),
            e
        ))
    })?;

    config.validate()?;
    debug!(config = ?config, "Loaded pipeline configuration");

    Ok(config)
}
