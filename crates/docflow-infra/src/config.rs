//! Builder configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.docflow/` by default)
//! into [`BuilderConfig`]. Falls back to defaults when the file is missing
//! or malformed.

use std::path::{Path, PathBuf};

use docflow_types::config::BuilderConfig;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "DOCFLOW_DATA_DIR";

/// Resolve the data directory: explicit path, then `~/.docflow`.
///
/// Falls back to `./.docflow` when no home directory is known.
pub fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".docflow")
}

/// Load builder configuration from `{data_dir}/config.toml`.
///
/// Relative `templates_dir` / `workflows_dir` entries are resolved against
/// the data directory.
pub async fn load_builder_config(data_dir: &Path) -> BuilderConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return BuilderConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return BuilderConfig::default();
        }
    };

    match toml::from_str::<BuilderConfig>(&content) {
        Ok(mut config) => {
            config.templates_dir = config.templates_dir.map(|d| data_dir.join(d));
            config.workflows_dir = config.workflows_dir.map(|d| data_dir.join(d));
            config
        }
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            BuilderConfig::default()
        }
    }
}

/// Directory holding user templates (`{data_dir}/templates` unless configured).
pub fn templates_dir(config: &BuilderConfig, data_dir: &Path) -> PathBuf {
    config
        .templates_dir
        .clone()
        .unwrap_or_else(|| data_dir.join("templates"))
}

/// Directory holding saved workflows (`{data_dir}/workflows` unless configured).
pub fn workflows_dir(config: &BuilderConfig, data_dir: &Path) -> PathBuf {
    config
        .workflows_dir
        .clone()
        .unwrap_or_else(|| data_dir.join("workflows"))
}
