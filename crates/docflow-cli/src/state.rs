//! Resolved data directory and configuration shared by all commands.

use std::path::{Path, PathBuf};

use docflow_infra::config::{load_builder_config, templates_dir, workflows_dir};
use docflow_types::config::BuilderConfig;

pub struct AppState {
    pub data_dir: PathBuf,
    pub config: BuilderConfig,
}

impl AppState {
    pub async fn init(data_dir: PathBuf) -> Self {
        let config = load_builder_config(&data_dir).await;
        tracing::debug!(data_dir = %data_dir.display(), "loaded builder config");
        Self { data_dir, config }
    }

    pub fn templates_dir(&self) -> PathBuf {
        templates_dir(&self.config, &self.data_dir)
    }

    /// Workflows directory, with an explicit override taking precedence.
    pub fn workflows_dir(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| workflows_dir(&self.config, &self.data_dir))
    }
}
