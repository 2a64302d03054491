//! Draft and record files on disk.
//!
//! Drafts, templates and saved-workflow records are stored as JSON or YAML;
//! the format is chosen by file extension.

use std::path::Path;

use anyhow::{Context, bail};
use serde::de::DeserializeOwned;

use docflow_core::draft::ops::WorkflowDraftExt;
use docflow_types::draft::WorkflowDraft;

/// Serialization format of a data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// Detect the format from the extension (`.json`, `.yaml`, `.yml`).
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "yaml" | "yml" => Some(FileFormat::Yaml),
            _ => None,
        }
    }

    pub fn parse<T: DeserializeOwned>(self, content: &str) -> anyhow::Result<T> {
        match self {
            FileFormat::Json => Ok(serde_json::from_str(content)?),
            FileFormat::Yaml => Ok(serde_yaml_ng::from_str(content)?),
        }
    }
}

/// Read and deserialize a JSON or YAML file.
pub async fn read_data_file<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let Some(format) = FileFormat::from_path(path) else {
        bail!("Unsupported file type: {} (expected .json, .yaml or .yml)", path.display());
    };
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    format
        .parse(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load a draft file, normalizing action and reviewer order.
pub async fn load_draft(path: &Path) -> anyhow::Result<WorkflowDraft> {
    let mut draft: WorkflowDraft = read_data_file(path).await?;
    draft.reindex();
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a.json")), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_path(Path::new("a.YML")), Some(FileFormat::Yaml));
        assert_eq!(FileFormat::from_path(Path::new("a.yaml")), Some(FileFormat::Yaml));
        assert_eq!(FileFormat::from_path(Path::new("a.toml")), None);
        assert_eq!(FileFormat::from_path(Path::new("README")), None);
    }

    #[tokio::test]
    async fn test_load_yaml_draft_reindexes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("draft.yaml");
        tokio::fs::write(
            &path,
            r#"
name: Forms
trigger:
  category: forms
  type: form_submitted
  config:
    form_id: f1
actions:
  - id: 01890000-0000-7000-8000-000000000001
    type: archive
    config:
      folder: archive
    order: 7
"#,
        )
        .await
        .unwrap();

        let draft = load_draft(&path).await.unwrap();
        assert_eq!(draft.name, "Forms");
        assert_eq!(draft.actions.len(), 1);
        assert_eq!(draft.actions[0].order, 0);
    }

    #[tokio::test]
    async fn test_unsupported_extension_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("draft.txt");
        tokio::fs::write(&path, "{}").await.unwrap();
        let err = load_draft(&path).await.unwrap_err();
        assert!(err.to_string().contains("Unsupported file type"));
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_draft(&tmp.path().join("nope.json")).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
