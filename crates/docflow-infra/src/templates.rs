//! Template directory discovery.
//!
//! Every `*.yaml` / `*.yml` file in the templates directory holds one
//! `WorkflowTemplate`. Files that fail to parse are skipped with a warning
//! so one broken template never hides the rest.

use std::path::Path;

use anyhow::Context;

use docflow_core::draft::template::{builtin_templates, parse_template_yaml};
use docflow_types::draft::WorkflowTemplate;

use crate::files::FileFormat;

/// Load all templates found in `dir`, sorted by key.
///
/// A missing directory yields an empty list.
pub async fn discover_templates(dir: &Path) -> anyhow::Result<Vec<WorkflowTemplate>> {
    if !tokio::fs::try_exists(dir).await.unwrap_or(false) {
        tracing::debug!("No templates directory at {}", dir.display());
        return Ok(Vec::new());
    }

    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read templates directory: {}", dir.display()))?;

    let mut templates = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if FileFormat::from_path(&path) != Some(FileFormat::Yaml) {
            continue;
        }

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable template");
                continue;
            }
        };
        match parse_template_yaml(&content) {
            Ok(template) => templates.push(template),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping invalid template");
            }
        }
    }

    templates.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(templates)
}

/// Built-in templates followed by those discovered in `dir`.
///
/// A discovered template whose key matches a built-in one replaces it.
pub async fn all_templates(dir: &Path) -> anyhow::Result<Vec<WorkflowTemplate>> {
    let discovered = discover_templates(dir).await?;
    let mut templates: Vec<WorkflowTemplate> = builtin_templates()
        .into_iter()
        .filter(|builtin| !discovered.iter().any(|t| t.key == builtin.key))
        .collect();
    templates.extend(discovered);
    Ok(templates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TEMPLATE: &str = r#"
key: scan-inbox
title: Scan inbox
description: Archive every scanned document.
draft:
  name: Scan inbox
  trigger:
    category: uploads
    type: upload_new
    config:
      folder: scans
  actions:
    - id: 01890000-0000-7000-8000-000000000001
      type: archive
      config:
        folder: scans/archive
      order: 0
"#;

    #[tokio::test]
    async fn test_missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let templates = discover_templates(&tmp.path().join("templates")).await.unwrap();
        assert!(templates.is_empty());
    }

    #[tokio::test]
    async fn test_discovers_yaml_and_skips_invalid() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("scan.yaml"), TEMPLATE).await.unwrap();
        tokio::fs::write(tmp.path().join("broken.yml"), "key: [unterminated").await.unwrap();
        tokio::fs::write(tmp.path().join("notes.txt"), "ignored").await.unwrap();

        let templates = discover_templates(tmp.path()).await.unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].key, "scan-inbox");
        assert_eq!(templates[0].draft.actions.len(), 1);
    }

    #[tokio::test]
    async fn test_all_templates_merges_with_builtins() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("scan.yaml"), TEMPLATE).await.unwrap();
        tokio::fs::write(
            tmp.path().join("invoice.yaml"),
            TEMPLATE.replace("scan-inbox", "invoice-intake"),
        )
        .await
        .unwrap();

        let templates = all_templates(tmp.path()).await.unwrap();
        let keys: Vec<&str> = templates.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["contract-signature", "form-routing", "invoice-intake", "scan-inbox"]
        );
        // The discovered copy replaced the built-in one
        let invoice = templates.iter().find(|t| t.key == "invoice-intake").unwrap();
        assert_eq!(invoice.title, "Scan inbox");
    }
}
