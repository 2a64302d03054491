//! Existing-workflow discovery for conflict detection.
//!
//! Each `.json` / `.yaml` / `.yml` file in the workflows directory holds
//! either one `ExistingWorkflow` record or a list of them.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use docflow_types::draft::ExistingWorkflow;

use crate::files::{FileFormat, read_data_file};

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<ExistingWorkflow>),
    One(ExistingWorkflow),
}

/// Load every existing-workflow record found in `dir`.
///
/// Order is by file name, then by position within the file. A missing
/// directory yields an empty list; unparseable files are skipped.
pub async fn discover_existing_workflows(dir: &Path) -> anyhow::Result<Vec<ExistingWorkflow>> {
    if !tokio::fs::try_exists(dir).await.unwrap_or(false) {
        tracing::debug!("No workflows directory at {}", dir.display());
        return Ok(Vec::new());
    }

    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read workflows directory: {}", dir.display()))?;

    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if FileFormat::from_path(&path).is_some() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut workflows = Vec::new();
    for path in paths {
        match read_data_file::<OneOrMany>(&path).await {
            Ok(OneOrMany::Many(list)) => workflows.extend(list),
            Ok(OneOrMany::One(workflow)) => workflows.push(workflow),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping invalid workflow file");
            }
        }
    }

    tracing::debug!(count = workflows.len(), "Loaded existing workflows");
    Ok(workflows)
}
