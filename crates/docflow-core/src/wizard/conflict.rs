//! Trigger conflict detection.
//!
//! A single trigger source may drive at most one workflow. Two triggers
//! collide when they have the same type and the same discriminant value.
//! The result is recomputed on every call; nothing is cached, because the
//! author can change the discriminant any number of times before saving.

use serde::{Deserialize, Serialize};

use docflow_types::draft::{ExistingWorkflow, WorkflowDraft};
use docflow_types::trigger::TriggerSpec;

/// Outcome of a conflict check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub has_conflict: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicting_workflow_name: Option<String>,
}

impl ConflictReport {
    fn none() -> Self {
        Self::default()
    }

    fn with(workflow_name: &str) -> Self {
        Self {
            has_conflict: true,
            conflicting_workflow_name: Some(workflow_name.to_string()),
        }
    }
}

/// The config value that identifies a trigger source, if the type has one.
///
/// Returns `None` for types without a discriminant and for an empty
/// (not yet chosen) value.
pub fn discriminant(spec: &TriggerSpec) -> Option<&str> {
    let value = match spec {
        TriggerSpec::FormSubmitted(c) => c.form_id.as_str(),
        TriggerSpec::WatchFolderUpload(c) => c.watch_folder_id.as_str(),
        TriggerSpec::SelectExisting(c) => c.search_criteria.as_str(),
        TriggerSpec::UploadNew(c) => c.folder.as_str(),
        TriggerSpec::DocumentUpload(_) | TriggerSpec::ScheduledTime(_) => return None,
    };
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Check a candidate trigger against existing workflows' triggers.
///
/// The first colliding workflow is reported.
pub fn detect_conflict(candidate: &TriggerSpec, existing: &[ExistingWorkflow]) -> ConflictReport {
    first_collision(candidate, existing.iter())
}

/// Check a draft's trigger, ignoring the saved copy of the draft itself.
pub fn detect_draft_conflict(draft: &WorkflowDraft, existing: &[ExistingWorkflow]) -> ConflictReport {
    let Some(candidate) = draft.trigger.spec.as_ref() else {
        return ConflictReport::none();
    };
    first_collision(
        candidate,
        existing.iter().filter(|wf| Some(wf.id) != draft.id),
    )
}

fn first_collision<'a>(
    candidate: &TriggerSpec,
    mut existing: impl Iterator<Item = &'a ExistingWorkflow>,
) -> ConflictReport {
    let Some(wanted) = discriminant(candidate) else {
        return ConflictReport::none();
    };
    existing
        .find(|wf| wf.trigger.kind() == candidate.kind() && discriminant(&wf.trigger) == Some(wanted))
        .map(|wf| ConflictReport::with(&wf.name))
        .unwrap_or_else(ConflictReport::none)
}
