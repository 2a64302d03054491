//! Per-step validation gates.
//!
//! Every check is a pure function of the draft (plus the existing workflows
//! for conflict detection). A step is either valid or not; an invalid step
//! blocks forward navigation and supplies the hint text shown to the author.
//! Nothing here panics or returns an error.

use serde::{Deserialize, Serialize};

use docflow_types::action::{Action, ActionSpec};
use docflow_types::draft::{ExistingWorkflow, Reviewer, ReviewerKind, WorkflowDraft};
use docflow_types::trigger::TriggerSpec;
use docflow_types::wizard::{StepId, WizardMode};

use super::catalog::StepCatalog;
use super::conflict::detect_draft_conflict;

/// Validation state of one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    Valid,
    /// A required field is missing.
    Incomplete { hint: String },
    /// The trigger collides with an existing workflow.
    Conflict { workflow_name: String },
}

impl StepStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, StepStatus::Valid)
    }

    /// Text for the step hint; `None` when the step is valid.
    pub fn message(&self) -> Option<String> {
        match self {
            StepStatus::Valid => None,
            StepStatus::Incomplete { hint } => Some(hint.clone()),
            StepStatus::Conflict { workflow_name } => Some(format!(
                "The workflow '{workflow_name}' already uses this trigger. Choose a different one."
            )),
        }
    }

    fn incomplete(hint: impl Into<String>) -> Self {
        StepStatus::Incomplete { hint: hint.into() }
    }
}

/// Evaluates step gates for one wizard session.
#[derive(Debug, Clone, Copy)]
pub struct StepValidator<'a> {
    catalog: StepCatalog,
    existing: &'a [ExistingWorkflow],
}

impl<'a> StepValidator<'a> {
    pub fn new(catalog: StepCatalog, existing: &'a [ExistingWorkflow]) -> Self {
        Self { catalog, existing }
    }

    pub fn status(&self, draft: &WorkflowDraft, step: StepId) -> StepStatus {
        match step {
            StepId::Basics => basics_status(draft, self.catalog.mode()),
            StepId::TriggerSelection => trigger_selection_status(draft),
            StepId::TriggerConfig => self.trigger_config_status(draft),
            StepId::ActionSelection => action_selection_status(draft),
            StepId::ActionConfig => action_config_status(draft),
            StepId::Actions => routed_actions_status(draft),
            StepId::Reviewers => reviewers_status(draft),
            StepId::Review | StepId::Preview => StepStatus::Valid,
        }
    }

    pub fn is_valid(&self, draft: &WorkflowDraft, step: StepId) -> bool {
        self.status(draft, step).is_valid()
    }

    pub fn hint(&self, draft: &WorkflowDraft, step: StepId) -> Option<String> {
        self.status(draft, step).message()
    }

    /// The first step of the catalog that does not validate.
    pub fn first_invalid(&self, draft: &WorkflowDraft) -> Option<(StepId, StepStatus)> {
        self.catalog
            .ids()
            .map(|step| (step, self.status(draft, step)))
            .find(|(_, status)| !status.is_valid())
    }

    /// True iff every step of the catalog validates.
    pub fn is_complete(&self, draft: &WorkflowDraft) -> bool {
        self.first_invalid(draft).is_none()
    }

    fn trigger_config_status(&self, draft: &WorkflowDraft) -> StepStatus {
        let Some(spec) = draft.trigger.spec.as_ref() else {
            return StepStatus::incomplete("Choose a trigger first.");
        };

        let conflict = detect_draft_conflict(draft, self.existing);
        if conflict.has_conflict {
            return StepStatus::Conflict {
                workflow_name: conflict.conflicting_workflow_name.unwrap_or_default(),
            };
        }

        trigger_fields_status(spec)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn basics_status(draft: &WorkflowDraft, mode: WizardMode) -> StepStatus {
    if is_blank(&draft.name) {
        return StepStatus::incomplete("Give the workflow a name to continue.");
    }
    if mode == WizardMode::Simple && draft.trigger.spec.is_none() {
        return StepStatus::incomplete("Choose what starts this workflow.");
    }
    StepStatus::Valid
}

fn trigger_selection_status(draft: &WorkflowDraft) -> StepStatus {
    if draft.trigger.spec.is_none() {
        return StepStatus::incomplete("Choose a trigger to continue.");
    }
    StepStatus::Valid
}

fn trigger_fields_status(spec: &TriggerSpec) -> StepStatus {
    match spec {
        TriggerSpec::DocumentUpload(c) => {
            if is_blank(&c.document_type) {
                StepStatus::incomplete("Pick the document type that starts this workflow.")
            } else if !c.index_fields.iter().any(|f| !is_blank(f)) {
                StepStatus::incomplete("Add at least one index field.")
            } else {
                StepStatus::Valid
            }
        }
        TriggerSpec::WatchFolderUpload(c) => {
            if is_blank(&c.folder) {
                StepStatus::incomplete("Choose a folder to watch.")
            } else {
                StepStatus::Valid
            }
        }
        TriggerSpec::FormSubmitted(c) => {
            if is_blank(&c.form_id) {
                StepStatus::incomplete("Choose the form that starts this workflow.")
            } else {
                StepStatus::Valid
            }
        }
        TriggerSpec::ScheduledTime(c) => {
            if c.frequency.is_none() {
                StepStatus::incomplete("Pick how often this workflow runs.")
            } else if is_blank(&c.time) {
                StepStatus::incomplete("Pick the time of day this workflow runs.")
            } else {
                StepStatus::Valid
            }
        }
        TriggerSpec::SelectExisting(c) => {
            if is_blank(&c.search_criteria) {
                StepStatus::incomplete("Describe which existing documents to select.")
            } else {
                StepStatus::Valid
            }
        }
        TriggerSpec::UploadNew(c) => {
            if is_blank(&c.folder) {
                StepStatus::incomplete("Choose the folder new documents are uploaded to.")
            } else {
                StepStatus::Valid
            }
        }
    }
}

fn action_selection_status(draft: &WorkflowDraft) -> StepStatus {
    if draft.actions.is_empty() {
        return StepStatus::incomplete("Add at least one action.");
    }
    StepStatus::Valid
}

fn action_config_status(draft: &WorkflowDraft) -> StepStatus {
    match draft.actions.iter().find(|a| !action_is_touched(a)) {
        Some(action) => StepStatus::incomplete(format!(
            "Configure action {} ({}).",
            action.order + 1,
            action.kind()
        )),
        None => StepStatus::Valid,
    }
}

fn routed_actions_status(draft: &WorkflowDraft) -> StepStatus {
    if draft.actions.is_empty() {
        return StepStatus::incomplete("Turn on at least one action.");
    }
    let unrouted = draft
        .actions
        .iter()
        .filter(|a| a.kind().is_routed())
        .find(|a| a.spec.folder().is_none_or(is_blank));
    match unrouted {
        Some(action) => StepStatus::incomplete(format!(
            "Choose a destination folder for '{}'.",
            action.kind()
        )),
        None => StepStatus::Valid,
    }
}

fn reviewers_status(draft: &WorkflowDraft) -> StepStatus {
    for reviewer in &draft.reviewers {
        if is_blank(&reviewer.name) || is_blank(&reviewer.email) {
            return StepStatus::incomplete(format!(
                "Reviewer {} needs a name and an email.",
                reviewer.order + 1
            ));
        }
        if reviewer.kind == ReviewerKind::External && is_blank(&reviewer.phone) {
            return StepStatus::incomplete(format!(
                "External reviewer {} needs a phone number.",
                reviewer.order + 1
            ));
        }
    }
    StepStatus::Valid
}

/// Coarse check: at least one config field of the action is non-empty.
///
/// This is the gate for the action-config step.
pub fn action_is_touched(action: &Action) -> bool {
    !action.spec.config_pairs().is_empty()
}

/// Type-specific check: the fields this action type needs are all present.
///
/// Drives per-action "ready" badges; it is not a navigation gate and may
/// disagree with [`action_is_touched`].
pub fn action_is_configured(action: &Action) -> bool {
    match &action.spec {
        ActionSpec::SendEmail(c) => {
            c.recipients.iter().any(|r| !is_blank(r)) && !is_blank(&c.subject)
        }
        ActionSpec::AddTags(c) => c.tags.iter().any(|t| !is_blank(t)),
        ActionSpec::Notify(c) => c.recipients.iter().any(|r| !is_blank(r)),
        ActionSpec::MoveToFolder(c)
        | ActionSpec::CopyToFolder(c)
        | ActionSpec::Review(c)
        | ActionSpec::Approve(c)
        | ActionSpec::Sign(c)
        | ActionSpec::Archive(c) => !is_blank(&c.folder),
    }
}

/// A reviewer has a name and email, plus a phone when external.
pub fn reviewer_is_valid(reviewer: &Reviewer) -> bool {
    !is_blank(&reviewer.name)
        && !is_blank(&reviewer.email)
        && (reviewer.kind != ReviewerKind::External || !is_blank(&reviewer.phone))
}
