//! The in-progress workflow definition (`WorkflowDraft`) and its parts.
//!
//! A draft is created empty when the wizard starts (or deep-copied from a
//! template), mutated step by step, and either handed to the save
//! collaborator on completion or dropped on cancel. Actions and reviewers
//! are owned by the draft and have no lifecycle of their own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::action::Action;
use crate::trigger::{TriggerDraft, TriggerSpec};

// ---------------------------------------------------------------------------
// Reviewers
// ---------------------------------------------------------------------------

/// Who a reviewer is, relative to the organization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewerKind {
    #[default]
    Internal,
    External,
    Group,
}

impl ReviewerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewerKind::Internal => "internal",
            ReviewerKind::External => "external",
            ReviewerKind::Group => "group",
        }
    }
}

/// One link in the sequential reviewer chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviewer {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(rename = "type", default)]
    pub kind: ReviewerKind,
    #[serde(default)]
    pub require_signature: bool,
    /// Notification position; kept equal to the index by every mutation.
    #[serde(default)]
    pub order: u32,
}

impl Reviewer {
    pub fn new(name: impl Into<String>, email: impl Into<String>, kind: ReviewerKind) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            email: email.into(),
            phone: String::new(),
            kind,
            require_signature: false,
            order: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Access and notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    #[default]
    AllUsers,
    SpecificUsers,
    UserGroups,
    Department,
}

/// Who may see and run the workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccess {
    pub mode: AccessMode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub departments: Vec<String>,
}

impl UserAccess {
    /// Number of principals selected for the active mode (0 for `AllUsers`).
    pub fn selected_count(&self) -> usize {
        match self.mode {
            AccessMode::AllUsers => 0,
            AccessMode::SpecificUsers => self.users.len(),
            AccessMode::UserGroups => self.groups.len(),
            AccessMode::Department => self.departments.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationChannel {
    #[default]
    Email,
    InApp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default)]
    pub notify_on_start: bool,
    #[serde(default)]
    pub notify_on_complete: bool,
    #[serde(default)]
    pub notify_on_failure: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub channel: NotificationChannel,
}

// ---------------------------------------------------------------------------
// WorkflowDraft
// ---------------------------------------------------------------------------

/// A workflow definition under construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDraft {
    /// Assigned by the save collaborator; `None` until persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub trigger: TriggerDraft,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub reviewers: Vec<Reviewer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_access: Option<UserAccess>,
    #[serde(default)]
    pub notifications: NotificationSettings,
    /// Wizard bookkeeping: index of the step the author was last on.
    #[serde(default)]
    pub current_step: usize,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Default for WorkflowDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: None,
            trigger: TriggerDraft::default(),
            actions: Vec::new(),
            reviewers: Vec::new(),
            user_access: None,
            notifications: NotificationSettings::default(),
            current_step: 0,
            is_complete: false,
            created_at: Utc::now(),
        }
    }
}

impl WorkflowDraft {
    /// A fresh, empty draft.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Shallow top-level partial update for a draft.
///
/// `None` leaves the field untouched. Nested values (`trigger`,
/// `notifications`) are replaced whole, so callers that only want to change
/// one nested key must read-modify-write it themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `Some(None)` clears the description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<TriggerDraft>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<Action>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewers: Option<Vec<Reviewer>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_access: Option<Option<UserAccess>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<NotificationSettings>,
}

impl DraftPatch {
    pub fn is_empty(&self) -> bool {
        *self == DraftPatch::default()
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Collaborator inputs
// ---------------------------------------------------------------------------

/// A saved workflow's trigger, supplied by the host for conflict detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingWorkflow {
    pub id: Uuid,
    pub name: String,
    pub trigger: TriggerSpec,
}

/// A catalog entry that seeds a new draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowTemplate {
    /// Stable lookup key (e.g. "invoice-intake").
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub draft: WorkflowDraft,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionKind, ActionSpec};
    use crate::trigger::TriggerKind;
    use serde_json::json;

    #[test]
    fn test_empty_draft_defaults() {
        let draft = WorkflowDraft::new();
        assert!(draft.id.is_none());
        assert!(draft.name.is_empty());
        assert!(draft.trigger.spec.is_none());
        assert!(draft.actions.is_empty());
        assert!(draft.reviewers.is_empty());
        assert!(!draft.is_complete);
        assert_eq!(draft.current_step, 0);
    }

    #[test]
    fn test_draft_deserializes_minimal_json() {
        let draft: WorkflowDraft = serde_json::from_value(json!({
            "name": "Invoice intake",
            "trigger": {
                "category": "forms",
                "type": "form_submitted",
                "config": { "form_id": "f1" }
            },
            "actions": [
                { "id": "01938e90-0000-7000-8000-000000000001", "type": "archive", "config": {}, "order": 0 }
            ],
            "reviewers": [
                { "id": "01938e90-0000-7000-8000-000000000002", "name": "Ada", "email": "ada@example.com", "type": "external" }
            ]
        }))
        .unwrap();

        assert_eq!(draft.name, "Invoice intake");
        assert_eq!(draft.trigger.kind(), Some(TriggerKind::FormSubmitted));
        assert_eq!(draft.actions.len(), 1);
        assert_eq!(draft.actions[0].kind(), ActionKind::Archive);
        assert_eq!(draft.actions[0].spec, ActionSpec::empty(ActionKind::Archive));
        assert_eq!(draft.reviewers[0].kind, ReviewerKind::External);
        assert!(draft.reviewers[0].phone.is_empty());
    }

    #[test]
    fn test_empty_patch_is_empty() {
        assert!(DraftPatch::default().is_empty());
        assert!(!DraftPatch::name("x").is_empty());
    }

    #[test]
    fn test_user_access_selected_count() {
        let access = UserAccess {
            mode: AccessMode::UserGroups,
            users: vec!["u1".to_string()],
            groups: vec!["g1".to_string(), "g2".to_string()],
            departments: Vec::new(),
        };
        assert_eq!(access.selected_count(), 2);
        assert_eq!(UserAccess::default().selected_count(), 0);
    }
}
