//! Draft mutation logic.
//!
//! `WorkflowDraft` lives in `docflow-types`; this module provides an
//! extension trait (`WorkflowDraftExt`) with the mutations the wizard
//! performs. Every list mutation re-indexes `order` so that
//! `actions[i].order == i` and `reviewers[i].order == i` always hold.

use docflow_types::action::{Action, ActionKind, ActionSpec};
use docflow_types::draft::{DraftPatch, Reviewer, WorkflowDraft};
use docflow_types::error::DraftError;
use docflow_types::trigger::{TriggerKind, TriggerSpec};
use uuid::Uuid;

/// Extension trait for `WorkflowDraft` mutations.
pub trait WorkflowDraftExt {
    /// Shallow-merge a partial update. An empty patch changes nothing.
    fn apply_patch(&mut self, patch: DraftPatch);

    /// Select a trigger type. A different type resets the config to the new
    /// type's empty config; re-selecting the current type keeps it.
    fn set_trigger_type(&mut self, kind: TriggerKind);

    /// Clear the trigger type and config.
    fn clear_trigger(&mut self);

    /// Replace the trigger spec (type and config) wholesale.
    fn set_trigger_spec(&mut self, spec: TriggerSpec);

    /// Append an action and return its id.
    fn add_action(&mut self, spec: ActionSpec) -> Uuid;

    /// Insert an action at `index` (clamped to the list length).
    fn insert_action(&mut self, index: usize, spec: ActionSpec) -> Uuid;

    /// Remove an action by id, returning it.
    fn remove_action(&mut self, id: Uuid) -> Result<Action, DraftError>;

    /// Move an action to `to` (clamped to the last index).
    fn move_action(&mut self, id: Uuid, to: usize) -> Result<(), DraftError>;

    /// Replace an action's spec (type and config).
    fn update_action(&mut self, id: Uuid, spec: ActionSpec) -> Result<(), DraftError>;

    /// Toggle a routed action (simple flow). Enabling adds it with an empty
    /// folder if missing; disabling removes every action of that kind.
    fn set_routed_action(&mut self, kind: ActionKind, enabled: bool) -> Result<(), DraftError>;

    /// Set the paired destination folder of a routed action, enabling it if needed.
    fn set_routed_folder(&mut self, kind: ActionKind, folder: &str) -> Result<(), DraftError>;

    /// Whether the draft has an action of the given kind.
    fn has_action(&self, kind: ActionKind) -> bool;

    /// Append a reviewer. `cap` bounds the chain length when set.
    fn add_reviewer(&mut self, reviewer: Reviewer, cap: Option<usize>) -> Result<Uuid, DraftError>;

    /// Remove a reviewer by id, returning it.
    fn remove_reviewer(&mut self, id: Uuid) -> Result<Reviewer, DraftError>;

    /// Move a reviewer to `to` (clamped to the last index).
    fn move_reviewer(&mut self, id: Uuid, to: usize) -> Result<(), DraftError>;

    /// Replace a reviewer's fields, keeping its id and position.
    fn update_reviewer(&mut self, id: Uuid, reviewer: Reviewer) -> Result<(), DraftError>;

    /// Rewrite `order` on actions and reviewers to match their indices.
    fn reindex(&mut self);
}

impl WorkflowDraftExt for WorkflowDraft {
    fn apply_patch(&mut self, patch: DraftPatch) {
        let DraftPatch {
            name,
            description,
            trigger,
            actions,
            reviewers,
            user_access,
            notifications,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(trigger) = trigger {
            self.trigger = trigger;
        }
        if let Some(actions) = actions {
            self.actions = actions;
        }
        if let Some(reviewers) = reviewers {
            self.reviewers = reviewers;
        }
        if let Some(user_access) = user_access {
            self.user_access = user_access;
        }
        if let Some(notifications) = notifications {
            self.notifications = notifications;
        }
        self.reindex();
    }

    fn set_trigger_type(&mut self, kind: TriggerKind) {
        if self.trigger.kind() == Some(kind) {
            return;
        }
        tracing::debug!(trigger_type = %kind, "trigger type changed, config reset");
        self.trigger.spec = Some(TriggerSpec::empty(kind));
        self.trigger.category = kind.category().to_string();
    }

    fn clear_trigger(&mut self) {
        self.trigger.spec = None;
        self.trigger.category.clear();
    }

    fn set_trigger_spec(&mut self, spec: TriggerSpec) {
        self.trigger.category = spec.kind().category().to_string();
        self.trigger.spec = Some(spec);
    }

    fn add_action(&mut self, spec: ActionSpec) -> Uuid {
        let index = self.actions.len();
        self.insert_action(index, spec)
    }

    fn insert_action(&mut self, index: usize, spec: ActionSpec) -> Uuid {
        let action = Action::new(spec);
        let id = action.id;
        let index = index.min(self.actions.len());
        self.actions.insert(index, action);
        self.reindex();
        id
    }

    fn remove_action(&mut self, id: Uuid) -> Result<Action, DraftError> {
        let index = action_index(self, id)?;
        let removed = self.actions.remove(index);
        self.reindex();
        Ok(removed)
    }

    fn move_action(&mut self, id: Uuid, to: usize) -> Result<(), DraftError> {
        let from = action_index(self, id)?;
        let action = self.actions.remove(from);
        let to = to.min(self.actions.len());
        self.actions.insert(to, action);
        self.reindex();
        Ok(())
    }

    fn update_action(&mut self, id: Uuid, spec: ActionSpec) -> Result<(), DraftError> {
        let index = action_index(self, id)?;
        self.actions[index].spec = spec;
        Ok(())
    }

    fn set_routed_action(&mut self, kind: ActionKind, enabled: bool) -> Result<(), DraftError> {
        if !kind.is_routed() {
            return Err(DraftError::NotRoutable(kind));
        }
        if enabled {
            if !self.has_action(kind) {
                self.add_action(ActionSpec::empty(kind));
            }
        } else {
            self.actions.retain(|action| action.kind() != kind);
            self.reindex();
        }
        Ok(())
    }

    fn set_routed_folder(&mut self, kind: ActionKind, folder: &str) -> Result<(), DraftError> {
        self.set_routed_action(kind, true)?;
        for action in self.actions.iter_mut().filter(|a| a.kind() == kind) {
            if let Some(slot) = action.spec.folder_mut() {
                *slot = folder.to_string();
            }
        }
        Ok(())
    }

    fn has_action(&self, kind: ActionKind) -> bool {
        self.actions.iter().any(|action| action.kind() == kind)
    }

    fn add_reviewer(&mut self, reviewer: Reviewer, cap: Option<usize>) -> Result<Uuid, DraftError> {
        if let Some(max) = cap {
            if self.reviewers.len() >= max {
                return Err(DraftError::ReviewerLimitReached { max });
            }
        }
        let id = reviewer.id;
        self.reviewers.push(reviewer);
        self.reindex();
        Ok(id)
    }

    fn remove_reviewer(&mut self, id: Uuid) -> Result<Reviewer, DraftError> {
        let index = reviewer_index(self, id)?;
        let removed = self.reviewers.remove(index);
        self.reindex();
        Ok(removed)
    }

    fn move_reviewer(&mut self, id: Uuid, to: usize) -> Result<(), DraftError> {
        let from = reviewer_index(self, id)?;
        let reviewer = self.reviewers.remove(from);
        let to = to.min(self.reviewers.len());
        self.reviewers.insert(to, reviewer);
        self.reindex();
        Ok(())
    }

    fn update_reviewer(&mut self, id: Uuid, reviewer: Reviewer) -> Result<(), DraftError> {
        let index = reviewer_index(self, id)?;
        self.reviewers[index] = Reviewer {
            id,
            order: index as u32,
            ..reviewer
        };
        Ok(())
    }

    fn reindex(&mut self) {
        for (i, action) in self.actions.iter_mut().enumerate() {
            action.order = i as u32;
        }
        for (i, reviewer) in self.reviewers.iter_mut().enumerate() {
            reviewer.order = i as u32;
        }
    }
}

fn action_index(draft: &WorkflowDraft, id: Uuid) -> Result<usize, DraftError> {
    draft
        .actions
        .iter()
        .position(|action| action.id == id)
        .ok_or(DraftError::ActionNotFound(id))
}

fn reviewer_index(draft: &WorkflowDraft, id: Uuid) -> Result<usize, DraftError> {
    draft
        .reviewers
        .iter()
        .position(|reviewer| reviewer.id == id)
        .ok_or(DraftError::ReviewerNotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use docflow_types::action::FolderConfig;
    use docflow_types::draft::ReviewerKind;
    use docflow_types::trigger::{FormSubmittedConfig, UploadNewConfig};

    fn assert_contiguous(draft: &WorkflowDraft) {
        for (i, action) in draft.actions.iter().enumerate() {
            assert_eq!(action.order, i as u32, "action order at {i}");
        }
        for (i, reviewer) in draft.reviewers.iter().enumerate() {
            assert_eq!(reviewer.order, i as u32, "reviewer order at {i}");
        }
    }

    #[test]
    fn test_action_order_contiguous_after_insert_remove_move() {
        let mut draft = WorkflowDraft::new();
        let a = draft.add_action(ActionSpec::empty(ActionKind::SendEmail));
        let b = draft.add_action(ActionSpec::empty(ActionKind::AddTags));
        let c = draft.insert_action(0, ActionSpec::empty(ActionKind::Archive));
        assert_contiguous(&draft);
        assert_eq!(draft.actions[0].id, c);

        draft.move_action(c, 99).unwrap();
        assert_contiguous(&draft);
        assert_eq!(draft.actions[2].id, c);

        draft.remove_action(a).unwrap();
        assert_contiguous(&draft);
        assert_eq!(draft.actions[0].id, b);
        assert_eq!(draft.actions.len(), 2);
    }

    #[test]
    fn test_remove_unknown_action_errors() {
        let mut draft = WorkflowDraft::new();
        let id = Uuid::now_v7();
        assert_eq!(draft.remove_action(id), Err(DraftError::ActionNotFound(id)));
    }

    #[test]
    fn test_remove_second_reviewer_reindexes() {
        let mut draft = WorkflowDraft::new();
        let ids: Vec<Uuid> = ["Ada", "Grace", "Linus"]
            .iter()
            .map(|name| {
                draft
                    .add_reviewer(
                        Reviewer::new(*name, format!("{name}@example.com"), ReviewerKind::Internal),
                        None,
                    )
                    .unwrap()
            })
            .collect();

        draft.remove_reviewer(ids[1]).unwrap();

        assert_eq!(draft.reviewers.len(), 2);
        assert_eq!(draft.reviewers[0].order, 0);
        assert_eq!(draft.reviewers[1].order, 1);
        assert_eq!(draft.reviewers[1].name, "Linus");
    }

    #[test]
    fn test_reviewer_cap_enforced() {
        let mut draft = WorkflowDraft::new();
        for i in 0..4 {
            draft
                .add_reviewer(Reviewer::new(format!("r{i}"), "r@example.com", ReviewerKind::Internal), Some(4))
                .unwrap();
        }
        let err = draft
            .add_reviewer(Reviewer::new("r5", "r5@example.com", ReviewerKind::Internal), Some(4))
            .unwrap_err();
        assert_eq!(err, DraftError::ReviewerLimitReached { max: 4 });
        assert_eq!(draft.reviewers.len(), 4);

        // No cap: unbounded
        draft
            .add_reviewer(Reviewer::new("r5", "r5@example.com", ReviewerKind::Internal), None)
            .unwrap();
        assert_eq!(draft.reviewers.len(), 5);
    }

    #[test]
    fn test_update_reviewer_keeps_id_and_order() {
        let mut draft = WorkflowDraft::new();
        let first = draft
            .add_reviewer(Reviewer::new("Ada", "ada@example.com", ReviewerKind::Internal), None)
            .unwrap();
        let second = draft
            .add_reviewer(Reviewer::new("Grace", "grace@example.com", ReviewerKind::Internal), None)
            .unwrap();

        let mut replacement = Reviewer::new("Grace H.", "gh@example.com", ReviewerKind::External);
        replacement.phone = "+1 555 0100".to_string();
        draft.update_reviewer(second, replacement).unwrap();

        assert_eq!(draft.reviewers[0].id, first);
        assert_eq!(draft.reviewers[1].id, second);
        assert_eq!(draft.reviewers[1].order, 1);
        assert_eq!(draft.reviewers[1].name, "Grace H.");
        assert_eq!(draft.reviewers[1].kind, ReviewerKind::External);
    }

    #[test]
    fn test_set_trigger_type_resets_config_on_change() {
        let mut draft = WorkflowDraft::new();
        draft.set_trigger_spec(TriggerSpec::FormSubmitted(FormSubmittedConfig {
            form_id: "f1".to_string(),
            ..Default::default()
        }));

        // Same type keeps the config
        draft.set_trigger_type(TriggerKind::FormSubmitted);
        assert!(matches!(
            &draft.trigger.spec,
            Some(TriggerSpec::FormSubmitted(c)) if c.form_id == "f1"
        ));

        // Different type starts clean
        draft.set_trigger_type(TriggerKind::UploadNew);
        assert_eq!(
            draft.trigger.spec,
            Some(TriggerSpec::UploadNew(UploadNewConfig::default()))
        );
        assert_eq!(draft.trigger.category, "documents");

        draft.clear_trigger();
        assert!(draft.trigger.spec.is_none());
    }

    #[test]
    fn test_routed_action_toggle_and_folder() {
        let mut draft = WorkflowDraft::new();
        draft.set_routed_action(ActionKind::Review, true).unwrap();
        draft.set_routed_action(ActionKind::Review, true).unwrap();
        assert_eq!(draft.actions.len(), 1);
        assert_eq!(draft.actions[0].spec.folder(), Some(""));

        draft.set_routed_folder(ActionKind::Review, "reviewed-items").unwrap();
        assert_eq!(
            draft.actions[0].spec,
            ActionSpec::Review(FolderConfig {
                folder: "reviewed-items".to_string()
            })
        );

        draft.set_routed_folder(ActionKind::Archive, "archive").unwrap();
        assert_eq!(draft.actions.len(), 2);

        draft.set_routed_action(ActionKind::Review, false).unwrap();
        assert_eq!(draft.actions.len(), 1);
        assert_eq!(draft.actions[0].kind(), ActionKind::Archive);
        assert_contiguous(&draft);
    }

    #[test]
    fn test_routed_action_rejects_non_routed_kind() {
        let mut draft = WorkflowDraft::new();
        assert_eq!(
            draft.set_routed_action(ActionKind::SendEmail, true),
            Err(DraftError::NotRoutable(ActionKind::SendEmail))
        );
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut draft = WorkflowDraft::new();
        draft.name = "Invoices".to_string();
        draft.add_action(ActionSpec::empty(ActionKind::Notify));
        let before = draft.clone();

        draft.apply_patch(DraftPatch::default());

        assert_eq!(draft, before);
        assert_eq!(
            serde_json::to_string(&draft).unwrap(),
            serde_json::to_string(&before).unwrap()
        );
    }

    #[test]
    fn test_patch_replaces_only_given_fields() {
        let mut draft = WorkflowDraft::new();
        draft.description = Some("keep me".to_string());
        draft.set_trigger_type(TriggerKind::UploadNew);

        draft.apply_patch(DraftPatch::name("Renamed"));

        assert_eq!(draft.name, "Renamed");
        assert_eq!(draft.description.as_deref(), Some("keep me"));
        assert_eq!(draft.trigger.kind(), Some(TriggerKind::UploadNew));
    }

    #[test]
    fn test_patch_with_actions_reindexes() {
        let mut draft = WorkflowDraft::new();
        let mut actions = vec![
            Action::new(ActionSpec::empty(ActionKind::Notify)),
            Action::new(ActionSpec::empty(ActionKind::Sign)),
        ];
        actions[0].order = 7;
        actions[1].order = 7;

        draft.apply_patch(DraftPatch {
            actions: Some(actions),
            ..Default::default()
        });

        assert_contiguous(&draft);
    }
}
