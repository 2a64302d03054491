//! Wizard controller: the authoring state machine.
//!
//! `WizardController` owns one draft, the session's step catalog, the
//! existing workflows used for conflict checks, and the step pointer. States
//! are the catalog's step ids in linear order. Forward navigation is gated
//! by the current step's validator; backward navigation never is. Completion
//! freezes the session and hands the draft out.

use uuid::Uuid;

use docflow_types::action::{ActionKind, ActionSpec};
use docflow_types::config::BuilderConfig;
use docflow_types::draft::{
    DraftPatch, ExistingWorkflow, Reviewer, WorkflowDraft, WorkflowTemplate,
};
use docflow_types::error::WizardError;
use docflow_types::trigger::{TriggerKind, TriggerSpec};
use docflow_types::wizard::{StepId, WizardMode};

use crate::draft::ops::WorkflowDraftExt;
use crate::draft::template::draft_from_template;
use crate::sink::WorkflowSink;

use super::catalog::{StepCatalog, StepDescriptor};
use super::conflict::{detect_draft_conflict, ConflictReport};
use super::hint::{HintExpired, HintTimer};
use super::summary::{natural_summary, step_summary, technical_summary};
use super::validator::{StepStatus, StepValidator};

/// Result of `next()`.
#[derive(Debug, Clone, PartialEq)]
pub enum NavOutcome {
    /// Moved forward to this step.
    Advanced(StepId),
    /// Current step is invalid; the pointer did not move.
    Blocked(StepStatus),
    /// Last step passed and the whole draft validates; the session is frozen.
    Completed(Box<WorkflowDraft>),
}

/// Result of `prev()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    Moved(StepId),
    /// Already on the first step: the caller should leave the wizard.
    Exit,
}

/// One wizard session.
#[derive(Debug)]
pub struct WizardController {
    catalog: StepCatalog,
    draft: WorkflowDraft,
    existing: Vec<ExistingWorkflow>,
    reviewer_cap: Option<usize>,
    current: usize,
    active_action: Option<usize>,
    hint_visible: bool,
    hint: HintTimer,
    frozen: bool,
}

impl WizardController {
    /// Start a session with an empty draft.
    pub fn new(mode: WizardMode, existing: Vec<ExistingWorkflow>, config: &BuilderConfig) -> Self {
        Self::with_draft(mode, WorkflowDraft::new(), existing, config)
    }

    /// Start a session seeded from a template (deep copy).
    pub fn from_template(
        mode: WizardMode,
        template: &WorkflowTemplate,
        existing: Vec<ExistingWorkflow>,
        config: &BuilderConfig,
    ) -> Self {
        tracing::debug!(template = %template.key, %mode, "seeding draft from template");
        Self::with_draft(mode, draft_from_template(template), existing, config)
    }

    /// Start a session around an existing draft (e.g. reopening a saved workflow).
    pub fn with_draft(
        mode: WizardMode,
        mut draft: WorkflowDraft,
        existing: Vec<ExistingWorkflow>,
        config: &BuilderConfig,
    ) -> Self {
        draft.reindex();
        draft.current_step = 0;
        draft.is_complete = false;
        let mut controller = Self {
            catalog: StepCatalog::for_mode(mode),
            draft,
            existing,
            reviewer_cap: config.reviewer_cap(mode),
            current: 0,
            active_action: None,
            hint_visible: true,
            hint: HintTimer::new(config.hint_hide_delay()),
            frozen: false,
        };
        controller.refresh_hint();
        controller
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    pub fn draft(&self) -> &WorkflowDraft {
        &self.draft
    }

    pub fn catalog(&self) -> StepCatalog {
        self.catalog
    }

    pub fn mode(&self) -> WizardMode {
        self.catalog.mode()
    }

    pub fn existing_workflows(&self) -> &[ExistingWorkflow] {
        &self.existing
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> &'static StepDescriptor {
        // `current` is kept within the catalog by every navigation method.
        &self.catalog.steps()[self.current]
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn validator(&self) -> StepValidator<'_> {
        StepValidator::new(self.catalog, &self.existing)
    }

    pub fn step_status(&self, step: StepId) -> StepStatus {
        self.validator().status(&self.draft, step)
    }

    pub fn current_status(&self) -> StepStatus {
        self.step_status(self.current_step().id)
    }

    pub fn is_draft_complete(&self) -> bool {
        self.validator().is_complete(&self.draft)
    }

    pub fn conflict(&self) -> ConflictReport {
        detect_draft_conflict(&self.draft, &self.existing)
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    /// Hint text for the current step, while the hint is shown.
    pub fn hint_message(&self) -> Option<String> {
        if !self.hint_visible {
            return None;
        }
        self.current_status().message()
    }

    pub fn summary(&self) -> String {
        natural_summary(&self.draft)
    }

    pub fn technical_summary(&self) -> String {
        technical_summary(&self.draft)
    }

    pub fn step_summaries(&self) -> Vec<(StepId, String)> {
        self.catalog
            .ids()
            .map(|step| (step, step_summary(&self.draft, step)))
            .collect()
    }

    /// Index of the action whose config panel is open, if any.
    pub fn active_action(&self) -> Option<usize> {
        self.active_action
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Jump to a step without validation. Returns `false` (and does nothing)
    /// if the step is not part of this session's catalog.
    pub fn go_to_step(&mut self, step: StepId) -> bool {
        let Some(index) = self.catalog.index_of(step) else {
            tracing::debug!(%step, mode = %self.mode(), "step not in catalog");
            return false;
        };
        self.set_current(index);
        true
    }

    /// Advance one step if the current step validates.
    pub fn next(&mut self) -> NavOutcome {
        let status = self.current_status();
        if !status.is_valid() {
            tracing::debug!(step = %self.current_step().id, "forward navigation blocked");
            self.hint_visible = true;
            return NavOutcome::Blocked(status);
        }

        if self.current + 1 < self.catalog.len() {
            self.set_current(self.current + 1);
            return NavOutcome::Advanced(self.current_step().id);
        }

        if self.frozen {
            return NavOutcome::Completed(Box::new(self.draft.clone()));
        }
        match self.ready_draft() {
            Ok(()) => NavOutcome::Completed(Box::new(self.freeze())),
            Err(step) => NavOutcome::Blocked(self.step_status(step)),
        }
    }

    /// Go back one step, or signal exit from the first step.
    pub fn prev(&mut self) -> BackOutcome {
        if self.current == 0 {
            return BackOutcome::Exit;
        }
        self.set_current(self.current - 1);
        BackOutcome::Moved(self.current_step().id)
    }

    fn set_current(&mut self, index: usize) {
        self.current = index.min(self.catalog.len() - 1);
        self.draft.current_step = self.current;
        self.hint_visible = true;
        self.hint.cancel();
        tracing::debug!(step = %self.current_step().id, index = self.current, "wizard step changed");
        self.refresh_hint();
    }

    // -----------------------------------------------------------------------
    // Hint visibility
    // -----------------------------------------------------------------------

    fn refresh_hint(&mut self) {
        let step = self.current_step().id;
        if !self.current_status().is_valid() {
            self.hint_visible = true;
            self.hint.cancel();
        } else if self.hint_visible && !self.hint.is_pending_for(step) {
            self.hint.schedule(step);
        }
    }

    /// Apply a delivered hide. Returns `true` if the hint was hidden.
    pub fn apply_hint_expiry(&mut self, expired: HintExpired) -> bool {
        if !self.hint.accept(expired) {
            return false;
        }
        if expired.step != self.current_step().id || !self.current_status().is_valid() {
            return false;
        }
        self.hint_visible = false;
        true
    }

    /// Apply any hides that have already fired. Returns `true` if the hint was hidden.
    pub fn poll_hint(&mut self) -> bool {
        let mut hidden = false;
        while let Some(expired) = self.hint.try_next() {
            hidden |= self.apply_hint_expiry(expired);
        }
        hidden
    }

    /// Wait for the pending hide (if any) and apply it.
    ///
    /// Expiries left over from cancelled schedules are discarded while waiting.
    pub async fn wait_hint(&mut self) -> bool {
        while self.hint.is_pending() {
            let Some(expired) = self.hint.next().await else {
                return false;
            };
            if self.apply_hint_expiry(expired) {
                return true;
            }
        }
        false
    }

    // -----------------------------------------------------------------------
    // Draft mutation
    // -----------------------------------------------------------------------

    fn mutate<T>(
        &mut self,
        f: impl FnOnce(&mut WorkflowDraft) -> Result<T, WizardError>,
    ) -> Result<T, WizardError> {
        if self.frozen {
            return Err(WizardError::Frozen);
        }
        let out = f(&mut self.draft)?;
        self.clamp_active_action();
        self.refresh_hint();
        Ok(out)
    }

    /// Shallow top-level merge. An empty patch leaves the draft unchanged.
    pub fn update_draft(&mut self, patch: DraftPatch) -> Result<(), WizardError> {
        if patch.is_empty() {
            return if self.frozen { Err(WizardError::Frozen) } else { Ok(()) };
        }
        self.mutate(|draft| {
            draft.apply_patch(patch);
            Ok(())
        })
    }

    pub fn set_trigger_type(&mut self, kind: TriggerKind) -> Result<(), WizardError> {
        self.mutate(|draft| {
            draft.set_trigger_type(kind);
            Ok(())
        })
    }

    pub fn set_trigger_spec(&mut self, spec: TriggerSpec) -> Result<(), WizardError> {
        self.mutate(|draft| {
            draft.set_trigger_spec(spec);
            Ok(())
        })
    }

    pub fn add_action(&mut self, spec: ActionSpec) -> Result<Uuid, WizardError> {
        self.mutate(|draft| Ok(draft.add_action(spec)))
    }

    pub fn remove_action(&mut self, id: Uuid) -> Result<(), WizardError> {
        self.mutate(|draft| {
            draft.remove_action(id)?;
            Ok(())
        })
    }

    pub fn move_action(&mut self, id: Uuid, to: usize) -> Result<(), WizardError> {
        self.mutate(|draft| Ok(draft.move_action(id, to)?))
    }

    pub fn update_action(&mut self, id: Uuid, spec: ActionSpec) -> Result<(), WizardError> {
        self.mutate(|draft| Ok(draft.update_action(id, spec)?))
    }

    pub fn set_routed_action(&mut self, kind: ActionKind, enabled: bool) -> Result<(), WizardError> {
        self.mutate(|draft| Ok(draft.set_routed_action(kind, enabled)?))
    }

    pub fn set_routed_folder(&mut self, kind: ActionKind, folder: &str) -> Result<(), WizardError> {
        self.mutate(|draft| Ok(draft.set_routed_folder(kind, folder)?))
    }

    /// Add a reviewer, enforcing the session's reviewer cap.
    pub fn add_reviewer(&mut self, reviewer: Reviewer) -> Result<Uuid, WizardError> {
        let cap = self.reviewer_cap;
        self.mutate(|draft| Ok(draft.add_reviewer(reviewer, cap)?))
    }

    pub fn remove_reviewer(&mut self, id: Uuid) -> Result<(), WizardError> {
        self.mutate(|draft| {
            draft.remove_reviewer(id)?;
            Ok(())
        })
    }

    pub fn move_reviewer(&mut self, id: Uuid, to: usize) -> Result<(), WizardError> {
        self.mutate(|draft| Ok(draft.move_reviewer(id, to)?))
    }

    pub fn update_reviewer(&mut self, id: Uuid, reviewer: Reviewer) -> Result<(), WizardError> {
        self.mutate(|draft| Ok(draft.update_reviewer(id, reviewer)?))
    }

    /// Open the config panel for the action at `index` (clamped to the last action).
    pub fn select_action(&mut self, index: usize) -> Option<usize> {
        self.active_action = match self.draft.actions.len() {
            0 => None,
            len => Some(index.min(len - 1)),
        };
        self.active_action
    }

    fn clamp_active_action(&mut self) {
        if let Some(index) = self.active_action {
            self.select_action(index);
        }
    }

    // -----------------------------------------------------------------------
    // Termination
    // -----------------------------------------------------------------------

    /// First step that does not validate, if any.
    fn ready_draft(&self) -> Result<(), StepId> {
        match self.validator().first_invalid(&self.draft) {
            Some((step, status)) => {
                tracing::warn!(%step, ?status, "completion blocked");
                Err(step)
            }
            None => Ok(()),
        }
    }

    fn freeze(&mut self) -> WorkflowDraft {
        self.frozen = true;
        self.hint.cancel();
        self.draft.is_complete = true;
        tracing::info!(
            name = %self.draft.name,
            actions = self.draft.actions.len(),
            reviewers = self.draft.reviewers.len(),
            "workflow draft completed"
        );
        self.draft.clone()
    }

    /// Complete the session if every step validates. Freezes the controller
    /// and returns the finished draft.
    pub fn complete(&mut self) -> Result<WorkflowDraft, WizardError> {
        if self.frozen {
            return Err(WizardError::Frozen);
        }
        self.ready_draft()
            .map_err(|step| WizardError::Incomplete { step })?;
        Ok(self.freeze())
    }

    /// Hand the validated draft to the save collaborator, then complete the
    /// session. Returns the id assigned by the sink.
    ///
    /// The session is only frozen once the sink accepts the draft; after a
    /// sink error it stays editable and `finish` can be retried.
    pub async fn finish<S: WorkflowSink>(&mut self, sink: &S) -> Result<Uuid, WizardError> {
        if self.frozen {
            return Err(WizardError::Frozen);
        }
        self.ready_draft()
            .map_err(|step| WizardError::Incomplete { step })?;

        let mut draft = self.draft.clone();
        draft.is_complete = true;
        let id = match sink.save(draft).await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, "workflow save failed, session left open");
                return Err(e.into());
            }
        };

        self.draft.id = Some(id);
        self.freeze();
        tracing::info!(workflow_id = %id, "workflow handed off");
        Ok(id)
    }

    /// Discard the session. Nothing has been persisted, so nothing is rolled back.
    pub fn cancel(mut self) -> BackOutcome {
        self.hint.cancel();
        tracing::debug!(name = %self.draft.name, "wizard cancelled, draft discarded");
        BackOutcome::Exit
    }
}
