//! Live-preview projections of a draft.
//!
//! Pure functions: a natural-language sentence, a structured "technical"
//! expression, and the one-line per-step summaries shown in step headers.

use docflow_types::action::{Action, ActionSpec};
use docflow_types::draft::WorkflowDraft;
use docflow_types::trigger::TriggerSpec;
use docflow_types::wizard::StepId;

use super::validator::action_is_touched;

/// Returned when there is nothing meaningful to preview yet.
pub const PREVIEW_PLACEHOLDER: &str =
    "Select a trigger and at least one action to preview this workflow.";

fn previewable(draft: &WorkflowDraft) -> Option<&TriggerSpec> {
    if draft.actions.is_empty() {
        return None;
    }
    draft.trigger.spec.as_ref()
}

/// "When X occurs, then Y, Z."
pub fn natural_summary(draft: &WorkflowDraft) -> String {
    let Some(trigger) = previewable(draft) else {
        return PREVIEW_PLACEHOLDER.to_string();
    };
    let actions: Vec<String> = draft.actions.iter().map(action_phrase).collect();
    format!("When {}, then {}.", trigger_phrase(trigger), actions.join(", "))
}

/// `WHEN [type][key="v"] THEN [type][key="v"] AND [type]...`
pub fn technical_summary(draft: &WorkflowDraft) -> String {
    let Some(trigger) = previewable(draft) else {
        return PREVIEW_PLACEHOLDER.to_string();
    };
    let actions: Vec<String> = draft
        .actions
        .iter()
        .map(|a| bracketed(a.kind().as_str(), &a.spec.config_pairs()))
        .collect();
    format!(
        "WHEN {} THEN {}",
        bracketed(trigger.kind().as_str(), &trigger.config_pairs()),
        actions.join(" AND ")
    )
}

/// Short header line for a step, derived from the draft.
pub fn step_summary(draft: &WorkflowDraft, step: StepId) -> String {
    match step {
        StepId::Basics => {
            let name = draft.name.trim();
            if name.is_empty() {
                "Untitled workflow".to_string()
            } else {
                name.to_string()
            }
        }
        StepId::TriggerSelection => match draft.trigger.kind() {
            Some(kind) => kind.to_string(),
            None => "No trigger selected".to_string(),
        },
        StepId::TriggerConfig => match &draft.trigger.spec {
            Some(spec) => plural(spec.config_pairs().len(), "setting") + " configured",
            None => "No trigger selected".to_string(),
        },
        StepId::ActionSelection => plural(draft.actions.len(), "action") + " selected",
        StepId::ActionConfig => {
            let touched = draft.actions.iter().filter(|a| action_is_touched(a)).count();
            format!("{touched} of {} configured", plural(draft.actions.len(), "action"))
        }
        StepId::Actions => {
            let routed = draft.actions.iter().filter(|a| a.kind().is_routed()).count();
            format!("{}, {routed} routed to folders", plural(draft.actions.len(), "action"))
        }
        StepId::Reviewers => {
            if draft.reviewers.is_empty() {
                "No reviewers".to_string()
            } else {
                plural(draft.reviewers.len(), "reviewer")
            }
        }
        StepId::Review | StepId::Preview => natural_summary(draft),
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn bracketed(kind: &str, pairs: &[(&'static str, String)]) -> String {
    let mut out = format!("[{kind}]");
    for (key, value) in pairs {
        out.push_str(&format!("[{key}=\"{}\"]", escape_value(value)));
    }
    out
}

/// Backslash-escape `\` and `"` so values stay inside their quotes.
fn escape_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() { fallback } else { value }
}

fn trigger_phrase(spec: &TriggerSpec) -> String {
    match spec {
        TriggerSpec::DocumentUpload(c) => {
            format!("a {} document is uploaded", or_default(&c.document_type, "new"))
        }
        TriggerSpec::WatchFolderUpload(c) => {
            format!("a file arrives in {}", or_default(&c.folder, "the watched folder"))
        }
        TriggerSpec::FormSubmitted(c) => {
            if c.form_id.trim().is_empty() {
                "a form is submitted".to_string()
            } else {
                format!("form {} is submitted", c.form_id)
            }
        }
        TriggerSpec::ScheduledTime(c) => match c.frequency {
            Some(freq) => format!(
                "the {} schedule runs at {}",
                freq.as_str(),
                or_default(&c.time, "the set time")
            ),
            None => "the schedule runs".to_string(),
        },
        TriggerSpec::SelectExisting(c) => format!(
            "documents matching \"{}\" are selected",
            or_default(&c.search_criteria, "the search")
        ),
        TriggerSpec::UploadNew(c) => format!(
            "a new document is uploaded to {}",
            or_default(&c.folder, "a folder")
        ),
    }
}

fn action_phrase(action: &Action) -> String {
    let to_folder = |verb: &str, folder: &str| {
        if folder.trim().is_empty() {
            verb.to_string()
        } else {
            format!("{verb} to {folder}")
        }
    };
    match &action.spec {
        ActionSpec::SendEmail(c) if !c.recipients.is_empty() => {
            format!("send an email to {}", c.recipients.join(", "))
        }
        ActionSpec::SendEmail(_) => "send an email".to_string(),
        ActionSpec::MoveToFolder(c) => to_folder("move it", &c.folder),
        ActionSpec::CopyToFolder(c) => to_folder("copy it", &c.folder),
        ActionSpec::AddTags(c) if !c.tags.is_empty() => format!("tag it {}", c.tags.join(", ")),
        ActionSpec::AddTags(_) => "tag it".to_string(),
        ActionSpec::Notify(c) if !c.recipients.is_empty() => {
            format!("notify {}", c.recipients.join(", "))
        }
        ActionSpec::Notify(_) => "send a notification".to_string(),
        ActionSpec::Review(c) => to_folder("send it for review", &c.folder),
        ActionSpec::Approve(c) => to_folder("request approval", &c.folder),
        ActionSpec::Sign(c) => to_folder("collect signatures", &c.folder),
        ActionSpec::Archive(c) => to_folder("archive it", &c.folder),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::ops::WorkflowDraftExt;
    use docflow_types::action::{ActionKind, FolderConfig, SendEmailConfig};
    use docflow_types::draft::{Reviewer, ReviewerKind};
    use docflow_types::trigger::{FormSubmittedConfig, SelectExistingConfig, TriggerKind};

    fn form_draft() -> WorkflowDraft {
        let mut draft = WorkflowDraft::new();
        draft.name = "Forms".to_string();
        draft.set_trigger_spec(TriggerSpec::FormSubmitted(FormSubmittedConfig {
            form_id: "f1".to_string(),
            ..Default::default()
        }));
        draft.add_action(ActionSpec::SendEmail(SendEmailConfig {
            recipients: vec!["ops@example.com".to_string()],
            subject: "New".to_string(),
            message: String::new(),
        }));
        draft.add_action(ActionSpec::Archive(FolderConfig {
            folder: "archive".to_string(),
        }));
        draft
    }

    #[test]
    fn test_placeholder_for_empty_draft() {
        let draft = WorkflowDraft::new();
        assert_eq!(natural_summary(&draft), PREVIEW_PLACEHOLDER);
        assert_eq!(technical_summary(&draft), PREVIEW_PLACEHOLDER);
    }

    #[test]
    fn test_placeholder_when_trigger_but_no_actions() {
        let mut draft = WorkflowDraft::new();
        draft.set_trigger_type(TriggerKind::UploadNew);
        assert_eq!(natural_summary(&draft), PREVIEW_PLACEHOLDER);
        assert_eq!(technical_summary(&draft), PREVIEW_PLACEHOLDER);
    }

    #[test]
    fn test_placeholder_when_actions_but_no_trigger() {
        let mut draft = WorkflowDraft::new();
        draft.add_action(ActionSpec::empty(ActionKind::Archive));
        assert_eq!(natural_summary(&draft), PREVIEW_PLACEHOLDER);
    }

    #[test]
    fn test_natural_summary_sentence() {
        assert_eq!(
            natural_summary(&form_draft()),
            "When form f1 is submitted, then send an email to ops@example.com, archive it to archive."
        );
    }

    #[test]
    fn test_technical_summary_expression() {
        assert_eq!(
            technical_summary(&form_draft()),
            "WHEN [form_submitted][form_id=\"f1\"] THEN [send_email][recipients=\"ops@example.com\"][subject=\"New\"] AND [archive][folder=\"archive\"]"
        );
    }

    #[test]
    fn test_technical_summary_with_unconfigured_parts() {
        let mut draft = WorkflowDraft::new();
        draft.set_trigger_type(TriggerKind::UploadNew);
        draft.add_action(ActionSpec::empty(ActionKind::Review));
        assert_eq!(technical_summary(&draft), "WHEN [upload_new] THEN [review]");
        assert_eq!(
            natural_summary(&draft),
            "When a new document is uploaded to a folder, then send it for review."
        );
    }

    #[test]
    fn test_technical_summary_escapes_quoted_values() {
        let mut draft = WorkflowDraft::new();
        draft.set_trigger_spec(TriggerSpec::SelectExisting(SelectExistingConfig {
            search_criteria: r#"title="Q3" \ [draft]"#.to_string(),
        }));
        draft.add_action(ActionSpec::Archive(FolderConfig {
            folder: "a".to_string(),
        }));
        assert_eq!(
            technical_summary(&draft),
            r#"WHEN [select_existing][search_criteria="title=\"Q3\" \\ [draft]"] THEN [archive][folder="a"]"#
        );
    }

    #[test]
    fn test_step_summaries() {
        let mut draft = form_draft();
        assert_eq!(step_summary(&draft, StepId::Basics), "Forms");
        assert_eq!(step_summary(&draft, StepId::TriggerSelection), "form_submitted");
        assert_eq!(step_summary(&draft, StepId::TriggerConfig), "1 setting configured");
        assert_eq!(step_summary(&draft, StepId::ActionSelection), "2 actions selected");
        assert_eq!(step_summary(&draft, StepId::ActionConfig), "2 of 2 actions configured");
        assert_eq!(step_summary(&draft, StepId::Actions), "2 actions, 1 routed to folders");
        assert_eq!(step_summary(&draft, StepId::Reviewers), "No reviewers");

        draft
            .add_reviewer(Reviewer::new("Ada", "ada@example.com", ReviewerKind::Internal), None)
            .unwrap();
        assert_eq!(step_summary(&draft, StepId::Reviewers), "1 reviewer");
        assert_eq!(step_summary(&draft, StepId::Review), natural_summary(&draft));

        assert_eq!(step_summary(&WorkflowDraft::new(), StepId::Basics), "Untitled workflow");
    }
}
