//! Workflow templates: built-in catalog, YAML parsing, and seeding drafts.
//!
//! Selecting a template deep-copies its draft into a new session. The copy
//! gets fresh action and reviewer ids, no persisted id and a new creation
//! timestamp, so two drafts seeded from the same template never share
//! identity.

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use docflow_types::action::{ActionKind, ActionSpec, FolderConfig, NotifyConfig, SendEmailConfig};
use docflow_types::draft::{Reviewer, ReviewerKind, WorkflowDraft, WorkflowTemplate};
use docflow_types::trigger::{
    DocumentUploadConfig, FormSubmittedConfig, TriggerSpec, WatchFolderUploadConfig,
};

use super::ops::WorkflowDraftExt;

/// Errors that can occur while loading templates.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// YAML parse failure.
    #[error("parse error: {0}")]
    ParseError(String),

    /// Filesystem I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// No template with the requested key.
    #[error("template '{0}' not found")]
    NotFound(String),
}

/// Parse a YAML document into a `WorkflowTemplate`.
pub fn parse_template_yaml(yaml: &str) -> Result<WorkflowTemplate, TemplateError> {
    let mut template: WorkflowTemplate =
        serde_yaml_ng::from_str(yaml).map_err(|e| TemplateError::ParseError(e.to_string()))?;
    template.draft.reindex();
    Ok(template)
}

/// Serialize a template to YAML.
pub fn serialize_template_yaml(template: &WorkflowTemplate) -> Result<String, TemplateError> {
    serde_yaml_ng::to_string(template).map_err(|e| TemplateError::ParseError(e.to_string()))
}

/// Deep-copy a template's draft into a fresh draft.
pub fn draft_from_template(template: &WorkflowTemplate) -> WorkflowDraft {
    let mut draft = template.draft.clone();
    draft.id = None;
    draft.is_complete = false;
    draft.current_step = 0;
    draft.created_at = Utc::now();
    for action in &mut draft.actions {
        action.id = Uuid::now_v7();
    }
    for reviewer in &mut draft.reviewers {
        reviewer.id = Uuid::now_v7();
    }
    draft.reindex();
    draft
}

/// Find a template by key.
pub fn find_template<'a>(
    templates: &'a [WorkflowTemplate],
    key: &str,
) -> Result<&'a WorkflowTemplate, TemplateError> {
    templates
        .iter()
        .find(|t| t.key == key)
        .ok_or_else(|| TemplateError::NotFound(key.to_string()))
}

/// The templates shipped with the builder.
pub fn builtin_templates() -> Vec<WorkflowTemplate> {
    vec![invoice_intake(), contract_signature(), form_routing()]
}

fn invoice_intake() -> WorkflowTemplate {
    let mut draft = WorkflowDraft::new();
    draft.name = "Invoice intake".to_string();
    draft.description = Some("Index uploaded invoices and route them for review".to_string());
    draft.set_trigger_spec(TriggerSpec::DocumentUpload(DocumentUploadConfig {
        document_type: "invoice".to_string(),
        index_fields: vec!["vendor".to_string(), "amount".to_string()],
    }));
    draft.add_action(ActionSpec::Review(FolderConfig {
        folder: "invoices/review".to_string(),
    }));
    draft.add_action(ActionSpec::Archive(FolderConfig {
        folder: "invoices/archive".to_string(),
    }));

    WorkflowTemplate {
        key: "invoice-intake".to_string(),
        title: "Invoice intake".to_string(),
        description: "Review then archive every uploaded invoice.".to_string(),
        draft,
    }
}

fn contract_signature() -> WorkflowTemplate {
    let mut draft = WorkflowDraft::new();
    draft.name = "Contract signature".to_string();
    draft.set_trigger_spec(TriggerSpec::WatchFolderUpload(WatchFolderUploadConfig {
        folder: "contracts/incoming".to_string(),
        watch_folder_id: String::new(),
        include_subfolders: false,
    }));
    draft.add_action(ActionSpec::Sign(FolderConfig {
        folder: "contracts/signed".to_string(),
    }));
    draft.add_action(ActionSpec::Notify(NotifyConfig {
        recipients: vec!["legal@example.com".to_string()],
        message: "A contract was signed.".to_string(),
    }));
    let mut signer = Reviewer::new("Legal team", "legal@example.com", ReviewerKind::Group);
    signer.require_signature = true;
    draft.reviewers.push(signer);
    draft.reindex();

    WorkflowTemplate {
        key: "contract-signature".to_string(),
        title: "Contract signature".to_string(),
        description: "Collect signatures on contracts dropped into a watched folder.".to_string(),
        draft,
    }
}

fn form_routing() -> WorkflowTemplate {
    let mut draft = WorkflowDraft::new();
    draft.name = "Form submission routing".to_string();
    draft.set_trigger_spec(TriggerSpec::FormSubmitted(FormSubmittedConfig::default()));
    draft.add_action(ActionSpec::SendEmail(SendEmailConfig {
        recipients: Vec::new(),
        subject: "New form submission".to_string(),
        message: String::new(),
    }));
    draft.add_action(ActionSpec::empty(ActionKind::MoveToFolder));

    WorkflowTemplate {
        key: "form-routing".to_string(),
        title: "Form submission routing".to_string(),
        description: "Email a team and file each submission.".to_string(),
        draft,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docflow_types::trigger::TriggerKind;

    #[test]
    fn test_builtin_templates_have_unique_keys() {
        let templates = builtin_templates();
        let mut keys: Vec<&str> = templates.iter().map(|t| t.key.as_str()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), templates.len());
    }

    #[test]
    fn test_draft_from_template_is_deep_copy_with_fresh_ids() {
        let templates = builtin_templates();
        let template = find_template(&templates, "invoice-intake").unwrap();

        let a = draft_from_template(template);
        let b = draft_from_template(template);

        assert_eq!(a.name, "Invoice intake");
        assert!(a.id.is_none());
        assert_eq!(a.actions.len(), 2);
        assert_ne!(a.actions[0].id, template.draft.actions[0].id);
        assert_ne!(a.actions[0].id, b.actions[0].id);
        assert_eq!(a.actions[0].spec, template.draft.actions[0].spec);
        assert_eq!(a.trigger.kind(), Some(TriggerKind::DocumentUpload));
    }

    #[test]
    fn test_find_template_not_found() {
        let err = find_template(&builtin_templates(), "missing").unwrap_err();
        assert!(err.to_string().contains("missing"), "got: {err}");
    }

    #[test]
    fn test_parse_template_yaml() {
        let yaml = r#"
key: watch-and-archive
title: Watch and archive
draft:
  name: Archive scans
  trigger:
    category: folders
    type: watch_folder_upload
    config:
      folder: scans
      watch_folder_id: wf-42
  actions:
    - id: "01938e90-0000-7000-8000-000000000001"
      type: archive
      config:
        folder: scans/archive
      order: 5
"#;
        let template = parse_template_yaml(yaml).expect("should parse");
        assert_eq!(template.key, "watch-and-archive");
        assert!(template.description.is_empty());
        assert_eq!(template.draft.actions[0].order, 0);
        assert_eq!(template.draft.trigger.kind(), Some(TriggerKind::WatchFolderUpload));

        let yaml2 = serialize_template_yaml(&template).expect("should serialize");
        let again = parse_template_yaml(&yaml2).expect("should re-parse");
        assert_eq!(again.draft.name, "Archive scans");
    }

    #[test]
    fn test_parse_template_yaml_rejects_garbage() {
        let err = parse_template_yaml("key: [unterminated").unwrap_err();
        assert!(matches!(err, TemplateError::ParseError(_)));
    }
}
