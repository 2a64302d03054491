use thiserror::Error;

use crate::action::ActionKind;
use crate::wizard::StepId;

/// Errors from structural draft mutations.
///
/// Validation failures are not errors; they surface as step status.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("action '{0}' not found")]
    ActionNotFound(uuid::Uuid),

    #[error("reviewer '{0}' not found")]
    ReviewerNotFound(uuid::Uuid),

    #[error("reviewer chain is limited to {max} reviewers")]
    ReviewerLimitReached { max: usize },

    #[error("action type '{0}' has no destination folder")]
    NotRoutable(ActionKind),
}

/// Errors from the wizard controller.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("draft is incomplete: step '{step}' does not validate")]
    Incomplete { step: StepId },

    #[error("wizard session is already completed")]
    Frozen,

    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error("save failed: {0}")]
    Sink(#[from] SinkError),
}

/// Errors reported by the external save collaborator.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("workflow rejected: {0}")]
    Rejected(String),

    #[error("save target unavailable")]
    Unavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_error_display() {
        let err = DraftError::ReviewerLimitReached { max: 4 };
        assert_eq!(err.to_string(), "reviewer chain is limited to 4 reviewers");
    }

    #[test]
    fn test_wizard_error_display() {
        let err = WizardError::Incomplete {
            step: StepId::TriggerConfig,
        };
        assert!(err.to_string().contains("trigger-config"));
    }

    #[test]
    fn test_wizard_error_from_sink() {
        let err: WizardError = SinkError::Rejected("duplicate name".to_string()).into();
        assert_eq!(err.to_string(), "save failed: workflow rejected: duplicate name");
    }
}
