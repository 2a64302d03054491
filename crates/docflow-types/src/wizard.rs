//! Wizard step identifiers and modes.

use serde::{Deserialize, Serialize};

/// Which step catalog a wizard session uses. Chosen once at start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardMode {
    Simple,
    #[default]
    Advanced,
}

impl WizardMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardMode::Simple => "simple",
            WizardMode::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for WizardMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WizardMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(WizardMode::Simple),
            "advanced" => Ok(WizardMode::Advanced),
            _ => Err(format!("unknown wizard mode: '{s}'")),
        }
    }
}

/// Identifier of a wizard step. The union of both catalogs' steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepId {
    Basics,
    TriggerSelection,
    TriggerConfig,
    ActionSelection,
    ActionConfig,
    Review,
    Actions,
    Reviewers,
    Preview,
}

impl StepId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::Basics => "basics",
            StepId::TriggerSelection => "trigger-selection",
            StepId::TriggerConfig => "trigger-config",
            StepId::ActionSelection => "action-selection",
            StepId::ActionConfig => "action-config",
            StepId::Review => "review",
            StepId::Actions => "actions",
            StepId::Reviewers => "reviewers",
            StepId::Preview => "preview",
        }
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for StepId {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "basics" => Ok(StepId::Basics),
            "trigger-selection" => Ok(StepId::TriggerSelection),
            "trigger-config" => Ok(StepId::TriggerConfig),
            "action-selection" => Ok(StepId::ActionSelection),
            "action-config" => Ok(StepId::ActionConfig),
            "review" => Ok(StepId::Review),
            "actions" => Ok(StepId::Actions),
            "reviewers" => Ok(StepId::Reviewers),
            "preview" => Ok(StepId::Preview),
            _ => Err(format!("unknown wizard step: '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_id_kebab_case_serde() {
        let json = serde_json::to_string(&StepId::TriggerConfig).unwrap();
        assert_eq!(json, "\"trigger-config\"");
        let parsed: StepId = serde_json::from_str("\"action-selection\"").unwrap();
        assert_eq!(parsed, StepId::ActionSelection);
    }

    #[test]
    fn test_step_id_try_from_matches_as_str() {
        for step in [
            StepId::Basics,
            StepId::TriggerSelection,
            StepId::TriggerConfig,
            StepId::ActionSelection,
            StepId::ActionConfig,
            StepId::Review,
            StepId::Actions,
            StepId::Reviewers,
            StepId::Preview,
        ] {
            assert_eq!(StepId::try_from(step.as_str()).unwrap(), step);
        }
        assert!(StepId::try_from("nope").is_err());
    }

    #[test]
    fn test_wizard_mode_default_is_advanced() {
        assert_eq!(WizardMode::default(), WizardMode::Advanced);
        assert_eq!("simple".parse::<WizardMode>().unwrap(), WizardMode::Simple);
    }
}
