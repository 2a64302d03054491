//! Builder configuration types for Docflow.
//!
//! `BuilderConfig` represents the top-level `config.toml` that tunes the
//! wizard: default mode, hint timing, reviewer cap and lookup directories.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::wizard::WizardMode;

/// Top-level configuration for the workflow builder.
///
/// Loaded from `~/.docflow/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Catalog used when the caller does not pick one.
    #[serde(default)]
    pub default_mode: WizardMode,

    /// Delay before the step hint hides once the step becomes valid.
    #[serde(default = "default_hint_hide_delay_ms")]
    pub hint_hide_delay_ms: u64,

    /// Maximum reviewer chain length in the simple flow.
    #[serde(default = "default_simple_reviewer_cap")]
    pub simple_reviewer_cap: usize,

    /// Extra directory of YAML workflow templates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,

    /// Directory of saved workflows used for trigger conflict detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflows_dir: Option<PathBuf>,
}

fn default_hint_hide_delay_ms() -> u64 {
    2_000
}

fn default_simple_reviewer_cap() -> usize {
    4
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            default_mode: WizardMode::default(),
            hint_hide_delay_ms: default_hint_hide_delay_ms(),
            simple_reviewer_cap: default_simple_reviewer_cap(),
            templates_dir: None,
            workflows_dir: None,
        }
    }
}

impl BuilderConfig {
    pub fn hint_hide_delay(&self) -> Duration {
        Duration::from_millis(self.hint_hide_delay_ms)
    }

    /// Reviewer cap for a mode (`None` = unbounded).
    pub fn reviewer_cap(&self, mode: WizardMode) -> Option<usize> {
        match mode {
            WizardMode::Simple => Some(self.simple_reviewer_cap),
            WizardMode::Advanced => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_config_default_values() {
        let config = BuilderConfig::default();
        assert_eq!(config.default_mode, WizardMode::Advanced);
        assert_eq!(config.hint_hide_delay(), Duration::from_secs(2));
        assert_eq!(config.simple_reviewer_cap, 4);
        assert!(config.templates_dir.is_none());
    }

    #[test]
    fn test_builder_config_deserialize_with_defaults() {
        let config: BuilderConfig = toml::from_str("").unwrap();
        assert_eq!(config, BuilderConfig::default());
    }

    #[test]
    fn test_builder_config_deserialize_with_values() {
        let toml_str = r#"
default_mode = "simple"
hint_hide_delay_ms = 500
simple_reviewer_cap = 6
workflows_dir = "/var/lib/docflow/workflows"
"#;
        let config: BuilderConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_mode, WizardMode::Simple);
        assert_eq!(config.hint_hide_delay_ms, 500);
        assert_eq!(config.simple_reviewer_cap, 6);
        assert_eq!(
            config.workflows_dir,
            Some(PathBuf::from("/var/lib/docflow/workflows"))
        );
    }

    #[test]
    fn test_reviewer_cap_by_mode() {
        let config = BuilderConfig::default();
        assert_eq!(config.reviewer_cap(WizardMode::Simple), Some(4));
        assert_eq!(config.reviewer_cap(WizardMode::Advanced), None);
    }
}
