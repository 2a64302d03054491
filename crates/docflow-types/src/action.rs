//! Action types for workflow drafts.
//!
//! An action is one unit of work performed when a workflow fires. Like
//! triggers, each action type has its own config struct and `ActionSpec`
//! is the adjacently tagged union over them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The type tag of an action, without its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    SendEmail,
    MoveToFolder,
    CopyToFolder,
    AddTags,
    Notify,
    Review,
    Approve,
    Sign,
    Archive,
}

impl ActionKind {
    pub const ALL: [ActionKind; 9] = [
        ActionKind::SendEmail,
        ActionKind::MoveToFolder,
        ActionKind::CopyToFolder,
        ActionKind::AddTags,
        ActionKind::Notify,
        ActionKind::Review,
        ActionKind::Approve,
        ActionKind::Sign,
        ActionKind::Archive,
    ];

    /// Actions that the simple flow toggles on/off and routes to a folder.
    pub const ROUTED: [ActionKind; 4] = [
        ActionKind::Review,
        ActionKind::Approve,
        ActionKind::Sign,
        ActionKind::Archive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::SendEmail => "send_email",
            ActionKind::MoveToFolder => "move_to_folder",
            ActionKind::CopyToFolder => "copy_to_folder",
            ActionKind::AddTags => "add_tags",
            ActionKind::Notify => "notify",
            ActionKind::Review => "review",
            ActionKind::Approve => "approve",
            ActionKind::Sign => "sign",
            ActionKind::Archive => "archive",
        }
    }

    /// Whether this action carries a paired destination folder in the simple flow.
    pub fn is_routed(&self) -> bool {
        ActionKind::ROUTED.contains(self)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown action type: '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// Per-type configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendEmailConfig {
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// Shared shape for every action whose only setting is a destination folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderConfig {
    #[serde(default)]
    pub folder: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddTagsConfig {
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub message: String,
}

/// An action type together with its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "snake_case")]
pub enum ActionSpec {
    SendEmail(SendEmailConfig),
    MoveToFolder(FolderConfig),
    CopyToFolder(FolderConfig),
    AddTags(AddTagsConfig),
    Notify(NotifyConfig),
    Review(FolderConfig),
    Approve(FolderConfig),
    Sign(FolderConfig),
    Archive(FolderConfig),
}

impl ActionSpec {
    /// An unconfigured action of the given kind.
    pub fn empty(kind: ActionKind) -> Self {
        match kind {
            ActionKind::SendEmail => ActionSpec::SendEmail(Default::default()),
            ActionKind::MoveToFolder => ActionSpec::MoveToFolder(Default::default()),
            ActionKind::CopyToFolder => ActionSpec::CopyToFolder(Default::default()),
            ActionKind::AddTags => ActionSpec::AddTags(Default::default()),
            ActionKind::Notify => ActionSpec::Notify(Default::default()),
            ActionKind::Review => ActionSpec::Review(Default::default()),
            ActionKind::Approve => ActionSpec::Approve(Default::default()),
            ActionKind::Sign => ActionSpec::Sign(Default::default()),
            ActionKind::Archive => ActionSpec::Archive(Default::default()),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            ActionSpec::SendEmail(_) => ActionKind::SendEmail,
            ActionSpec::MoveToFolder(_) => ActionKind::MoveToFolder,
            ActionSpec::CopyToFolder(_) => ActionKind::CopyToFolder,
            ActionSpec::AddTags(_) => ActionKind::AddTags,
            ActionSpec::Notify(_) => ActionKind::Notify,
            ActionSpec::Review(_) => ActionKind::Review,
            ActionSpec::Approve(_) => ActionKind::Approve,
            ActionSpec::Sign(_) => ActionKind::Sign,
            ActionSpec::Archive(_) => ActionKind::Archive,
        }
    }

    /// Destination folder, for actions that have one.
    pub fn folder(&self) -> Option<&str> {
        match self {
            ActionSpec::MoveToFolder(c)
            | ActionSpec::CopyToFolder(c)
            | ActionSpec::Review(c)
            | ActionSpec::Approve(c)
            | ActionSpec::Sign(c)
            | ActionSpec::Archive(c) => Some(c.folder.as_str()),
            _ => None,
        }
    }

    /// Mutable destination folder, for actions that have one.
    pub fn folder_mut(&mut self) -> Option<&mut String> {
        match self {
            ActionSpec::MoveToFolder(c)
            | ActionSpec::CopyToFolder(c)
            | ActionSpec::Review(c)
            | ActionSpec::Approve(c)
            | ActionSpec::Sign(c)
            | ActionSpec::Archive(c) => Some(&mut c.folder),
            _ => None,
        }
    }

    /// The configured key/value pairs, skipping empty values.
    pub fn config_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let mut push = |key: &'static str, value: String| {
            if !value.trim().is_empty() {
                pairs.push((key, value));
            }
        };
        match self {
            ActionSpec::SendEmail(c) => {
                push("recipients", c.recipients.join(","));
                push("subject", c.subject.clone());
                push("message", c.message.clone());
            }
            ActionSpec::AddTags(c) => push("tags", c.tags.join(",")),
            ActionSpec::Notify(c) => {
                push("recipients", c.recipients.join(","));
                push("message", c.message.clone());
            }
            other => push("folder", other.folder().unwrap_or_default().to_string()),
        }
        pairs
    }
}

/// One action in a draft's ordered action list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: Uuid,
    #[serde(flatten)]
    pub spec: ActionSpec,
    /// Position in the list; kept equal to the index by every mutation.
    pub order: u32,
}

impl Action {
    pub fn new(spec: ActionSpec) -> Self {
        Self {
            id: Uuid::now_v7(),
            spec,
            order: 0,
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.spec.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_flattens_type_and_config() {
        let action = Action {
            id: Uuid::nil(),
            spec: ActionSpec::Review(FolderConfig {
                folder: "reviewed-items".to_string(),
            }),
            order: 2,
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["type"], "review");
        assert_eq!(value["config"], json!({ "folder": "reviewed-items" }));
        assert_eq!(value["order"], 2);

        let parsed: Action = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, action);
    }

    #[test]
    fn test_routed_kinds() {
        assert!(ActionKind::Review.is_routed());
        assert!(ActionKind::Archive.is_routed());
        assert!(!ActionKind::SendEmail.is_routed());
        assert!(!ActionKind::MoveToFolder.is_routed());
    }

    #[test]
    fn test_folder_accessors() {
        let mut spec = ActionSpec::empty(ActionKind::Sign);
        assert_eq!(spec.folder(), Some(""));
        if let Some(folder) = spec.folder_mut() {
            folder.push_str("signed");
        }
        assert_eq!(spec.folder(), Some("signed"));
        assert!(ActionSpec::empty(ActionKind::AddTags).folder().is_none());
    }

    #[test]
    fn test_empty_spec_matches_kind() {
        for kind in ActionKind::ALL {
            assert_eq!(ActionSpec::empty(kind).kind(), kind);
        }
    }
}
