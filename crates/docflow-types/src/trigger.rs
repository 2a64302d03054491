//! Trigger types for workflow drafts.
//!
//! A trigger is the event that starts a workflow. Each trigger type carries
//! its own strongly-typed configuration struct; `TriggerSpec` is the tagged
//! union over them. Serialized adjacently tagged so that a draft reads as
//! `{ "type": "form_submitted", "config": { "form_id": "f1" } }`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Trigger kind (the bare tag)
// ---------------------------------------------------------------------------

/// The type tag of a trigger, without its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    DocumentUpload,
    WatchFolderUpload,
    FormSubmitted,
    ScheduledTime,
    SelectExisting,
    UploadNew,
}

impl TriggerKind {
    /// All trigger kinds, in picker order.
    pub const ALL: [TriggerKind; 6] = [
        TriggerKind::DocumentUpload,
        TriggerKind::WatchFolderUpload,
        TriggerKind::FormSubmitted,
        TriggerKind::ScheduledTime,
        TriggerKind::SelectExisting,
        TriggerKind::UploadNew,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerKind::DocumentUpload => "document_upload",
            TriggerKind::WatchFolderUpload => "watch_folder_upload",
            TriggerKind::FormSubmitted => "form_submitted",
            TriggerKind::ScheduledTime => "scheduled_time",
            TriggerKind::SelectExisting => "select_existing",
            TriggerKind::UploadNew => "upload_new",
        }
    }

    /// Category label shown next to the trigger in pickers.
    pub fn category(&self) -> &'static str {
        match self {
            TriggerKind::DocumentUpload | TriggerKind::UploadNew => "documents",
            TriggerKind::WatchFolderUpload | TriggerKind::SelectExisting => "folders",
            TriggerKind::FormSubmitted => "forms",
            TriggerKind::ScheduledTime => "schedule",
        }
    }
}

impl std::fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TriggerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TriggerKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown trigger type: '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// Per-type configuration
// ---------------------------------------------------------------------------

/// A document of a given type was uploaded and indexed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUploadConfig {
    #[serde(default)]
    pub document_type: String,
    /// Index fields captured on upload (at least one required).
    #[serde(default)]
    pub index_fields: Vec<String>,
}

/// A file landed in a watched folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchFolderUploadConfig {
    /// Display path of the watched folder.
    #[serde(default)]
    pub folder: String,
    /// Catalog identifier of the watched folder.
    #[serde(default)]
    pub watch_folder_id: String,
    #[serde(default)]
    pub include_subfolders: bool,
}

/// A form was submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSubmittedConfig {
    #[serde(default)]
    pub form_id: String,
    /// Form field -> index field mapping.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub field_mappings: BTreeMap<String, String>,
}

/// How often a scheduled trigger fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

/// Fires on a calendar schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTimeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    /// Time of day, `HH:MM`.
    #[serde(default)]
    pub time: String,
}

/// Run against documents already in the repository matching a search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectExistingConfig {
    #[serde(default)]
    pub search_criteria: String,
}

/// Run when a new document is uploaded into a folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadNewConfig {
    #[serde(default)]
    pub folder: String,
}

// ---------------------------------------------------------------------------
// TriggerSpec
// ---------------------------------------------------------------------------

/// A trigger type together with its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "snake_case")]
pub enum TriggerSpec {
    DocumentUpload(DocumentUploadConfig),
    WatchFolderUpload(WatchFolderUploadConfig),
    FormSubmitted(FormSubmittedConfig),
    ScheduledTime(ScheduledTimeConfig),
    SelectExisting(SelectExistingConfig),
    UploadNew(UploadNewConfig),
}

impl TriggerSpec {
    /// An unconfigured trigger of the given kind.
    pub fn empty(kind: TriggerKind) -> Self {
        match kind {
            TriggerKind::DocumentUpload => TriggerSpec::DocumentUpload(Default::default()),
            TriggerKind::WatchFolderUpload => TriggerSpec::WatchFolderUpload(Default::default()),
            TriggerKind::FormSubmitted => TriggerSpec::FormSubmitted(Default::default()),
            TriggerKind::ScheduledTime => TriggerSpec::ScheduledTime(Default::default()),
            TriggerKind::SelectExisting => TriggerSpec::SelectExisting(Default::default()),
            TriggerKind::UploadNew => TriggerSpec::UploadNew(Default::default()),
        }
    }

    pub fn kind(&self) -> TriggerKind {
        match self {
            TriggerSpec::DocumentUpload(_) => TriggerKind::DocumentUpload,
            TriggerSpec::WatchFolderUpload(_) => TriggerKind::WatchFolderUpload,
            TriggerSpec::FormSubmitted(_) => TriggerKind::FormSubmitted,
            TriggerSpec::ScheduledTime(_) => TriggerKind::ScheduledTime,
            TriggerSpec::SelectExisting(_) => TriggerKind::SelectExisting,
            TriggerSpec::UploadNew(_) => TriggerKind::UploadNew,
        }
    }

    /// The configured key/value pairs, in declaration order, skipping empty values.
    ///
    /// Used by summaries; not a serialization format.
    pub fn config_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let mut push = |key: &'static str, value: &str| {
            if !value.trim().is_empty() {
                pairs.push((key, value.to_string()));
            }
        };
        match self {
            TriggerSpec::DocumentUpload(c) => {
                push("document_type", &c.document_type);
                push("index_fields", &c.index_fields.join(","));
            }
            TriggerSpec::WatchFolderUpload(c) => {
                push("folder", &c.folder);
                push("watch_folder_id", &c.watch_folder_id);
            }
            TriggerSpec::FormSubmitted(c) => push("form_id", &c.form_id),
            TriggerSpec::ScheduledTime(c) => {
                push("frequency", c.frequency.map(|f| f.as_str()).unwrap_or(""));
                push("time", &c.time);
            }
            TriggerSpec::SelectExisting(c) => push("search_criteria", &c.search_criteria),
            TriggerSpec::UploadNew(c) => push("folder", &c.folder),
        }
        pairs
    }
}

/// The trigger slot of a draft. `spec == None` means no type chosen yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerDraft {
    #[serde(default)]
    pub category: String,
    #[serde(flatten)]
    pub spec: Option<TriggerSpec>,
}

impl TriggerDraft {
    pub fn kind(&self) -> Option<TriggerKind> {
        self.spec.as_ref().map(TriggerSpec::kind)
    }
}
