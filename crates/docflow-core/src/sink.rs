//! Save collaborator port.
//!
//! The wizard never persists anything itself. On completion it hands the
//! finished draft to a `WorkflowSink`, which returns the id assigned to the
//! saved workflow.

use std::future::Future;
use std::sync::Mutex;

use uuid::Uuid;

use docflow_types::draft::WorkflowDraft;
use docflow_types::error::SinkError;

/// Receives completed drafts.
///
/// Uses RPITIT so implementations can be plain `async fn`s.
pub trait WorkflowSink: Send + Sync {
    /// Persist a completed draft and return its workflow id.
    fn save(&self, draft: WorkflowDraft) -> impl Future<Output = Result<Uuid, SinkError>> + Send;
}

/// In-process sink that keeps every saved draft in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    saved: Mutex<Vec<WorkflowDraft>>,
}

impl MemorySink {
    /// Drafts saved so far, in save order.
    pub fn saved(&self) -> Vec<WorkflowDraft> {
        self.saved
            .lock()
            .map(|saved| saved.clone())
            .unwrap_or_default()
    }
}

impl WorkflowSink for MemorySink {
    async fn save(&self, mut draft: WorkflowDraft) -> Result<Uuid, SinkError> {
        let id = draft.id.unwrap_or_else(Uuid::now_v7);
        draft.id = Some(id);
        let mut saved = self.saved.lock().map_err(|_| SinkError::Unavailable)?;
        saved.retain(|d| d.id != Some(id));
        saved.push(draft);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_sink_assigns_id() {
        let sink = MemorySink::default();
        let id = sink.save(WorkflowDraft::new()).await.unwrap();
        assert_eq!(sink.saved()[0].id, Some(id));
    }

    #[tokio::test]
    async fn test_memory_sink_upserts_on_existing_id() {
        let sink = MemorySink::default();
        let mut draft = WorkflowDraft::new();
        draft.name = "first".to_string();
        let id = sink.save(draft.clone()).await.unwrap();

        draft.id = Some(id);
        draft.name = "second".to_string();
        assert_eq!(sink.save(draft).await.unwrap(), id);

        let saved = sink.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, "second");
    }
}
