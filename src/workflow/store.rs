//! In-memory workflow storage
//!
//! Retains workflow record snapshots for the listing endpoint. Durability
//! across restarts is out of scope; this interface (`save`/`get`/`list`) is
//! the seam where a persistent store would plug in.

use crate::workflow::record::WorkflowRecord;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local store of workflow records keyed by ID
#[derive(Debug, Default)]
pub struct WorkflowStore {
    records: RwLock<HashMap<String, WorkflowRecord>>,
}

impl WorkflowStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a record snapshot, replacing any previous snapshot with the same ID
    pub async fn save(&self, record: WorkflowRecord) {
        self.records.write().await.insert(record.id.clone(), record);
    }

    /// Fetch a record snapshot by ID
    pub async fn get(&self, id: &str) -> Option<WorkflowRecord> {
        self.records.read().await.get(id).cloned()
    }

    /// All retained records, oldest first
    pub async fn list(&self) -> Vec<WorkflowRecord> {
        let records = self.records.read().await;
        let mut all: Vec<WorkflowRecord> = records.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        all
    }

    /// Number of retained records
    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::record::{WorkflowKind, WorkflowRecord};

    #[tokio::test]
    async fn test_save_and_get() {
        let store = WorkflowStore::new();
        let record = WorkflowRecord::new("wf-1".to_string(), WorkflowKind::MultimodalContent);
        store.save(record.clone()).await;

        let fetched = store.get("wf-1").await.unwrap();
        assert_eq!(fetched, record);
        assert!(store.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_previous_snapshot() {
        let store = WorkflowStore::new();
        let mut record = WorkflowRecord::new("wf-1".to_string(), WorkflowKind::ContentAnalysis);
        store.save(record.clone()).await;

        record.push_step("Analyzing sentiment...");
        record.complete();
        store.save(record.clone()).await;

        assert_eq!(store.count().await, 1);
        let fetched = store.get("wf-1").await.unwrap();
        assert_eq!(fetched.steps().len(), 1);
    }

    #[tokio::test]
    async fn test_list_orders_oldest_first() {
        let store = WorkflowStore::new();
        let first = WorkflowRecord::new("wf-1".to_string(), WorkflowKind::AgentCreation);
        let second = WorkflowRecord::new("wf-2".to_string(), WorkflowKind::AgentCreation);
        // Save in reverse to prove ordering comes from the records themselves
        store.save(second).await;
        store.save(first).await;

        let all = store.list().await;
        assert_eq!(all.len(), 2);
        assert!(all[0].created_at <= all[1].created_at);
    }
}
