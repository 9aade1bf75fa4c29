use crate::submission::SubmissionRecord;
use async_trait::async_trait;

/// Error from the persistence collaborator. Details are for logs only and
/// must never be echoed back to the submitter.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Append-only store for validated submissions, one logical table per kind.
///
/// The pipeline exercises exactly one operation: a single insert per
/// successful attempt. No reads, updates, or deletes.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn insert(&self, record: &SubmissionRecord) -> Result<(), StorageError>;
}
