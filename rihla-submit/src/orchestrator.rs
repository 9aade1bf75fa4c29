use crate::outcome::{Failure, Rejection, SubmissionOutcome};
use async_trait::async_trait;
use futures_util::FutureExt;
use rihla_core::{
    validate, AbuseVerifier, FieldMap, StorageError, SubmissionKind, SubmissionRecord,
    SubmissionRepository,
};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::Mutex;

/// Sequences verifier → validator → repository for one submission attempt
/// and folds every result into a terminal [`SubmissionOutcome`].
///
/// Attempts are fully independent: no shared mutable state, at most one
/// repository insert per attempt, no retries.
pub struct SubmissionPipeline {
    verifier: Arc<dyn AbuseVerifier>,
    repository: Arc<dyn SubmissionRepository>,
}

impl SubmissionPipeline {
    pub fn new(verifier: Arc<dyn AbuseVerifier>, repository: Arc<dyn SubmissionRepository>) -> Self {
        Self {
            verifier,
            repository,
        }
    }

    /// Run one attempt to a terminal outcome. Nothing escapes this call as
    /// a raw error or panic; a failed attempt must not degrade the service
    /// for subsequent requests.
    pub async fn submit(
        &self,
        kind: SubmissionKind,
        fields: &FieldMap,
        token: Option<&str>,
    ) -> SubmissionOutcome {
        match AssertUnwindSafe(self.run(kind, fields, token))
            .catch_unwind()
            .await
        {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::error!(kind = kind.as_str(), "submission attempt panicked");
                SubmissionOutcome::Failed(Failure::Unexpected)
            }
        }
    }

    async fn run(
        &self,
        kind: SubmissionKind,
        fields: &FieldMap,
        token: Option<&str>,
    ) -> SubmissionOutcome {
        // Token absence is terminal before any network call.
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            tracing::debug!(kind = kind.as_str(), "submission without verification token");
            return SubmissionOutcome::Rejected(Rejection::MissingToken);
        };

        match self.verifier.verify(token).await {
            Ok(score) => {
                tracing::debug!(kind = kind.as_str(), score = score.0, "verification passed");
            }
            Err(err) => {
                tracing::warn!(kind = kind.as_str(), error = %err, "verification rejected");
                return SubmissionOutcome::Rejected(Rejection::VerificationFailed);
            }
        }

        let record = match validate(kind, fields) {
            Ok(record) => record,
            Err(errors) => {
                tracing::debug!(kind = kind.as_str(), %errors, "schema validation failed");
                return SubmissionOutcome::Rejected(Rejection::InvalidInput(errors));
            }
        };

        match self.repository.insert(&record).await {
            Ok(()) => {
                tracing::info!(kind = kind.as_str(), "submission persisted");
                SubmissionOutcome::Succeeded(kind)
            }
            Err(err) => {
                tracing::error!(kind = kind.as_str(), error = %err, "submission insert failed");
                SubmissionOutcome::Failed(Failure::Storage)
            }
        }
    }
}

/// In-memory repository for tests and no-backend environments. Records every
/// insert; can be told to fail to exercise the storage path.
#[derive(Default)]
pub struct MemoryRepository {
    records: Mutex<Vec<SubmissionRecord>>,
    fail_inserts: bool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_inserts: true,
        }
    }

    pub fn records(&self) -> Vec<SubmissionRecord> {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn insert_count(&self) -> usize {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl SubmissionRepository for MemoryRepository {
    async fn insert(&self, record: &SubmissionRecord) -> Result<(), StorageError> {
        if self.fail_inserts {
            return Err(StorageError::Backend("simulated insert failure".into()));
        }
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record.clone());
        Ok(())
    }
}
