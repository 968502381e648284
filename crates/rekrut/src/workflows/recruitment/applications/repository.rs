use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Application, ApplicationId, CandidateId, JobId};

/// Storage abstraction so the service module can be exercised in isolation.
/// The backing store owns uniqueness of (candidate, job) pairs and of stage
/// names within a record.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError>;
    fn update(&self, application: Application) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError>;
    fn for_candidate(&self, candidate: &CandidateId) -> Result<Vec<Application>, RepositoryError>;
    fn all(&self) -> Result<Vec<Application>, RepositoryError>;
    fn exists_for(
        &self,
        candidate: &CandidateId,
        job: &JobId,
    ) -> Result<bool, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing outbound notification hooks (bell feed, e-mail adapters).
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: PipelineNotification) -> Result<(), NotificationError>;
}

/// Event published when pipeline state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    ApplicationReceived,
    StageUpdated,
}

/// Payload handed to notification adapters; `details` carries the
/// human-facing key/value pairs the bell feed renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineNotification {
    pub kind: NotificationKind,
    pub application_id: ApplicationId,
    pub details: BTreeMap<String, String>,
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
