//! Application intake and review workflow: the records HR works on, the
//! repository/notification seams, the service facade, and the HTTP router.

pub mod domain;
pub mod projection;
pub mod repository;
pub mod roster;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationId, ApplicationSummaryView, ApplicationTimelineView, CandidateId,
    JobId,
};
pub use projection::{OptimisticStageUpdate, ReconcileOutcome, StageLockedError};
pub use repository::{
    ApplicationRepository, NotificationError, NotificationKind, NotificationPublisher,
    PipelineNotification, RepositoryError,
};
pub use roster::{RosterPage, RosterQuery, RosterRow, StageCell};
pub use router::application_router;
pub use service::{ApplicationService, ApplicationServiceError, ImportSummary, ServiceConfig};
