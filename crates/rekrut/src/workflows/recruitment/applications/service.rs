use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::workflows::recruitment::domain::{StageName, StageStatus};
use crate::workflows::recruitment::pipeline::{self, BadgePalette};

use super::domain::{Application, ApplicationId, CandidateId, JobId};
use super::repository::{
    ApplicationRepository, NotificationError, NotificationKind, NotificationPublisher,
    PipelineNotification, RepositoryError,
};
use super::roster::{self, RosterPage, RosterQuery};

/// Knobs injected at construction instead of read from ambient state, so the
/// service and its callers stay independently testable.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub palette: BadgePalette,
    pub roster_page_size: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            palette: BadgePalette::standard(),
            roster_page_size: 5,
        }
    }
}

/// Service composing the repository, the notification hook, and the pipeline
/// evaluator into the application workflow HR and candidates drive.
pub struct ApplicationService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
    config: ServiceConfig,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

impl<R, N> ApplicationService<R, N>
where
    R: ApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>, config: ServiceConfig) -> Self {
        Self {
            repository,
            notifier,
            config,
        }
    }

    pub fn palette(&self) -> &BadgePalette {
        &self.config.palette
    }

    /// Submit an application for `candidate` to `job`. Creates every stage
    /// at "Belum"; one application per (candidate, job) pair.
    pub fn apply(
        &self,
        candidate: CandidateId,
        job: JobId,
        applied_at: DateTime<Utc>,
    ) -> Result<Application, ApplicationServiceError> {
        if self.repository.exists_for(&candidate, &job)? {
            return Err(ApplicationServiceError::AlreadyApplied);
        }

        let application =
            Application::fresh(next_application_id(), candidate, job.clone(), applied_at);
        let stored = self.repository.insert(application)?;

        let mut details = BTreeMap::new();
        details.insert("job_id".to_string(), job.0);
        self.notifier.publish(PipelineNotification {
            kind: NotificationKind::ApplicationReceived,
            application_id: stored.id.clone(),
            details,
        })?;

        Ok(stored)
    }

    /// Record an HR decision on one stage. Locked stages reject the write;
    /// the unlock rule is the evaluator's sequential-pass-through rule.
    pub fn update_stage(
        &self,
        id: &ApplicationId,
        name: StageName,
        status: StageStatus,
    ) -> Result<Application, ApplicationServiceError> {
        let mut application = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        if !pipeline::is_stage_unlocked(name, &application.stages) {
            return Err(ApplicationServiceError::StageLocked(name));
        }

        application.set_stage_status(name, status);
        self.repository.update(application.clone())?;

        let mut details = BTreeMap::new();
        details.insert("stage".to_string(), name.label().to_string());
        details.insert("status".to_string(), status.label().to_string());
        self.notifier.publish(PipelineNotification {
            kind: NotificationKind::StageUpdated,
            application_id: application.id.clone(),
            details,
        })?;

        Ok(application)
    }

    pub fn get(&self, id: &ApplicationId) -> Result<Application, ApplicationServiceError> {
        let application = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(application)
    }

    /// A candidate's applications, most recent first, as the history page
    /// orders them.
    pub fn history(
        &self,
        candidate: &CandidateId,
    ) -> Result<Vec<Application>, ApplicationServiceError> {
        let mut applications = self.repository.for_candidate(candidate)?;
        applications.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
        Ok(applications)
    }

    /// One page of the HR roster across all stored applications.
    pub fn roster(&self, query: &RosterQuery) -> Result<RosterPage, ApplicationServiceError> {
        let applications = self.repository.all()?;
        Ok(roster::build_roster(
            &applications,
            query,
            &self.config.palette,
            self.config.roster_page_size,
        ))
    }

    /// Bulk-insert imported applications. Records colliding with existing
    /// ids or (candidate, job) pairs are skipped, not fatal.
    pub fn import(
        &self,
        applications: Vec<Application>,
    ) -> Result<ImportSummary, ApplicationServiceError> {
        let mut summary = ImportSummary::default();

        for application in applications {
            if self
                .repository
                .exists_for(&application.candidate_id, &application.job_id)?
            {
                summary.skipped += 1;
                continue;
            }

            match self.repository.insert(application) {
                Ok(_) => summary.imported += 1,
                Err(RepositoryError::Conflict) => summary.skipped += 1,
                Err(other) => return Err(other.into()),
            }
        }

        Ok(summary)
    }
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error("candidate has already applied to this job")]
    AlreadyApplied,
    #[error("stage '{0}' is locked until the preceding stage is passed")]
    StageLocked(StageName),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
}
