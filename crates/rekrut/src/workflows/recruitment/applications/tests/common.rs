use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::recruitment::applications::domain::{
    Application, ApplicationId, CandidateId, JobId,
};
use crate::workflows::recruitment::applications::repository::{
    ApplicationRepository, NotificationError, NotificationPublisher, PipelineNotification,
    RepositoryError,
};
use crate::workflows::recruitment::applications::service::{ApplicationService, ServiceConfig};
use crate::workflows::recruitment::domain::{RecruitmentStage, StageName, StageStatus};
use crate::workflows::recruitment::pipeline::BadgePalette;

pub(super) fn applied_on(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, day, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn stages_with(statuses: [StageStatus; 5]) -> Vec<RecruitmentStage> {
    StageName::ordered()
        .into_iter()
        .zip(statuses)
        .map(|(name, status)| RecruitmentStage::new(name, status))
        .collect()
}

pub(super) fn stored_application(
    id: &str,
    candidate: &str,
    job: &str,
    day: u32,
    statuses: [StageStatus; 5],
) -> Application {
    Application {
        id: ApplicationId(id.to_string()),
        candidate_id: CandidateId(candidate.to_string()),
        job_id: JobId(job.to_string()),
        applied_at: applied_on(day),
        stages: stages_with(statuses),
        ai_screening: None,
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<Vec<Application>>,
}

impl MemoryRepository {
    pub(super) fn seed(&self, application: Application) {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .push(application);
    }

    pub(super) fn stored(&self, id: &str) -> Option<Application> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .iter()
            .find(|application| application.id.0 == id)
            .cloned()
    }
}

impl ApplicationRepository for MemoryRepository {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut records = self.records.lock().expect("repository mutex poisoned");
        if records.iter().any(|existing| existing.id == application.id) {
            return Err(RepositoryError::Conflict);
        }
        records.push(application.clone());
        Ok(application)
    }

    fn update(&self, application: Application) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().expect("repository mutex poisoned");
        match records
            .iter_mut()
            .find(|existing| existing.id == application.id)
        {
            Some(existing) => {
                *existing = application;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let records = self.records.lock().expect("repository mutex poisoned");
        Ok(records
            .iter()
            .find(|application| application.id == *id)
            .cloned())
    }

    fn for_candidate(&self, candidate: &CandidateId) -> Result<Vec<Application>, RepositoryError> {
        let records = self.records.lock().expect("repository mutex poisoned");
        Ok(records
            .iter()
            .filter(|application| application.candidate_id == *candidate)
            .cloned()
            .collect())
    }

    fn all(&self) -> Result<Vec<Application>, RepositoryError> {
        let records = self.records.lock().expect("repository mutex poisoned");
        Ok(records.clone())
    }

    fn exists_for(&self, candidate: &CandidateId, job: &JobId) -> Result<bool, RepositoryError> {
        let records = self.records.lock().expect("repository mutex poisoned");
        Ok(records.iter().any(|application| {
            application.candidate_id == *candidate && application.job_id == *job
        }))
    }
}

/// Repository that refuses every operation, for failure-path assertions.
pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _application: Application) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _application: Application) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn for_candidate(
        &self,
        _candidate: &CandidateId,
    ) -> Result<Vec<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn all(&self) -> Result<Vec<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn exists_for(
        &self,
        _candidate: &CandidateId,
        _job: &JobId,
    ) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifier {
    events: Mutex<Vec<PipelineNotification>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<PipelineNotification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

impl NotificationPublisher for MemoryNotifier {
    fn publish(&self, notification: PipelineNotification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) fn service_config() -> ServiceConfig {
    ServiceConfig {
        palette: BadgePalette::standard(),
        roster_page_size: 2,
    }
}

pub(super) type MemoryService = ApplicationService<MemoryRepository, MemoryNotifier>;

pub(super) fn build_service() -> (Arc<MemoryService>, Arc<MemoryRepository>, Arc<MemoryNotifier>) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = Arc::new(ApplicationService::new(
        repository.clone(),
        notifier.clone(),
        service_config(),
    ));
    (service, repository, notifier)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}
