use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use rekrut::config::AppConfig;
use rekrut::workflows::recruitment::applications::{
    Application, ApplicationId, ApplicationRepository, CandidateId, JobId, NotificationError,
    NotificationPublisher, PipelineNotification, RepositoryError, ServiceConfig,
};
use rekrut::workflows::recruitment::{BadgePalette, RecruitmentStage, StageName, StageStatus};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Insertion-ordered store so the roster pages deterministically.
#[derive(Default)]
pub(crate) struct InMemoryApplicationRepository {
    records: Mutex<Vec<Application>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
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

#[derive(Default)]
pub(crate) struct InMemoryNotificationPublisher {
    events: Mutex<Vec<PipelineNotification>>,
}

impl NotificationPublisher for InMemoryNotificationPublisher {
    fn publish(&self, notification: PipelineNotification) -> Result<(), NotificationError> {
        let mut events = self.events.lock().expect("notifier mutex poisoned");
        events.push(notification);
        Ok(())
    }
}

impl InMemoryNotificationPublisher {
    pub(crate) fn events(&self) -> Vec<PipelineNotification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

pub(crate) fn service_config(config: &AppConfig) -> ServiceConfig {
    ServiceConfig {
        palette: BadgePalette::standard(),
        roster_page_size: config.roster.page_size,
    }
}

/// Comma-separated status labels in pipeline order, e.g.
/// "Lolos,Tidak Lolos,Belum". Missing trailing stages read as "Belum".
#[derive(Clone, Debug)]
pub(crate) struct StageSpec(pub(crate) Vec<RecruitmentStage>);

pub(crate) fn parse_stage_spec(raw: &str) -> Result<StageSpec, String> {
    let names = StageName::ordered();
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() > names.len() {
        return Err(format!(
            "expected at most {} statuses, got {}",
            names.len(),
            parts.len()
        ));
    }

    let mut stages = Vec::with_capacity(names.len());
    for (index, name) in names.into_iter().enumerate() {
        let status = match parts.get(index) {
            Some(part) if !part.trim().is_empty() => part
                .parse::<StageStatus>()
                .map_err(|err| err.to_string())?,
            _ => StageStatus::NotStarted,
        };
        stages.push(RecruitmentStage::new(name, status));
    }

    Ok(StageSpec(stages))
}
