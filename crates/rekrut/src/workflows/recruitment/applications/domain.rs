use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::recruitment::domain::{
    AiIndicator, AiScreening, RecruitmentStage, StageName, StageStatus,
};
use crate::workflows::recruitment::pipeline::{
    self, BadgePalette, StageView, StatusBadge,
};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Identifier wrapper for candidate accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

/// One candidate's submission to one job posting, carrying one stage record
/// per pipeline checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub candidate_id: CandidateId,
    pub job_id: JobId,
    pub applied_at: DateTime<Utc>,
    pub stages: Vec<RecruitmentStage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_screening: Option<AiScreening>,
}

impl Application {
    /// A just-submitted application: every stage present, none acted on.
    pub fn fresh(
        id: ApplicationId,
        candidate_id: CandidateId,
        job_id: JobId,
        applied_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            candidate_id,
            job_id,
            applied_at,
            stages: StageName::ordered()
                .into_iter()
                .map(RecruitmentStage::fresh)
                .collect(),
            ai_screening: None,
        }
    }

    pub fn stage(&self, name: StageName) -> Option<&RecruitmentStage> {
        self.stages.iter().find(|stage| stage.name == name)
    }

    /// Record a status for `name`. A record missing from storage is created
    /// in pipeline position, matching the display layer's "missing reads as
    /// Belum" degrade rather than rejecting the write.
    pub fn set_stage_status(&mut self, name: StageName, status: StageStatus) {
        if let Some(stage) = self.stages.iter_mut().find(|stage| stage.name == name) {
            stage.status = status;
            return;
        }

        let insert_at = self
            .stages
            .iter()
            .position(|stage| stage.name.position() > name.position())
            .unwrap_or(self.stages.len());
        self.stages
            .insert(insert_at, RecruitmentStage::new(name, status));
    }

    pub fn summary_view(&self, palette: &BadgePalette) -> ApplicationSummaryView {
        ApplicationSummaryView {
            id: self.id.clone(),
            candidate_id: self.candidate_id.clone(),
            job_id: self.job_id.clone(),
            applied_at: self.applied_at,
            overall_status: pipeline::overall_status(&self.stages, palette),
            current_stage: pipeline::current_stage(&self.stages),
            ai: AiIndicator::for_screening(self.ai_screening.as_ref()),
        }
    }

    pub fn timeline_view(&self, palette: &BadgePalette) -> ApplicationTimelineView {
        ApplicationTimelineView {
            id: self.id.clone(),
            job_id: self.job_id.clone(),
            applied_at: self.applied_at,
            overall_status: pipeline::overall_status(&self.stages, palette),
            stages: pipeline::timeline(&self.stages),
        }
    }
}

/// Row-level summary exposed by the API and the roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationSummaryView {
    pub id: ApplicationId,
    pub candidate_id: CandidateId,
    pub job_id: JobId,
    pub applied_at: DateTime<Utc>,
    pub overall_status: StatusBadge,
    pub current_stage: StageName,
    pub ai: AiIndicator,
}

/// Full progress display for one application, as the history page draws it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationTimelineView {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub applied_at: DateTime<Utc>,
    pub overall_status: StatusBadge,
    pub stages: Vec<StageView>,
}
