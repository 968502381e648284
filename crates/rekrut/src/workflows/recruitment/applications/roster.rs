//! HR candidate-roster derivation: one row per application, optionally
//! filtered to a job posting, paginated with a fixed page size.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::workflows::recruitment::domain::{AiIndicator, StageName, StageStatus};
use crate::workflows::recruitment::pipeline::{self, BadgePalette, StatusBadge};

use super::domain::{Application, ApplicationId, CandidateId, JobId};

/// Filter and paging parameters for the roster table. Pages are 1-based;
/// out-of-range pages clamp instead of erroring.
#[derive(Debug, Clone, Default)]
pub struct RosterQuery {
    pub job_id: Option<JobId>,
    pub page: usize,
}

/// One stage column of a roster row, with the HR action gate resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageCell {
    pub name: StageName,
    pub status: StageStatus,
    pub unlocked: bool,
}

/// One (candidate, application) pair shown to HR.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterRow {
    pub application_id: ApplicationId,
    pub candidate_id: CandidateId,
    pub job_id: JobId,
    pub applied_at: DateTime<Utc>,
    pub ai: AiIndicator,
    pub overall_status: StatusBadge,
    pub cells: Vec<StageCell>,
}

/// One page of the roster plus paging metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterPage {
    pub rows: Vec<RosterRow>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_rows: usize,
}

fn row_for(application: &Application, palette: &BadgePalette) -> RosterRow {
    let cells = StageName::ordered()
        .into_iter()
        .map(|name| StageCell {
            name,
            status: application
                .stage(name)
                .map(|stage| stage.status)
                .unwrap_or_default(),
            unlocked: pipeline::is_stage_unlocked(name, &application.stages),
        })
        .collect();

    RosterRow {
        application_id: application.id.clone(),
        candidate_id: application.candidate_id.clone(),
        job_id: application.job_id.clone(),
        applied_at: application.applied_at,
        ai: AiIndicator::for_screening(application.ai_screening.as_ref()),
        overall_status: pipeline::overall_status(&application.stages, palette),
        cells,
    }
}

/// Flatten applications into roster rows, filter, and page. Row order
/// follows the input collection so the repository controls presentation
/// order.
pub fn build_roster(
    applications: &[Application],
    query: &RosterQuery,
    palette: &BadgePalette,
    page_size: usize,
) -> RosterPage {
    let rows: Vec<RosterRow> = applications
        .iter()
        .filter(|application| match &query.job_id {
            Some(job_id) => application.job_id == *job_id,
            None => true,
        })
        .map(|application| row_for(application, palette))
        .collect();

    let page_size = page_size.max(1);
    let total_rows = rows.len();
    let total_pages = total_rows.div_ceil(page_size).max(1);
    let page = query.page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let rows = rows
        .into_iter()
        .skip(start)
        .take(page_size)
        .collect();

    RosterPage {
        rows,
        page,
        page_size,
        total_pages,
        total_rows,
    }
}
