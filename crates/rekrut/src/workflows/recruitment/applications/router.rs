use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::workflows::recruitment::domain::{StageName, StageStatus};
use crate::workflows::recruitment::import::AtsImporter;

use super::domain::{ApplicationId, CandidateId, JobId};
use super::repository::{ApplicationRepository, NotificationPublisher, RepositoryError};
use super::roster::RosterQuery;
use super::service::{ApplicationService, ApplicationServiceError};

/// Router builder exposing the application workflow over HTTP.
pub fn application_router<R, N>(service: Arc<ApplicationService<R, N>>) -> Router
where
    R: ApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(apply_handler::<R, N>))
        .route(
            "/api/v1/applications/import",
            post(import_handler::<R, N>),
        )
        .route(
            "/api/v1/applications/:application_id",
            get(status_handler::<R, N>),
        )
        .route(
            "/api/v1/applications/:application_id/timeline",
            get(timeline_handler::<R, N>),
        )
        .route(
            "/api/v1/applications/:application_id/stage",
            put(update_stage_handler::<R, N>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/applications",
            get(history_handler::<R, N>),
        )
        .route("/api/v1/roster", get(roster_handler::<R, N>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApplyRequest {
    pub(crate) candidate_id: String,
    pub(crate) job_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StageUpdateQuery {
    pub(crate) name: String,
    pub(crate) status: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RosterParams {
    pub(crate) job_id: Option<String>,
    pub(crate) page: Option<usize>,
}

fn service_error_response(error: ApplicationServiceError) -> Response {
    let status = match &error {
        ApplicationServiceError::AlreadyApplied => StatusCode::CONFLICT,
        ApplicationServiceError::StageLocked(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApplicationServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ApplicationServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ApplicationServiceError::Repository(RepositoryError::Unavailable(_))
        | ApplicationServiceError::Notification(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

fn bad_request(message: String) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}

pub(crate) async fn apply_handler<R, N>(
    State(service): State<Arc<ApplicationService<R, N>>>,
    axum::Json(request): axum::Json<ApplyRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let candidate = CandidateId(request.candidate_id);
    let job = JobId(request.job_id);

    match service.apply(candidate, job, Utc::now()) {
        Ok(application) => {
            let view = application.summary_view(service.palette());
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<ApplicationService<R, N>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = ApplicationId(application_id);
    match service.get(&id) {
        Ok(application) => {
            let view = application.summary_view(service.palette());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn timeline_handler<R, N>(
    State(service): State<Arc<ApplicationService<R, N>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = ApplicationId(application_id);
    match service.get(&id) {
        Ok(application) => {
            let view = application.timeline_view(service.palette());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn update_stage_handler<R, N>(
    State(service): State<Arc<ApplicationService<R, N>>>,
    Path(application_id): Path<String>,
    Query(params): Query<StageUpdateQuery>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let name: StageName = match params.name.parse() {
        Ok(name) => name,
        Err(error) => return bad_request(error.to_string()),
    };
    let status: StageStatus = match params.status.parse() {
        Ok(status) => status,
        Err(error) => return bad_request(error.to_string()),
    };

    let id = ApplicationId(application_id);
    match service.update_stage(&id, name, status) {
        Ok(application) => {
            let view = application.summary_view(service.palette());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn history_handler<R, N>(
    State(service): State<Arc<ApplicationService<R, N>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let candidate = CandidateId(candidate_id);
    match service.history(&candidate) {
        Ok(applications) => {
            let views: Vec<_> = applications
                .iter()
                .map(|application| application.timeline_view(service.palette()))
                .collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn roster_handler<R, N>(
    State(service): State<Arc<ApplicationService<R, N>>>,
    Query(params): Query<RosterParams>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let query = RosterQuery {
        job_id: params.job_id.filter(|id| !id.is_empty()).map(JobId),
        page: params.page.unwrap_or(1),
    };

    match service.roster(&query) {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn import_handler<R, N>(
    State(service): State<Arc<ApplicationService<R, N>>>,
    body: String,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let applications = match AtsImporter::from_reader(body.as_bytes()) {
        Ok(applications) => applications,
        Err(error) => return bad_request(error.to_string()),
    };

    match service.import(applications) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => service_error_response(error),
    }
}
