use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use rekrut::workflows::recruitment::applications::{
    application_router, ApplicationRepository, ApplicationService, NotificationPublisher,
};
use rekrut::workflows::recruitment::{
    current_stage, is_stage_unlocked, overall_status, timeline, BadgePalette, RecruitmentStage,
    StageName, StageView, StatusBadge,
};

#[derive(Debug, Deserialize)]
pub(crate) struct PipelineReportRequest {
    pub(crate) stages: Vec<RecruitmentStage>,
    #[serde(default)]
    pub(crate) use_legacy_palette: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct PipelineReportResponse {
    pub(crate) overall_status: StatusBadge,
    pub(crate) current_stage: StageName,
    pub(crate) unlocked: Vec<StageName>,
    pub(crate) stages: Vec<StageView>,
}

pub(crate) fn with_application_routes<R, N>(
    service: Arc<ApplicationService<R, N>>,
) -> axum::Router
where
    R: ApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    application_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/pipeline/report",
            axum::routing::post(pipeline_report_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Stateless evaluator endpoint: derive the progress display for a stage
/// collection supplied by the caller, without touching stored applications.
pub(crate) async fn pipeline_report_endpoint(
    Json(payload): Json<PipelineReportRequest>,
) -> Json<PipelineReportResponse> {
    let PipelineReportRequest {
        stages,
        use_legacy_palette,
    } = payload;

    let palette = if use_legacy_palette {
        BadgePalette::legacy()
    } else {
        BadgePalette::standard()
    };

    let unlocked = StageName::ordered()
        .into_iter()
        .filter(|name| is_stage_unlocked(*name, &stages))
        .collect();

    Json(PipelineReportResponse {
        overall_status: overall_status(&stages, &palette),
        current_stage: current_stage(&stages),
        unlocked,
        stages: timeline(&stages),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use rekrut::workflows::recruitment::{StageStatus, Tone};

    fn stages(statuses: [StageStatus; 5]) -> Vec<RecruitmentStage> {
        StageName::ordered()
            .into_iter()
            .zip(statuses)
            .map(|(name, status)| RecruitmentStage::new(name, status))
            .collect()
    }

    #[tokio::test]
    async fn pipeline_report_endpoint_derives_the_display() {
        use rekrut::workflows::recruitment::StageStatus::{NotStarted, Passed};

        let request = PipelineReportRequest {
            stages: stages([Passed, Passed, NotStarted, NotStarted, NotStarted]),
            use_legacy_palette: false,
        };

        let Json(body) = pipeline_report_endpoint(Json(request)).await;

        assert_eq!(body.current_stage, StageName::Psikotest);
        assert_eq!(body.overall_status.label, "Psikotest");
        assert_eq!(
            body.unlocked,
            vec![StageName::Screening, StageName::Psikotest, StageName::InterviewHr]
        );
        assert_eq!(body.stages.len(), 5);
    }

    #[tokio::test]
    async fn pipeline_report_endpoint_honors_the_legacy_palette() {
        use rekrut::workflows::recruitment::StageStatus::{NotStarted, Passed};

        let request = PipelineReportRequest {
            stages: stages([Passed, Passed, Passed, NotStarted, NotStarted]),
            use_legacy_palette: true,
        };

        let Json(body) = pipeline_report_endpoint(Json(request)).await;

        assert_eq!(body.overall_status.label, "Interview HR");
        assert_eq!(body.overall_status.tone, Tone::Failure);
    }
}
