use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::recruitment::applications::router::application_router;
use crate::workflows::recruitment::domain::StageStatus::{Failed, NotStarted, Passed};
use serde_json::json;

#[tokio::test]
async fn apply_route_creates_an_application() {
    let (service, _, _) = build_service();
    let router = application_router(service);

    let response = router
        .oneshot(
            Request::post("/api/v1/applications")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "candidate_id": "cand-1", "job_id": "job-1" }).to_string(),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert!(payload.get("id").is_some());
    assert_eq!(payload["current_stage"], "Screening");
    assert_eq!(payload["overall_status"]["label"], "Belum");
    assert_eq!(payload["ai"]["label"], "AI belum memproses");
}

#[tokio::test]
async fn apply_route_rejects_duplicates_with_conflict() {
    let (service, _, _) = build_service();
    let router = application_router(service);

    let request = || {
        Request::post("/api/v1/applications")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "candidate_id": "cand-1", "job_id": "job-1" }).to_string(),
            ))
            .expect("request builds")
    };

    let first = router.clone().oneshot(request()).await.expect("route executes");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = router.oneshot(request()).await.expect("route executes");
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn stage_update_route_applies_unlocked_updates() {
    let (service, repository, _) = build_service();
    repository.seed(stored_application(
        "app-open",
        "cand-1",
        "job-1",
        3,
        [Passed, NotStarted, NotStarted, NotStarted, NotStarted],
    ));
    let router = application_router(service);

    let response = router
        .oneshot(
            Request::put("/api/v1/applications/app-open/stage?name=Psikotest&status=Lolos")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["current_stage"], "Psikotest");
}

#[tokio::test]
async fn stage_update_route_rejects_locked_stages() {
    let (service, repository, _) = build_service();
    repository.seed(stored_application(
        "app-open",
        "cand-1",
        "job-1",
        3,
        [Passed, NotStarted, NotStarted, NotStarted, NotStarted],
    ));
    let router = application_router(service);

    let response = router
        .oneshot(
            Request::put(
                "/api/v1/applications/app-open/stage?name=Interview%20HR&status=Lolos",
            )
            .body(Body::empty())
            .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn stage_update_route_rejects_unknown_labels() {
    let (service, repository, _) = build_service();
    repository.seed(stored_application(
        "app-open",
        "cand-1",
        "job-1",
        3,
        [Passed, NotStarted, NotStarted, NotStarted, NotStarted],
    ));
    let router = application_router(service);

    let response = router
        .oneshot(
            Request::put("/api/v1/applications/app-open/stage?name=Psikotest&status=Maybe")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_route_returns_not_found_for_unknown_ids() {
    let (service, _, _) = build_service();
    let router = application_router(service);

    let response = router
        .oneshot(
            Request::get("/api/v1/applications/app-missing")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn timeline_route_reports_connector_states() {
    let (service, repository, _) = build_service();
    repository.seed(stored_application(
        "app-failed",
        "cand-1",
        "job-1",
        3,
        [Passed, Failed, Passed, NotStarted, NotStarted],
    ));
    let router = application_router(service);

    let response = router
        .oneshot(
            Request::get("/api/v1/applications/app-failed/timeline")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["overall_status"]["label"], "Tidak Lolos");

    let stages = payload["stages"].as_array().expect("stage array");
    assert_eq!(stages.len(), 5);
    assert_eq!(stages[0]["connector"], "active");
    assert_eq!(stages[1]["connector"], "inactive");
    // Recorded "Lolos" past the failure renders as "Belum".
    assert_eq!(stages[2]["recorded_status"], "Lolos");
    assert_eq!(stages[2]["effective_status"], "Belum");
    assert_eq!(stages[4]["connector"], serde_json::Value::Null);
}

#[tokio::test]
async fn history_route_lists_most_recent_first() {
    let (service, repository, _) = build_service();
    repository.seed(stored_application(
        "app-old",
        "cand-1",
        "job-1",
        2,
        [Passed, NotStarted, NotStarted, NotStarted, NotStarted],
    ));
    repository.seed(stored_application(
        "app-new",
        "cand-1",
        "job-2",
        9,
        [NotStarted, NotStarted, NotStarted, NotStarted, NotStarted],
    ));
    let router = application_router(service);

    let response = router
        .oneshot(
            Request::get("/api/v1/candidates/cand-1/applications")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let ids: Vec<&str> = payload
        .as_array()
        .expect("application array")
        .iter()
        .map(|view| view["id"].as_str().expect("id string"))
        .collect();
    assert_eq!(ids, vec!["app-new", "app-old"]);
}

#[tokio::test]
async fn roster_route_filters_and_pages() {
    let (service, repository, _) = build_service();
    repository.seed(stored_application(
        "app-1",
        "cand-1",
        "job-a",
        1,
        [Passed, NotStarted, NotStarted, NotStarted, NotStarted],
    ));
    repository.seed(stored_application(
        "app-2",
        "cand-2",
        "job-b",
        2,
        [NotStarted, NotStarted, NotStarted, NotStarted, NotStarted],
    ));
    repository.seed(stored_application(
        "app-3",
        "cand-3",
        "job-a",
        3,
        [NotStarted, NotStarted, NotStarted, NotStarted, NotStarted],
    ));
    let router = application_router(service);

    let response = router
        .oneshot(
            Request::get("/api/v1/roster?job_id=job-a&page=1")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total_rows"], 2);
    assert_eq!(payload["page"], 1);
    // Page size 2 comes from the test service config.
    assert_eq!(payload["page_size"], 2);
}

#[tokio::test]
async fn import_route_ingests_csv_exports() {
    let (service, repository, _) = build_service();
    let router = application_router(service);

    let csv = "Application ID,Candidate ID,Job ID,Applied At,Screening,Psikotest,Interview HR,Interview User,Penawaran\n\
               legacy-1,cand-9,job-3,2025-11-02T08:30:00Z,Lolos,Belum,Belum,Belum,Belum\n";

    let response = router
        .oneshot(
            Request::post("/api/v1/applications/import")
                .header(header::CONTENT_TYPE, "text/csv")
                .body(Body::from(csv))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["imported"], 1);
    assert_eq!(payload["skipped"], 0);
    assert!(repository.stored("legacy-1").is_some());
}

#[tokio::test]
async fn import_route_rejects_malformed_exports() {
    let (service, _, _) = build_service();
    let router = application_router(service);

    let csv = "Application ID,Candidate ID,Job ID,Applied At,Screening,Psikotest,Interview HR,Interview User,Penawaran\n\
               legacy-1,cand-9,job-3,sometime soon,Lolos,Belum,Belum,Belum,Belum\n";

    let response = router
        .oneshot(
            Request::post("/api/v1/applications/import")
                .header(header::CONTENT_TYPE, "text/csv")
                .body(Body::from(csv))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
