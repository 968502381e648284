use super::common::*;
use crate::workflows::recruitment::applications::domain::JobId;
use crate::workflows::recruitment::applications::roster::{build_roster, RosterQuery};
use crate::workflows::recruitment::domain::StageStatus::{Failed, NotStarted, Passed};
use crate::workflows::recruitment::domain::{AiScreening, AiScreeningStatus, Tone};
use crate::workflows::recruitment::pipeline::BadgePalette;

fn sample_applications() -> Vec<crate::workflows::recruitment::applications::domain::Application> {
    vec![
        stored_application(
            "app-1",
            "cand-1",
            "job-a",
            1,
            [Passed, NotStarted, NotStarted, NotStarted, NotStarted],
        ),
        stored_application(
            "app-2",
            "cand-2",
            "job-b",
            2,
            [Passed, Failed, NotStarted, NotStarted, NotStarted],
        ),
        stored_application(
            "app-3",
            "cand-3",
            "job-a",
            3,
            [NotStarted, NotStarted, NotStarted, NotStarted, NotStarted],
        ),
    ]
}

#[test]
fn filters_rows_to_the_selected_job() {
    let applications = sample_applications();
    let query = RosterQuery {
        job_id: Some(JobId("job-a".to_string())),
        page: 1,
    };

    let page = build_roster(&applications, &query, &BadgePalette::standard(), 5);

    assert_eq!(page.total_rows, 2);
    let ids: Vec<&str> = page
        .rows
        .iter()
        .map(|row| row.application_id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["app-1", "app-3"]);
}

#[test]
fn pages_are_fixed_size_and_clamped() {
    let applications = sample_applications();

    let first = build_roster(
        &applications,
        &RosterQuery { job_id: None, page: 1 },
        &BadgePalette::standard(),
        2,
    );
    assert_eq!(first.rows.len(), 2);
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.total_rows, 3);

    let second = build_roster(
        &applications,
        &RosterQuery { job_id: None, page: 2 },
        &BadgePalette::standard(),
        2,
    );
    assert_eq!(second.rows.len(), 1);
    assert_eq!(second.rows[0].application_id.0, "app-3");

    // Pages beyond the end clamp to the last page; page 0 clamps to 1.
    let clamped = build_roster(
        &applications,
        &RosterQuery { job_id: None, page: 99 },
        &BadgePalette::standard(),
        2,
    );
    assert_eq!(clamped.page, 2);
    let floor = build_roster(
        &applications,
        &RosterQuery { job_id: None, page: 0 },
        &BadgePalette::standard(),
        2,
    );
    assert_eq!(floor.page, 1);
}

#[test]
fn empty_roster_still_reports_one_page() {
    let page = build_roster(
        &[],
        &RosterQuery::default(),
        &BadgePalette::standard(),
        5,
    );
    assert_eq!(page.total_rows, 0);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.page, 1);
    assert!(page.rows.is_empty());
}

#[test]
fn rows_resolve_unlock_flags_per_cell() {
    let applications = sample_applications();
    let page = build_roster(
        &applications,
        &RosterQuery { job_id: None, page: 1 },
        &BadgePalette::standard(),
        5,
    );

    // app-1 passed Screening only: Screening and Psikotest actionable.
    let unlocked: Vec<bool> = page.rows[0].cells.iter().map(|cell| cell.unlocked).collect();
    assert_eq!(unlocked, vec![true, true, false, false, false]);

    // app-2 failed Psikotest: nothing past it unlocks.
    let unlocked: Vec<bool> = page.rows[1].cells.iter().map(|cell| cell.unlocked).collect();
    assert_eq!(unlocked, vec![true, true, false, false, false]);
}

#[test]
fn rows_carry_the_ai_indicator_with_placeholder_fallback() {
    let mut applications = sample_applications();
    applications[0].ai_screening = Some(AiScreening {
        status: AiScreeningStatus::Pass,
        confidence: 0.91,
        reason: "Memenuhi seluruh persyaratan utama".to_string(),
    });

    let page = build_roster(
        &applications,
        &RosterQuery { job_id: None, page: 1 },
        &BadgePalette::standard(),
        5,
    );

    assert_eq!(page.rows[0].ai.label, "AI: Lolos");
    assert_eq!(page.rows[0].ai.tone, Tone::Success);
    assert_eq!(page.rows[2].ai.label, "AI belum memproses");
    assert_eq!(page.rows[2].ai.tone, Tone::Muted);
}
