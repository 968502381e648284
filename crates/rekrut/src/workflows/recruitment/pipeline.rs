//! Pure derivation over a candidate's stage records: unlock rules, the
//! overall status badge, and the progress-timeline connector states.
//!
//! Everything here is synchronous and side-effect free. Malformed input
//! (missing stage records) degrades to the conservative reading, locked
//! stages and "Belum" styling, instead of erroring.

use serde::Serialize;

use super::domain::{RecruitmentStage, StageName, StageStatus, Tone};

/// Looks up a stage record by name. Input order is irrelevant; the backend
/// supplies one record per name but never promises a position.
fn find_stage(stages: &[RecruitmentStage], name: StageName) -> Option<&RecruitmentStage> {
    stages.iter().find(|stage| stage.name == name)
}

/// Whether HR may act on `name` for this application. The first stage is
/// always open; every other stage requires the immediately preceding stage
/// to be recorded as passed. A missing predecessor locks the stage.
pub fn is_stage_unlocked(name: StageName, stages: &[RecruitmentStage]) -> bool {
    match name.predecessor() {
        None => true,
        Some(previous) => find_stage(stages, previous)
            .map(|stage| stage.status.is_passed())
            .unwrap_or(false),
    }
}

/// The stage summarizing where the application currently sits.
///
/// A failed stage wins; with several failures the earliest in pipeline order
/// is reported so the result is deterministic regardless of input order.
/// Otherwise the furthest passed stage is reported, defaulting to Screening
/// when nothing has been passed yet.
pub fn current_stage(stages: &[RecruitmentStage]) -> StageName {
    for name in StageName::ordered() {
        if let Some(stage) = find_stage(stages, name) {
            if stage.status.is_failed() {
                return name;
            }
        }
    }

    for name in StageName::ordered().into_iter().rev() {
        if let Some(stage) = find_stage(stages, name) {
            if stage.status.is_passed() {
                return name;
            }
        }
    }

    StageName::Screening
}

/// Display badge for one overall-status reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: String,
    pub tone: Tone,
}

impl StatusBadge {
    fn new(label: &str, tone: Tone) -> Self {
        Self {
            label: label.to_string(),
            tone,
        }
    }
}

/// Badge table for in-progress applications, keyed by the current stage.
///
/// The mapping is configuration data rather than logic: the production UI
/// shipped a table with known quirks (see [`BadgePalette::legacy`]) and the
/// product owner may re-skin it without touching the evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgePalette {
    badges: [StatusBadge; 5],
}

impl BadgePalette {
    /// Tone-consistent table: an in-progress application is labeled with the
    /// furthest stage reached, styled as progress.
    pub fn standard() -> Self {
        Self {
            badges: StageName::ordered()
                .map(|name| StatusBadge::new(name.label(), Tone::Success)),
        }
    }

    /// The table observed in the legacy UI, kept for byte-compatible
    /// rendering. Two entries are inconsistent with the rest: "Psikotest" is
    /// relabeled "Tahap Interview", and "Interview HR" carries a failure
    /// tone even though the application has not failed. Flagged for product
    /// clarification; not the default.
    pub fn legacy() -> Self {
        Self {
            badges: [
                StatusBadge::new("Screening", Tone::Success),
                StatusBadge::new("Tahap Interview", Tone::Success),
                StatusBadge::new("Interview HR", Tone::Failure),
                StatusBadge::new("Interview User", Tone::Caution),
                StatusBadge::new("Penawaran", Tone::Neutral),
            ],
        }
    }

    pub fn badge(&self, name: StageName) -> StatusBadge {
        self.badges[name.position()].clone()
    }
}

impl Default for BadgePalette {
    fn default() -> Self {
        Self::standard()
    }
}

/// The single summary badge for an application's pipeline progress.
///
/// Any failure dominates; an untouched pipeline reads "Belum"; otherwise the
/// badge for the current stage is taken from the palette. An empty stage
/// collection counts as untouched.
pub fn overall_status(stages: &[RecruitmentStage], palette: &BadgePalette) -> StatusBadge {
    if stages.iter().any(|stage| stage.status.is_failed()) {
        return StatusBadge::new(StageStatus::Failed.label(), Tone::Failure);
    }

    if stages
        .iter()
        .all(|stage| stage.status == StageStatus::NotStarted)
    {
        return StatusBadge::new(StageStatus::NotStarted.label(), Tone::Neutral);
    }

    palette.badge(current_stage(stages))
}

/// State of the line drawn between a stage and its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorState {
    Active,
    Inactive,
}

/// One cell of the progress display, in pipeline order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageView {
    pub name: StageName,
    /// Status as stored on the application (missing records read "Belum").
    pub recorded_status: StageStatus,
    /// Status the display uses: stages past a failure render as "Belum"
    /// whatever their stored status says.
    pub effective_status: StageStatus,
    pub tone: Tone,
    /// Connector toward the next stage; `None` on the last stage.
    pub connector: Option<ConnectorState>,
}

/// Derive the five progress-display cells for one application.
///
/// Iteration runs in fixed pipeline order, not input order. Once a failed
/// stage has been seen, every later stage is forced to an inactive "Belum"
/// rendering (a later stage that is itself failed keeps its failure
/// styling) and no later connector can be active. The connector after a
/// stage is active only while that stage is passed and no failure has
/// occurred at or before it.
pub fn timeline(stages: &[RecruitmentStage]) -> Vec<StageView> {
    let ordered = StageName::ordered();
    let mut views = Vec::with_capacity(ordered.len());
    let mut failed = false;

    for (index, name) in ordered.into_iter().enumerate() {
        let recorded_status = find_stage(stages, name)
            .map(|stage| stage.status)
            .unwrap_or_default();

        let is_failed = recorded_status.is_failed();
        if is_failed {
            failed = true;
        }

        let effective_status = if failed && !is_failed {
            StageStatus::NotStarted
        } else {
            recorded_status
        };

        let connector = if index + 1 < ordered.len() {
            Some(if recorded_status.is_passed() && !failed {
                ConnectorState::Active
            } else {
                ConnectorState::Inactive
            })
        } else {
            None
        };

        views.push(StageView {
            name,
            recorded_status,
            effective_status,
            tone: effective_status.tone(),
            connector,
        });
    }

    views
}
