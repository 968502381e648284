use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five checkpoints of the recruitment pipeline, in the order HR walks
/// them. The order is fixed; the wire labels match the backend enum exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageName {
    Screening,
    Psikotest,
    #[serde(rename = "Interview HR")]
    InterviewHr,
    #[serde(rename = "Interview User")]
    InterviewUser,
    Penawaran,
}

impl StageName {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Screening,
            Self::Psikotest,
            Self::InterviewHr,
            Self::InterviewUser,
            Self::Penawaran,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Screening => "Screening",
            Self::Psikotest => "Psikotest",
            Self::InterviewHr => "Interview HR",
            Self::InterviewUser => "Interview User",
            Self::Penawaran => "Penawaran",
        }
    }

    /// Zero-based position in pipeline order.
    pub const fn position(self) -> usize {
        match self {
            Self::Screening => 0,
            Self::Psikotest => 1,
            Self::InterviewHr => 2,
            Self::InterviewUser => 3,
            Self::Penawaran => 4,
        }
    }

    /// The immediately preceding stage in pipeline order, if any.
    pub const fn predecessor(self) -> Option<Self> {
        match self {
            Self::Screening => None,
            Self::Psikotest => Some(Self::Screening),
            Self::InterviewHr => Some(Self::Psikotest),
            Self::InterviewUser => Some(Self::InterviewHr),
            Self::Penawaran => Some(Self::InterviewUser),
        }
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StageName {
    type Err = UnknownStageName;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        StageName::ordered()
            .into_iter()
            .find(|name| trimmed.eq_ignore_ascii_case(name.label()))
            .ok_or_else(|| UnknownStageName(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a recruitment stage")]
pub struct UnknownStageName(pub String);

/// Recorded outcome of one stage. Wire labels match the backend enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageStatus {
    #[serde(rename = "Belum")]
    NotStarted,
    #[serde(rename = "Lolos")]
    Passed,
    #[serde(rename = "Tidak Lolos")]
    Failed,
}

impl StageStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Belum",
            Self::Passed => "Lolos",
            Self::Failed => "Tidak Lolos",
        }
    }

    pub const fn tone(self) -> Tone {
        match self {
            Self::NotStarted => Tone::Muted,
            Self::Passed => Tone::Success,
            Self::Failed => Tone::Failure,
        }
    }

    pub const fn is_passed(self) -> bool {
        matches!(self, Self::Passed)
    }

    pub const fn is_failed(self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl Default for StageStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StageStatus {
    type Err = UnknownStageStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        [Self::NotStarted, Self::Passed, Self::Failed]
            .into_iter()
            .find(|status| trimmed.eq_ignore_ascii_case(status.label()))
            .ok_or_else(|| UnknownStageStatus(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a stage status")]
pub struct UnknownStageStatus(pub String);

/// Semantic display class, decoupled from any concrete styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Failure,
    Caution,
    Neutral,
    Muted,
}

/// One checkpoint record in a candidate's application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecruitmentStage {
    pub name: StageName,
    pub status: StageStatus,
}

impl RecruitmentStage {
    pub const fn new(name: StageName, status: StageStatus) -> Self {
        Self { name, status }
    }

    /// A stage that has not been acted on yet.
    pub const fn fresh(name: StageName) -> Self {
        Self::new(name, StageStatus::NotStarted)
    }
}

/// Verdict recorded by the external AI screening collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AiScreeningStatus {
    Pass,
    Review,
    Reject,
}

impl AiScreeningStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "AI: Lolos",
            Self::Review => "AI: Pertimbangkan",
            Self::Reject => "AI: Tidak Lolos",
        }
    }

    pub const fn tone(self) -> Tone {
        match self {
            Self::Pass => Tone::Success,
            Self::Review => Tone::Caution,
            Self::Reject => Tone::Failure,
        }
    }
}

/// Recommendation attached to an application once the AI screener has run.
/// Scoring happens outside this crate; only the recorded verdict is modeled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiScreening {
    pub status: AiScreeningStatus,
    /// Screener confidence in the verdict, 0.0 to 1.0.
    pub confidence: f32,
    pub reason: String,
}

/// Indicator shown beside the Screening column: the AI verdict when present,
/// a muted placeholder while the screener has not processed the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AiIndicator {
    pub label: &'static str,
    pub tone: Tone,
}

impl AiIndicator {
    pub fn for_screening(screening: Option<&AiScreening>) -> Self {
        match screening {
            Some(screening) => Self {
                label: screening.status.label(),
                tone: screening.status.tone(),
            },
            None => Self {
                label: "AI belum memproses",
                tone: Tone::Muted,
            },
        }
    }
}
