pub mod applications;
pub mod domain;
pub mod import;
pub mod pipeline;

pub use domain::{AiScreening, AiScreeningStatus, RecruitmentStage, StageName, StageStatus, Tone};
pub use pipeline::{
    current_stage, is_stage_unlocked, overall_status, timeline, BadgePalette, ConnectorState,
    StageView, StatusBadge,
};
