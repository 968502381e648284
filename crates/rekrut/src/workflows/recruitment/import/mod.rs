//! Legacy ATS export import: turn a CSV of applications and per-stage
//! outcomes into `Application` records ready for the repository.

mod parser;

use std::io::Read;

use crate::workflows::recruitment::domain::{RecruitmentStage, StageName};

use super::applications::domain::Application;

pub use parser::ImportError;

/// Importer for the column layout produced by the legacy ATS export job.
pub struct AtsImporter;

impl AtsImporter {
    /// Parse a CSV export into application records. Stage cells that do not
    /// spell a known status read as "Belum"; identity and timestamp columns
    /// are mandatory and fail the import with row context.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Application>, ImportError> {
        let records = parser::parse_records(reader)?;

        Ok(records
            .into_iter()
            .map(|record| Application {
                id: record.application_id,
                candidate_id: record.candidate_id,
                job_id: record.job_id,
                applied_at: record.applied_at,
                stages: StageName::ordered()
                    .into_iter()
                    .zip(record.statuses)
                    .map(|(name, status)| RecruitmentStage::new(name, status))
                    .collect(),
                ai_screening: None,
            })
            .collect())
    }
}
