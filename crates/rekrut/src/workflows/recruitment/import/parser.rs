use std::io::Read;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::workflows::recruitment::applications::domain::{ApplicationId, CandidateId, JobId};
use crate::workflows::recruitment::domain::StageStatus;

#[derive(Debug)]
pub(crate) struct AtsRecord {
    pub(crate) application_id: ApplicationId,
    pub(crate) candidate_id: CandidateId,
    pub(crate) job_id: JobId,
    pub(crate) applied_at: DateTime<Utc>,
    /// Statuses in pipeline order.
    pub(crate) statuses: [StageStatus; 5],
}

/// Error raised while reading an ATS export. Row numbers count the header
/// as row 1, matching what spreadsheet tools display.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("row {row}: column '{field}' is empty")]
    MissingField { row: usize, field: &'static str },
    #[error("row {row}: '{value}' is not an RFC 3339 timestamp or YYYY-MM-DD date")]
    InvalidTimestamp { row: usize, value: String },
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<AtsRecord>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, record) in csv_reader.deserialize::<AtsRow>().enumerate() {
        let row = index + 2;
        let parsed = record?;

        records.push(AtsRecord {
            application_id: ApplicationId(required(&parsed.application_id, row, "Application ID")?),
            candidate_id: CandidateId(required(&parsed.candidate_id, row, "Candidate ID")?),
            job_id: JobId(required(&parsed.job_id, row, "Job ID")?),
            applied_at: parse_timestamp(&parsed.applied_at, row)?,
            statuses: [
                lenient_status(&parsed.screening),
                lenient_status(&parsed.psikotest),
                lenient_status(&parsed.interview_hr),
                lenient_status(&parsed.interview_user),
                lenient_status(&parsed.penawaran),
            ],
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct AtsRow {
    #[serde(rename = "Application ID", default)]
    application_id: String,
    #[serde(rename = "Candidate ID", default)]
    candidate_id: String,
    #[serde(rename = "Job ID", default)]
    job_id: String,
    #[serde(rename = "Applied At", default)]
    applied_at: String,
    #[serde(rename = "Screening", default)]
    screening: String,
    #[serde(rename = "Psikotest", default)]
    psikotest: String,
    #[serde(rename = "Interview HR", default)]
    interview_hr: String,
    #[serde(rename = "Interview User", default)]
    interview_user: String,
    #[serde(rename = "Penawaran", default)]
    penawaran: String,
}

fn required(value: &str, row: usize, field: &'static str) -> Result<String, ImportError> {
    if value.is_empty() {
        return Err(ImportError::MissingField { row, field });
    }
    Ok(value.to_string())
}

/// Exports carry either full RFC 3339 timestamps or bare dates, depending on
/// which legacy report produced them. Bare dates read as midnight UTC.
fn parse_timestamp(value: &str, row: usize) -> Result<DateTime<Utc>, ImportError> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(ImportError::InvalidTimestamp {
        row,
        value: value.to_string(),
    })
}

/// Stage cells are operator-maintained text; anything that is not a known
/// status label reads as "Belum".
fn lenient_status(value: &str) -> StageStatus {
    value.parse::<StageStatus>().unwrap_or_default()
}
