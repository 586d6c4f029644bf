//! Errors returned by the capacity planner.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while planning a work queue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("Invalid capacity: {0}")]
    InvalidCapacity(String),
    #[error("Invalid job {job_id}: {reason}")]
    InvalidJob { job_id: String, reason: String },
    #[error("Duplicate job id in queue: {0}")]
    DuplicateJob(String),
    #[error("Schedule did not terminate within {limit} day advances")]
    NonTerminatingSchedule { limit: u32 },
    #[error("Date out of range after {0}")]
    DateOutOfRange(NaiveDate),
}

impl PlannerError {
    pub(crate) fn invalid_job(job_id: &str, reason: impl Into<String>) -> Self {
        PlannerError::InvalidJob {
            job_id: job_id.to_string(),
            reason: reason.into(),
        }
    }
}
