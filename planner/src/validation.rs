//! Precondition checks run before any capacity is allocated.
//!
//! Everything is validated up front so a bad queue fails the whole run
//! without producing a partial plan.

use rustc_hash::FxHashSet;

use crate::error::PlannerError;
use crate::models::{Job, Money};

/// Check the team's daily capacity is configured and positive.
pub fn validate_capacity(daily_capacity: Option<Money>) -> Result<Money, PlannerError> {
    match daily_capacity {
        None => Err(PlannerError::InvalidCapacity(
            "team has no configured daily capacity".to_string(),
        )),
        Some(capacity) if !capacity.is_positive() => Err(PlannerError::InvalidCapacity(format!(
            "daily capacity must be positive, got {}",
            capacity
        ))),
        Some(capacity) => Ok(capacity),
    }
}

/// Check every job in the queue and return their total costs in queue order.
///
/// The queue total must also fit in `Money`, so plan summaries never overflow.
pub fn validate_queue(jobs: &[Job]) -> Result<Vec<Money>, PlannerError> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut costs = Vec::with_capacity(jobs.len());
    let mut queue_total = Money::ZERO;

    for job in jobs {
        if !seen.insert(job.id.as_str()) {
            return Err(PlannerError::DuplicateJob(job.id.clone()));
        }
        if job.quantity < 0 {
            return Err(PlannerError::invalid_job(
                &job.id,
                format!("negative quantity {}", job.quantity),
            ));
        }
        if job.unit_cost.is_negative() {
            return Err(PlannerError::invalid_job(
                &job.id,
                format!("negative unit cost {}", job.unit_cost),
            ));
        }
        let cost = job
            .total_cost()
            .ok_or_else(|| PlannerError::invalid_job(&job.id, "total cost overflows"))?;
        queue_total = queue_total
            .checked_add(cost)
            .ok_or_else(|| PlannerError::invalid_job(&job.id, "queue total cost overflows"))?;
        costs.push(cost);
    }

    Ok(costs)
}
