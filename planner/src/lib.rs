//! Production work-queue planning against team capacity.
//!
//! Schedules an ordered queue of sub-jobs across a team's working days,
//! spending at most the team's daily monetary capacity per day and carrying
//! unfinished work over to the next working day.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::prelude::*;

pub mod calendar;
mod config;
mod error;
pub mod logging;
mod models;
pub mod planner;
pub mod validation;

pub use calendar::{NonWorkingDays, WorkingCalendar};
pub use config::{PlannerConfig, DEFAULT_MAX_DAY_ADVANCES};
pub use error::PlannerError;
pub use models::{
    CapacityPlan, DayAllocation, Job, JobCompletion, JobDetails, JobSlice, Money,
};
pub use planner::{compute_plan, CapacityPlanner};

/// Plan a team's job queue.
///
/// # Arguments
/// * `jobs` - Jobs in queue (priority) order
/// * `daily_capacity` - Team budget per working day, in minor currency units
/// * `start_date` - First day the team may work on the queue
/// * `calendar` - Non-working days (defaults to Saturday/Sunday, no holidays)
/// * `config` - Planner limits and verbosity
///
/// # Returns
/// * CapacityPlan with completion records and daily usage
///
/// # Raises
/// * ValueError for invalid capacity or jobs, or a schedule that does not terminate
#[pyfunction]
#[pyo3(name = "compute_plan", signature = (jobs, daily_capacity, start_date, calendar=None, config=None))]
fn py_compute_plan(
    jobs: Vec<Job>,
    daily_capacity: Option<Money>,
    start_date: NaiveDate,
    calendar: Option<WorkingCalendar>,
    config: Option<PlannerConfig>,
) -> PyResult<CapacityPlan> {
    let calendar = calendar.unwrap_or_default();
    let config = config.unwrap_or_default();

    CapacityPlanner::new(&jobs, daily_capacity, start_date, config)
        .and_then(|planner| planner.plan(&calendar))
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// The workqueue_planner Python module.
#[pymodule]
fn workqueue_planner(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Data types
    m.add_class::<JobDetails>()?;
    m.add_class::<Job>()?;
    m.add_class::<JobCompletion>()?;
    m.add_class::<JobSlice>()?;
    m.add_class::<DayAllocation>()?;
    m.add_class::<CapacityPlan>()?;

    // Calendar and config
    m.add_class::<WorkingCalendar>()?;
    m.add_class::<PlannerConfig>()?;

    // Planning
    m.add_function(wrap_pyfunction!(py_compute_plan, m)?)?;

    Ok(())
}
