//! Capacity planner: allocates a job queue to a team's working days.
//!
//! `compute_plan` is the plain entry point returning completion records;
//! `CapacityPlanner` takes an explicit config and also reports how much
//! capacity each working day absorbed.

mod core;
mod state;

pub use self::core::{compute_plan, CapacityPlanner};
pub use state::PlanCursor;
