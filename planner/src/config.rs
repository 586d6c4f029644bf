//! Configuration for the capacity planner.

use pyo3::prelude::*;

/// Ten years of calendar days.
pub const DEFAULT_MAX_DAY_ADVANCES: u32 = 3660;

/// Planner limits and diagnostics.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Maximum calendar-day steps the cursor may take in one run,
    /// counting skipped non-working days.
    #[pyo3(get, set)]
    pub max_day_advances: u32,
    /// Logging verbosity (0 = silent, 3 = trace)
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Record per-day allocations in the resulting plan
    #[pyo3(get, set)]
    pub record_daily_breakdown: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_day_advances: DEFAULT_MAX_DAY_ADVANCES,
            verbosity: 0,
            record_daily_breakdown: true,
        }
    }
}

#[pymethods]
impl PlannerConfig {
    #[new]
    #[pyo3(signature = (max_day_advances=None, verbosity=None, record_daily_breakdown=None))]
    fn new(
        max_day_advances: Option<u32>,
        verbosity: Option<u8>,
        record_daily_breakdown: Option<bool>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            max_day_advances: max_day_advances.unwrap_or(defaults.max_day_advances),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            record_daily_breakdown: record_daily_breakdown
                .unwrap_or(defaults.record_daily_breakdown),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "PlannerConfig(max_day_advances={}, verbosity={}, record_daily_breakdown={})",
            self.max_day_advances, self.verbosity, self.record_daily_breakdown
        )
    }
}
