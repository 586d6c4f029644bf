//! Core data types for capacity planning.

use chrono::NaiveDate;
use pyo3::prelude::*;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// A monetary amount in minor currency units (e.g. cents).
///
/// Integer arithmetic keeps the budget bookkeeping exact: a job's remaining
/// cost reaches zero precisely instead of drifting around it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, FromPyObject)]
#[pyo3(transparent)]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Amount from minor units.
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Amount from whole currency units (100 minor units each).
    ///
    /// # Panics
    /// If `major * 100` does not fit in `i64`. Use `checked_from_major`
    /// for untrusted input.
    pub const fn from_major(major: i64) -> Self {
        match Self::checked_from_major(major) {
            Some(money) => money,
            None => panic!("Money::from_major overflows i64 minor units"),
        }
    }

    /// Amount from whole currency units, `None` on overflow.
    pub const fn checked_from_major(major: i64) -> Option<Self> {
        match major.checked_mul(100) {
            Some(minor) => Some(Money(minor)),
            None => None,
        }
    }

    #[inline]
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Add two amounts, `None` on overflow.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Multiply by a unit count, `None` on overflow.
    pub fn checked_mul(self, count: i64) -> Option<Money> {
        self.0.checked_mul(count).map(Money)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl ToPyObject for Money {
    fn to_object(&self, py: Python<'_>) -> PyObject {
        self.0.to_object(py)
    }
}

impl IntoPy<PyObject> for Money {
    fn into_py(self, py: Python<'_>) -> PyObject {
        self.0.into_py(py)
    }
}

/// Descriptive sub-job fields carried through planning untouched.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JobDetails {
    #[pyo3(get, set)]
    pub order_number: Option<String>,
    #[pyo3(get, set)]
    pub customer: Option<String>,
    #[pyo3(get, set)]
    pub product: Option<String>,
    #[pyo3(get, set)]
    pub color: Option<String>,
    #[pyo3(get, set)]
    pub size: Option<String>,
}

#[pymethods]
impl JobDetails {
    #[new]
    #[pyo3(signature = (order_number=None, customer=None, product=None, color=None, size=None))]
    fn new(
        order_number: Option<String>,
        customer: Option<String>,
        product: Option<String>,
        color: Option<String>,
        size: Option<String>,
    ) -> Self {
        Self {
            order_number,
            customer,
            product,
            color,
            size,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "JobDetails(order={:?}, product={:?}, color={:?}, size={:?})",
            self.order_number, self.product, self.color, self.size
        )
    }
}

/// A queued sub-job waiting for team capacity.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub quantity: i64,
    #[pyo3(get, set)]
    pub unit_cost: Money,
    #[pyo3(get, set)]
    pub details: JobDetails,
}

impl Job {
    pub fn new(id: impl Into<String>, quantity: i64, unit_cost: Money) -> Self {
        Self {
            id: id.into(),
            quantity,
            unit_cost,
            details: JobDetails::default(),
        }
    }

    pub fn with_details(mut self, details: JobDetails) -> Self {
        self.details = details;
        self
    }

    /// `quantity * unit_cost`, `None` if the product overflows.
    pub fn total_cost(&self) -> Option<Money> {
        self.unit_cost.checked_mul(self.quantity)
    }
}

#[pymethods]
impl Job {
    #[new]
    #[pyo3(signature = (id, quantity, unit_cost, details=None))]
    fn py_new(id: String, quantity: i64, unit_cost: Money, details: Option<JobDetails>) -> Self {
        Self {
            id,
            quantity,
            unit_cost,
            details: details.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Job(id={:?}, quantity={}, unit_cost={})",
            self.id, self.quantity, self.unit_cost
        )
    }
}

/// When a job started and finished consuming team capacity.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobCompletion {
    #[pyo3(get)]
    pub job_id: String,
    #[pyo3(get)]
    pub quantity: i64,
    #[pyo3(get)]
    pub unit_cost: Money,
    #[pyo3(get)]
    pub details: JobDetails,
    #[pyo3(get)]
    pub total_cost: Money,
    #[pyo3(get)]
    pub start_date: NaiveDate,
    #[pyo3(get)]
    pub completion_date: NaiveDate,
}

impl JobCompletion {
    pub(crate) fn for_job(
        job: &Job,
        total_cost: Money,
        start_date: NaiveDate,
        completion_date: NaiveDate,
    ) -> Self {
        Self {
            job_id: job.id.clone(),
            quantity: job.quantity,
            unit_cost: job.unit_cost,
            details: job.details.clone(),
            total_cost,
            start_date,
            completion_date,
        }
    }
}

#[pymethods]
impl JobCompletion {
    fn __repr__(&self) -> String {
        format!(
            "JobCompletion(job_id={:?}, cost={}, start={}, done={})",
            self.job_id, self.total_cost, self.start_date, self.completion_date
        )
    }
}

/// Part of a job's cost absorbed on one day.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobSlice {
    #[pyo3(get)]
    pub job_id: String,
    #[pyo3(get)]
    pub amount: Money,
}

#[pymethods]
impl JobSlice {
    fn __repr__(&self) -> String {
        format!("JobSlice(job_id={:?}, amount={})", self.job_id, self.amount)
    }
}

/// Capacity usage on one working day.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayAllocation {
    #[pyo3(get)]
    pub date: NaiveDate,
    #[pyo3(get)]
    pub capacity: Money,
    #[pyo3(get)]
    pub allocated: Money,
    #[pyo3(get)]
    pub slices: Vec<JobSlice>,
}

impl DayAllocation {
    pub(crate) fn new(date: NaiveDate, capacity: Money) -> Self {
        Self {
            date,
            capacity,
            allocated: Money::ZERO,
            slices: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, job_id: &str, amount: Money) {
        self.allocated = self.allocated + amount;
        match self.slices.last_mut() {
            Some(last) if last.job_id == job_id => last.amount = last.amount + amount,
            _ => self.slices.push(JobSlice {
                job_id: job_id.to_string(),
                amount,
            }),
        }
    }
}

#[pymethods]
impl DayAllocation {
    /// Budget left unused at the end of the day.
    pub fn remaining(&self) -> Money {
        self.capacity - self.allocated
    }

    /// Fraction of the day's capacity that was used (0.0 to 1.0).
    pub fn utilization(&self) -> f64 {
        if self.capacity.is_positive() {
            self.allocated.minor_units() as f64 / self.capacity.minor_units() as f64
        } else {
            0.0
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "DayAllocation(date={}, allocated={}/{}, jobs={})",
            self.date,
            self.allocated,
            self.capacity,
            self.slices.len()
        )
    }
}

/// Result of planning a queue: per-job completions and per-day usage.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CapacityPlan {
    /// Completion records in queue order.
    #[pyo3(get)]
    pub completions: Vec<JobCompletion>,
    /// Working days that received allocation, in date order.
    /// Empty when the daily breakdown is disabled.
    #[pyo3(get)]
    pub days: Vec<DayAllocation>,
}

#[pymethods]
impl CapacityPlan {
    pub fn total_cost(&self) -> Money {
        self.completions.iter().map(|c| c.total_cost).sum()
    }

    pub fn working_days_used(&self) -> usize {
        self.days.len()
    }

    pub fn final_completion_date(&self) -> Option<NaiveDate> {
        self.completions.iter().map(|c| c.completion_date).max()
    }

    /// Mean utilization over the days that received allocation.
    pub fn average_utilization(&self) -> f64 {
        if self.days.is_empty() {
            return 0.0;
        }
        self.days.iter().map(DayAllocation::utilization).sum::<f64>() / self.days.len() as f64
    }

    fn __len__(&self) -> usize {
        self.completions.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "CapacityPlan(jobs={}, days={}, total_cost={})",
            self.completions.len(),
            self.days.len(),
            self.total_cost()
        )
    }
}
