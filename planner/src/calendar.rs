//! Working-day calendar: weekends plus declared holidays.

use chrono::{Datelike, NaiveDate, Weekday};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rustc_hash::FxHashSet;

/// Predicate deciding which calendar days receive no production work.
pub trait NonWorkingDays {
    fn is_non_working_day(&self, date: NaiveDate) -> bool;
}

impl<F> NonWorkingDays for F
where
    F: Fn(NaiveDate) -> bool,
{
    fn is_non_working_day(&self, date: NaiveDate) -> bool {
        self(date)
    }
}

/// Team calendar with weekend days and a holiday set.
///
/// Holidays are calendar dates; periods are inclusive on both ends and are
/// expanded into the holiday set when added.
#[pyclass]
#[derive(Clone, Debug)]
pub struct WorkingCalendar {
    weekend: Vec<Weekday>,
    holidays: FxHashSet<NaiveDate>,
}

impl Default for WorkingCalendar {
    fn default() -> Self {
        Self {
            weekend: vec![Weekday::Sat, Weekday::Sun],
            holidays: FxHashSet::default(),
        }
    }
}

impl WorkingCalendar {
    /// Saturday/Sunday weekend and the given holidays.
    pub fn new(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Replace the weekend days (e.g. a six-day production week).
    pub fn with_weekend(mut self, weekend: Vec<Weekday>) -> Self {
        self.weekend = weekend;
        self
    }

    pub fn with_holiday(mut self, date: NaiveDate) -> Self {
        self.holidays.insert(date);
        self
    }

    /// Add every date in `[start, end]` as a holiday. Reversed bounds are swapped.
    pub fn with_holiday_period(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.add_holiday_period(start, end);
        self
    }

    fn add_holiday_period(&mut self, start: NaiveDate, end: NaiveDate) {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        self.holidays.extend(start.iter_days().take_while(|day| *day <= end));
    }

    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.weekend.contains(&date.weekday())
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }
}

impl NonWorkingDays for WorkingCalendar {
    fn is_non_working_day(&self, date: NaiveDate) -> bool {
        self.is_weekend(date) || self.is_holiday(date)
    }
}

#[pymethods]
impl WorkingCalendar {
    /// Weekend days are numbered from Monday = 0 to Sunday = 6.
    #[new]
    #[pyo3(signature = (holidays=None, holiday_periods=None, weekend_days=None))]
    fn py_new(
        holidays: Option<Vec<NaiveDate>>,
        holiday_periods: Option<Vec<(NaiveDate, NaiveDate)>>,
        weekend_days: Option<Vec<u8>>,
    ) -> PyResult<Self> {
        let mut calendar = Self::new(holidays.unwrap_or_default());
        for (start, end) in holiday_periods.unwrap_or_default() {
            calendar.add_holiday_period(start, end);
        }
        if let Some(days) = weekend_days {
            calendar.weekend = days
                .into_iter()
                .map(|n| {
                    Weekday::try_from(n)
                        .map_err(|_| PyValueError::new_err(format!("Invalid weekday: {}", n)))
                })
                .collect::<PyResult<Vec<_>>>()?;
        }
        Ok(calendar)
    }

    #[pyo3(name = "is_non_working_day")]
    fn py_is_non_working_day(&self, date: NaiveDate) -> bool {
        self.is_non_working_day(date)
    }

    fn __repr__(&self) -> String {
        format!(
            "WorkingCalendar(weekend={:?}, holidays={})",
            self.weekend,
            self.holidays.len()
        )
    }
}
