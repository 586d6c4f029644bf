//! Run state for a single planning pass.

use chrono::NaiveDate;

use crate::calendar::NonWorkingDays;
use crate::error::PlannerError;
use crate::log_days;
use crate::models::Money;

/// Date cursor and the budget left on the cursor's day.
///
/// The cursor only moves forward. Every calendar-day step, including steps
/// over non-working days, counts against `limit`.
#[derive(Clone, Debug)]
pub struct PlanCursor {
    date: NaiveDate,
    remaining_budget: Money,
    daily_capacity: Money,
    advances: u32,
    limit: u32,
    verbosity: u8,
}

impl PlanCursor {
    pub fn new(start_date: NaiveDate, daily_capacity: Money, limit: u32, verbosity: u8) -> Self {
        Self {
            date: start_date,
            remaining_budget: daily_capacity,
            daily_capacity,
            advances: 0,
            limit,
            verbosity,
        }
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[inline]
    pub fn remaining_budget(&self) -> Money {
        self.remaining_budget
    }

    #[inline]
    pub fn advances(&self) -> u32 {
        self.advances
    }

    /// Absorb `amount` from today's budget. Caller keeps it within the budget.
    pub fn consume(&mut self, amount: Money) {
        debug_assert!(amount <= self.remaining_budget);
        self.remaining_budget = self.remaining_budget - amount;
    }

    /// Move past non-working days until the cursor sits on a working day.
    pub fn settle<C>(&mut self, calendar: &C) -> Result<(), PlannerError>
    where
        C: NonWorkingDays + ?Sized,
    {
        while calendar.is_non_working_day(self.date) {
            log_days!(self.verbosity, "skip non-working day {}", self.date);
            self.step()?;
        }
        Ok(())
    }

    /// Leave the current day and land on the next working day with a full budget.
    pub fn advance_to_next_working_day<C>(&mut self, calendar: &C) -> Result<(), PlannerError>
    where
        C: NonWorkingDays + ?Sized,
    {
        self.step()?;
        self.settle(calendar)?;
        log_days!(
            self.verbosity,
            "advance to {} (budget {})",
            self.date,
            self.remaining_budget
        );
        Ok(())
    }

    fn step(&mut self) -> Result<(), PlannerError> {
        if self.advances >= self.limit {
            return Err(PlannerError::NonTerminatingSchedule { limit: self.limit });
        }
        self.date = self
            .date
            .succ_opt()
            .ok_or(PlannerError::DateOutOfRange(self.date))?;
        self.advances += 1;
        self.remaining_budget = self.daily_capacity;
        Ok(())
    }
}
