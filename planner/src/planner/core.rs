//! Queue-order capacity allocation across working days.

use chrono::NaiveDate;

use crate::calendar::NonWorkingDays;
use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::models::{CapacityPlan, DayAllocation, Job, JobCompletion, Money};
use crate::validation::{validate_capacity, validate_queue};
use crate::{log_plan, log_trace};

use super::state::PlanCursor;

/// Plans a team's job queue against its daily monetary capacity.
///
/// Jobs are served strictly in queue order. A job absorbs as much of the
/// current day's budget as it needs; when the budget runs out first, the
/// rest of the job carries over to the next working day. A job that
/// finishes mid-day leaves the remaining budget to the next job.
pub struct CapacityPlanner<'a> {
    jobs: &'a [Job],
    costs: Vec<Money>,
    daily_capacity: Money,
    start_date: NaiveDate,
    config: PlannerConfig,
}

impl<'a> CapacityPlanner<'a> {
    /// Validate inputs and build a planner.
    ///
    /// # Errors
    /// * `InvalidCapacity` if the capacity is missing or not positive
    /// * `InvalidJob` for negative quantity or unit cost, or an overflowing cost
    /// * `DuplicateJob` if two jobs share an id
    pub fn new(
        jobs: &'a [Job],
        daily_capacity: Option<Money>,
        start_date: NaiveDate,
        config: PlannerConfig,
    ) -> Result<Self, PlannerError> {
        let daily_capacity = validate_capacity(daily_capacity)?;
        let costs = validate_queue(jobs)?;
        Ok(Self {
            jobs,
            costs,
            daily_capacity,
            start_date,
            config,
        })
    }

    /// Run the allocation and return completions plus the daily breakdown.
    ///
    /// # Errors
    /// * `NonTerminatingSchedule` if the cursor exceeds `max_day_advances`
    /// * `DateOutOfRange` if the cursor runs past the last representable date
    pub fn plan<C>(&self, calendar: &C) -> Result<CapacityPlan, PlannerError>
    where
        C: NonWorkingDays + ?Sized,
    {
        let verbosity = self.config.verbosity;
        let mut cursor = PlanCursor::new(
            self.start_date,
            self.daily_capacity,
            self.config.max_day_advances,
            verbosity,
        );
        let mut completions = Vec::with_capacity(self.jobs.len());
        let mut days: Vec<DayAllocation> = Vec::new();

        log_plan!(
            verbosity,
            "planning {} jobs from {} at {} per day",
            self.jobs.len(),
            self.start_date,
            self.daily_capacity
        );

        for (job, &cost) in self.jobs.iter().zip(&self.costs) {
            cursor.settle(calendar)?;

            if cost.is_zero() {
                log_plan!(verbosity, "job {} has no cost, done {}", job.id, cursor.date());
                completions.push(JobCompletion::for_job(
                    job,
                    cost,
                    cursor.date(),
                    cursor.date(),
                ));
                continue;
            }

            let mut remaining = cost;
            let mut start_date: Option<NaiveDate> = None;

            while remaining.is_positive() {
                if cursor.remaining_budget().is_zero() {
                    cursor.advance_to_next_working_day(calendar)?;
                }

                let amount = remaining.min(cursor.remaining_budget());
                cursor.consume(amount);
                remaining = remaining - amount;

                if start_date.is_none() {
                    log_plan!(verbosity, "job {} starts {}", job.id, cursor.date());
                    start_date = Some(cursor.date());
                }
                log_trace!(
                    verbosity,
                    "{}: job {} absorbs {}, {} left on job, {} left today",
                    cursor.date(),
                    job.id,
                    amount,
                    remaining,
                    cursor.remaining_budget()
                );

                if self.config.record_daily_breakdown {
                    self.record_slice(&mut days, cursor.date(), &job.id, amount);
                }
            }

            let completion_date = cursor.date();
            log_plan!(verbosity, "job {} completes {}", job.id, completion_date);
            completions.push(JobCompletion::for_job(
                job,
                cost,
                start_date.unwrap_or(completion_date),
                completion_date,
            ));
        }

        log_plan!(
            verbosity,
            "plan complete: {} jobs, {} day advances",
            completions.len(),
            cursor.advances()
        );

        Ok(CapacityPlan { completions, days })
    }

    fn record_slice(
        &self,
        days: &mut Vec<DayAllocation>,
        date: NaiveDate,
        job_id: &str,
        amount: Money,
    ) {
        match days.last_mut() {
            Some(day) if day.date == date => day.record(job_id, amount),
            _ => {
                let mut day = DayAllocation::new(date, self.daily_capacity);
                day.record(job_id, amount);
                days.push(day);
            }
        }
    }
}

/// Schedule `jobs` in queue order against `daily_capacity`, starting on
/// `start_date` and skipping days the calendar marks as non-working.
///
/// Returns one completion record per job, in input order. An empty queue
/// yields an empty list. Any invalid input fails the whole call.
pub fn compute_plan<C>(
    jobs: &[Job],
    daily_capacity: Option<Money>,
    start_date: NaiveDate,
    calendar: &C,
) -> Result<Vec<JobCompletion>, PlannerError>
where
    C: NonWorkingDays + ?Sized,
{
    let config = PlannerConfig {
        record_daily_breakdown: false,
        ..PlannerConfig::default()
    };
    let plan = CapacityPlanner::new(jobs, daily_capacity, start_date, config)?.plan(calendar)?;
    Ok(plan.completions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::WorkingCalendar;
    use crate::models::JobDetails;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn job(id: &str, quantity: i64, unit_cost: i64) -> Job {
        Job::new(id, quantity, Money::from_major(unit_cost))
    }

    fn plan_with(
        jobs: &[Job],
        capacity: i64,
        start: NaiveDate,
        calendar: &WorkingCalendar,
    ) -> CapacityPlan {
        CapacityPlanner::new(
            jobs,
            Some(Money::from_major(capacity)),
            start,
            PlannerConfig::default(),
        )
        .unwrap()
        .plan(calendar)
        .unwrap()
    }

    fn monday() -> NaiveDate {
        d(2025, 1, 6)
    }

    #[test]
    fn test_job_split_across_two_days() {
        let jobs = vec![job("a", 10, 350)];
        let result = compute_plan(
            &jobs,
            Some(Money::from_major(2000)),
            monday(),
            &WorkingCalendar::default(),
        )
        .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].total_cost, Money::from_major(3500));
        assert_eq!(result[0].start_date, d(2025, 1, 6));
        assert_eq!(result[0].completion_date, d(2025, 1, 7));
    }

    #[test]
    fn test_second_job_uses_leftover_budget() {
        let jobs = vec![job("a", 1, 1000), job("b", 1, 500)];
        let plan = plan_with(&jobs, 1200, monday(), &WorkingCalendar::default());

        assert_eq!(plan.completions[0].completion_date, d(2025, 1, 6));
        assert_eq!(plan.completions[1].start_date, d(2025, 1, 6));
        assert_eq!(plan.completions[1].completion_date, d(2025, 1, 7));

        assert_eq!(plan.days.len(), 2);
        assert_eq!(plan.days[0].allocated, Money::from_major(1200));
        assert_eq!(plan.days[0].slices.len(), 2);
        assert_eq!(plan.days[0].slices[1].amount, Money::from_major(200));
        assert_eq!(plan.days[1].allocated, Money::from_major(300));
    }

    #[test]
    fn test_second_job_skips_tuesday_holiday() {
        let jobs = vec![job("a", 1, 1000), job("b", 1, 500)];
        let calendar = WorkingCalendar::new([d(2025, 1, 7)]);
        let plan = plan_with(&jobs, 1200, monday(), &calendar);

        assert_eq!(plan.completions[1].start_date, d(2025, 1, 6));
        assert_eq!(plan.completions[1].completion_date, d(2025, 1, 8));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let jobs = vec![job("a", 1, 100)];
        let err = compute_plan(
            &jobs,
            Some(Money::ZERO),
            monday(),
            &WorkingCalendar::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PlannerError::InvalidCapacity(_)));
    }

    #[test]
    fn test_missing_capacity_rejected() {
        let err = compute_plan(&[], None, monday(), &WorkingCalendar::default()).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidCapacity(_)));
    }

    #[test]
    fn test_zero_quantity_job_consumes_nothing() {
        let jobs = vec![job("empty", 0, 350), job("b", 1, 1000)];
        let plan = plan_with(&jobs, 1000, monday(), &WorkingCalendar::default());

        let empty = &plan.completions[0];
        assert_eq!(empty.total_cost, Money::ZERO);
        assert_eq!(empty.start_date, empty.completion_date);
        assert_eq!(empty.start_date, d(2025, 1, 6));

        // Full budget still available for the next job on the same day
        assert_eq!(plan.completions[1].start_date, d(2025, 1, 6));
        assert_eq!(plan.completions[1].completion_date, d(2025, 1, 6));
        assert_eq!(plan.days.len(), 1);
        assert_eq!(plan.days[0].slices.len(), 1);
    }

    #[test]
    fn test_zero_quantity_job_first_on_weekend_start() {
        // Saturday start: the free job lands on Monday, and the next job
        // still gets Monday's full budget.
        let jobs = vec![job("free", 0, 350), job("b", 1, 1000)];
        let plan = plan_with(&jobs, 1000, d(2025, 1, 4), &WorkingCalendar::default());

        let free = &plan.completions[0];
        assert_eq!(free.start_date, d(2025, 1, 6));
        assert_eq!(free.completion_date, d(2025, 1, 6));

        assert_eq!(plan.completions[1].start_date, d(2025, 1, 6));
        assert_eq!(plan.completions[1].completion_date, d(2025, 1, 6));
        assert_eq!(plan.days.len(), 1);
        assert_eq!(plan.days[0].allocated, Money::from_major(1000));
    }

    #[test]
    fn test_zero_quantity_job_first_skips_weekend_and_holiday() {
        let jobs = vec![job("free", 0, 350)];
        let calendar = WorkingCalendar::new([d(2025, 1, 6)]);
        let result = compute_plan(
            &jobs,
            Some(Money::from_major(1000)),
            d(2025, 1, 4),
            &calendar,
        )
        .unwrap();

        assert_eq!(result[0].start_date, d(2025, 1, 7));
        assert_eq!(result[0].completion_date, d(2025, 1, 7));
    }

    #[test]
    fn test_overflowing_queue_total_fails_before_planning() {
        let big = Money::from_minor(5_000_000_000_000_000_000);
        let jobs = vec![Job::new("a", 1, big), Job::new("b", 1, big)];
        let err = CapacityPlanner::new(
            &jobs,
            Some(Money::from_minor(i64::MAX)),
            monday(),
            PlannerConfig::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, PlannerError::InvalidJob { job_id, .. } if job_id == "b"));
    }

    #[test]
    fn test_saturday_start_with_monday_holiday() {
        let jobs = vec![job("a", 1, 100)];
        let calendar = WorkingCalendar::new([d(2025, 1, 6)]);
        let result = compute_plan(
            &jobs,
            Some(Money::from_major(1000)),
            d(2025, 1, 4),
            &calendar,
        )
        .unwrap();

        assert_eq!(result[0].start_date, d(2025, 1, 7));
        assert_eq!(result[0].completion_date, d(2025, 1, 7));
    }

    #[test]
    fn test_empty_queue() {
        let result = compute_plan(
            &[],
            Some(Money::from_major(1000)),
            monday(),
            &WorkingCalendar::default(),
        )
        .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_exact_exhaustion_moves_next_job_to_next_day() {
        let jobs = vec![job("a", 1, 1000), job("b", 1, 300)];
        let plan = plan_with(&jobs, 1000, monday(), &WorkingCalendar::default());

        assert_eq!(plan.completions[0].completion_date, d(2025, 1, 6));
        assert_eq!(plan.completions[1].start_date, d(2025, 1, 7));
        assert_eq!(plan.completions[1].completion_date, d(2025, 1, 7));
    }

    #[test]
    fn test_zero_cost_job_after_exact_exhaustion_stays_on_same_day() {
        let jobs = vec![job("a", 1, 1000), job("free", 5, 0)];
        let plan = plan_with(&jobs, 1000, monday(), &WorkingCalendar::default());

        assert_eq!(plan.completions[1].start_date, d(2025, 1, 6));
        assert_eq!(plan.completions[1].completion_date, d(2025, 1, 6));
    }

    #[test]
    fn test_long_job_spans_weekend() {
        // Thursday start, 4 days of work -> Thu, Fri, Mon, Tue
        let jobs = vec![job("a", 4, 500)];
        let plan = plan_with(&jobs, 500, d(2025, 1, 9), &WorkingCalendar::default());

        assert_eq!(plan.completions[0].start_date, d(2025, 1, 9));
        assert_eq!(plan.completions[0].completion_date, d(2025, 1, 14));
        let dates: Vec<NaiveDate> = plan.days.iter().map(|day| day.date).collect();
        assert_eq!(
            dates,
            vec![d(2025, 1, 9), d(2025, 1, 10), d(2025, 1, 13), d(2025, 1, 14)]
        );
    }

    #[test]
    fn test_details_are_echoed() {
        let details = JobDetails {
            order_number: Some("SO-1042".to_string()),
            customer: Some("Acme".to_string()),
            product: Some("Polo".to_string()),
            color: Some("Navy".to_string()),
            size: Some("L".to_string()),
        };
        let jobs = vec![job("a", 3, 10).with_details(details.clone())];
        let result = compute_plan(
            &jobs,
            Some(Money::from_major(100)),
            monday(),
            &WorkingCalendar::default(),
        )
        .unwrap();

        assert_eq!(result[0].details, details);
        assert_eq!(result[0].quantity, 3);
        assert_eq!(result[0].unit_cost, Money::from_major(10));
    }

    #[test]
    fn test_negative_quantity_fails_whole_call() {
        let jobs = vec![job("a", 1, 100), job("b", -2, 100)];
        let err = compute_plan(
            &jobs,
            Some(Money::from_major(1000)),
            monday(),
            &WorkingCalendar::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PlannerError::InvalidJob { job_id, .. } if job_id == "b"));
    }

    #[test]
    fn test_all_holiday_calendar_does_not_loop() {
        let jobs = vec![job("a", 1, 100)];
        let config = PlannerConfig {
            max_day_advances: 50,
            ..PlannerConfig::default()
        };
        let planner =
            CapacityPlanner::new(&jobs, Some(Money::from_major(1000)), monday(), config).unwrap();
        let err = planner.plan(&|_: NaiveDate| true).unwrap_err();
        assert_eq!(err, PlannerError::NonTerminatingSchedule { limit: 50 });
    }

    #[test]
    fn test_huge_job_hits_ceiling() {
        let jobs = vec![job("a", 1_000_000, 1_000)];
        let err = compute_plan(
            &jobs,
            Some(Money::from_minor(1)),
            monday(),
            &WorkingCalendar::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PlannerError::NonTerminatingSchedule { .. }));
    }

    #[test]
    fn test_breakdown_can_be_disabled() {
        let jobs = vec![job("a", 10, 350)];
        let config = PlannerConfig {
            record_daily_breakdown: false,
            ..PlannerConfig::default()
        };
        let plan = CapacityPlanner::new(&jobs, Some(Money::from_major(2000)), monday(), config)
            .unwrap()
            .plan(&WorkingCalendar::default())
            .unwrap();
        assert!(plan.days.is_empty());
        assert_eq!(plan.completions[0].completion_date, d(2025, 1, 7));
    }

    #[test]
    fn test_plan_properties_hold() {
        let jobs = vec![
            job("a", 7, 130),
            job("b", 0, 80),
            job("c", 12, 95),
            job("d", 1, 2500),
            job("e", 3, 0),
            job("f", 40, 17),
        ];
        let calendar = WorkingCalendar::new([d(2025, 1, 8), d(2025, 1, 15)])
            .with_holiday_period(d(2025, 1, 20), d(2025, 1, 21));
        let plan = plan_with(&jobs, 900, d(2025, 1, 4), &calendar);

        // Conservation of cost
        let expected: Money = jobs.iter().map(|j| j.total_cost().unwrap()).sum();
        assert_eq!(plan.total_cost(), expected);
        let allocated: Money = plan.days.iter().map(|day| day.allocated).sum();
        assert_eq!(allocated, expected);

        // Ordered dates, never on a non-working day
        let mut previous_start = d(2025, 1, 4);
        for completion in &plan.completions {
            assert!(completion.start_date <= completion.completion_date);
            assert!(completion.start_date >= previous_start);
            assert!(!calendar.is_non_working_day(completion.completion_date));
            previous_start = completion.start_date;
        }

        // No day over capacity or on a non-working day
        for day in &plan.days {
            assert!(day.allocated <= day.capacity);
            assert!(!calendar.is_non_working_day(day.date));
        }

        // Pure: same inputs, same plan
        assert_eq!(plan_with(&jobs, 900, d(2025, 1, 4), &calendar), plan);
    }

    #[test]
    fn test_queue_order_is_priority() {
        let forward = vec![job("a", 1, 800), job("b", 1, 800)];
        let reversed = vec![job("b", 1, 800), job("a", 1, 800)];
        let cal = WorkingCalendar::default();

        let first = plan_with(&forward, 1000, monday(), &cal);
        let second = plan_with(&reversed, 1000, monday(), &cal);

        assert_eq!(first.completions[0].job_id, "a");
        assert_eq!(first.completions[0].completion_date, d(2025, 1, 6));
        assert_eq!(second.completions[0].job_id, "b");
        assert_eq!(second.completions[0].completion_date, d(2025, 1, 6));
        assert_eq!(second.completions[1].completion_date, d(2025, 1, 7));
    }
}
