//! Verbosity-gated logging for the capacity planner.
//!
//! Messages go to stderr and cost nothing when the planner runs silent.
//! Levels:
//! - 0: SILENT
//! - 1: PLAN (job start and completion)
//! - 2: DAYS (day advances, skipped non-working days)
//! - 3: TRACE (every budget allocation)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_PLAN: u8 = 1;
pub const VERBOSITY_DAYS: u8 = 2;
pub const VERBOSITY_TRACE: u8 = 3;

/// Log at PLAN level (verbosity >= 1).
#[macro_export]
macro_rules! log_plan {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_PLAN {
            eprintln!("[planner] {}", format_args!($($arg)*));
        }
    };
}

/// Log at DAYS level (verbosity >= 2).
#[macro_export]
macro_rules! log_days {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DAYS {
            eprintln!("[planner]   {}", format_args!($($arg)*));
        }
    };
}

/// Log at TRACE level (verbosity >= 3).
#[macro_export]
macro_rules! log_trace {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_TRACE {
            eprintln!("[planner]     {}", format_args!($($arg)*));
        }
    };
}
