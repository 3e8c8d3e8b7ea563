//! Calendar "today" resolution.
//!
//! Weekdays are indexed Monday = 0 .. Sunday = 6 throughout the crate.

use chrono::{Datelike, Duration, Local, NaiveDate, Offset};
use serde::Serialize;

/// Short labels for the plan slots, Monday first.
pub const WEEKDAY_ABBREVS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// The current calendar day as seen by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Today {
    pub date: NaiveDate,
    pub weekday_index: usize,
    pub timezone: String,
}

impl Today {
    pub fn new(date: NaiveDate, timezone: impl Into<String>) -> Self {
        Self {
            date,
            weekday_index: monday_index(date),
            timezone: timezone.into(),
        }
    }

    pub fn iso_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// One day of the current week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekDay {
    pub date: NaiveDate,
    pub label: &'static str,
}

/// Source of "today". The host re-resolves it whenever it regains focus.
pub trait Clock {
    fn today(&self) -> Today;
}

/// Local wall clock.
#[derive(Debug, Clone, Default)]
pub struct SystemClock {
    timezone_override: Option<String>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `label` instead of the detected timezone label.
    pub fn with_timezone(label: Option<String>) -> Self {
        Self {
            timezone_override: label.filter(|l| !l.trim().is_empty()),
        }
    }

    fn timezone_label(&self) -> String {
        if let Some(label) = &self.timezone_override {
            return label.clone();
        }
        if let Ok(tz) = std::env::var("TZ") {
            let tz = tz.trim_start_matches(':').trim();
            if !tz.is_empty() {
                return tz.to_string();
            }
        }
        let offset = Local::now().offset().fix();
        if offset.local_minus_utc() == 0 {
            "UTC".to_string()
        } else {
            offset.to_string()
        }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> Today {
        Today::new(Local::now().date_naive(), self.timezone_label())
    }
}

/// Clock pinned to a given date.
#[derive(Debug, Clone)]
pub struct FixedClock(pub Today);

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self(Today::new(date, "UTC"))
    }
}

impl Clock for FixedClock {
    fn today(&self) -> Today {
        self.0.clone()
    }
}

/// Monday-based weekday index, remapped from the Sunday-based convention.
pub fn monday_index(date: NaiveDate) -> usize {
    let sunday_based = date.weekday().num_days_from_sunday() as usize;
    (sunday_based + 6) % 7
}

/// The seven days (Monday..Sunday) of the week containing `date`.
pub fn week_dates(date: NaiveDate) -> [WeekDay; 7] {
    let monday = date - Duration::days(monday_index(date) as i64);
    std::array::from_fn(|i| WeekDay {
        date: monday + Duration::days(i as i64),
        label: WEEKDAY_ABBREVS[i],
    })
}

/// Position of `date` within the week containing `today`.
pub fn index_in_week(today: NaiveDate, date: NaiveDate) -> Option<usize> {
    week_dates(today).iter().position(|d| d.date == date)
}
