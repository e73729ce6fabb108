//! Calendar granularity and the period arithmetic that goes with it.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar_math::{
    add_months, add_weeks, end_of_month, end_of_week, start_of_month, start_of_week,
    try_add_months, try_add_weeks,
};
use crate::clock::Clock;
use crate::error::{PageCalError, PageCalResult};

/// Granularity of a calendar page.
///
/// `Day` pages exactly like `Week`: both use week boundaries and step by
/// one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CalendarType {
    #[default]
    #[serde(alias = "month")]
    Month,
    #[serde(alias = "week")]
    Week,
    #[serde(alias = "day")]
    Day,
}

impl CalendarType {
    fn is_weekly(self) -> bool {
        matches!(self, CalendarType::Week | CalendarType::Day)
    }

    /// First day of the period containing `date`.
    pub fn period_start(self, date: NaiveDate, first_weekday: Weekday) -> NaiveDate {
        if self.is_weekly() {
            start_of_week(date, first_weekday)
        } else {
            start_of_month(date)
        }
    }

    /// Last day of the period containing `date`.
    pub fn period_end(self, date: NaiveDate, first_weekday: Weekday) -> NaiveDate {
        if self.is_weekly() {
            end_of_week(date, first_weekday)
        } else {
            end_of_month(date)
        }
    }

    pub fn same_period(self, a: NaiveDate, b: NaiveDate, first_weekday: Weekday) -> bool {
        self.period_start(a, first_weekday) == self.period_start(b, first_weekday)
    }

    /// Steps `periods` months or weeks away from `date` and normalizes the
    /// result to its period start.
    pub fn advance(
        self,
        date: NaiveDate,
        periods: i32,
        first_weekday: Weekday,
    ) -> PageCalResult<NaiveDate> {
        let shifted = if self.is_weekly() {
            try_add_weeks(date, i64::from(periods))?
        } else {
            try_add_months(date, periods)?
        };
        Ok(self.period_start(shifted, first_weekday))
    }

    /// Like [`CalendarType::advance`], but lands on the period containing
    /// `clock`'s today when the step is not representable.
    pub fn advance_or_today(
        self,
        date: NaiveDate,
        periods: i32,
        first_weekday: Weekday,
        clock: &dyn Clock,
    ) -> NaiveDate {
        let shifted = if self.is_weekly() {
            add_weeks(date, i64::from(periods), first_weekday, clock)
        } else {
            add_months(date, periods, clock)
        };
        self.period_start(shifted, first_weekday)
    }

    /// Signed number of whole periods from the period of `from` to the
    /// period of `to`.
    pub fn periods_between(self, from: NaiveDate, to: NaiveDate, first_weekday: Weekday) -> i64 {
        if self.is_weekly() {
            let from = start_of_week(from, first_weekday);
            let to = start_of_week(to, first_weekday);
            (to - from).num_days() / 7
        } else {
            let months = |d: NaiveDate| i64::from(d.year()) * 12 + i64::from(d.month0());
            months(to) - months(from)
        }
    }

    /// Rows of 7 cells a page of this type needs at most.
    pub fn grid_rows(self) -> usize {
        match self {
            CalendarType::Month => 6,
            CalendarType::Week | CalendarType::Day => 1,
        }
    }
}

impl fmt::Display for CalendarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarType::Month => write!(f, "Month"),
            CalendarType::Week => write!(f, "Week"),
            CalendarType::Day => write!(f, "Day"),
        }
    }
}

impl FromStr for CalendarType {
    type Err = PageCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "month" => Ok(CalendarType::Month),
            "week" => Ok(CalendarType::Week),
            "day" => Ok(CalendarType::Day),
            other => Err(PageCalError::Config(format!(
                "Unknown calendar type '{other}'. Expected Month, Week or Day"
            ))),
        }
    }
}
