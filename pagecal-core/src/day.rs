//! Calendar-day truncation.
//!
//! All of pagecal works on `NaiveDate`. Hosts that hold instants
//! (`DateTime<Utc>`, local datetimes, ...) pass them through
//! [`AsCalendarDay`] so that selection and lookups compare by day.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

pub trait AsCalendarDay {
    fn calendar_day(&self) -> NaiveDate;
}

impl AsCalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl AsCalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

/// Truncates in the value's own timezone, not in UTC.
impl<Tz: TimeZone> AsCalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

impl<T: AsCalendarDay + ?Sized> AsCalendarDay for &T {
    fn calendar_day(&self) -> NaiveDate {
        (**self).calendar_day()
    }
}
