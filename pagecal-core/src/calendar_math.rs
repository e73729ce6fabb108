//! Gregorian calendar arithmetic.
//!
//! Pure functions over `NaiveDate`. Weekday numbering follows the
//! Sunday=1 .. Saturday=7 convention; the first day of the week is a
//! parameter rather than ambient locale state.
//!
//! Boundary functions saturate at the edges of chrono's representable
//! range instead of panicking.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use tracing::warn;

use crate::clock::Clock;
use crate::constants::DAYS_PER_WEEK;
use crate::error::{PageCalError, PageCalResult};

/// Number of days between the start of `date`'s week and `date` (0..=6).
pub fn days_since_week_start(date: NaiveDate, first_weekday: Weekday) -> u64 {
    let day = date.weekday().num_days_from_sunday();
    let first = first_weekday.num_days_from_sunday();
    u64::from((day + 7 - first) % 7)
}

pub fn start_of_week(date: NaiveDate, first_weekday: Weekday) -> NaiveDate {
    date.checked_sub_days(Days::new(days_since_week_start(date, first_weekday)))
        .unwrap_or(NaiveDate::MIN)
}

/// Always `start_of_week + 6 days`.
pub fn end_of_week(date: NaiveDate, first_weekday: Weekday) -> NaiveDate {
    start_of_week(date, first_weekday)
        .checked_add_days(Days::new(DAYS_PER_WEEK - 1))
        .unwrap_or(NaiveDate::MAX)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    (28..=31)
        .rev()
        .find_map(|day| NaiveDate::from_ymd_opt(date.year(), date.month(), day))
        .unwrap_or(date)
}

/// Calendar-aware month arithmetic. The day is clamped to the length of the
/// target month (Jan 31 + 1 month = Feb 28/29).
pub fn try_add_months(date: NaiveDate, months: i32) -> PageCalResult<NaiveDate> {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };

    shifted.ok_or(PageCalError::DateOutOfRange {
        date,
        amount: i64::from(months),
        unit: "months",
    })
}

pub fn try_add_weeks(date: NaiveDate, weeks: i64) -> PageCalResult<NaiveDate> {
    let out_of_range = || PageCalError::DateOutOfRange {
        date,
        amount: weeks,
        unit: "weeks",
    };

    let days = weeks
        .unsigned_abs()
        .checked_mul(DAYS_PER_WEEK)
        .map(Days::new)
        .ok_or_else(out_of_range)?;

    let shifted = if weeks >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    };

    shifted.ok_or_else(out_of_range)
}

/// Like [`try_add_months`], but falls back to the start of `clock`'s current
/// month when the result is not representable.
pub fn add_months(date: NaiveDate, months: i32, clock: &dyn Clock) -> NaiveDate {
    try_add_months(date, months).unwrap_or_else(|e| {
        warn!(error = %e, "month arithmetic failed, falling back to current month");
        start_of_month(clock.today())
    })
}

/// Like [`try_add_weeks`], but falls back to the start of `clock`'s current
/// week when the result is not representable.
pub fn add_weeks(
    date: NaiveDate,
    weeks: i64,
    first_weekday: Weekday,
    clock: &dyn Clock,
) -> NaiveDate {
    try_add_weeks(date, weeks).unwrap_or_else(|e| {
        warn!(error = %e, "week arithmetic failed, falling back to current week");
        start_of_week(clock.today(), first_weekday)
    })
}

/// Every day from `from` to `to`, both inclusive. Empty when `from > to`.
///
/// Steps with `succ_opt` so that `NaiveDate::MAX` is yielded when it is `to`.
pub fn enumerate_days(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(from), |day| day.succ_opt()).take_while(move |day| *day <= to)
}

/// 1 = Sunday .. 7 = Saturday.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().number_from_sunday()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(weekday_index(date), 1 | 7)
}

pub fn is_weekday(date: NaiveDate) -> bool {
    !is_weekend(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;


    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock(date(2024, 2, 15))
    }

    #[test]
    fn test_week_bounds_sunday_start() {
        let d = date(2024, 2, 15); // Thursday
        assert_eq!(start_of_week(d, Weekday::Sun), date(2024, 2, 11));
        assert_eq!(end_of_week(d, Weekday::Sun), date(2024, 2, 17));
    }

    #[test]
    fn test_week_bounds_monday_start() {
        let d = date(2024, 2, 11); // Sunday
        assert_eq!(start_of_week(d, Weekday::Mon), date(2024, 2, 5));
        assert_eq!(end_of_week(d, Weekday::Mon), date(2024, 2, 11));
    }

    #[test]
    fn test_week_contains_date_for_every_day_of_a_year() {
        for d in enumerate_days(date(2023, 1, 1), date(2024, 12, 31)) {
            for first in [Weekday::Sun, Weekday::Mon, Weekday::Sat] {
                let start = start_of_week(d, first);
                let end = end_of_week(d, first);
                assert!(start <= d && d <= end, "{d} not in [{start}, {end}]");
                assert_eq!((end - start).num_days(), 6);
                assert_eq!(start.weekday(), first);
            }
        }
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(start_of_month(date(2024, 2, 15)), date(2024, 2, 1));
        assert_eq!(end_of_month(date(2024, 2, 15)), date(2024, 2, 29));
        assert_eq!(end_of_month(date(2023, 2, 1)), date(2023, 2, 28));
        assert_eq!(end_of_month(date(2024, 12, 31)), date(2024, 12, 31));
        assert_eq!(end_of_month(date(2024, 4, 10)), date(2024, 4, 30));
    }

    #[test]
    fn test_add_months_commutes_with_start_of_month() {
        for d in enumerate_days(date(2023, 1, 1), date(2024, 12, 31)) {
            assert!(start_of_month(d) <= d && d <= end_of_month(d));
            assert_eq!(
                add_months(start_of_month(d), 1, &clock()),
                start_of_month(add_months(d, 1, &clock()))
            );
        }
    }

    #[test]
    fn test_add_months_clamps_day() {
        assert_eq!(add_months(date(2024, 1, 31), 1, &clock()), date(2024, 2, 29));
        assert_eq!(add_months(date(2024, 3, 31), -1, &clock()), date(2024, 2, 29));
        assert_eq!(add_months(date(2024, 1, 15), -13, &clock()), date(2022, 12, 15));
    }

    #[test]
    fn test_add_weeks() {
        assert_eq!(
            add_weeks(date(2024, 2, 11), 3, Weekday::Sun, &clock()),
            date(2024, 3, 3)
        );
        assert_eq!(
            add_weeks(date(2024, 2, 11), -2, Weekday::Sun, &clock()),
            date(2024, 1, 28)
        );
    }

    #[test]
    fn test_arithmetic_overflow_is_an_error_not_a_panic() {
        assert!(matches!(
            try_add_months(NaiveDate::MAX, 1),
            Err(PageCalError::DateOutOfRange { unit: "months", .. })
        ));
        assert!(try_add_weeks(NaiveDate::MIN, -1).is_err());
        assert!(try_add_weeks(date(2024, 1, 1), i64::MAX).is_err());
    }

    #[test]
    fn test_fallback_uses_injected_clock() {
        assert_eq!(add_months(NaiveDate::MAX, 1, &clock()), date(2024, 2, 1));
        assert_eq!(add_months(NaiveDate::MIN, -1, &clock()), date(2024, 2, 1));

        assert_eq!(
            add_weeks(NaiveDate::MIN, -1, Weekday::Mon, &clock()),
            date(2024, 2, 12)
        );
        assert_eq!(
            add_weeks(NaiveDate::MAX, 1, Weekday::Sun, &clock()),
            date(2024, 2, 11)
        );
    }

    #[test]
    fn test_enumerate_days() {
        let days: Vec<_> = enumerate_days(date(2024, 2, 27), date(2024, 3, 2)).collect();
        assert_eq!(
            days,
            vec![
                date(2024, 2, 27),
                date(2024, 2, 28),
                date(2024, 2, 29),
                date(2024, 3, 1),
                date(2024, 3, 2),
            ]
        );

        assert_eq!(enumerate_days(date(2024, 3, 2), date(2024, 3, 2)).count(), 1);
        assert_eq!(enumerate_days(date(2024, 3, 3), date(2024, 3, 2)).count(), 0);
    }

    #[test]
    fn test_enumerate_days_includes_range_edges() {
        let last: Vec<_> = enumerate_days(NaiveDate::MAX, NaiveDate::MAX).collect();
        assert_eq!(last, vec![NaiveDate::MAX]);

        let before_max = NaiveDate::MAX.pred_opt().unwrap();
        assert_eq!(enumerate_days(before_max, NaiveDate::MAX).count(), 2);

        let first: Vec<_> = enumerate_days(NaiveDate::MIN, NaiveDate::MIN).collect();
        assert_eq!(first, vec![NaiveDate::MIN]);
    }

    #[test]
    fn test_weekday_classification() {
        assert_eq!(weekday_index(date(2024, 2, 11)), 1); // Sunday
        assert_eq!(weekday_index(date(2024, 2, 17)), 7); // Saturday
        assert!(is_weekend(date(2024, 2, 11)));
        assert!(is_weekend(date(2024, 2, 17)));
        assert!(is_weekday(date(2024, 2, 15)));
        assert!(!is_weekday(date(2024, 2, 17)));
    }
}
