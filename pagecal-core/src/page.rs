//! Pages of day cells.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::calendar_math::{
    days_since_week_start, end_of_month, enumerate_days, is_weekday, is_weekend, start_of_month,
};
use crate::calendar_type::CalendarType;
use crate::constants::DAYS_PER_WEEK;
use crate::day::AsCalendarDay;

/// One cell of a calendar grid. Everything but `date` is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    pub is_weekend: bool,
    pub is_weekday: bool,
}

impl DayCell {
    pub fn new(date: NaiveDate) -> Self {
        DayCell {
            day: date.day(),
            date,
            is_weekend: is_weekend(date),
            is_weekday: is_weekday(date),
        }
    }
}

/// A navigable block of cells: one month grid or one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// First in-period day: the 1st for month pages, the week start otherwise.
    pub anchor_date: NaiveDate,
    pub calendar_type: CalendarType,
    /// Chronological, never empty.
    pub cells: Vec<DayCell>,
    /// Position relative to the active page (0). `None` until the page is
    /// placed in a window.
    pub page_number: Option<i32>,
    first_weekday: Weekday,
}

impl Page {
    /// Whether `date` belongs to this page's own month or week, as opposed
    /// to the padding borrowed from a neighbouring month.
    pub fn is_in_period(&self, date: impl AsCalendarDay) -> bool {
        self.calendar_type
            .same_period(self.anchor_date, date.calendar_day(), self.first_weekday)
    }

    pub fn contains(&self, date: impl AsCalendarDay) -> bool {
        self.cell(date).is_some()
    }

    pub fn cell(&self, date: impl AsCalendarDay) -> Option<&DayCell> {
        let date = date.calendar_day();
        // cells are contiguous days, so the index is the day offset
        let offset = (date - self.first_cell().date).num_days();
        usize::try_from(offset)
            .ok()
            .and_then(|i| self.cells.get(i))
            .filter(|cell| cell.date == date)
    }

    pub fn first_cell(&self) -> &DayCell {
        &self.cells[0]
    }

    pub fn last_cell(&self) -> &DayCell {
        &self.cells[self.cells.len() - 1]
    }

    /// Cells that are not padding.
    pub fn period_cells(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter(|cell| self.is_in_period(cell.date))
    }

    /// The grid, one week per row.
    pub fn rows(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(DAYS_PER_WEEK as usize)
    }
}

/// Builds the page whose period contains `anchor`.
///
/// Month pages are padded with the tail of the previous month and the head
/// of the next one so that they form complete weeks. Week and day pages are
/// exactly the seven days of the week.
///
/// At the edges of the representable range, a week that cannot be
/// completed is dropped, so the grid is always made of whole weeks.
pub fn build_page(anchor: NaiveDate, calendar_type: CalendarType, first_weekday: Weekday) -> Page {
    let (anchor_date, first, last) = match calendar_type {
        CalendarType::Month => {
            let first_day = start_of_month(anchor);
            let last_day = end_of_month(anchor);
            (
                first_day,
                grid_start(first_day, first_weekday),
                grid_end(last_day, first_weekday),
            )
        }
        CalendarType::Week | CalendarType::Day => {
            let start = grid_start(anchor, first_weekday);
            // steps back a week when this one runs past MAX
            let end = grid_end(start, first_weekday);
            let start = end
                .checked_sub_days(Days::new(DAYS_PER_WEEK - 1))
                .unwrap_or(start);
            (start, start, end)
        }
    };

    let cells: Vec<DayCell> = enumerate_days(first, last).map(DayCell::new).collect();

    trace!(%anchor_date, %calendar_type, cells = cells.len(), "built page");

    Page {
        anchor_date,
        calendar_type,
        cells,
        page_number: None,
        first_weekday,
    }
}

/// Start of the week containing `date`, or of the following week when that
/// start is before `NaiveDate::MIN`.
fn grid_start(date: NaiveDate, first_weekday: Weekday) -> NaiveDate {
    let leading = days_since_week_start(date, first_weekday);
    date.checked_sub_days(Days::new(leading))
        .or_else(|| date.checked_add_days(Days::new(DAYS_PER_WEEK - leading)))
        .unwrap_or(date)
}

/// End of the week containing `date`, or of the preceding week when that
/// end is after `NaiveDate::MAX`.
fn grid_end(date: NaiveDate, first_weekday: Weekday) -> NaiveDate {
    let elapsed = days_since_week_start(date, first_weekday);
    date.checked_add_days(Days::new(DAYS_PER_WEEK - 1 - elapsed))
        .or_else(|| date.checked_sub_days(Days::new(elapsed + 1)))
        .unwrap_or(date)
}
