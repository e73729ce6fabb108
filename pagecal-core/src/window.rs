//! Sliding window of materialized pages around the active page.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Weekday};
use tracing::{debug, warn};

use crate::calendar_type::CalendarType;
use crate::constants::DEFAULT_WINDOW_RADIUS;
use crate::day::AsCalendarDay;
use crate::page::{Page, build_page};

/// What an [`PaginationWindow::ensure_window`] call changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowUpdate {
    pub inserted: usize,
    pub evicted: usize,
}

impl WindowUpdate {
    pub fn is_noop(&self) -> bool {
        self.inserted == 0 && self.evicted == 0
    }
}

/// Pages keyed by anchor date, so iteration is always past to future.
///
/// Page numbers are relative to the active page and are rewritten whenever
/// the active page moves. Pages further than `radius` from the active page
/// are evicted.
#[derive(Debug, Clone)]
pub struct PaginationWindow {
    calendar_type: CalendarType,
    first_weekday: Weekday,
    radius: u32,
    active_anchor: Option<NaiveDate>,
    pages: BTreeMap<NaiveDate, Page>,
}

impl PaginationWindow {
    pub fn new(calendar_type: CalendarType, first_weekday: Weekday) -> Self {
        Self::with_radius(calendar_type, first_weekday, DEFAULT_WINDOW_RADIUS)
    }

    pub fn with_radius(calendar_type: CalendarType, first_weekday: Weekday, radius: u32) -> Self {
        PaginationWindow {
            calendar_type,
            first_weekday,
            radius: radius.max(1),
            active_anchor: None,
            pages: BTreeMap::new(),
        }
    }

    /// Makes sure the active page and `radius` pages on either side of it
    /// are present. Calling it again with a date in the same period is a
    /// no-op.
    pub fn ensure_window(&mut self, active_date: impl AsCalendarDay) -> WindowUpdate {
        let active = self
            .calendar_type
            .period_start(active_date.calendar_day(), self.first_weekday);

        if self.active_anchor != Some(active) {
            self.active_anchor = Some(active);
            self.renumber(active);
        }

        let mut update = WindowUpdate::default();

        if self.insert(active, 0) {
            update.inserted += 1;
        }

        let radius = self.radius as i32;
        let offsets = (1..=radius).chain((1..=radius).map(|n| -n));
        for offset in offsets {
            if self.page(offset).is_some() {
                continue;
            }
            match self
                .calendar_type
                .advance(active, offset, self.first_weekday)
            {
                Ok(anchor) => {
                    if self.insert(anchor, offset) {
                        update.inserted += 1;
                    }
                }
                Err(e) => warn!(error = %e, offset, "skipping page outside representable range"),
            }
        }

        update.evicted = self.evict();

        if !update.is_noop() {
            debug!(
                %active,
                inserted = update.inserted,
                evicted = update.evicted,
                pages = self.pages.len(),
                "window updated"
            );
        }

        update
    }

    fn insert(&mut self, anchor: NaiveDate, page_number: i32) -> bool {
        if self.pages.contains_key(&anchor) {
            return false;
        }
        let mut page = build_page(anchor, self.calendar_type, self.first_weekday);
        page.page_number = Some(page_number);
        self.pages.insert(anchor, page);
        true
    }

    fn renumber(&mut self, active: NaiveDate) {
        for (anchor, page) in self.pages.iter_mut() {
            let distance = self
                .calendar_type
                .periods_between(active, *anchor, self.first_weekday);
            page.page_number = i32::try_from(distance).ok();
        }
    }

    fn evict(&mut self) -> usize {
        let radius = self.radius as i32;
        let before = self.pages.len();
        self.pages.retain(|_, page| {
            page.page_number
                .is_some_and(|number| (-radius..=radius).contains(&number))
        });
        before - self.pages.len()
    }

    /// The page with relative number `page_number`, if materialized.
    pub fn page(&self, page_number: i32) -> Option<&Page> {
        self.pages
            .values()
            .find(|page| page.page_number == Some(page_number))
    }

    /// The page whose own period contains `date`, if materialized.
    pub fn page_for(&self, date: impl AsCalendarDay) -> Option<&Page> {
        let anchor = self
            .calendar_type
            .period_start(date.calendar_day(), self.first_weekday);
        self.pages.get(&anchor)
    }

    pub fn active_page(&self) -> Option<&Page> {
        self.page(0)
    }

    pub fn active_anchor(&self) -> Option<NaiveDate> {
        self.active_anchor
    }

    /// Chronological.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    pub fn page_numbers(&self) -> Vec<i32> {
        self.pages.values().filter_map(|page| page.page_number).collect()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
