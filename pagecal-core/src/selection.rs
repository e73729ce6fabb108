//! Date selection state machine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::day::AsCalendarDay;

/// Result of a single toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleOutcome {
    /// The date is selected after the toggle.
    Selected(NaiveDate),
    /// The date is not selected after the toggle.
    Deselected(NaiveDate),
}

impl ToggleOutcome {
    pub fn date(&self) -> NaiveDate {
        match self {
            ToggleOutcome::Selected(date) | ToggleOutcome::Deselected(date) => *date,
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, ToggleOutcome::Selected(_))
    }
}

/// Selected calendar days, in the order they were selected.
///
/// With `multi_select` off the set never holds more than one date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionEngine {
    multi_select: bool,
    dates: Vec<NaiveDate>,
}

impl SelectionEngine {
    pub fn new(multi_select: bool) -> Self {
        SelectionEngine {
            multi_select,
            dates: Vec::new(),
        }
    }

    /// Seeds the selection, dropping duplicate days. The host is trusted to
    /// pass at most one date when `multi_select` is off.
    pub fn with_dates<I, D>(multi_select: bool, dates: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: AsCalendarDay,
    {
        let mut engine = Self::new(multi_select);
        for date in dates {
            let date = date.calendar_day();
            if !engine.dates.contains(&date) {
                engine.dates.push(date);
            }
        }
        engine
    }

    pub fn toggle(&mut self, date: impl AsCalendarDay) -> ToggleOutcome {
        let date = date.calendar_day();

        let outcome = if self.dates.is_empty() {
            self.dates.push(date);
            ToggleOutcome::Selected(date)
        } else if self.is_selected(date) {
            if self.multi_select {
                self.dates.retain(|d| *d != date);
            } else {
                self.dates.clear();
            }
            ToggleOutcome::Deselected(date)
        } else {
            if !self.multi_select {
                self.dates.clear();
            }
            self.dates.push(date);
            ToggleOutcome::Selected(date)
        };

        debug!(?outcome, selected = self.dates.len(), "selection toggled");
        outcome
    }

    pub fn is_selected(&self, date: impl AsCalendarDay) -> bool {
        self.dates.contains(&date.calendar_day())
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn is_multi_select(&self) -> bool {
        self.multi_select
    }

    pub fn clear(&mut self) {
        self.dates.clear();
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
