//! Navigation controller.
//!
//! `CalendarPager` owns the active page, the page window and the
//! selection. Navigation updates the active page immediately; the window
//! is recomputed on the debounce scheduler once navigation settles, and
//! `ActivePageChanged` is emitted from there. All state sits behind one
//! mutex, so the debounced task and the caller never write concurrently.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::Configuration;
use crate::day::AsCalendarDay;
use crate::debounce::Debouncer;
use crate::error::PageCalResult;
use crate::events::{EventSink, PagerEvent};
use crate::page::{DayCell, Page};
use crate::selection::{SelectionEngine, ToggleOutcome};
use crate::window::{PaginationWindow, WindowUpdate};

struct PagerState {
    active_page: NaiveDate,
    window: PaginationWindow,
    selection: SelectionEngine,
}

impl PagerState {
    fn settle(&mut self) -> WindowUpdate {
        self.window.ensure_window(self.active_page)
    }
}

fn lock(state: &Mutex<PagerState>) -> MutexGuard<'_, PagerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Everything the host needs to draw one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellStatus {
    pub selected: bool,
    pub today: bool,
    pub in_active_period: bool,
    /// Taps on this cell reach the selection.
    pub interactive: bool,
    /// Only set for unselected weekend cells that are not today.
    pub weekend_highlight: Option<String>,
}

pub struct PagerBuilder {
    config: Configuration,
    reference_date: Option<NaiveDate>,
    selected_dates: Vec<NaiveDate>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn EventSink>,
}

impl PagerBuilder {
    /// Date the first active page is built around. Defaults to today.
    pub fn reference_date(mut self, date: impl AsCalendarDay) -> Self {
        self.reference_date = Some(date.calendar_day());
        self
    }

    pub fn selected_dates<I, D>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: AsCalendarDay,
    {
        self.selected_dates = dates.into_iter().map(|d| d.calendar_day()).collect();
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Seeds the window synchronously. Must be called inside a tokio
    /// runtime, which later runs the debounced window updates.
    pub fn build(self) -> PageCalResult<CalendarPager> {
        let debouncer = Debouncer::new(self.config.debounce)?;
        let config = Arc::new(self.config);

        let reference = self
            .reference_date
            .unwrap_or_else(|| self.clock.today());
        let active_page = config
            .calendar_type
            .period_start(reference, config.first_weekday);

        let mut state = PagerState {
            active_page,
            window: PaginationWindow::with_radius(
                config.calendar_type,
                config.first_weekday,
                config.window_radius,
            ),
            selection: SelectionEngine::with_dates(config.multi_select, self.selected_dates),
        };
        state.settle();

        debug!(%active_page, calendar_type = %config.calendar_type, "pager created");

        Ok(CalendarPager {
            config,
            clock: self.clock,
            sink: self.sink,
            state: Arc::new(Mutex::new(state)),
            debouncer,
        })
    }
}

pub struct CalendarPager {
    config: Arc<Configuration>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn EventSink>,
    state: Arc<Mutex<PagerState>>,
    debouncer: Debouncer,
}

impl CalendarPager {
    pub fn builder(config: Configuration) -> PagerBuilder {
        PagerBuilder {
            config,
            reference_date: None,
            selected_dates: Vec::new(),
            clock: Arc::new(SystemClock),
            sink: Arc::new(()),
        }
    }

    /// A pager without event subscribers.
    pub fn new(config: Configuration, reference_date: impl AsCalendarDay) -> PageCalResult<Self> {
        Self::builder(config).reference_date(reference_date).build()
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    // NAVIGATION:

    pub fn next_page(&self) -> NaiveDate {
        self.step(1)
    }

    pub fn previous_page(&self) -> NaiveDate {
        self.step(-1)
    }

    pub fn go_to_today(&self) -> NaiveDate {
        let today = self.clock.today();
        self.set_active_page(today)
    }

    /// Moves to the page containing `date`, e.g. after a swipe in the host.
    pub fn set_active_page(&self, date: impl AsCalendarDay) -> NaiveDate {
        let target = self.period_start(date.calendar_day());
        self.transition(|_| target)
    }

    fn step(&self, periods: i32) -> NaiveDate {
        let calendar_type = self.config.calendar_type;
        let first_weekday = self.config.first_weekday;
        let clock = self.clock.as_ref();

        self.transition(|current| {
            calendar_type.advance_or_today(current, periods, first_weekday, clock)
        })
    }

    fn transition(&self, next: impl FnOnce(NaiveDate) -> NaiveDate) -> NaiveDate {
        let active = {
            let mut state = lock(&self.state);
            state.active_page = next(state.active_page);
            state.active_page
        };
        debug!(%active, "active page moved");

        let state = Arc::clone(&self.state);
        let sink = Arc::clone(&self.sink);
        self.debouncer.schedule(move || {
            let (previous, settled) = {
                let mut state = lock(&state);
                let previous = state.window.active_anchor();
                state.settle();
                (previous, state.window.active_anchor())
            };
            match settled {
                Some(settled) if previous != Some(settled) => {
                    sink.emit(PagerEvent::ActivePageChanged(settled));
                }
                _ => debug!("navigation settled on the same page"),
            }
        });

        active
    }

    /// Drops any pending debounced update and brings the window up to date
    /// now. Does not emit `ActivePageChanged`.
    pub fn flush(&self) -> WindowUpdate {
        self.debouncer.cancel();
        lock(&self.state).settle()
    }

    pub fn is_settling(&self) -> bool {
        self.debouncer.is_pending()
    }

    // PAGES:

    /// Anchor date of the active page.
    pub fn active_page(&self) -> NaiveDate {
        lock(&self.state).active_page
    }

    /// Materialized pages, past to future.
    pub fn pages(&self) -> Vec<Page> {
        lock(&self.state).window.pages().cloned().collect()
    }

    /// Page by number relative to the last settled active page.
    pub fn page(&self, page_number: i32) -> Option<Page> {
        lock(&self.state).window.page(page_number).cloned()
    }

    pub fn page_for(&self, date: impl AsCalendarDay) -> Option<Page> {
        lock(&self.state).window.page_for(date).cloned()
    }

    pub fn day_labels(&self) -> &[String] {
        &self.config.day_labels
    }

    pub fn is_in_active_period(&self, date: impl AsCalendarDay) -> bool {
        let active = self.active_page();
        self.config
            .calendar_type
            .same_period(active, date.calendar_day(), self.config.first_weekday)
    }

    fn period_start(&self, date: NaiveDate) -> NaiveDate {
        self.config
            .calendar_type
            .period_start(date, self.config.first_weekday)
    }

    // SELECTION:

    /// A user tap on a cell. Taps on cells outside the active period are
    /// ignored unless other-page interaction is enabled.
    pub fn tap(&self, date: impl AsCalendarDay) -> Option<ToggleOutcome> {
        let date = date.calendar_day();
        if !self.config.accepts_tap(self.is_in_active_period(date)) {
            debug!(%date, "tap outside active period ignored");
            return None;
        }
        Some(self.toggle(date))
    }

    /// Toggles `date` and notifies the sink.
    pub fn toggle(&self, date: impl AsCalendarDay) -> ToggleOutcome {
        let (outcome, selected) = {
            let mut state = lock(&self.state);
            let outcome = state.selection.toggle(date);
            (outcome, state.selection.dates().to_vec())
        };

        match outcome {
            ToggleOutcome::Selected(_) if self.config.multi_select => {
                self.sink.emit(PagerEvent::DatesSelected(selected.clone()));
            }
            ToggleOutcome::Selected(date) => {
                let first = selected.first().copied().unwrap_or(date);
                self.sink.emit(PagerEvent::DateSelected(first));
            }
            ToggleOutcome::Deselected(date) => {
                self.sink.emit(PagerEvent::DateDeselected(date));
            }
        }
        self.sink.emit(PagerEvent::SelectionChanged(selected));

        outcome
    }

    pub fn selected_dates(&self) -> Vec<NaiveDate> {
        lock(&self.state).selection.dates().to_vec()
    }

    pub fn is_selected(&self, date: impl AsCalendarDay) -> bool {
        lock(&self.state).selection.is_selected(date)
    }

    pub fn cell_status(&self, cell: &DayCell) -> CellStatus {
        let selected = self.is_selected(cell.date);
        let today = cell.date == self.clock.today();
        let in_active_period = self.is_in_active_period(cell.date);
        let weekend_highlight = if selected || today {
            None
        } else {
            self.config.weekend_highlight_for(cell).map(String::from)
        };

        CellStatus {
            selected,
            today,
            in_active_period,
            interactive: self.config.accepts_tap(in_active_period),
            weekend_highlight,
        }
    }
}
