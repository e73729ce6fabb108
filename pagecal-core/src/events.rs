//! Notifications from the pager to the host UI.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum PagerEvent {
    /// The active page settled on a new anchor date.
    ActivePageChanged(NaiveDate),
    /// A date became selected in single-select mode.
    DateSelected(NaiveDate),
    /// A date became selected in multi-select mode; carries the whole set.
    DatesSelected(Vec<NaiveDate>),
    DateDeselected(NaiveDate),
    /// Sent after every toggle, with the resulting selection.
    SelectionChanged(Vec<NaiveDate>),
}

/// Receiver of [`PagerEvent`]s. Emission is fire-and-forget.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: PagerEvent);
}

impl EventSink for () {
    fn emit(&self, _event: PagerEvent) {}
}

/// Delivers events over a channel. A closed channel drops the event.
impl EventSink for UnboundedSender<PagerEvent> {
    fn emit(&self, event: PagerEvent) {
        let _ = self.send(event);
    }
}

type DateCallback = Box<dyn Fn(NaiveDate) + Send + Sync>;
type DatesCallback = Box<dyn Fn(&[NaiveDate]) + Send + Sync>;

/// One optional closure per event kind.
///
/// ```
/// use pagecal_core::Callbacks;
///
/// let callbacks = Callbacks::new()
///     .on_active_page_changed(|date| println!("now showing {date}"))
///     .on_selection_changed(|dates| println!("{} selected", dates.len()));
/// ```
#[derive(Default)]
pub struct Callbacks {
    active_page_changed: Option<DateCallback>,
    date_selected: Option<DateCallback>,
    dates_selected: Option<DatesCallback>,
    date_deselected: Option<DateCallback>,
    selection_changed: Option<DatesCallback>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_active_page_changed(mut self, f: impl Fn(NaiveDate) + Send + Sync + 'static) -> Self {
        self.active_page_changed = Some(Box::new(f));
        self
    }

    pub fn on_date_selected(mut self, f: impl Fn(NaiveDate) + Send + Sync + 'static) -> Self {
        self.date_selected = Some(Box::new(f));
        self
    }

    pub fn on_dates_selected(mut self, f: impl Fn(&[NaiveDate]) + Send + Sync + 'static) -> Self {
        self.dates_selected = Some(Box::new(f));
        self
    }

    pub fn on_date_deselected(mut self, f: impl Fn(NaiveDate) + Send + Sync + 'static) -> Self {
        self.date_deselected = Some(Box::new(f));
        self
    }

    pub fn on_selection_changed(
        mut self,
        f: impl Fn(&[NaiveDate]) + Send + Sync + 'static,
    ) -> Self {
        self.selection_changed = Some(Box::new(f));
        self
    }
}

impl EventSink for Callbacks {
    fn emit(&self, event: PagerEvent) {
        match event {
            PagerEvent::ActivePageChanged(date) => {
                if let Some(f) = &self.active_page_changed {
                    f(date)
                }
            }
            PagerEvent::DateSelected(date) => {
                if let Some(f) = &self.date_selected {
                    f(date)
                }
            }
            PagerEvent::DatesSelected(dates) => {
                if let Some(f) = &self.dates_selected {
                    f(&dates)
                }
            }
            PagerEvent::DateDeselected(date) => {
                if let Some(f) = &self.date_deselected {
                    f(date)
                }
            }
            PagerEvent::SelectionChanged(dates) => {
                if let Some(f) = &self.selection_changed {
                    f(&dates)
                }
            }
        }
    }
}
