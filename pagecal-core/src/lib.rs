//! Paginated calendar date engine.
//!
//! This crate turns a reference date and a granularity (month, week or day)
//! into pages of day cells for a host UI to render:
//! - `calendar_math` has the Gregorian week/month arithmetic
//! - `page` builds month grids and week strips
//! - `window` keeps a few pages prefetched around the active one
//! - `selection` is the single/multi date selection state machine
//! - `pager` ties them together behind navigation and tap handling, and
//!   reports changes through an [`EventSink`]

pub mod calendar_math;
pub mod calendar_type;
pub mod clock;
pub mod config;
pub mod constants;
pub mod day;
pub mod debounce;
pub mod error;
pub mod events;
pub mod page;
pub mod pager;
pub mod selection;
pub mod window;

pub use calendar_type::CalendarType;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Configuration, OtherPageInteraction, WeekendHighlight};
pub use day::AsCalendarDay;
pub use error::{PageCalError, PageCalResult};
pub use events::{Callbacks, EventSink, PagerEvent};
pub use page::{DayCell, Page, build_page};
pub use pager::{CalendarPager, CellStatus, PagerBuilder};
pub use selection::{SelectionEngine, ToggleOutcome};
pub use window::{PaginationWindow, WindowUpdate};
