use std::time::Duration;

/// Debounce applied to active-page changes before the window is recomputed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(80);

/// Pages kept on each side of the active page (two before, two after).
pub const DEFAULT_WINDOW_RADIUS: u32 = 2;

pub const DAYS_PER_WEEK: u64 = 7;

pub const DEFAULT_DAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
