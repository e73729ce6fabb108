//! Session configuration.
//!
//! A `Configuration` is built once per session and shared read-only with
//! the pager. It can be written by hand or loaded from TOML:
//!
//! ```toml
//! type = "Week"
//! multi_select = false
//! other_page_interaction = "disabled"
//! first_weekday = "Mon"
//! debounce = "120ms"
//!
//! [weekend_highlight]
//! mode = "color"
//! color = "#ffeeee"
//! ```

use std::path::Path;
use std::time::Duration;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::calendar_type::CalendarType;
use crate::constants::{DEFAULT_DAY_LABELS, DEFAULT_DEBOUNCE, DEFAULT_WINDOW_RADIUS};
use crate::error::{PageCalError, PageCalResult};
use crate::page::DayCell;

/// Whether cells borrowed from a neighbouring period accept taps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtherPageInteraction {
    #[default]
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "color", rename_all = "snake_case")]
pub enum WeekendHighlight {
    #[default]
    None,
    /// Any colour string the host understands.
    Color(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    #[serde(rename = "type")]
    pub calendar_type: CalendarType,
    pub multi_select: bool,
    pub other_page_interaction: OtherPageInteraction,
    pub first_weekday: Weekday,
    /// Header labels, first entry for `first_weekday`. Display data only.
    pub day_labels: Vec<String>,
    /// Pages kept on each side of the active page.
    pub window_radius: u32,
    #[serde(with = "humantime_duration")]
    pub debounce: Duration,
    pub weekend_highlight: WeekendHighlight,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            calendar_type: CalendarType::Month,
            multi_select: true,
            other_page_interaction: OtherPageInteraction::Enabled,
            first_weekday: Weekday::Sun,
            day_labels: DEFAULT_DAY_LABELS.iter().map(|s| s.to_string()).collect(),
            window_radius: DEFAULT_WINDOW_RADIUS,
            debounce: DEFAULT_DEBOUNCE,
            weekend_highlight: WeekendHighlight::None,
        }
    }
}

impl Configuration {
    pub fn from_toml_str(content: &str) -> PageCalResult<Self> {
        let config: Configuration =
            toml::from_str(content).map_err(|e| PageCalError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file.
    pub fn load(path: &Path) -> PageCalResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> PageCalResult<String> {
        toml::to_string_pretty(self).map_err(|e| PageCalError::Config(e.to_string()))
    }

    pub fn validate(&self) -> PageCalResult<()> {
        if self.day_labels.len() != 7 {
            return Err(PageCalError::Config(format!(
                "Expected 7 day labels, got {}",
                self.day_labels.len()
            )));
        }
        if self.window_radius == 0 {
            return Err(PageCalError::Config(
                "window_radius must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Whether a tap on a cell should reach the selection.
    pub fn accepts_tap(&self, in_active_period: bool) -> bool {
        in_active_period || self.other_page_interaction == OtherPageInteraction::Enabled
    }

    /// Highlight colour for a weekend cell, if weekends are highlighted.
    pub fn weekend_highlight_for(&self, cell: &DayCell) -> Option<&str> {
        match &self.weekend_highlight {
            WeekendHighlight::Color(color) if cell.is_weekend => Some(color),
            _ => None,
        }
    }
}

mod humantime_duration {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&humantime::format_duration(*duration))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_toml_is_default() {
        let config = Configuration::from_toml_str("").unwrap();
        assert_eq!(config, Configuration::default());
        assert_eq!(config.debounce, Duration::from_millis(80));
        assert!(config.multi_select);
    }

    #[test]
    fn test_parse_full_toml() {
        let config = Configuration::from_toml_str(
            r##"
type = "Week"
multi_select = false
other_page_interaction = "disabled"
first_weekday = "Mon"
day_labels = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
window_radius = 3
debounce = "120ms"

[weekend_highlight]
mode = "color"
color = "#ffeeee"
"##,
        )
        .unwrap();

        assert_eq!(config.calendar_type, CalendarType::Week);
        assert!(!config.multi_select);
        assert_eq!(config.other_page_interaction, OtherPageInteraction::Disabled);
        assert_eq!(config.first_weekday, Weekday::Mon);
        assert_eq!(config.day_labels[0], "Mo");
        assert_eq!(config.window_radius, 3);
        assert_eq!(config.debounce, Duration::from_millis(120));
        assert_eq!(
            config.weekend_highlight,
            WeekendHighlight::Color("#ffeeee".to_string())
        );
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = Configuration {
            calendar_type: CalendarType::Day,
            weekend_highlight: WeekendHighlight::Color("red".to_string()),
            ..Configuration::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(Configuration::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Configuration::from_toml_str("day_labels = [\"S\", \"M\"]"),
            Err(PageCalError::Config(_))
        ));
        assert!(Configuration::from_toml_str("window_radius = 0").is_err());
        assert!(Configuration::from_toml_str("debounce = \"soon\"").is_err());
        assert!(Configuration::from_toml_str("colour = \"red\"").is_err());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = Configuration::load(Path::new("/nonexistent/pagecal.toml"));
        assert!(matches!(result, Err(PageCalError::Io(_))));
    }

    #[test]
    fn test_tap_gate() {
        let mut config = Configuration::default();
        assert!(config.accepts_tap(false));

        config.other_page_interaction = OtherPageInteraction::Disabled;
        assert!(config.accepts_tap(true));
        assert!(!config.accepts_tap(false));
    }

    #[test]
    fn test_weekend_highlight() {
        let saturday = DayCell::new(NaiveDate::from_ymd_opt(2024, 2, 17).unwrap());
        let friday = DayCell::new(NaiveDate::from_ymd_opt(2024, 2, 16).unwrap());

        let mut config = Configuration::default();
        assert_eq!(config.weekend_highlight_for(&saturday), None);

        config.weekend_highlight = WeekendHighlight::Color("red".to_string());
        assert_eq!(config.weekend_highlight_for(&saturday), Some("red"));
        assert_eq!(config.weekend_highlight_for(&friday), None);
    }
}
