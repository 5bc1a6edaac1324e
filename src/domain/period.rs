// Window period domain model
use serde::{Deserialize, Serialize};
use std::fmt;

const HOUR_MS: i64 = 60 * 60 * 1000;

/// Retention and query window selected for a device's charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WindowPeriod {
    #[default]
    #[serde(rename = "1d")]
    Day,
    #[serde(rename = "1w")]
    Week,
    #[serde(rename = "1m")]
    Month,
}

/// Language used for chart titles and user-visible messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    It,
    En,
}

impl WindowPeriod {
    pub const ALL: [WindowPeriod; 3] = [WindowPeriod::Day, WindowPeriod::Week, WindowPeriod::Month];

    /// Query string value, as sent to `/api/history`.
    pub fn as_str(self) -> &'static str {
        match self {
            WindowPeriod::Day => "1d",
            WindowPeriod::Week => "1w",
            WindowPeriod::Month => "1m",
        }
    }

    pub fn window_ms(self) -> i64 {
        match self {
            WindowPeriod::Day => 24 * HOUR_MS,
            WindowPeriod::Week => 7 * 24 * HOUR_MS,
            WindowPeriod::Month => 30 * 24 * HOUR_MS,
        }
    }

    /// Oldest timestamp (exclusive) still retained at `now_ms`.
    pub fn cutoff_ms(self, now_ms: i64) -> i64 {
        now_ms - self.window_ms()
    }

    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (WindowPeriod::Day, Language::It) => "24 Ore",
            (WindowPeriod::Week, Language::It) => "1 Settimana",
            (WindowPeriod::Month, Language::It) => "1 Mese",
            (WindowPeriod::Day, Language::En) => "24 Hours",
            (WindowPeriod::Week, Language::En) => "1 Week",
            (WindowPeriod::Month, Language::En) => "1 Month",
        }
    }
}

impl fmt::Display for WindowPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_durations() {
        assert_eq!(WindowPeriod::Day.window_ms(), 86_400_000);
        assert_eq!(WindowPeriod::Week.window_ms(), 604_800_000);
        assert_eq!(WindowPeriod::Month.window_ms(), 2_592_000_000);
    }

    #[test]
    fn test_cutoff() {
        let now = 10_000_000_000;
        assert_eq!(WindowPeriod::Day.cutoff_ms(now), now - 86_400_000);
    }

    #[test]
    fn test_display_matches_query_value() {
        for period in WindowPeriod::ALL {
            assert_eq!(period.to_string(), period.as_str());
        }
    }

    #[test]
    fn test_serde_uses_query_values() {
        let period: WindowPeriod = serde_json::from_str("\"1m\"").unwrap();
        assert_eq!(period, WindowPeriod::Month);
        assert_eq!(serde_json::to_string(&WindowPeriod::Week).unwrap(), "\"1w\"");
        assert!(serde_json::from_str::<WindowPeriod>("\"1y\"").is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(WindowPeriod::Day.label(Language::It), "24 Ore");
        assert_eq!(WindowPeriod::Week.label(Language::It), "1 Settimana");
        assert_eq!(WindowPeriod::Month.label(Language::En), "1 Month");
    }
}
