//! Bell periods: the institution's fixed daily schedule of lessons and
//! breaks, treated as read-only configuration during grid resolution.

use chrono::NaiveTime;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::models::time::SlotKey;

/// One named time slot (lesson or break) in a school's fixed daily schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BellPeriod {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub label: String,
    pub is_break: bool,
}

impl BellPeriod {
    pub fn new(start: NaiveTime, end: NaiveTime, label: impl Into<String>) -> Self {
        BellPeriod {
            start,
            end,
            label: label.into(),
            is_break: false,
        }
    }

    pub fn recess(start: NaiveTime, end: NaiveTime, label: impl Into<String>) -> Self {
        BellPeriod {
            is_break: true,
            ..Self::new(start, end, label)
        }
    }

    pub fn slot_key(&self) -> SlotKey {
        SlotKey::new(self.start, self.end)
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

/// Fallback bell table used when the external configuration source returns
/// no data, so a grid is never empty purely for lack of configuration.
static DEFAULT_BELL_PERIODS: Lazy<Vec<BellPeriod>> = Lazy::new(|| {
    vec![
        BellPeriod::new(hm(8, 0), hm(8, 45), "Period 1"),
        BellPeriod::new(hm(8, 45), hm(9, 30), "Period 2"),
        BellPeriod::recess(hm(9, 30), hm(9, 50), "Morning break"),
        BellPeriod::new(hm(9, 50), hm(10, 35), "Period 3"),
        BellPeriod::new(hm(10, 35), hm(11, 20), "Period 4"),
        BellPeriod::new(hm(11, 20), hm(12, 5), "Period 5"),
        BellPeriod::recess(hm(12, 5), hm(12, 50), "Lunch"),
        BellPeriod::new(hm(12, 50), hm(13, 35), "Period 6"),
        BellPeriod::new(hm(13, 35), hm(14, 20), "Period 7"),
        BellPeriod::new(hm(14, 20), hm(15, 5), "Period 8"),
    ]
});

/// The built-in default bell table (ten entries spanning a typical school
/// day, with labeled breaks).
pub fn default_bell_periods() -> &'static [BellPeriod] {
    &DEFAULT_BELL_PERIODS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_has_ten_entries() {
        assert_eq!(default_bell_periods().len(), 10);
    }

    #[test]
    fn test_default_table_is_chronological_and_contiguous() {
        let periods = default_bell_periods();
        for pair in periods.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
        for period in periods {
            assert!(period.start < period.end);
        }
    }

    #[test]
    fn test_default_table_flags_breaks() {
        let breaks: Vec<&str> = default_bell_periods()
            .iter()
            .filter(|p| p.is_break)
            .map(|p| p.label.as_str())
            .collect();
        assert_eq!(breaks, vec!["Morning break", "Lunch"]);
    }

    #[test]
    fn test_slot_key_of_first_period() {
        assert_eq!(
            default_bell_periods()[0].slot_key().as_str(),
            "08:00-08:45"
        );
    }
}
