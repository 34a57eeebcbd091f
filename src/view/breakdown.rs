//! Day/hour/minute/second decomposition of a remaining-seconds count

use serde::{Deserialize, Serialize};

const SECS_PER_DAY: u64 = 86_400;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_MINUTE: u64 = 60;

/// Remaining time split into display units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBreakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

/// Split `seconds` into days, hours, minutes and seconds
pub fn format_time_remaining(seconds: u64) -> TimeBreakdown {
    TimeBreakdown {
        days: seconds / SECS_PER_DAY,
        hours: (seconds % SECS_PER_DAY) / SECS_PER_HOUR,
        minutes: (seconds % SECS_PER_HOUR) / SECS_PER_MINUTE,
        seconds: seconds % SECS_PER_MINUTE,
    }
}

impl TimeBreakdown {
    /// Short form for log lines, e.g. `1d 01:01:01` or `00:04:59`
    pub fn compact(&self) -> String {
        let clock = format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds);
        if self.days > 0 {
            format!("{}d {}", self.days, clock)
        } else {
            clock
        }
    }

    /// Unit-suffixed form that drops leading zero units, e.g. `2h 0m 5s`
    pub fn human(&self) -> String {
        if self.days > 0 {
            format!("{}d {}h {}m {}s", self.days, self.hours, self.minutes, self.seconds)
        } else if self.hours > 0 {
            format!("{}h {}m {}s", self.hours, self.minutes, self.seconds)
        } else if self.minutes > 0 {
            format!("{}m {}s", self.minutes, self.seconds)
        } else {
            format!("{}s", self.seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(format_time_remaining(0), TimeBreakdown::default());
    }

    #[test]
    fn test_one_of_each_unit() {
        // 86400 + 3600 + 60 + 1
        let breakdown = format_time_remaining(90_061);
        assert_eq!(
            breakdown,
            TimeBreakdown { days: 1, hours: 1, minutes: 1, seconds: 1 }
        );
    }

    #[test]
    fn test_unit_boundaries() {
        assert_eq!(format_time_remaining(59).seconds, 59);
        assert_eq!(format_time_remaining(60).minutes, 1);
        assert_eq!(format_time_remaining(3_599), TimeBreakdown { days: 0, hours: 0, minutes: 59, seconds: 59 });
        assert_eq!(format_time_remaining(86_399), TimeBreakdown { days: 0, hours: 23, minutes: 59, seconds: 59 });
        assert_eq!(format_time_remaining(86_400), TimeBreakdown { days: 1, hours: 0, minutes: 0, seconds: 0 });
    }

    #[test]
    fn test_compact() {
        assert_eq!(format_time_remaining(90_061).compact(), "1d 01:01:01");
        assert_eq!(format_time_remaining(299).compact(), "00:04:59");
    }

    #[test]
    fn test_human() {
        assert_eq!(format_time_remaining(0).human(), "0s");
        assert_eq!(format_time_remaining(65).human(), "1m 5s");
        assert_eq!(format_time_remaining(7_205).human(), "2h 0m 5s");
        assert_eq!(format_time_remaining(90_061).human(), "1d 1h 1m 1s");
    }
}
