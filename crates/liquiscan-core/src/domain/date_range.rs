use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, Time};

use crate::ConfigError;

/// Half-open calendar window for a history request.
///
/// `start < end` is enforced at construction; an inverted range is a
/// configuration error for the whole run, not a per-ticker failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Result<Self, ConfigError> {
        if start >= end {
            return Err(ConfigError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> Date {
        self.start
    }

    pub const fn end(&self) -> Date {
        self.end
    }

    /// Epoch seconds at midnight UTC of the start date, as the provider's
    /// `period1` parameter expects.
    pub fn start_epoch(&self) -> i64 {
        midnight_utc(self.start).unix_timestamp()
    }

    /// Epoch seconds at midnight UTC of the end date (`period2`).
    pub fn end_epoch(&self) -> i64 {
        midnight_utc(self.end).unix_timestamp()
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

fn midnight_utc(date: Date) -> OffsetDateTime {
    OffsetDateTime::new_utc(date, Time::MIDNIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn accepts_ordered_range() {
        let range = DateRange::new(date!(2024 - 01 - 01), date!(2024 - 06 - 30))
            .expect("ordered range is valid");
        assert_eq!(range.start(), date!(2024 - 01 - 01));
        assert_eq!(range.end(), date!(2024 - 06 - 30));
    }

    #[test]
    fn rejects_inverted_range() {
        let err = DateRange::new(date!(2024 - 06 - 30), date!(2024 - 01 - 01))
            .expect_err("inverted range must fail");
        assert!(matches!(err, ConfigError::InvalidDateRange { .. }));
    }

    #[test]
    fn rejects_empty_range() {
        let day = date!(2024 - 03 - 15);
        assert!(DateRange::new(day, day).is_err());
    }

    #[test]
    fn epoch_endpoints_are_midnight_utc() {
        let range =
            DateRange::new(date!(2024 - 01 - 01), date!(2024 - 01 - 02)).expect("valid range");
        assert_eq!(range.start_epoch(), 1_704_067_200);
        assert_eq!(range.end_epoch(), 1_704_153_600);
    }
}
