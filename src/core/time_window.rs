use chrono::NaiveTime;

use crate::error::RankError;
use crate::models::TimeWindow;

/// Parse an "HH:MM" time of day
pub fn parse_time(value: &str) -> Result<NaiveTime, RankError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| RankError::InvalidTimeFormat(value.to_string()))
}

/// Inclusive membership test with midnight wraparound.
///
/// When `start < end` the window is `[start, end]`. Otherwise it crosses
/// midnight and contains everything from `start` onwards plus everything up
/// to and including `end`.
#[inline]
pub fn contains(start: NaiveTime, end: NaiveTime, reference: NaiveTime) -> bool {
    if start < end {
        start <= reference && reference <= end
    } else {
        reference >= start || reference <= end
    }
}

/// Half-open variant used for opening hours: the closing minute is excluded.
#[inline]
pub fn contains_half_open(start: NaiveTime, end: NaiveTime, reference: NaiveTime) -> bool {
    if start < end {
        start <= reference && reference < end
    } else {
        reference >= start || reference < end
    }
}

impl TimeWindow {
    /// Parse both endpoints of the window
    pub fn parse(&self) -> Result<(NaiveTime, NaiveTime), RankError> {
        Ok((parse_time(&self.start)?, parse_time(&self.end)?))
    }

    /// Whether `reference` falls inside this window (inclusive both ends)
    pub fn contains(&self, reference: NaiveTime) -> Result<bool, RankError> {
        let (start, end) = self.parse()?;
        Ok(contains(start, end, reference))
    }

    /// Whether `reference` falls inside `[start, end)`
    pub fn contains_half_open(&self, reference: NaiveTime) -> Result<bool, RankError> {
        let (start, end) = self.parse()?;
        Ok(contains_half_open(start, end, reference))
    }
}
