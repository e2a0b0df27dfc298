use crate::error::CalendarError;
use crate::util::{parse_time_of_day, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE};

/// Length of one row of the day & week grids
pub const SLOT_MS: u32 = 15 * MS_PER_MINUTE;

/// The visible clock-time window of the day & week views, in milliseconds
/// since midnight
///
/// Invariant: `0 <= start <= end <= MS_PER_DAY`
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TimeBounds {
    start: u32,
    end: u32,
}

impl TimeBounds {
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidTimeBounds`] if `start` is after `end`
    /// or `end` is past the end of the day.
    pub fn new(start: u32, end: u32) -> Result<TimeBounds, CalendarError> {
        if start > end || end > MS_PER_DAY {
            Err(CalendarError::InvalidTimeBounds { start, end })
        } else {
            Ok(TimeBounds { start, end })
        }
    }

    /// Construct from two `H:MM` strings, e.g., `"8:00"` and `"20:00"`
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidTimeOfDay`] if either string is
    /// malformed, or [`CalendarError::InvalidTimeBounds`] if the start is
    /// after the end.
    pub fn parse(start: &str, end: &str) -> Result<TimeBounds, CalendarError> {
        TimeBounds::new(parse_time_of_day(start)?, parse_time_of_day(end)?)
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of 15-minute rows needed to show the whole window; a trailing
    /// partial slot gets a row of its own
    pub fn slot_count(&self) -> u32 {
        (self.end - self.start).div_ceil(SLOT_MS)
    }

    /// Clamp a pair of times of day into the window
    pub fn clip(&self, start: u32, end: u32) -> (u32, u32) {
        (self.start.max(start), self.end.min(end))
    }

    /// The 1-based grid line at which a time of day at or after the window's
    /// start falls, rounded to the nearest slot
    pub fn row_for(&self, ms: u32) -> u32 {
        let offset = ms.saturating_sub(self.start);
        (offset + SLOT_MS / 2) / SLOT_MS + 1
    }

    /// The whole hours that begin inside the window, for drawing a time
    /// legend
    pub fn hour_marks(&self) -> Vec<HourMark> {
        (0..24u32)
            .filter(|h| (self.start..self.end).contains(&(h * MS_PER_HOUR)))
            .map(|hour| HourMark {
                hour,
                row: self.row_for(hour * MS_PER_HOUR),
            })
            .collect()
    }
}

impl Default for TimeBounds {
    fn default() -> TimeBounds {
        TimeBounds {
            start: 0,
            end: MS_PER_DAY,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct HourMark {
    pub hour: u32,
    /// 1-based grid line of the top of the hour
    pub row: u32,
}
