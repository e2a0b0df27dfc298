use thiserror::Error;

/// Errors raised by the calendar core
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("unknown view {0:?}; expected \"day\", \"week\", or \"month\"")]
    UnknownView(String),

    #[error("unknown grid length {0:?}; expected \"30 min\", \"1 hour\", \"2 hours\", \"4 hours\", or \"1 day\"")]
    UnknownGridLength(String),

    #[error("invalid time of day {0:?}; expected H:MM between 0:00 and 24:00")]
    InvalidTimeOfDay(String),

    #[error("time bounds start ({start} ms) is after end ({end} ms)")]
    InvalidTimeBounds { start: u32, end: u32 },

    #[error("invalid week start {0}; expected 0 (Sunday) through 6 (Saturday)")]
    InvalidWeekStart(u8),

    #[error("could not interpret {input:?} as a date")]
    InvalidDate {
        input: String,
        #[source]
        source: time::error::Parse,
    },

    #[error("timestamp {0} ms is outside the supported calendar")]
    Timestamp(i64, #[source] time::error::ComponentRange),

    #[error(transparent)]
    OutOfTime(#[from] OutOfTimeError),
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;
