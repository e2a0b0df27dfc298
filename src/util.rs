//! Date and time helpers shared by the view, grid, and placement code
use crate::error::CalendarError;
use std::iter::successors;
use std::ops::RangeInclusive;
use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, Duration, Month,
    OffsetDateTime, PrimitiveDateTime, Time, UtcOffset, Weekday,
};

pub(crate) const DAYS_IN_WEEK: u8 = 7;

pub const MS_PER_MINUTE: u32 = 60 * 1000;

pub const MS_PER_HOUR: u32 = 60 * MS_PER_MINUTE;

pub const MS_PER_DAY: u32 = 24 * MS_PER_HOUR;

/// Parse a time of day of the form `H:MM` or `HH:MM` (24-hour clock) into
/// milliseconds since midnight.  `24:00` is accepted and denotes the end of
/// the day.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidTimeOfDay`] if the string is not of the
/// expected form or names a time outside `0:00` through `24:00`.
pub fn parse_time_of_day(s: &str) -> Result<u32, CalendarError> {
    let invalid = || CalendarError::InvalidTimeOfDay(s.to_owned());
    let (hours, minutes) = s.trim().split_once(':').ok_or_else(invalid)?;
    if !(1..=2).contains(&hours.len())
        || minutes.len() != 2
        || !hours.chars().chain(minutes.chars()).all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }
    let hours = hours.parse::<u32>().map_err(|_| invalid())?;
    let minutes = minutes.parse::<u32>().map_err(|_| invalid())?;
    if minutes >= 60 || hours > 24 || (hours == 24 && minutes > 0) {
        return Err(invalid());
    }
    Ok(hours * MS_PER_HOUR + minutes * MS_PER_MINUTE)
}

/// Milliseconds between midnight and the given moment, at minute precision
pub fn time_of_day_ms(dt: PrimitiveDateTime) -> u32 {
    (u32::from(dt.hour()) * 60 + u32::from(dt.minute())) * MS_PER_MINUTE
}

/// The day numbers `1..=n`
pub fn range(n: u8) -> RangeInclusive<u8> {
    1..=n
}

pub(crate) fn first_of_month(date: Date) -> Date {
    date.replace_day(1)
        .expect("every month should have a first day")
}

pub(crate) fn last_of_month(date: Date) -> Date {
    date.replace_day(date.month().length(date.year()))
        .expect("Month::length() should return a valid day")
}

/// Move `date` by `months` months, landing on `day` or on the last day of the
/// target month if it is shorter.  Returns `None` if the target month is
/// outside the supported calendar.
pub(crate) fn add_months(date: Date, months: i32, day: u8) -> Option<Date> {
    let index = date
        .year()
        .checked_mul(12)?
        .checked_add(i32::from(u8::from(date.month())) - 1)?
        .checked_add(months)?;
    let year = index.div_euclid(12);
    let month = Month::try_from(u8::try_from(index.rem_euclid(12) + 1).ok()?).ok()?;
    let day = day.clamp(1, month.length(year));
    Date::from_calendar_date(year, month, day).ok()
}

pub(crate) fn start_of_day(date: Date) -> PrimitiveDateTime {
    PrimitiveDateTime::new(date, Time::MIDNIGHT)
}

pub(crate) fn end_of_day(date: Date) -> PrimitiveDateTime {
    let last = Time::from_hms_nano(23, 59, 59, 999_999_999)
        .expect("23:59:59.999999999 should be a valid time");
    PrimitiveDateTime::new(date, last)
}

pub(crate) fn days_after(date: Date, n: u8) -> Date {
    date.saturating_add(Duration::days(n.into()))
}

pub(crate) fn days_before(date: Date, n: u8) -> Date {
    date.saturating_sub(Duration::days(n.into()))
}

/// First day of the week containing `date`
pub(crate) fn start_of_week(date: Date, week_start: Weekday) -> Date {
    days_before(date, date.weekday().index_from(week_start))
}

pub(crate) fn iter_days_from(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day())
}

pub trait WeekdayExt {
    /// Number of days from Sunday, 0 through 6
    fn index0(&self) -> u8;

    /// Position of this weekday in a week beginning on `week_start`, 0
    /// through 6
    fn index_from(&self, week_start: Weekday) -> u8;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u8 {
        self.number_days_from_sunday()
    }

    fn index_from(&self, week_start: Weekday) -> u8 {
        (DAYS_IN_WEEK + self.index0() - week_start.index0()) % DAYS_IN_WEEK
    }
}

/// Convert a week-start index (0 = Sunday through 6 = Saturday) to a
/// [`Weekday`]
///
/// # Errors
///
/// Returns [`CalendarError::InvalidWeekStart`] if `i` is greater than 6.
pub fn weekday_from_index(i: u8) -> Result<Weekday, CalendarError> {
    if i < DAYS_IN_WEEK {
        Ok(Weekday::Sunday.nth_next(i))
    } else {
        Err(CalendarError::InvalidWeekStart(i))
    }
}

/// The various representations a caller may hand over for a date
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DateInput {
    Date(Date),
    DateTime(PrimitiveDateTime),
    Offset(OffsetDateTime),
    /// An ISO 8601-style string: `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]` (a
    /// space may replace the `T`), RFC 3339 with an offset, or a string of
    /// digits giving milliseconds since the Unix epoch
    Text(String),
    /// Milliseconds since the Unix epoch
    Timestamp(i64),
}

impl DateInput {
    /// Normalize to a local date-time.  Moments carrying an offset (RFC 3339
    /// strings, [`OffsetDateTime`]s, and timestamps) are shifted to `offset`
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] if a string is in none of the
    /// accepted formats, or [`CalendarError::Timestamp`] if a timestamp is
    /// outside the supported calendar.
    pub fn resolve(&self, offset: UtcOffset) -> Result<PrimitiveDateTime, CalendarError> {
        match self {
            DateInput::Date(d) => Ok(start_of_day(*d)),
            DateInput::DateTime(dt) => Ok(*dt),
            DateInput::Offset(odt) => Ok(to_local(*odt, offset)),
            DateInput::Text(s) => parse_date_text(s, offset),
            DateInput::Timestamp(ms) => {
                OffsetDateTime::from_unix_timestamp_nanos(i128::from(*ms) * 1_000_000)
                    .map(|odt| to_local(odt, offset))
                    .map_err(|e| CalendarError::Timestamp(*ms, e))
            }
        }
    }
}

impl From<Date> for DateInput {
    fn from(d: Date) -> DateInput {
        DateInput::Date(d)
    }
}

impl From<PrimitiveDateTime> for DateInput {
    fn from(dt: PrimitiveDateTime) -> DateInput {
        DateInput::DateTime(dt)
    }
}

impl From<OffsetDateTime> for DateInput {
    fn from(odt: OffsetDateTime) -> DateInput {
        DateInput::Offset(odt)
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> DateInput {
        DateInput::Text(s)
    }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> DateInput {
        DateInput::Text(s.to_owned())
    }
}

impl From<i64> for DateInput {
    fn from(ms: i64) -> DateInput {
        DateInput::Timestamp(ms)
    }
}

/// The system's current UTC offset, or UTC if it cannot be determined.
/// This must be called before the process starts any threads, as the offset
/// cannot be queried soundly afterwards.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or_else(|e| {
        log::debug!("could not determine local UTC offset, using UTC: {e}");
        UtcOffset::UTC
    })
}

fn to_local(odt: OffsetDateTime, offset: UtcOffset) -> PrimitiveDateTime {
    let odt = odt.to_offset(offset);
    PrimitiveDateTime::new(odt.date(), odt.time())
}

fn parse_date_text(s: &str, offset: UtcOffset) -> Result<PrimitiveDateTime, CalendarError> {
    let s = s.trim();
    if let Ok(odt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Ok(to_local(odt, offset));
    }
    let with_seconds_t = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    let with_seconds_sp = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let minutes_t = format_description!("[year]-[month]-[day]T[hour]:[minute]");
    let minutes_sp = format_description!("[year]-[month]-[day] [hour]:[minute]");
    for fmt in [with_seconds_t, with_seconds_sp, minutes_t, minutes_sp] {
        if let Ok(dt) = PrimitiveDateTime::parse(s, fmt) {
            return Ok(dt);
        }
    }
    if let Ok(ms) = s.parse::<i64>() {
        return DateInput::Timestamp(ms).resolve(offset);
    }
    Date::parse(s, format_description!("[year]-[month]-[day]"))
        .map(start_of_day)
        .map_err(|source| CalendarError::InvalidDate {
            input: s.to_owned(),
            source,
        })
}
