use crate::error::CalendarError;
use crate::util::{
    days_after, end_of_day, first_of_month, iter_days_from, last_of_month, start_of_day,
    start_of_week, DAYS_IN_WEEK,
};
use std::fmt;
use std::str::FromStr;
use time::{Date, PrimitiveDateTime, Weekday};

/// The display granularity of a calendar
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ViewMode {
    Day,
    Week,
    #[default]
    Month,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Day => "day",
            ViewMode::Week => "week",
            ViewMode::Month => "month",
        }
    }

    /// Compute the period displayed by this view for the given reference
    /// date
    pub fn period(&self, date: Date, week_start: Weekday) -> Period {
        let (first, last) = match self {
            ViewMode::Day => (date, date),
            ViewMode::Week => {
                let first = start_of_week(date, week_start);
                (first, days_after(first, DAYS_IN_WEEK - 1))
            }
            ViewMode::Month => (first_of_month(date), last_of_month(date)),
        };
        Period::from_days(first, last)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<ViewMode, CalendarError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ViewMode::Day),
            "week" => Ok(ViewMode::Week),
            "month" => Ok(ViewMode::Month),
            _ => Err(CalendarError::UnknownView(s.to_owned())),
        }
    }
}

/// A closed interval of local date-times, running from the start of its
/// first day to the last instant of its last day
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Period {
    pub start: PrimitiveDateTime,
    pub end: PrimitiveDateTime,
}

impl Period {
    /// The period covering the days `first` through `last`, inclusive
    pub fn from_days(first: Date, last: Date) -> Period {
        Period {
            start: start_of_day(first),
            end: end_of_day(last),
        }
    }

    pub fn first_day(&self) -> Date {
        self.start.date()
    }

    pub fn last_day(&self) -> Date {
        self.end.date()
    }

    pub fn contains(&self, dt: PrimitiveDateTime) -> bool {
        self.start <= dt && dt <= self.end
    }

    /// The days of the period in order
    pub fn days(&self) -> impl Iterator<Item = Date> {
        let last = self.last_day();
        iter_days_from(self.first_day()).take_while(move |&d| d <= last)
    }
}
