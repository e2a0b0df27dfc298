use crate::bounds::TimeBounds;
use crate::error::CalendarError;
use crate::month::MonthGrid;
use crate::util::{time_of_day_ms, DateInput, DAYS_IN_WEEK};
use crate::view::Period;
use time::{Duration, PrimitiveDateTime, UtcOffset};

/// Anything occupying a span of time that can be laid out on the calendar
pub trait Timed {
    fn interval(&self) -> Interval;
}

impl<T: Timed + ?Sized> Timed for &T {
    fn interval(&self) -> Interval {
        (**self).interval()
    }
}

/// A span of local time.  `end` is expected to be no earlier than `start`,
/// but this is not enforced.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Interval {
    pub start: PrimitiveDateTime,
    pub end: PrimitiveDateTime,
}

impl Interval {
    pub fn new(start: PrimitiveDateTime, end: PrimitiveDateTime) -> Interval {
        Interval { start, end }
    }

    /// # Errors
    ///
    /// Returns an error if either input cannot be interpreted as a date; see
    /// [`DateInput::resolve`].
    pub fn from_inputs(
        start: &DateInput,
        end: &DateInput,
        offset: UtcOffset,
    ) -> Result<Interval, CalendarError> {
        Ok(Interval {
            start: start.resolve(offset)?,
            end: end.resolve(offset)?,
        })
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }

    /// Whether any part of the interval falls within `period`.  The interval
    /// is treated as half-open, so an appointment ending exactly at midnight
    /// does not spill into the next day; a zero-length interval overlaps if
    /// its instant lies inside the period.
    pub fn overlaps(&self, period: &Period) -> bool {
        if self.start == self.end {
            period.contains(self.start)
        } else {
            self.start <= period.end && self.end > period.start
        }
    }
}

impl Timed for Interval {
    fn interval(&self) -> Interval {
        *self
    }
}

/// A caller-supplied calendar entry
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Appointment {
    pub title: String,
    /// Free-form color name for the presentation layer, e.g., `"blue"`
    pub color: String,
    pub interval: Interval,
}

impl Appointment {
    pub fn new<S: Into<String>, C: Into<String>>(
        title: S,
        color: C,
        interval: Interval,
    ) -> Appointment {
        Appointment {
            title: title.into(),
            color: color.into(),
            interval,
        }
    }
}

impl Timed for Appointment {
    fn interval(&self) -> Interval {
        self.interval
    }
}

/// The grid lines an appointment occupies.  All values are 1-based and
/// `row_end` is exclusive, as with CSS grid lines.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GridArea {
    pub column: u32,
    pub row_start: u32,
    pub row_end: u32,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GridPlacement {
    /// The appointment lies outside the displayed period or time bounds and
    /// should not be drawn
    Hidden,
    Placed(GridArea),
}

impl GridPlacement {
    pub fn is_visible(&self) -> bool {
        matches!(self, GridPlacement::Placed(_))
    }

    pub fn area(&self) -> Option<GridArea> {
        match self {
            GridPlacement::Hidden => None,
            GridPlacement::Placed(area) => Some(*area),
        }
    }
}

/// What the calendar body currently displays, as needed for laying out
/// appointments
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Frame {
    /// A month view: a six-week grid of days
    Month(MonthGrid),
    /// A day or week view: one column per day of `period`, one row per
    /// 15-minute slot of `bounds`
    Days { period: Period, bounds: TimeBounds },
}

impl Frame {
    /// Decide whether and where to draw an appointment
    pub fn place<A: Timed + ?Sized>(&self, appointment: &A) -> GridPlacement {
        let interval = appointment.interval();
        if interval.is_inverted() {
            log::trace!("not placing inverted interval {interval:?}");
            return GridPlacement::Hidden;
        }
        let placement = match self {
            Frame::Month(grid) => place_in_month(grid, interval),
            Frame::Days { period, bounds } => place_in_days(period, bounds, interval),
        };
        log::trace!("placed {interval:?} at {placement:?}");
        placement
    }
}

fn place_in_month(grid: &MonthGrid, interval: Interval) -> GridPlacement {
    let period = grid.period();
    if !interval.overlaps(&period) {
        return GridPlacement::Hidden;
    }
    let start = interval.start.max(period.start);
    let Some(index) = grid.cell_index(start.date()) else {
        return GridPlacement::Hidden;
    };
    let Ok(index) = u32::try_from(index) else {
        return GridPlacement::Hidden;
    };
    let week = u32::from(DAYS_IN_WEEK);
    let row = index / week + 1;
    GridPlacement::Placed(GridArea {
        column: index % week + 1,
        row_start: row,
        row_end: row + 1,
    })
}

fn place_in_days(period: &Period, bounds: &TimeBounds, interval: Interval) -> GridPlacement {
    if !interval.overlaps(period) {
        return GridPlacement::Hidden;
    }
    // An appointment that began before the period is drawn from the top of
    // the first column.
    let start = interval.start.max(period.start);
    let start_time = time_of_day_ms(start);
    // An appointment continuing past the day it is drawn on runs to the
    // bottom of its column.
    let end_time = if interval.end.date() > start.date() {
        bounds.end()
    } else {
        time_of_day_ms(interval.end)
    };
    if end_time < bounds.start() || start_time > bounds.end() {
        return GridPlacement::Hidden;
    }
    let (clipped_start, clipped_end) = bounds.clip(start_time, end_time);
    let Ok(days_in) = u32::try_from((start.date() - period.first_day()).whole_days()) else {
        return GridPlacement::Hidden;
    };
    GridPlacement::Placed(GridArea {
        column: days_in + 1,
        row_start: bounds.row_for(clipped_start),
        row_end: bounds.row_for(clipped_end),
    })
}
