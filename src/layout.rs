//! Shape of the calendar body: its header days, dimensions, and the
//! background cells drawn behind the appointments
use crate::bounds::TimeBounds;
use crate::error::CalendarError;
use crate::month::GRID_ROWS;
use crate::placement::{Frame, GridArea};
use crate::util::DAYS_IN_WEEK;
use std::fmt;
use std::str::FromStr;
use time::Date;

/// How much time each background cell of a day or week view spans
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum GridLength {
    ThirtyMinutes,
    OneHour,
    #[default]
    TwoHours,
    FourHours,
    /// One cell per column covering the whole time bounds
    WholeDay,
}

impl GridLength {
    /// Number of 15-minute slots covered by one cell
    pub fn slots(&self, bounds: &TimeBounds) -> u32 {
        match self {
            GridLength::ThirtyMinutes => 2,
            GridLength::OneHour => 4,
            GridLength::TwoHours => 8,
            GridLength::FourHours => 16,
            GridLength::WholeDay => bounds.slot_count().max(1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GridLength::ThirtyMinutes => "30 min",
            GridLength::OneHour => "1 hour",
            GridLength::TwoHours => "2 hours",
            GridLength::FourHours => "4 hours",
            GridLength::WholeDay => "1 day",
        }
    }
}

impl fmt::Display for GridLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GridLength {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<GridLength, CalendarError> {
        match s.trim() {
            "30 min" => Ok(GridLength::ThirtyMinutes),
            "1 hour" => Ok(GridLength::OneHour),
            "2 hours" => Ok(GridLength::TwoHours),
            "4 hours" => Ok(GridLength::FourHours),
            "1 day" => Ok(GridLength::WholeDay),
            _ => Err(CalendarError::UnknownGridLength(s.to_owned())),
        }
    }
}

/// One background cell of the calendar body
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GridCell {
    pub area: GridArea,
    pub date: Date,
    /// Day-of-month label; only set in the month view
    pub day_number: Option<u8>,
    /// Whether the cell shows a day of an adjacent month (month view only)
    pub outside_month: bool,
}

impl Frame {
    /// The dates labelling each column, in column order.  For a month view
    /// this is the grid's first row, one date per weekday.
    pub fn header_days(&self) -> Vec<Date> {
        match self {
            Frame::Month(grid) => grid
                .cells()
                .into_iter()
                .take(DAYS_IN_WEEK.into())
                .map(|c| c.date)
                .collect(),
            Frame::Days { period, .. } => period.days().collect(),
        }
    }

    pub fn columns(&self) -> u32 {
        match self {
            Frame::Month(_) => DAYS_IN_WEEK.into(),
            Frame::Days { period, .. } => {
                let days = (period.last_day() - period.first_day()).whole_days() + 1;
                u32::try_from(days).unwrap_or(u32::MAX)
            }
        }
    }

    pub fn rows(&self) -> u32 {
        match self {
            Frame::Month(_) => GRID_ROWS.into(),
            Frame::Days { bounds, .. } => bounds.slot_count(),
        }
    }

    /// The background cells of the body.  `length` only affects day & week
    /// views; a month view always has one cell per day.
    pub fn grid_cells(&self, length: GridLength) -> Vec<GridCell> {
        match self {
            Frame::Month(grid) => std::iter::zip(grid.cells(), grid.day_numbers())
                .map(|(cell, day)| GridCell {
                    area: GridArea {
                        column: cell.column(),
                        row_start: cell.row(),
                        row_end: cell.row() + 1,
                    },
                    date: cell.date,
                    day_number: Some(day),
                    outside_month: !cell.in_month,
                })
                .collect(),
            Frame::Days { period, bounds } => {
                let rows = bounds.slot_count();
                let step = length.slots(bounds);
                let mut cells = Vec::new();
                for (column, date) in std::iter::zip(1u32.., period.days()) {
                    let mut start = 0;
                    while start < rows {
                        let end = (start + step).min(rows);
                        cells.push(GridCell {
                            area: GridArea {
                                column,
                                row_start: start + 1,
                                row_end: end + 1,
                            },
                            date,
                            day_number: None,
                            outside_month: false,
                        });
                        start = end;
                    }
                }
                cells
            }
        }
    }
}
