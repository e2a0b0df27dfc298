//! Grid layout for day, week, and month calendars
//!
//! A [`Calendar`] holds the view mode, reference date, week start, and the
//! visible time bounds.  From these it derives the displayed [`Period`], the
//! six-week [`MonthGrid`], and, for each caller-supplied appointment, a
//! [`GridPlacement`] giving the 1-based grid column and rows the appointment
//! occupies.  Day & week views have one column per day and one row per 15
//! minutes of the time bounds; the month view has seven columns and six rows.
//!
//! ```
//! use apptgrid::{Calendar, Interval, TimeBounds, ViewMode};
//! use time::macros::{date, datetime};
//!
//! let cal = Calendar::new(date!(2021 - 06 - 30))
//!     .with_view(ViewMode::Week)
//!     .with_time_bounds(TimeBounds::parse("8:00", "20:00")?);
//! let lunch = Interval::new(datetime!(2021-06-27 12:00), datetime!(2021-06-27 14:30));
//! let area = cal.place(&lunch).area().expect("lunch should be visible");
//! assert_eq!((area.column, area.row_start, area.row_end), (1, 17, 27));
//! # Ok::<(), apptgrid::CalendarError>(())
//! ```
pub mod bounds;
pub mod calendar;
pub mod error;
pub mod layout;
pub mod month;
pub mod placement;
pub mod util;
pub mod view;

pub use crate::bounds::{HourMark, TimeBounds, SLOT_MS};
pub use crate::calendar::Calendar;
pub use crate::error::{CalendarError, OutOfTimeError};
pub use crate::layout::{GridCell, GridLength};
pub use crate::month::{MonthCell, MonthGrid, GRID_CELLS, GRID_ROWS};
pub use crate::placement::{Appointment, Frame, GridArea, GridPlacement, Interval, Timed};
pub use crate::util::{
    local_offset, parse_time_of_day, weekday_from_index, DateInput, WeekdayExt,
};
pub use crate::view::{Period, ViewMode};
