use crate::bounds::TimeBounds;
use crate::error::{CalendarError, OutOfTimeError};
use crate::layout::{GridCell, GridLength};
use crate::month::MonthGrid;
use crate::placement::{Frame, GridArea, GridPlacement, Timed};
use crate::util::{add_months, DateInput};
use crate::view::{Period, ViewMode};
use time::{Date, Duration, UtcOffset, Weekday};

/// The state of one calendar: what is shown and around which date
///
/// Only the view, the reference date, the week start, and the time bounds
/// are stored; the period, month grid, and placements are recomputed on
/// every call.
///
/// The reference date is kept at least a month away from either end of the
/// supported calendar, so that every week and month grid around it can be
/// shown in full.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Calendar {
    view: ViewMode,
    date: Date,
    week_start: Weekday,
    bounds: TimeBounds,
    // Day of the month that consecutive month steps aim for, so that passing
    // through a short month does not lose the original day
    month_day: Option<u8>,
}

impl Calendar {
    /// A month view of the month containing `date`, with weeks starting on
    /// Sunday and the whole day visible
    pub fn new(date: Date) -> Calendar {
        Calendar {
            view: ViewMode::default(),
            date: clamp_date(date),
            week_start: Weekday::Sunday,
            bounds: TimeBounds::default(),
            month_day: None,
        }
    }

    /// # Errors
    ///
    /// Returns an error if `input` cannot be interpreted as a date; see
    /// [`DateInput::resolve`].
    pub fn from_input(input: &DateInput, offset: UtcOffset) -> Result<Calendar, CalendarError> {
        Ok(Calendar::new(input.resolve(offset)?.date()))
    }

    pub fn with_view(mut self, view: ViewMode) -> Calendar {
        self.view = view;
        self
    }

    pub fn with_week_start(mut self, week_start: Weekday) -> Calendar {
        self.week_start = week_start;
        self
    }

    pub fn with_time_bounds(mut self, bounds: TimeBounds) -> Calendar {
        self.bounds = bounds;
        self
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    /// The reference date
    pub fn date(&self) -> Date {
        self.date
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub fn time_bounds(&self) -> TimeBounds {
        self.bounds
    }

    pub fn period(&self) -> Period {
        self.view.period(self.date, self.week_start)
    }

    /// The month grid around the reference date.  This is available in every
    /// view, not just the month view.
    pub fn month_grid(&self) -> MonthGrid {
        MonthGrid::new(self.date, self.week_start)
    }

    pub fn frame(&self) -> Frame {
        match self.view {
            ViewMode::Month => Frame::Month(self.month_grid()),
            ViewMode::Week | ViewMode::Day => Frame::Days {
                period: self.period(),
                bounds: self.bounds,
            },
        }
    }

    pub fn place<A: Timed + ?Sized>(&self, appointment: &A) -> GridPlacement {
        self.frame().place(appointment)
    }

    /// Lay out a batch of appointments, keeping only the visible ones
    pub fn place_all<'a, A: Timed>(&self, appointments: &'a [A]) -> Vec<(&'a A, GridArea)> {
        let frame = self.frame();
        appointments
            .iter()
            .filter_map(|a| frame.place(a).area().map(|area| (a, area)))
            .collect()
    }

    pub fn header_days(&self) -> Vec<Date> {
        self.frame().header_days()
    }

    pub fn body_rows(&self) -> u32 {
        self.frame().rows()
    }

    pub fn body_columns(&self) -> u32 {
        self.frame().columns()
    }

    pub fn grid_cells(&self, length: GridLength) -> Vec<GridCell> {
        self.frame().grid_cells(length)
    }

    /// Move the reference date one day, week, or month forwards, according to
    /// the current view
    ///
    /// # Errors
    ///
    /// Returns [`OutOfTimeError`] if the new date would be outside the
    /// supported calendar, in which case nothing is changed.
    pub fn go_forward(&mut self) -> Result<(), OutOfTimeError> {
        self.step(1)
    }

    /// Move the reference date one day, week, or month backwards, according
    /// to the current view
    ///
    /// # Errors
    ///
    /// Returns [`OutOfTimeError`] if the new date would be outside the
    /// supported calendar, in which case nothing is changed.
    pub fn go_backward(&mut self) -> Result<(), OutOfTimeError> {
        self.step(-1)
    }

    pub fn set_date(&mut self, date: Date) {
        let date = clamp_date(date);
        log::debug!("reference date set to {date}");
        self.date = date;
        self.month_day = None;
    }

    /// Switch views.  The reference date is kept as-is.
    pub fn set_view(&mut self, view: ViewMode) {
        log::debug!("view set to {view}");
        self.view = view;
        self.month_day = None;
    }

    pub fn set_week_start(&mut self, week_start: Weekday) {
        log::debug!("week start set to {week_start}");
        self.week_start = week_start;
    }

    /// Replace the time bounds with ones parsed from two `H:MM` strings
    ///
    /// # Errors
    ///
    /// See [`TimeBounds::parse`].  The current bounds are kept on error.
    pub fn set_time_bounds(&mut self, start: &str, end: &str) -> Result<(), CalendarError> {
        self.bounds = TimeBounds::parse(start, end)?;
        Ok(())
    }

    fn step(&mut self, direction: i32) -> Result<(), OutOfTimeError> {
        let (date, month_day) = match self.view {
            ViewMode::Day => (
                self.date.checked_add(Duration::days(direction.into())),
                None,
            ),
            ViewMode::Week => (
                self.date.checked_add(Duration::weeks(direction.into())),
                None,
            ),
            ViewMode::Month => {
                let day = self.month_day.unwrap_or(self.date.day());
                (add_months(self.date, direction, day), Some(day))
            }
        };
        let date = date
            .filter(|&d| clamp_date(d) == d)
            .ok_or(OutOfTimeError)?;
        log::debug!("moved {} by one {} to {date}", self.date, self.view);
        self.date = date;
        self.month_day = month_day;
        Ok(())
    }
}

/// Pull `date` into the range of reference dates whose week and month grids
/// lie entirely within the supported calendar
fn clamp_date(date: Date) -> Date {
    let earliest = add_months(Date::MIN, 1, 1).unwrap_or(Date::MIN);
    let latest = add_months(Date::MAX, -1, 31).unwrap_or(Date::MAX);
    date.clamp(earliest, latest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{Appointment, Interval};
    use crate::util::iter_days_from;
    use time::macros::{date, datetime};

    #[test]
    fn test_defaults() {
        let cal = Calendar::new(date!(2021 - 06 - 27));
        assert_eq!(cal.view(), ViewMode::Month);
        assert_eq!(cal.week_start(), Weekday::Sunday);
        assert_eq!(cal.time_bounds(), TimeBounds::default());
        assert_eq!(cal.period().first_day(), date!(2021 - 06 - 01));
    }

    #[test]
    fn test_from_input() {
        let cal = Calendar::from_input(&DateInput::from("2021-06-27T12:00"), UtcOffset::UTC)
            .unwrap();
        assert_eq!(cal.date(), date!(2021 - 06 - 27));
        assert!(Calendar::from_input(&DateInput::from("June"), UtcOffset::UTC).is_err());
    }

    #[test]
    fn test_navigate_days() {
        let mut cal = Calendar::new(date!(2021 - 06 - 30)).with_view(ViewMode::Day);
        cal.go_forward().unwrap();
        assert_eq!(cal.date(), date!(2021 - 07 - 01));
        cal.go_backward().unwrap();
        cal.go_backward().unwrap();
        assert_eq!(cal.date(), date!(2021 - 06 - 29));
    }

    #[test]
    fn test_navigate_weeks() {
        let mut cal = Calendar::new(date!(2021 - 06 - 30)).with_view(ViewMode::Week);
        cal.go_forward().unwrap();
        assert_eq!(cal.date(), date!(2021 - 07 - 07));
        assert_eq!(cal.period().first_day(), date!(2021 - 07 - 04));
    }

    #[test]
    fn test_navigate_months_keeps_day() {
        let mut cal = Calendar::new(date!(2021 - 01 - 31));
        cal.go_forward().unwrap();
        assert_eq!(cal.date(), date!(2021 - 02 - 28));
        cal.go_forward().unwrap();
        assert_eq!(cal.date(), date!(2021 - 03 - 31));
        cal.go_backward().unwrap();
        cal.go_backward().unwrap();
        assert_eq!(cal.date(), date!(2021 - 01 - 31));
    }

    #[test]
    fn test_step_unit_follows_current_view() {
        let mut cal = Calendar::new(date!(2021 - 06 - 30)).with_view(ViewMode::Day);
        cal.go_forward().unwrap();
        cal.set_view(ViewMode::Week);
        cal.go_forward().unwrap();
        cal.set_view(ViewMode::Month);
        cal.go_forward().unwrap();
        assert_eq!(cal.date(), date!(2021 - 08 - 08));
    }

    #[test]
    fn test_set_view_keeps_date() {
        let mut cal = Calendar::new(date!(2021 - 06 - 30));
        cal.set_view(ViewMode::Week);
        assert_eq!(cal.date(), date!(2021 - 06 - 30));
        assert_eq!(cal.period().first_day(), date!(2021 - 06 - 27));
        cal.set_view(ViewMode::Day);
        assert_eq!(cal.period().first_day(), date!(2021 - 06 - 30));
    }

    #[test]
    fn test_set_date_resets_month_day() {
        let mut cal = Calendar::new(date!(2021 - 01 - 31));
        cal.go_forward().unwrap();
        cal.set_date(date!(2021 - 02 - 15));
        cal.go_backward().unwrap();
        assert_eq!(cal.date(), date!(2021 - 01 - 15));
    }

    #[test]
    fn test_round_trip_across_year() {
        for view in [ViewMode::Day, ViewMode::Week, ViewMode::Month] {
            for date in iter_days_from(date!(2021 - 01 - 01)).take(366) {
                let mut cal = Calendar::new(date).with_view(view);
                cal.go_forward().unwrap();
                assert!(cal.period().start <= cal.period().end, "{view} {date}");
                cal.go_backward().unwrap();
                assert_eq!(cal.date(), date, "{view} {date}");
                cal.go_backward().unwrap();
                cal.go_forward().unwrap();
                assert_eq!(cal.date(), date, "{view} {date}");
            }
        }
    }

    #[test]
    fn test_end_of_time() {
        for view in [ViewMode::Day, ViewMode::Week, ViewMode::Month] {
            let mut cal = Calendar::new(Date::MAX).with_view(view);
            let last = cal.date();
            assert!(last < Date::MAX, "{view}");
            assert_eq!(cal.go_forward(), Err(OutOfTimeError), "{view}");
            assert_eq!(cal.date(), last, "{view}");
            let mut cal = Calendar::new(Date::MIN).with_view(view);
            let first = cal.date();
            assert!(first > Date::MIN, "{view}");
            assert_eq!(cal.go_backward(), Err(OutOfTimeError), "{view}");
            assert_eq!(cal.date(), first, "{view}");
        }
    }

    #[test]
    fn test_grids_complete_at_ends_of_time() {
        for week_start in 0..7 {
            let week_start = Weekday::Sunday.nth_next(week_start);
            for date in [Date::MIN, Date::MAX] {
                let mut cal = Calendar::new(date).with_week_start(week_start);
                assert_eq!(cal.month_grid().cells().len(), 42, "{date} {week_start}");
                assert_eq!(
                    cal.grid_cells(GridLength::OneHour).len(),
                    42,
                    "{date} {week_start}"
                );
                cal.set_view(ViewMode::Week);
                let period = cal.period();
                assert_eq!(period.first_day().weekday(), week_start, "{date}");
                assert_eq!(period.days().count(), 7, "{date} {week_start}");
                cal.set_date(date);
                assert_eq!(cal.header_days().len(), 7, "{date} {week_start}");
            }
        }
    }

    #[test]
    fn test_set_week_start() {
        let mut cal = Calendar::new(date!(2021 - 07 - 01)).with_view(ViewMode::Week);
        cal.set_week_start(Weekday::Thursday);
        assert_eq!(cal.period().first_day(), date!(2021 - 07 - 01));
        assert_eq!(cal.month_grid().days_from_prev_month(), 0);
    }

    #[test]
    fn test_set_time_bounds() {
        let mut cal = Calendar::new(date!(2021 - 06 - 27)).with_view(ViewMode::Week);
        cal.set_time_bounds("8:00", "20:00").unwrap();
        assert_eq!(cal.body_rows(), 48);
        assert!(cal.set_time_bounds("8:00", "noon").is_err());
        assert_eq!(cal.body_rows(), 48);
    }

    #[test]
    fn test_placement_tracks_state() {
        let mut cal = Calendar::new(date!(2021 - 06 - 30))
            .with_view(ViewMode::Week)
            .with_time_bounds(TimeBounds::parse("8:00", "20:00").unwrap());
        let appt = Appointment::new(
            "Ap. 1",
            "blue",
            Interval::new(datetime!(2021-06-27 12:00), datetime!(2021-06-27 14:30)),
        );
        assert_eq!(
            cal.place(&appt).area(),
            Some(GridArea {
                column: 1,
                row_start: 17,
                row_end: 27
            })
        );
        cal.go_forward().unwrap();
        assert_eq!(cal.place(&appt), GridPlacement::Hidden);
        cal.set_view(ViewMode::Month);
        // July 2021, Sunday-first: 2021-06-27 is the first cell
        assert_eq!(
            cal.place(&appt).area(),
            Some(GridArea {
                column: 1,
                row_start: 1,
                row_end: 2
            })
        );
    }

    #[test]
    fn test_place_all() {
        let cal = Calendar::new(date!(2021 - 06 - 30)).with_view(ViewMode::Day);
        let appts = [
            Interval::new(datetime!(2021-06-30 9:00), datetime!(2021-06-30 10:00)),
            Interval::new(datetime!(2021-07-01 9:00), datetime!(2021-07-01 10:00)),
            Interval::new(datetime!(2021-06-30 13:00), datetime!(2021-06-30 13:30)),
        ];
        let placed = cal.place_all(&appts);
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].0, &appts[0]);
        assert_eq!(placed[1].1.row_start, 53);
    }
}
