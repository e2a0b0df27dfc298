//! The six-week grid shown by the month view
//!
//! The grid always has [`GRID_CELLS`] cells laid out in [`GRID_ROWS`] rows of
//! seven days.  The first row begins on the configured week-start day, so the
//! grid is padded with the tail of the previous month and filled out with the
//! head of the next month.
use crate::util::{
    days_after, days_before, first_of_month, iter_days_from, range, WeekdayExt, DAYS_IN_WEEK,
};
use crate::view::Period;
use time::{Date, Month, Weekday};

pub const GRID_ROWS: u8 = 6;

pub const GRID_CELLS: usize = (GRID_ROWS * DAYS_IN_WEEK) as usize;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct MonthGrid {
    month_start: Date,
    week_start: Weekday,
}

impl MonthGrid {
    /// The grid for the month containing `date`
    pub fn new(date: Date, week_start: Weekday) -> MonthGrid {
        MonthGrid {
            month_start: first_of_month(date),
            week_start,
        }
    }

    pub fn year(&self) -> i32 {
        self.month_start.year()
    }

    pub fn month(&self) -> Month {
        self.month_start.month()
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Number of leading cells that belong to the previous month, 0 through 6
    pub fn days_from_prev_month(&self) -> u8 {
        self.month_start.weekday().index_from(self.week_start)
    }

    pub fn days_in_month(&self) -> u8 {
        self.month().length(self.year())
    }

    pub fn days_in_prev_month(&self) -> u8 {
        let month = self.month().previous();
        let year = if month == Month::December {
            self.year() - 1
        } else {
            self.year()
        };
        month.length(year)
    }

    /// Number of trailing cells that belong to the next month
    pub fn days_from_next_month(&self) -> u8 {
        GRID_ROWS * DAYS_IN_WEEK - self.days_from_prev_month() - self.days_in_month()
    }

    /// The day-of-month number displayed in cell `i` (counting from zero,
    /// row by row)
    pub fn day_for_cell(&self, i: usize) -> u8 {
        let lead = self.days_from_prev_month();
        match u8::try_from(i) {
            Ok(i) if i < lead => self.days_in_prev_month() - lead + i + 1,
            _ => {
                let dim = usize::from(self.days_in_month());
                let day = (i - usize::from(lead)) % dim;
                // `day` < `dim` <= 31
                u8::try_from(day).unwrap_or(0) + 1
            }
        }
    }

    /// The day-of-month numbers of all cells: the tail of the previous month,
    /// the whole month, then the head of the next month
    pub fn day_numbers(&self) -> [u8; GRID_CELLS] {
        let prev = self.days_in_prev_month();
        let mut days = range(prev)
            .skip(usize::from(prev - self.days_from_prev_month()))
            .chain(range(self.days_in_month()))
            .chain(range(self.days_from_next_month()));
        std::array::from_fn(|_| days.next().unwrap_or(0))
    }

    /// The date shown in the top-left cell
    pub fn first_day(&self) -> Date {
        days_before(self.month_start, self.days_from_prev_month())
    }

    /// The date shown in the bottom-right cell
    pub fn last_day(&self) -> Date {
        days_after(
            self.month_start,
            self.days_in_month() - 1 + self.days_from_next_month(),
        )
    }

    /// The whole span of days visible in the grid, including those of the
    /// adjacent months
    pub fn period(&self) -> Period {
        Period::from_days(self.first_day(), self.last_day())
    }

    /// Index of the cell showing `date`, if it is in the grid
    pub fn cell_index(&self, date: Date) -> Option<usize> {
        let offset = (date - self.first_day()).whole_days();
        usize::try_from(offset).ok().filter(|&i| i < GRID_CELLS)
    }

    /// The dated cells of the grid.  Only cells whose dates fall within the
    /// supported calendar are returned, so a grid around [`Date::MIN`] or
    /// [`Date::MAX`] comes up short; [`Calendar`](crate::Calendar) keeps its
    /// reference date far enough from either end for this not to happen.
    pub fn cells(&self) -> Vec<MonthCell> {
        std::iter::zip(0u32.., iter_days_from(self.first_day()).take(GRID_CELLS))
            .map(|(index, date)| MonthCell {
                index,
                date,
                in_month: date.month() == self.month() && date.year() == self.year(),
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct MonthCell {
    /// Position in the grid, counting from zero row by row
    pub index: u32,
    pub date: Date,
    /// Whether the date is in the grid's own month rather than an adjacent
    /// one
    pub in_month: bool,
}

impl MonthCell {
    /// 1-based grid column
    pub fn column(&self) -> u32 {
        self.index % u32::from(DAYS_IN_WEEK) + 1
    }

    /// 1-based grid row
    pub fn row(&self) -> u32 {
        self.index / u32::from(DAYS_IN_WEEK) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn all_week_starts() -> impl Iterator<Item = Weekday> {
        (0..DAYS_IN_WEEK).map(|i| Weekday::Sunday.nth_next(i))
    }

    // Count the leading days by walking backwards from the first of the month
    // until reaching the week-start day
    fn count_leading_days(month_start: Date, week_start: Weekday) -> u8 {
        let mut d = month_start;
        let mut n = 0;
        while d.weekday() != week_start {
            d = d.previous_day().unwrap();
            n += 1;
        }
        n
    }

    #[test]
    fn test_july_2021_monday_start() {
        let grid = MonthGrid::new(date!(2021 - 07 - 15), Weekday::Monday);
        assert_eq!(grid.days_from_prev_month(), 3);
        assert_eq!(grid.first_day(), date!(2021 - 06 - 28));
        assert_eq!(grid.day_for_cell(0), 28);
        assert_eq!(grid.day_for_cell(2), 30);
        assert_eq!(grid.day_for_cell(3), 1);
        assert_eq!(grid.day_for_cell(33), 31);
        assert_eq!(grid.day_for_cell(34), 1);
        assert_eq!(grid.day_for_cell(41), 8);
        assert_eq!(grid.last_day(), date!(2021 - 08 - 08));
        assert_eq!(grid.days_from_next_month(), 8);
    }

    #[test]
    fn test_month_starting_on_week_start() {
        // 2021-08-01 is a Sunday
        let grid = MonthGrid::new(date!(2021 - 08 - 01), Weekday::Sunday);
        assert_eq!(grid.days_from_prev_month(), 0);
        assert_eq!(grid.day_for_cell(0), 1);
        assert_eq!(grid.first_day(), date!(2021 - 08 - 01));
    }

    #[test]
    fn test_wraparound() {
        // 2021-08-01 is a Sunday; with a Monday week start, Sunday is the
        // last column
        let grid = MonthGrid::new(date!(2021 - 08 - 01), Weekday::Monday);
        assert_eq!(grid.days_from_prev_month(), 6);
        assert_eq!(grid.first_day(), date!(2021 - 07 - 26));
        assert_eq!(grid.day_for_cell(0), 26);
        assert_eq!(grid.day_for_cell(6), 1);
    }

    #[test]
    fn test_january_pads_from_december() {
        // 2022-01-01 is a Saturday
        let grid = MonthGrid::new(date!(2022 - 01 - 20), Weekday::Sunday);
        assert_eq!(grid.days_in_prev_month(), 31);
        assert_eq!(grid.days_from_prev_month(), 6);
        assert_eq!(grid.day_for_cell(0), 26);
        assert_eq!(grid.first_day(), date!(2021 - 12 - 26));
    }

    #[test]
    fn test_all_week_starts_and_months() {
        for week_start in all_week_starts() {
            for month_start in iter_days_from(date!(2021 - 01 - 01))
                .take(2 * 365)
                .filter(|d| d.day() == 1)
            {
                let grid = MonthGrid::new(month_start, week_start);
                let context = format!("{month_start} / {week_start}");
                assert_eq!(
                    grid.days_from_prev_month(),
                    count_leading_days(month_start, week_start),
                    "{context}"
                );
                let cells = grid.cells();
                assert_eq!(cells.len(), GRID_CELLS, "{context}");
                assert_eq!(cells[0].date.weekday(), week_start, "{context}");
                assert_eq!(cells[0].row(), 1, "{context}");
                let numbers = grid.day_numbers();
                for (cell, &day) in std::iter::zip(&cells, &numbers) {
                    assert_eq!(cell.date.day(), day, "{context} cell {}", cell.index);
                    assert_eq!(
                        grid.day_for_cell(usize::try_from(cell.index).unwrap()),
                        day,
                        "{context} cell {}",
                        cell.index
                    );
                    assert!(
                        (1..=cell.date.month().length(cell.date.year())).contains(&day),
                        "{context} cell {}",
                        cell.index
                    );
                }
                for pair in cells.windows(2) {
                    assert_eq!(pair[0].date.next_day(), Some(pair[1].date), "{context}");
                }
                let in_month = cells.iter().filter(|c| c.in_month).count();
                assert_eq!(in_month, usize::from(grid.days_in_month()), "{context}");
                assert_eq!(cells[41].date, grid.last_day(), "{context}");
            }
        }
    }

    #[test]
    fn test_month_lengths() {
        let leap = MonthGrid::new(date!(2024 - 03 - 15), Weekday::Sunday);
        assert_eq!(leap.days_in_month(), 31);
        assert_eq!(leap.days_in_prev_month(), 29);
        let common = MonthGrid::new(date!(1900 - 03 - 15), Weekday::Sunday);
        assert_eq!(common.days_in_prev_month(), 28);
        let june = MonthGrid::new(date!(2021 - 06 - 15), Weekday::Sunday);
        assert_eq!(june.days_in_month(), 30);
    }

    #[test]
    fn test_day_numbers() {
        // 2021-07-01 is a Thursday
        let numbers = MonthGrid::new(date!(2021 - 07 - 01), Weekday::Sunday).day_numbers();
        assert_eq!(numbers[..5], [27, 28, 29, 30, 1]);
        assert_eq!(numbers[34], 31);
        assert_eq!(numbers[35..], [1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_cell_index() {
        let grid = MonthGrid::new(date!(2021 - 07 - 01), Weekday::Sunday);
        // 2021-07-01 is a Thursday
        assert_eq!(grid.cell_index(date!(2021 - 06 - 27)), Some(0));
        assert_eq!(grid.cell_index(date!(2021 - 07 - 01)), Some(4));
        assert_eq!(grid.cell_index(date!(2021 - 08 - 07)), Some(41));
        assert_eq!(grid.cell_index(date!(2021 - 08 - 08)), None);
        assert_eq!(grid.cell_index(date!(2021 - 06 - 26)), None);
    }

    #[test]
    fn test_cell_coordinates() {
        let grid = MonthGrid::new(date!(2021 - 07 - 01), Weekday::Sunday);
        let cells = grid.cells();
        assert_eq!((cells[4].row(), cells[4].column()), (1, 5));
        assert_eq!((cells[7].row(), cells[7].column()), (2, 1));
        assert_eq!((cells[41].row(), cells[41].column()), (6, 7));
    }
}
