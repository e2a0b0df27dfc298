use crate::theme::{
    tabs::{ACTIVE_TAB_STYLE, INACTIVE_TAB_STYLE},
    BASE_STYLE, FALLBACK_APPOINTMENT_COLOR, GRID_STYLE, LEGEND_STYLE, OUTSIDE_MONTH_STYLE,
    RULE_STYLE, TITLE_STYLE, TODAY_STYLE, WEEKDAY_STYLE,
};
use apptgrid::{Appointment, Calendar, Frame, GridArea, GridLength, Period, TimeBounds, ViewMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Text,
    widgets::{Paragraph, Widget},
};
use std::collections::HashMap;
use std::str::FromStr;
use time::{Date, PrimitiveDateTime, UtcOffset, Weekday};

/// Number of columns on the left side of the body, used for the hour legend
/// and, above it, the UTC offset
const LEFT_MARGIN: u16 = 6;

/// Number of lines above the body: the title & view tabs, the column labels,
/// and a rule
const HEADER_LINES: u16 = 3;

const TAB_VIEWS: [ViewMode; 3] = [ViewMode::Day, ViewMode::Week, ViewMode::Month];

const ACS_HLINE: char = '─';
const ACS_VLINE: char = '│';
const DOTTED_HLINE: char = '┈';

/// Draws a [`Calendar`] together with the appointments visible in it
#[derive(Clone, Copy, Debug)]
pub(crate) struct CalendarView<'a> {
    calendar: &'a Calendar,
    today: Date,
    /// The offset the appointment times are shown in
    offset: UtcOffset,
    appointments: &'a [Appointment],
}

impl<'a> CalendarView<'a> {
    pub(crate) fn new(
        calendar: &'a Calendar,
        today: Date,
        offset: UtcOffset,
        appointments: &'a [Appointment],
    ) -> CalendarView<'a> {
        CalendarView {
            calendar,
            today,
            offset,
            appointments,
        }
    }

    fn title(&self) -> String {
        let date = self.calendar.date();
        match self.calendar.view() {
            ViewMode::Day => format!(
                "{}, {} {}, {}",
                date.weekday(),
                date.month(),
                date.day(),
                date.year()
            ),
            ViewMode::Week => week_title(&self.calendar.period()),
            ViewMode::Month => format!("{} {}", date.month(), date.year()),
        }
    }

    fn draw_header(&self, canvas: &mut BufferCanvas<'_>, frame: &Frame, grid: &Grid) {
        let tabs_x = canvas.draw_tabs(self.calendar.view());
        canvas.mvprint(
            0,
            LEFT_MARGIN,
            self.title(),
            TITLE_STYLE,
            tabs_x.saturating_sub(LEFT_MARGIN + 1),
        );
        canvas.mvprint(
            1,
            0,
            offset_label(self.offset),
            LEGEND_STYLE,
            LEFT_MARGIN,
        );
        let with_day = matches!(frame, Frame::Days { .. });
        for (column, date) in std::iter::zip(1u32.., frame.header_days()) {
            let label = if with_day {
                format!("{} {}", weekday_abbrev(date.weekday()), date.day())
            } else {
                weekday_abbrev(date.weekday()).to_owned()
            };
            let style = if with_day && date == self.today {
                TODAY_STYLE
            } else {
                WEEKDAY_STYLE
            };
            canvas.mvprint(
                1,
                grid.col_x(column) + 1,
                label,
                style,
                grid.col_width.saturating_sub(2),
            );
        }
        canvas.hline(
            HEADER_LINES - 1,
            LEFT_MARGIN,
            ACS_HLINE,
            canvas.width().saturating_sub(LEFT_MARGIN),
            RULE_STYLE,
        );
    }

    fn draw_days(&self, canvas: &mut BufferCanvas<'_>, bounds: &TimeBounds, grid: &Grid) {
        for cell in self.calendar.grid_cells(GridLength::OneHour) {
            if cell.area.row_start > 1 {
                canvas.hline(
                    grid.line(cell.area.row_start),
                    grid.col_x(cell.area.column),
                    DOTTED_HLINE,
                    grid.col_width.saturating_sub(1),
                    GRID_STYLE,
                );
            }
        }
        for mark in bounds.hour_marks() {
            canvas.mvprint(
                grid.line(mark.row),
                0,
                format!("{:>2}:00", mark.hour),
                LEGEND_STYLE,
                LEFT_MARGIN - 1,
            );
        }
        for column in 1..=grid.columns {
            canvas.vline(
                HEADER_LINES,
                grid.col_x(column).saturating_sub(1),
                ACS_VLINE,
                grid.body_height,
                GRID_STYLE,
            );
        }
        for (appt, area) in self.calendar.place_all(self.appointments) {
            let top = grid.line(area.row_start);
            let height = grid.line(area.row_end).saturating_sub(top).max(1);
            let x = grid.col_x(area.column);
            let width = grid.col_width.saturating_sub(1);
            let style = appointment_style(appt);
            canvas.fill(top, x, width, height, style);
            canvas.mvprint(
                top,
                x,
                &appt.title,
                style.add_modifier(Modifier::BOLD),
                width,
            );
            if height > 1 {
                canvas.mvprint(
                    top + 1,
                    x,
                    format!(
                        "{}-{}",
                        clock(appt.interval.start),
                        clock(appt.interval.end)
                    ),
                    style,
                    width,
                );
            }
        }
    }

    fn draw_month(&self, canvas: &mut BufferCanvas<'_>, grid: &Grid) {
        for cell in self.calendar.grid_cells(GridLength::default()) {
            let top = grid.line(cell.area.row_start);
            let x = grid.col_x(cell.area.column);
            canvas.hline(top, x, ACS_HLINE, grid.col_width, RULE_STYLE);
            if let Some(day) = cell.day_number {
                let style = if cell.date == self.today {
                    TODAY_STYLE
                } else if cell.outside_month {
                    OUTSIDE_MONTH_STYLE
                } else {
                    BASE_STYLE
                };
                canvas.mvprint(top, x + 1, format!("{day:>2}"), style, 2);
            }
        }
        // Number of titles already drawn in each cell
        let mut stacked = HashMap::<GridArea, u16>::new();
        for (appt, area) in self.calendar.place_all(self.appointments) {
            let slot = stacked.entry(area).or_insert(0);
            let y = grid.line(area.row_start) + 1 + *slot;
            *slot += 1;
            if y >= grid.line(area.row_end) {
                continue;
            }
            canvas.mvprint(
                y,
                grid.col_x(area.column),
                &appt.title,
                appointment_style(appt),
                grid.col_width.saturating_sub(1),
            );
        }
    }
}

impl Widget for CalendarView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let frame = self.calendar.frame();
        let grid = Grid::new(area, frame.columns(), frame.rows());
        let mut canvas = BufferCanvas::new(area, buf);
        self.draw_header(&mut canvas, &frame, &grid);
        match frame {
            Frame::Month(_) => self.draw_month(&mut canvas, &grid),
            Frame::Days { bounds, .. } => self.draw_days(&mut canvas, &bounds, &grid),
        }
    }
}

/// Maps grid columns & rows onto the terminal lines and columns of the body
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Grid {
    columns: u32,
    rows: u32,
    col_width: u16,
    body_height: u16,
}

impl Grid {
    fn new(area: Rect, columns: u32, rows: u32) -> Grid {
        let columns = columns.max(1);
        let col_width = area.width.saturating_sub(LEFT_MARGIN)
            / u16::try_from(columns).unwrap_or(u16::MAX);
        Grid {
            columns,
            rows,
            col_width,
            body_height: area.height.saturating_sub(HEADER_LINES),
        }
    }

    /// Leftmost terminal column of 1-based grid column `column`
    fn col_x(&self, column: u32) -> u16 {
        let x = u32::from(LEFT_MARGIN)
            .saturating_add(column.saturating_sub(1).saturating_mul(self.col_width.into()));
        u16::try_from(x).unwrap_or(u16::MAX)
    }

    /// Terminal line at which 1-based grid row line `row` starts
    fn line(&self, row: u32) -> u16 {
        let offset = row
            .saturating_sub(1)
            .saturating_mul(self.body_height.into())
            .checked_div(self.rows)
            .unwrap_or(0);
        HEADER_LINES.saturating_add(u16::try_from(offset).unwrap_or(u16::MAX))
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn width(&self) -> u16 {
        self.area.width
    }

    // Returns the column at which the tabs start
    fn draw_tabs(&mut self, active: ViewMode) -> u16 {
        let labels = TAB_VIEWS.map(|v| {
            let mut label = format!(" {v} ");
            if let Some(first) = label.get_mut(1..2) {
                first.make_ascii_uppercase();
            }
            (v, label)
        });
        let total = labels
            .iter()
            .map(|(_, s)| u16::try_from(s.len()).unwrap_or(u16::MAX))
            .fold(0u16, u16::saturating_add);
        let mut x = self.area.width.saturating_sub(total);
        let start = x;
        for (view, label) in labels {
            let style = if view == active {
                ACTIVE_TAB_STYLE
            } else {
                INACTIVE_TAB_STYLE
            };
            let len = u16::try_from(label.len()).unwrap_or(u16::MAX);
            self.mvprint(0, x, label, style, len);
            x = x.saturating_add(len);
        }
        start
    }

    fn mvaddch(&mut self, y: u16, x: u16, ch: char, style: Style) {
        if y < self.area.height && x < self.area.width {
            if let Some(cell) = self.buf.cell_mut((x + self.area.x, y + self.area.y)) {
                cell.set_char(ch).set_style(style);
            }
        }
    }

    /// Write `s` at `(y, x)`, cutting it off after `max_width` columns or at
    /// the edge of the area, whichever comes first
    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style, max_width: u16) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // The Rect passed to the Paragraph must lie entirely within the
            // buffer lest a panic result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width).min(max_width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16, style: Style) {
        for i in 0..length {
            self.mvaddch(y, x.saturating_add(i), ch, style);
        }
    }

    fn vline(&mut self, y: u16, x: u16, ch: char, length: u16, style: Style) {
        for i in 0..length {
            self.mvaddch(y.saturating_add(i), x, ch, style);
        }
    }

    fn fill(&mut self, y: u16, x: u16, width: u16, height: u16, style: Style) {
        for i in 0..height {
            self.hline(y.saturating_add(i), x, ' ', width, style);
        }
    }
}

fn week_title(period: &Period) -> String {
    let first = period.first_day();
    let last = period.last_day();
    if first.year() == last.year() {
        format!(
            "{} {} - {} {}, {}",
            first.month(),
            first.day(),
            last.month(),
            last.day(),
            last.year()
        )
    } else {
        format!(
            "{} {}, {} - {} {}, {}",
            first.month(),
            first.day(),
            first.year(),
            last.month(),
            last.day(),
            last.year()
        )
    }
}

fn weekday_abbrev(wd: Weekday) -> &'static str {
    match wd {
        Weekday::Sunday => "Su",
        Weekday::Monday => "Mo",
        Weekday::Tuesday => "Tu",
        Weekday::Wednesday => "We",
        Weekday::Thursday => "Th",
        Weekday::Friday => "Fr",
        Weekday::Saturday => "Sa",
    }
}

/// `GMT+2`, `GMT-4`, `GMT+0`; offsets that are not whole hours are written
/// as `+5:30` so as to fit the margin
fn offset_label(offset: UtcOffset) -> String {
    let sign = if offset.is_negative() { '-' } else { '+' };
    let hours = offset.whole_hours().unsigned_abs();
    let minutes = offset.minutes_past_hour().unsigned_abs();
    if minutes == 0 {
        format!("GMT{sign}{hours}")
    } else {
        format!("{sign}{hours}:{minutes:02}")
    }
}

fn clock(when: PrimitiveDateTime) -> String {
    format!("{}:{:02}", when.hour(), when.minute())
}

fn appointment_style(appt: &Appointment) -> Style {
    let bg = Color::from_str(&appt.color).unwrap_or_else(|_| {
        log::debug!("unknown appointment color {:?}", appt.color);
        FALLBACK_APPOINTMENT_COLOR
    });
    Style::new().fg(Color::Black).bg(bg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use apptgrid::Interval;
    use time::macros::{date, datetime, offset};

    fn render(calendar: &Calendar, today: Date, appointments: &[Appointment]) -> Buffer {
        render_at(calendar, today, offset!(+2), appointments)
    }

    fn render_at(
        calendar: &Calendar,
        today: Date,
        offset: UtcOffset,
        appointments: &[Appointment],
    ) -> Buffer {
        let area = Rect::new(0, 0, 80, 30);
        let mut buffer = Buffer::empty(area);
        CalendarView::new(calendar, today, offset, appointments).render(area, &mut buffer);
        buffer
    }

    fn line(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_week_view() {
        let cal = Calendar::new(date!(2021 - 06 - 30))
            .with_view(ViewMode::Week)
            .with_time_bounds(TimeBounds::parse("8:00", "20:00").unwrap());
        let appts = [Appointment::new(
            "Lunch",
            "magenta",
            Interval::new(datetime!(2021-06-27 12:00), datetime!(2021-06-27 14:30)),
        )];
        let buffer = render(&cal, date!(2021 - 06 - 30), &appts);
        let title = line(&buffer, 0);
        assert!(title.contains("June 27 - July 3, 2021"), "{title:?}");
        assert!(title.ends_with(" Day  Week  Month "), "{title:?}");
        let header = line(&buffer, 1);
        assert!(header.contains("Su 27"), "{header:?}");
        assert!(header.contains("Sa 3"), "{header:?}");
        let noon = line(&buffer, 12);
        assert!(noon.starts_with("12:00"), "{noon:?}");
        assert!(noon.contains("Lunch"), "{noon:?}");
        assert_eq!(buffer[(6, 12)].bg, Color::Magenta);
        assert_eq!(buffer[(6, 16)].bg, Color::Magenta);
        assert_ne!(buffer[(6, 17)].bg, Color::Magenta);
        assert_eq!(buffer[(15, 3)].symbol(), "│");
    }

    #[test]
    fn test_day_view() {
        let cal = Calendar::new(date!(2021 - 06 - 30)).with_view(ViewMode::Day);
        let appts = [Appointment::new(
            "Standup",
            "green",
            Interval::new(datetime!(2021-06-30 9:00), datetime!(2021-06-30 11:00)),
        )];
        let buffer = render(&cal, date!(2021 - 06 - 30), &appts);
        assert!(line(&buffer, 0).contains("Wednesday, June 30, 2021"));
        assert!(line(&buffer, 1).contains("We 30"));
        assert_eq!(buffer[(7, 1)].fg, Color::LightYellow);
        assert!(line(&buffer, 3).starts_with(" 0:00"));
        assert!(line(&buffer, 13).contains("Standup"));
        assert!(line(&buffer, 14).contains("9:00-11:00"));
    }

    #[test]
    fn test_week_title_across_years() {
        let cal = Calendar::new(date!(2020 - 12 - 30)).with_view(ViewMode::Week);
        let buffer = render(&cal, date!(2020 - 12 - 30), &[]);
        assert!(line(&buffer, 0).contains("December 27, 2020 - January 2, 2021"));
    }

    #[test]
    fn test_month_view() {
        let cal = Calendar::new(date!(2021 - 07 - 10));
        let appts = [
            Appointment::new(
                "Review",
                "no such color",
                Interval::new(datetime!(2021-07-15 9:00), datetime!(2021-07-15 10:00)),
            ),
            Appointment::new(
                "Elsewhen",
                "blue",
                Interval::new(datetime!(2021-09-15 9:00), datetime!(2021-09-15 10:00)),
            ),
        ];
        let buffer = render(&cal, date!(2021 - 07 - 04), &appts);
        assert!(line(&buffer, 0).contains("July 2021"));
        let header = line(&buffer, 1);
        assert!(header.contains("Su"), "{header:?}");
        assert!(!header.contains("Su 27"), "{header:?}");
        let first_week = line(&buffer, 3);
        assert!(first_week.contains("27"), "{first_week:?}");
        assert!(first_week.contains("30"), "{first_week:?}");
        let review = line(&buffer, 13);
        assert!(review.contains("Review"), "{review:?}");
        assert_eq!(buffer[(46, 13)].bg, FALLBACK_APPOINTMENT_COLOR);
        assert!((0..30).all(|y| !line(&buffer, y).contains("Elsewhen")));
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let cal = Calendar::new(date!(2021 - 07 - 10)).with_view(ViewMode::Week);
        let area = Rect::new(0, 0, 5, 2);
        let mut buffer = Buffer::empty(area);
        CalendarView::new(&cal, date!(2021 - 07 - 10), UtcOffset::UTC, &[])
            .render(area, &mut buffer);
    }

    #[test]
    fn test_offset_in_margin() {
        let cal = Calendar::new(date!(2021 - 06 - 30)).with_view(ViewMode::Week);
        let today = date!(2021 - 06 - 30);
        for (offset, label) in [
            (offset!(+2), "GMT+2 "),
            (UtcOffset::UTC, "GMT+0 "),
            (offset!(-4), "GMT-4 "),
            (offset!(-10), "GMT-10"),
            (offset!(+5:30), "+5:30 "),
            (offset!(-0:30), "-0:30 "),
        ] {
            let buffer = render_at(&cal, today, offset, &[]);
            let header = line(&buffer, 1);
            assert!(header.starts_with(label), "{offset}: {header:?}");
            assert!(header[7..].starts_with("Su 27"), "{offset}: {header:?}");
            assert_eq!(buffer[(0, 1)].fg, Color::Gray);
        }
        let buffer = render_at(&cal.clone().with_view(ViewMode::Month), today, offset!(-4), &[]);
        assert!(line(&buffer, 1).starts_with("GMT-4"));
    }
}
