use apptgrid::{Appointment, Interval, WeekdayExt};
use time::{macros::time, Date, Duration, PrimitiveDateTime, Time, Weekday};

/// Sample appointments laid out around `today` so that something is always
/// on screen
pub(crate) fn agenda(today: Date) -> Vec<Appointment> {
    let monday = today.saturating_sub(Duration::days(
        today.weekday().index_from(Weekday::Monday).into(),
    ));
    vec![
        appointment(
            "Lunch with Max",
            "magenta",
            shift(monday, 1),
            time!(12:00),
            time!(13:00),
        ),
        appointment(
            "Pick up the kids",
            "green",
            shift(monday, 3),
            time!(18:00),
            time!(19:00),
        ),
        appointment(
            "Weekly Team Meeting",
            "blue",
            shift(today, 3),
            time!(10:00),
            time!(12:00),
        ),
        appointment(
            "Day Off",
            "blue",
            shift(today, 5),
            time!(9:00),
            time!(17:00),
        ),
        appointment(
            "Go over sales",
            "green",
            shift(today, -27),
            time!(14:00),
            time!(16:00),
        ),
        appointment(
            "Dentist",
            "red",
            today,
            time!(8:30),
            time!(9:15),
        ),
    ]
}

fn shift(date: Date, days: i64) -> Date {
    date.saturating_add(Duration::days(days))
}

fn appointment(title: &str, color: &str, date: Date, start: Time, end: Time) -> Appointment {
    Appointment::new(
        title,
        color,
        Interval::new(
            PrimitiveDateTime::new(date, start),
            PrimitiveDateTime::new(date, end),
        ),
    )
}
