use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Renders a date as `May 26th, 2012`, or an empty string when absent.
pub fn pretty(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => pretty_date(&date),
        None => String::new(),
    }
}

pub fn pretty_date(date: &impl Datelike) -> String {
    let month = MONTHS[date.month0() as usize];
    let day = date.day();
    format!("{month} {day}{}, {}", suffix(day), date.year())
}

// 11, 12 and 13 fall through to "th"
fn suffix(day: u32) -> &'static str {
    match day {
        1 | 21 | 31 => "st",
        2 | 22 => "nd",
        3 | 23 => "rd",
        _ => "th",
    }
}
