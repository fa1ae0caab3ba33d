//! Display formatting for dates, runtimes, and money.

use chrono::{Datelike, NaiveDate};

/// "Mar 15, 2024", or a dash when the date is unknown.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => "—".to_string(),
    }
}

/// Just the year, for card metadata lines.
pub fn format_year(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.year().to_string(),
        None => "—".to_string(),
    }
}

/// "2h 14m" style runtime, or a dash for zero/unknown.
pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        Some(0) | None => "—".to_string(),
        Some(m) if m < 60 => format!("{m}m"),
        Some(m) => format!("{}h {}m", m / 60, m % 60),
    }
}

/// "$1,234,567" with thousands separators, or a dash for zero.
pub fn format_currency(amount: u64) -> String {
    if amount == 0 {
        return "—".to_string();
    }
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
