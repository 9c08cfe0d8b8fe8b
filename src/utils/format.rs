//! Display formatting for numbers, dates, phone numbers and text.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Group digits by thousands: `1234567` -> `"1,234,567"`.
pub fn format_number(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Format a price, rounded to whole won.
pub fn format_price(value: f64) -> String {
    format_number(value.round() as i64)
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format a timestamp with a `YYYY`/`MM`/`DD` pattern, e.g. `"YYYY.MM.DD"`.
/// Unparseable input gives an empty string.
pub fn format_date(value: &str, pattern: &str) -> String {
    match parse_datetime(value) {
        Some(dt) => pattern
            .replacen("YYYY", &dt.format("%Y").to_string(), 1)
            .replacen("MM", &dt.format("%m").to_string(), 1)
            .replacen("DD", &dt.format("%d").to_string(), 1),
        None => String::new(),
    }
}

/// Coarse relative time of `then` as seen at `now`.
pub fn time_ago(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let elapsed = now - then;
    if elapsed.num_days() > 0 {
        format!("{} days ago", elapsed.num_days())
    } else if elapsed.num_hours() > 0 {
        format!("{} hours ago", elapsed.num_hours())
    } else if elapsed.num_minutes() > 0 {
        format!("{} minutes ago", elapsed.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Cut `text` to `max_chars` characters and mark the cut with `...`.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// `01012345678` or `010 1234 5678` -> `010-1234-5678`. Anything that is
/// not eleven digits is returned unchanged.
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 11 {
        return phone.to_string();
    }
    format!("{}-{}-{}", &digits[..3], &digits[3..7], &digits[7..])
}
