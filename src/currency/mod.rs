//! Display helpers for amounts and record dates.

use chrono::Datelike;

use crate::ledger::date::parse_record_date;

const MAX_FRACTION_DIGITS: usize = 2;
const GROUPING_SEPARATOR: char = ',';

/// Formats `value` with thousands grouping and at most two fraction digits,
/// dropping trailing zeros (`1234.5` → `1,234.5`, `100` → `100`).
pub fn format_number(value: f64) -> String {
    let mut body = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    if body.contains('.') {
        let trimmed_len = body.trim_end_matches('0').trim_end_matches('.').len();
        body.truncate(trimmed_len);
    }
    let (int_part, fraction) = match body.find('.') {
        Some(pos) => body.split_at(pos),
        None => (body.as_str(), ""),
    };
    let grouped = group_digits(int_part, GROUPING_SEPARATOR);
    let is_zero = grouped.chars().all(|c| c == '0' || c == GROUPING_SEPARATOR) && fraction.is_empty();
    if value < 0.0 && !is_zero {
        format!("-{}{}", grouped, fraction)
    } else {
        format!("{}{}", grouped, fraction)
    }
}

/// Prefixes the formatted amount with the configured currency label.
pub fn format_amount(label: &str, value: f64) -> String {
    if label.is_empty() {
        format_number(value)
    } else {
        format!("{} {}", label, format_number(value))
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// Renders a stored record date as `DD Mon YYYY`; unparsable input is shown verbatim.
pub fn format_record_date(raw: &str) -> String {
    match parse_record_date(raw) {
        Some(date) => format!(
            "{:02} {} {}",
            date.day(),
            month_label(date.month()),
            date.year()
        ),
        None if raw.trim().is_empty() => "-".to_string(),
        None => raw.trim().to_string(),
    }
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_and_trims_fraction() {
        assert_eq!(format_number(1234.5), "1,234.5");
        assert_eq!(format_number(1_000_000.0), "1,000,000");
        assert_eq!(format_number(12.346), "12.35");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn negative_values_keep_sign() {
        assert_eq!(format_number(-50.0), "-50");
        assert_eq!(format_number(-1234.25), "-1,234.25");
        assert_eq!(format_number(-0.001), "0");
    }

    #[test]
    fn amount_carries_label() {
        assert_eq!(format_amount("KES", 2500.0), "KES 2,500");
        assert_eq!(format_amount("", 2500.0), "2,500");
    }

    #[test]
    fn record_dates_render_medium_style() {
        assert_eq!(format_record_date("2024-01-02T08:00:00.000Z"), "02 Jan 2024");
        assert_eq!(format_record_date("someday"), "someday");
        assert_eq!(format_record_date(""), "-");
    }
}
