use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a stored record date.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM[:SS]` timestamps
/// (read as local time) and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_record_date(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(local_to_utc(naive));
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// Wall-clock times skipped by a DST jump have no local instant; read those as UTC.
fn local_to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    naive
        .and_local_timezone(Local)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

/// Sort key for ledger ordering. Unparsable dates rank as the earliest instant.
pub fn ledger_sort_key(raw: &str) -> DateTime<Utc> {
    parse_record_date(raw).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Timestamp format used for records created by this crate.
pub fn format_record_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Normalizes user-entered dates into the stored timestamp format.
pub fn normalize_record_date(raw: &str) -> Option<String> {
    parse_record_date(raw).map(format_record_timestamp)
}
