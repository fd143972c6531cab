use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %b %Y",
    "%d-%b-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an extracted timestamp. Date-only values resolve to midnight UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = clean(value)?;

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.and_utc());
        }
    }

    parse_date_only(trimmed).and_then(|date| date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()))
}

/// Parse any supported form down to its calendar date.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    parse_timestamp(value).map(|dt| dt.date_naive())
}

fn parse_date_only(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

fn clean(value: &str) -> Option<&str> {
    let trimmed = value
        .trim()
        .trim_end_matches(|c: char| c == '.' || c == ',')
        .trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn parses_iso_and_rfc3339() {
        assert_eq!(parse_calendar_date("2025-03-15"), Some(date(2025, 3, 15)));
        assert_eq!(
            parse_calendar_date("2025-03-15T23:30:00Z"),
            Some(date(2025, 3, 15))
        );
        assert_eq!(
            parse_calendar_date("2025-03-15T08:00:00"),
            Some(date(2025, 3, 15))
        );
    }

    #[test]
    fn parses_day_first_and_month_names() {
        assert_eq!(parse_calendar_date("15/03/2025"), Some(date(2025, 3, 15)));
        assert_eq!(parse_calendar_date("15.03.2025."), Some(date(2025, 3, 15)));
        assert_eq!(parse_calendar_date("15-MAR-2025"), Some(date(2025, 3, 15)));
        assert_eq!(parse_calendar_date("15 March 2025"), Some(date(2025, 3, 15)));
        assert_eq!(parse_calendar_date("March 15, 2025"), Some(date(2025, 3, 15)));
    }

    #[test]
    fn date_only_values_resolve_to_midnight_utc() {
        let parsed = parse_timestamp("2025-03-15").expect("parses");
        assert_eq!(parsed.to_rfc3339(), "2025-03-15T00:00:00+00:00");
    }

    #[test]
    fn rejects_blank_and_garbage() {
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("31/02/2025").is_none());
    }
}
