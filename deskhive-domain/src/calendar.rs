use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Raw date input could not be parsed into a calendar date
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not parse {input:?} as a reservation date")]
pub struct DateParseError {
    pub input: String,
}

/// Normalize raw booking input into a pure calendar date.
///
/// Accepts a date-only string (`2026-09-01`) or a full timestamp
/// (RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS`). Time-of-day is always
/// discarded; only the calendar day survives.
pub fn parse_reservation_date(input: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.date_naive());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(ts.date());
    }

    Err(DateParseError {
        input: trimmed.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_date_only_input() {
        let date = parse_reservation_date("2026-09-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 9, 1).unwrap());
    }

    #[test]
    fn test_timestamp_input_keeps_only_the_calendar_day() {
        let date = parse_reservation_date("2026-09-01T23:59:59+02:00").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 9, 1).unwrap());

        let naive = parse_reservation_date("2026-09-01T08:30:00").unwrap();
        assert_eq!(naive, NaiveDate::from_ymd_opt(2026, 9, 1).unwrap());
    }

    #[test]
    fn test_rejects_unparseable_input() {
        assert!(parse_reservation_date("next tuesday").is_err());
        assert!(parse_reservation_date("01/09/2026").is_err());
        assert!(parse_reservation_date("").is_err());
    }
}
