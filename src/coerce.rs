use chrono::{NaiveDate, NaiveDateTime};

use crate::types::{DateFormat, RawRecord, TypedRecord};

/// Missing value tokens
pub const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "na", "n/a", "NULL", "null", "NaN", "nan", "None", "none",
];

/// Check if a raw cell value represents a missing value
pub fn is_missing(value: &str) -> bool {
    let trimmed = value.trim();
    MISSING_TOKENS.iter().any(|t| trimmed.eq_ignore_ascii_case(t))
}

/// Derive the typed layer for one raw record.
///
/// Every parse failure degrades to `None`; nothing in this stage errors
/// on malformed data. The configured format governs both the date and
/// the timestamp field.
pub fn coerce_record(raw: RawRecord, format: DateFormat) -> TypedRecord {
    let id = parse_int(raw.id.as_deref());
    let phone = parse_int(raw.phone.as_deref());
    let birth_date = parse_date(raw.birth_date.as_deref(), format);
    let created_at = parse_timestamp(raw.created_at.as_deref(), format);
    let status_normalized = normalize_status(raw.status.as_deref());
    let email_normalized = normalize_email(raw.email.as_deref());

    TypedRecord {
        raw,
        id,
        phone,
        birth_date,
        created_at,
        status_normalized,
        email_normalized,
    }
}

/// Attempt an integer cast; failure is `None`, never an error
pub fn parse_int(value: Option<&str>) -> Option<i64> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

/// Parse a date string under the configured format
pub fn parse_date(value: Option<&str>, format: DateFormat) -> Option<NaiveDate> {
    let trimmed = value?.trim();
    NaiveDate::parse_from_str(trimmed, format.date_format()).ok()
}

/// Parse a timestamp string under the configured format. A date-only
/// value is accepted and resolves to midnight, matching sources that
/// record creation timestamps at day granularity.
pub fn parse_timestamp(value: Option<&str>, format: DateFormat) -> Option<NaiveDateTime> {
    let trimmed = value?.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format.datetime_format()) {
        return Some(dt);
    }
    NaiveDate::parse_from_str(trimmed, format.date_format())
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Lowercase the status; missing input yields missing output
fn normalize_status(value: Option<&str>) -> Option<String> {
    value.map(|s| s.to_lowercase())
}

/// Strip surrounding whitespace from the email
fn normalize_email(value: Option<&str>) -> Option<String> {
    value.map(|s| s.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(field: &str, value: &str) -> RawRecord {
        let mut r = RawRecord::default();
        let v = Some(value.to_string());
        match field {
            "id" => r.id = v,
            "email" => r.email = v,
            "phone" => r.phone = v,
            "birth_date" => r.birth_date = v,
            "created_at" => r.created_at = v,
            "status" => r.status = v,
            _ => panic!("unknown field {}", field),
        }
        r
    }

    #[test]
    fn test_is_missing() {
        assert!(is_missing(""));
        assert!(is_missing("   "));
        assert!(is_missing("NA"));
        assert!(is_missing("n/a"));
        assert!(is_missing("NULL"));
        assert!(is_missing("none"));
        assert!(!is_missing("0"));
        assert!(!is_missing("active"));
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int(Some("42")), Some(42));
        assert_eq!(parse_int(Some(" 42 ")), Some(42));
        assert_eq!(parse_int(Some("abc")), None);
        assert_eq!(parse_int(Some("")), None);
        assert_eq!(parse_int(None), None);
    }

    #[test]
    fn test_parse_int_drops_leading_zero() {
        // A 10-digit string with a leading zero casts to a 9-digit number;
        // the classifier rejects it later on digit count.
        assert_eq!(parse_int(Some("0123456789")), Some(123_456_789));
    }

    #[test]
    fn test_parse_date_mdy() {
        let d = parse_date(Some("06/15/2000"), DateFormat::MonthDayYear).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2000, 6, 15).unwrap());
        assert_eq!(parse_date(Some("2000-06-15"), DateFormat::MonthDayYear), None);
        assert_eq!(parse_date(Some("13/40/2000"), DateFormat::MonthDayYear), None);
    }

    #[test]
    fn test_parse_date_iso() {
        let d = parse_date(Some("2000-06-15"), DateFormat::Iso).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2000, 6, 15).unwrap());
        assert_eq!(parse_date(Some("06/15/2000"), DateFormat::Iso), None);
    }

    #[test]
    fn test_parse_timestamp_full_and_date_only() {
        let full = parse_timestamp(Some("2018-06-15 10:30:00"), DateFormat::Iso).unwrap();
        assert_eq!(
            full,
            NaiveDate::from_ymd_opt(2018, 6, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap()
        );

        let midnight = parse_timestamp(Some("06/15/2018"), DateFormat::MonthDayYear).unwrap();
        assert_eq!(
            midnight,
            NaiveDate::from_ymd_opt(2018, 6, 15)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );

        assert_eq!(parse_timestamp(Some("soon"), DateFormat::Iso), None);
    }

    #[test]
    fn test_coerce_record_normalizes_text() {
        let mut r = raw("status", "ACTIVE");
        r.email = Some("  user@example.com  ".to_string());
        let typed = coerce_record(r, DateFormat::MonthDayYear);

        assert_eq!(typed.status_normalized.as_deref(), Some("active"));
        assert_eq!(typed.email_normalized.as_deref(), Some("user@example.com"));
    }

    #[test]
    fn test_coerce_record_missing_stays_missing() {
        let typed = coerce_record(RawRecord::default(), DateFormat::Iso);

        assert_eq!(typed.id, None);
        assert_eq!(typed.phone, None);
        assert_eq!(typed.birth_date, None);
        assert_eq!(typed.created_at, None);
        assert_eq!(typed.status_normalized, None);
        assert_eq!(typed.email_normalized, None);
    }

    #[test]
    fn test_coerce_record_malformed_degrades() {
        let mut r = raw("id", "not-a-number");
        r.phone = Some("555-123-4567".to_string());
        r.birth_date = Some("yesterday".to_string());
        let typed = coerce_record(r, DateFormat::Iso);

        assert_eq!(typed.id, None);
        assert_eq!(typed.phone, None);
        assert_eq!(typed.birth_date, None);
        // Raw values survive coercion untouched
        assert_eq!(typed.raw.phone.as_deref(), Some("555-123-4567"));
    }
}
