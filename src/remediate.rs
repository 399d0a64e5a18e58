use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;

use crate::types::{
    CleanedRecord, FinalStatus, FlaggedRecord, EMAIL_PLACEHOLDER, ID_SENTINEL, NAME_PLACEHOLDER,
    PHONE_SENTINEL, STATUS_ACTIVE,
};

// Imputed dates for records whose coercion failed upstream. Such records
// are always anomalous, so the sentinel only ever appears on cancelled rows.
static SENTINEL_DATE: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(1900, 1, 1).unwrap());
static SENTINEL_TIMESTAMP: Lazy<NaiveDateTime> =
    Lazy::new(|| SENTINEL_DATE.and_hms_opt(0, 0, 0).unwrap());

/// Remediate every flagged record. Total: one output row per input row,
/// always — invalid accounts are cancelled, never dropped.
pub fn remediate(records: &[FlaggedRecord]) -> Vec<CleanedRecord> {
    records.iter().map(remediate_record).collect()
}

/// Rewrite one record into the final schema, imputing sentinels for
/// anything the coercion stage could not derive.
pub fn remediate_record(record: &FlaggedRecord) -> CleanedRecord {
    let typed = &record.typed;

    CleanedRecord {
        id: typed.id.unwrap_or(ID_SENTINEL),
        first_name: clean_name(typed.raw.first_name.as_deref()),
        last_name: clean_name(typed.raw.last_name.as_deref()),
        email: typed
            .email_normalized
            .clone()
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| EMAIL_PLACEHOLDER.to_string()),
        phone: typed.phone.unwrap_or(PHONE_SENTINEL),
        status: final_status(record),
        birth_date: typed.birth_date.unwrap_or(*SENTINEL_DATE),
        created_at: typed.created_at.unwrap_or(*SENTINEL_TIMESTAMP),
    }
}

/// Soft-delete policy: active only for a clean record whose normalized
/// status is already "active"; everything else is cancelled.
fn final_status(record: &FlaggedRecord) -> FinalStatus {
    let is_active = record.typed.status_normalized.as_deref() == Some(STATUS_ACTIVE);
    if !record.is_anomalous() && is_active {
        FinalStatus::Active
    } else {
        FinalStatus::Cancelled
    }
}

/// Trim and title-case a name; blank or missing names get the placeholder
fn clean_name(value: Option<&str>) -> String {
    let cleaned = value.map(|v| title_case(v.trim())).unwrap_or_default();
    if cleaned.is_empty() {
        NAME_PLACEHOLDER.to_string()
    } else {
        cleaned
    }
}

/// Uppercase the first letter of each word, lowercase the rest. Word
/// boundaries are any non-alphabetic character, so hyphenated names keep
/// both capitals.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;

    for c in value.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::coerce_record;
    use crate::rules::classify;
    use crate::types::{DateFormat, RawRecord};

    fn run_one(raw: RawRecord) -> CleanedRecord {
        let typed = coerce_record(raw, DateFormat::Iso);
        let flags = classify(&typed);
        remediate_record(&FlaggedRecord { typed, flags })
    }

    fn valid_raw() -> RawRecord {
        RawRecord {
            id: Some("42".to_string()),
            first_name: Some("ada".to_string()),
            last_name: Some("lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            phone: Some("9999999999".to_string()),
            birth_date: Some("2000-06-15".to_string()),
            created_at: Some("2020-01-01".to_string()),
            status: Some("Active".to_string()),
        }
    }

    #[test]
    fn test_clean_active_record_stays_active() {
        let cleaned = run_one(valid_raw());
        assert_eq!(cleaned.status, FinalStatus::Active);
        assert_eq!(cleaned.id, 42);
        assert_eq!(cleaned.first_name, "Ada");
        assert_eq!(cleaned.last_name, "Lovelace");
        assert_eq!(cleaned.phone, 9_999_999_999);
    }

    #[test]
    fn test_anomalous_record_cancelled() {
        let mut raw = valid_raw();
        raw.phone = Some("5551234567".to_string());
        assert_eq!(run_one(raw).status, FinalStatus::Cancelled);
    }

    #[test]
    fn test_clean_but_inactive_status_cancelled() {
        let mut raw = valid_raw();
        raw.status = Some("pending".to_string());
        assert_eq!(run_one(raw).status, FinalStatus::Cancelled);
    }

    #[test]
    fn test_blank_name_imputed() {
        let mut raw = valid_raw();
        raw.first_name = Some("   ".to_string());
        raw.last_name = None;
        let cleaned = run_one(raw);
        assert_eq!(cleaned.first_name, NAME_PLACEHOLDER);
        assert_eq!(cleaned.last_name, NAME_PLACEHOLDER);
        // Name problems alone do not cancel a clean record
        assert_eq!(cleaned.status, FinalStatus::Active);
    }

    #[test]
    fn test_missing_phone_gets_sentinel() {
        let mut raw = valid_raw();
        raw.phone = Some("call me".to_string());
        let cleaned = run_one(raw);
        assert_eq!(cleaned.phone, PHONE_SENTINEL);
        assert_eq!(cleaned.status, FinalStatus::Cancelled);
    }

    #[test]
    fn test_fully_missing_record_is_total() {
        let cleaned = run_one(RawRecord::default());
        assert_eq!(cleaned.id, ID_SENTINEL);
        assert_eq!(cleaned.first_name, NAME_PLACEHOLDER);
        assert_eq!(cleaned.email, EMAIL_PLACEHOLDER);
        assert_eq!(cleaned.phone, PHONE_SENTINEL);
        assert_eq!(cleaned.status, FinalStatus::Cancelled);
        assert_eq!(cleaned.birth_date, *SENTINEL_DATE);
        assert_eq!(cleaned.created_at, *SENTINEL_TIMESTAMP);
    }

    #[test]
    fn test_no_row_dropped() {
        let records: Vec<FlaggedRecord> = vec![
            RawRecord::default(),
            valid_raw(),
            RawRecord {
                status: Some("banned".to_string()),
                ..RawRecord::default()
            },
        ]
        .into_iter()
        .map(|raw| {
            let typed = coerce_record(raw, DateFormat::Iso);
            let flags = classify(&typed);
            FlaggedRecord { typed, flags }
        })
        .collect();

        assert_eq!(remediate(&records).len(), records.len());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("ada"), "Ada");
        assert_eq!(title_case("ADA"), "Ada");
        assert_eq!(title_case("mary-jane"), "Mary-Jane");
        assert_eq!(title_case("van der berg"), "Van Der Berg");
        assert_eq!(title_case(""), "");
    }
}
