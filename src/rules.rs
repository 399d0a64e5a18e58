use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{AnomalyFlags, TypedRecord, ADULT_AGE_YEARS, RESERVED_PHONE_PREFIXES};

// RFC-5322-derived grammar: dot-atom or quoted local part, hostname or
// bracketed IP-literal domain. Anchored so the whole value must match.
// Adapted from https://stackoverflow.com/a/201378/986793
const EMAIL_GRAMMAR: &str = r#"(?i)^(?:[a-z0-9!#$%&'*+\x2f=?^_`\x7b-\x7d~\x2d]+(?:\.[a-z0-9!#$%&'*+\x2f=?^_`\x7b-\x7d~\x2d]+)*|"(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21\x23-\x5b\x5d-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*")@(?:(?:[a-z0-9](?:[a-z0-9\x2d]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9\x2d]*[a-z0-9])?|\[(?:(?:2(?:5[0-5]|[0-4][0-9])|1[0-9][0-9]|[1-9]?[0-9])\.){3}(?:(?:2(?:5[0-5]|[0-4][0-9])|1[0-9][0-9]|[1-9]?[0-9])|[a-z0-9\x2d]*[a-z0-9]:(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21-\x5a\x53-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])+)\])$"#;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(EMAIL_GRAMMAR).unwrap());

/// Evaluate all three anomaly dimensions for one typed record.
///
/// Every predicate is computed; a record anomalous along one dimension
/// still gets accurate flags on the others for the audit log.
pub fn classify(typed: &TypedRecord) -> AnomalyFlags {
    AnomalyFlags {
        age: is_age_anomaly(typed),
        identifier: is_identifier_anomaly(typed),
        status: is_status_anomaly(typed),
    }
}

/// TRUE if the user was under 18 at account creation, or either date is
/// missing/unparsable.
pub fn is_age_anomaly(typed: &TypedRecord) -> bool {
    match (typed.birth_date, typed.created_at) {
        (Some(birth), Some(created)) => {
            age_in_years(birth, created.date()) < ADULT_AGE_YEARS
        }
        _ => true,
    }
}

/// Whole years elapsed between `birth` and `at`, counting a year only
/// once the birthday has passed. Naive year subtraction overcounts for
/// anyone whose birthday falls later in the year than `at`.
fn age_in_years(birth: NaiveDate, at: NaiveDate) -> i32 {
    let mut years = at.year() - birth.year();
    if (at.month(), at.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years
}

/// TRUE if any required identifier (birth date, phone, email) is
/// invalid, missing, or unparsable.
pub fn is_identifier_anomaly(typed: &TypedRecord) -> bool {
    let birth_date_valid = typed.birth_date.is_some();
    let phone_valid = typed.phone.is_some_and(is_valid_phone);
    let email_valid = typed
        .email_normalized
        .as_deref()
        .is_some_and(is_valid_email);

    !birth_date_valid || !phone_valid || !email_valid
}

/// TRUE if the normalized status is missing or empty.
pub fn is_status_anomaly(typed: &TypedRecord) -> bool {
    typed
        .status_normalized
        .as_deref()
        .map_or(true, |s| s.is_empty())
}

/// A valid phone number has exactly 10 digits, a first digit other than
/// 0 or 1, and an area code outside the reserved set.
pub fn is_valid_phone(phone: i64) -> bool {
    if !(1_000_000_000..10_000_000_000).contains(&phone) {
        return false;
    }

    let first_digit = phone / 1_000_000_000;
    if first_digit == 0 || first_digit == 1 {
        return false;
    }

    let area_code = phone / 10_000_000;
    !RESERVED_PHONE_PREFIXES.contains(&area_code)
}

/// Full-grammar email check on the already-trimmed value
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && EMAIL_PATTERN.is_match(email)
}
