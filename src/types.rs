use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Minimum age in whole years at account creation
pub const ADULT_AGE_YEARS: i32 = 18;

/// Sentinel for a phone number that failed coercion or validation.
/// Negative, so it can never collide with a real 10-digit number.
pub const PHONE_SENTINEL: i64 = -999_999_999;

/// Sentinel for an id that failed coercion
pub const ID_SENTINEL: i64 = -1;

/// Placeholder for a name that is missing or blank after trimming
pub const NAME_PLACEHOLDER: &str = "Unknown";

/// Placeholder for an email that never parsed upstream
pub const EMAIL_PLACEHOLDER: &str = "unknown@invalid";

/// Normalized status value that survives remediation as-is
pub const STATUS_ACTIVE: &str = "active";

/// Reserved/test area codes that make a phone number invalid
pub const RESERVED_PHONE_PREFIXES: &[i64] = &[555, 911];

/// Fixed audit text describing what the remediation stage does to a
/// flagged row. Documents policy; the policy itself lives in `remediate`.
pub const REMEDIATION_ACTION: &str =
    "Status changed to 'cancelled' due to validation failure";

/// Columns the source table must carry. Anything missing here is a
/// schema error, not a data-quality anomaly.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "id",
    "first_name",
    "last_name",
    "email",
    "phone",
    "birth_date",
    "created_at",
    "status",
];

/// Date/timestamp parse format for the coercion stage.
///
/// The source data is ambiguous about its canonical format, so callers
/// must pin exactly one; it governs both `birth_date` and `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    /// US month/day/year, e.g. 06/15/2000
    MonthDayYear,
    /// ISO year-month-day, e.g. 2000-06-15
    Iso,
}

impl DateFormat {
    /// Resolve a configuration name to a format.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "mdy" | "us" => Ok(DateFormat::MonthDayYear),
            "iso" => Ok(DateFormat::Iso),
            other => Err(crate::error::Error::Config(format!(
                "unsupported date format '{}' (expected 'mdy' or 'iso')",
                other
            ))),
        }
    }

    pub fn date_format(&self) -> &'static str {
        match self {
            DateFormat::MonthDayYear => "%m/%d/%Y",
            DateFormat::Iso => "%Y-%m-%d",
        }
    }

    pub fn datetime_format(&self) -> &'static str {
        match self {
            DateFormat::MonthDayYear => "%m/%d/%Y %H:%M:%S",
            DateFormat::Iso => "%Y-%m-%d %H:%M:%S",
        }
    }
}

/// A row as ingested: untyped, possibly missing or malformed fields.
/// A structurally present but empty (or missing-token) cell is `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<String>,
    pub created_at: Option<String>,
    pub status: Option<String>,
}

/// A raw row plus its typed/normalized derivations. A typed field is
/// present only if its source parsed under the configured format; there
/// are no sentinel values at this layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedRecord {
    pub raw: RawRecord,
    pub id: Option<i64>,
    pub phone: Option<i64>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: Option<NaiveDateTime>,
    pub status_normalized: Option<String>,
    pub email_normalized: Option<String>,
}

/// Per-record anomaly flags, one per validation dimension.
///
/// The overall flag is derived, never stored, so it is always exactly
/// the disjunction of the three.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnomalyFlags {
    pub age: bool,
    pub identifier: bool,
    pub status: bool,
}

impl AnomalyFlags {
    /// Overall anomaly flag
    pub fn any(&self) -> bool {
        self.age || self.identifier || self.status
    }
}

/// A typed record plus its classification
#[derive(Debug, Clone, PartialEq)]
pub struct FlaggedRecord {
    pub typed: TypedRecord,
    pub flags: AnomalyFlags,
}

impl FlaggedRecord {
    pub fn is_anomalous(&self) -> bool {
        self.flags.any()
    }
}

/// Read-only audit projection of one anomalous record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub anomalous_user_id: Option<i64>,
    pub original_creation_date: Option<NaiveDateTime>,
    pub remediation_action: String,
    pub is_age_anomaly: bool,
    pub is_identifier_anomaly: bool,
    pub is_status_anomaly: bool,
    /// Original raw values, kept for diagnosis
    pub raw_email: Option<String>,
    pub raw_phone: Option<String>,
}

/// Final status after remediation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinalStatus {
    Active,
    Cancelled,
}

impl FinalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinalStatus::Active => "active",
            FinalStatus::Cancelled => "cancelled",
        }
    }
}

/// Final output schema. No field is optional; everything that could not
/// be derived upstream holds its documented sentinel instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: i64,
    pub status: FinalStatus,
    pub birth_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

/// Result type for the application
pub type Result<T> = std::result::Result<T, crate::error::Error>;
