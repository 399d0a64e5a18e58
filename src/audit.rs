use crate::types::{AuditEntry, FlaggedRecord, REMEDIATION_ACTION};

/// Project the audit log: one entry per anomalous record, in input
/// order. Source records are not touched; the log is recomputed in full
/// on every run.
pub fn project_anomalies(records: &[FlaggedRecord]) -> Vec<AuditEntry> {
    records
        .iter()
        .filter(|r| r.is_anomalous())
        .map(audit_entry)
        .collect()
}

fn audit_entry(record: &FlaggedRecord) -> AuditEntry {
    AuditEntry {
        anomalous_user_id: record.typed.id,
        original_creation_date: record.typed.created_at,
        remediation_action: REMEDIATION_ACTION.to_string(),
        is_age_anomaly: record.flags.age,
        is_identifier_anomaly: record.flags.identifier,
        is_status_anomaly: record.flags.status,
        raw_email: record.typed.raw.email.clone(),
        raw_phone: record.typed.raw.phone.clone(),
    }
}
