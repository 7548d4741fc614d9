use crate::shared::entity::{Entity, ID};
use crate::shared::notification::JobId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A purchase receipt with up to four named deadlines. The deadline fields
/// are kept as the raw strings the store hands us; unparseable values are
/// dropped by the deadline extractor, never surfaced as errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub id: ID,
    pub owner_id: ID,
    pub store: String,
    pub return_deadline: Option<String>,
    pub exchange_deadline: Option<String>,
    pub warranty_expires: Option<String>,
    pub refund_deadline: Option<String>,
    #[serde(default, deserialize_with = "crate::shared::flag::lenient_bool")]
    pub reminders_enabled: bool,
    #[serde(default, deserialize_with = "crate::shared::flag::lenient_bool")]
    pub archived: bool,
    /// Transport job refs from the previous evaluation, keyed by deadline kind
    #[serde(default)]
    pub reminder_jobs: HashMap<String, Vec<JobId>>,
    pub reminder1_at: Option<DateTime<Utc>>,
    pub reminder2_at: Option<DateTime<Utc>>,
}

impl Receipt {
    /// Candidate deadlines in policy-declared order.
    pub fn deadline_fields(&self) -> [(&'static str, Option<&str>); 4] {
        [
            ("return_deadline", self.return_deadline.as_deref()),
            ("exchange_deadline", self.exchange_deadline.as_deref()),
            ("warranty_expires", self.warranty_expires.as_deref()),
            ("refund_deadline", self.refund_deadline.as_deref()),
        ]
    }

    pub fn existing_job_ids(&self) -> Vec<&JobId> {
        self.reminder_jobs.values().flatten().collect()
    }
}

impl Entity for Receipt {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Full-replacement persistence patch produced by one evaluation of a
/// receipt. Every job id listed here was accepted by the transport in the
/// same run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptReminderPatch {
    pub reminder_jobs: HashMap<String, Vec<JobId>>,
    pub reminder1_at: Option<DateTime<Utc>>,
    pub reminder2_at: Option<DateTime<Utc>>,
}

impl ReceiptReminderPatch {
    pub fn cleared() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_legacy_flag_shapes() {
        let receipt: Receipt = serde_json::from_str(
            r#"{
                "id": "9e8c4696-4e4c-4232-9d88-7fbd2b8628bc",
                "owner_id": "bfc33ac2-9a62-46ff-b71e-a02b51face0d",
                "store": "Elgiganten",
                "return_deadline": "2026-09-20T00:00:00Z",
                "reminders_enabled": 1,
                "reminder1_at": null,
                "reminder2_at": null,
                "exchange_deadline": null,
                "warranty_expires": null,
                "refund_deadline": null
            }"#,
        )
        .unwrap();
        assert!(receipt.reminders_enabled);
        assert!(!receipt.archived);
        assert!(receipt.reminder_jobs.is_empty());
    }

    #[test]
    fn flattens_job_ids_across_kinds() {
        let mut receipt: Receipt = serde_json::from_str(
            r#"{
                "id": "9e8c4696-4e4c-4232-9d88-7fbd2b8628bc",
                "owner_id": "bfc33ac2-9a62-46ff-b71e-a02b51face0d",
                "store": "Elgiganten",
                "return_deadline": null,
                "exchange_deadline": null,
                "warranty_expires": null,
                "refund_deadline": null,
                "reminders_enabled": true,
                "reminder1_at": null,
                "reminder2_at": null
            }"#,
        )
        .unwrap();
        receipt
            .reminder_jobs
            .insert("return_deadline".into(), vec!["job_a".into(), "job_b".into()]);
        receipt
            .reminder_jobs
            .insert("refund_deadline".into(), vec!["job_c".into()]);

        let mut ids = receipt.existing_job_ids();
        ids.sort();
        assert_eq!(ids, vec!["job_a", "job_b", "job_c"]);
    }
}
