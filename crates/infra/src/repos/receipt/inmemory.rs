use super::IReceiptRepo;
use crate::repos::shared::inmemory_repo;
use chrono::{DateTime, Utc};
use koll_scheduler_domain::scheduling::parse_instant;
use koll_scheduler_domain::{Receipt, ReceiptReminderPatch, ID};
use std::sync::Mutex;

pub struct InMemoryReceiptRepo {
    receipts: Mutex<Vec<Receipt>>,
}

impl InMemoryReceiptRepo {
    pub fn new() -> Self {
        Self {
            receipts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReceiptRepo for InMemoryReceiptRepo {
    async fn insert(&self, receipt: &Receipt) -> anyhow::Result<()> {
        inmemory_repo::insert(receipt, &self.receipts);
        Ok(())
    }

    async fn find(&self, receipt_id: &ID) -> Option<Receipt> {
        inmemory_repo::find(receipt_id, &self.receipts)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Receipt>> {
        Ok(inmemory_repo::find_by(&self.receipts, |r| !r.archived))
    }

    async fn find_with_deadline_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Receipt>> {
        let in_window = |value: Option<&str>| match parse_instant(value) {
            Some(instant) => instant >= from && instant < to,
            None => false,
        };
        Ok(inmemory_repo::find_by(&self.receipts, |r| {
            r.reminders_enabled
                && !r.archived
                && r.deadline_fields()
                    .iter()
                    .any(|(_, value)| in_window(*value))
        }))
    }

    async fn update_reminder_state(
        &self,
        receipt_id: &ID,
        patch: &ReceiptReminderPatch,
    ) -> anyhow::Result<()> {
        inmemory_repo::update_one(&self.receipts, receipt_id, |r| {
            r.reminder_jobs = patch.reminder_jobs.clone();
            r.reminder1_at = patch.reminder1_at;
            r.reminder2_at = patch.reminder2_at;
        });
        Ok(())
    }
}
