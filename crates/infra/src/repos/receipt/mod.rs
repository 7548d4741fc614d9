mod inmemory;
mod postgres;

use chrono::{DateTime, Utc};
pub use inmemory::InMemoryReceiptRepo;
use koll_scheduler_domain::{Receipt, ReceiptReminderPatch, ID};
pub use postgres::PostgresReceiptRepo;

#[async_trait::async_trait]
pub trait IReceiptRepo: Send + Sync {
    async fn insert(&self, receipt: &Receipt) -> anyhow::Result<()>;
    async fn find(&self, receipt_id: &ID) -> Option<Receipt>;
    /// Continuous-mode candidates: every receipt that is not archived. The
    /// policy itself handles the disabled branch so that stored job refs get
    /// cancelled when reminders are switched off.
    async fn find_all(&self) -> anyhow::Result<Vec<Receipt>>;
    /// Batch-mode candidates: reminders on, not archived, and any of the
    /// four deadlines falling within `[from, to)`.
    async fn find_with_deadline_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Receipt>>;
    async fn update_reminder_state(
        &self,
        receipt_id: &ID,
        patch: &ReceiptReminderPatch,
    ) -> anyhow::Result<()>;
}
