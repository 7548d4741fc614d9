mod inmemory;
mod postgres;

use chrono::{DateTime, Utc};
pub use inmemory::InMemoryGiftCardRepo;
use koll_scheduler_domain::{GiftCard, GiftCardReminderPatch, ID};
pub use postgres::PostgresGiftCardRepo;

#[async_trait::async_trait]
pub trait IGiftCardRepo: Send + Sync {
    async fn insert(&self, giftcard: &GiftCard) -> anyhow::Result<()>;
    async fn find(&self, giftcard_id: &ID) -> Option<GiftCard>;
    /// Continuous-mode candidates: every gift card. The policy handles the
    /// disabled branch so stored refs get cancelled on disable.
    async fn find_all(&self) -> anyhow::Result<Vec<GiftCard>>;
    /// Batch-mode candidates: reminders on and expiring within `[from, to)`.
    async fn find_expiring_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<GiftCard>>;
    async fn update_reminder_state(
        &self,
        giftcard_id: &ID,
        patch: &GiftCardReminderPatch,
    ) -> anyhow::Result<()>;
}
