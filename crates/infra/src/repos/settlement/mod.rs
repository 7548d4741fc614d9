mod inmemory;
mod postgres;

pub use inmemory::InMemorySettlementRepo;
use koll_scheduler_domain::{Settlement, SettlementReminderPatch, ID};
pub use postgres::PostgresSettlementRepo;

#[async_trait::async_trait]
pub trait ISettlementRepo: Send + Sync {
    async fn insert(&self, settlement: &Settlement) -> anyhow::Result<()>;
    async fn find(&self, settlement_id: &ID) -> Option<Settlement>;
    /// Settled records are included so their reminder can be cancelled.
    async fn find_all(&self) -> anyhow::Result<Vec<Settlement>>;
    async fn update_reminder_state(
        &self,
        settlement_id: &ID,
        patch: &SettlementReminderPatch,
    ) -> anyhow::Result<()>;
}
