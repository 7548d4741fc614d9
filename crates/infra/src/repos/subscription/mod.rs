mod inmemory;
mod postgres;

use chrono::{DateTime, Utc};
pub use inmemory::InMemorySubscriptionRepo;
use koll_scheduler_domain::{Subscription, SubscriptionReminderPatch, ID};
pub use postgres::PostgresSubscriptionRepo;

#[async_trait::async_trait]
pub trait ISubscriptionRepo: Send + Sync {
    async fn insert(&self, subscription: &Subscription) -> anyhow::Result<()>;
    async fn find(&self, subscription_id: &ID) -> Option<Subscription>;
    /// Reminder candidates: every subscription. Paused ones take the cancel
    /// branch of the policy.
    async fn find_all(&self) -> anyhow::Result<Vec<Subscription>>;
    /// Charge candidates: next charge at or before `now` and not paused.
    async fn find_charges_due(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<Subscription>>;
    async fn update_reminder_state(
        &self,
        subscription_id: &ID,
        patch: &SubscriptionReminderPatch,
    ) -> anyhow::Result<()>;
    /// Advances the charge schedule after a posted charge.
    async fn update_charge_schedule(
        &self,
        subscription_id: &ID,
        next_charge_at: DateTime<Utc>,
    ) -> anyhow::Result<()>;
}
