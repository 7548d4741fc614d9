use super::ISubscriptionRepo;
use crate::repos::shared::inmemory_repo;
use chrono::{DateTime, Utc};
use koll_scheduler_domain::scheduling::parse_instant;
use koll_scheduler_domain::{Subscription, SubscriptionReminderPatch, ID};
use std::sync::Mutex;

pub struct InMemorySubscriptionRepo {
    subscriptions: Mutex<Vec<Subscription>>,
}

impl InMemorySubscriptionRepo {
    pub fn new() -> Self {
        Self {
            subscriptions: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ISubscriptionRepo for InMemorySubscriptionRepo {
    async fn insert(&self, subscription: &Subscription) -> anyhow::Result<()> {
        inmemory_repo::insert(subscription, &self.subscriptions);
        Ok(())
    }

    async fn find(&self, subscription_id: &ID) -> Option<Subscription> {
        inmemory_repo::find(subscription_id, &self.subscriptions)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Subscription>> {
        Ok(inmemory_repo::find_by(&self.subscriptions, |_| true))
    }

    async fn find_charges_due(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<Subscription>> {
        Ok(inmemory_repo::find_by(&self.subscriptions, |s| {
            !s.is_paused
                && match parse_instant(s.next_charge_at.as_deref()) {
                    Some(charge_at) => charge_at < now,
                    None => false,
                }
        }))
    }

    async fn update_reminder_state(
        &self,
        subscription_id: &ID,
        patch: &SubscriptionReminderPatch,
    ) -> anyhow::Result<()> {
        inmemory_repo::update_one(&self.subscriptions, subscription_id, |s| {
            s.charge_reminder_job_ids = patch.charge_reminder_job_ids.clone();
            s.trial_reminder_job_id = patch.trial_reminder_job_id.clone();
        });
        Ok(())
    }

    async fn update_charge_schedule(
        &self,
        subscription_id: &ID,
        next_charge_at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        inmemory_repo::update_one(&self.subscriptions, subscription_id, |s| {
            s.next_charge_at = Some(next_charge_at.to_rfc3339());
        });
        Ok(())
    }
}
