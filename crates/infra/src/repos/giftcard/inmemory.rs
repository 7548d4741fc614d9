use super::IGiftCardRepo;
use crate::repos::shared::inmemory_repo;
use chrono::{DateTime, Utc};
use koll_scheduler_domain::scheduling::parse_instant;
use koll_scheduler_domain::{GiftCard, GiftCardReminderPatch, ID};
use std::sync::Mutex;

pub struct InMemoryGiftCardRepo {
    giftcards: Mutex<Vec<GiftCard>>,
}

impl InMemoryGiftCardRepo {
    pub fn new() -> Self {
        Self {
            giftcards: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IGiftCardRepo for InMemoryGiftCardRepo {
    async fn insert(&self, giftcard: &GiftCard) -> anyhow::Result<()> {
        inmemory_repo::insert(giftcard, &self.giftcards);
        Ok(())
    }

    async fn find(&self, giftcard_id: &ID) -> Option<GiftCard> {
        inmemory_repo::find(giftcard_id, &self.giftcards)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<GiftCard>> {
        Ok(inmemory_repo::find_by(&self.giftcards, |_| true))
    }

    async fn find_expiring_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<GiftCard>> {
        Ok(inmemory_repo::find_by(&self.giftcards, |g| {
            g.reminders_enabled
                && match parse_instant(g.expires_at.as_deref()) {
                    Some(expires) => expires >= from && expires < to,
                    None => false,
                }
        }))
    }

    async fn update_reminder_state(
        &self,
        giftcard_id: &ID,
        patch: &GiftCardReminderPatch,
    ) -> anyhow::Result<()> {
        inmemory_repo::update_one(&self.giftcards, giftcard_id, |g| {
            g.reminder_job_ids = patch.reminder_job_ids.clone();
            g.reminder1_at = patch.reminder1_at;
            g.reminder2_at = patch.reminder2_at;
        });
        Ok(())
    }
}
