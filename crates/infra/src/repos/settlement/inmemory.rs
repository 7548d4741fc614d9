use super::ISettlementRepo;
use crate::repos::shared::inmemory_repo;
use koll_scheduler_domain::{Settlement, SettlementReminderPatch, ID};
use std::sync::Mutex;

pub struct InMemorySettlementRepo {
    settlements: Mutex<Vec<Settlement>>,
}

impl InMemorySettlementRepo {
    pub fn new() -> Self {
        Self {
            settlements: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ISettlementRepo for InMemorySettlementRepo {
    async fn insert(&self, settlement: &Settlement) -> anyhow::Result<()> {
        inmemory_repo::insert(settlement, &self.settlements);
        Ok(())
    }

    async fn find(&self, settlement_id: &ID) -> Option<Settlement> {
        inmemory_repo::find(settlement_id, &self.settlements)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Settlement>> {
        Ok(inmemory_repo::find_by(&self.settlements, |_| true))
    }

    async fn update_reminder_state(
        &self,
        settlement_id: &ID,
        patch: &SettlementReminderPatch,
    ) -> anyhow::Result<()> {
        inmemory_repo::update_one(&self.settlements, settlement_id, |s| {
            s.reminder_job_id = patch.reminder_job_id.clone();
        });
        Ok(())
    }
}
