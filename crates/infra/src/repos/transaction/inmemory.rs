use super::ITransactionRepo;
use crate::repos::shared::inmemory_repo;
use koll_scheduler_domain::{Transaction, ID};
use std::sync::Mutex;

pub struct InMemoryTransactionRepo {
    transactions: Mutex<Vec<Transaction>>,
}

impl InMemoryTransactionRepo {
    pub fn new() -> Self {
        Self {
            transactions: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ITransactionRepo for InMemoryTransactionRepo {
    async fn insert(&self, transaction: &Transaction) -> anyhow::Result<()> {
        inmemory_repo::insert(transaction, &self.transactions);
        Ok(())
    }

    async fn find_by_budget(&self, budget_id: &ID) -> anyhow::Result<Vec<Transaction>> {
        Ok(inmemory_repo::find_by(&self.transactions, |t| {
            t.budget_id == *budget_id
        }))
    }
}
