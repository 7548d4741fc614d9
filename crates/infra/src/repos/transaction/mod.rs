mod inmemory;
mod postgres;

pub use inmemory::InMemoryTransactionRepo;
use koll_scheduler_domain::Transaction;
pub use postgres::PostgresTransactionRepo;

#[async_trait::async_trait]
pub trait ITransactionRepo: Send + Sync {
    async fn insert(&self, transaction: &Transaction) -> anyhow::Result<()>;
    async fn find_by_budget(
        &self,
        budget_id: &koll_scheduler_domain::ID,
    ) -> anyhow::Result<Vec<Transaction>>;
}
