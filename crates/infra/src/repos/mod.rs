mod giftcard;
mod receipt;
mod settlement;
mod shared;
mod subscription;
mod transaction;

pub use giftcard::IGiftCardRepo;
use giftcard::{InMemoryGiftCardRepo, PostgresGiftCardRepo};
pub use receipt::IReceiptRepo;
use receipt::{InMemoryReceiptRepo, PostgresReceiptRepo};
pub use settlement::ISettlementRepo;
use settlement::{InMemorySettlementRepo, PostgresSettlementRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use subscription::ISubscriptionRepo;
use subscription::{InMemorySubscriptionRepo, PostgresSubscriptionRepo};
use tracing::info;
pub use transaction::ITransactionRepo;
use transaction::{InMemoryTransactionRepo, PostgresTransactionRepo};

#[derive(Clone)]
pub struct Repos {
    pub receipts: Arc<dyn IReceiptRepo>,
    pub giftcards: Arc<dyn IGiftCardRepo>,
    pub subscriptions: Arc<dyn ISubscriptionRepo>,
    pub settlements: Arc<dyn ISettlementRepo>,
    pub transactions: Arc<dyn ITransactionRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");
        Ok(Self {
            receipts: Arc::new(PostgresReceiptRepo::new(pool.clone())),
            giftcards: Arc::new(PostgresGiftCardRepo::new(pool.clone())),
            subscriptions: Arc::new(PostgresSubscriptionRepo::new(pool.clone())),
            settlements: Arc::new(PostgresSettlementRepo::new(pool.clone())),
            transactions: Arc::new(PostgresTransactionRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            receipts: Arc::new(InMemoryReceiptRepo::new()),
            giftcards: Arc::new(InMemoryGiftCardRepo::new()),
            subscriptions: Arc::new(InMemorySubscriptionRepo::new()),
            settlements: Arc::new(InMemorySettlementRepo::new()),
            transactions: Arc::new(InMemoryTransactionRepo::new()),
        }
    }
}
