use super::ITransactionRepo;
use chrono::{DateTime, Utc};
use koll_scheduler_domain::{Transaction, TransactionKind, TransactionSource, ID};
use sqlx::types::Uuid;
use sqlx::{FromRow, PgPool};

pub struct PostgresTransactionRepo {
    pool: PgPool,
}

impl PostgresTransactionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TransactionRaw {
    transaction_uid: Uuid,
    budget_uid: Uuid,
    category_uid: Uuid,
    description: String,
    amount: f64,
    date: DateTime<Utc>,
    source_uid: Uuid,
}

impl From<TransactionRaw> for Transaction {
    fn from(raw: TransactionRaw) -> Self {
        Self {
            id: raw.transaction_uid.into(),
            budget_id: raw.budget_uid.into(),
            category_id: raw.category_uid.into(),
            // Only expense rows sourced from subscriptions are written here.
            kind: TransactionKind::Expense,
            description: raw.description,
            amount: raw.amount,
            date: raw.date,
            source: TransactionSource::Subscription,
            source_id: raw.source_uid.into(),
        }
    }
}

#[async_trait::async_trait]
impl ITransactionRepo for PostgresTransactionRepo {
    async fn insert(&self, transaction: &Transaction) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions
            (transaction_uid, budget_uid, category_uid, kind, description,
             amount, date, source, source_uid)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(transaction.id.inner_ref())
        .bind(transaction.budget_id.inner_ref())
        .bind(transaction.category_id.inner_ref())
        .bind(match transaction.kind {
            TransactionKind::Expense => "expense",
        })
        .bind(&transaction.description)
        .bind(transaction.amount)
        .bind(transaction.date)
        .bind(match transaction.source {
            TransactionSource::Subscription => "subscription",
        })
        .bind(transaction.source_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_budget(&self, budget_id: &ID) -> anyhow::Result<Vec<Transaction>> {
        let transactions = sqlx::query_as::<_, TransactionRaw>(
            r#"
            SELECT * FROM transactions
            WHERE budget_uid = $1
            "#,
        )
        .bind(budget_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        Ok(transactions.into_iter().map(|raw| raw.into()).collect())
    }
}
