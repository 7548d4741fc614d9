use super::IReceiptRepo;
use chrono::{DateTime, Utc};
use koll_scheduler_domain::scheduling::parse_instant;
use koll_scheduler_domain::{Receipt, ReceiptReminderPatch, ID};
use sqlx::types::{Json, Uuid};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;

pub struct PostgresReceiptRepo {
    pool: PgPool,
}

impl PostgresReceiptRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReceiptRaw {
    receipt_uid: Uuid,
    owner_uid: Uuid,
    store: String,
    return_deadline: Option<DateTime<Utc>>,
    exchange_deadline: Option<DateTime<Utc>>,
    warranty_expires: Option<DateTime<Utc>>,
    refund_deadline: Option<DateTime<Utc>>,
    reminders_enabled: bool,
    archived: bool,
    reminder_jobs: Json<HashMap<String, Vec<String>>>,
    reminder1_at: Option<DateTime<Utc>>,
    reminder2_at: Option<DateTime<Utc>>,
}

impl From<ReceiptRaw> for Receipt {
    fn from(raw: ReceiptRaw) -> Self {
        Self {
            id: raw.receipt_uid.into(),
            owner_id: raw.owner_uid.into(),
            store: raw.store,
            return_deadline: raw.return_deadline.map(|d| d.to_rfc3339()),
            exchange_deadline: raw.exchange_deadline.map(|d| d.to_rfc3339()),
            warranty_expires: raw.warranty_expires.map(|d| d.to_rfc3339()),
            refund_deadline: raw.refund_deadline.map(|d| d.to_rfc3339()),
            reminders_enabled: raw.reminders_enabled,
            archived: raw.archived,
            reminder_jobs: raw.reminder_jobs.0,
            reminder1_at: raw.reminder1_at,
            reminder2_at: raw.reminder2_at,
        }
    }
}

#[async_trait::async_trait]
impl IReceiptRepo for PostgresReceiptRepo {
    async fn insert(&self, receipt: &Receipt) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO receipts
            (receipt_uid, owner_uid, store, return_deadline, exchange_deadline,
             warranty_expires, refund_deadline, reminders_enabled, archived,
             reminder_jobs, reminder1_at, reminder2_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(receipt.id.inner_ref())
        .bind(receipt.owner_id.inner_ref())
        .bind(&receipt.store)
        .bind(parse_instant(receipt.return_deadline.as_deref()))
        .bind(parse_instant(receipt.exchange_deadline.as_deref()))
        .bind(parse_instant(receipt.warranty_expires.as_deref()))
        .bind(parse_instant(receipt.refund_deadline.as_deref()))
        .bind(receipt.reminders_enabled)
        .bind(receipt.archived)
        .bind(Json(&receipt.reminder_jobs))
        .bind(receipt.reminder1_at)
        .bind(receipt.reminder2_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, receipt_id: &ID) -> Option<Receipt> {
        sqlx::query_as::<_, ReceiptRaw>(
            r#"
            SELECT * FROM receipts
            WHERE receipt_uid = $1
            "#,
        )
        .bind(receipt_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|raw| raw.into())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Receipt>> {
        let receipts = sqlx::query_as::<_, ReceiptRaw>(
            r#"
            SELECT * FROM receipts
            WHERE NOT archived
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(receipts.into_iter().map(|raw| raw.into()).collect())
    }

    async fn find_with_deadline_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Receipt>> {
        let receipts = sqlx::query_as::<_, ReceiptRaw>(
            r#"
            SELECT * FROM receipts
            WHERE reminders_enabled AND NOT archived AND (
                (return_deadline >= $1 AND return_deadline < $2) OR
                (exchange_deadline >= $1 AND exchange_deadline < $2) OR
                (warranty_expires >= $1 AND warranty_expires < $2) OR
                (refund_deadline >= $1 AND refund_deadline < $2)
            )
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(receipts.into_iter().map(|raw| raw.into()).collect())
    }

    async fn update_reminder_state(
        &self,
        receipt_id: &ID,
        patch: &ReceiptReminderPatch,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE receipts
            SET reminder_jobs = $2, reminder1_at = $3, reminder2_at = $4
            WHERE receipt_uid = $1
            "#,
        )
        .bind(receipt_id.inner_ref())
        .bind(Json(&patch.reminder_jobs))
        .bind(patch.reminder1_at)
        .bind(patch.reminder2_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
