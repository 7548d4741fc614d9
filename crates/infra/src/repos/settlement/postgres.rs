use super::ISettlementRepo;
use chrono::{DateTime, Utc};
use koll_scheduler_domain::scheduling::parse_instant;
use koll_scheduler_domain::{Settlement, SettlementReminderPatch, SettlementStatus, ID};
use sqlx::types::Uuid;
use sqlx::{FromRow, PgPool};

pub struct PostgresSettlementRepo {
    pool: PgPool,
}

impl PostgresSettlementRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SettlementRaw {
    settlement_uid: Uuid,
    split_group_uid: Uuid,
    payer_uid: Uuid,
    receiver_uid: Uuid,
    amount: f64,
    status: String,
    created_at: DateTime<Utc>,
    reminder_job_id: Option<String>,
}

impl From<SettlementRaw> for Settlement {
    fn from(raw: SettlementRaw) -> Self {
        Self {
            id: raw.settlement_uid.into(),
            split_group_id: raw.split_group_uid.into(),
            payer_id: raw.payer_uid.into(),
            receiver_id: raw.receiver_uid.into(),
            amount: raw.amount,
            status: SettlementStatus::parse(&raw.status),
            created_at: raw.created_at.to_rfc3339(),
            reminder_job_id: raw.reminder_job_id,
        }
    }
}

#[async_trait::async_trait]
impl ISettlementRepo for PostgresSettlementRepo {
    async fn insert(&self, settlement: &Settlement) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO settlements
            (settlement_uid, split_group_uid, payer_uid, receiver_uid,
             amount, status, created_at, reminder_job_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(settlement.id.inner_ref())
        .bind(settlement.split_group_id.inner_ref())
        .bind(settlement.payer_id.inner_ref())
        .bind(settlement.receiver_id.inner_ref())
        .bind(settlement.amount)
        .bind(settlement.status.as_str())
        .bind(parse_instant(Some(&settlement.created_at)))
        .bind(&settlement.reminder_job_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, settlement_id: &ID) -> Option<Settlement> {
        sqlx::query_as::<_, SettlementRaw>(
            r#"
            SELECT * FROM settlements
            WHERE settlement_uid = $1
            "#,
        )
        .bind(settlement_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|raw| raw.into())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Settlement>> {
        let settlements = sqlx::query_as::<_, SettlementRaw>(
            r#"
            SELECT * FROM settlements
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(settlements.into_iter().map(|raw| raw.into()).collect())
    }

    async fn update_reminder_state(
        &self,
        settlement_id: &ID,
        patch: &SettlementReminderPatch,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE settlements
            SET reminder_job_id = $2
            WHERE settlement_uid = $1
            "#,
        )
        .bind(settlement_id.inner_ref())
        .bind(&patch.reminder_job_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
