use super::IGiftCardRepo;
use chrono::{DateTime, Utc};
use koll_scheduler_domain::scheduling::parse_instant;
use koll_scheduler_domain::{GiftCard, GiftCardReminderPatch, ID};
use sqlx::types::{Json, Uuid};
use sqlx::{FromRow, PgPool};

pub struct PostgresGiftCardRepo {
    pool: PgPool,
}

impl PostgresGiftCardRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct GiftCardRaw {
    giftcard_uid: Uuid,
    owner_uid: Uuid,
    brand: String,
    expires_at: Option<DateTime<Utc>>,
    current_balance: f64,
    reminders_enabled: bool,
    reminder_job_ids: Json<Vec<String>>,
    reminder1_at: Option<DateTime<Utc>>,
    reminder2_at: Option<DateTime<Utc>>,
}

impl From<GiftCardRaw> for GiftCard {
    fn from(raw: GiftCardRaw) -> Self {
        Self {
            id: raw.giftcard_uid.into(),
            owner_id: raw.owner_uid.into(),
            brand: raw.brand,
            expires_at: raw.expires_at.map(|d| d.to_rfc3339()),
            current_balance: raw.current_balance,
            reminders_enabled: raw.reminders_enabled,
            reminder_job_ids: raw.reminder_job_ids.0,
            reminder1_at: raw.reminder1_at,
            reminder2_at: raw.reminder2_at,
        }
    }
}

#[async_trait::async_trait]
impl IGiftCardRepo for PostgresGiftCardRepo {
    async fn insert(&self, giftcard: &GiftCard) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO giftcards
            (giftcard_uid, owner_uid, brand, expires_at, current_balance,
             reminders_enabled, reminder_job_ids, reminder1_at, reminder2_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(giftcard.id.inner_ref())
        .bind(giftcard.owner_id.inner_ref())
        .bind(&giftcard.brand)
        .bind(parse_instant(giftcard.expires_at.as_deref()))
        .bind(giftcard.current_balance)
        .bind(giftcard.reminders_enabled)
        .bind(Json(&giftcard.reminder_job_ids))
        .bind(giftcard.reminder1_at)
        .bind(giftcard.reminder2_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, giftcard_id: &ID) -> Option<GiftCard> {
        sqlx::query_as::<_, GiftCardRaw>(
            r#"
            SELECT * FROM giftcards
            WHERE giftcard_uid = $1
            "#,
        )
        .bind(giftcard_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|raw| raw.into())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<GiftCard>> {
        let giftcards = sqlx::query_as::<_, GiftCardRaw>(
            r#"
            SELECT * FROM giftcards
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(giftcards.into_iter().map(|raw| raw.into()).collect())
    }

    async fn find_expiring_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<GiftCard>> {
        let giftcards = sqlx::query_as::<_, GiftCardRaw>(
            r#"
            SELECT * FROM giftcards
            WHERE reminders_enabled AND expires_at >= $1 AND expires_at < $2
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(giftcards.into_iter().map(|raw| raw.into()).collect())
    }

    async fn update_reminder_state(
        &self,
        giftcard_id: &ID,
        patch: &GiftCardReminderPatch,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE giftcards
            SET reminder_job_ids = $2, reminder1_at = $3, reminder2_at = $4
            WHERE giftcard_uid = $1
            "#,
        )
        .bind(giftcard_id.inner_ref())
        .bind(Json(&patch.reminder_job_ids))
        .bind(patch.reminder1_at)
        .bind(patch.reminder2_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
