use super::ISubscriptionRepo;
use chrono::{DateTime, Utc};
use koll_scheduler_domain::scheduling::parse_instant;
use koll_scheduler_domain::{BillingInterval, Subscription, SubscriptionReminderPatch, ID};
use sqlx::types::{Json, Uuid};
use sqlx::{FromRow, PgPool};

pub struct PostgresSubscriptionRepo {
    pool: PgPool,
}

impl PostgresSubscriptionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SubscriptionRaw {
    subscription_uid: Uuid,
    owner_uid: Uuid,
    service_name: String,
    amount_per_period: f64,
    currency: String,
    next_charge_at: Option<DateTime<Utc>>,
    reminder_before_charge_days: String,
    billing_interval: String,
    is_paused: bool,
    trial_ends_at: Option<DateTime<Utc>>,
    reminder_on_trial_end: bool,
    charge_reminder_job_ids: Json<Vec<String>>,
    trial_reminder_job_id: Option<String>,
    budget_uid: Option<Uuid>,
    budget_category_uid: Option<Uuid>,
}

impl From<SubscriptionRaw> for Subscription {
    fn from(raw: SubscriptionRaw) -> Self {
        Self {
            id: raw.subscription_uid.into(),
            owner_id: raw.owner_uid.into(),
            service_name: raw.service_name,
            amount_per_period: raw.amount_per_period,
            currency: raw.currency,
            next_charge_at: raw.next_charge_at.map(|d| d.to_rfc3339()),
            reminder_before_charge_days: raw.reminder_before_charge_days,
            billing_interval: BillingInterval::parse(&raw.billing_interval),
            is_paused: raw.is_paused,
            trial_ends_at: raw.trial_ends_at.map(|d| d.to_rfc3339()),
            reminder_on_trial_end: raw.reminder_on_trial_end,
            charge_reminder_job_ids: raw.charge_reminder_job_ids.0,
            trial_reminder_job_id: raw.trial_reminder_job_id,
            budget_id: raw.budget_uid.map(|uid| uid.into()),
            budget_category_id: raw.budget_category_uid.map(|uid| uid.into()),
        }
    }
}

#[async_trait::async_trait]
impl ISubscriptionRepo for PostgresSubscriptionRepo {
    async fn insert(&self, subscription: &Subscription) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions
            (subscription_uid, owner_uid, service_name, amount_per_period, currency,
             next_charge_at, reminder_before_charge_days, billing_interval, is_paused,
             trial_ends_at, reminder_on_trial_end, charge_reminder_job_ids,
             trial_reminder_job_id, budget_uid, budget_category_uid)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(subscription.id.inner_ref())
        .bind(subscription.owner_id.inner_ref())
        .bind(&subscription.service_name)
        .bind(subscription.amount_per_period)
        .bind(&subscription.currency)
        .bind(parse_instant(subscription.next_charge_at.as_deref()))
        .bind(&subscription.reminder_before_charge_days)
        .bind(subscription.billing_interval.as_str())
        .bind(subscription.is_paused)
        .bind(parse_instant(subscription.trial_ends_at.as_deref()))
        .bind(subscription.reminder_on_trial_end)
        .bind(Json(&subscription.charge_reminder_job_ids))
        .bind(&subscription.trial_reminder_job_id)
        .bind(subscription.budget_id.as_ref().map(|id| *id.inner_ref()))
        .bind(
            subscription
                .budget_category_id
                .as_ref()
                .map(|id| *id.inner_ref()),
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, subscription_id: &ID) -> Option<Subscription> {
        sqlx::query_as::<_, SubscriptionRaw>(
            r#"
            SELECT * FROM subscriptions
            WHERE subscription_uid = $1
            "#,
        )
        .bind(subscription_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|raw| raw.into())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Subscription>> {
        let subscriptions = sqlx::query_as::<_, SubscriptionRaw>(
            r#"
            SELECT * FROM subscriptions
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(subscriptions.into_iter().map(|raw| raw.into()).collect())
    }

    async fn find_charges_due(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<Subscription>> {
        let subscriptions = sqlx::query_as::<_, SubscriptionRaw>(
            r#"
            SELECT * FROM subscriptions
            WHERE NOT is_paused AND next_charge_at < $1
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;
        Ok(subscriptions.into_iter().map(|raw| raw.into()).collect())
    }

    async fn update_reminder_state(
        &self,
        subscription_id: &ID,
        patch: &SubscriptionReminderPatch,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE subscriptions
            SET charge_reminder_job_ids = $2, trial_reminder_job_id = $3
            WHERE subscription_uid = $1
            "#,
        )
        .bind(subscription_id.inner_ref())
        .bind(Json(&patch.charge_reminder_job_ids))
        .bind(&patch.trial_reminder_job_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_charge_schedule(
        &self,
        subscription_id: &ID,
        next_charge_at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE subscriptions
            SET next_charge_at = $2, updated_at = now()
            WHERE subscription_uid = $1
            "#,
        )
        .bind(subscription_id.inner_ref())
        .bind(next_charge_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
