use super::subscribers::PostLedgerTransactionOnCharge;
use crate::shared::usecase::{Subscriber, UseCase};
use chrono::{DateTime, Utc};
use koll_scheduler_domain::scheduling::parse_instant;
use koll_scheduler_domain::Subscription;
use koll_scheduler_infra::KollContext;
use tracing::info;

/// A charge that fell due and whose schedule has been advanced by one
/// billing period.
#[derive(Debug, Clone)]
pub struct DueCharge {
    pub subscription: Subscription,
    pub charged_at: DateTime<Utc>,
    pub next_charge_at: DateTime<Utc>,
}

/// Advances every subscription whose charge instant has passed. The ledger
/// posting happens in a subscriber so a posting failure never blocks the
/// schedule advance.
#[derive(Debug)]
pub struct ProcessDueChargesUseCase;

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for crate::error::KollError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ProcessDueChargesUseCase {
    type Response = Vec<DueCharge>;
    type Error = UseCaseError;

    const NAME: &'static str = "ProcessDueCharges";

    async fn execute(&mut self, ctx: &KollContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.now();
        let due = ctx
            .repos
            .subscriptions
            .find_charges_due(now)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut charges = Vec::with_capacity(due.len());
        for subscription in due {
            // The due query only matches parseable charge dates
            let charged_at = match parse_instant(subscription.next_charge_at.as_deref()) {
                Some(charged_at) => charged_at,
                None => continue,
            };
            let next_charge_at = subscription.billing_interval.advance(charged_at);
            ctx.repos
                .subscriptions
                .update_charge_schedule(&subscription.id, next_charge_at)
                .await
                .map_err(|_| UseCaseError::StorageError)?;

            info!(
                "Advanced charge schedule for subscription {} to {}",
                subscription.id, next_charge_at
            );
            charges.push(DueCharge {
                subscription,
                charged_at,
                next_charge_at,
            });
        }
        Ok(charges)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(PostLedgerTransactionOnCharge)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_context;
    use crate::shared::usecase::execute;
    use chrono::{Duration, TimeZone};
    use koll_scheduler_domain::{BillingInterval, ID};

    fn due_subscription(
        next_charge_at: DateTime<Utc>,
        interval: BillingInterval,
    ) -> Subscription {
        Subscription {
            id: Default::default(),
            owner_id: Default::default(),
            service_name: "Netflix".into(),
            amount_per_period: 139.0,
            currency: "SEK".into(),
            next_charge_at: Some(next_charge_at.to_rfc3339()),
            reminder_before_charge_days: "7,1".into(),
            billing_interval: interval,
            is_paused: false,
            trial_ends_at: None,
            reminder_on_trial_end: false,
            charge_reminder_job_ids: Vec::new(),
            trial_reminder_job_id: None,
            budget_id: None,
            budget_category_id: None,
        }
    }

    #[actix_web::main]
    #[test]
    async fn due_charge_advances_by_one_calendar_month() {
        let now = Utc.with_ymd_and_hms(2026, 9, 10, 12, 0, 0).unwrap();
        let (ctx, _) = test_context(now);

        let charge_at = Utc.with_ymd_and_hms(2026, 8, 31, 9, 0, 0).unwrap();
        let sub = due_subscription(charge_at, BillingInterval::Monthly);
        ctx.repos.subscriptions.insert(&sub).await.unwrap();

        let charges = execute(ProcessDueChargesUseCase, &ctx).await.unwrap();
        assert_eq!(charges.len(), 1);
        // Aug 31 + one month clamps to Sep 30
        assert_eq!(
            charges[0].next_charge_at,
            Utc.with_ymd_and_hms(2026, 9, 30, 9, 0, 0).unwrap()
        );

        let stored = ctx.repos.subscriptions.find(&sub.id).await.unwrap();
        assert_eq!(
            parse_instant(stored.next_charge_at.as_deref()),
            Some(charges[0].next_charge_at)
        );
    }

    #[actix_web::main]
    #[test]
    async fn weekly_charges_advance_seven_days() {
        let now = Utc.with_ymd_and_hms(2026, 9, 10, 12, 0, 0).unwrap();
        let (ctx, _) = test_context(now);

        let charge_at = now - Duration::hours(2);
        let sub = due_subscription(charge_at, BillingInterval::Weekly);
        ctx.repos.subscriptions.insert(&sub).await.unwrap();

        let charges = execute(ProcessDueChargesUseCase, &ctx).await.unwrap();
        assert_eq!(charges[0].next_charge_at, charge_at + Duration::days(7));
    }

    #[actix_web::main]
    #[test]
    async fn future_and_paused_charges_are_not_processed() {
        let now = Utc.with_ymd_and_hms(2026, 9, 10, 12, 0, 0).unwrap();
        let (ctx, _) = test_context(now);

        let future = due_subscription(now + Duration::days(3), BillingInterval::Monthly);
        let mut paused = due_subscription(now - Duration::days(1), BillingInterval::Monthly);
        paused.is_paused = true;
        ctx.repos.subscriptions.insert(&future).await.unwrap();
        ctx.repos.subscriptions.insert(&paused).await.unwrap();

        let charges = execute(ProcessDueChargesUseCase, &ctx).await.unwrap();
        assert!(charges.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn budget_linked_charge_posts_a_ledger_transaction() {
        let now = Utc.with_ymd_and_hms(2026, 9, 10, 12, 0, 0).unwrap();
        let (ctx, _) = test_context(now);

        let budget_id = ID::default();
        let mut sub = due_subscription(now - Duration::hours(1), BillingInterval::Monthly);
        sub.budget_id = Some(budget_id.clone());
        sub.budget_category_id = Some(ID::default());
        ctx.repos.subscriptions.insert(&sub).await.unwrap();

        // Not budget linked, must not produce a transaction
        let plain = due_subscription(now - Duration::hours(1), BillingInterval::Monthly);
        ctx.repos.subscriptions.insert(&plain).await.unwrap();

        execute(ProcessDueChargesUseCase, &ctx).await.unwrap();

        let posted = ctx
            .repos
            .transactions
            .find_by_budget(&budget_id)
            .await
            .unwrap();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].description, "Netflix");
        assert_eq!(posted[0].amount, 139.0);
        assert_eq!(posted[0].source_id, sub.id);
        assert_eq!(posted[0].date, now);
    }
}
