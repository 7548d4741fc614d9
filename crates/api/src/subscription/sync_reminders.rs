use crate::reminders::pipeline::{
    cancel_jobs, release_prior_jobs, schedule_reminder, PassSummary, SyncError,
};
use crate::shared::usecase::UseCase;
use chrono::{DateTime, Utc};
use koll_scheduler_domain::scheduling::{
    compute_plans, parse_instant, project_fire_at, DeadlineCandidate, EvaluationMode,
};
use koll_scheduler_domain::{ReminderMessage, Subscription, SubscriptionReminderPatch};
use koll_scheduler_infra::KollContext;
use tracing::warn;

/// Refreshes the charge and trial reminders of every subscription. Paused
/// subscriptions get their outstanding reminders cancelled; subscriptions
/// with an unreadable charge date are left untouched.
#[derive(Debug)]
pub struct SyncSubscriptionRemindersUseCase {
    pub mode: EvaluationMode,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SyncSubscriptionRemindersUseCase {
    type Response = PassSummary;
    type Error = UseCaseError;

    const NAME: &'static str = "SyncSubscriptionReminders";

    async fn execute(&mut self, ctx: &KollContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.now();
        let subscriptions = ctx
            .repos
            .subscriptions
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut summary = PassSummary::default();
        for subscription in subscriptions {
            match sync_subscription(ctx, &subscription, self.mode, now).await {
                Ok(()) => summary.processed += 1,
                Err(SyncError::Transport(e)) => {
                    warn!(
                        "Skipping subscription {} after transport failure: {:?}",
                        subscription.id, e
                    );
                    summary.failed += 1;
                }
                Err(SyncError::Storage(_)) => return Err(UseCaseError::StorageError),
            }
        }
        Ok(summary)
    }
}

async fn sync_subscription(
    ctx: &KollContext,
    subscription: &Subscription,
    mode: EvaluationMode,
    now: DateTime<Utc>,
) -> Result<(), SyncError> {
    let existing = subscription.existing_job_ids();

    if subscription.is_paused {
        cancel_jobs(ctx, &existing)
            .await
            .map_err(SyncError::Transport)?;
        return ctx
            .repos
            .subscriptions
            .update_reminder_state(&subscription.id, &SubscriptionReminderPatch::cleared())
            .await
            .map_err(SyncError::Storage);
    }

    // A charge date that does not parse leaves the record exactly as it is,
    // outstanding reminders included.
    let charge_at = match parse_instant(subscription.next_charge_at.as_deref()) {
        Some(charge_at) => charge_at,
        None => return Ok(()),
    };

    release_prior_jobs(ctx, &existing)
        .await
        .map_err(SyncError::Transport)?;

    let candidate = DeadlineCandidate {
        kind: "next_charge_at",
        instant: charge_at,
    };
    let plans = compute_plans(&[candidate], &subscription.reminder_offsets(), mode, now);
    let mut charge_reminder_job_ids = Vec::with_capacity(plans.len());
    for plan in &plans {
        let message = ReminderMessage::UpcomingCharge {
            service_name: subscription.service_name.clone(),
            charge_at: plan.deadline,
            offset_days: plan.offset_days,
        };
        let job_id = schedule_reminder(ctx, &subscription.owner_id, plan.fire_at, &message)
            .await
            .map_err(SyncError::Transport)?;
        charge_reminder_job_ids.push(job_id);
    }

    let mut trial_reminder_job_id = None;
    if subscription.reminder_on_trial_end {
        if let Some(trial_ends) = parse_instant(subscription.trial_ends_at.as_deref()) {
            // Admitted while the raw trial end is still ahead, even when the
            // projected fire instant has already passed today.
            if trial_ends > now {
                let fire_at = project_fire_at(trial_ends, 0, mode);
                let message = ReminderMessage::TrialEnding {
                    service_name: subscription.service_name.clone(),
                    trial_ends_at: trial_ends,
                };
                let job_id = schedule_reminder(ctx, &subscription.owner_id, fire_at, &message)
                    .await
                    .map_err(SyncError::Transport)?;
                trial_reminder_job_id = Some(job_id);
            }
        }
    }

    let patch = SubscriptionReminderPatch {
        charge_reminder_job_ids,
        trial_reminder_job_id,
    };
    ctx.repos
        .subscriptions
        .update_reminder_state(&subscription.id, &patch)
        .await
        .map_err(SyncError::Storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_context;
    use crate::shared::usecase::execute;
    use chrono::{Duration, TimeZone};
    use koll_scheduler_domain::BillingInterval;

    pub(crate) fn subscription(next_charge_at: Option<DateTime<Utc>>) -> Subscription {
        Subscription {
            id: Default::default(),
            owner_id: Default::default(),
            service_name: "Spotify".into(),
            amount_per_period: 119.0,
            currency: "SEK".into(),
            next_charge_at: next_charge_at.map(|d| d.to_rfc3339()),
            reminder_before_charge_days: "7,1".into(),
            billing_interval: BillingInterval::Monthly,
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
    async fn charge_tomorrow_schedules_only_the_one_day_offset() {
        // Early enough in the day that the 09:00 projection is still ahead
        let now = Utc.with_ymd_and_hms(2026, 9, 10, 5, 0, 0).unwrap();
        let (ctx, notifications) = test_context(now);

        let sub = subscription(Some(now + Duration::days(1)));
        ctx.repos.subscriptions.insert(&sub).await.unwrap();

        execute(
            SyncSubscriptionRemindersUseCase {
                mode: EvaluationMode::Continuous,
            },
            &ctx,
        )
        .await
        .unwrap();

        let scheduled = notifications.scheduled();
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].title, "Påminnelse: Spotify dras i morgon.");
        assert_eq!(
            scheduled[0].fire_at,
            Utc.with_ymd_and_hms(2026, 9, 10, 9, 0, 0).unwrap()
        );

        let stored = ctx.repos.subscriptions.find(&sub.id).await.unwrap();
        assert_eq!(stored.charge_reminder_job_ids.len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn pausing_cancels_charge_and_trial_reminders() {
        let now = Utc.with_ymd_and_hms(2026, 9, 10, 12, 0, 0).unwrap();
        let (ctx, notifications) = test_context(now);

        let mut sub = subscription(Some(now + Duration::days(10)));
        sub.is_paused = true;
        sub.charge_reminder_job_ids = vec!["job_a".into(), "job_b".into()];
        sub.trial_reminder_job_id = Some("job_t".into());
        ctx.repos.subscriptions.insert(&sub).await.unwrap();

        execute(
            SyncSubscriptionRemindersUseCase {
                mode: EvaluationMode::Continuous,
            },
            &ctx,
        )
        .await
        .unwrap();

        assert_eq!(notifications.scheduled_count(), 0);
        let stored = ctx.repos.subscriptions.find(&sub.id).await.unwrap();
        assert!(stored.charge_reminder_job_ids.is_empty());
        assert_eq!(stored.trial_reminder_job_id, None);
    }

    #[actix_web::main]
    #[test]
    async fn unreadable_charge_date_leaves_the_record_untouched() {
        let now = Utc.with_ymd_and_hms(2026, 9, 10, 12, 0, 0).unwrap();
        let (ctx, notifications) = test_context(now);

        let mut sub = subscription(None);
        sub.next_charge_at = Some("whenever".into());
        sub.charge_reminder_job_ids = vec!["job_old".into()];
        ctx.repos.subscriptions.insert(&sub).await.unwrap();

        let summary = execute(
            SyncSubscriptionRemindersUseCase {
                mode: EvaluationMode::Continuous,
            },
            &ctx,
        )
        .await
        .unwrap();

        assert_eq!(summary.processed, 1);
        assert_eq!(notifications.scheduled_count(), 0);
        let stored = ctx.repos.subscriptions.find(&sub.id).await.unwrap();
        assert_eq!(stored.charge_reminder_job_ids, vec!["job_old".to_string()]);
    }

    #[actix_web::main]
    #[test]
    async fn trial_ending_ahead_gets_its_own_reminder() {
        let now = Utc.with_ymd_and_hms(2026, 9, 10, 12, 0, 0).unwrap();
        let (ctx, notifications) = test_context(now);

        let mut sub = subscription(Some(now + Duration::days(40)));
        sub.reminder_on_trial_end = true;
        sub.trial_ends_at = Some((now + Duration::days(2)).to_rfc3339());
        ctx.repos.subscriptions.insert(&sub).await.unwrap();

        execute(
            SyncSubscriptionRemindersUseCase {
                mode: EvaluationMode::Continuous,
            },
            &ctx,
        )
        .await
        .unwrap();

        let scheduled = notifications.scheduled();
        // Both charge offsets are beyond now, plus the trial reminder
        assert_eq!(scheduled.len(), 3);
        let trial = scheduled
            .iter()
            .find(|n| n.title == "Prova-på för Spotify slutar snart!")
            .unwrap();
        assert_eq!(
            trial.fire_at,
            Utc.with_ymd_and_hms(2026, 9, 12, 9, 0, 0).unwrap()
        );

        let stored = ctx.repos.subscriptions.find(&sub.id).await.unwrap();
        assert!(stored.trial_reminder_job_id.is_some());
    }

    #[actix_web::main]
    #[test]
    async fn trial_already_over_is_not_scheduled() {
        let now = Utc.with_ymd_and_hms(2026, 9, 10, 12, 0, 0).unwrap();
        let (ctx, notifications) = test_context(now);

        let mut sub = subscription(Some(now + Duration::days(40)));
        sub.reminder_before_charge_days = "".into();
        sub.reminder_on_trial_end = true;
        sub.trial_ends_at = Some((now - Duration::hours(1)).to_rfc3339());
        ctx.repos.subscriptions.insert(&sub).await.unwrap();

        execute(
            SyncSubscriptionRemindersUseCase {
                mode: EvaluationMode::Continuous,
            },
            &ctx,
        )
        .await
        .unwrap();

        assert_eq!(notifications.scheduled_count(), 0);
    }
}
