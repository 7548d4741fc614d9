use crate::reminders::pipeline::{
    cancel_jobs, release_prior_jobs, schedule_reminder, PassSummary, SyncError,
};
use crate::shared::usecase::UseCase;
use chrono::{DateTime, Duration, Utc};
use koll_scheduler_domain::scheduling::{
    compute_plans, day_window, extract_deadlines, EvaluationMode,
};
use koll_scheduler_domain::{GiftCard, GiftCardReminderPatch, ReminderMessage};
use koll_scheduler_infra::KollContext;
use tracing::warn;

/// Lead-time offsets in days before a gift card expires.
pub const GIFTCARD_OFFSETS: &[i64] = &[30, 7];

const BATCH_LOOKAHEAD_DAYS: i64 = 31;

#[derive(Debug)]
pub struct SyncGiftCardRemindersUseCase {
    pub mode: EvaluationMode,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SyncGiftCardRemindersUseCase {
    type Response = PassSummary;
    type Error = UseCaseError;

    const NAME: &'static str = "SyncGiftCardReminders";

    async fn execute(&mut self, ctx: &KollContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.now();
        let giftcards = match self.mode {
            EvaluationMode::Continuous => ctx.repos.giftcards.find_all().await,
            EvaluationMode::DailyBatch => {
                let (today, _) = day_window(now);
                ctx.repos
                    .giftcards
                    .find_expiring_between(today, today + Duration::days(BATCH_LOOKAHEAD_DAYS))
                    .await
            }
        }
        .map_err(|_| UseCaseError::StorageError)?;

        let mut summary = PassSummary::default();
        for giftcard in giftcards {
            match sync_giftcard(ctx, &giftcard, self.mode, now).await {
                Ok(()) => summary.processed += 1,
                Err(SyncError::Transport(e)) => {
                    warn!(
                        "Skipping gift card {} after transport failure: {:?}",
                        giftcard.id, e
                    );
                    summary.failed += 1;
                }
                Err(SyncError::Storage(_)) => return Err(UseCaseError::StorageError),
            }
        }
        Ok(summary)
    }
}

async fn sync_giftcard(
    ctx: &KollContext,
    giftcard: &GiftCard,
    mode: EvaluationMode,
    now: DateTime<Utc>,
) -> Result<(), SyncError> {
    let existing: Vec<_> = giftcard.reminder_job_ids.iter().collect();
    let candidates = extract_deadlines(&[("expires_at", giftcard.expires_at.as_deref())]);

    if !giftcard.reminders_enabled || candidates.is_empty() {
        cancel_jobs(ctx, &existing)
            .await
            .map_err(SyncError::Transport)?;
        return ctx
            .repos
            .giftcards
            .update_reminder_state(&giftcard.id, &GiftCardReminderPatch::cleared())
            .await
            .map_err(SyncError::Storage);
    }

    release_prior_jobs(ctx, &existing)
        .await
        .map_err(SyncError::Transport)?;

    let plans = compute_plans(&candidates, GIFTCARD_OFFSETS, mode, now);
    let mut reminder_job_ids = Vec::with_capacity(plans.len());
    let mut fire_times = Vec::with_capacity(plans.len());
    for plan in &plans {
        let message = ReminderMessage::GiftCardExpiry {
            brand: giftcard.brand.clone(),
            balance: giftcard.current_balance,
            expires_at: plan.deadline,
            offset_days: plan.offset_days,
        };
        let job_id = schedule_reminder(ctx, &giftcard.owner_id, plan.fire_at, &message)
            .await
            .map_err(SyncError::Transport)?;
        reminder_job_ids.push(job_id);
        fire_times.push(plan.fire_at);
    }

    fire_times.sort();
    let patch = GiftCardReminderPatch {
        reminder_job_ids,
        reminder1_at: fire_times.first().copied(),
        reminder2_at: fire_times.get(1).copied(),
    };
    ctx.repos
        .giftcards
        .update_reminder_state(&giftcard.id, &patch)
        .await
        .map_err(SyncError::Storage)
}
