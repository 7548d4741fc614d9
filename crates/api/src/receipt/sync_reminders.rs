use crate::reminders::pipeline::{
    cancel_jobs, release_prior_jobs, schedule_reminder, PassSummary, SyncError,
};
use crate::shared::usecase::UseCase;
use chrono::{DateTime, Duration, Utc};
use koll_scheduler_domain::scheduling::{
    compute_plans, day_window, extract_deadlines, EvaluationMode,
};
use koll_scheduler_domain::{JobId, Receipt, ReceiptReminderPatch, ReminderMessage};
use koll_scheduler_infra::KollContext;
use std::collections::HashMap;
use tracing::warn;

/// Lead-time offsets in days before each receipt deadline.
pub const RECEIPT_OFFSETS: &[i64] = &[7, 1];

/// Width of the daily batch fetch window. Wide enough that every offset can
/// still project onto today.
const BATCH_LOOKAHEAD_DAYS: i64 = 8;

/// Replaces the reminder schedule of every receipt with a freshly computed
/// one. Disabled receipts and receipts without deadlines get their
/// outstanding reminders cancelled instead.
#[derive(Debug)]
pub struct SyncReceiptRemindersUseCase {
    pub mode: EvaluationMode,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SyncReceiptRemindersUseCase {
    type Response = PassSummary;
    type Error = UseCaseError;

    const NAME: &'static str = "SyncReceiptReminders";

    async fn execute(&mut self, ctx: &KollContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.now();
        let receipts = match self.mode {
            EvaluationMode::Continuous => ctx.repos.receipts.find_all().await,
            EvaluationMode::DailyBatch => {
                let (today, _) = day_window(now);
                ctx.repos
                    .receipts
                    .find_with_deadline_between(today, today + Duration::days(BATCH_LOOKAHEAD_DAYS))
                    .await
            }
        }
        .map_err(|_| UseCaseError::StorageError)?;

        let mut summary = PassSummary::default();
        for receipt in receipts {
            match sync_receipt(ctx, &receipt, self.mode, now).await {
                Ok(()) => summary.processed += 1,
                Err(SyncError::Transport(e)) => {
                    warn!("Skipping receipt {} after transport failure: {:?}", receipt.id, e);
                    summary.failed += 1;
                }
                Err(SyncError::Storage(_)) => return Err(UseCaseError::StorageError),
            }
        }
        Ok(summary)
    }
}

async fn sync_receipt(
    ctx: &KollContext,
    receipt: &Receipt,
    mode: EvaluationMode,
    now: DateTime<Utc>,
) -> Result<(), SyncError> {
    let existing = receipt.existing_job_ids();
    let candidates = extract_deadlines(&receipt.deadline_fields());

    if !receipt.reminders_enabled || candidates.is_empty() {
        cancel_jobs(ctx, &existing)
            .await
            .map_err(SyncError::Transport)?;
        return ctx
            .repos
            .receipts
            .update_reminder_state(&receipt.id, &ReceiptReminderPatch::cleared())
            .await
            .map_err(SyncError::Storage);
    }

    release_prior_jobs(ctx, &existing)
        .await
        .map_err(SyncError::Transport)?;

    let plans = compute_plans(&candidates, RECEIPT_OFFSETS, mode, now);
    let mut reminder_jobs: HashMap<String, Vec<JobId>> = HashMap::new();
    let mut fire_times = Vec::with_capacity(plans.len());
    for plan in &plans {
        let message = ReminderMessage::ReceiptDeadline {
            store: receipt.store.clone(),
            kind: plan.kind,
            deadline: plan.deadline,
            offset_days: plan.offset_days,
        };
        let job_id = schedule_reminder(ctx, &receipt.owner_id, plan.fire_at, &message)
            .await
            .map_err(SyncError::Transport)?;
        reminder_jobs.entry(plan.kind.to_string()).or_default().push(job_id);
        fire_times.push(plan.fire_at);
    }

    fire_times.sort();
    let patch = ReceiptReminderPatch {
        reminder_jobs,
        reminder1_at: fire_times.first().copied(),
        reminder2_at: fire_times.get(1).copied(),
    };
    ctx.repos
        .receipts
        .update_reminder_state(&receipt.id, &patch)
        .await
        .map_err(SyncError::Storage)
}
