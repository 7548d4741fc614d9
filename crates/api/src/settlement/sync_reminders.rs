use crate::reminders::pipeline::{
    cancel_jobs, release_prior_jobs, schedule_reminder, PassSummary, SyncError,
};
use crate::shared::usecase::UseCase;
use koll_scheduler_domain::scheduling::{parse_instant, push_due_date};
use koll_scheduler_domain::{
    ReminderMessage, Settlement, SettlementReminderPatch, SettlementStatus,
};
use koll_scheduler_infra::KollContext;
use tracing::warn;

/// Days past creation before an open settlement gets its payment nudge.
const SETTLEMENT_PUSH_DAYS: i64 = 3;

/// Keeps exactly one payment reminder per open settlement, pushed three days
/// past creation. Settled records get their reminder cancelled. The push is
/// unconditional; the evaluation mode does not gate it.
#[derive(Debug)]
pub struct SyncSettlementRemindersUseCase;

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SyncSettlementRemindersUseCase {
    type Response = PassSummary;
    type Error = UseCaseError;

    const NAME: &'static str = "SyncSettlementReminders";

    async fn execute(&mut self, ctx: &KollContext) -> Result<Self::Response, Self::Error> {
        let settlements = ctx
            .repos
            .settlements
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut summary = PassSummary::default();
        for settlement in settlements {
            match sync_settlement(ctx, &settlement).await {
                Ok(()) => summary.processed += 1,
                Err(SyncError::Transport(e)) => {
                    warn!(
                        "Skipping settlement {} after transport failure: {:?}",
                        settlement.id, e
                    );
                    summary.failed += 1;
                }
                Err(SyncError::Storage(_)) => return Err(UseCaseError::StorageError),
            }
        }
        Ok(summary)
    }
}

async fn sync_settlement(ctx: &KollContext, settlement: &Settlement) -> Result<(), SyncError> {
    let existing: Vec<_> = settlement.reminder_job_id.iter().collect();

    if settlement.status == SettlementStatus::Settled {
        cancel_jobs(ctx, &existing)
            .await
            .map_err(SyncError::Transport)?;
        return ctx
            .repos
            .settlements
            .update_reminder_state(&settlement.id, &SettlementReminderPatch::cleared())
            .await
            .map_err(SyncError::Storage);
    }

    let created_at = match parse_instant(Some(&settlement.created_at)) {
        Some(created_at) => created_at,
        None => return Ok(()),
    };

    release_prior_jobs(ctx, &existing)
        .await
        .map_err(SyncError::Transport)?;

    let fire_at = push_due_date(created_at, SETTLEMENT_PUSH_DAYS);
    let message = ReminderMessage::SettlementDebt {
        split_group_id: settlement.split_group_id.clone(),
        settlement_id: settlement.id.clone(),
        receiver_id: settlement.receiver_id.clone(),
        amount: settlement.amount,
    };
    let job_id = schedule_reminder(ctx, &settlement.payer_id, fire_at, &message)
        .await
        .map_err(SyncError::Transport)?;

    let patch = SettlementReminderPatch {
        reminder_job_id: Some(job_id),
    };
    ctx.repos
        .settlements
        .update_reminder_state(&settlement.id, &patch)
        .await
        .map_err(SyncError::Storage)
}
