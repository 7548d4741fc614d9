use chrono::{DateTime, Utc};
use koll_scheduler_domain::{JobId, ReminderMessage, ID};
use koll_scheduler_infra::KollContext;
use serde::Serialize;

/// Outcome counters for one domain pass. `failed` counts records skipped
/// after a transport failure; the pass itself still completed.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PassSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Failure modes inside a pass. A transport failure skips the record and
/// leaves its persisted job refs untouched; a storage failure aborts the
/// whole pass.
#[derive(Debug)]
pub enum SyncError {
    Transport(anyhow::Error),
    Storage(anyhow::Error),
}

/// Cancels every given job ref. Refs unknown to the transport are logged
/// no-ops there, so replaying a cancel is harmless.
pub async fn cancel_jobs(ctx: &KollContext, job_ids: &[&JobId]) -> anyhow::Result<()> {
    for job_id in job_ids {
        ctx.notifications.cancel(job_id).await?;
    }
    Ok(())
}

/// Releases the job refs persisted by the previous run before a fresh set is
/// scheduled. With `reconcile_stale_jobs` off this is a no-op and the old
/// jobs stay alive at the transport, which matches the legacy behavior.
pub async fn release_prior_jobs(ctx: &KollContext, job_ids: &[&JobId]) -> anyhow::Result<()> {
    if ctx.config.reconcile_stale_jobs {
        cancel_jobs(ctx, job_ids).await?;
    }
    Ok(())
}

/// Renders a message and registers it with the transport.
pub async fn schedule_reminder(
    ctx: &KollContext,
    to_user_id: &ID,
    fire_at: DateTime<Utc>,
    message: &ReminderMessage,
) -> anyhow::Result<JobId> {
    ctx.notifications
        .schedule(
            to_user_id,
            fire_at,
            message.title(),
            message.body(),
            message.metadata(),
        )
        .await
}
