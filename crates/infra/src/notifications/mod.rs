mod inmemory;
mod webhook;

pub use inmemory::InMemoryNotificationService;
pub use webhook::WebhookNotificationService;

use chrono::{DateTime, Utc};
use koll_scheduler_domain::{JobId, Metadata, ID};
use serde::Serialize;
use uuid::Uuid;

/// A reminder accepted by the transport. The transport owns the scheduled
/// timer and is the only component that may fire it; records keep just the
/// returned job id.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduledNotification {
    pub id: JobId,
    pub to_user_id: ID,
    pub title: String,
    pub body: String,
    pub fire_at: DateTime<Utc>,
    pub metadata: Metadata,
}

#[async_trait::async_trait]
pub trait INotificationService: Send + Sync {
    /// Registers a reminder with the transport, returning its job ref.
    async fn schedule(
        &self,
        to_user_id: &ID,
        fire_at: DateTime<Utc>,
        title: String,
        body: String,
        metadata: Metadata,
    ) -> anyhow::Result<JobId>;

    /// Cancels a previously scheduled reminder. Cancelling a job id the
    /// transport does not know is a logged no-op, not an error.
    async fn cancel(&self, job_id: &str) -> anyhow::Result<()>;
}

pub(crate) fn next_job_id() -> JobId {
    format!("job_{}", Uuid::new_v4())
}
