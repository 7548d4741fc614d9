use super::{next_job_id, INotificationService, ScheduledNotification};
use chrono::{DateTime, Utc};
use koll_scheduler_domain::{JobId, Metadata, ID};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Transport used by tests and local development. Keeps full bookkeeping so
/// tests can assert exactly which reminders were scheduled and cancelled.
pub struct InMemoryNotificationService {
    scheduled: Mutex<HashMap<JobId, ScheduledNotification>>,
    cancelled: Mutex<Vec<JobId>>,
}

impl InMemoryNotificationService {
    pub fn new() -> Self {
        Self {
            scheduled: Mutex::new(HashMap::new()),
            cancelled: Mutex::new(Vec::new()),
        }
    }

    /// Reminders currently scheduled, sorted by fire instant.
    pub fn scheduled(&self) -> Vec<ScheduledNotification> {
        let mut all: Vec<_> = self.scheduled.lock().unwrap().values().cloned().collect();
        all.sort_by_key(|n| n.fire_at);
        all
    }

    pub fn scheduled_count(&self) -> usize {
        self.scheduled.lock().unwrap().len()
    }

    pub fn contains(&self, job_id: &str) -> bool {
        self.scheduled.lock().unwrap().contains_key(job_id)
    }

    /// Job ids that were actually cancelled, in cancellation order.
    pub fn cancelled(&self) -> Vec<JobId> {
        self.cancelled.lock().unwrap().clone()
    }
}

impl Default for InMemoryNotificationService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl INotificationService for InMemoryNotificationService {
    async fn schedule(
        &self,
        to_user_id: &ID,
        fire_at: DateTime<Utc>,
        title: String,
        body: String,
        metadata: Metadata,
    ) -> anyhow::Result<JobId> {
        let notification = ScheduledNotification {
            id: next_job_id(),
            to_user_id: to_user_id.clone(),
            title,
            body,
            fire_at,
            metadata,
        };
        let job_id = notification.id.clone();
        debug!("Scheduled notification {} at {}", job_id, fire_at);
        self.scheduled
            .lock()
            .unwrap()
            .insert(job_id.clone(), notification);
        Ok(job_id)
    }

    async fn cancel(&self, job_id: &str) -> anyhow::Result<()> {
        match self.scheduled.lock().unwrap().remove(job_id) {
            Some(_) => {
                self.cancelled.lock().unwrap().push(job_id.to_string());
            }
            None => {
                warn!("Cancel skipped, unknown job id: {}", job_id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn schedule_then_cancel_removes_the_job() {
        let service = InMemoryNotificationService::new();
        let job_id = service
            .schedule(
                &ID::new(),
                Utc::now(),
                "title".into(),
                "body".into(),
                Metadata::new(),
            )
            .await
            .unwrap();
        assert!(service.contains(&job_id));

        service.cancel(&job_id).await.unwrap();
        assert!(!service.contains(&job_id));
        assert_eq!(service.cancelled(), vec![job_id]);
    }

    #[tokio::test]
    async fn cancelling_unknown_job_is_a_noop() {
        let service = InMemoryNotificationService::new();
        assert!(service.cancel("job_unknown").await.is_ok());
        assert!(service.cancelled().is_empty());
    }
}
