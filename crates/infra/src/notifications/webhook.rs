use super::{next_job_id, INotificationService, ScheduledNotification};
use chrono::{DateTime, Utc};
use koll_scheduler_domain::{JobId, Metadata, ID};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum TransportRequest {
    Schedule(ScheduledNotification),
    Cancel { id: String },
}

/// Production transport: forwards schedule/cancel operations to an external
/// push service. Without a configured endpoint every operation is log-only,
/// mirroring how the original dev sandbox behaved.
pub struct WebhookNotificationService {
    endpoint: Option<String>,
    client: reqwest::Client,
}

impl WebhookNotificationService {
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }

    async fn post(&self, request: &TransportRequest) -> anyhow::Result<()> {
        match &self.endpoint {
            Some(endpoint) => {
                self.client
                    .post(endpoint)
                    .json(request)
                    .send()
                    .await?
                    .error_for_status()?;
                Ok(())
            }
            None => {
                info!("No NOTIFY_ENDPOINT set, skipping external push");
                Ok(())
            }
        }
    }
}

#[async_trait::async_trait]
impl INotificationService for WebhookNotificationService {
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
        self.post(&TransportRequest::Schedule(notification)).await?;
        Ok(job_id)
    }

    async fn cancel(&self, job_id: &str) -> anyhow::Result<()> {
        self.post(&TransportRequest::Cancel {
            id: job_id.to_string(),
        })
        .await
    }
}
