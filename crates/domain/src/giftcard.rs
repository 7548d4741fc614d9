use crate::shared::entity::{Entity, ID};
use crate::shared::notification::JobId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A gift card with a single expiry deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftCard {
    pub id: ID,
    pub owner_id: ID,
    pub brand: String,
    pub expires_at: Option<String>,
    pub current_balance: f64,
    #[serde(default, deserialize_with = "crate::shared::flag::lenient_bool")]
    pub reminders_enabled: bool,
    #[serde(default)]
    pub reminder_job_ids: Vec<JobId>,
    pub reminder1_at: Option<DateTime<Utc>>,
    pub reminder2_at: Option<DateTime<Utc>>,
}

impl Entity for GiftCard {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GiftCardReminderPatch {
    pub reminder_job_ids: Vec<JobId>,
    pub reminder1_at: Option<DateTime<Utc>>,
    pub reminder2_at: Option<DateTime<Utc>>,
}

impl GiftCardReminderPatch {
    pub fn cleared() -> Self {
        Self::default()
    }
}
