use crate::shared::entity::{Entity, ID};
use crate::shared::notification::JobId;
use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

/// A recurring charge (autogiro) agreement. `next_charge_at` and
/// `trial_ends_at` are raw timestamp strings; the scheduling engine drops
/// unparseable values silently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: ID,
    pub owner_id: ID,
    pub service_name: String,
    pub amount_per_period: f64,
    pub currency: String,
    pub next_charge_at: Option<String>,
    /// Comma-separated lead-time offsets in days, e.g. "7,1"
    #[serde(default)]
    pub reminder_before_charge_days: String,
    #[serde(default)]
    pub billing_interval: BillingInterval,
    #[serde(default, deserialize_with = "crate::shared::flag::lenient_bool")]
    pub is_paused: bool,
    pub trial_ends_at: Option<String>,
    #[serde(default, deserialize_with = "crate::shared::flag::lenient_bool")]
    pub reminder_on_trial_end: bool,
    #[serde(default)]
    pub charge_reminder_job_ids: Vec<JobId>,
    pub trial_reminder_job_id: Option<JobId>,
    pub budget_id: Option<ID>,
    pub budget_category_id: Option<ID>,
}

impl Subscription {
    /// Lead-time offsets parsed from the comma list; non-integers are dropped.
    pub fn reminder_offsets(&self) -> Vec<i64> {
        self.reminder_before_charge_days
            .split(',')
            .filter_map(|part| part.trim().parse::<i64>().ok())
            .collect()
    }

    /// Every job ref held by this record, charge reminders and trial reminder alike.
    pub fn existing_job_ids(&self) -> Vec<&JobId> {
        self.charge_reminder_job_ids
            .iter()
            .chain(self.trial_reminder_job_id.iter())
            .collect()
    }
}

impl Entity for Subscription {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl BillingInterval {
    /// Unknown interval names fall back to monthly, matching how the legacy
    /// datasets treated them.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "weekly" => Self::Weekly,
            "yearly" => Self::Yearly,
            _ => Self::Monthly,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Advance a charge instant by one billing period. Month and year steps
    /// are calendar-aware, not fixed day counts.
    pub fn advance(&self, from: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Weekly => from + Duration::days(7),
            Self::Monthly => from.checked_add_months(Months::new(1)).unwrap_or(from),
            Self::Yearly => from.checked_add_months(Months::new(12)).unwrap_or(from),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionReminderPatch {
    pub charge_reminder_job_ids: Vec<JobId>,
    pub trial_reminder_job_id: Option<JobId>,
}

impl SubscriptionReminderPatch {
    pub fn cleared() -> Self {
        Self::default()
    }
}
