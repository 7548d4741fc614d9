use crate::shared::entity::{Entity, ID};
use crate::shared::notification::JobId;
use serde::{Deserialize, Serialize};

/// A peer settlement debt inside a split group. An open settlement gets a
/// single payment reminder pushed three days past its creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settlement {
    pub id: ID,
    pub split_group_id: ID,
    pub payer_id: ID,
    pub receiver_id: ID,
    pub amount: f64,
    #[serde(default)]
    pub status: SettlementStatus,
    pub created_at: String,
    pub reminder_job_id: Option<JobId>,
}

impl Entity for Settlement {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    #[default]
    Open,
    Settled,
}

impl SettlementStatus {
    /// Anything that is not literally "settled" counts as open.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("settled") {
            Self::Settled
        } else {
            Self::Open
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Settled => "settled",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettlementReminderPatch {
    pub reminder_job_id: Option<JobId>,
}

impl SettlementReminderPatch {
    pub fn cleared() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_is_lenient() {
        assert_eq!(SettlementStatus::parse("settled"), SettlementStatus::Settled);
        assert_eq!(SettlementStatus::parse("SETTLED"), SettlementStatus::Settled);
        assert_eq!(SettlementStatus::parse("open"), SettlementStatus::Open);
        assert_eq!(SettlementStatus::parse("pending"), SettlementStatus::Open);
    }
}
