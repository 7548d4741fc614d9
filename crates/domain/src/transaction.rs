use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A ledger transaction posted to a budget when a recurring charge falls due.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: ID,
    pub budget_id: ID,
    pub category_id: ID,
    pub kind: TransactionKind,
    pub description: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub source: TransactionSource,
    pub source_id: ID,
}

impl Entity for Transaction {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionSource {
    Subscription,
}
