use crate::shared::entity::ID;
use crate::shared::notification::Metadata;
use chrono::{DateTime, Utc};

/// Structured reminder content. The scheduling engine emits these and the
/// transport boundary renders them, which keeps wording out of the
/// scheduling algorithm. The rendered strings are the Swedish texts carried
/// over from the original product.
#[derive(Debug, Clone, PartialEq)]
pub enum ReminderMessage {
    ReceiptDeadline {
        store: String,
        kind: &'static str,
        deadline: DateTime<Utc>,
        offset_days: i64,
    },
    GiftCardExpiry {
        brand: String,
        balance: f64,
        expires_at: DateTime<Utc>,
        offset_days: i64,
    },
    UpcomingCharge {
        service_name: String,
        charge_at: DateTime<Utc>,
        offset_days: i64,
    },
    TrialEnding {
        service_name: String,
        trial_ends_at: DateTime<Utc>,
    },
    SettlementDebt {
        split_group_id: ID,
        settlement_id: ID,
        receiver_id: ID,
        amount: f64,
    },
}

fn format_date(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}

impl ReminderMessage {
    pub fn title(&self) -> String {
        match self {
            Self::ReceiptDeadline { store, .. } => format!("Kvitto från {}", store),
            Self::GiftCardExpiry { brand, .. } => {
                format!("Ditt presentkort för {} går ut snart!", brand)
            }
            Self::UpcomingCharge {
                service_name,
                charge_at,
                offset_days,
            } => {
                if *offset_days == 1 {
                    format!("Påminnelse: {} dras i morgon.", service_name)
                } else {
                    format!(
                        "Autogiro: {} dras {} – belopp ok.",
                        service_name,
                        format_date(charge_at)
                    )
                }
            }
            Self::TrialEnding { service_name, .. } => {
                format!("Prova-på för {} slutar snart!", service_name)
            }
            Self::SettlementDebt { split_group_id, .. } => {
                format!("Obetald del i {}", split_group_id)
            }
        }
    }

    pub fn body(&self) -> String {
        match self {
            Self::ReceiptDeadline { deadline, .. } => format!(
                "Din rätt att returnera gäller till {}.",
                format_date(deadline)
            ),
            Self::GiftCardExpiry {
                balance,
                expires_at,
                ..
            } => format!(
                "Saldo: {} kr – gäller till {}.",
                balance.round() as i64,
                format_date(expires_at)
            ),
            Self::UpcomingCharge { .. } => "Belopp: se tjänsten.".to_string(),
            Self::TrialEnding {
                service_name,
                trial_ends_at,
            } => format!(
                "Prova-på för {} slutar {}.",
                service_name,
                format_date(trial_ends_at)
            ),
            Self::SettlementDebt {
                receiver_id,
                amount,
                ..
            } => format!(
                "Du är skyldig {} kr till {}.",
                amount.round() as i64,
                receiver_id
            ),
        }
    }

    /// The structured payload handed to the transport alongside the rendered
    /// strings: originating instant, offset/kind tag and analytics event.
    pub fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        match self {
            Self::ReceiptDeadline { kind, deadline, .. } => {
                metadata.insert("deadline".into(), deadline.to_rfc3339());
                metadata.insert("deadline_type".into(), (*kind).to_string());
                metadata.insert("analytics_event".into(), "receipt_reminder_fired".into());
            }
            Self::GiftCardExpiry {
                expires_at,
                offset_days,
                ..
            } => {
                metadata.insert("expires_at".into(), expires_at.to_rfc3339());
                metadata.insert("offset_days".into(), offset_days.to_string());
                metadata.insert("analytics_event".into(), "giftcard_reminder_fired".into());
            }
            Self::UpcomingCharge {
                charge_at,
                offset_days,
                ..
            } => {
                metadata.insert("charge_at".into(), charge_at.to_rfc3339());
                metadata.insert("offset_days".into(), offset_days.to_string());
                metadata.insert("analytics_event".into(), "autogiro_reminder_fired".into());
            }
            Self::TrialEnding { trial_ends_at, .. } => {
                metadata.insert("trial_ends_at".into(), trial_ends_at.to_rfc3339());
                metadata.insert("analytics_event".into(), "autogiro_trial_end".into());
            }
            Self::SettlementDebt {
                split_group_id,
                settlement_id,
                ..
            } => {
                metadata.insert("split_group_id".into(), split_group_id.as_string());
                metadata.insert("settlement_id".into(), settlement_id.as_string());
                metadata.insert(
                    "analytics_event".into(),
                    "split_payment_reminder_fired".into(),
                );
            }
        }
        metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn receipt_message_renders_store_and_deadline() {
        let message = ReminderMessage::ReceiptDeadline {
            store: "Elgiganten".into(),
            kind: "return_deadline",
            deadline: Utc.with_ymd_and_hms(2026, 9, 20, 0, 0, 0).unwrap(),
            offset_days: 7,
        };
        assert_eq!(message.title(), "Kvitto från Elgiganten");
        assert_eq!(
            message.body(),
            "Din rätt att returnera gäller till 2026-09-20."
        );
        let metadata = message.metadata();
        assert_eq!(metadata["deadline_type"], "return_deadline");
        assert_eq!(metadata["analytics_event"], "receipt_reminder_fired");
    }

    #[test]
    fn giftcard_message_rounds_balance() {
        let message = ReminderMessage::GiftCardExpiry {
            brand: "Åhléns".into(),
            balance: 249.6,
            expires_at: Utc.with_ymd_and_hms(2026, 12, 24, 0, 0, 0).unwrap(),
            offset_days: 30,
        };
        assert_eq!(message.title(), "Ditt presentkort för Åhléns går ut snart!");
        assert_eq!(message.body(), "Saldo: 250 kr – gäller till 2026-12-24.");
        assert_eq!(message.metadata()["offset_days"], "30");
    }

    #[test]
    fn charge_message_switches_on_one_day_offset() {
        let charge_at = Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap();
        let tomorrow = ReminderMessage::UpcomingCharge {
            service_name: "Spotify".into(),
            charge_at,
            offset_days: 1,
        };
        assert_eq!(tomorrow.title(), "Påminnelse: Spotify dras i morgon.");

        let dated = ReminderMessage::UpcomingCharge {
            service_name: "Spotify".into(),
            charge_at,
            offset_days: 7,
        };
        assert_eq!(dated.title(), "Autogiro: Spotify dras 2026-10-01 – belopp ok.");
        assert_eq!(dated.body(), "Belopp: se tjänsten.");
    }

    #[test]
    fn settlement_message_carries_both_ids() {
        let message = ReminderMessage::SettlementDebt {
            split_group_id: ID::new(),
            settlement_id: ID::new(),
            receiver_id: ID::new(),
            amount: 350.4,
        };
        assert!(message.body().starts_with("Du är skyldig 350 kr till "));
        let metadata = message.metadata();
        assert!(metadata.contains_key("split_group_id"));
        assert!(metadata.contains_key("settlement_id"));
        assert_eq!(metadata["analytics_event"], "split_payment_reminder_fired");
    }
}
