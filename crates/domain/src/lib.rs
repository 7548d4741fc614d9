mod giftcard;
mod message;
mod receipt;
pub mod scheduling;
mod settlement;
mod shared;
mod subscription;
mod transaction;

pub use giftcard::{GiftCard, GiftCardReminderPatch};
pub use message::ReminderMessage;
pub use receipt::{Receipt, ReceiptReminderPatch};
pub use settlement::{Settlement, SettlementReminderPatch, SettlementStatus};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::flag;
pub use shared::notification::{JobId, Metadata};
pub use subscription::{BillingInterval, Subscription, SubscriptionReminderPatch};
pub use transaction::{Transaction, TransactionKind, TransactionSource};
