use super::process_charges::{DueCharge, ProcessDueChargesUseCase};
use crate::shared::usecase::Subscriber;
use koll_scheduler_domain::{Transaction, TransactionKind, TransactionSource};
use koll_scheduler_infra::KollContext;
use tracing::error;

/// Posts an expense transaction to the linked budget for every processed
/// charge. Subscriptions without a budget link are skipped.
pub struct PostLedgerTransactionOnCharge;

#[async_trait::async_trait(?Send)]
impl Subscriber<ProcessDueChargesUseCase> for PostLedgerTransactionOnCharge {
    async fn notify(&self, charges: &Vec<DueCharge>, ctx: &KollContext) {
        for charge in charges {
            let subscription = &charge.subscription;
            let (budget_id, category_id) = match (
                subscription.budget_id.clone(),
                subscription.budget_category_id.clone(),
            ) {
                (Some(budget_id), Some(category_id)) => (budget_id, category_id),
                _ => continue,
            };

            let transaction = Transaction {
                id: Default::default(),
                budget_id,
                category_id,
                kind: TransactionKind::Expense,
                description: subscription.service_name.clone(),
                amount: subscription.amount_per_period,
                date: ctx.sys.now(),
                source: TransactionSource::Subscription,
                source_id: subscription.id.clone(),
            };

            // Sideeffect, a failed posting must not undo the schedule advance
            if let Err(e) = ctx.repos.transactions.insert(&transaction).await {
                error!(
                    "Unable to post ledger transaction for subscription {}: {:?}",
                    subscription.id, e
                );
            }
        }
    }
}
