use super::pipeline::PassSummary;
use crate::giftcard::sync_reminders::SyncGiftCardRemindersUseCase;
use crate::receipt::sync_reminders::SyncReceiptRemindersUseCase;
use crate::settlement::sync_reminders::SyncSettlementRemindersUseCase;
use crate::shared::usecase::{execute, UseCase};
use crate::subscription::sync_reminders::SyncSubscriptionRemindersUseCase;
use koll_scheduler_domain::scheduling::EvaluationMode;
use koll_scheduler_infra::KollContext;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CheckRemindersReport {
    pub receipts: PassSummary,
    pub giftcards: PassSummary,
    pub subscriptions: PassSummary,
    pub settlements: PassSummary,
}

/// Runs the four domain passes in a fixed order. The passes are independent;
/// a storage failure in one aborts the run, a transport failure only skips
/// the affected record.
#[derive(Debug)]
pub struct CheckRemindersUseCase {
    pub mode: EvaluationMode,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for crate::error::KollError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CheckRemindersUseCase {
    type Response = CheckRemindersReport;
    type Error = UseCaseError;

    const NAME: &'static str = "CheckReminders";

    async fn execute(&mut self, ctx: &KollContext) -> Result<Self::Response, Self::Error> {
        let receipts = execute(SyncReceiptRemindersUseCase { mode: self.mode }, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let giftcards = execute(SyncGiftCardRemindersUseCase { mode: self.mode }, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let subscriptions = execute(SyncSubscriptionRemindersUseCase { mode: self.mode }, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let settlements = execute(SyncSettlementRemindersUseCase, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(CheckRemindersReport {
            receipts,
            giftcards,
            subscriptions,
            settlements,
        })
    }
}
