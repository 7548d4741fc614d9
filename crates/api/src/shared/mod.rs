pub mod usecase;

#[cfg(test)]
pub(crate) mod test_helpers {
    use chrono::{DateTime, Utc};
    use koll_scheduler_infra::{
        setup_context_inmemory, ISys, InMemoryNotificationService, KollContext,
    };
    use std::sync::Arc;

    /// Clock pinned to a fixed instant.
    pub struct StaticSys(pub DateTime<Utc>);

    impl ISys for StaticSys {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    /// In-memory context with a pinned clock and a handle to the transport
    /// bookkeeping, so tests can assert on scheduled and cancelled jobs.
    pub fn test_context(now: DateTime<Utc>) -> (KollContext, Arc<InMemoryNotificationService>) {
        let mut ctx = setup_context_inmemory();
        let notifications = Arc::new(InMemoryNotificationService::new());
        ctx.notifications = notifications.clone();
        ctx.sys = Arc::new(StaticSys(now));
        (ctx, notifications)
    }
}
