mod config;
mod notifications;
mod repos;
mod system;

pub use config::Config;
pub use notifications::{
    INotificationService, InMemoryNotificationService, ScheduledNotification,
    WebhookNotificationService,
};
pub use repos::{
    IGiftCardRepo, IReceiptRepo, ISettlementRepo, ISubscriptionRepo, ITransactionRepo, Repos,
};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

/// Everything a use case needs, injected explicitly: storage, the
/// notification transport, configuration and the clock. There are no ambient
/// singletons; tests swap any of these for fakes.
#[derive(Clone)]
pub struct KollContext {
    pub repos: Repos,
    pub notifications: Arc<dyn INotificationService>,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

/// Production context: Postgres storage and the webhook push transport.
pub async fn setup_context() -> KollContext {
    let config = Config::new();
    let repos = Repos::create_postgres(&get_psql_connection_string())
        .await
        .expect("Postgres credentials must be set and valid");
    KollContext {
        repos,
        notifications: Arc::new(WebhookNotificationService::new(
            config.notify_endpoint.clone(),
        )),
        config,
        sys: Arc::new(RealSys {}),
    }
}

/// In-memory context used by tests and local development.
pub fn setup_context_inmemory() -> KollContext {
    KollContext {
        repos: Repos::create_inmemory(),
        notifications: Arc::new(InMemoryNotificationService::new()),
        config: Config::default(),
        sys: Arc::new(RealSys {}),
    }
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
