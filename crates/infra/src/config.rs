use koll_scheduler_domain::scheduling::EvaluationMode;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the HTTP trigger surface to run on
    pub port: usize,
    /// Master switch for the daily passes. When false the triggers report
    /// "skipped" and perform no side effects. This replaces the old implicit
    /// dev/stage/prod environment gate.
    pub scheduler_enabled: bool,
    /// Hour of day (UTC) at which the spawned daily jobs run. A deployment
    /// parameter, not a behavioral input.
    pub job_run_hour: u32,
    /// Evaluation strategy for the daily reminder pass.
    pub evaluation_mode: EvaluationMode,
    /// When true, the reconciler cancels the job refs persisted by the
    /// previous run before scheduling new ones. Off by default to stay
    /// compatible with the legacy behavior of orphaning them.
    pub reconcile_stale_jobs: bool,
    /// External push endpoint. Absent means log-only delivery.
    pub notify_endpoint: Option<String>,
}

impl Config {
    /// Reads the configuration from the environment, warning and falling
    /// back to defaults on malformed values.
    pub fn new() -> Self {
        let defaults = Self::default();

        let port = match std::env::var("PORT") {
            Ok(port) => port.parse::<usize>().unwrap_or_else(|_| {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, defaults.port
                );
                defaults.port
            }),
            Err(_) => defaults.port,
        };

        let job_run_hour = match std::env::var("JOB_RUN_HOUR") {
            Ok(hour) => match hour.parse::<u32>() {
                Ok(hour) if hour < 24 => hour,
                _ => {
                    warn!(
                        "The given JOB_RUN_HOUR: {} is not a valid hour, falling back to {}.",
                        hour, defaults.job_run_hour
                    );
                    defaults.job_run_hour
                }
            },
            Err(_) => defaults.job_run_hour,
        };

        let evaluation_mode = match std::env::var("EVALUATION_MODE").as_deref() {
            Ok("daily_batch") => EvaluationMode::DailyBatch,
            Ok("continuous") => EvaluationMode::Continuous,
            Ok(other) => {
                warn!(
                    "Unknown EVALUATION_MODE: {}, falling back to continuous.",
                    other
                );
                defaults.evaluation_mode
            }
            Err(_) => defaults.evaluation_mode,
        };

        Self {
            port,
            scheduler_enabled: env_flag("SCHEDULER_ENABLED", defaults.scheduler_enabled),
            job_run_hour,
            evaluation_mode,
            reconcile_stale_jobs: env_flag("RECONCILE_STALE_JOBS", defaults.reconcile_stale_jobs),
            notify_endpoint: std::env::var("NOTIFY_ENDPOINT").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            scheduler_enabled: true,
            job_run_hour: 5,
            evaluation_mode: EvaluationMode::Continuous,
            reconcile_stale_jobs: false,
            notify_endpoint: None,
        }
    }
}

fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(value) => matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true"),
        Err(_) => default,
    }
}
