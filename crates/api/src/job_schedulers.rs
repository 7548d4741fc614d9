use crate::reminders::check_reminders::CheckRemindersUseCase;
use crate::shared::usecase::execute;
use crate::subscription::process_charges::ProcessDueChargesUseCase;
use actix_web::rt::time::{interval_at, Instant};
use chrono::Timelike;
use koll_scheduler_infra::KollContext;
use std::time::Duration;
use tracing::warn;

const DAY_SECS: u64 = 24 * 60 * 60;

/// Seconds from the given second-of-day to the next occurrence of `hour`.
pub fn secs_until_hour(secs_of_day: u64, hour: u32) -> u64 {
    let target = hour as u64 * 3600;
    if target > secs_of_day {
        target - secs_of_day
    } else {
        target + DAY_SECS - secs_of_day
    }
}

/// Spawns the daily trigger that runs the reminder pass and the charge pass
/// at the configured hour. The enabled flag is re-read on every tick so the
/// switch takes effect without a restart.
pub fn start_daily_jobs(ctx: KollContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.now();
        let delay = secs_until_hour(
            now.time().num_seconds_from_midnight() as u64,
            ctx.config.job_run_hour,
        );
        let start = Instant::now() + Duration::from_secs(delay);
        let mut daily = interval_at(start, Duration::from_secs(DAY_SECS));
        loop {
            daily.tick().await;
            if !ctx.config.scheduler_enabled {
                continue;
            }

            let check = CheckRemindersUseCase {
                mode: ctx.config.evaluation_mode,
            };
            if execute(check, &ctx).await.is_err() {
                warn!("Daily reminder pass aborted");
            }
            if execute(ProcessDueChargesUseCase, &ctx).await.is_err() {
                warn!("Daily charge pass aborted");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_until_hour_works() {
        // 02:00 waiting for 05:00
        assert_eq!(secs_until_hour(2 * 3600, 5), 3 * 3600);
        // 05:00 sharp rolls over to tomorrow
        assert_eq!(secs_until_hour(5 * 3600, 5), DAY_SECS);
        // 23:00 waiting for 05:00
        assert_eq!(secs_until_hour(23 * 3600, 5), 6 * 3600);
        // Midnight run hour
        assert_eq!(secs_until_hour(1, 0), DAY_SECS - 1);
    }
}
