use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Wall-clock hour at which continuous-mode reminders fire.
pub const REMINDER_HOUR: u32 = 9;

/// The two evaluation strategies the engine supports. They used to live in
/// two independently maintained code paths; here they are configuration for
/// one projector/filter pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMode {
    /// Admit any fire instant strictly in the future relative to now.
    Continuous,
    /// Admit only fire instants landing within the current calendar day.
    DailyBatch,
}

impl EvaluationMode {
    fn normalized_hour(&self) -> u32 {
        match self {
            Self::Continuous => REMINDER_HOUR,
            Self::DailyBatch => 0,
        }
    }
}

fn at_hour(instant: DateTime<Utc>, hour: u32) -> DateTime<Utc> {
    instant
        .date_naive()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
        .and_utc()
}

/// Projects a deadline to its reminder fire instant: `deadline - offset days`
/// with the time-of-day normalized to the mode's fixed hour. Pure and
/// idempotent.
pub fn project_fire_at(
    deadline: DateTime<Utc>,
    offset_days: i64,
    mode: EvaluationMode,
) -> DateTime<Utc> {
    at_hour(deadline - Duration::days(offset_days), mode.normalized_hour())
}

/// The current calendar day as `[midnight, midnight + 1 day)`.
pub fn day_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = at_hour(now, 0);
    (start, start + Duration::days(1))
}

/// Due filter: continuous mode admits strictly-future instants, batch mode
/// admits instants within today's window.
pub fn is_due(fire_at: DateTime<Utc>, now: DateTime<Utc>, mode: EvaluationMode) -> bool {
    match mode {
        EvaluationMode::Continuous => fire_at > now,
        EvaluationMode::DailyBatch => {
            let (start, end) = day_window(now);
            fire_at >= start && fire_at < end
        }
    }
}

/// Unconditional due-date push used by settlements: `from + days` at the
/// reminder hour. Not a lead time and never filtered by day window.
pub fn push_due_date(from: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    at_hour(from + Duration::days(days), REMINDER_HOUR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn projection_subtracts_days_and_normalizes_hour() {
        let deadline = Utc.with_ymd_and_hms(2026, 9, 20, 16, 45, 12).unwrap();
        assert_eq!(
            project_fire_at(deadline, 7, EvaluationMode::Continuous),
            Utc.with_ymd_and_hms(2026, 9, 13, 9, 0, 0).unwrap()
        );
        assert_eq!(
            project_fire_at(deadline, 7, EvaluationMode::DailyBatch),
            Utc.with_ymd_and_hms(2026, 9, 13, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn projection_is_idempotent() {
        let deadline = Utc.with_ymd_and_hms(2026, 9, 20, 16, 45, 12).unwrap();
        let first = project_fire_at(deadline, 1, EvaluationMode::Continuous);
        let second = project_fire_at(deadline, 1, EvaluationMode::Continuous);
        assert_eq!(first, second);
    }

    #[test]
    fn continuous_mode_requires_strict_future() {
        let now = Utc.with_ymd_and_hms(2026, 9, 13, 9, 0, 0).unwrap();
        assert!(!is_due(now, now, EvaluationMode::Continuous));
        assert!(!is_due(
            now - Duration::milliseconds(1),
            now,
            EvaluationMode::Continuous
        ));
        assert!(is_due(
            now + Duration::milliseconds(1),
            now,
            EvaluationMode::Continuous
        ));
    }

    #[test]
    fn batch_mode_window_boundaries() {
        let now = Utc.with_ymd_and_hms(2026, 9, 13, 11, 30, 0).unwrap();
        let midnight = Utc.with_ymd_and_hms(2026, 9, 13, 0, 0, 0).unwrap();
        let last_instant = Utc
            .with_ymd_and_hms(2026, 9, 13, 23, 59, 59)
            .unwrap()
            + Duration::milliseconds(999);
        let next_midnight = Utc.with_ymd_and_hms(2026, 9, 14, 0, 0, 0).unwrap();

        assert!(is_due(midnight, now, EvaluationMode::DailyBatch));
        assert!(is_due(last_instant, now, EvaluationMode::DailyBatch));
        assert!(!is_due(next_midnight, now, EvaluationMode::DailyBatch));
        assert!(!is_due(
            midnight - Duration::milliseconds(1),
            now,
            EvaluationMode::DailyBatch
        ));
    }

    #[test]
    fn settlement_push_adds_days_at_reminder_hour() {
        let created = Utc.with_ymd_and_hms(2026, 9, 13, 22, 15, 0).unwrap();
        assert_eq!(
            push_due_date(created, 3),
            Utc.with_ymd_and_hms(2026, 9, 16, 9, 0, 0).unwrap()
        );
    }
}
