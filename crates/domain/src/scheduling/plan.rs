use super::deadline::DeadlineCandidate;
use super::projection::{is_due, project_fire_at, EvaluationMode};
use chrono::{DateTime, Utc};

/// One admitted `(deadline kind x offset)` combination. Plans are ephemeral
/// and recomputed on every run; only the job ids they produce at the
/// transport are persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderPlan {
    pub kind: &'static str,
    pub offset_days: i64,
    pub deadline: DateTime<Utc>,
    pub fire_at: DateTime<Utc>,
}

/// Projects every candidate through every offset and keeps the combinations
/// the due filter admits, in declared candidate/offset order.
pub fn compute_plans(
    candidates: &[DeadlineCandidate],
    offsets: &[i64],
    mode: EvaluationMode,
    now: DateTime<Utc>,
) -> Vec<ReminderPlan> {
    let mut plans = Vec::new();
    for candidate in candidates {
        for &offset_days in offsets {
            let fire_at = project_fire_at(candidate.instant, offset_days, mode);
            if is_due(fire_at, now, mode) {
                plans.push(ReminderPlan {
                    kind: candidate.kind,
                    offset_days,
                    deadline: candidate.instant,
                    fire_at,
                });
            }
        }
    }
    plans
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn candidate(kind: &'static str, instant: DateTime<Utc>) -> DeadlineCandidate {
        DeadlineCandidate { kind, instant }
    }

    #[test]
    fn deadline_ten_days_out_yields_both_offsets() {
        let now = Utc.with_ymd_and_hms(2026, 9, 10, 12, 0, 0).unwrap();
        let deadline = now + Duration::days(10);
        let plans = compute_plans(
            &[candidate("return_deadline", deadline)],
            &[7, 1],
            EvaluationMode::Continuous,
            now,
        );
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].offset_days, 7);
        assert_eq!(
            plans[0].fire_at,
            Utc.with_ymd_and_hms(2026, 9, 13, 9, 0, 0).unwrap()
        );
        assert_eq!(plans[1].offset_days, 1);
        assert_eq!(
            plans[1].fire_at,
            Utc.with_ymd_and_hms(2026, 9, 19, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn past_offsets_are_filtered_out() {
        let now = Utc.with_ymd_and_hms(2026, 9, 10, 12, 0, 0).unwrap();
        // Expiring in five days: both the 30 and 7 day offsets are already gone
        let deadline = now + Duration::days(5);
        let plans = compute_plans(
            &[candidate("expires_at", deadline)],
            &[30, 7],
            EvaluationMode::Continuous,
            now,
        );
        assert!(plans.is_empty());
    }

    #[test]
    fn batch_mode_admits_only_todays_projections() {
        let now = Utc.with_ymd_and_hms(2026, 9, 10, 5, 0, 0).unwrap();
        let plans = compute_plans(
            &[
                candidate("a", now + Duration::days(7)),
                candidate("b", now + Duration::days(8)),
            ],
            &[7, 1],
            EvaluationMode::DailyBatch,
            now,
        );
        // Only candidate "a" with offset 7 projects onto today
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].kind, "a");
        assert_eq!(plans[0].offset_days, 7);
        assert_eq!(
            plans[0].fire_at,
            Utc.with_ymd_and_hms(2026, 9, 10, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn multiple_candidates_keep_declared_order() {
        let now = Utc.with_ymd_and_hms(2026, 9, 10, 12, 0, 0).unwrap();
        let plans = compute_plans(
            &[
                candidate("return_deadline", now + Duration::days(10)),
                candidate("warranty_expires", now + Duration::days(20)),
            ],
            &[7, 1],
            EvaluationMode::Continuous,
            now,
        );
        let kinds: Vec<_> = plans.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                "return_deadline",
                "return_deadline",
                "warranty_expires",
                "warranty_expires"
            ]
        );
    }
}
