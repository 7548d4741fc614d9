mod deadline;
mod plan;
mod projection;

pub use deadline::{extract_deadlines, parse_instant, DeadlineCandidate};
pub use plan::{compute_plans, ReminderPlan};
pub use projection::{
    day_window, is_due, project_fire_at, push_due_date, EvaluationMode, REMINDER_HOUR,
};
