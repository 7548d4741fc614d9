use chrono::{DateTime, NaiveDate, Utc};

/// A labeled deadline pulled out of a record's raw fields. Candidates only
/// live for one evaluation pass and are never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DeadlineCandidate {
    pub kind: &'static str,
    pub instant: DateTime<Utc>,
}

/// Parses a raw timestamp field. Missing or malformed input yields `None`;
/// the engine drops such entries instead of surfacing an error.
pub fn parse_instant(value: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = value?.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    // Date-only form found in parts of the legacy dataset
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Extracts candidate deadlines from `(kind, raw value)` pairs, preserving
/// the policy-declared field order.
pub fn extract_deadlines(fields: &[(&'static str, Option<&str>)]) -> Vec<DeadlineCandidate> {
    fields
        .iter()
        .filter_map(|&(kind, value)| {
            parse_instant(value).map(|instant| DeadlineCandidate { kind, instant })
        })
        .collect()
}
