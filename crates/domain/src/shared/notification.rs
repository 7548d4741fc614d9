use std::collections::HashMap;

/// Opaque handle returned by the notification transport when a reminder is
/// accepted. The transport owns the scheduled timer; records only keep the
/// forward reference so it can be cancelled later.
pub type JobId = String;

/// Structured payload attached to a scheduled notification. Always carries
/// the originating deadline or charge instant in RFC 3339 form, an offset or
/// deadline-kind tag and an analytics event name.
pub type Metadata = HashMap<String, String>;
