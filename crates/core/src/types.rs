/// All primary keys are UUIDs generated in-process when an entity is built.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh entity identifier.
pub fn new_id() -> DbId {
    uuid::Uuid::new_v4()
}

/// Current time, truncated to microseconds so an in-memory value compares
/// equal to the same value read back from a `TIMESTAMPTZ` column.
pub fn now() -> Timestamp {
    use chrono::{DurationRound, TimeDelta};

    let now = chrono::Utc::now();
    now.duration_trunc(TimeDelta::microseconds(1)).unwrap_or(now)
}
