/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Wall-clock time of day, second precision (PostgreSQL TIME).
pub type TimeOfDay = chrono::NaiveTime;

/// Calendar date without a timezone (PostgreSQL DATE).
pub type CalendarDate = chrono::NaiveDate;
