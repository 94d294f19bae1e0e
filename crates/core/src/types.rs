/// All primary keys are PostgreSQL UUIDs generated by the database.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
