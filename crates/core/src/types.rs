/// Order primary keys are store-assigned UUIDs.
pub type OrderId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
