//! Record entity model and DTOs.

use csvq_core::normalizer::ValidRecord;
use csvq_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A validated row from the `records` table.
///
/// Records are immutable once stored: the upload path is the only writer
/// and no update or delete operations exist.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Record {
    pub id: DbId,
    pub name: String,
    pub age: i32,
    pub email: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a new record. Values must already have passed the
/// normalizer; the repository does not re-validate.
#[derive(Debug, Clone)]
pub struct CreateRecord {
    pub name: String,
    pub age: i32,
    pub email: String,
}

impl From<ValidRecord> for CreateRecord {
    fn from(record: ValidRecord) -> Self {
        Self {
            name: record.name,
            age: record.age,
            email: record.email,
        }
    }
}
