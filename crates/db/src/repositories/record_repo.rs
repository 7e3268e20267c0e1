//! Repository for the `records` table.

use csvq_core::search::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use sqlx::PgPool;

use crate::models::record::{CreateRecord, Record};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, age, email, created_at";

/// Provides insert and read operations for records. There are no update
/// or delete paths; records are immutable once stored.
pub struct RecordRepo;

impl RecordRepo {
    /// Insert a batch of records with one multi-row statement, returning
    /// the created rows in input order. The insert is atomic: either the
    /// whole batch lands or none of it does.
    pub async fn insert_batch(
        pool: &PgPool,
        records: &[CreateRecord],
    ) -> Result<Vec<Record>, sqlx::Error> {
        if records.is_empty() {
            return Ok(vec![]);
        }

        let names: Vec<String> = records.iter().map(|r| r.name.clone()).collect();
        let ages: Vec<i32> = records.iter().map(|r| r.age).collect();
        let emails: Vec<String> = records.iter().map(|r| r.email.clone()).collect();

        let query = format!(
            "INSERT INTO records (name, age, email) \
             SELECT * FROM UNNEST($1::text[], $2::int[], $3::text[]) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Record>(&query)
            .bind(&names)
            .bind(&ages)
            .bind(&emails)
            .fetch_all(pool)
            .await
    }

    /// Page through records in insertion order. Limit and offset are
    /// clamped to sane bounds.
    pub async fn list(
        pool: &PgPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Record>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(offset);

        let query = format!("SELECT {COLUMNS} FROM records ORDER BY id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Record>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Every record in insertion order. Feeds the in-process filter and
    /// the assistant snapshot.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Record>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM records ORDER BY id");
        sqlx::query_as::<_, Record>(&query).fetch_all(pool).await
    }
}
