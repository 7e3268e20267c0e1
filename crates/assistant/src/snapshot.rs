//! CSV snapshot and prompt construction.
//!
//! The assistant answers questions against a full serialization of the
//! stored records. The caller sends every record it has; nothing bounds
//! the snapshot size.

use serde::Serialize;

/// System message establishing the assistant's role.
pub const SYSTEM_PROMPT: &str = "You are a helpful CSV data assistant.";

/// A record row as serialized into the snapshot sent to the assistant.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotRecord {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub email: String,
}

/// Render records as CSV text: an `id,name,age,email` header plus one
/// line per record, in the given order.
pub fn records_to_csv(records: &[SnapshotRecord]) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer
            .serialize(record)
            .expect("writing to an in-memory buffer is infallible");
    }
    let bytes = writer
        .into_inner()
        .expect("writing to an in-memory buffer is infallible");
    String::from_utf8(bytes).expect("CSV output is UTF-8")
}

/// Build the user prompt: the full CSV snapshot followed by the question.
pub fn build_prompt(snapshot_csv: &str, question: &str) -> String {
    format!(
        "You are a data assistant. Answer the following question based on \
         this CSV data:\n\n{snapshot_csv}\n\nQuestion: {question}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, name: &str, age: i32, email: &str) -> SnapshotRecord {
        SnapshotRecord {
            id,
            name: name.to_string(),
            age,
            email: email.to_string(),
        }
    }

    #[test]
    fn test_snapshot_has_header_and_rows_in_order() {
        let csv = records_to_csv(&[
            record(1, "Alice", 30, "alice@example.com"),
            record(2, "Bob", 25, "bob@example.com"),
        ]);

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "id,name,age,email",
                "1,Alice,30,alice@example.com",
                "2,Bob,25,bob@example.com",
            ]
        );
    }

    #[test]
    fn test_snapshot_quotes_values_with_commas() {
        let csv = records_to_csv(&[record(1, "Smith, Jane", 41, "jane@example.com")]);
        assert!(csv.contains("\"Smith, Jane\""));
    }

    #[test]
    fn test_prompt_embeds_snapshot_and_question() {
        let prompt = build_prompt("id,name,age,email\n1,A,30,a@b.c", "How many records?");
        assert!(prompt.contains("id,name,age,email"));
        assert!(prompt.ends_with("Question: How many records?"));
    }
}
