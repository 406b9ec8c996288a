//! Repository layer for quiz log storage.

use crate::domain::{FieldValue, NewQuizLog, QuizLog};
use serde_json::Value;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqlitePool, SqliteRow};
use sqlx::Row;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("invalid questions JSON: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("cannot store {kind} in column {column}")]
    UnsupportedValue {
        column: &'static str,
        kind: &'static str,
    },
}

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    /// Insert a quiz log in its own transaction and return the new row id.
    ///
    /// Scalar fields are bound with the type the client sent and SQLite's
    /// column affinity decides what is kept: `"1000"` in `time_spent` becomes
    /// INTEGER 1000, `7` in `quiz_id` becomes TEXT `'7'`, `1500.5` stays REAL.
    /// Arrays and objects are refused for scalar columns. The transaction is
    /// rolled back if the insert fails, so a rejected record leaves nothing behind.
    ///
    /// # Errors
    /// Returns an error if a field cannot be bound, or the insert or commit fails.
    pub async fn insert_quiz_log(&self, log: &NewQuizLog) -> Result<i64, StorageError> {
        let quiz_id = column_value("quiz_id", log.quiz_id.as_ref())?;
        let time_spent = column_value("time_spent", log.time_spent.as_ref())?;
        let timestamp = column_value("timestamp", log.timestamp.as_ref())?;
        let questions = log
            .questions
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let mut tx = self.pool.begin().await?;

        let query = sqlx::query(
            r#"
            INSERT INTO quiz_logs (quiz_id, time_spent, timestamp, questions)
            VALUES (?, ?, ?, ?)
            "#,
        );
        let query = bind_field(query, quiz_id.as_ref());
        let query = bind_field(query, time_spent.as_ref());
        let query = bind_field(query, timestamp.as_ref());
        let result = query.bind(questions.as_deref()).execute(&mut *tx).await;

        match result {
            Ok(done) => {
                tx.commit().await?;
                Ok(done.last_insert_rowid())
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback after failed insert also failed: {}", rollback_err);
                }
                Err(e.into())
            }
        }
    }

    /// Fetch every quiz log in insertion order.
    ///
    /// # Errors
    /// Returns an error if the query fails or a stored `questions` value is not valid JSON.
    pub async fn list_quiz_logs(&self) -> Result<Vec<QuizLog>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT id,
                   quiz_id, typeof(quiz_id) AS quiz_id_type,
                   time_spent, typeof(time_spent) AS time_spent_type,
                   timestamp, typeof(timestamp) AS timestamp_type,
                   questions
            FROM quiz_logs
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(quiz_log_from_row).collect()
    }
}

/// Map a JSON scalar onto the SQLite value it is bound as.
fn column_value(
    column: &'static str,
    value: Option<&Value>,
) -> Result<Option<FieldValue>, StorageError> {
    let unsupported = |kind| StorageError::UnsupportedValue { column, kind };
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(FieldValue::Integer(i64::from(*b)))),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Ok(Some(FieldValue::Integer(i)))
            } else if n.is_u64() {
                Err(unsupported("an integer larger than 64 bits"))
            } else {
                Ok(n.as_f64().map(FieldValue::Real))
            }
        }
        Some(Value::String(s)) => Ok(Some(FieldValue::Text(s.clone()))),
        Some(Value::Array(_)) => Err(unsupported("an array")),
        Some(Value::Object(_)) => Err(unsupported("an object")),
    }
}

fn bind_field<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: Option<&'q FieldValue>,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        None => query.bind(None::<i64>),
        Some(FieldValue::Integer(i)) => query.bind(*i),
        Some(FieldValue::Real(f)) => query.bind(*f),
        Some(FieldValue::Text(s)) => query.bind(s.as_str()),
    }
}

/// Decode a dynamically typed column using its `typeof()` companion column.
fn field_from_row(
    row: &SqliteRow,
    column: &'static str,
) -> Result<Option<FieldValue>, StorageError> {
    let kind: String = row.try_get(format!("{}_type", column).as_str())?;
    match kind.as_str() {
        "null" => Ok(None),
        "integer" => Ok(Some(FieldValue::Integer(row.try_get(column)?))),
        "real" => Ok(Some(FieldValue::Real(row.try_get(column)?))),
        "text" => Ok(Some(FieldValue::Text(row.try_get(column)?))),
        _ => Err(StorageError::UnsupportedValue {
            column,
            kind: "a blob",
        }),
    }
}

fn quiz_log_from_row(row: &SqliteRow) -> Result<QuizLog, StorageError> {
    let questions: Option<String> = row.try_get("questions")?;
    Ok(QuizLog {
        id: row.try_get("id")?,
        quiz_id: field_from_row(row, "quiz_id")?,
        time_spent: field_from_row(row, "time_spent")?,
        timestamp: field_from_row(row, "timestamp")?,
        questions: questions
            .map(|text| serde_json::from_str(&text))
            .transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::init_db;
    use serde_json::json;
    use tempfile::TempDir;

    async fn setup_test_db() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("test.db")
            .to_string_lossy()
            .to_string();
        let pool = init_db(&db_path).await.expect("init_db failed");
        (Repository::new(pool), temp_dir)
    }

    fn sample_log() -> NewQuizLog {
        NewQuizLog {
            quiz_id: Some(json!("q1")),
            time_spent: Some(json!(1000)),
            timestamp: Some(json!(1700000000)),
            questions: Some(json!([{"q": "2+2", "a": "4"}])),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_quiz_log() {
        let (repo, _temp) = setup_test_db().await;

        let id = repo
            .insert_quiz_log(&sample_log())
            .await
            .expect("insert failed");

        let logs = repo.list_quiz_logs().await.expect("list failed");
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].id, id);
        assert_eq!(logs[0].quiz_id, Some(FieldValue::Text("q1".into())));
        assert_eq!(logs[0].time_spent, Some(FieldValue::Integer(1000)));
        assert_eq!(logs[0].timestamp, Some(FieldValue::Integer(1700000000)));
        assert_eq!(logs[0].questions, Some(json!([{"q": "2+2", "a": "4"}])));
    }

    #[tokio::test]
    async fn test_ids_are_unique_and_ordered() {
        let (repo, _temp) = setup_test_db().await;

        let first = repo.insert_quiz_log(&sample_log()).await.unwrap();
        let second = repo.insert_quiz_log(&NewQuizLog::default()).await.unwrap();
        assert!(second > first);

        let logs = repo.list_quiz_logs().await.unwrap();
        let ids: Vec<i64> = logs.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[tokio::test]
    async fn test_absent_fields_stored_as_null() {
        let (repo, _temp) = setup_test_db().await;

        repo.insert_quiz_log(&NewQuizLog::default()).await.unwrap();

        let logs = repo.list_quiz_logs().await.unwrap();
        assert_eq!(logs[0].quiz_id, None);
        assert_eq!(logs[0].time_spent, None);
        assert_eq!(logs[0].timestamp, None);
        assert_eq!(logs[0].questions, None);
    }

    #[tokio::test]
    async fn test_column_affinity_decides_stored_type() {
        let (repo, _temp) = setup_test_db().await;
        let log = NewQuizLog {
            quiz_id: Some(json!(7)),
            time_spent: Some(json!("1000")),
            timestamp: Some(json!(1700000000.5)),
            questions: None,
        };

        repo.insert_quiz_log(&log).await.unwrap();

        let logs = repo.list_quiz_logs().await.unwrap();
        assert_eq!(logs[0].quiz_id, Some(FieldValue::Text("7".into())));
        assert_eq!(logs[0].time_spent, Some(FieldValue::Integer(1000)));
        assert_eq!(logs[0].timestamp, Some(FieldValue::Real(1700000000.5)));
    }

    #[tokio::test]
    async fn test_fractional_time_spent_stored_as_real() {
        let (repo, _temp) = setup_test_db().await;
        let log = NewQuizLog {
            time_spent: Some(json!(1500.5)),
            ..NewQuizLog::default()
        };

        repo.insert_quiz_log(&log).await.unwrap();

        let logs = repo.list_quiz_logs().await.unwrap();
        assert_eq!(logs[0].time_spent, Some(FieldValue::Real(1500.5)));
    }

    #[tokio::test]
    async fn test_non_numeric_text_kept_as_text() {
        let (repo, _temp) = setup_test_db().await;
        let log = NewQuizLog {
            time_spent: Some(json!("abc")),
            timestamp: Some(json!(true)),
            ..NewQuizLog::default()
        };

        repo.insert_quiz_log(&log).await.unwrap();

        let logs = repo.list_quiz_logs().await.unwrap();
        assert_eq!(logs[0].time_spent, Some(FieldValue::Text("abc".into())));
        assert_eq!(logs[0].timestamp, Some(FieldValue::Integer(1)));
    }

    #[tokio::test]
    async fn test_array_in_scalar_column_rejected() {
        let (repo, _temp) = setup_test_db().await;
        let log = NewQuizLog {
            time_spent: Some(json!([1000])),
            ..NewQuizLog::default()
        };

        let result = repo.insert_quiz_log(&log).await;
        assert!(matches!(
            result,
            Err(StorageError::UnsupportedValue {
                column: "time_spent",
                kind: "an array"
            })
        ));
        assert!(repo.list_quiz_logs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_nested_questions_round_trip() {
        let (repo, _temp) = setup_test_db().await;
        let questions = json!({
            "items": [{"questionId": "a", "answerValue": null}, {"nested": {"depth": [1, 2.5]}}]
        });
        let log = NewQuizLog {
            questions: Some(questions.clone()),
            ..NewQuizLog::default()
        };

        repo.insert_quiz_log(&log).await.unwrap();

        let logs = repo.list_quiz_logs().await.unwrap();
        assert_eq!(logs[0].questions, Some(questions));
    }

    #[tokio::test]
    async fn test_scalar_questions_rejected_and_rolled_back() {
        let (repo, _temp) = setup_test_db().await;
        let log = NewQuizLog {
            quiz_id: Some(json!("bad")),
            questions: Some(json!("not a list")),
            ..NewQuizLog::default()
        };

        let result = repo.insert_quiz_log(&log).await;
        assert!(matches!(result, Err(StorageError::Database(_))));

        let logs = repo.list_quiz_logs().await.unwrap();
        assert!(logs.is_empty());
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let (repo, _temp) = setup_test_db().await;
        assert!(repo.list_quiz_logs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_fails_without_table() {
        let (repo, _temp) = setup_test_db().await;
        sqlx::query("DROP TABLE quiz_logs")
            .execute(&repo.pool)
            .await
            .unwrap();

        let result = repo.insert_quiz_log(&sample_log()).await;
        assert!(result.is_err());
        assert!(repo.list_quiz_logs().await.is_err());
    }
}
