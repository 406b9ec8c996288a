//! Quiz log records and request payload conversion.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// A non-null scalar as SQLite stores it.
///
/// Columns are dynamically typed: what comes back depends on what the client
/// sent and on the column's affinity, not on a fixed Rust type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric view of the value; `None` for text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Real(f) => Some(*f),
            FieldValue::Text(_) => None,
        }
    }
}

/// A persisted quiz log row.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizLog {
    /// Auto-assigned row id. Never exposed over the API.
    pub id: i64,
    pub quiz_id: Option<FieldValue>,
    /// Time spent on the quiz in milliseconds.
    pub time_spent: Option<FieldValue>,
    /// Completion time in seconds since Unix epoch.
    pub timestamp: Option<FieldValue>,
    /// Question records, stored without interpretation.
    pub questions: Option<Value>,
}

/// A quiz log that has not been stored yet.
///
/// Fields hold the client's JSON untouched; the store decides what it accepts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewQuizLog {
    pub quiz_id: Option<Value>,
    pub time_spent: Option<Value>,
    pub timestamp: Option<Value>,
    pub questions: Option<Value>,
}

#[derive(Debug, Error, PartialEq)]
pub enum QuizLogError {
    #[error("request body must be a JSON object")]
    NotAnObject,
}

impl NewQuizLog {
    /// Build a record from a decoded request body.
    ///
    /// Every key is optional; absent and `null` both become `None`.
    pub fn from_payload(payload: &Value) -> Result<Self, QuizLogError> {
        let obj = payload.as_object().ok_or(QuizLogError::NotAnObject)?;

        Ok(NewQuizLog {
            quiz_id: present(obj, "quizId"),
            time_spent: present(obj, "timeSpent"),
            timestamp: present(obj, "timestamp"),
            questions: present(obj, "questions"),
        })
    }
}

fn present(obj: &Map<String, Value>, key: &str) -> Option<Value> {
    obj.get(key).filter(|v| !v.is_null()).cloned()
}

/// Wire shape of a stored quiz log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizLogDto {
    pub quiz_id: Option<FieldValue>,
    pub time_spent: Option<FieldValue>,
    pub timestamp: Option<FieldValue>,
    pub questions: Option<Value>,
}

impl From<QuizLog> for QuizLogDto {
    fn from(log: QuizLog) -> Self {
        QuizLogDto {
            quiz_id: log.quiz_id,
            time_spent: log.time_spent,
            timestamp: log.timestamp,
            questions: log.questions,
        }
    }
}
