//! Placeholder study schedule derived from average quiz duration.
//!
//! There is no scheduling logic here: the output always has the same two
//! assignments with fixed due dates. Clients depend on that shape.

use crate::domain::{FieldValue, QuizLog};
use serde::Serialize;
use thiserror::Error;

pub const NO_LOGS_MESSAGE: &str = "No quiz logs found";
pub const GENERATED_MESSAGE: &str = "Schedule generated";

/// Multiplier applied to the average for the second assignment.
pub const HARDER_ASSIGNMENT_FACTOR: f64 = 1.2;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub assignment_id: &'static str,
    pub estimated_time: f64,
    pub due_date: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_time_spent: Option<f64>,
    pub schedule: Vec<ScheduleEntry>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("timeSpent of quiz log {id} is not a number: {value:?}")]
    NonNumericTimeSpent { id: i64, value: String },
}

/// Mean of `time_spent` over all logs, counting absent values as 0.
///
/// Returns `Ok(None)` for an empty slice. Integer and real values are summed
/// separately so large integer totals do not lose precision before the division.
pub fn average_time_spent(logs: &[QuizLog]) -> Result<Option<f64>, ScheduleError> {
    if logs.is_empty() {
        return Ok(None);
    }

    let mut integer_total: i128 = 0;
    let mut real_total: f64 = 0.0;
    for log in logs {
        match &log.time_spent {
            None => {}
            Some(FieldValue::Integer(i)) => integer_total += i128::from(*i),
            Some(FieldValue::Real(f)) => real_total += f,
            Some(FieldValue::Text(s)) => {
                return Err(ScheduleError::NonNumericTimeSpent {
                    id: log.id,
                    value: s.clone(),
                })
            }
        }
    }

    Ok(Some(
        (integer_total as f64 + real_total) / logs.len() as f64,
    ))
}

pub fn estimate(logs: &[QuizLog]) -> Result<ScheduleResponse, ScheduleError> {
    let Some(avg) = average_time_spent(logs)? else {
        return Ok(ScheduleResponse {
            message: NO_LOGS_MESSAGE,
            average_time_spent: None,
            schedule: Vec::new(),
        });
    };

    Ok(ScheduleResponse {
        message: GENERATED_MESSAGE,
        average_time_spent: Some(avg),
        schedule: vec![
            ScheduleEntry {
                assignment_id: "assignment1",
                estimated_time: avg,
                due_date: "2025-03-15T12:00:00Z",
            },
            ScheduleEntry {
                assignment_id: "assignment2",
                estimated_time: avg * HARDER_ASSIGNMENT_FACTOR,
                due_date: "2025-03-20T12:00:00Z",
            },
        ],
    })
}
