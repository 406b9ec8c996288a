//! Domain types for the quiz log service.
//!
//! This module provides:
//! - `QuizLog` records and conversion from request payloads
//! - The placeholder schedule estimator

pub mod quiz_log;
pub mod schedule;

pub use quiz_log::{FieldValue, NewQuizLog, QuizLog, QuizLogDto, QuizLogError};
pub use schedule::{ScheduleEntry, ScheduleError, ScheduleResponse};
