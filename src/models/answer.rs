// src/models/answer.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'answers' table in the database.
/// One row per submitted answer, written exactly once during an attempt.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,
    pub student_id: i64,
    pub quiz_id: i64,
    pub question_id: i64,
    /// The raw selection as submitted, recorded whether or not it was
    /// correct and whether or not the question exists.
    pub selected_option: String,
}

/// One answer inside an attempt submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: i64,
    pub selected_option: String,
}

/// DTO for submitting a quiz attempt.
#[derive(Debug, Deserialize)]
pub struct SubmitAttemptRequest {
    #[serde(default)]
    pub answers: Vec<SubmittedAnswer>,
}
