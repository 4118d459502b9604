// src/models/result.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'results' table in the database.
/// At most one row exists per (student_id, quiz_id); enforced by a
/// UNIQUE constraint.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: i64,
    pub student_id: i64,
    pub quiz_id: i64,
    pub marks: i64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for a student's result listing.
#[derive(Debug, Serialize, FromRow)]
pub struct ResultSummary {
    pub quiz_id: i64,
    pub marks: i64,
}
