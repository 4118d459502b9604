// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'quizzes' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    /// Owning teacher. Quizzes are never reassigned.
    pub teacher_id: i64,
}

/// DTO for creating a new quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title length must be between 1 and 200 characters."
    ))]
    pub title: String,
}

/// Aggregated row for the public quiz listing.
/// `teacher` is None when the owning account was deleted.
#[derive(Debug, Serialize, FromRow)]
pub struct QuizListing {
    pub id: i64,
    pub title: String,
    pub teacher: Option<String>,
    pub questions: i64,
}
