// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'questions' table in the database.
/// Only returned whole to the owning teacher; everyone else gets
/// `PublicQuestion`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    /// The answer key: 'A', 'B', 'C' or 'D'.
    pub correct_option: String,
}

/// DTO for sending a question to quiz takers.
/// Deliberately has no `correct_option` field so the answer key cannot
/// leak through serialization.
#[derive(Debug, Serialize, FromRow)]
pub struct PublicQuestion {
    pub id: i64,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
}

/// DTO for a teacher adding a question to one of their quizzes.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    pub quiz_id: i64,
    #[validate(length(min = 1, max = 300))]
    pub question: String,
    #[validate(length(min = 1, max = 200))]
    pub option_a: String,
    #[validate(length(min = 1, max = 200))]
    pub option_b: String,
    #[validate(length(min = 1, max = 200))]
    pub option_c: String,
    #[validate(length(min = 1, max = 200))]
    pub option_d: String,
    #[validate(custom(function = validate_correct_option))]
    pub correct_option: String,
}

fn validate_correct_option(option: &str) -> Result<(), validator::ValidationError> {
    match option {
        "A" | "B" | "C" | "D" => Ok(()),
        _ => Err(validator::ValidationError::new(
            "correct_option_must_be_a_b_c_or_d",
        )),
    }
}
