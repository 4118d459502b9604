// src/handlers/teacher.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        question::{CreateQuestionRequest, Question},
        quiz::CreateQuizRequest,
    },
    utils::jwt::Claims,
};

/// Fetches the owner of a quiz, or 404 if the quiz does not exist.
async fn quiz_owner(pool: &SqlitePool, quiz_id: i64) -> Result<i64, AppError> {
    sqlx::query_scalar::<_, i64>("SELECT teacher_id FROM quizzes WHERE id = ?")
        .bind(quiz_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))
}

/// Creates a new quiz owned by the calling teacher.
pub async fn create_quiz(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let teacher_id = claims.user_id()?;

    let quiz_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO quizzes (title, teacher_id) VALUES (?, ?) RETURNING id",
    )
    .bind(&payload.title)
    .bind(teacher_id)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create quiz: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({"quiz_id": quiz_id})),
    ))
}

/// Adds a question to a quiz.
///
/// Only the quiz owner may add questions; other teachers get 403.
pub async fn add_question(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let teacher_id = claims.user_id()?;
    let owner_id = quiz_owner(&pool, payload.quiz_id).await?;

    if owner_id != teacher_id {
        return Err(AppError::Forbidden("Access denied".to_string()));
    }

    sqlx::query(
        "INSERT INTO questions \
         (quiz_id, question, option_a, option_b, option_c, option_d, correct_option) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(payload.quiz_id)
    .bind(&payload.question)
    .bind(&payload.option_a)
    .bind(&payload.option_b)
    .bind(&payload.option_c)
    .bind(&payload.option_d)
    .bind(&payload.correct_option)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to add question: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({"message": "Question added"})),
    ))
}

/// Lists a quiz's questions including the answer key.
///
/// Restricted to the owning teacher; this is the only read path that
/// exposes `correct_option`.
pub async fn list_questions(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let teacher_id = claims.user_id()?;
    let owner_id = quiz_owner(&pool, quiz_id).await?;

    if owner_id != teacher_id {
        return Err(AppError::Forbidden("Access denied".to_string()));
    }

    let questions = sqlx::query_as::<_, Question>(
        "SELECT id, quiz_id, question, option_a, option_b, option_c, option_d, correct_option \
         FROM questions WHERE quiz_id = ? ORDER BY id",
    )
    .bind(quiz_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch questions for quiz {}: {:?}", quiz_id, e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(questions))
}
