// src/handlers/student.rs

use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::{Sqlite, SqlitePool};

use crate::{
    error::{AppError, is_unique_violation},
    models::{
        answer::{SubmitAttemptRequest, SubmittedAnswer},
        question::PublicQuestion,
        quiz::QuizListing,
    },
    utils::jwt::Claims,
};

/// Helper struct for fetching answer keys from the database.
#[derive(sqlx::FromRow)]
struct AnswerKey {
    id: i64,
    correct_option: String,
}

/// Counts correct answers against the answer keys.
///
/// Binary scoring, one mark per match. Answers referencing unknown
/// question IDs score nothing and raise no error.
fn score_answers(answers: &[SubmittedAnswer], keys: &HashMap<i64, String>) -> i64 {
    let mut marks = 0;

    for answer in answers {
        if let Some(correct) = keys.get(&answer.question_id) {
            if &answer.selected_option == correct {
                marks += 1;
            }
        }
    }

    marks
}

/// Submits a student's one-time attempt at a quiz.
///
/// * Rejects with 403 if a result already exists for (student, quiz).
/// * Scores the submitted answers against the stored answer keys.
/// * Writes every Answer row plus exactly one Result row in a single
///   transaction; a racing duplicate surfaces as a unique violation on
///   `results` and is reported as 403 as well.
pub async fn attempt_quiz(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(quiz_id): Path<i64>,
    Json(req): Json<SubmitAttemptRequest>,
) -> Result<impl IntoResponse, AppError> {
    let student_id = claims.user_id()?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    // One attempt lock
    let existing =
        sqlx::query_scalar::<_, i64>("SELECT id FROM results WHERE student_id = ? AND quiz_id = ?")
            .bind(student_id)
            .bind(quiz_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    if existing.is_some() {
        return Err(AppError::Forbidden("Quiz already attempted".to_string()));
    }

    // Fetch answer keys for the submitted question IDs with a dynamic
    // IN clause.
    let question_ids: Vec<i64> = req.answers.iter().map(|a| a.question_id).collect();

    let keys: HashMap<i64, String> = if question_ids.is_empty() {
        HashMap::new()
    } else {
        let mut query_builder = sqlx::QueryBuilder::<Sqlite>::new(
            "SELECT id, correct_option FROM questions WHERE id IN (",
        );

        let mut separated = query_builder.separated(",");
        for id in &question_ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(")");

        let db_keys: Vec<AnswerKey> = query_builder
            .build_query_as()
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        db_keys.into_iter().map(|k| (k.id, k.correct_option)).collect()
    };

    let marks = score_answers(&req.answers, &keys);

    // Record the raw selections, correct or not, known question or not.
    for answer in &req.answers {
        sqlx::query(
            "INSERT INTO answers (student_id, quiz_id, question_id, selected_option) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(student_id)
        .bind(quiz_id)
        .bind(answer.question_id)
        .bind(&answer.selected_option)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    }

    sqlx::query("INSERT INTO results (student_id, quiz_id, marks) VALUES (?, ?, ?)")
        .bind(student_id)
        .bind(quiz_id)
        .bind(marks)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Forbidden("Quiz already attempted".to_string())
            } else {
                tracing::error!("Failed to insert result: {:?}", e);
                AppError::InternalServerError(e.to_string())
            }
        })?;

    tx.commit()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(serde_json::json!({"marks": marks})))
}

/// Lists all quizzes with question count and teacher display name.
///
/// Public. `teacher` is null when the owning account was deleted.
pub async fn list_quizzes(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let quizzes = sqlx::query_as::<_, QuizListing>(
        "SELECT q.id, q.title, u.name AS teacher, COUNT(qs.id) AS questions \
         FROM quizzes q \
         LEFT JOIN users u ON u.id = q.teacher_id \
         LEFT JOIN questions qs ON qs.quiz_id = q.id \
         GROUP BY q.id, q.title, u.name \
         ORDER BY q.id",
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list quizzes: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(quizzes))
}

/// Lists a quiz's questions for taking.
///
/// Public. Maps rows to `PublicQuestion`, which has no `correct_option`
/// field, so the answer key never appears in the response.
pub async fn quiz_questions(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let questions = sqlx::query_as::<_, PublicQuestion>(
        "SELECT id, question, option_a, option_b, option_c, option_d \
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
