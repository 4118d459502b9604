// src/handlers/result.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{error::AppError, models::result::ResultSummary, utils::jwt::Claims};

/// Lists a student's past quiz results.
///
/// A student may only read their own results: the path ID must match
/// the authenticated caller.
pub async fn view_results(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(student_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if claims.user_id()? != student_id {
        return Err(AppError::Forbidden("Access denied".to_string()));
    }

    let results = sqlx::query_as::<_, ResultSummary>(
        "SELECT quiz_id, marks FROM results WHERE student_id = ? ORDER BY quiz_id",
    )
    .bind(student_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch results for student {}: {:?}", student_id, e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(results))
}
