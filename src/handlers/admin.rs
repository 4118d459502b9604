// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{error::AppError, models::user::UserSummary};

/// Lists all users in the system.
/// Admin only. Emails and password hashes stay out of the listing.
pub async fn list_users(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let users =
        sqlx::query_as::<_, UserSummary>("SELECT id, name, role FROM users ORDER BY id")
            .fetch_all(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list users: {:?}", e);
                AppError::InternalServerError(e.to_string())
            })?;

    Ok(Json(users))
}

/// Deletes a user by ID.
/// Admin only. Quizzes owned by a deleted teacher stay listed with a
/// null teacher name.
pub async fn delete_user(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete user: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(Json(serde_json::json!({"message": "User deleted"})))
}
