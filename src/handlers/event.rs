// src/handlers/event.rs

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::SqlitePool;

use crate::{error::AppError, models::event::Event};

/// Lists upcoming events (date >= today), soonest first.
pub async fn list_events(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let today = chrono::Utc::now().date_naive();

    let events = sqlx::query_as::<_, Event>(
        "SELECT id, title, description, date, location
         FROM events WHERE date >= ? ORDER BY date, id",
    )
    .bind(today)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list events: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(events))
}
