// src/models/event.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'events' table in the database.
/// Upcoming events shown alongside the quiz listing.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: chrono::NaiveDate,
    pub location: String,
}

/// DTO for creating a new event.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(max = 20000))]
    #[serde(default)]
    pub description: String,
    pub date: chrono::NaiveDate,
    #[validate(length(max = 255))]
    #[serde(default)]
    pub location: String,
}

/// DTO for updating an event. Fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<chrono::NaiveDate>,
    pub location: Option<String>,
}
