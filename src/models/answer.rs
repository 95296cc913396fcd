// src/models/answer.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'answers' table in the database.
///
/// For mcq questions, `is_correct` marks the correct choice. For text
/// questions, the first row with `is_correct` is the canonical text the
/// visitor's input is compared against.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,
    pub question_id: i64,
    pub text: String,
    pub is_correct: bool,
}

/// DTO for sending an answer option to visitors (hides `is_correct`).
#[derive(Debug, Serialize)]
pub struct PublicAnswer {
    pub id: i64,
    pub text: String,
}

impl From<&Answer> for PublicAnswer {
    fn from(answer: &Answer) -> Self {
        PublicAnswer {
            id: answer.id,
            text: answer.text.clone(),
        }
    }
}

/// DTO for creating a new answer under a question.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAnswerRequest {
    #[validate(length(min = 1, max = 255))]
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// DTO for updating an answer. Fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateAnswerRequest {
    pub text: Option<String>,
    pub is_correct: Option<bool>,
}
