// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use crate::models::answer::{Answer, PublicAnswer};

/// Question kind. Stored as TEXT ('mcq' / 'text') in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum QuestionType {
    /// Multiple choice: graded against the selected answer's `is_correct` flag.
    Mcq,
    /// Free text: graded by normalized comparison against the canonical answer.
    Text,
}

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,

    /// The text content of the question.
    pub text: String,

    pub question_type: QuestionType,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A question together with its answer rows, as loaded for the attempt
/// page and for grading.
#[derive(Debug, Clone)]
pub struct QuestionWithAnswers {
    pub question: Question,
    pub answers: Vec<Answer>,
}

/// DTO for sending a question to visitors (excludes correctness flags).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub text: String,
    pub question_type: QuestionType,
    pub options: Vec<PublicAnswer>,
}

impl From<&QuestionWithAnswers> for PublicQuestion {
    fn from(qa: &QuestionWithAnswers) -> Self {
        PublicQuestion {
            id: qa.question.id,
            text: qa.question.text.clone(),
            question_type: qa.question.question_type,
            options: qa.answers.iter().map(PublicAnswer::from).collect(),
        }
    }
}

/// DTO for staff review: the question with its answers, correctness
/// flags included.
#[derive(Debug, Serialize)]
pub struct AdminQuestion {
    #[serde(flatten)]
    pub question: Question,
    pub answers: Vec<Answer>,
}

/// DTO for creating a new question under a quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 512))]
    pub text: String,
    pub question_type: QuestionType,
}

/// DTO for updating a question. Fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateQuestionRequest {
    pub text: Option<String>,
    pub question_type: Option<QuestionType>,
}
