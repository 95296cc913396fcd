// src/models/submission.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Represents the 'submissions' table in the database.
/// Stores one scored attempt at a quiz. `user_name` is a plain text
/// field, there is no account system.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub quiz_id: i64,
    pub user_name: String,
    pub score: i64,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

/// Represents the 'user_answers' table: the per-question correctness
/// record attached to a submission.
///
/// `answer_id` is the selected option for mcq questions; it is NULL for
/// text questions and for mcq questions with a missing or garbled value.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserAnswer {
    pub id: i64,
    pub submission_id: i64,
    pub question_id: i64,
    pub answer_id: Option<i64>,
    pub is_correct: bool,
}

/// DTO returned after grading a submission.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub submission_id: i64,
    pub score: i64,
    pub total: i64,
}

/// DTO for the result page: the most recent submission for a quiz.
/// Defaults (empty name, zero score) are used when no submission exists.
#[derive(Debug, Serialize)]
pub struct ResultResponse {
    pub quiz_id: i64,
    pub quiz_title: String,
    pub user_name: String,
    pub score: i64,
    pub total: i64,
}

/// Audit view of a submission with its per-question outcomes.
#[derive(Debug, Serialize)]
pub struct SubmissionDetail {
    #[serde(flatten)]
    pub submission: Submission,
    pub user_answers: Vec<UserAnswer>,
}
