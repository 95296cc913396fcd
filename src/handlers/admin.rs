// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    handlers::quiz::{fetch_quiz, load_questions},
    models::{
        answer::{Answer, CreateAnswerRequest, UpdateAnswerRequest},
        event::{CreateEventRequest, UpdateEventRequest},
        question::{AdminQuestion, CreateQuestionRequest, UpdateQuestionRequest},
        quiz::{CreateQuizRequest, UpdateQuizRequest},
        submission::{Submission, SubmissionDetail, UserAnswer},
    },
    utils::html::clean_html,
};

// ---------------------------------------------------------------------------
// Quizzes
// ---------------------------------------------------------------------------

/// Creates a new quiz.
pub async fn create_quiz(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let now = chrono::Utc::now();
    let id = sqlx::query(
        "INSERT INTO quizzes (title, description, created_at, updated_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(&payload.title)
    .bind(clean_html(&payload.description))
    .bind(now)
    .bind(now)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create quiz: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?
    .last_insert_rowid();

    Ok((StatusCode::CREATED, Json(serde_json::json!({"id": id}))))
}

/// Updates a quiz's title and/or description.
pub async fn update_quiz(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<i64>,
    Json(payload): Json<UpdateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    fetch_quiz(&pool, quiz_id).await?;

    if let Some(title) = payload.title {
        sqlx::query("UPDATE quizzes SET title = ? WHERE id = ?")
            .bind(title)
            .bind(quiz_id)
            .execute(&pool)
            .await?;
    }

    if let Some(description) = payload.description {
        sqlx::query("UPDATE quizzes SET description = ? WHERE id = ?")
            .bind(clean_html(&description))
            .bind(quiz_id)
            .execute(&pool)
            .await?;
    }

    sqlx::query("UPDATE quizzes SET updated_at = ? WHERE id = ?")
        .bind(chrono::Utc::now())
        .bind(quiz_id)
        .execute(&pool)
        .await?;

    Ok(Json(serde_json::json!({"message": "Quiz updated"})))
}

/// Deletes a quiz. Questions, answers and submissions cascade.
pub async fn delete_quiz(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM quizzes WHERE id = ?")
        .bind(quiz_id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Quiz not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// Lists a quiz's questions with their answers, correctness flags
/// included, for staff review.
pub async fn list_questions(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    fetch_quiz(&pool, quiz_id).await?;
    let questions = load_questions(&pool, quiz_id).await?;

    let questions: Vec<AdminQuestion> = questions
        .into_iter()
        .map(|qa| AdminQuestion {
            question: qa.question,
            answers: qa.answers,
        })
        .collect();

    Ok(Json(questions))
}

/// Creates a new question under a quiz.
pub async fn create_question(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<i64>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    fetch_quiz(&pool, quiz_id).await?;

    let id = sqlx::query(
        "INSERT INTO questions (quiz_id, text, question_type, created_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(quiz_id)
    .bind(&payload.text)
    .bind(payload.question_type)
    .bind(chrono::Utc::now())
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create question: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?
    .last_insert_rowid();

    Ok((StatusCode::CREATED, Json(serde_json::json!({"id": id}))))
}

/// Updates a question's text and/or type.
pub async fn update_question(
    State(pool): State<SqlitePool>,
    Path(question_id): Path<i64>,
    Json(payload): Json<UpdateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM questions WHERE id = ?")
        .bind(question_id)
        .fetch_optional(&pool)
        .await?;
    if exists.is_none() {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    if let Some(text) = payload.text {
        sqlx::query("UPDATE questions SET text = ? WHERE id = ?")
            .bind(text)
            .bind(question_id)
            .execute(&pool)
            .await?;
    }

    if let Some(question_type) = payload.question_type {
        sqlx::query("UPDATE questions SET question_type = ? WHERE id = ?")
            .bind(question_type)
            .bind(question_id)
            .execute(&pool)
            .await?;
    }

    Ok(Json(serde_json::json!({"message": "Question updated"})))
}

/// Deletes a question. Its answers and outcome records cascade.
pub async fn delete_question(
    State(pool): State<SqlitePool>,
    Path(question_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM questions WHERE id = ?")
        .bind(question_id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Answers
// ---------------------------------------------------------------------------

/// Creates a new answer under a question.
pub async fn create_answer(
    State(pool): State<SqlitePool>,
    Path(question_id): Path<i64>,
    Json(payload): Json<CreateAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM questions WHERE id = ?")
        .bind(question_id)
        .fetch_optional(&pool)
        .await?;
    if exists.is_none() {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    let id = sqlx::query("INSERT INTO answers (question_id, text, is_correct) VALUES (?, ?, ?)")
        .bind(question_id)
        .bind(&payload.text)
        .bind(payload.is_correct)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create answer: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?
        .last_insert_rowid();

    Ok((StatusCode::CREATED, Json(serde_json::json!({"id": id}))))
}

/// Updates an answer's text and/or correctness flag.
pub async fn update_answer(
    State(pool): State<SqlitePool>,
    Path(answer_id): Path<i64>,
    Json(payload): Json<UpdateAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let answer = sqlx::query_as::<_, Answer>(
        "SELECT id, question_id, text, is_correct FROM answers WHERE id = ?",
    )
    .bind(answer_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Answer not found".to_string()))?;

    sqlx::query("UPDATE answers SET text = ?, is_correct = ? WHERE id = ?")
        .bind(payload.text.unwrap_or(answer.text))
        .bind(payload.is_correct.unwrap_or(answer.is_correct))
        .bind(answer_id)
        .execute(&pool)
        .await?;

    Ok(Json(serde_json::json!({"message": "Answer updated"})))
}

/// Deletes an answer.
pub async fn delete_answer(
    State(pool): State<SqlitePool>,
    Path(answer_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM answers WHERE id = ?")
        .bind(answer_id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Answer not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Creates a new event.
pub async fn create_event(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let id = sqlx::query(
        "INSERT INTO events (title, description, date, location) VALUES (?, ?, ?, ?)",
    )
    .bind(&payload.title)
    .bind(clean_html(&payload.description))
    .bind(payload.date)
    .bind(&payload.location)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create event: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?
    .last_insert_rowid();

    Ok((StatusCode::CREATED, Json(serde_json::json!({"id": id}))))
}

/// Updates an event. Fields are optional.
pub async fn update_event(
    State(pool): State<SqlitePool>,
    Path(event_id): Path<i64>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM events WHERE id = ?")
        .bind(event_id)
        .fetch_optional(&pool)
        .await?;
    if exists.is_none() {
        return Err(AppError::NotFound("Event not found".to_string()));
    }

    if let Some(title) = payload.title {
        sqlx::query("UPDATE events SET title = ? WHERE id = ?")
            .bind(title)
            .bind(event_id)
            .execute(&pool)
            .await?;
    }
    if let Some(description) = payload.description {
        sqlx::query("UPDATE events SET description = ? WHERE id = ?")
            .bind(clean_html(&description))
            .bind(event_id)
            .execute(&pool)
            .await?;
    }
    if let Some(date) = payload.date {
        sqlx::query("UPDATE events SET date = ? WHERE id = ?")
            .bind(date)
            .bind(event_id)
            .execute(&pool)
            .await?;
    }
    if let Some(location) = payload.location {
        sqlx::query("UPDATE events SET location = ? WHERE id = ?")
            .bind(location)
            .bind(event_id)
            .execute(&pool)
            .await?;
    }

    Ok(Json(serde_json::json!({"message": "Event updated"})))
}

/// Deletes an event.
pub async fn delete_event(
    State(pool): State<SqlitePool>,
    Path(event_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM events WHERE id = ?")
        .bind(event_id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Event not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Submissions (audit views)
// ---------------------------------------------------------------------------

/// Query parameters for listing submissions.
#[derive(Debug, Deserialize)]
pub struct SubmissionListParams {
    pub quiz_id: Option<i64>,
}

/// Lists submissions, newest first, optionally filtered by quiz.
pub async fn list_submissions(
    State(pool): State<SqlitePool>,
    Query(params): Query<SubmissionListParams>,
) -> Result<impl IntoResponse, AppError> {
    let submissions = sqlx::query_as::<_, Submission>(
        "SELECT id, quiz_id, user_name, score, submitted_at
         FROM submissions
         WHERE (? IS NULL OR quiz_id = ?)
         ORDER BY submitted_at DESC, id DESC",
    )
    .bind(params.quiz_id)
    .bind(params.quiz_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list submissions: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(submissions))
}

/// Retrieves one submission with its per-question outcome records.
pub async fn get_submission(
    State(pool): State<SqlitePool>,
    Path(submission_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let submission = sqlx::query_as::<_, Submission>(
        "SELECT id, quiz_id, user_name, score, submitted_at FROM submissions WHERE id = ?",
    )
    .bind(submission_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Submission not found".to_string()))?;

    let user_answers = sqlx::query_as::<_, UserAnswer>(
        "SELECT id, submission_id, question_id, answer_id, is_correct
         FROM user_answers WHERE submission_id = ? ORDER BY question_id",
    )
    .bind(submission_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(SubmissionDetail {
        submission,
        user_answers,
    }))
}
