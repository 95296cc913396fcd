// src/handlers/quiz.rs

use std::collections::HashMap;

use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    grading,
    models::{
        answer::Answer,
        question::{PublicQuestion, Question, QuestionWithAnswers},
        quiz::{Quiz, QuizDetail},
        submission::{ResultResponse, Submission, SubmitResponse},
    },
};

/// Fetches a quiz by id, or 404.
pub(crate) async fn fetch_quiz(pool: &SqlitePool, quiz_id: i64) -> Result<Quiz, AppError> {
    sqlx::query_as::<_, Quiz>(
        "SELECT id, title, description, created_at, updated_at FROM quizzes WHERE id = ?",
    )
    .bind(quiz_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound("Quiz not found".to_string()))
}

/// Loads a quiz's questions together with their answers.
///
/// Answers are fetched in one query and grouped in memory to avoid N+1
/// queries in the grading loop.
pub(crate) async fn load_questions(
    pool: &SqlitePool,
    quiz_id: i64,
) -> Result<Vec<QuestionWithAnswers>, AppError> {
    let questions = sqlx::query_as::<_, Question>(
        "SELECT id, quiz_id, text, question_type, created_at
         FROM questions WHERE quiz_id = ? ORDER BY id",
    )
    .bind(quiz_id)
    .fetch_all(pool)
    .await?;

    let answers = sqlx::query_as::<_, Answer>(
        "SELECT a.id, a.question_id, a.text, a.is_correct
         FROM answers a
         JOIN questions q ON a.question_id = q.id
         WHERE q.quiz_id = ?
         ORDER BY a.id",
    )
    .bind(quiz_id)
    .fetch_all(pool)
    .await?;

    let mut by_question: HashMap<i64, Vec<Answer>> = HashMap::new();
    for answer in answers {
        by_question.entry(answer.question_id).or_default().push(answer);
    }

    Ok(questions
        .into_iter()
        .map(|question| {
            let answers = by_question.remove(&question.id).unwrap_or_default();
            QuestionWithAnswers { question, answers }
        })
        .collect())
}

/// Lists all quizzes, newest first.
pub async fn list_quizzes(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let quizzes = sqlx::query_as::<_, Quiz>(
        "SELECT id, title, description, created_at, updated_at
         FROM quizzes ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list quizzes: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(quizzes))
}

/// Retrieves a quiz with its questions and answer options for the
/// attempt page. Correctness flags are hidden by the DTO.
pub async fn get_quiz(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = fetch_quiz(&pool, quiz_id).await?;
    let questions = load_questions(&pool, quiz_id).await?;

    Ok(Json(QuizDetail {
        quiz,
        questions: questions.iter().map(PublicQuestion::from).collect(),
    }))
}

/// Grades a quiz attempt and persists the submission.
///
/// Expects urlencoded form fields named `question_<id>` for each question
/// (the selected answer id for mcq, the typed text for text questions)
/// plus an optional `user_name`. The submission row and its per-question
/// outcome rows are written in one transaction; missing or garbled values
/// grade as incorrect, never as an error.
pub async fn submit_quiz(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<i64>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = fetch_quiz(&pool, quiz_id).await?;
    let questions = load_questions(&pool, quiz_id).await?;

    let user_name = fields.get("user_name").cloned().unwrap_or_default();
    let submitted = grading::collect_submitted(&fields);

    let (score, outcomes) = grading::grade(&questions, &submitted);

    let mut tx = pool.begin().await?;

    // Create the submission first so outcome rows can reference it; the
    // final score is filled in below once all outcomes are stored.
    let submission_id = sqlx::query(
        "INSERT INTO submissions (quiz_id, user_name, score, submitted_at)
         VALUES (?, ?, 0, ?)",
    )
    .bind(quiz.id)
    .bind(&user_name)
    .bind(chrono::Utc::now())
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    for outcome in &outcomes {
        sqlx::query(
            "INSERT INTO user_answers (submission_id, question_id, answer_id, is_correct)
             VALUES (?, ?, ?, ?)",
        )
        .bind(submission_id)
        .bind(outcome.question_id)
        .bind(outcome.answer_id)
        .bind(outcome.is_correct)
        .execute(&mut *tx)
        .await?;
    }

    sqlx::query("UPDATE submissions SET score = ? WHERE id = ?")
        .bind(score)
        .bind(submission_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(
        quiz_id = quiz.id,
        submission_id,
        score,
        "Graded quiz submission"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            submission_id,
            score,
            total: outcomes.len() as i64,
        }),
    ))
}

/// Shows the most recent submission result for a quiz.
///
/// Returns empty-name/zero-score defaults when the quiz has never been
/// attempted.
pub async fn latest_result(
    State(pool): State<SqlitePool>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = fetch_quiz(&pool, quiz_id).await?;

    let submission = sqlx::query_as::<_, Submission>(
        "SELECT id, quiz_id, user_name, score, submitted_at
         FROM submissions WHERE quiz_id = ?
         ORDER BY submitted_at DESC, id DESC LIMIT 1",
    )
    .bind(quiz.id)
    .fetch_optional(&pool)
    .await?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions WHERE quiz_id = ?")
        .bind(quiz.id)
        .fetch_one(&pool)
        .await?;

    let (user_name, score) = submission
        .map(|s| (s.user_name, s.score))
        .unwrap_or_default();

    Ok(Json(ResultResponse {
        quiz_id: quiz.id,
        quiz_title: quiz.title,
        user_name,
        score,
        total,
    }))
}
