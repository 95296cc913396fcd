// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, event, quiz},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (quizzes, events, admin).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool + Config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000"
            .parse::<axum::http::HeaderValue>()
            .unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let quiz_routes = Router::new()
        .route("/", get(quiz::list_quizzes))
        .route("/{id}", get(quiz::get_quiz).post(quiz::submit_quiz))
        .route("/{id}/result", get(quiz::latest_result));

    let event_routes = Router::new().route("/", get(event::list_events));

    // Content authoring and audit views. The site has no account system,
    // so these are plain endpoints meant to sit behind a trusted proxy.
    let admin_routes = Router::new()
        .route("/quizzes", post(admin::create_quiz))
        .route(
            "/quizzes/{id}",
            put(admin::update_quiz).delete(admin::delete_quiz),
        )
        .route(
            "/quizzes/{id}/questions",
            get(admin::list_questions).post(admin::create_question),
        )
        .route(
            "/questions/{id}",
            put(admin::update_question).delete(admin::delete_question),
        )
        .route("/questions/{id}/answers", post(admin::create_answer))
        .route(
            "/answers/{id}",
            put(admin::update_answer).delete(admin::delete_answer),
        )
        .route("/events", post(admin::create_event))
        .route(
            "/events/{id}",
            put(admin::update_event).delete(admin::delete_event),
        )
        .route("/submissions", get(admin::list_submissions))
        .route("/submissions/{id}", get(admin::get_submission));

    Router::new()
        .nest("/api/quizzes", quiz_routes)
        .nest("/api/events", event_routes)
        .nest("/api/admin", admin_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
