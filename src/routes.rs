// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    docs,
    handlers::{exams, questions, results, session},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (questions, exams, results, session).
/// * Applies global middleware (Trace, CORS).
/// * Injects the application state (config + upstream backend).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let question_routes = Router::new()
        .route("/", get(questions::list_questions).post(questions::create_question))
        .route(
            "/{id}",
            get(questions::get_question)
                .put(questions::update_question)
                .delete(questions::delete_question),
        );

    let exam_routes = Router::new()
        .route("/{id}", get(exams::get_exam))
        .route("/{id}/pool", get(exams::assembly_pool))
        .route("/{id}/random-pick", post(exams::random_pick))
        .route("/{id}/questions", put(exams::save_exam_questions));

    let result_routes = Router::new().route("/{id}/review", get(results::review_attempt));

    let session_routes = Router::new().route("/capabilities", get(session::capabilities));

    Router::new()
        .route("/api/health", get(session::health))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .nest("/api/questions", question_routes)
        .nest("/api/exams", exam_routes)
        .nest("/api/results", result_routes)
        .nest("/api/session", session_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
