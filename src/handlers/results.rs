// src/handlers/results.rs

use std::collections::HashSet;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    config::Config,
    error::AppError,
    models::{exam::Exam, question::Question, result::ExamReview},
    review::{build_review, review_order},
    upstream::SharedBackend,
    utils::auth::Credentials,
};

/// Reconciles a completed attempt for the result screen.
///
/// The stored per-answer correctness is ignored; every answer is scored
/// again against the current question definitions.
#[utoipa::path(
    get,
    path = "/api/results/{id}/review",
    params(("id" = i64, Path, description = "Attempt id")),
    responses((status = 200, body = ExamReview), (status = 404))
)]
pub async fn review_attempt(
    State(backend): State<SharedBackend>,
    State(config): State<Config>,
    creds: Credentials,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let attempt = backend.get_attempt(&creds, id).await?;
    let exam = backend.get_exam(&creds, attempt.exam_id).await?;

    let wanted = review_order(&exam, &attempt);
    let questions = load_questions(&backend, &creds, &exam, &wanted).await?;

    let review = build_review(&exam, &attempt, &questions, &config.fallback_label);
    tracing::info!(
        "Reviewed attempt {} of exam {}: {}/{} ({}%)",
        attempt.id,
        exam.id,
        review.result.score,
        review.result.max_score,
        review.result.percentage
    );

    Ok(Json(review))
}

/// Loads the exam's subject pool, then fetches any question still missing
/// one by one. A subject the backend no longer knows yields an empty pool.
/// Questions the backend no longer has are left out and render with the
/// fallback label.
async fn load_questions(
    backend: &SharedBackend,
    creds: &Credentials,
    exam: &Exam,
    wanted: &[i64],
) -> Result<Vec<Question>, AppError> {
    let mut questions = match exam.subject_id {
        Some(subject_id) => match backend.questions_by_subject(creds, subject_id).await {
            Ok(pool) => pool,
            Err(AppError::NotFound(_)) => {
                tracing::warn!("Subject {} of exam {} no longer exists", subject_id, exam.id);
                Vec::new()
            }
            Err(e) => return Err(e),
        },
        None => Vec::new(),
    };

    let wanted_set: HashSet<i64> = wanted.iter().copied().collect();
    questions.retain(|q| wanted_set.contains(&q.id));

    let loaded: HashSet<i64> = questions.iter().map(|q| q.id).collect();
    let missing: Vec<i64> = wanted
        .iter()
        .copied()
        .filter(|id| !loaded.contains(id))
        .collect();

    for question_id in missing {
        match backend.get_question(creds, question_id).await {
            Ok(question) => questions.push(question),
            Err(AppError::NotFound(_)) => {
                tracing::warn!("Question {} of exam {} no longer exists", question_id, exam.id);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(questions)
}
