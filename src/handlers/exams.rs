// src/handlers/exams.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    assembly::{check_question_count, dedupe_question_ids, filter_by_subject, select_questions},
    error::AppError,
    models::{
        exam::{
            ExamResponse, ExamUpdatePayload, PoolParams, PoolResponse, RandomPickRequest,
            RandomPickResponse, SaveExamQuestionsRequest,
        },
        question::Question,
    },
    upstream::SharedBackend,
    utils::auth::Credentials,
};

/// Loads the subject pool. No subject means an empty pool: nothing can be
/// picked until the exam has one.
async fn load_pool(
    backend: &SharedBackend,
    creds: &Credentials,
    subject_id: Option<i64>,
) -> Result<Vec<Question>, AppError> {
    if subject_id.is_none() {
        return Ok(Vec::new());
    }

    let bank = backend.list_questions(creds).await?;
    Ok(filter_by_subject(&bank, subject_id))
}

/// Fetches an exam together with the advisory count check.
#[utoipa::path(
    get,
    path = "/api/exams/{id}",
    params(("id" = i64, Path, description = "Exam id")),
    responses((status = 200, body = ExamResponse), (status = 404))
)]
pub async fn get_exam(
    State(backend): State<SharedBackend>,
    creds: Credentials,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let exam = backend.get_exam(&creds, id).await?;
    let warning = check_question_count(exam.total_questions, exam.question_ids.len());

    Ok(Json(ExamResponse { exam, warning }))
}

/// Lists the questions available to the exam editor.
#[utoipa::path(
    get,
    path = "/api/exams/{id}/pool",
    params(("id" = i64, Path, description = "Exam id"), PoolParams),
    responses((status = 200, body = PoolResponse), (status = 404))
)]
pub async fn assembly_pool(
    State(backend): State<SharedBackend>,
    creds: Credentials,
    Path(id): Path<i64>,
    Query(params): Query<PoolParams>,
) -> Result<impl IntoResponse, AppError> {
    let exam = backend.get_exam(&creds, id).await?;
    let subject_id = params.subject_id.or(exam.subject_id);
    let questions = load_pool(&backend, &creds, subject_id).await?;

    Ok(Json(PoolResponse {
        exam_id: exam.id,
        subject_id,
        questions,
    }))
}

/// Draws a question set for the exam.
///
/// * Pool no larger than the requested count: the whole pool.
/// * Otherwise a fresh random subset on every call.
///
/// The selection is only returned; saving goes through `save_exam_questions`.
#[utoipa::path(
    post,
    path = "/api/exams/{id}/random-pick",
    params(("id" = i64, Path, description = "Exam id")),
    request_body = RandomPickRequest,
    responses((status = 200, body = RandomPickResponse), (status = 400), (status = 404))
)]
pub async fn random_pick(
    State(backend): State<SharedBackend>,
    creds: Credentials,
    Path(id): Path<i64>,
    Json(req): Json<RandomPickRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let exam = backend.get_exam(&creds, id).await?;
    let subject_id = req.subject_id.or(exam.subject_id);
    let requested = req.count.unwrap_or(exam.total_questions);

    let pool = load_pool(&backend, &creds, subject_id).await?;
    let questions = select_questions(&pool, requested as usize);

    tracing::debug!(
        "Random pick for exam {}: {} of {} (requested {})",
        exam.id,
        questions.len(),
        pool.len(),
        requested
    );

    Ok(Json(RandomPickResponse {
        exam_id: exam.id,
        subject_id,
        requested,
        pool_size: pool.len(),
        question_ids: questions.iter().map(|q| q.id).collect(),
        questions,
    }))
}

/// Saves the selected question set.
///
/// The ids are merged into the exam's full payload and sent upstream. A count
/// that disagrees with the declared total is logged and returned as a
/// warning; the save still goes through.
#[utoipa::path(
    put,
    path = "/api/exams/{id}/questions",
    params(("id" = i64, Path, description = "Exam id")),
    request_body = SaveExamQuestionsRequest,
    responses((status = 200, body = ExamResponse), (status = 400), (status = 404))
)]
pub async fn save_exam_questions(
    State(backend): State<SharedBackend>,
    creds: Credentials,
    Path(id): Path<i64>,
    Json(req): Json<SaveExamQuestionsRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let exam = backend.get_exam(&creds, id).await?;
    let question_ids = dedupe_question_ids(&req.question_ids);
    if question_ids.len() != req.question_ids.len() {
        tracing::debug!(
            "Dropped {} duplicate question ids for exam {}",
            req.question_ids.len() - question_ids.len(),
            id
        );
    }

    let warning = check_question_count(exam.total_questions, question_ids.len());
    if let Some(w) = &warning {
        tracing::warn!(
            "Exam {} saved with {} questions but declares {}",
            id,
            w.selected,
            w.declared_total
        );
    }

    let payload = ExamUpdatePayload::with_questions(&exam, question_ids);
    let saved = backend.update_exam(&creds, id, &payload).await?;
    tracing::info!("Saved {} questions for exam {}", saved.question_ids.len(), id);

    Ok(Json(ExamResponse {
        exam: saved,
        warning,
    }))
}
