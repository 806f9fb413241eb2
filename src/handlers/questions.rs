// src/handlers/questions.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::question::{Question, QuestionInput, QuestionListParams, QuestionPage},
    pagination::paginate,
    upstream::SharedBackend,
    utils::{auth::Credentials, html::plain_text},
};

/// Lists the question bank, optionally narrowed to a subject pool, a
/// difficulty and a keyword, one page at a time.
#[utoipa::path(
    get,
    path = "/api/questions",
    params(QuestionListParams),
    responses((status = 200, body = QuestionPage))
)]
pub async fn list_questions(
    State(backend): State<SharedBackend>,
    creds: Credentials,
    Query(params): Query<QuestionListParams>,
) -> Result<impl IntoResponse, AppError> {
    let questions = match params.subject_id {
        Some(subject_id) => backend.questions_by_subject(&creds, subject_id).await?,
        None => backend.list_questions(&creds).await?,
    };

    let filtered = filter_listing(questions, &params);
    let (items, meta) = paginate(&filtered, params.page, params.page_size);

    Ok(Json(QuestionPage {
        items: items.to_vec(),
        meta,
    }))
}

/// Applies the difficulty and keyword filters of the listing.
fn filter_listing(questions: Vec<Question>, params: &QuestionListParams) -> Vec<Question> {
    let keyword = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_lowercase);

    questions
        .into_iter()
        .filter(|q| params.difficulty.is_none_or(|d| q.difficulty == Some(d)))
        .filter(|q| {
            keyword
                .as_deref()
                .is_none_or(|k| plain_text(&q.text).to_lowercase().contains(k))
        })
        .collect()
}

/// Fetches one question.
#[utoipa::path(
    get,
    path = "/api/questions/{id}",
    params(("id" = i64, Path, description = "Question id")),
    responses((status = 200, body = Question), (status = 404))
)]
pub async fn get_question(
    State(backend): State<SharedBackend>,
    creds: Credentials,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(backend.get_question(&creds, id).await?))
}

/// Validates and forwards a new question.
#[utoipa::path(
    post,
    path = "/api/questions",
    request_body = QuestionInput,
    responses((status = 201, body = Question), (status = 400))
)]
pub async fn create_question(
    State(backend): State<SharedBackend>,
    creds: Credentials,
    Json(payload): Json<QuestionInput>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let question = backend.create_question(&creds, &payload).await?;
    tracing::info!("Created question {} in subject {}", question.id, payload.subject_id);

    Ok((StatusCode::CREATED, Json(question)))
}

/// Validates and forwards a question update.
#[utoipa::path(
    put,
    path = "/api/questions/{id}",
    params(("id" = i64, Path, description = "Question id")),
    request_body = QuestionInput,
    responses((status = 200, body = Question), (status = 400), (status = 404))
)]
pub async fn update_question(
    State(backend): State<SharedBackend>,
    creds: Credentials,
    Path(id): Path<i64>,
    Json(payload): Json<QuestionInput>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    Ok(Json(backend.update_question(&creds, id, &payload).await?))
}

/// Deletes a question.
#[utoipa::path(
    delete,
    path = "/api/questions/{id}",
    params(("id" = i64, Path, description = "Question id")),
    responses((status = 204), (status = 404))
)]
pub async fn delete_question(
    State(backend): State<SharedBackend>,
    creds: Credentials,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    backend.delete_question(&creds, id).await?;
    tracing::info!("Deleted question {}", id);

    Ok(StatusCode::NO_CONTENT)
}
