// src/docs.rs

use axum::{Json, response::IntoResponse};
use utoipa::OpenApi;

use crate::{
    assembly::{CountMismatch, CountWarning},
    handlers::{exams, questions, results, session},
    models::{
        account::CapabilitiesResponse,
        exam::{
            Exam, ExamResponse, ExamType, PoolResponse, RandomPickRequest, RandomPickResponse,
            SaveExamQuestionsRequest,
        },
        question::{Answer, AnswerInput, Difficulty, Question, QuestionInput, QuestionPage},
        result::{ExamResult, ExamReview, Outcome, ReviewItem, ReviewOption},
    },
    pagination::{PageItem, PageMeta},
    permissions::Capabilities,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "MegaStar Online exam gateway"),
    paths(
        session::health,
        session::capabilities,
        questions::list_questions,
        questions::get_question,
        questions::create_question,
        questions::update_question,
        questions::delete_question,
        exams::get_exam,
        exams::assembly_pool,
        exams::random_pick,
        exams::save_exam_questions,
        results::review_attempt,
    ),
    components(schemas(
        Answer,
        AnswerInput,
        Capabilities,
        CapabilitiesResponse,
        CountMismatch,
        CountWarning,
        Difficulty,
        Exam,
        ExamResponse,
        ExamResult,
        ExamReview,
        ExamType,
        Outcome,
        PageItem,
        PageMeta,
        PoolResponse,
        Question,
        QuestionInput,
        QuestionPage,
        RandomPickRequest,
        RandomPickResponse,
        ReviewItem,
        ReviewOption,
        SaveExamQuestionsRequest,
    ))
)]
pub struct ApiDoc;

/// Serves the OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
