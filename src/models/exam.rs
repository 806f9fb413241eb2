// src/models/exam.rs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{assembly::CountWarning, models::question::Question};

/// Whether an exam is a practice run or an official sitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExamType {
    Practice,
    Official,
}

/// An exam definition, as stored by the upstream backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Exam {
    pub id: i64,
    pub name: String,
    pub duration_minutes: u32,
    pub exam_type: ExamType,

    /// Declared number of questions the exam should carry.
    pub total_questions: u32,

    #[serde(default)]
    pub subject_id: Option<i64>,

    /// Ordered ids of the questions attached to the exam.
    #[serde(default)]
    pub question_ids: Vec<i64>,
}

/// Full payload sent upstream when saving an exam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamUpdatePayload {
    pub name: String,
    pub duration_minutes: u32,
    pub exam_type: ExamType,
    pub total_questions: u32,
    pub subject_id: Option<i64>,
    pub question_ids: Vec<i64>,
}

impl ExamUpdatePayload {
    /// Copies every field of `exam`, replacing its question set.
    pub fn with_questions(exam: &Exam, question_ids: Vec<i64>) -> Self {
        Self {
            name: exam.name.clone(),
            duration_minutes: exam.duration_minutes,
            exam_type: exam.exam_type,
            total_questions: exam.total_questions,
            subject_id: exam.subject_id,
            question_ids,
        }
    }
}

/// Exam plus the advisory count check.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExamResponse {
    pub exam: Exam,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<CountWarning>,
}

/// Query parameters for the assembly pool.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PoolParams {
    /// Subject to filter by. Defaults to the exam's own subject.
    pub subject_id: Option<i64>,
}

/// Questions available for assembling an exam.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PoolResponse {
    pub exam_id: i64,
    pub subject_id: Option<i64>,
    pub questions: Vec<Question>,
}

/// DTO for the "random pick" button.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct RandomPickRequest {
    /// Subject to draw from. Defaults to the exam's own subject.
    pub subject_id: Option<i64>,
    /// Number of questions to draw. Defaults to the exam's declared total.
    #[validate(range(max = 1000))]
    pub count: Option<u32>,
}

/// Outcome of a random pick. Nothing is saved until the client submits it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RandomPickResponse {
    pub exam_id: i64,
    pub subject_id: Option<i64>,
    pub requested: u32,
    pub pool_size: usize,
    pub question_ids: Vec<i64>,
    pub questions: Vec<Question>,
}

/// DTO for saving the selected question set of an exam.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SaveExamQuestionsRequest {
    #[validate(length(max = 1000))]
    pub question_ids: Vec<i64>,
}
