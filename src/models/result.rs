// src/models/result.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A student's recorded choice for one question within one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentAnswer {
    pub question_id: i64,

    /// `None` when the student left the question unanswered.
    #[serde(default)]
    pub selected_answer_id: Option<i64>,

    /// Correctness as stored upstream. Reviews recompute it and ignore this.
    #[serde(default)]
    pub is_correct: Option<bool>,

    #[serde(default)]
    pub marked_for_review: bool,
}

/// A completed attempt, as stored by the upstream backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExamAttempt {
    pub id: i64,
    pub exam_id: i64,
    pub student_id: i64,
    #[serde(default)]
    pub answers: Vec<StudentAnswer>,
    pub started_at: Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Per-question scoring outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
    Unanswered,
}

/// Reconciled outcome of one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QuestionOutcome {
    pub question_id: i64,
    pub outcome: Outcome,
    pub is_correct: bool,
}

/// Aggregate score of an attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExamResult {
    pub score: u32,
    pub max_score: u32,
    /// Rounded to one decimal place.
    pub percentage: f64,
    pub correct: u32,
    pub incorrect: u32,
    pub unanswered: u32,
    pub total_questions: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub time_taken_seconds: Option<i64>,
}

/// An answer option as shown on the review screen.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewOption {
    pub id: i64,
    pub text: String,
    pub is_correct: bool,
    pub selected: bool,
}

/// One row of the review screen.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewItem {
    /// 1-based position within the exam.
    pub position: usize,
    pub question_id: i64,
    pub question_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    pub options: Vec<ReviewOption>,
    pub selected_answer_id: Option<i64>,
    pub selected_answer_text: Option<String>,
    pub correct_answer_text: String,
    pub outcome: Outcome,
    pub is_correct: bool,
    pub marked_for_review: bool,
}

/// Everything the result screen renders for one attempt.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExamReview {
    pub attempt_id: i64,
    pub exam_id: i64,
    pub exam_name: String,
    pub student_id: i64,
    pub result: ExamResult,
    pub items: Vec<ReviewItem>,
}
