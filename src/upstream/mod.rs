// src/upstream/mod.rs

//! Access to the upstream REST backend that owns all exam data.

mod http;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        account::Account,
        exam::{Exam, ExamUpdatePayload},
        question::{Question, QuestionInput},
        result::ExamAttempt,
    },
    utils::auth::Credentials,
};

pub use self::http::HttpBackend;

/// Shared handle stored in the application state.
pub type SharedBackend = Arc<dyn ExamBackend>;

/// One method per upstream endpoint the gateway consumes.
#[async_trait]
pub trait ExamBackend: Send + Sync {
    /// Whole question bank (`GET questions`).
    async fn list_questions(&self, creds: &Credentials) -> Result<Vec<Question>, AppError>;

    /// One subject's pool (`GET questions/by-subject/{id}`).
    async fn questions_by_subject(
        &self,
        creds: &Credentials,
        subject_id: i64,
    ) -> Result<Vec<Question>, AppError>;

    async fn get_question(&self, creds: &Credentials, id: i64) -> Result<Question, AppError>;

    async fn create_question(
        &self,
        creds: &Credentials,
        input: &QuestionInput,
    ) -> Result<Question, AppError>;

    async fn update_question(
        &self,
        creds: &Credentials,
        id: i64,
        input: &QuestionInput,
    ) -> Result<Question, AppError>;

    async fn delete_question(&self, creds: &Credentials, id: i64) -> Result<(), AppError>;

    async fn get_exam(&self, creds: &Credentials, id: i64) -> Result<Exam, AppError>;

    async fn update_exam(
        &self,
        creds: &Credentials,
        id: i64,
        payload: &ExamUpdatePayload,
    ) -> Result<Exam, AppError>;

    async fn get_attempt(&self, creds: &Credentials, id: i64) -> Result<ExamAttempt, AppError>;

    async fn current_account(&self, creds: &Credentials) -> Result<Account, AppError>;
}
