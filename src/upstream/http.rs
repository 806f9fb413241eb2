// src/upstream/http.rs

use std::time::Duration;

use async_trait::async_trait;
use axum::http::{StatusCode, header};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use super::ExamBackend;
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

/// `ExamBackend` over HTTP using `reqwest`.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// `base_url` must end with `/` (see `config::normalize_base_url`).
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    fn request(&self, method: Method, path: &str, creds: &Credentials) -> Result<RequestBuilder, AppError> {
        let url = self.base_url.join(path)?;
        let mut builder = self.client.request(method, url);
        if let Some(value) = creds.header() {
            builder = builder.header(header::AUTHORIZATION, value.clone());
        }
        Ok(builder)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, creds: &Credentials) -> Result<T, AppError> {
        let response = self.request(Method::GET, path, creds)?.send().await?;
        decode(path, response).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, creds: &Credentials, body: &B) -> Result<T, AppError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self.request(method, path, creds)?.json(body).send().await?;
        decode(path, response).await
    }
}

/// Checks the status, then decodes the JSON body.
async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, AppError> {
    let response = ensure_success(path, response).await?;
    response.json::<T>().await.map_err(|e| {
        tracing::error!("Undecodable upstream body for {}: {:?}", path, e);
        AppError::BadGateway(e.to_string())
    })
}

async fn ensure_success(path: &str, response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let status = StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    if status.is_server_error() {
        tracing::error!("Upstream {} failed with {}: {}", path, status, body);
    } else {
        tracing::debug!("Upstream {} answered {}", path, status);
    }
    Err(AppError::from_upstream(status, upstream_message(&body)))
}

/// Pulls `error` or `message` out of a JSON error body, else the raw text.
fn upstream_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("message"))
                .and_then(|m| m.as_str())
                .map(ToOwned::to_owned)
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl ExamBackend for HttpBackend {
    async fn list_questions(&self, creds: &Credentials) -> Result<Vec<Question>, AppError> {
        self.get_json("questions", creds).await
    }

    async fn questions_by_subject(
        &self,
        creds: &Credentials,
        subject_id: i64,
    ) -> Result<Vec<Question>, AppError> {
        self.get_json(&format!("questions/by-subject/{}", subject_id), creds)
            .await
    }

    async fn get_question(&self, creds: &Credentials, id: i64) -> Result<Question, AppError> {
        self.get_json(&format!("questions/{}", id), creds).await
    }

    async fn create_question(
        &self,
        creds: &Credentials,
        input: &QuestionInput,
    ) -> Result<Question, AppError> {
        self.send_json(Method::POST, "questions", creds, input).await
    }

    async fn update_question(
        &self,
        creds: &Credentials,
        id: i64,
        input: &QuestionInput,
    ) -> Result<Question, AppError> {
        self.send_json(Method::PUT, &format!("questions/{}", id), creds, input)
            .await
    }

    async fn delete_question(&self, creds: &Credentials, id: i64) -> Result<(), AppError> {
        let path = format!("questions/{}", id);
        let response = self.request(Method::DELETE, &path, creds)?.send().await?;
        ensure_success(&path, response).await?;
        Ok(())
    }

    async fn get_exam(&self, creds: &Credentials, id: i64) -> Result<Exam, AppError> {
        self.get_json(&format!("exams/{}", id), creds).await
    }

    async fn update_exam(
        &self,
        creds: &Credentials,
        id: i64,
        payload: &ExamUpdatePayload,
    ) -> Result<Exam, AppError> {
        self.send_json(Method::PUT, &format!("exams/{}", id), creds, payload)
            .await
    }

    async fn get_attempt(&self, creds: &Credentials, id: i64) -> Result<ExamAttempt, AppError> {
        self.get_json(&format!("results/{}", id), creds).await
    }

    async fn current_account(&self, creds: &Credentials) -> Result<Account, AppError> {
        self.get_json("auth/me", creds).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_error_field_from_json_body() {
        assert_eq!(upstream_message(r#"{"error":"Exam not found"}"#), "Exam not found");
        assert_eq!(upstream_message(r#"{"message":"Token expired"}"#), "Token expired");
        assert_eq!(upstream_message("plain failure"), "plain failure");
    }
}
