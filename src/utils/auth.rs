// src/utils/auth.rs

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderValue, header, request::Parts},
};

/// The caller's `Authorization` header, forwarded untouched to the upstream
/// backend. The gateway never inspects or validates it; the backend decides.
#[derive(Debug, Clone, Default)]
pub struct Credentials(Option<HeaderValue>);

impl Credentials {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn bearer(token: &str) -> Option<Self> {
        HeaderValue::from_str(&format!("Bearer {}", token))
            .ok()
            .map(|value| Self(Some(value)))
    }

    pub fn header(&self) -> Option<&HeaderValue> {
        self.0.as_ref()
    }
}

impl<S> FromRequestParts<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.headers.get(header::AUTHORIZATION).cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn extracts_authorization_header_verbatim() {
        let (mut parts, _) = Request::builder()
            .header(header::AUTHORIZATION, "Bearer abc.def")
            .body(())
            .unwrap()
            .into_parts();

        let creds = Credentials::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(creds.header().unwrap(), "Bearer abc.def");
    }

    #[tokio::test]
    async fn missing_header_is_anonymous() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        let creds = Credentials::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(creds.header().is_none());
    }
}
