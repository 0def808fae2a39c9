//! HttpAssistantBackend -- concrete [`AssistantBackend`] over the assistant REST API.
//!
//! History is read with `GET {base_url}{history_path}/{subject}` and
//! questions are posted as JSON to `{base_url}{ask_path}`. Every request is
//! bounded by the configured timeout.
//!
//! The optional bearer token is wrapped in [`secrecy::SecretString`] and is
//! never logged or included in `Debug` output.

pub mod wire;

use std::time::Duration;

use adchat_core::backend::AssistantBackend;
use adchat_types::ask::AskReply;
use adchat_types::config::AssistantConfig;
use adchat_types::error::BackendError;
use adchat_types::subject::SubjectId;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use wire::{AskRequestBody, AskResponseBody};

/// Assistant backend reached over HTTP.
pub struct HttpAssistantBackend {
    client: reqwest::Client,
    base_url: String,
    history_path: String,
    ask_path: String,
    token: Option<SecretString>,
}

impl HttpAssistantBackend {
    /// Build a backend from configuration.
    pub fn new(config: &AssistantConfig, token: Option<SecretString>) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .build()
            .map_err(|e| BackendError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            history_path: config.history_path.clone(),
            ask_path: config.ask_path.clone(),
            token,
        })
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn history_url(&self, subject: &SubjectId) -> String {
        format!(
            "{}/{}",
            self.url(self.history_path.trim_end_matches('/')),
            subject
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }
}

fn transport_error(e: reqwest::Error) -> BackendError {
    if e.is_timeout() {
        BackendError::Timeout
    } else {
        BackendError::Transport(e.to_string())
    }
}

// No Debug derive: keeps the token out of any formatted output.

impl AssistantBackend for HttpAssistantBackend {
    async fn fetch_history(&self, subject: &SubjectId) -> Result<serde_json::Value, BackendError> {
        let url = self.history_url(subject);
        debug!(subject_id = %subject, %url, "Fetching history");

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| BackendError::Decode(format!("failed to parse history: {e}")))
    }

    async fn ask(&self, subject: &SubjectId, question: &str) -> Result<AskReply, BackendError> {
        let url = self.url(&self.ask_path);
        let body = AskRequestBody {
            subject_id: subject,
            question,
        };
        debug!(subject_id = %subject, bootstrap = question.is_empty(), "Posting question");

        let response = self
            .authorize(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            // Quota refusals arrive as error statuses with a domain error body.
            return match serde_json::from_str::<AskResponseBody>(&text) {
                Ok(parsed) if parsed.error.as_deref().is_some_and(|e| !e.trim().is_empty()) => {
                    Ok(parsed.into())
                }
                _ => Err(BackendError::Status {
                    status: status.as_u16(),
                    body: text,
                }),
            };
        }

        serde_json::from_str::<AskResponseBody>(&text)
            .map(AskReply::from)
            .map_err(|e| BackendError::Decode(format!("failed to parse ask response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn backend(base_url: &str) -> HttpAssistantBackend {
        HttpAssistantBackend::new(&AssistantConfig::default(), None)
            .unwrap()
            .with_base_url(base_url)
    }

    #[test]
    fn test_url_building() {
        let b = backend("http://localhost:9000/");
        assert_eq!(
            b.history_url(&SubjectId::new("ad-5")),
            "http://localhost:9000/api/assistant/history/ad-5"
        );
        assert_eq!(b.url(&b.ask_path), "http://localhost:9000/api/assistant/ask");
    }

    #[tokio::test]
    async fn test_fetch_history_returns_raw_payload() {
        let router = Router::new().route(
            "/api/assistant/history/{id}",
            get(|Path(id): Path<String>| async move {
                if id == "ad-1" {
                    Json(json!([{"entryId": 1, "question": "", "answer": "Hi"}]))
                } else {
                    Json(json!(0))
                }
            }),
        );
        let base = serve(router).await;
        let b = backend(&base);

        let payload = b.fetch_history(&SubjectId::new("ad-1")).await.unwrap();
        assert!(payload.is_array());
        let empty = b.fetch_history(&SubjectId::new("ad-2")).await.unwrap();
        assert_eq!(empty, json!(0));
    }

    #[tokio::test]
    async fn test_fetch_history_error_status() {
        let router = Router::new().route(
            "/api/assistant/history/{id}",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = serve(router).await;

        let err = backend(&base)
            .fetch_history(&SubjectId::new("ad-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_ask_posts_subject_and_question() {
        let router = Router::new().route(
            "/api/assistant/ask",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "answer": format!("You asked: {}", body["question"].as_str().unwrap_or("")),
                    "suggested_questions": [body["subjectId"]],
                    "ask_count": 1,
                    "askLimit": 10
                }))
            }),
        );
        let base = serve(router).await;

        let reply = backend(&base)
            .ask(&SubjectId::new("ad-9"), "Is it good?")
            .await
            .unwrap();
        assert_eq!(reply.answer.as_deref(), Some("You asked: Is it good?"));
        assert_eq!(reply.suggestions, Some(vec!["ad-9".to_string()]));
        assert_eq!(reply.ask_count, Some(1));
        assert_eq!(reply.ask_limit, Some(10));
    }

    #[tokio::test]
    async fn test_ask_error_status_with_domain_error_body() {
        let router = Router::new().route(
            "/api/assistant/ask",
            post(|| async {
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({"error": "Question limit reached", "limitReached": true})),
                )
            }),
        );
        let base = serve(router).await;

        let reply = backend(&base)
            .ask(&SubjectId::new("ad-1"), "again?")
            .await
            .unwrap();
        assert_eq!(reply.error.as_deref(), Some("Question limit reached"));
        assert_eq!(reply.limit_reached, Some(true));
    }

    #[tokio::test]
    async fn test_ask_error_status_without_body_is_transport_level() {
        let router = Router::new().route(
            "/api/assistant/ask",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let base = serve(router).await;

        let err = backend(&base)
            .ask(&SubjectId::new("ad-1"), "q")
            .await
            .unwrap_err();
        match err {
            BackendError::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "upstream down");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_bearer_token_is_sent() {
        let router = Router::new().route(
            "/api/assistant/ask",
            post(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                Json(json!({"answer": auth}))
            }),
        );
        let base = serve(router).await;
        let b = HttpAssistantBackend::new(
            &AssistantConfig::default(),
            Some(SecretString::from("tok-123")),
        )
        .unwrap()
        .with_base_url(base);

        let reply = b.ask(&SubjectId::new("ad-1"), "q").await.unwrap();
        assert_eq!(reply.answer.as_deref(), Some("Bearer tok-123"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = backend(&format!("http://{addr}"))
            .ask(&SubjectId::new("ad-1"), "q")
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Transport(_)));
    }
}
