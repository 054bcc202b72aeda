//! Recognition backend client.
//!
//! The backend owns all recognition, matching, and storage logic; this
//! client only drives its three HTTP operations. Response bodies are
//! mapped leniently: any unlock payload that does not carry
//! `status == "ok"` is a denial, and any enroll payload that is neither
//! a confirmation nor a structured error is reported as unrecognized.

use crate::capture::{BackendConfig, CapturedImage};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when talking to the backend.
///
/// Every variant belongs to the transport-error category: business
/// outcomes (denied unlock, rejected enrollment) are not errors.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request transport or body decode failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend could not be reached.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// One-time credential scoping a single enroll submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollToken(String);

impl EnrollToken {
    /// Wraps a token string issued by the backend.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EnrollToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of an unlock attempt, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockOutcome {
    /// A known identity matched; carries the identity name.
    Granted {
        /// Name of the matched identity.
        user: String,
    },
    /// No identity matched, or the response shape was not recognized.
    Denied,
}

/// Result of an enroll submission, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollOutcome {
    /// The identity was created; carries the registered name.
    Enrolled {
        /// Name as registered by the backend.
        name: String,
    },
    /// The backend refused the enrollment with a message.
    Rejected {
        /// Backend-provided reason, shown to the user verbatim.
        message: String,
    },
    /// The response shape matched neither confirmation nor error.
    Unrecognized,
}

/// Client interface to the recognition backend.
///
/// Abstracting the HTTP surface behind a trait lets the flows run
/// against a scripted mock in tests.
#[async_trait]
pub trait RecognitionBackend: Send + Sync {
    /// Submits a captured photo for authentication.
    async fn unlock(&self, image: CapturedImage) -> Result<UnlockOutcome, BackendError>;

    /// Requests a fresh single-use enrollment token.
    async fn issue_enroll_token(&self) -> Result<EnrollToken, BackendError>;

    /// Submits a name and photo under a previously issued token.
    async fn enroll(
        &self,
        token: &EnrollToken,
        name: &str,
        image: CapturedImage,
    ) -> Result<EnrollOutcome, BackendError>;
}

/// Token issuance response body.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// HTTP implementation of [`RecognitionBackend`].
pub struct HttpBackend {
    base_url: String,
    http: reqwest::Client,
}

impl HttpBackend {
    /// Creates a client for the configured backend address.
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Returns the backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn image_part(
        image: CapturedImage,
        file_name: &'static str,
    ) -> reqwest::Result<reqwest::multipart::Part> {
        reqwest::multipart::Part::bytes(image.into_bytes())
            .file_name(file_name)
            .mime_str("image/jpeg")
    }
}

#[async_trait]
impl RecognitionBackend for HttpBackend {
    async fn unlock(&self, image: CapturedImage) -> Result<UnlockOutcome, BackendError> {
        let form = reqwest::multipart::Form::new()
            .part("image", Self::image_part(image, "capture.jpg")?);

        // HTTP error statuses still carry a JSON body worth mapping,
        // so the status code itself is not checked here.
        let body: Value = self
            .http
            .post(format!("{}/unlock", self.base_url))
            .multipart(form)
            .send()
            .await?
            .json()
            .await?;

        let outcome = unlock_outcome(&body);
        tracing::debug!(outcome = ?outcome, "Unlock response mapped");
        Ok(outcome)
    }

    async fn issue_enroll_token(&self) -> Result<EnrollToken, BackendError> {
        let response: TokenResponse = self
            .http
            .post(format!("{}/generate_enroll_link", self.base_url))
            .send()
            .await?
            .json()
            .await?;

        tracing::debug!("Enrollment token issued");
        Ok(EnrollToken::new(response.token))
    }

    async fn enroll(
        &self,
        token: &EnrollToken,
        name: &str,
        image: CapturedImage,
    ) -> Result<EnrollOutcome, BackendError> {
        let form = reqwest::multipart::Form::new()
            .text("name", name.to_string())
            .part("image", Self::image_part(image, "enroll.jpg")?);

        let body: Value = self
            .http
            .post(format!("{}/enroll/{}", self.base_url, token.as_str()))
            .multipart(form)
            .send()
            .await?
            .json()
            .await?;

        let outcome = enroll_outcome(&body);
        tracing::debug!(outcome = ?outcome, "Enroll response mapped");
        Ok(outcome)
    }
}

/// Maps an unlock response body to an outcome.
fn unlock_outcome(body: &Value) -> UnlockOutcome {
    let status = body.get("status").and_then(Value::as_str);
    let user = body.get("user").and_then(Value::as_str);
    match (status, user) {
        (Some("ok"), Some(user)) => UnlockOutcome::Granted {
            user: user.to_string(),
        },
        _ => UnlockOutcome::Denied,
    }
}

/// Maps an enroll response body to an outcome.
fn enroll_outcome(body: &Value) -> EnrollOutcome {
    if body.get("status").and_then(Value::as_str) == Some("enrolled") {
        if let Some(name) = body.get("name").and_then(Value::as_str) {
            return EnrollOutcome::Enrolled {
                name: name.to_string(),
            };
        }
    }
    if let Some(message) = body.get("error").and_then(Value::as_str) {
        return EnrollOutcome::Rejected {
            message: message.to_string(),
        };
    }
    EnrollOutcome::Unrecognized
}
