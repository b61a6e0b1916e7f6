//! Resume generation: prompt in, generated text out, failures classified.
//!
//! Flow: build_prompt → CompletionService::complete → classify on failure.
//!
//! Every error's `Display` is the user-facing message and starts with `"Error:"`.
//! That prefix is what the form surface shows; code matches on the enum.

use thiserror::Error;
use tracing::{info, warn};

use crate::generation::prompt_builder::build_prompt;
use crate::llm_client::{CompletionService, LlmError};
use crate::models::candidate::CandidateRecord;

/// Why the generation service rejected or failed a call that was attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("Error: Invalid API key. Please verify your Gemini API key is correct.")]
    InvalidCredentials,

    #[error("Error: API quota exceeded. Please try again later or check your API limits.")]
    QuotaExceeded,

    #[error("Error: API access forbidden. Your API key may not have Gemini access enabled.")]
    AccessForbidden,

    #[error("Error: {0}")]
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// No credentials configured; no call was made.
    #[error("Error: Gemini API key not found. Please set GEMINI_API_KEY in the environment.")]
    Config,

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Error: No response generated")]
    EmptyResponse,
}

impl GenerationError {
    /// Stable machine-readable code for API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            GenerationError::Config => "GENERATION_NOT_CONFIGURED",
            GenerationError::Service(ServiceError::InvalidCredentials) => "INVALID_CREDENTIALS",
            GenerationError::Service(ServiceError::QuotaExceeded) => "QUOTA_EXCEEDED",
            GenerationError::Service(ServiceError::AccessForbidden) => "ACCESS_FORBIDDEN",
            GenerationError::Service(ServiceError::Unknown(_)) => "GENERATION_FAILED",
            GenerationError::EmptyResponse => "EMPTY_RESPONSE",
        }
    }
}

/// Classifies a service failure by substring matching on its error surface.
///
/// Checked in order: credentials, quota, forbidden. Anything else is `Unknown`
/// carrying `message`.
pub fn classify_service_failure(surface: &str, message: &str) -> ServiceError {
    if surface.contains("API_KEY_INVALID") || surface.contains("API key") {
        ServiceError::InvalidCredentials
    } else if surface.to_lowercase().contains("quota") || surface.contains("429") {
        ServiceError::QuotaExceeded
    } else if surface.contains("403") {
        ServiceError::AccessForbidden
    } else {
        ServiceError::Unknown(message.to_string())
    }
}

impl From<LlmError> for GenerationError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingApiKey => GenerationError::Config,
            LlmError::EmptyContent => GenerationError::EmptyResponse,
            other => GenerationError::Service(classify_service_failure(
                &other.error_surface(),
                &other.message(),
            )),
        }
    }
}

/// Generates resume text for `record` with one call to `service`.
///
/// Successful text is returned verbatim; it is not trimmed or validated.
pub async fn generate(
    service: &dyn CompletionService,
    record: &CandidateRecord,
) -> Result<String, GenerationError> {
    let prompt = build_prompt(record);

    match service.complete(&prompt).await {
        Ok(text) if text.trim().is_empty() => Err(GenerationError::EmptyResponse),
        Ok(text) => {
            info!(
                "Generated resume text ({} chars) for prompt of {} chars",
                text.len(),
                prompt.len()
            );
            Ok(text)
        }
        Err(err) => {
            let classified = GenerationError::from(err);
            warn!("Resume generation failed: {}", classified.code());
            Err(classified)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::models::candidate::BasicInfo;

    /// Replays a canned outcome and records every prompt it receives.
    pub(crate) struct FakeService {
        outcome: fn() -> Result<String, LlmError>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl FakeService {
        pub(crate) fn new(outcome: fn() -> Result<String, LlmError>) -> Self {
            Self {
                outcome,
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionService for FakeService {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            (self.outcome)()
        }
    }

    pub(crate) fn quota_error() -> Result<String, LlmError> {
        Err(LlmError::Api {
            status: 429,
            reasons: vec!["RESOURCE_EXHAUSTED".to_string()],
            message: "Resource has been exhausted (e.g. check quota).".to_string(),
        })
    }

    fn record() -> CandidateRecord {
        CandidateRecord {
            basic_info: BasicInfo {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: "1".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_generate_returns_text_verbatim() {
        let service = FakeService::new(|| Ok("  ADA LOVELACE\n- Wrote the first program  ".to_string()));
        let text = generate(&service, &record()).await.unwrap();
        assert_eq!(text, "  ADA LOVELACE\n- Wrote the first program  ");
        assert_eq!(service.calls(), 1);
        assert!(service.prompts.lock().unwrap()[0].contains("Name: Ada Lovelace"));
    }

    #[tokio::test]
    async fn test_generate_classifies_quota_failure() {
        let service = FakeService::new(quota_error);
        let err = generate(&service, &record()).await.unwrap_err();
        assert_eq!(err, GenerationError::Service(ServiceError::QuotaExceeded));
        assert!(err.to_string().starts_with("Error:"));
    }

    #[tokio::test]
    async fn test_generate_missing_key_is_config_error() {
        let service = FakeService::new(|| Err(LlmError::MissingApiKey));
        let err = generate(&service, &record()).await.unwrap_err();
        assert_eq!(err, GenerationError::Config);
        assert_eq!(err.code(), "GENERATION_NOT_CONFIGURED");
    }

    #[tokio::test]
    async fn test_generate_blank_text_is_empty_response() {
        let service = FakeService::new(|| Ok("\n  \n".to_string()));
        let err = generate(&service, &record()).await.unwrap_err();
        assert_eq!(err, GenerationError::EmptyResponse);
        assert_eq!(err.to_string(), "Error: No response generated");
    }

    #[test]
    fn test_classify_invalid_key_variants() {
        assert_eq!(
            classify_service_failure("400 INVALID_ARGUMENT API_KEY_INVALID: bad", "bad"),
            ServiceError::InvalidCredentials
        );
        assert_eq!(
            classify_service_failure("400: API key not valid", "API key not valid"),
            ServiceError::InvalidCredentials
        );
    }

    #[test]
    fn test_classify_quota_by_word_or_status() {
        assert_eq!(
            classify_service_failure("400: Quota exceeded for metric", "Quota exceeded"),
            ServiceError::QuotaExceeded
        );
        assert_eq!(
            classify_service_failure("429: slow down", "slow down"),
            ServiceError::QuotaExceeded
        );
    }

    #[test]
    fn test_classify_forbidden() {
        assert_eq!(
            classify_service_failure("403 PERMISSION_DENIED: denied", "denied"),
            ServiceError::AccessForbidden
        );
    }

    #[test]
    fn test_classify_credentials_take_precedence_over_status() {
        assert_eq!(
            classify_service_failure("403: API key expired", "API key expired"),
            ServiceError::InvalidCredentials
        );
    }

    #[test]
    fn test_classify_unknown_keeps_message() {
        let err = classify_service_failure("500 INTERNAL: backend exploded", "backend exploded");
        assert_eq!(err, ServiceError::Unknown("backend exploded".to_string()));
        assert_eq!(err.to_string(), "Error: backend exploded");
    }

    #[test]
    fn test_every_message_has_error_prefix() {
        let errors = [
            GenerationError::Config,
            GenerationError::EmptyResponse,
            ServiceError::InvalidCredentials.into(),
            ServiceError::QuotaExceeded.into(),
            ServiceError::AccessForbidden.into(),
            ServiceError::Unknown("x".to_string()).into(),
        ];
        for err in errors {
            assert!(err.to_string().starts_with("Error:"), "{err}");
        }
    }
}
