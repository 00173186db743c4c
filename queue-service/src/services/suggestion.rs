//! AI drafting suggestions: fixed prompt templates relayed to a text provider.

use crate::services::metrics::{SUGGESTIONS_TOTAL, SUGGESTION_DURATION};
use crate::services::providers::{ProviderError, TextProvider};
use service_core::error::AppError;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::instrument;

/// Used in the email template when the request carries no customer name.
pub const DEFAULT_CUSTOMER_NAME: &str = "Valued Customer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    /// Triage notes for a patient's presenting issue.
    Triage,
    /// Party themes for a restaurant reservation.
    Themes,
    /// Follow-up email to a bank customer.
    Email,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionKind::Triage => "triage",
            SuggestionKind::Themes => "themes",
            SuggestionKind::Email => "email",
        }
    }

    /// Fill this kind's template. `text` and `context` are inserted verbatim.
    pub fn build_prompt(&self, text: &str, context: Option<&str>) -> String {
        match self {
            SuggestionKind::Triage => format!(
                "Generate brief triage notes for a patient presenting with the following issue: \"{}\". Focus on key questions to ask and potential immediate assessments. Format as a short, professional list.",
                text
            ),
            SuggestionKind::Themes => format!(
                "Suggest 3 creative and fun restaurant themes for a party of {}. Provide a short, catchy name and a one-sentence description for each theme.",
                text
            ),
            SuggestionKind::Email => {
                let name = context
                    .filter(|c| !c.is_empty())
                    .unwrap_or(DEFAULT_CUSTOMER_NAME);
                format!(
                    "Draft a brief, professional, and friendly follow-up email to a bank customer named {} regarding their request for the following service: \"{}\". Sign off as \"Your Bank Team\".",
                    name, text
                )
            }
        }
    }
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuggestionKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "triage" => Ok(SuggestionKind::Triage),
            "themes" => Ok(SuggestionKind::Themes),
            "email" => Ok(SuggestionKind::Email),
            _ => Err(AppError::BadRequest(anyhow::anyhow!("Invalid suggestion type"))),
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::EmptyResponse => AppError::UpstreamError(err.to_string()),
            ProviderError::InvalidResponse(_) => AppError::UpstreamError(
                "An unexpected error occurred while generating suggestion.".to_string(),
            ),
            ProviderError::NotConfigured(msg) => AppError::ConfigError(anyhow::anyhow!(msg)),
            ProviderError::ApiError(_) | ProviderError::NetworkError(_) => {
                AppError::UpstreamError(format!("Could not connect to AI service: {}", err))
            }
        }
    }
}

/// Turns a suggestion request into a prompt and relays the provider's answer.
#[derive(Clone)]
pub struct SuggestionService {
    provider: Arc<dyn TextProvider>,
}

impl SuggestionService {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    #[instrument(skip(self, text, context), fields(model = %self.provider.model()))]
    pub async fn suggest(
        &self,
        kind: SuggestionKind,
        text: &str,
        context: Option<&str>,
    ) -> Result<String, AppError> {
        let prompt = kind.build_prompt(text, context);

        let timer = SUGGESTION_DURATION
            .with_label_values(&[kind.as_str()])
            .start_timer();
        let result = self.provider.generate(&prompt).await;
        timer.observe_duration();

        match result {
            Ok(suggestion) => {
                SUGGESTIONS_TOTAL
                    .with_label_values(&[kind.as_str(), "ok"])
                    .inc();
                tracing::info!(response_len = suggestion.len(), "Suggestion generated");
                Ok(suggestion)
            }
            Err(e) => {
                SUGGESTIONS_TOTAL
                    .with_label_values(&[kind.as_str(), "error"])
                    .inc();
                tracing::error!(error = %e, "Error calling Gemini API");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records prompts and replays a canned result.
    struct FakeProvider {
        prompts: Mutex<Vec<String>>,
        reply: fn() -> Result<String, ProviderError>,
    }

    impl FakeProvider {
        fn new(reply: fn() -> Result<String, ProviderError>) -> Arc<Self> {
            Arc::new(Self {
                prompts: Mutex::new(Vec::new()),
                reply,
            })
        }
    }

    #[async_trait]
    impl TextProvider for FakeProvider {
        async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            (self.reply)()
        }

        fn model(&self) -> &str {
            "fake"
        }
    }

    #[test]
    fn test_parse_kinds() {
        assert_eq!("triage".parse::<SuggestionKind>().unwrap(), SuggestionKind::Triage);
        assert_eq!("themes".parse::<SuggestionKind>().unwrap(), SuggestionKind::Themes);
        assert_eq!("email".parse::<SuggestionKind>().unwrap(), SuggestionKind::Email);
        assert!(matches!(
            "poem".parse::<SuggestionKind>(),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_triage_prompt() {
        assert_eq!(
            SuggestionKind::Triage.build_prompt("fever", None),
            "Generate brief triage notes for a patient presenting with the following issue: \"fever\". Focus on key questions to ask and potential immediate assessments. Format as a short, professional list."
        );
    }

    #[test]
    fn test_themes_prompt() {
        assert_eq!(
            SuggestionKind::Themes.build_prompt("8", Some("ignored")),
            "Suggest 3 creative and fun restaurant themes for a party of 8. Provide a short, catchy name and a one-sentence description for each theme."
        );
    }

    #[test]
    fn test_email_prompt_uses_context_or_default_name() {
        let named = SuggestionKind::Email.build_prompt("Loan", Some("Ada"));
        assert!(named.contains("bank customer named Ada regarding"));
        assert!(named.contains("service: \"Loan\""));
        assert!(named.ends_with("Sign off as \"Your Bank Team\"."));

        for context in [None, Some("")] {
            let anonymous = SuggestionKind::Email.build_prompt("Loan", context);
            assert!(anonymous.contains("bank customer named Valued Customer regarding"));
        }
    }

    #[tokio::test]
    async fn test_suggest_relays_provider_text() {
        let provider = FakeProvider::new(|| Ok("1. Ask about onset".to_string()));
        let service = SuggestionService::new(provider.clone());

        let text = service
            .suggest(SuggestionKind::Triage, "fever", None)
            .await
            .unwrap();

        assert_eq!(text, "1. Ask about onset");
        let prompts = provider.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("\"fever\""));
    }

    #[tokio::test]
    async fn test_suggest_maps_provider_failures() {
        let service = SuggestionService::new(FakeProvider::new(|| {
            Err(ProviderError::NetworkError("connection refused".to_string()))
        }));
        match service.suggest(SuggestionKind::Themes, "4", None).await {
            Err(AppError::UpstreamError(msg)) => {
                assert_eq!(msg, "Could not connect to AI service: connection refused")
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let service = SuggestionService::new(FakeProvider::new(|| Err(ProviderError::EmptyResponse)));
        match service.suggest(SuggestionKind::Email, "Loan", None).await {
            Err(AppError::UpstreamError(msg)) => assert_eq!(msg, "No content received from AI API."),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
