use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use service_core::error::AppError;

use crate::{
    dtos::{SuggestionRequest, SuggestionResponse},
    services::SuggestionKind,
    startup::AppState,
};

/// Draft triage notes, party themes or a follow-up email.
pub async fn create_suggestion(
    State(state): State<AppState>,
    body: Result<Json<SuggestionRequest>, JsonRejection>,
) -> Result<Json<SuggestionResponse>, AppError> {
    let Json(request) = body.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Invalid request body: {}", e.body_text()))
    })?;

    let text = request.text();
    let context = request.context();
    let kind = request.kind.filter(|k| !k.is_empty());

    let (kind, text) = match (kind, text) {
        (Some(kind), Some(text)) => (kind, text),
        _ => {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Type and text are required"
            )))
        }
    };
    let kind: SuggestionKind = kind.parse()?;

    let suggestion = state
        .suggestions
        .suggest(kind, &text, context.as_deref())
        .await?;

    Ok(Json(SuggestionResponse { suggestion }))
}
