use crate::dtos::GenerateRequest;
use crate::services::ProviderError;
use crate::startup::AppState;
use axum::{Json, body::Bytes, extract::State, http::StatusCode, response::IntoResponse};
use service_core::error::AppError;

/// Dispatch a generation request by its `action` field.
///
/// The body is taken raw so parse failures map to this API's own error
/// wording rather than the framework's rejection format.
#[tracing::instrument(skip(state, body))]
pub async fn generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    match GenerateRequest::from_body(&body)? {
        GenerateRequest::Deck(request) => {
            match state.text_provider.generate(&request.prompt).await {
                Ok(payload) => Ok((StatusCode::OK, Json(payload))),
                Err(ProviderError::NotConfigured(message)) => {
                    Err(AppError::ConfigError(anyhow::anyhow!(message)))
                }
                Err(ProviderError::Upstream { status, message }) => {
                    tracing::error!(status, error = %message, "RouteLLM API error");
                    Err(AppError::UpstreamError { status, message })
                }
                Err(e) => {
                    tracing::error!(error = %e, "Error in deck generation");
                    // Transport and decode failures keep their own message.
                    Err(AppError::UpstreamError {
                        status: 500,
                        message: e.to_string(),
                    })
                }
            }
        }
        GenerateRequest::Image(request) => {
            let result = state
                .image_provider
                .generate(
                    request.prompt.as_deref().unwrap_or_default(),
                    request.negative_prompt.as_deref(),
                )
                .await;

            match result {
                Ok(payload) => Ok((StatusCode::OK, Json(payload))),
                Err(ProviderError::NotImplemented(message)) => {
                    Err(AppError::NotImplemented(message))
                }
                Err(ProviderError::NotConfigured(message)) => {
                    Err(AppError::ConfigError(anyhow::anyhow!(message)))
                }
                Err(e) => {
                    tracing::error!(error = %e, "Error in image generation");
                    Err(AppError::UpstreamError {
                        status: 500,
                        message: e.to_string(),
                    })
                }
            }
        }
    }
}

/// Uniform reply for any verb other than POST on the generate route.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
