//! Identity-provider webhook endpoint.
//!
//! Signature verification runs over the raw request bytes, so the handler
//! takes `Bytes` instead of a typed JSON extractor.

use axum::{Router, body::Bytes, extract::State, http::HeaderMap, routing::post};
use cinecircle_common::{AppError, AppResult, WebhookSignature, verify_webhook};
use cinecircle_core::IdentityEvent;
use serde::Serialize;

use crate::{response::ApiResponse, state::AppState};

/// Acknowledgement payload.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub success: bool,
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str, alias: &str) -> &'a str {
    headers
        .get(name)
        .or_else(|| headers.get(alias))
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// Receive a signed identity-provider event.
async fn receive(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<ApiResponse<WebhookResponse>> {
    let secret = state.webhook_secret.as_deref().ok_or_else(|| {
        AppError::Config("Webhook secret is not configured".to_string())
    })?;

    // The provider's own headers and the generic webhook-* names are both
    // accepted; deployments differ on which set the proxy forwards.
    let signature = WebhookSignature::from_headers(
        header_value(&headers, "webhook-id", "svix-id"),
        header_value(&headers, "webhook-timestamp", "svix-timestamp"),
        header_value(&headers, "webhook-signature", "svix-signature"),
    )?;
    verify_webhook(secret, &signature, &body, state.webhook_tolerance_secs)?;

    let event: IdentityEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid webhook payload: {e}")))?;

    let event_type = event.event_type.clone();
    let outcome = state.identity_service.apply_event(event).await?;
    tracing::info!(%event_type, ?outcome, "Identity webhook processed");

    Ok(ApiResponse::ok(WebhookResponse { success: true }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(receive))
}
