use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

// Twilio-style form payload for an inbound chat message.
#[derive(Debug, Deserialize)]
pub struct InboundMessage {
    #[serde(rename = "Body")]
    pub body: String,
    #[serde(rename = "From")]
    pub from: String,
}

#[derive(Debug, Serialize)]
pub struct WebhookReply {
    pub message: String,
}

/// POST /webhook/whatsapp
/// Run the sales agent on an inbound message. The agent degrades internally
/// (keyword logic, fallback reads), so this always answers 200 with a reply.
pub async fn receive_whatsapp(
    State(state): State<AppState>,
    Form(inbound): Form<InboundMessage>,
) -> Json<WebhookReply> {
    tracing::info!(from = %inbound.from, "webhook message received");
    let message = state.agent.process_message(&inbound.body, &inbound.from).await;
    Json(WebhookReply { message })
}

#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: String,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: String,
    #[serde(rename = "hub.challenge")]
    pub challenge: String,
}

/// GET /webhook/whatsapp
/// Subscription handshake of the WhatsApp Business API: echo the challenge
/// when the verify token matches.
pub async fn verify_whatsapp(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> Result<String, StatusCode> {
    if params.mode == "subscribe" && params.verify_token == state.webhook_verify_token {
        tracing::info!("webhook verified");
        Ok(params.challenge)
    } else {
        tracing::warn!(mode = %params.mode, "webhook verification failed");
        Err(StatusCode::FORBIDDEN)
    }
}

/// GET /test/{message}
/// Drive the agent without a chat channel.
pub async fn test_agent(
    State(state): State<AppState>,
    Path(message): Path<String>,
) -> Json<serde_json::Value> {
    let response = state.agent.process_message(&message, "test_user").await;
    Json(serde_json::json!({
        "query": message,
        "response": response,
    }))
}
