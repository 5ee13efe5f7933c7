// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! Handles GET /, GET /health, POST /chat.

use std::net::SocketAddr;

use axum::{
    Json,
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use doppel_core::DoppelError;

use crate::server::GatewayState;
use crate::validate::{validate_message, validate_session_id};

/// Request body for POST /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Message content text.
    pub message: String,
    /// Optional session ID to continue an existing conversation.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response body for POST /chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Response content from the twin.
    pub response: String,
    /// Session ID (possibly newly generated).
    pub session_id: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Deployment environment label.
    pub environment: String,
    /// Model identifier completions are generated with.
    pub model: String,
    /// Profile documents currently loadable.
    pub documents_found: usize,
    /// Backend serving them ("remote" or "local").
    pub document_source: String,
}

/// Response body for GET /.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    /// Service name.
    pub name: String,
    /// Binary version.
    pub version: String,
    /// Feature list.
    pub features: Vec<String>,
    /// Endpoint map.
    pub endpoints: EndpointMap,
}

/// Endpoint map within the root descriptor.
#[derive(Debug, Serialize)]
pub struct EndpointMap {
    pub health: String,
    pub chat: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// GET /
///
/// Static service descriptor. No side effects.
pub async fn get_root() -> Json<RootResponse> {
    Json(RootResponse {
        name: "Doppel Digital Twin API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        features: vec![
            "conversation-memory".to_string(),
            "profile-documents".to_string(),
            "abuse-guards".to_string(),
        ],
        endpoints: EndpointMap {
            health: "/health".to_string(),
            chat: "/chat".to_string(),
        },
    })
}

/// GET /health
///
/// Reports service status and document availability. No side effects.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let inventory = state.documents.probe().await;
    Json(HealthResponse {
        status: "healthy".to_string(),
        environment: state.environment.clone(),
        model: state.chat.model().to_string(),
        documents_found: inventory.found,
        document_source: inventory.source.to_string(),
    })
}

/// POST /chat
///
/// Validates the request, then runs the chat pipeline.
pub async fn post_chat(
    State(state): State<GatewayState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(body): Json<ChatRequest>,
) -> Response {
    let message = match validate_message(&body.message) {
        Ok(message) => message,
        Err(reason) => {
            warn!(reason, "rejected malformed message");
            return reject(StatusCode::BAD_REQUEST, &reason);
        }
    };

    let session_id = match validate_session_id(body.session_id.as_deref()) {
        Ok(session_id) => session_id,
        Err(reason) => {
            warn!(reason, "rejected malformed session id");
            return reject(StatusCode::BAD_REQUEST, &reason);
        }
    };

    let client = client_address(&headers, addr);

    match state.chat.handle(&message, session_id, &client).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(ChatResponse {
                response: outcome.response,
                session_id: outcome.session_id.to_string(),
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// Resolves the client address: first entry of X-Forwarded-For when a
/// proxy added one, otherwise the socket peer address.
fn client_address(headers: &HeaderMap, addr: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| addr.ip().to_string())
}

/// Maps pipeline errors to HTTP statuses. Guard rejections keep their
/// client-safe message; everything else becomes a generic 500.
fn error_response(err: DoppelError) -> Response {
    match err {
        DoppelError::InvalidRequest { message } => reject(StatusCode::BAD_REQUEST, &message),
        DoppelError::RateLimited { message }
        | DoppelError::SessionLimit { message }
        | DoppelError::BudgetExhausted { message } => {
            reject(StatusCode::TOO_MANY_REQUESTS, &message)
        }
        other => {
            error!(error = %other, "chat request failed");
            reject(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

fn reject(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
