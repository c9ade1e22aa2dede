/**
 * WebSocket Transport
 *
 * The persistent bidirectional channel. Authentication runs once, at
 * handshake time, before the connection is admitted: the credential comes
 * from the Authorization header or, because browsers cannot set headers on
 * an upgrade request, from the `token` query parameter. A handshake without
 * a valid token is rejected with 401 and no connection is registered.
 *
 * An admitted connection subscribes to the broadcast hub and receives every
 * task change event as a JSON text frame, including echoes of its own
 * mutations. No client-to-server events are defined; inbound frames other
 * than close are ignored.
 */

use std::collections::HashMap;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::HeaderMap,
    response::Response,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

use crate::auth::tokens::{verify_token, Claims};
use crate::error::ApiError;
use crate::middleware::auth::bearer_token;
use crate::server::state::AppState;

/// WebSocket upgrade handler for GET /ws
///
/// Verifies the handshake credential before upgrading; all three auth
/// failure modes reject the handshake itself.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let token = match bearer_token(&headers) {
        Ok(token) => token.to_owned(),
        Err(ApiError::MissingCredential) => params
            .get("token")
            .cloned()
            .ok_or(ApiError::MissingCredential)?,
        Err(e) => return Err(e),
    };

    let claims = verify_token(&state.jwt_secret, &token).map_err(|e| {
        tracing::warn!("WebSocket handshake rejected: {}", e);
        e
    })?;

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, claims)))
}

/// Drive one admitted connection until it disconnects.
///
/// Subscribing to the hub is what registers the connection; dropping the
/// receiver when either task finishes is what deregisters it. Disconnects
/// have no further side effects.
async fn handle_socket(socket: WebSocket, state: AppState, claims: Claims) {
    let connection_id = Uuid::new_v4();
    let mut rx = state.events.subscribe();
    let (mut sender, mut receiver) = socket.split();

    tracing::info!(
        "WebSocket client connected: {} ({})",
        connection_id,
        claims.email
    );

    // Forward every broadcast event to this client. A failed send means the
    // peer is gone; only this connection's loop ends.
    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let frame = match serde_json::to_string(&event) {
                        Ok(frame) => frame,
                        Err(e) => {
                            tracing::error!("Failed to serialize task event: {:?}", e);
                            continue;
                        }
                    };
                    if sender.send(Message::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("WebSocket receiver lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Drain inbound frames so close is noticed promptly.
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            if let Message::Close(_) = message {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    tracing::info!("WebSocket client disconnected: {}", connection_id);
}
