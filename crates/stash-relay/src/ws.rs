//! WebSocket endpoint and per-connection session loop.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::dispatch::dispatch;
use crate::protocol::Welcome;

/// Shared session state: one REST client reused across connections.
#[derive(Clone)]
pub struct RelayState {
    pub client: reqwest::Client,
    pub api_base: String,
}

/// Creates the relay router.
pub fn create_router(state: RelayState) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn ws_handler(
    State(state): State<RelayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| session(socket, state))
}

/// One client session: a welcome frame, then one reply per text frame.
/// Errors never close the connection; only the client (or a dead socket)
/// ends the loop.
async fn session(mut socket: WebSocket, state: RelayState) {
    tracing::info!("client connected");
    if !send_json(&mut socket, &Welcome::new()).await {
        return;
    }

    while let Some(Ok(message)) = socket.recv().await {
        match message {
            Message::Text(text) => {
                let reply = dispatch(&state.client, &state.api_base, &text).await;
                if !send_json(&mut socket, &reply).await {
                    break;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
    tracing::info!("client disconnected");
}

async fn send_json<T: Serialize>(socket: &mut WebSocket, value: &T) -> bool {
    let payload = match serde_json::to_string(value) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!("failed to serialize frame: {}", e);
            return false;
        }
    };
    socket.send(Message::Text(payload.into())).await.is_ok()
}
