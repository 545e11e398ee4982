//! WebSocket feed of bracket events.
//!
//! A client connected to `GET /t/{tid}/events` receives every event of that
//! tournament as a JSON text frame, in publish order, starting from the moment
//! it connected. Incoming frames other than close are ignored.
//!
//! # Example
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:8000/t/spring-open/events');
//!
//! ws.onmessage = (event) => {
//!   const data = JSON.parse(event.data);
//!   if (data.type === 'winner_advanced') {
//!     refreshBracket();
//!   }
//! };
//! ```

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use cornhole::tournament::EventEnvelope;
use futures_util::{SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::sync::broadcast::error::RecvError;

use super::{AppState, request_id::RequestId};
use crate::metrics;

/// Upgrade to a WebSocket streaming one tournament's events.
pub async fn events_handler(
    ws: WebSocketUpgrade,
    Path(tournament_id): Path<String>,
    request_id: RequestId,
    State(state): State<AppState>,
) -> Response {
    // Subscribe before upgrading so nothing published during the handshake is missed
    let receiver = state.manager.subscribe();
    let connection_id = request_id.as_str().to_string();
    ws.on_upgrade(move |socket| handle_socket(socket, tournament_id, connection_id, receiver))
}

/// Serialize an event if it belongs to `tournament_id`
pub fn event_message(envelope: &EventEnvelope, tournament_id: &str) -> Option<String> {
    if envelope.tournament_id != tournament_id {
        return None;
    }
    match envelope.to_json() {
        Ok(json) => Some(json),
        Err(e) => {
            warn!("Failed to serialize bracket event: {}", e);
            None
        }
    }
}

/// Forward events until either side goes away.
async fn handle_socket(
    socket: WebSocket,
    tournament_id: String,
    connection_id: String,
    mut events: tokio::sync::broadcast::Receiver<EventEnvelope>,
) {
    let (mut sender, mut receiver) = socket.split();

    metrics::websocket_connections_total();
    info!(
        "Event feed connected: tournament={}, connection={}",
        tournament_id, connection_id
    );

    loop {
        tokio::select! {
            received = events.recv() => match received {
                Ok(envelope) => {
                    let Some(json) = event_message(&envelope, &tournament_id) else {
                        continue;
                    };
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                    metrics::websocket_messages_sent();
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(
                        "Event feed lagging: tournament={}, connection={}, skipped={}",
                        tournament_id, connection_id, skipped
                    );
                }
                Err(RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                Some(Ok(_)) => debug!("Ignoring client frame on event feed"),
            },
        }
    }

    info!(
        "Event feed disconnected: tournament={}, connection={}",
        tournament_id, connection_id
    );
}
