//! WebSocket handler: video-frame relay.
//!
//! DESIGN
//! ======
//! On upgrade, the connection joins the relay hub under a fresh client id
//! and enters a `select!` loop:
//! - Incoming client messages → decode → relay `data` events to peers
//! - Frames queued by the hub from other clients → forward to this client
//!
//! Binary messages are protobuf events, text messages are JSON events. A
//! relayed message is forwarded byte-for-byte in the form it arrived in.
//! Malformed or non-`data` messages are logged and dropped; the connection
//! stays open.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → join hub (refused once the hub is closed)
//! 2. Client sends frames → relayed to every other client
//! 3. Socket close, socket error, or hub close → part hub

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::services::relay::RelayHub;
use crate::state::AppState;

#[cfg(test)]
#[path = "ws_test.rs"]
mod ws_test;

// =============================================================================
// UPGRADE
// =============================================================================

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_ws(mut socket: WebSocket, state: AppState) {
    let client_id = Uuid::new_v4();
    let Some(mut client_rx) = state.hub.join(client_id).await else {
        warn!(%client_id, "ws: relay closed; refusing client");
        close_socket(&mut socket, client_id).await;
        return;
    };

    info!(%client_id, "ws: client connected");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(msg) = msg else { break };
                let msg = match msg {
                    Ok(msg) => msg,
                    Err(e) => {
                        debug!(%client_id, error = %e, "ws: receive failed");
                        break;
                    }
                };
                if matches!(msg, Message::Close(_)) {
                    break;
                }
                process_inbound(&state.hub, client_id, msg).await;
            }
            outbound = client_rx.recv() => {
                let Some(outbound) = outbound else {
                    close_socket(&mut socket, client_id).await;
                    break;
                };
                if let Err(e) = socket.send(outbound).await {
                    debug!(%client_id, error = %e, "ws: send failed");
                    break;
                }
            }
        }
    }

    state.hub.part(client_id).await;
    info!(%client_id, "ws: client disconnected");
}

async fn close_socket(socket: &mut WebSocket, client_id: Uuid) {
    if let Err(e) = socket.send(Message::Close(None)).await {
        debug!(%client_id, error = %e, "ws: close frame not sent");
    }
}

// =============================================================================
// INBOUND
// =============================================================================

/// Decode one inbound message and relay it if it is a frame event.
///
/// Returns the number of peers the frame was queued for, or `None` when the
/// message was not relayed. Kept apart from the socket so tests can drive it
/// with plain hub channels.
async fn process_inbound(hub: &RelayHub, client_id: Uuid, msg: Message) -> Option<usize> {
    let decoded = match &msg {
        Message::Binary(bytes) => frames::decode_event(bytes),
        Message::Text(text) => frames::decode_event_json(text.as_str()),
        Message::Ping(_) | Message::Pong(_) | Message::Close(_) => return None,
    };

    let event = match decoded {
        Ok(event) => event,
        Err(e) => {
            warn!(%client_id, error = %e, "ws: dropping malformed message");
            return None;
        }
    };

    if !event.is_data() {
        debug!(%client_id, event = %event.event, "ws: ignoring non-data event");
        return None;
    }

    let peers = hub.broadcast(client_id, msg).await;
    info!(
        %client_id,
        frame_id = %event.frame.frame_id,
        width = event.frame.width,
        height = event.frame.height,
        peers,
        "ws: relayed frame"
    );
    Some(peers)
}
