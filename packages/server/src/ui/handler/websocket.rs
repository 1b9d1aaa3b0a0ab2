//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Path, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use serde::Deserialize;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{RoomName, Username},
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
    usecase::ConnectionHandle,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    #[serde(default)]
    pub username: String,
}

/// Upgrade to a WebSocket and join `room`.
///
/// A failed handshake is rejected by the `WebSocketUpgrade` extractor
/// before any game state is touched.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
    Query(query): Query<ConnectQuery>,
) -> impl IntoResponse {
    let room = RoomName::from(room);
    let username = Username::from(query.username);
    tracing::debug!("Upgrading connection of '{}' to room '{}'", username, room);

    ws.on_upgrade(move |socket| handle_socket(socket, state, room, username))
}

/// Spawns a task that forwards queued messages to the WebSocket.
///
/// The task ends when the queue is closed, which happens when the room
/// drops the connection, or when the peer stops accepting frames.
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                return;
            }
        }
        if let Err(e) = sender.close().await {
            tracing::debug!("Failed to close WebSocket: {}", e);
        }
    })
}

/// Reads inbound frames until the peer goes away, counting click signals.
/// Anything that is not a signal is discarded.
fn receiver_loop(
    mut receiver: futures_util::stream::SplitStream<WebSocket>,
    state: Arc<AppState>,
    handle: ConnectionHandle,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!("WebSocket error from '{}': {}", handle.username, e);
                    break;
                }
            };

            let payload: &[u8] = match &msg {
                Message::Text(text) => text.as_str().as_bytes(),
                Message::Binary(bytes) => &bytes[..],
                Message::Close(_) => {
                    tracing::debug!("'{}' requested close", handle.username);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                Message::Ping(_) | Message::Pong(_) => continue,
            };

            match ClientMessage::parse(payload) {
                Ok(ClientMessage::Signal) => {
                    state
                        .record_click_usecase
                        .execute(&handle.room, handle.username.clone())
                        .await;
                }
                Err(e) => {
                    tracing::debug!("Ignoring message from '{}': {}", handle.username, e);
                }
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    room: RoomName,
    username: Username,
) {
    let (sender, receiver) = socket.split();

    let (tx, rx) = mpsc::channel(state.outbound_buffer);
    let mut send_task = pusher_loop(rx, sender);

    let handle = state
        .connect_player_usecase
        .execute(room, username, tx)
        .await;

    let mut recv_task = receiver_loop(receiver, state.clone(), handle.clone());

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.disconnect_player_usecase.execute(&handle).await;
}
