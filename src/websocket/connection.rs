use axum::extract::ws::{Message as WsMessage, WebSocket};
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use std::{net::SocketAddr, sync::Arc};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::{
    models::client::ClientData, registry, state::AppState, utils::id_generator::client_id,
};

pub async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    ip: SocketAddr,
    user_agent: Option<String>,
) {
    let id = client_id();
    let (sender, mut deliveries) = mpsc::unbounded_channel::<String>();
    let connected_at = Utc::now();

    let client_data = ClientData {
        id: id.clone(),
        ip,
        user_agent,
        channel: None,
        connected_at,
        sender,
    };
    state.clients.write().await.insert(id.clone(), client_data);
    debug!(client = %id, %ip, "client connected");

    let (mut ws_sender, mut ws_receiver) = socket.split();

    // Send task: drain this client's delivery queue into the socket.
    let mut send_task = tokio::spawn(async move {
        while let Some(payload) = deliveries.recv().await {
            if ws_sender
                .send(WsMessage::Text(payload.into()))
                .await
                .is_err()
            {
                break;
            }
        }
    });

    // Receive task: every text frame is the next channel to watch, verbatim.
    // Anything else is ignored until the peer goes away.
    let recv_state = state.clone();
    let recv_id = id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_receiver.next().await {
            match msg {
                Ok(WsMessage::Text(channel)) => {
                    registry::subscribe(&recv_state, &recv_id, channel.as_str()).await;
                }
                Ok(WsMessage::Close(_)) => break,
                Ok(_) => continue,
                Err(_) => break,
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    // Both exit paths land here, so a closed socket always leaves the
    // registry with no trace of the client.
    registry::remove(&state, &id).await;
    info!(
        client = %id,
        connected_secs = (Utc::now() - connected_at).num_seconds(),
        "client disconnected"
    );
}
