use axum::{
    extract::{ConnectInfo, State, ws::WebSocketUpgrade},
    http::HeaderMap,
    response::Response,
};
use std::{net::SocketAddr, sync::Arc};

use crate::{state::AppState, websocket::connection::handle_socket};

/// `GET /ws`. No query parameters and no handshake-time subscription: the
/// client picks its channel with its first text frame after the upgrade.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    let user_agent = headers
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .map(String::from);

    ws.on_upgrade(move |socket| handle_socket(socket, state, addr, user_agent))
}
