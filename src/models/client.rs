use chrono::{DateTime, Utc};
use std::{net::SocketAddr, sync::Arc};
use tokio::sync::mpsc;

/// One live subscriber connection.
///
/// `channel` is the only mutable association and is rewritten on every
/// subscribe message; everything else is fixed at connect time. `sender`
/// feeds the socket's send task. Once the socket closes the receiving end is
/// dropped, so queued deliveries for a gone client are silently discarded.
#[derive(Clone)]
pub struct ClientData {
    pub id: Arc<str>,
    pub ip: SocketAddr,
    pub user_agent: Option<String>,
    pub channel: Option<Arc<str>>,
    pub connected_at: DateTime<Utc>,
    pub sender: mpsc::UnboundedSender<String>,
}
