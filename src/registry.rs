use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

use crate::{poll, state::AppState};

/// One client's share of a poll tick: which channel to fetch and where to
/// deliver the result. Captured under the registry lock, used after the lock
/// is released so fetch work never holds it.
#[derive(Clone)]
pub struct FetchTarget {
    pub id: Arc<str>,
    pub channel: Arc<str>,
    pub sender: mpsc::UnboundedSender<String>,
}

/// Record `channel` as `client_id`'s association and kick off one
/// fetch-and-deliver cycle right away, without waiting for the next tick.
///
/// Re-subscribing overwrites the previous association (last write wins). A
/// subscribe for an id that already disconnected is a no-op.
pub async fn subscribe(state: &Arc<AppState>, client_id: &Arc<str>, channel: &str) {
    let target = {
        let mut clients = state.clients.write().await;
        let Some(client) = clients.get_mut(client_id) else {
            return;
        };
        let channel: Arc<str> = Arc::from(channel);
        client.channel = Some(channel.clone());
        FetchTarget {
            id: client_id.clone(),
            channel,
            sender: client.sender.clone(),
        }
    };

    info!(client = %target.id, channel = %target.channel, "client subscribed");

    // An empty identifier overwrites the association but keeps the client
    // silent, the same as never having subscribed.
    if !target.channel.is_empty() {
        poll::spawn_cycle(state.clone(), target);
    }
}

/// Snapshot the clients eligible for a tick: still connected, with a
/// non-empty channel association.
pub async fn poll_targets(state: &Arc<AppState>) -> Vec<FetchTarget> {
    state
        .clients
        .read()
        .await
        .values()
        .filter_map(|client| {
            let channel = client.channel.clone().filter(|c| !c.is_empty())?;
            Some(FetchTarget {
                id: client.id.clone(),
                channel,
                sender: client.sender.clone(),
            })
        })
        .collect()
}

/// Drop a client from the registry. Cycles already in flight for it will
/// fail their delivery harmlessly once the receiver is gone.
pub async fn remove(state: &Arc<AppState>, client_id: &Arc<str>) {
    state.clients.write().await.remove(client_id);
}
