use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::registry::{self, FetchTarget};
use crate::state::AppState;

/// Spawn the process-wide poll loop. It runs for the life of the process;
/// each tick fans out one independent fetch-and-deliver task per subscribed
/// client. There is no overlap suppression: a cycle still running when the
/// next tick fires simply coexists with the new one.
pub fn start(state: Arc<AppState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(state.poll_interval);
        loop {
            ticker.tick().await;
            for target in registry::poll_targets(&state).await {
                spawn_cycle(state.clone(), target);
            }
        }
    })
}

/// One fetch-and-deliver cycle for one client. Cycles are independent: a
/// slow or failing fetch here never blocks other clients or later ticks.
/// Each task carries a child of the process shutdown token so outstanding
/// fetches can be abandoned wholesale.
pub fn spawn_cycle(state: Arc<AppState>, target: FetchTarget) -> JoinHandle<()> {
    let cancel = state.shutdown.child_token();
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {}
            _ = fetch_and_send(state, target) => {}
        }
    })
}

async fn fetch_and_send(state: Arc<AppState>, target: FetchTarget) {
    let snapshot = match state.fetcher.fetch(&target.channel).await {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            warn!(channel = %target.channel, client = %target.id, %err, "upstream fetch failed");
            None
        }
    };

    // An absent snapshot serializes to the literal `null`.
    match serde_json::to_string(&snapshot) {
        Ok(payload) => {
            // Delivery to a client that disconnected mid-cycle is a no-op.
            let _ = target.sender.send(payload);
        }
        Err(err) => warn!(channel = %target.channel, %err, "snapshot serialization failed"),
    }
}
