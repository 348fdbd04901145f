use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::{models::client::ClientData, upstream::ChannelFetcher};

pub type Clients = Arc<RwLock<HashMap<Arc<str>, ClientData>>>;

/// Process-scoped relay state: the subscription registry plus the shared
/// fetcher and poll settings. Constructed once at startup and handed to the
/// transport layer and the scheduler.
pub struct AppState {
    pub clients: Clients,
    pub fetcher: Arc<dyn ChannelFetcher>,
    pub poll_interval: Duration,
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(fetcher: Arc<dyn ChannelFetcher>, poll_interval: Duration) -> Self {
        Self {
            clients: Arc::new(RwLock::new(HashMap::new())),
            fetcher,
            poll_interval,
            shutdown: CancellationToken::new(),
        }
    }
}
