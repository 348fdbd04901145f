use async_trait::async_trait;
use kickrelay::{
    Server,
    models::snapshot::{LivestreamStatus, Snapshot},
    poll,
    state::AppState,
    upstream::{ChannelFetcher, FetchError},
};
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

/// Scripted stand-in for the browser fetcher: records every requested
/// channel and replies with a canned snapshot or a synthetic failure.
pub struct StubFetcher {
    calls: Mutex<Vec<String>>,
    fail: bool,
}

impl StubFetcher {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail: false,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelFetcher for StubFetcher {
    async fn fetch(&self, channel: &str) -> Result<Snapshot, FetchError> {
        self.calls.lock().unwrap().push(channel.to_string());
        if self.fail {
            return Err(FetchError::Tls("stubbed upstream failure".into()));
        }
        Ok(test_snapshot())
    }
}

pub fn test_snapshot() -> Snapshot {
    Snapshot {
        followers_count: 1234,
        livestream_status: LivestreamStatus::Online,
        viewers_count: 56,
        messages: vec![serde_json::json!({ "id": "m1", "content": "hello chat" })],
        profile_pic: Some("https://files.example/pic.webp".to_string()),
        followers_only: false,
        subscriber_only: true,
    }
}

pub fn test_state(fetcher: Arc<dyn ChannelFetcher>, tick: Duration) -> Arc<AppState> {
    Arc::new(AppState::new(fetcher, tick))
}

/// Serve the relay router on an ephemeral local port, poll loop included,
/// without the TLS layer production runs behind.
pub async fn spawn_relay(state: Arc<AppState>) -> SocketAddr {
    poll::start(state.clone());

    let app = Server::router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    addr
}
