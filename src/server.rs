use axum::{Json, Router, http::StatusCode, routing::get};
use axum_server::tls_rustls::RustlsConfig;
use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};
use tracing::info;

use crate::poll;
use crate::state::AppState;
use crate::upstream::ChannelFetcher;
use crate::websocket::handler;

pub struct Server {
    state: Arc<AppState>,
    port: u16,
    cert_path: PathBuf,
    key_path: PathBuf,
}

impl Server {
    pub fn new(
        fetcher: Arc<dyn ChannelFetcher>,
        poll_interval: Duration,
        port: u16,
        cert_path: impl Into<PathBuf>,
        key_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            state: Arc::new(AppState::new(fetcher, poll_interval)),
            port,
            cert_path: cert_path.into(),
            key_path: key_path.into(),
        }
    }

    /// The relay surface is a single websocket route; everything else 404s.
    /// Split out from [`Server::run`] so tests can serve it without TLS.
    pub fn router(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/ws", get(handler::ws_handler))
            .fallback(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(serde_json::json!({ "error": "NOT_FOUND" })),
                )
            })
            .with_state(state)
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let _scheduler = poll::start(self.state.clone());

        let app = Self::router(self.state.clone());

        // Unreadable credentials abort boot; nothing after this point is
        // fatal to the process.
        let tls = RustlsConfig::from_pem_file(&self.cert_path, &self.key_path).await?;

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!(%addr, "listening");

        axum_server::bind_rustls(addr, tls)
            .serve(app.into_make_service_with_connect_info::<SocketAddr>())
            .await?;

        Ok(())
    }
}
