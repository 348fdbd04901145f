use kickrelay::Server;
use kickrelay::upstream::BrowserFetcher;
use std::{env, sync::Arc, time::Duration};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Transport credentials are the one thing the process refuses to start
    // without; everything else has a default.
    let cert_path =
        env::var("TLS_CERT_PATH").expect("TLS_CERT_PATH environment variable must be set");
    let key_path =
        env::var("TLS_KEY_PATH").expect("TLS_KEY_PATH environment variable must be set");

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8081);

    let webdriver_url =
        env::var("WEBDRIVER_URL").unwrap_or_else(|_| "http://localhost:4444".into());
    let upstream_url = env::var("UPSTREAM_URL").unwrap_or_else(|_| "https://kick.com".into());

    let poll_interval_ms = env::var("POLL_INTERVAL_MS")
        .unwrap_or_else(|_| "1000".to_string())
        .parse::<u64>()
        .expect("POLL_INTERVAL_MS must be a valid number");

    tracing::info!(port, %webdriver_url, %upstream_url, poll_interval_ms, "starting kickrelay");

    let fetcher = Arc::new(BrowserFetcher::new(webdriver_url, upstream_url));
    let server = Server::new(
        fetcher,
        Duration::from_millis(poll_interval_ms),
        port,
        cert_path,
        key_path,
    );

    server.run().await?;

    Ok(())
}
