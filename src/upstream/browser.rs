use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder, Locator};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

use super::types::{ChannelMeta, MessagesEnvelope};
use super::{ChannelFetcher, FetchError};
use crate::models::snapshot::Snapshot;

/// Identity presented to the upstream, matching a stock browser.
const USER_AGENT: &str = "Mozilla/5.0";

/// Fetches channel state by driving a headless browser through a WebDriver
/// endpoint. Every call opens a fresh session and tears it down before
/// returning; sessions are never pooled or shared across cycles.
pub struct BrowserFetcher {
    webdriver_url: String,
    upstream_url: String,
}

impl BrowserFetcher {
    pub fn new(webdriver_url: String, upstream_url: String) -> Self {
        Self {
            webdriver_url,
            upstream_url,
        }
    }

    async fn new_session(&self) -> Result<Client, FetchError> {
        let mut caps = serde_json::map::Map::new();
        caps.insert(
            "goog:chromeOptions".to_string(),
            json!({
                "args": ["--headless=new", format!("--user-agent={USER_AGENT}")],
            }),
        );

        let client = ClientBuilder::rustls()
            .map_err(|err| FetchError::Tls(err.to_string()))?
            .capabilities(caps)
            .connect(&self.webdriver_url)
            .await?;

        Ok(client)
    }

    /// Navigate to `url` and parse the rendered document body as JSON.
    async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, FetchError> {
        client.goto(url).await?;
        let body = client.find(Locator::Css("body")).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_snapshot(&self, client: &Client, channel: &str) -> Result<Snapshot, FetchError> {
        let meta: ChannelMeta = Self::get_json(
            client,
            &format!("{}/api/v1/channels/{}", self.upstream_url, channel),
        )
        .await?;

        // The messages endpoint is keyed by the internal numeric id, not the
        // channel name.
        let envelope: MessagesEnvelope = Self::get_json(
            client,
            &format!("{}/api/v2/channels/{}/messages", self.upstream_url, meta.id),
        )
        .await?;

        Ok(meta.into_snapshot(envelope.data.messages))
    }
}

#[async_trait]
impl ChannelFetcher for BrowserFetcher {
    async fn fetch(&self, channel: &str) -> Result<Snapshot, FetchError> {
        let client = self.new_session().await?;
        debug!(%channel, "browser session opened");

        let result = self.fetch_snapshot(&client, channel).await;

        // Teardown runs on both paths; a failed close never outranks the
        // fetch result itself.
        if let Err(err) = client.close().await {
            warn!(%channel, %err, "browser session teardown failed");
        }

        result
    }
}
