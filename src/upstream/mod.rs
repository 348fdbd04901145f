pub mod browser;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::snapshot::Snapshot;

pub use browser::BrowserFetcher;

/// Source of upstream channel state. Production uses [`BrowserFetcher`];
/// tests substitute a scripted implementation.
#[async_trait]
pub trait ChannelFetcher: Send + Sync {
    async fn fetch(&self, channel: &str) -> Result<Snapshot, FetchError>;
}

/// Everything that can go wrong inside one fetch cycle. None of these cross
/// the poll layer: a failed cycle is logged and delivered as `null`, and the
/// next tick tries again from scratch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("tls setup failed: {0}")]
    Tls(String),
    #[error("webdriver session failed: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),
    #[error("upstream navigation failed: {0}")]
    Upstream(#[from] fantoccini::error::CmdError),
    #[error("invalid upstream payload: {0}")]
    Payload(#[from] serde_json::Error),
}
