use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LivestreamStatus {
    Online,
    Offline,
}

/// Point-in-time channel state as republished to subscribers.
///
/// Serialized field names are the wire contract clients depend on
/// (`followersCount`, `livestreamStatus`, ...). Chat messages are passed
/// through untouched, in upstream order.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub followers_count: u64,
    pub livestream_status: LivestreamStatus,
    pub viewers_count: u64,
    pub messages: Vec<Value>,
    pub profile_pic: Option<String>,
    pub followers_only: bool,
    pub subscriber_only: bool,
}
