use serde::Deserialize;
use serde_json::Value;

use crate::models::snapshot::{LivestreamStatus, Snapshot};

/// `GET /api/v1/channels/{name}` response, trimmed to the fields the relay
/// republishes. `id` and `followersCount` are mandatory; every nested object
/// has an explicit fallback (see [`ChannelMeta::into_snapshot`]).
#[derive(Debug, Deserialize)]
pub struct ChannelMeta {
    pub id: u64,
    #[serde(rename = "followersCount")]
    pub followers_count: u64,
    #[serde(default)]
    pub livestream: Option<Livestream>,
    #[serde(default)]
    pub user: Option<ChannelUser>,
    #[serde(default)]
    pub chatroom: Option<Chatroom>,
}

#[derive(Debug, Deserialize)]
pub struct Livestream {
    #[serde(default)]
    pub is_live: bool,
    #[serde(default)]
    pub viewer_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct ChannelUser {
    #[serde(default)]
    pub profile_pic: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chatroom {
    #[serde(default)]
    pub followers_mode: bool,
    #[serde(default)]
    pub subscribers_mode: bool,
}

/// `GET /api/v2/channels/{id}/messages` response.
#[derive(Debug, Deserialize)]
pub struct MessagesEnvelope {
    pub data: MessagesBody,
}

#[derive(Debug, Deserialize)]
pub struct MessagesBody {
    #[serde(default)]
    pub messages: Vec<Value>,
}

impl ChannelMeta {
    /// Flatten the two upstream documents into the wire snapshot.
    ///
    /// A missing `livestream` object means the channel is offline with zero
    /// viewers; a present one carries its own viewer count even when
    /// `is_live` is false. Missing `user` or `chatroom` objects fall back to
    /// no picture and both chat modes off.
    pub fn into_snapshot(self, messages: Vec<Value>) -> Snapshot {
        let (livestream_status, viewers_count) = match &self.livestream {
            Some(live) if live.is_live => (LivestreamStatus::Online, live.viewer_count),
            Some(live) => (LivestreamStatus::Offline, live.viewer_count),
            None => (LivestreamStatus::Offline, 0),
        };

        Snapshot {
            followers_count: self.followers_count,
            livestream_status,
            viewers_count,
            messages,
            profile_pic: self.user.and_then(|user| user.profile_pic),
            followers_only: self
                .chatroom
                .as_ref()
                .is_some_and(|chatroom| chatroom.followers_mode),
            subscriber_only: self
                .chatroom
                .as_ref()
                .is_some_and(|chatroom| chatroom.subscribers_mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIVE_CHANNEL: &str = r#"{
        "id": 1337,
        "followersCount": 98765,
        "livestream": { "is_live": true, "viewer_count": 412, "session_title": "ranked" },
        "user": { "username": "someone", "profile_pic": "https://files.example/pic.webp" },
        "chatroom": { "followers_mode": true, "subscribers_mode": false }
    }"#;

    #[test]
    fn live_channel_maps_to_online() {
        let meta: ChannelMeta = serde_json::from_str(LIVE_CHANNEL).unwrap();
        assert_eq!(meta.id, 1337);

        let snapshot = meta.into_snapshot(Vec::new());
        assert_eq!(snapshot.livestream_status, LivestreamStatus::Online);
        assert_eq!(snapshot.viewers_count, 412);
        assert_eq!(snapshot.followers_count, 98765);
        assert_eq!(
            snapshot.profile_pic.as_deref(),
            Some("https://files.example/pic.webp")
        );
        assert!(snapshot.followers_only);
        assert!(!snapshot.subscriber_only);
    }

    #[test]
    fn absent_livestream_means_offline_with_zero_viewers() {
        let meta: ChannelMeta =
            serde_json::from_str(r#"{ "id": 5, "followersCount": 9, "livestream": null }"#)
                .unwrap();

        let snapshot = meta.into_snapshot(Vec::new());
        assert_eq!(snapshot.livestream_status, LivestreamStatus::Offline);
        assert_eq!(snapshot.viewers_count, 0);
    }

    #[test]
    fn ended_livestream_keeps_its_viewer_count() {
        let meta: ChannelMeta = serde_json::from_str(
            r#"{ "id": 5, "followersCount": 9, "livestream": { "is_live": false, "viewer_count": 3 } }"#,
        )
        .unwrap();

        let snapshot = meta.into_snapshot(Vec::new());
        assert_eq!(snapshot.livestream_status, LivestreamStatus::Offline);
        assert_eq!(snapshot.viewers_count, 3);
    }

    #[test]
    fn missing_user_and_chatroom_fall_back() {
        let meta: ChannelMeta =
            serde_json::from_str(r#"{ "id": 5, "followersCount": 9 }"#).unwrap();

        let snapshot = meta.into_snapshot(Vec::new());
        assert_eq!(snapshot.profile_pic, None);
        assert!(!snapshot.followers_only);
        assert!(!snapshot.subscriber_only);
    }

    #[test]
    fn missing_followers_count_is_a_parse_error() {
        let result: Result<ChannelMeta, _> = serde_json::from_str(r#"{ "id": 5 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn messages_keep_upstream_order() {
        let envelope: MessagesEnvelope = serde_json::from_str(
            r#"{ "data": { "messages": [ { "id": "a" }, { "id": "b" }, { "id": "c" } ] } }"#,
        )
        .unwrap();

        let ids: Vec<&str> = envelope
            .data
            .messages
            .iter()
            .map(|m| m["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn empty_message_list_is_fine() {
        let envelope: MessagesEnvelope =
            serde_json::from_str(r#"{ "data": { "messages": [] } }"#).unwrap();
        assert!(envelope.data.messages.is_empty());
    }
}
