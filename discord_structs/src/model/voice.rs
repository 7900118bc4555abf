use serde::{Deserialize, Serialize};

use crate::model::guild::GuildMember;
use crate::model::ids::*;

/// A user's voice connection status.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct VoiceState {
    /// the guild id this voice state is for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    /// the channel id this user is connected to, `None` once they disconnect
    pub channel_id: Option<ChannelId>,
    /// the user id this voice state is for
    pub user_id: UserId,
    /// the guild member this voice state is for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<GuildMember>,
    /// the session id for this voice state
    pub session_id: String,
    /// whether this user is deafened by the server
    pub deaf: bool,
    /// whether this user is muted by the server
    pub mute: bool,
    /// whether this user is locally deafened
    pub self_deaf: bool,
    /// whether this user is locally muted
    pub self_mute: bool,
    /// whether this user is streaming using "Go Live"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_stream: Option<bool>,
    /// whether this user's camera is enabled
    #[serde(default)]
    pub self_video: bool,
    /// whether this user is muted by the current user
    pub suppress: bool,
}

id_impl!(VoiceState => user_id: UserId);

impl VoiceState {
    pub const fn is_connected(&self) -> bool {
        self.channel_id.is_some()
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct VoiceRegion {
    /// unique ID for the region
    pub id: String,
    /// name of the region
    pub name: String,
    /// an example hostname for the region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_hostname: Option<String>,
    /// an example port for the region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_port: Option<u16>,
    /// true if this is a vip-only server
    #[serde(default)]
    pub vip: bool,
    /// true for a single server that is closest to the current user's client
    #[serde(default)]
    pub optimal: bool,
    /// whether this is a deprecated voice region (avoid switching to these)
    #[serde(default)]
    pub deprecated: bool,
    /// whether this is a custom voice region (used for events/etc)
    #[serde(default)]
    pub custom: bool,
}

/// The ICE servers to use for a voice connection.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct VoiceIce {
    /// how long (in seconds, as a string) these servers are valid for
    pub ttl: String,
    pub servers: Vec<IceServer>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct IceServer {
    pub url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub credential: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_state() {
        let state: VoiceState = serde_json::from_str(r#"{
            "channel_id": "157733188964188161",
            "user_id": "80351110224678912",
            "session_id": "90326bd25d71d39b9ef95b299e3872ff",
            "deaf": false,
            "mute": false,
            "self_deaf": false,
            "self_mute": true,
            "suppress": false
        }"#).unwrap();
        assert_eq!(state.id(), UserId(80_351_110_224_678_912));
        assert!(state.is_connected());
        assert!(state.self_mute);
        assert!(!state.self_video);
        assert_eq!(state.self_stream, None);
        assert_eq!(state.guild_id, None);
    }

    #[test]
    fn disconnected() {
        let state: VoiceState = serde_json::from_str(r#"{
            "guild_id": "41771983423143937",
            "channel_id": null,
            "user_id": "80351110224678912",
            "session_id": "abc",
            "deaf": false,
            "mute": false,
            "self_deaf": false,
            "self_mute": false,
            "self_video": false,
            "suppress": false
        }"#).unwrap();
        assert!(!state.is_connected());
        assert_eq!(state.guild_id, Some(GuildId(41_771_983_423_143_937)));
    }

    #[test]
    fn region() {
        let region: VoiceRegion = serde_json::from_str(r#"{
            "id": "us-west",
            "name": "US West",
            "sample_hostname": "us-west1.discord.gg",
            "sample_port": 443,
            "optimal": true
        }"#).unwrap();
        assert_eq!(region.sample_port, Some(443));
        assert!(region.optimal);
        assert!(!region.vip && !region.deprecated && !region.custom);
    }

    #[test]
    fn ice() {
        let ice: VoiceIce = serde_json::from_str(r#"{
            "ttl": "86400",
            "servers": [
                {"url": "turn:turn.example.com:3478", "username": "u", "credential": "c"},
                {"url": "stun:stun.example.com:3478"}
            ]
        }"#).unwrap();
        assert_eq!(ice.servers.len(), 2);
        assert_eq!(ice.servers[1].username, "");
    }
}
