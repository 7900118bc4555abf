use std::fmt::{self, Display};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gateway::intents::Intents;
use crate::lossy::{self, millis_from_float};
use crate::model::emoji::Emoji;
use crate::model::ids::*;
use crate::serde_utils::null_as_t;

/// Used to trigger the initial handshake with the gateway.
#[derive(Serialize, Debug, Clone)]
pub struct Identify {
    /// authentication token
    pub(crate) token: String,
    /// connection properties (doesn't really seem to matter)
    properties: IdentifyProperties,
    /// whether this connection supports compression of packets
    #[serde(skip_serializing_if = "Option::is_none")]
    compress: Option<bool>,
    /// value between 50 and 250, total number of members where the gateway will stop sending offline members in the guild member list
    #[serde(skip_serializing_if = "Option::is_none")]
    large_threshold: Option<u8>,
    /// used for Guild Sharding, `[shard_id, num_shards]`
    #[serde(skip_serializing_if = "Option::is_none")]
    shard: Option<(u32, u32)>,
    /// presence structure for initial presence information
    #[serde(skip_serializing_if = "Option::is_none")]
    presence: Option<GatewayStatusUpdate>,
    /// enables dispatching of guild subscription events (presence and typing events)
    #[serde(skip_serializing_if = "Option::is_none")]
    guild_subscriptions: Option<bool>,
    /// the Gateway Intents you wish to receive
    intents: Intents,
}

impl Identify {
    /// Used to create an instance of [Identify]. This struct uses the builder pattern to configure
    /// the optional fields. [intents](Identify::intents) defaults to all non-privileged intents.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            properties: Default::default(),
            compress: None,
            large_threshold: None,
            shard: None,
            presence: None,
            guild_subscriptions: None,
            intents: Intents::ALL_WITHOUT_PRIVILEGED,
        }
    }

    /// Set the bot's presence when initially connecting.
    pub fn presence(mut self, presence: GatewayStatusUpdate) -> Self {
        self.presence = Some(presence);
        self
    }

    /// Override the default intents (all non-privileged intents).
    pub const fn intents(mut self, intents: Intents) -> Self {
        self.intents = intents;
        self
    }

    pub const fn shard(mut self, id: u32, count: u32) -> Self {
        self.shard = Some((id, count));
        self
    }

    pub const fn compress(mut self, compress: bool) -> Self {
        self.compress = Some(compress);
        self
    }

    pub const fn large_threshold(mut self, large_threshold: u8) -> Self {
        self.large_threshold = Some(large_threshold);
        self
    }

    pub const fn guild_subscriptions(mut self, guild_subscriptions: bool) -> Self {
        self.guild_subscriptions = Some(guild_subscriptions);
        self
    }

    pub fn properties(mut self, properties: IdentifyProperties) -> Self {
        self.properties = properties;
        self
    }

    pub const fn get_intents(&self) -> Intents {
        self.intents
    }

    pub const fn get_shard(&self) -> Option<(u32, u32)> {
        self.shard
    }
}

/// A summary for logs, without the token.
impl Display for Identify {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Identify {{ intents: {:?}", self.intents)?;
        if let Some((id, count)) = self.shard {
            write!(f, ", shard: {id}/{count}")?;
        }
        if let Some(presence) = &self.presence {
            write!(f, ", status: {}", presence.status)?;
        }
        f.write_str(" }")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IdentifyProperties {
    #[serde(rename = "$os")]
    pub os: String,
    #[serde(rename = "$browser")]
    pub browser: String,
    #[serde(rename = "$device")]
    pub device: String,
    #[serde(rename = "$referer", default)]
    pub referer: String,
    #[serde(rename = "$referring_domain", default)]
    pub referring_domain: String,
}

impl Default for IdentifyProperties {
    fn default() -> Self {
        Self {
            os: std::env::consts::OS.into(),
            browser: env!("CARGO_PKG_NAME").into(),
            device: env!("CARGO_PKG_NAME").into(),
            referer: String::new(),
            referring_domain: String::new(),
        }
    }
}

/// Used to replay missed events when a disconnected client resumes.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Resume {
    /// session token
    pub token: String,
    /// session id
    pub session_id: String,
    /// last sequence number received
    pub seq: u64,
}

/// Don't display the token
impl Display for Resume {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Resume")
            .field("session_id", &self.session_id)
            .field("seq", &self.seq)
            .finish()
    }
}

/// Sent by the client to indicate a presence or status update.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GatewayStatusUpdate {
    /// unix time (in milliseconds) of when the client went idle, or null if the client is not idle
    pub since: Option<u64>,
    /// null, or the user's activities
    pub activities: Option<Vec<Activity>>,
    /// the user's new status
    pub status: Status,
    /// whether or not the client is afk
    pub afk: bool,
}

impl GatewayStatusUpdate {
    pub const fn new(status: Status) -> Self {
        Self {
            since: None,
            activities: None,
            status,
            afk: false,
        }
    }

    pub fn with_activity(activity: Activity) -> Self {
        Self {
            activities: Some(vec![activity]),
            ..Self::new(Status::Online)
        }
    }
}

serde_str_enum! {
    pub enum Status {
        /// Online
        Online = "online",
        /// AFK
        Idle = "idle",
        /// Do Not Disturb
        DoNotDisturb = "dnd",
        /// Invisible and shown as offline
        Invisible = "invisible",
        /// Offline
        Offline = "offline",
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Online
    }
}

/// A user's presence is their current state on a guild.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Presence {
    /// the user presence is being updated for
    pub user: PresenceUser,
    /// id of the guild
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    pub status: Status,
    /// user's current activities
    #[serde(default, deserialize_with = "null_as_t")]
    pub activities: Vec<Activity>,
    /// unix time (in milliseconds) of when the client went idle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<i64>,
}

id_eq!(Presence);
impl Id for Presence {
    type Id = UserId;

    fn id(&self) -> Self::Id {
        self.user.id
    }
}

/// Presence updates only have to include the user's id, the rest of the user may be missing.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PresenceUser {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Bots are only able to send name, type, and optionally url.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Activity {
    /// the activity's name
    pub name: String,
    /// activity type
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// stream url, is validated when type is 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// when the activity was added to the user's session (unix milliseconds on the wire)
    #[serde(default, with = "lossy::millis_datetime", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// unix timestamps for start and/or end of the game
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Timestamps>,
    /// application id for the game
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<ApplicationId>,
    /// what the player is currently doing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// the user's current party status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// the emoji used for a custom status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Emoji>,
    /// information for the current party of the player
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<Party>,
    /// images for the presence and their hover texts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<Assets>,
    /// secrets for Rich Presence joining and spectating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secrets: Option<Secrets>,
    /// whether or not the activity is an instanced game session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<bool>,
    /// activity flags `OR`d together, describes what the payload includes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<ActivityFlags>,
}

impl Activity {
    /// create an activity with a [name](Self::name) and [`activity_type`](Self::activity_type), two of the three fields
    /// bots are able to send
    pub fn for_bot(name: impl Into<String>, activity_type: ActivityType) -> Self {
        Self {
            name: name.into(),
            activity_type,
            url: None,
            created_at: None,
            timestamps: None,
            application_id: None,
            details: None,
            state: None,
            emoji: None,
            party: None,
            assets: None,
            secrets: None,
            instance: None,
            flags: None,
        }
    }

    /// A [streaming](ActivityType::Streaming) activity, which is the only kind with a url.
    pub fn streaming(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::for_bot(name, ActivityType::Streaming)
        }
    }
}

impl Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.activity_type {
            ActivityType::Game => write!(f, "Playing {}", self.name),
            ActivityType::Streaming => write!(f, "Streaming {}", self.details.as_ref().unwrap_or(&self.name)),
            ActivityType::Listening => write!(f, "Listening to {}", self.name),
            ActivityType::Watching => write!(f, "Watching {}", self.name),
            ActivityType::Custom => match &self.emoji {
                Some(emoji) => write!(f, "{} {}", emoji, self.state.as_ref().unwrap_or(&self.name)),
                None => f.write_str(self.state.as_ref().unwrap_or(&self.name)),
            },
            ActivityType::Competing => write!(f, "Competing in {}", self.name),
            ActivityType::Unknown(_) => f.write_str(&self.name),
        }
    }
}

serde_repr! {
    pub enum ActivityType: u8 {
        /// Format: `Playing {name}`
        Game = 0,
        /// Format: `Streaming {details}`
        ///
        /// The streaming type currently only supports Twitch and YouTube. Only https://twitch.tv/ and
        /// https://youtube.com/ urls will work.
        Streaming = 1,
        /// Format: `Listening to {name}`
        Listening = 2,
        /// Format: `Watching {name}`
        Watching = 3,
        /// Format: `{emoji} {name}`
        Custom = 4,
        /// Format: `Competing in {name}`
        Competing = 5,
    }
}

/// Unix times (in milliseconds) for the start and/or end of an activity.
///
/// Some clients send these as floats; any fraction of a millisecond is dropped.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(from = "RawTimestamps")]
pub struct Timestamps {
    /// unix time (in milliseconds) of when the activity started
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// unix time (in milliseconds) of when the activity ends
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
}

impl Timestamps {
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start.and_then(DateTime::from_timestamp_millis)
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end.and_then(DateTime::from_timestamp_millis)
    }
}

// the wire shape of `Timestamps`
#[derive(Deserialize)]
struct RawTimestamps {
    #[serde(default)]
    start: Option<f64>,
    #[serde(default)]
    end: Option<f64>,
}

impl From<RawTimestamps> for Timestamps {
    fn from(RawTimestamps { start, end }: RawTimestamps) -> Self {
        Self {
            start: start.map(millis_from_float),
            end: end.map(millis_from_float),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Party {
    /// the id of the party
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// used to show the party's current and maximum size
    ///
    /// (current_size, max_size)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<(u32, u32)>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Assets {
    /// the id for a large asset of the activity, usually a snowflake
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_image: Option<String>,
    /// text displayed when hovering over the large image of the activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_text: Option<String>,
    /// the id for a small asset of the activity, usually a snowflake
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_image: Option<String>,
    /// text displayed when hovering over the small image of the activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_text: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Secrets {
    /// the secret for joining a party
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join: Option<String>,
    /// the secret for spectating a game
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spectate: Option<String>,
    /// the secret for a specific instanced match
    #[serde(rename = "match")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#match: Option<String>,
}

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct ActivityFlags: u32 {
        const INSTANCE = 1 << 0;
        const JOIN = 1 << 1;
        const SPECTATE = 1 << 2;
        const JOIN_REQUEST = 1 << 3;
        const SYNC = 1 << 4;
        const PLAY = 1 << 5;
        const PARTY_PRIVACY_FRIENDS = 1 << 6;
        const PARTY_PRIVACY_VOICE_CHANNEL = 1 << 7;
        const EMBEDDED = 1 << 8;
    }
}
serde_bitflag!(ActivityFlags: u32);

/// The response to `GET /gateway/bot`.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GatewayBotResponse {
    /// the WSS URL that can be used for connecting to the gateway
    pub url: String,
    /// the recommended number of shards to use when connecting
    pub shards: u32,
    /// information on the current session start limit
    pub session_start_limit: SessionInformation,
}

/// How many more sessions can be started, for max concurrency sharding.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionInformation {
    /// the total number of session starts the current user is allowed
    #[serde(default)]
    pub total: u32,
    /// the remaining number of session starts the current user is allowed
    #[serde(default)]
    pub remaining: u32,
    /// the number of milliseconds after which the limit resets
    #[serde(default)]
    pub reset_after: u64,
    /// the number of identify requests allowed per 5 seconds
    #[serde(default)]
    pub max_concurrency: u32,
}

impl SessionInformation {
    pub const fn reset_after(&self) -> Duration {
        Duration::from_millis(self.reset_after)
    }

    /// Which bucket the shard with id `shard_id` identifies in.
    pub const fn rate_limit_key(&self, shard_id: u32) -> u32 {
        if self.max_concurrency == 0 {
            0
        } else {
            shard_id % self.max_concurrency
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn identify() {
        let identify = Identify::new("secret")
            .intents(Intents::GUILDS | Intents::GUILD_MESSAGES)
            .shard(1, 4)
            .large_threshold(250)
            .presence(GatewayStatusUpdate::with_activity(Activity::for_bot("chess", ActivityType::Game)));
        let json = serde_json::to_value(&identify).unwrap();
        assert_eq!(json["token"], "secret");
        assert_eq!(json["intents"], 513);
        assert_eq!(json["shard"], serde_json::json!([1, 4]));
        assert_eq!(json["large_threshold"], 250);
        assert_eq!(json["properties"]["$os"], std::env::consts::OS);
        assert_eq!(json["presence"]["status"], "online");
        assert_eq!(json["presence"]["activities"][0]["name"], "chess");
        assert!(json.get("compress").is_none());

        let shown = identify.to_string();
        assert!(!shown.contains("secret"), "{shown}");
        assert!(shown.contains("shard: 1/4, status: online"), "{shown}");
    }

    #[test]
    fn resume_hides_token() {
        let resume = Resume { token: "secret".into(), session_id: "abc".into(), seq: 7 };
        assert_eq!(resume.to_string(), r#"Resume { session_id: "abc", seq: 7 }"#);
        assert_eq!(
            serde_json::to_string(&resume).unwrap(),
            r#"{"token":"secret","session_id":"abc","seq":7}"#,
        );
    }

    #[test]
    fn float_timestamps() {
        let timestamps: Timestamps = serde_json::from_str(r#"{"start": 1609459200000.0, "end": 1609459200500.7}"#).unwrap();
        assert_eq!(timestamps.start, Some(1_609_459_200_000));
        assert_eq!(timestamps.end, Some(1_609_459_200_500));
        assert_eq!(timestamps.start_time().unwrap(), Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap());

        let integers: Timestamps = serde_json::from_str(r#"{"start": 1609459200000}"#).unwrap();
        assert_eq!(integers, Timestamps { start: Some(1_609_459_200_000), end: None });
        assert_eq!(serde_json::to_string(&integers).unwrap(), r#"{"start":1609459200000}"#);
    }

    #[test]
    fn malformed_times_are_errors() {
        assert!(serde_json::from_str::<Timestamps>(r#"{"start": "soon"}"#).is_err());
        assert!(serde_json::from_str::<Timestamps>(r#"{"end": true}"#).is_err());
        assert!(serde_json::from_str::<Activity>(r#"{"name": "x", "type": 0, "created_at": "yesterday"}"#).is_err());

        let empty: Timestamps = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Timestamps::default());
    }

    #[test]
    fn high_activity_flags_kept() {
        let flags: ActivityFlags = serde_json::from_str("65537").unwrap();
        assert_eq!(flags.bits(), (1 << 16) | 1);
        assert!(flags.contains(ActivityFlags::INSTANCE));
        assert_eq!(serde_json::to_string(&flags).unwrap(), "65537");
    }

    #[test]
    fn presence() {
        let presence: Presence = serde_json::from_str(r#"{
            "user": {"id": "80351110224678912"},
            "guild_id": "41771983423143937",
            "status": "dnd",
            "activities": [
                {
                    "name": "Rocket League",
                    "type": 0,
                    "application_id": "379286085710381999",
                    "created_at": 1507665886000,
                    "state": "In a Match",
                    "details": "Ranked Duos: 2-1",
                    "timestamps": {"start": 1507665886000.0},
                    "party": {"id": "9dd6594e-81b3-49f6-a6b5-a679e6a060d3", "size": [2, 2]},
                    "assets": {"large_image": "351371005538729000", "large_text": "DFH Stadium"},
                    "flags": 3
                },
                {
                    "name": "Custom Status",
                    "type": 4,
                    "state": "vibing",
                    "emoji": {"name": "🔥"},
                    "created_at": 1507665886000.9
                },
                {
                    "name": "???",
                    "type": 9
                }
            ]
        }"#).unwrap();
        assert_eq!(presence.id(), UserId(80_351_110_224_678_912));
        assert_eq!(presence.status, Status::DoNotDisturb);

        let game = &presence.activities[0];
        assert_eq!(game.to_string(), "Playing Rocket League");
        assert_eq!(game.created_at, Some(Utc.timestamp_millis_opt(1_507_665_886_000).unwrap()));
        assert_eq!(game.timestamps.unwrap().start, Some(1_507_665_886_000));
        assert_eq!(game.party.as_ref().unwrap().size, Some((2, 2)));
        assert_eq!(game.flags, Some(ActivityFlags::INSTANCE | ActivityFlags::JOIN));

        let custom = &presence.activities[1];
        assert_eq!(custom.to_string(), "🔥 vibing");
        assert_eq!(custom.created_at, game.created_at);

        assert_eq!(presence.activities[2].activity_type, ActivityType::Unknown(9));
    }

    #[test]
    fn created_at_round_trips_as_millis() {
        let mut activity = Activity::streaming("speedrun", "https://twitch.tv/example");
        activity.created_at = Some(Utc.timestamp_millis_opt(1_507_665_886_123).unwrap());
        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["created_at"], 1_507_665_886_123_i64);
        assert_eq!(json["type"], 1);
        assert_eq!(json["url"], "https://twitch.tv/example");
    }

    #[test]
    fn status() {
        assert_eq!(serde_json::to_string(&Status::Idle).unwrap(), r#""idle""#);
        let status: Status = serde_json::from_str(r#""streaming""#).unwrap();
        assert_eq!(status, Status::Unknown("streaming".into()));
        assert_eq!(status.to_string(), "streaming");
    }

    #[test]
    fn gateway_bot() {
        let response: GatewayBotResponse = serde_json::from_str(r#"{
            "url": "wss://gateway.discord.gg/",
            "shards": 9,
            "session_start_limit": {
                "total": 1000,
                "remaining": 999,
                "reset_after": 14400000,
                "max_concurrency": 1
            }
        }"#).unwrap();
        assert_eq!(response.shards, 9);
        let limit = response.session_start_limit;
        assert_eq!(limit.reset_after(), Duration::from_secs(4 * 60 * 60));
        assert_eq!(limit.rate_limit_key(5), 0);
    }
}
