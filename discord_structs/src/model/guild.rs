use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gateway::model::Presence;
use crate::IdMap;
use crate::model::{Gif, ImageFormat, is_animated, Png, StillImage};
use crate::model::channel::Channel;
use crate::model::emoji::Emoji;
use crate::model::ids::*;
pub use crate::model::ids::GuildId;
use crate::model::permissions::{Permissions, Role};
use crate::model::user::User;
use crate::model::voice::VoiceState;
use crate::serde_utils::null_as_t;

/// Guilds in Discord represent an isolated collection of users and channels, and are often referred
/// to as "servers" in the UI.
///
/// Many fields are only sent in some places (`GUILD_CREATE`, `GET /guilds/{id}`, invites), so
/// almost everything is optional.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Guild {
    /// guild id
    pub id: GuildId,
    /// guild name (2-100 characters, excluding trailing and leading whitespace)
    #[serde(default)]
    pub name: Option<String>,
    /// icon hash
    #[serde(default)]
    pub icon: Option<String>,
    /// splash hash
    #[serde(default)]
    pub splash: Option<String>,
    /// discovery splash hash; only present for guilds with the "DISCOVERABLE" feature
    #[serde(default)]
    pub discovery_splash: Option<String>,
    /// true if the user is the owner of the guild
    ///
    /// only sent when using the `GET Current User Guilds` endpoint and are relative to the requested user
    #[serde(default)]
    pub owner: bool,
    /// id of owner
    #[serde(default)]
    pub owner_id: Option<UserId>,
    /// total permissions for the user in the guild (excludes overrides)
    ///
    /// only sent when using the `GET Current User Guilds` endpoint and are relative to the requested user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
    /// voice region id for the guild (deprecated)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// id of afk channel
    #[serde(default)]
    pub afk_channel_id: Option<ChannelId>,
    /// afk timeout in seconds
    #[serde(default)]
    pub afk_timeout: Option<u32>,
    /// true if the server widget is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_enabled: Option<bool>,
    /// the channel id that the widget will generate an invite to, or `None` if set to no invite
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_channel_id: Option<ChannelId>,
    /// verification level required for the guild
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_level: Option<VerificationLevel>,
    /// default message notifications level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_message_notifications: Option<MessageNotifications>,
    /// explicit content filter level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit_content_filter: Option<ExplicitContentFilterLevel>,
    /// roles in the guild
    #[serde(default)]
    pub roles: IdMap<Role>,
    /// custom guild emojis
    #[serde(default, deserialize_with = "null_as_t")]
    pub emojis: Vec<Emoji>,
    /// enabled guild features
    #[serde(default, deserialize_with = "null_as_t")]
    pub features: HashSet<GuildFeature>,
    /// required MFA level for the guild
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mfa_level: Option<MfaLevel>,
    /// application id of the guild creator if it is bot-created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<ApplicationId>,
    /// the id of the channel where guild notices such as welcome messages and boost events are posted
    #[serde(default)]
    pub system_channel_id: Option<ChannelId>,
    /// system channel flags
    #[serde(default)]
    pub system_channel_flags: SystemChannelFlags,
    /// the id of the channel where Community guilds can display rules and/or guidelines
    #[serde(default)]
    pub rules_channel_id: Option<ChannelId>,
    /// when this guild was joined at
    ///
    /// only sent within the `GUILD_CREATE` event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<DateTime<Utc>>,
    /// true if this is considered a large guild
    ///
    /// only sent within the `GUILD_CREATE` event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<bool>,
    /// true if this guild is unavailable due to an outage
    #[serde(default)]
    pub unavailable: bool,
    /// total number of members in this guild
    ///
    /// only sent within the `GUILD_CREATE` event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_count: Option<u32>,
    /// states of members currently in voice channels; lacks the guild_id key
    ///
    /// only sent within the `GUILD_CREATE` event
    #[serde(default)]
    pub voice_states: IdMap<VoiceState>,
    /// users in the guild
    ///
    /// only sent within the `GUILD_CREATE` event
    #[serde(default)]
    pub members: IdMap<GuildMember>,
    /// channels in the guild
    ///
    /// only sent within the `GUILD_CREATE` event
    #[serde(default)]
    pub channels: IdMap<Channel>,
    /// presences of the members in the guild, will only include non-offline members if the size
    /// is greater than `large threshold`
    ///
    /// only sent within the `GUILD_CREATE` event
    #[serde(default, deserialize_with = "null_as_t", skip_serializing_if = "Vec::is_empty")]
    pub presences: Vec<Presence>,
    /// the maximum number of presences for the guild (the default value, currently 25000, is in
    /// effect when `null` is returned)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_presences: Option<u32>,
    /// the maximum number of members for the guild
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_members: Option<u32>,
    /// the vanity url code for the guild
    #[serde(default)]
    pub vanity_url_code: Option<String>,
    /// the description for the guild, if the guild is discoverable
    #[serde(default)]
    pub description: Option<String>,
    /// banner hash
    #[serde(default)]
    pub banner: Option<String>,
    /// premium tier (Server Boost level)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_tier: Option<PremiumTier>,
    /// the number of boosts this guild currently has
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_subscription_count: Option<u32>,
    /// the preferred locale of a Community guild; used in server discovery and notices from Discord; defaults to "en-US"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_locale: Option<String>,
    /// the id of the channel where admins and moderators of Community guilds receive notices from Discord
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_updates_channel_id: Option<ChannelId>,
    /// the maximum amount of users in a video channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_video_channel_users: Option<u32>,
    /// approximate number of members in this guild, returned from the `GET /guild/<id>` endpoint when `with_counts` is `true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approximate_member_count: Option<u32>,
    /// approximate number of non-offline members in this guild, returned from the `GET /guild/<id>` endpoint when `with_counts` is `true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approximate_presence_count: Option<u32>,
}
id_impl!(Guild => GuildId);

impl Guild {
    /// The `@everyone` role, which has the same id as the guild.
    pub const fn everyone_role(&self) -> RoleId {
        RoleId(self.id.0)
    }

    /// The url of this guild's icon, if it has one: a `.gif` if the icon is animated, otherwise a
    /// `.png`.
    pub fn icon_url(&self) -> Option<String> {
        let icon = self.icon.as_ref()?;
        if is_animated(icon) {
            self.icon_url_as::<Gif>()
        } else {
            self.icon_url_as::<Png>()
        }
    }

    /// The url where this guild's icon can be retrieved from Discord, if it has an icon. The
    /// desired format must be specified by `I`. If `I` is an animated format (currently only
    /// [Gif](crate::model::Gif)), the [icon](Guild::icon) must start with `a_` or `None` will be
    /// returned.
    ///
    /// The returned image size can be changed by appending a querystring of `?size=desired_size` to
    /// the URL. Image size can be any power of two between 16 and 4096.
    pub fn icon_url_as<I: ImageFormat>(&self) -> Option<String> {
        self.icon.as_ref()
            .filter(|icon| !I::ANIMATED || is_animated(icon))
            .map(|icon| cdn!("icons/{}/{}.{}", self.id, icon, I::EXTENSION))
    }

    /// The url of this guild's banner as a `.png`, if it has one.
    pub fn banner_url(&self) -> Option<String> {
        self.banner_url_as::<Png>()
    }

    /// The url where this guild's banner can be retrieved from Discord, if it has one, in the
    /// [`StillImage`](crate::model::StillImage) format `I`.
    pub fn banner_url_as<I: StillImage>(&self) -> Option<String> {
        self.banner.as_ref()
            .map(|banner| cdn!("banners/{}/{}.{}", self.id, banner, I::EXTENSION))
    }

    /// The url where this guild's splash can be retrieved from Discord, if it has one.
    pub fn splash_url<I: StillImage>(&self) -> Option<String> {
        self.splash.as_ref()
            .map(|splash| cdn!("splashes/{}/{}.{}", self.id, splash, I::EXTENSION))
    }

    /// The url where this guild's discovery splash can be retrieved from Discord, if it has one.
    pub fn discovery_splash_url<I: StillImage>(&self) -> Option<String> {
        self.discovery_splash.as_ref()
            .map(|splash| cdn!("discovery-splashes/{}/{}.{}", self.id, splash, I::EXTENSION))
    }
}

serde_repr! {
    /// Whether members get notified for all messages or only mentions by default
    pub enum MessageNotifications: u8 {
        AllMessages = 0,
        OnlyMentions = 1,
    }
}

serde_repr! {
    pub enum ExplicitContentFilterLevel: u8 {
        Disabled = 0,
        MembersWithoutRoles = 1,
        AllMembers = 2,
    }
}

serde_repr! {
    pub enum MfaLevel: u8 {
        None = 0,
        Elevated = 1,
    }
}

serde_repr! {
    pub enum VerificationLevel: u8 {
        /// unrestricted
        None = 0,
        /// must have verified email on account
        Low = 1,
        /// must be registered on Discord for longer than 5 minutes
        Medium = 2,
        /// must be a member of the server for longer than 10 minutes
        High = 3,
        /// must have a verified phone number
        VeryHigh = 4,
    }
}

serde_repr! {
    pub enum PremiumTier: u8 {
        None = 0,
        Tier1 = 1,
        Tier2 = 2,
        Tier3 = 3,
    }
}

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    pub struct SystemChannelFlags: u32 {
        /// Suppress member join notifications
        const SUPPRESS_JOIN_NOTIFICATIONS = 1 << 0;
        /// Suppress server boost notifications
        const SUPPRESS_PREMIUM_SUBSCRIPTIONS = 1 << 1;
        /// Suppress server setup tips
        const SUPPRESS_GUILD_REMINDER_NOTIFICATIONS = 1 << 2;
        /// Hide member join sticker reply buttons
        const SUPPRESS_JOIN_NOTIFICATION_REPLIES = 1 << 3;
    }
}
serde_bitflag!(SystemChannelFlags: u32);

serde_str_enum! {
    pub enum GuildFeature {
        /// guild has access to set an animated guild banner image
        AnimatedBanner = "ANIMATED_BANNER",
        /// guild has access to set an animated guild icon
        AnimatedIcon = "ANIMATED_ICON",
        /// guild has access to set a guild banner image
        Banner = "BANNER",
        /// guild has access to use commerce features (i.e. create store channels)
        Commerce = "COMMERCE",
        /// guild can enable welcome screen, Membership Screening, stage channels and discovery, and
        /// receives community updates
        Community = "COMMUNITY",
        /// guild is able to be discovered in the directory
        Discoverable = "DISCOVERABLE",
        /// guild is able to be featured in the directory
        Featurable = "FEATURABLE",
        /// guild has access to set an invite splash background
        InviteSplash = "INVITE_SPLASH",
        /// guild has enabled Membership Screening
        MemberVerificationGateEnabled = "MEMBER_VERIFICATION_GATE_ENABLED",
        /// guild has access to create news channels
        News = "NEWS",
        /// guild is partnered
        Partnered = "PARTNERED",
        /// guild can be previewed before joining via Membership Screening or the directory
        PreviewEnabled = "PREVIEW_ENABLED",
        /// guild is able to set role icons
        RoleIcons = "ROLE_ICONS",
        /// guild has access to set a vanity URL
        VanityUrl = "VANITY_URL",
        /// guild is verified
        Verified = "VERIFIED",
        /// guild has access to set 384kbps bitrate in voice (previously VIP voice servers)
        VipRegions = "VIP_REGIONS",
        /// guild has enabled the welcome screen
        WelcomeScreenEnabled = "WELCOME_SCREEN_ENABLED",
    }
}

/// A public guild's information, available even to users who aren't in it.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GuildPreview {
    /// guild id
    pub id: GuildId,
    /// guild name (2-100 characters)
    pub name: String,
    /// icon hash
    pub icon: Option<String>,
    /// splash hash
    pub splash: Option<String>,
    /// discovery splash hash
    pub discovery_splash: Option<String>,
    /// custom guild emojis
    #[serde(default, deserialize_with = "null_as_t")]
    pub emojis: Vec<Emoji>,
    /// enabled guild features
    #[serde(default, deserialize_with = "null_as_t")]
    pub features: HashSet<GuildFeature>,
    /// approximate number of members in this guild
    pub approximate_member_count: u32,
    /// approximate number of online members in this guild
    pub approximate_presence_count: u32,
    /// the description for the guild
    pub description: Option<String>,
}
id_impl!(GuildPreview => GuildId);

/// A guild as returned by `GET /users/@me/guilds`.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UserGuild {
    pub id: GuildId,
    pub name: String,
    pub icon: Option<String>,
    /// whether the current user owns this guild
    pub owner: bool,
    /// the current user's permissions in this guild
    pub permissions: Permissions,
    #[serde(default, deserialize_with = "null_as_t")]
    pub features: HashSet<GuildFeature>,
}
id_impl!(UserGuild => GuildId);

/// The settings to change when modifying a guild. Anything left as `None` is unchanged.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct GuildParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_level: Option<VerificationLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_message_notifications: Option<MessageNotifications>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afk_channel_id: Option<ChannelId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afk_timeout: Option<u32>,
    /// base64 encoded image data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// transfer ownership (the current user must be the owner)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub splash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GuildMember {
    /// the user this guild member represents
    ///
    /// Partial object, containing `id`, `username`, `avatar`, `discriminator`, and `public_flags`
    pub user: User,
    /// the guild this member is in, sent in some gateway events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    /// this users guild nickname
    #[serde(default)]
    pub nick: Option<String>,
    /// array of role object ids
    #[serde(default, deserialize_with = "null_as_t")]
    pub roles: HashSet<RoleId>,
    /// when the user joined the guild
    pub joined_at: DateTime<Utc>,
    /// when the user started boosting the guild
    #[serde(default)]
    pub premium_since: Option<DateTime<Utc>>,
    /// whether the user is deafened in voice channels
    #[serde(default)]
    pub deaf: bool,
    /// whether the user is muted in voice channels
    #[serde(default)]
    pub mute: bool,
    /// whether the user has not yet passed the guild's Membership Screening requirements
    #[serde(default)]
    pub pending: bool,
    /// total permissions of the member in the channel, including overwrites, returned when in the
    /// interaction object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
}

id_eq!(GuildMember);
impl Id for GuildMember {
    type Id = UserId;

    fn id(&self) -> Self::Id {
        self.user.id
    }
}

impl GuildMember {
    pub fn nick_or_name(&self) -> &str {
        self.nick.as_deref()
            .unwrap_or_else(|| self.user.username.as_str())
    }
}

/// A role, along with the guild it's in.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GuildRole {
    pub role: Role,
    pub guild_id: GuildId,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GuildBan {
    /// the reason for the ban
    pub reason: Option<String>,
    /// the banned user
    pub user: User,
}

/// A guild's widget (formerly embed) settings.
#[derive(Deserialize, Serialize, Debug, Copy, Clone, Eq, PartialEq)]
pub struct GuildEmbed {
    /// whether the widget is enabled
    pub enabled: bool,
    /// the widget channel id
    pub channel_id: Option<ChannelId>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Integration {
    /// integration id
    pub id: IntegrationId,
    /// integration name
    pub name: String,
    /// integration type (twitch, youtube, or discord)
    #[serde(rename = "type")]
    pub integration_type: String,
    /// is this integration enabled
    pub enabled: bool,
    /// is this integration syncing
    ///
    /// not provided for discord bot integrations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syncing: Option<bool>,
    /// id that this integration uses for "subscribers"
    ///
    /// not provided for discord bot integrations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<RoleId>,
    /// whether emoticons should be synced for this integration (twitch only currently)
    ///
    /// not provided for discord bot integrations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_emoticons: Option<bool>,
    /// the behavior of expiring subscribers
    ///
    /// not provided for discord bot integrations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_behavior: Option<ExpireBehavior>,
    /// the grace period (in days) before expiring subscribers
    ///
    /// not provided for discord bot integrations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_grace_period: Option<u32>,
    /// user for this integration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// integration account information
    pub account: IntegrationAccount,
    /// when this integration was last synced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_at: Option<DateTime<Utc>>,
}
id_impl!(Integration => IntegrationId);

serde_repr! {
    pub enum ExpireBehavior: u8 {
        RemoveRole = 0,
        Kick = 1,
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
pub struct IntegrationAccount {
    /// id of the account
    pub id: String,
    /// name of the account
    pub name: String,
}

/// An event scheduled to happen in a guild.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GuildScheduledEvent {
    pub id: ScheduledEventId,
    pub guild_id: GuildId,
    /// the channel the event will be hosted in, or `None` if the
    /// [entity type](Self::entity_type) is [External](GuildScheduledEventEntityType::External)
    pub channel_id: Option<ChannelId>,
    /// the user that created the event
    #[serde(default)]
    pub creator_id: Option<UserId>,
    /// the name of the event (1-100 characters)
    pub name: String,
    /// the description of the event (1-1000 characters)
    #[serde(default)]
    pub description: Option<String>,
    pub scheduled_start_time: DateTime<Utc>,
    /// required for [External](GuildScheduledEventEntityType::External) events
    #[serde(default)]
    pub scheduled_end_time: Option<DateTime<Utc>>,
    pub privacy_level: GuildScheduledEventPrivacyLevel,
    pub status: GuildScheduledEventStatus,
    pub entity_type: GuildScheduledEventEntityType,
    /// the id of an entity associated with the event
    #[serde(default)]
    pub entity_id: Option<String>,
    /// additional metadata for the event
    #[serde(default)]
    pub entity_metadata: Option<GuildScheduledEventEntityMetadata>,
    /// the user that created the event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<User>,
    /// the number of users subscribed to the event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_count: Option<u32>,
}
id_impl!(GuildScheduledEvent => ScheduledEventId);

#[derive(Deserialize, Serialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct GuildScheduledEventEntityMetadata {
    /// location of the event (1-100 characters), required for
    /// [External](GuildScheduledEventEntityType::External) events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

serde_repr! {
    pub enum GuildScheduledEventPrivacyLevel: u8 {
        /// the scheduled event is only accessible to guild members
        GuildOnly = 2,
    }
}

serde_repr! {
    pub enum GuildScheduledEventStatus: u8 {
        Scheduled = 1,
        Active = 2,
        Completed = 3,
        Canceled = 4,
    }
}

impl GuildScheduledEventStatus {
    /// Whether Discord allows an event to go from this status to `next`.
    ///
    /// ```text
    /// Scheduled -> Active -> Completed
    /// Scheduled -> Canceled
    /// ```
    pub const fn can_become(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Scheduled, Self::Active | Self::Canceled) | (Self::Active, Self::Completed)
        )
    }
}

serde_repr! {
    pub enum GuildScheduledEventEntityType: u8 {
        StageInstance = 1,
        Voice = 2,
        External = 3,
    }
}

/// A user subscribed to a scheduled event.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GuildScheduledEventUser {
    pub guild_scheduled_event_id: ScheduledEventId,
    pub user: User,
    /// only sent when requested with `with_member`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<GuildMember>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUILD_CREATE: &str = r#"{
        "id": "197038439483310086",
        "name": "Discord Testers",
        "icon": "a_f64c482b807da4f539cff778d174971c",
        "banner": "9b6439a7de04f1d26af92f84ac9e1e4a",
        "splash": null,
        "owner_id": "73193882359173120",
        "afk_channel_id": null,
        "afk_timeout": 300,
        "verification_level": 7,
        "default_message_notifications": 1,
        "explicit_content_filter": 2,
        "system_channel_flags": 35,
        "features": ["ANIMATED_ICON", "VERIFIED", "SOME_NEW_THING"],
        "mfa_level": 1,
        "premium_tier": 3,
        "roles": [
            {"id": "197038439483310086", "name": "@everyone", "color": 0, "hoist": false, "position": 0, "permissions": "104320577", "managed": false, "mentionable": false}
        ],
        "emojis": null,
        "members": [
            {
                "user": {"id": "73193882359173120", "username": "owner", "discriminator": "0001", "avatar": null},
                "roles": [],
                "joined_at": "2016-06-27T20:42:45.000000+00:00",
                "deaf": false,
                "mute": false
            }
        ],
        "channels": [
            {"id": "197038439483310086", "type": 0, "name": "general", "position": 0}
        ],
        "voice_states": [],
        "presences": []
    }"#;

    #[test]
    fn guild_create() {
        let guild: Guild = serde_json::from_str(GUILD_CREATE).unwrap();
        assert_eq!(guild.verification_level, Some(VerificationLevel::Unknown(7)));
        assert_eq!(guild.explicit_content_filter, Some(ExplicitContentFilterLevel::AllMembers));
        assert_eq!(guild.default_message_notifications, Some(MessageNotifications::OnlyMentions));
        assert_eq!(guild.premium_tier, Some(PremiumTier::Tier3));
        assert!(guild.features.contains(&GuildFeature::AnimatedIcon));
        assert!(guild.features.contains(&GuildFeature::Unknown("SOME_NEW_THING".into())));
        assert!(guild.emojis.is_empty());
        assert_eq!(guild.members.len(), 1);
        assert!(guild.channels.contains(ChannelId(197_038_439_483_310_086)));
        assert!(guild.roles.contains(guild.everyone_role()));

        let flags = guild.system_channel_flags;
        assert!(flags.contains(SystemChannelFlags::SUPPRESS_JOIN_NOTIFICATIONS));
        assert!(flags.contains(SystemChannelFlags::SUPPRESS_PREMIUM_SUBSCRIPTIONS));
        assert_eq!(flags.bits(), 35);
    }

    #[test]
    fn high_system_channel_flags_kept() {
        let flags: SystemChannelFlags = serde_json::from_str("65537").unwrap();
        assert_eq!(flags.bits(), 65537);
        assert!(flags.contains(SystemChannelFlags::SUPPRESS_JOIN_NOTIFICATIONS));
        assert_eq!(serde_json::to_string(&flags).unwrap(), "65537");
    }

    #[test]
    fn unknown_values_re_serialize() {
        let guild: Guild = serde_json::from_str(GUILD_CREATE).unwrap();
        let json = serde_json::to_value(&guild).unwrap();
        assert_eq!(json["verification_level"], 7);
        assert_eq!(json["system_channel_flags"], 35);
        assert!(json["features"].as_array().unwrap().contains(&"SOME_NEW_THING".into()));
    }

    #[test]
    fn image_urls() {
        let mut guild: Guild = serde_json::from_str(GUILD_CREATE).unwrap();
        assert_eq!(
            guild.icon_url().unwrap(),
            "https://cdn.discordapp.com/icons/197038439483310086/a_f64c482b807da4f539cff778d174971c.gif",
        );
        assert_eq!(
            guild.banner_url().unwrap(),
            "https://cdn.discordapp.com/banners/197038439483310086/9b6439a7de04f1d26af92f84ac9e1e4a.png",
        );
        assert_eq!(guild.splash_url::<Png>(), None);

        guild.icon = Some("f64c482b807da4f539cff778d174971c".into());
        assert_eq!(
            guild.icon_url().unwrap(),
            "https://cdn.discordapp.com/icons/197038439483310086/f64c482b807da4f539cff778d174971c.png",
        );
        assert_eq!(guild.icon_url_as::<Gif>(), None);

        guild.icon = None;
        assert_eq!(guild.icon_url(), None);
    }

    #[test]
    fn scheduled_event() {
        let event: GuildScheduledEvent = serde_json::from_str(r#"{
            "id": "941000000000000000",
            "guild_id": "197038439483310086",
            "channel_id": null,
            "creator_id": "73193882359173120",
            "name": "Game night",
            "description": "bring snacks",
            "scheduled_start_time": "2022-02-10T20:00:00+00:00",
            "scheduled_end_time": "2022-02-10T23:00:00+00:00",
            "privacy_level": 2,
            "status": 1,
            "entity_type": 3,
            "entity_id": null,
            "entity_metadata": {"location": "the usual place"},
            "user_count": 12
        }"#).unwrap();
        assert_eq!(event.entity_type, GuildScheduledEventEntityType::External);
        assert_eq!(event.privacy_level, GuildScheduledEventPrivacyLevel::GuildOnly);
        assert_eq!(event.entity_metadata.unwrap().location.as_deref(), Some("the usual place"));

        assert!(event.status.can_become(GuildScheduledEventStatus::Active));
        assert!(event.status.can_become(GuildScheduledEventStatus::Canceled));
        assert!(!event.status.can_become(GuildScheduledEventStatus::Completed));
        assert!(GuildScheduledEventStatus::Active.can_become(GuildScheduledEventStatus::Completed));
        assert!(!GuildScheduledEventStatus::Completed.can_become(GuildScheduledEventStatus::Scheduled));
    }

    #[test]
    fn params_skip_unset() {
        let params = GuildParams {
            name: Some("new name".into()),
            verification_level: Some(VerificationLevel::High),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"name":"new name","verification_level":3}"#,
        );
    }
}
