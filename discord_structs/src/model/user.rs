use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::gateway::model::Status;
use crate::model::{Gif, ImageFormat, is_animated, Png};
use crate::model::guild::{Integration, MessageNotifications};
use crate::model::ids::*;
pub use crate::model::ids::UserId;
use crate::serde_utils::{BoolExt, null_as_t};

/// Users in Discord are generally considered the base entity. Users can spawn across the entire
/// platform, be members of guilds, participate in text and voice chat, and much more. Users are
/// separated by a distinction of "bot" vs "normal." Although they are similar, bot users are
/// automated users that are "owned" by another user. Unlike normal users, bot users do not have a
/// limitation on the number of Guilds they can be a part of.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct User {
    /// the user's id
    ///
    /// Required OAuth2 scope: identify
    pub id: UserId,
    /// the user's username, not unique across the platform
    ///
    /// Required OAuth2 scope: identify
    pub username: String,
    /// the user's 4-digit discord-tag, or `"0"` for users on the new username system
    ///
    /// Required OAuth2 scope: identify
    pub discriminator: String,
    /// the user's avatar hash
    ///
    /// Required OAuth2 scope: identify
    #[serde(default)]
    pub avatar: Option<String>,
    /// whether the user belongs to an OAuth2 application
    ///
    /// Required OAuth2 scope: identify
    #[serde(default, skip_serializing_if = "bool::is_false")]
    pub bot: bool,
    /// whether the user is an Official Discord System user (part of the urgent message system)
    ///
    /// Required OAuth2 scope: identify
    #[serde(default, skip_serializing_if = "bool::is_false")]
    pub system: bool,
    /// whether the user has two factor enabled on their account
    ///
    /// Required OAuth2 scope: identify
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mfa_enabled: Option<bool>,
    /// the user's chosen language option
    ///
    /// Required OAuth2 scope: identify
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// whether the email on this account has been verified
    ///
    /// Required OAuth2 scope: email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    /// the user's email
    ///
    /// Required OAuth2 scope: email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// the flags on a user's account
    ///
    /// Required OAuth2 scope: identify
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<UserFlags>,
    /// the type of Nitro subscription on a user's account
    ///
    /// Required OAuth2 scope: identify
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_type: Option<PremiumType>,
    /// the public flags on a user's account
    ///
    /// Required OAuth2 scope: identify
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_flags: Option<UserFlags>,
}
id_impl!(User => UserId);

impl User {
    /// `username#1234`, or just the username for users without a discriminator.
    pub fn tag(&self) -> String {
        if self.discriminator == "0" {
            self.username.clone()
        } else {
            format!("{}#{}", self.username, self.discriminator)
        }
    }

    /// The url where this user's default avatar can be retrieved from Discord. The image will
    /// always be a png and is one of Discord's default avatars.
    pub fn default_avatar_url(&self) -> String {
        let index = match self.discriminator.parse::<u16>() {
            Ok(disc) if disc != 0 => u64::from(disc % 5),
            // users on the new username system
            _ => (self.id.0 >> 22) % 6,
        };
        cdn!("embed/avatars/{}.png", index)
    }

    /// The url of this user's avatar, if they have one: a `.gif` if the avatar is animated,
    /// otherwise a `.png`.
    pub fn avatar_url(&self) -> Option<String> {
        let avatar = self.avatar.as_ref()?;
        if is_animated(avatar) {
            self.avatar_url_as::<Gif>()
        } else {
            self.avatar_url_as::<Png>()
        }
    }

    /// The url where this user's avatar can be retrieved from Discord, if they have one. The
    /// desired format must be specified by `I`. If `I` is an animated format (currently only
    /// [Gif](crate::model::Gif)), the [avatar](User::avatar) must start with `a_` or `None` will be
    /// returned.
    ///
    /// The returned image size can be changed by appending a querystring of `?size=desired_size` to
    /// the URL. Image size can be any power of two between 16 and 4096.
    pub fn avatar_url_as<I: ImageFormat>(&self) -> Option<String> {
        self.avatar.as_ref()
            .filter(|avatar| !I::ANIMATED || is_animated(avatar))
            .map(|avatar| cdn!("avatars/{}/{}.{}", self.id, avatar, I::EXTENSION))
    }
}

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    pub struct UserFlags: u32 {
        const DISCORD_EMPLOYEE = 1 << 0;
        const PARTNERED_SERVER_OWNER = 1 << 1;
        const HYPESQUAD_EVENTS = 1 << 2;
        const BUG_HUNTER_LEVEL_1 = 1 << 3;
        const HOUSE_BRAVERY = 1 << 6;
        const HOUSE_BRILLIANCE = 1 << 7;
        const HOUSE_BALANCE = 1 << 8;
        const EARLY_SUPPORTER = 1 << 9;
        const TEAM_USER = 1 << 10;
        const SYSTEM = 1 << 12;
        const BUG_HUNTER_LEVEL_2 = 1 << 14;
        const VERIFIED_BOT = 1 << 16;
        const EARLY_VERIFIED_BOT_DEVELOPER = 1 << 17;
        const CERTIFIED_MODERATOR = 1 << 18;
        const BOT_HTTP_INTERACTIONS = 1 << 19;
        const ACTIVE_DEVELOPER = 1 << 22;
    }
}
serde_bitflag!(UserFlags: u32);

serde_repr! {
    /// Premium types denote the level of premium a user has.
    pub enum PremiumType: u8 {
        None = 0,
        NitroClassic = 1,
        Nitro = 2,
        NitroBasic = 3,
    }
}

/// An account on another service that the user has connected to Discord.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UserConnection {
    /// id of the connection account
    pub id: String,
    /// the username of the connection account
    pub name: String,
    /// the service of the connection (twitch, youtube)
    #[serde(rename = "type")]
    pub connection_type: String,
    /// whether the connection is revoked
    #[serde(default)]
    pub revoked: bool,
    /// an array of partial server integrations
    #[serde(default, deserialize_with = "null_as_t")]
    pub integrations: Vec<Integration>,
    /// whether the connection is verified
    #[serde(default)]
    pub verified: bool,
    /// whether friend sync is enabled for this connection
    #[serde(default)]
    pub friend_sync: bool,
    /// whether activities related to this connection will be shown in presence updates
    #[serde(default)]
    pub show_activity: bool,
    /// visibility of this connection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<ConnectionVisibility>,
}

serde_repr! {
    pub enum ConnectionVisibility: u8 {
        /// invisible to everyone except the user themselves
        None = 0,
        /// visible to everyone
        Everyone = 1,
    }
}

/// A user's Discord client settings.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Settings {
    #[serde(default)]
    pub render_embeds: bool,
    #[serde(default)]
    pub inline_embed_media: bool,
    #[serde(default)]
    pub inline_attachment_media: bool,
    #[serde(default)]
    pub enable_tts_command: bool,
    #[serde(default)]
    pub message_display_compact: bool,
    #[serde(default)]
    pub show_current_game: bool,
    #[serde(default)]
    pub convert_emoticons: bool,
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default, deserialize_with = "null_as_t")]
    pub guild_positions: Vec<GuildId>,
    #[serde(default, deserialize_with = "null_as_t")]
    pub restricted_guilds: Vec<GuildId>,
    #[serde(default)]
    pub friend_source_flags: Option<FriendSourceFlags>,
    pub status: Status,
    #[serde(default)]
    pub detect_platform_accounts: bool,
    #[serde(default)]
    pub developer_mode: bool,
}

/// Who can send the user friend requests
#[derive(Deserialize, Serialize, Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FriendSourceFlags {
    #[serde(default)]
    pub all: bool,
    #[serde(default)]
    pub mutual_guilds: bool,
    #[serde(default)]
    pub mutual_friends: bool,
}

/// A relationship between the current user and [`user`](Self::user).
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Relationship {
    pub id: UserId,
    #[serde(rename = "type")]
    pub kind: RelationshipType,
    pub user: User,
}
id_impl!(Relationship => UserId);

serde_repr! {
    pub enum RelationshipType: u8 {
        Friend = 1,
        Blocked = 2,
        IncomingFriendRequest = 3,
        OutgoingFriendRequest = 4,
    }
}

/// How far the current user has read in a channel.
#[derive(Deserialize, Serialize, Debug, Copy, Clone, Eq, PartialEq)]
pub struct ReadState {
    /// the channel
    pub id: ChannelId,
    #[serde(default)]
    pub mention_count: u32,
    #[serde(default)]
    pub last_message_id: Option<MessageId>,
}

/// Sent (and returned) when acknowledging messages.
#[derive(Deserialize, Serialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct Ack {
    pub token: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Copy, Clone, Eq, PartialEq)]
pub struct UserGuildSettingsChannelOverride {
    #[serde(default)]
    pub muted: bool,
    pub message_notifications: MessageNotifications,
    pub channel_id: ChannelId,
}

/// The current user's notification settings for a guild.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UserGuildSettings {
    #[serde(default)]
    pub suppress_everyone: bool,
    #[serde(default)]
    pub muted: bool,
    #[serde(default)]
    pub mobile_push: bool,
    pub message_notifications: MessageNotifications,
    /// `None` for DM settings
    pub guild_id: Option<GuildId>,
    #[serde(default, deserialize_with = "null_as_t")]
    pub channel_overrides: Vec<UserGuildSettingsChannelOverride>,
}

/// Changes to [`UserGuildSettings`]. Anything left as `None` is unchanged.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct UserGuildSettingsEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppress_everyone: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_push: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_notifications: Option<MessageNotifications>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub channel_overrides: HashMap<ChannelId, UserGuildSettingsChannelOverride>,
}

#[cfg(test)]
mod tests {
    use crate::mention::UserMarkup;

    use super::*;

    fn user(json: &str) -> User {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn avatars() {
        let user = user(r#"{
            "id": "80351110224678912",
            "username": "Nelly",
            "discriminator": "1337",
            "avatar": "8342729096ea3675442027381ff50dfe",
            "verified": true,
            "email": "nelly@discord.com",
            "flags": 64,
            "premium_type": 1,
            "public_flags": 64
        }"#);
        assert_eq!(user.tag(), "Nelly#1337");
        assert_eq!(user.ping(), "<@80351110224678912>");
        assert_eq!(
            user.avatar_url().unwrap(),
            "https://cdn.discordapp.com/avatars/80351110224678912/8342729096ea3675442027381ff50dfe.png",
        );
        assert_eq!(user.avatar_url_as::<Gif>(), None);
        assert_eq!(user.default_avatar_url(), "https://cdn.discordapp.com/embed/avatars/2.png");
        assert_eq!(user.flags, Some(UserFlags::HOUSE_BRAVERY));
        assert_eq!(user.premium_type, Some(PremiumType::NitroClassic));
    }

    #[test]
    fn animated_avatar() {
        let user = user(r#"{"id": "1", "username": "a", "discriminator": "0001", "avatar": "a_1234"}"#);
        assert_eq!(user.avatar_url().unwrap(), "https://cdn.discordapp.com/avatars/1/a_1234.gif");
        assert_eq!(user.avatar_url_as::<Png>().unwrap(), "https://cdn.discordapp.com/avatars/1/a_1234.png");
    }

    #[test]
    fn new_usernames() {
        let user = user(r#"{"id": "80351110224678912", "username": "nelly", "discriminator": "0", "avatar": null}"#);
        assert_eq!(user.tag(), "nelly");
        assert_eq!(user.avatar_url(), None);
        let index = (80_351_110_224_678_912_u64 >> 22) % 6;
        assert_eq!(user.default_avatar_url(), format!("https://cdn.discordapp.com/embed/avatars/{index}.png"));
    }

    #[test]
    fn unknown_flags_kept() {
        let user = user(r#"{"id": "1", "username": "a", "discriminator": "0001", "public_flags": 1073741824}"#);
        assert_eq!(user.public_flags.unwrap().bits(), 1 << 30);
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["public_flags"], 1_073_741_824);
    }

    #[test]
    fn guild_settings_edit() {
        let mut edit = UserGuildSettingsEdit { muted: Some(true), ..Default::default() };
        edit.channel_overrides.insert(ChannelId(5), UserGuildSettingsChannelOverride {
            muted: true,
            message_notifications: MessageNotifications::OnlyMentions,
            channel_id: ChannelId(5),
        });
        assert_eq!(
            serde_json::to_string(&edit).unwrap(),
            r#"{"muted":true,"channel_overrides":{"5":{"muted":true,"message_notifications":1,"channel_id":"5"}}}"#,
        );
    }

    #[test]
    fn relationship() {
        let relationship: Relationship = serde_json::from_str(r#"{
            "id": "2",
            "type": 2,
            "user": {"id": "2", "username": "blocked", "discriminator": "0002"}
        }"#).unwrap();
        assert_eq!(relationship.kind, RelationshipType::Blocked);
    }
}
