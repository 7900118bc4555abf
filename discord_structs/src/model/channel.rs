use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::guild::Guild;
use crate::model::ids::*;
pub use crate::model::ids::ChannelId;
use crate::model::permissions::Permissions;
use crate::model::user::User;

/// A channel in a guild, a DM, or a group DM.
///
/// All kinds of channel share this one struct, so channel types this crate doesn't know about
/// still parse. Fields that don't apply to a channel's [`kind`](Self::kind) are `None` or empty.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Channel {
    /// the id of this channel
    pub id: ChannelId,
    /// the type of channel
    #[serde(rename = "type")]
    pub kind: ChannelType,
    /// the id of the guild, if this is a guild channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    /// the name of the channel (2-100 characters)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// the channel topic (0-1024 characters)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// sorting position of the channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    /// the id of the last message sent in this channel (may not point to an existing or valid message)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_id: Option<MessageId>,
    /// when the last pinned message was pinned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_pin_timestamp: Option<DateTime<Utc>>,
    /// whether the channel is nsfw
    #[serde(default)]
    pub nsfw: bool,
    /// icon hash of a group DM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// the bitrate (in bits) of a voice channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
    /// the user limit of a voice channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_limit: Option<u32>,
    /// the recipients of a DM
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipients: Vec<User>,
    /// explicit permission overwrites for members and roles
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permission_overwrites: Vec<PermissionOverwrite>,
    /// id of the parent category for a channel (each parent category can contain up to 50 channels)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ChannelId>,
    /// amount of seconds a user has to wait before sending another message (0-21600); bots, as well
    /// as users with the permission `manage_messages` or `manage_channel`, are unaffected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_per_user: Option<u32>,
    /// id of the creator of a group DM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
    /// application id of the group DM creator if it is bot-created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<ApplicationId>,
    /// computed permissions for the invoking user in the channel, including overwrites
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
}
id_impl!(Channel => ChannelId);

impl Channel {
    /// Whether this channel is in a guild, as opposed to a (group) DM
    pub fn is_guild(&self) -> bool {
        self.guild_id.is_some() || !matches!(self.kind, ChannelType::Dm | ChannelType::GroupDm)
    }
}

serde_repr! {
    pub enum ChannelType: u8 {
        /// a text channel within a server
        GuildText = 0,
        /// a direct message between users
        Dm = 1,
        /// a voice channel within a server
        GuildVoice = 2,
        /// a direct message between multiple users
        GroupDm = 3,
        /// an [organizational category](https://support.discord.com/hc/en-us/articles/115001580171-Channel-Categories-101)
        /// that contains up to 50 channels
        GuildCategory = 4,
        /// a channel that [users can follow and crosspost into their own server](https://support.discord.com/hc/en-us/articles/360032008192)
        GuildNews = 5,
        /// a channel in which game developers can sell their game on Discord
        GuildStore = 6,
        /// a temporary sub-channel within a GUILD_NEWS channel
        NewsThread = 10,
        /// a temporary sub-channel within a GUILD_TEXT channel
        PublicThread = 11,
        /// a temporary sub-channel within a GUILD_TEXT channel that is only viewable by those invited and those with the MANAGE_THREADS permission
        PrivateThread = 12,
        /// a voice channel for hosting events with an audience
        GuildStageVoice = 13,
        /// the channel in a hub containing the listed servers
        GuildDirectory = 14,
        /// Channel that can only contain threads
        GuildForum = 15,
    }
}

/// The fields to change when editing a channel. Anything left as `None` is unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ChannelEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsfw: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_overwrites: Option<Vec<PermissionOverwrite>>,
    /// `Some(None)` to move the channel out of its category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Option<ChannelId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_per_user: Option<u32>,
}

/// Returned after following a news channel
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq)]
pub struct ChannelFollow {
    /// source channel id
    pub channel_id: ChannelId,
    /// created target webhook id
    pub webhook_id: WebhookId,
}

/// Changes to the permissions of one role or member in a channel.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq)]
pub struct PermissionOverwrite {
    /// role or user id
    pub id: OverwriteId,
    /// whether [`id`](Self::id) is a role or a member
    #[serde(rename = "type")]
    pub kind: PermissionOverwriteType,
    /// permissions this overwrite grants
    pub allow: Permissions,
    /// permissions this overwrite takes away
    pub deny: Permissions,
}

impl PermissionOverwrite {
    pub const fn role(id: RoleId, allow: Permissions, deny: Permissions) -> Self {
        Self { id: OverwriteId(id.0), kind: PermissionOverwriteType::Role, allow, deny }
    }

    pub const fn member(id: UserId, allow: Permissions, deny: Permissions) -> Self {
        Self { id: OverwriteId(id.0), kind: PermissionOverwriteType::Member, allow, deny }
    }

    /// The role this overwrite is for, if it's for a role
    pub const fn role_id(&self) -> Option<RoleId> {
        match self.kind {
            PermissionOverwriteType::Role => Some(RoleId(self.id.0)),
            _ => None,
        }
    }

    /// The user this overwrite is for, if it's for a member
    pub const fn user_id(&self) -> Option<UserId> {
        match self.kind {
            PermissionOverwriteType::Member => Some(UserId(self.id.0)),
            _ => None,
        }
    }
}

serde_repr! {
    pub enum PermissionOverwriteType: u8 {
        Role = 0,
        Member = 1,
    }
}

/// A code that when used, adds a user to a guild or group DM channel.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Invite {
    /// the invite code (unique ID)
    pub code: String,
    /// the guild this invite is for (partial)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild: Option<Guild>,
    /// the channel this invite is for (partial)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
    /// the user who created the invite
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inviter: Option<User>,
    /// when this invite was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// duration (in seconds) after which the invite expires, 0 for never
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
    /// number of times this invite has been used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses: Option<u32>,
    /// max number of times this invite can be used, 0 for unlimited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u32>,
    #[serde(default)]
    pub revoked: bool,
    /// whether this invite only grants temporary membership
    #[serde(default)]
    pub temporary: bool,
    #[serde(default)]
    pub unique: bool,
    /// the user whose stream to display for this voice channel stream invite
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_user: Option<User>,
    /// the type of user target for this voice channel invite
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_user_type: Option<TargetUserType>,
    /// approximate count of online members, returned when fetching with counts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approximate_presence_count: Option<u32>,
    /// approximate count of total members, returned when fetching with counts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approximate_member_count: Option<u32>,
}

impl Invite {
    /// The link to share this invite
    pub fn url(&self) -> String {
        format!("https://discord.gg/{}", self.code)
    }
}

serde_repr! {
    pub enum TargetUserType: u8 {
        Stream = 1,
    }
}

#[cfg(test)]
mod tests {
    use crate::mention::ChannelMarkup;

    use super::*;

    #[test]
    fn text_channel() {
        let channel: Channel = serde_json::from_str(r#"{
            "id": "41771983423143937",
            "guild_id": "41771983423143937",
            "name": "general",
            "type": 0,
            "position": 6,
            "permission_overwrites": [
                {"id": "41771983423143937", "type": 0, "allow": "0", "deny": "2048"}
            ],
            "rate_limit_per_user": 2,
            "nsfw": true,
            "topic": "24/7 chat about how to gank Mike #2",
            "last_message_id": "155117677105512449",
            "parent_id": "399942396007890945"
        }"#).unwrap();
        assert_eq!(channel.kind, ChannelType::GuildText);
        assert!(channel.is_guild());
        assert_eq!(channel.mention(), "<#41771983423143937>");
        let overwrite = channel.permission_overwrites[0];
        assert_eq!(overwrite.role_id(), Some(RoleId(41_771_983_423_143_937)));
        assert_eq!(overwrite.user_id(), None);
        assert_eq!(overwrite.deny, Permissions::SEND_MESSAGES);
    }

    #[test]
    fn dm_channel() {
        let channel: Channel = serde_json::from_str(r#"{
            "last_message_id": "3343820033257021450",
            "type": 1,
            "id": "319674150115610528",
            "recipients": [
                {"username": "test", "discriminator": "9999", "id": "82198898841029460", "avatar": "33ecab261d4681afa4d85a04691c4a01"}
            ]
        }"#).unwrap();
        assert!(!channel.is_guild());
        assert_eq!(channel.recipients[0].username, "test");
        assert!(channel.permission_overwrites.is_empty());
    }

    #[test]
    fn unknown_type_round_trips() {
        let channel: Channel = serde_json::from_str(r#"{"id": "1", "type": 99}"#).unwrap();
        assert_eq!(channel.kind, ChannelType::Unknown(99));
        let json = serde_json::to_value(&channel).unwrap();
        assert_eq!(json["type"], 99);
    }

    #[test]
    fn edit_skips_unset() {
        let edit = ChannelEdit {
            name: Some("renamed".into()),
            parent_id: Some(None),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&edit).unwrap(),
            r#"{"name":"renamed","parent_id":null}"#,
        );
    }

    #[test]
    fn invite() {
        let invite: Invite = serde_json::from_str(r#"{
            "code": "0vCdhLbwjZZTWZLD",
            "guild": {
                "id": "165176875973476352",
                "name": "CS:GO Fraggers Only",
                "splash": null,
                "banner": null,
                "description": "Very good description",
                "icon": null,
                "features": ["NEWS", "DISCOVERABLE"],
                "verification_level": 2,
                "vanity_url_code": null
            },
            "channel": {
                "id": "165176875973476352",
                "name": "illuminati",
                "type": 0
            },
            "inviter": {
                "id": "115590097100865541",
                "username": "speed",
                "avatar": "deadbeef",
                "discriminator": "7653",
                "public_flags": 131328
            },
            "target_user_type": 1,
            "target_user": {
                "id": "165176875973476352",
                "username": "bob",
                "avatar": "deadbeef",
                "discriminator": "1234",
                "public_flags": 64
            },
            "approximate_member_count": 15
        }"#).unwrap();
        assert_eq!(invite.url(), "https://discord.gg/0vCdhLbwjZZTWZLD");
        assert_eq!(invite.target_user_type, Some(TargetUserType::Stream));
        assert_eq!(invite.approximate_member_count, Some(15));
        assert_eq!(invite.guild.unwrap().name.as_deref(), Some("CS:GO Fraggers Only"));
    }
}
