//! A guild's audit log: who changed what, and when.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::guild::Integration;
use crate::model::ids::*;
use crate::model::user::User;
use crate::model::webhook::Webhook;
use crate::serde_utils::null_as_t;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GuildAuditLog {
    /// webhooks found in the audit log
    #[serde(default, deserialize_with = "null_as_t", skip_serializing_if = "Vec::is_empty")]
    pub webhooks: Vec<Webhook>,
    /// users found in the audit log
    #[serde(default, deserialize_with = "null_as_t", skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<User>,
    #[serde(default, deserialize_with = "null_as_t")]
    pub audit_log_entries: Vec<AuditLogEntry>,
    /// partial integration objects
    #[serde(default, deserialize_with = "null_as_t")]
    pub integrations: Vec<Integration>,
}

impl GuildAuditLog {
    /// The user who made the changes in `entry`, if they were sent along with the log.
    pub fn user(&self, entry: &AuditLogEntry) -> Option<&User> {
        let id = entry.user_id?;
        self.users.iter().find(|u| u.id == id)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AuditLogEntry {
    /// id of the affected entity (webhook, user, role, etc.)
    #[serde(default)]
    pub target_id: Option<String>,
    /// changes made to the target_id
    #[serde(default, deserialize_with = "null_as_t", skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<AuditLogChange>,
    /// the user who made the changes
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub id: AuditLogEntryId,
    pub action_type: AuditLogAction,
    /// additional info for certain action types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<AuditLogOptions>,
    /// the reason for the change (0-512 characters)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

id_impl!(AuditLogEntry => AuditLogEntryId);

impl AuditLogEntry {
    pub fn change(&self, key: &AuditLogChangeKey) -> Option<&AuditLogChange> {
        self.changes.iter().find(|c| &c.key == key)
    }
}

/// One changed field. The old and new values are whatever type the changed field has, so they're
/// kept as raw json.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AuditLogChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
    pub key: AuditLogChangeKey,
}

serde_str_enum! {
    pub enum AuditLogChangeKey {
        Name = "name",
        IconHash = "icon_hash",
        SplashHash = "splash_hash",
        OwnerId = "owner_id",
        Region = "region",
        AfkChannelId = "afk_channel_id",
        AfkTimeout = "afk_timeout",
        MfaLevel = "mfa_level",
        VerificationLevel = "verification_level",
        ExplicitContentFilter = "explicit_content_filter",
        DefaultMessageNotifications = "default_message_notifications",
        VanityUrlCode = "vanity_url_code",
        /// roles added to a member
        RoleAdd = "$add",
        /// roles removed from a member
        RoleRemove = "$remove",
        PruneDeleteDays = "prune_delete_days",
        WidgetEnabled = "widget_enabled",
        WidgetChannelId = "widget_channel_id",
        SystemChannelId = "system_channel_id",
        Position = "position",
        Topic = "topic",
        Bitrate = "bitrate",
        PermissionOverwrites = "permission_overwrites",
        Nsfw = "nsfw",
        ApplicationId = "application_id",
        RateLimitPerUser = "rate_limit_per_user",
        Permissions = "permissions",
        Color = "color",
        Hoist = "hoist",
        Mentionable = "mentionable",
        Allow = "allow",
        Deny = "deny",
        Code = "code",
        ChannelId = "channel_id",
        InviterId = "inviter_id",
        MaxUses = "max_uses",
        Uses = "uses",
        MaxAge = "max_age",
        Temporary = "temporary",
        Deaf = "deaf",
        Mute = "mute",
        Nick = "nick",
        AvatarHash = "avatar_hash",
        Id = "id",
        Type = "type",
        EnableEmoticons = "enable_emoticons",
        ExpireBehavior = "expire_behavior",
        ExpireGracePeriod = "expire_grace_period",
    }
}

/// Additional info for certain action types. Discord sends the numbers here as strings.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditLogOptions {
    /// number of days after which inactive members were kicked (`MemberPrune`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_member_days: Option<String>,
    /// number of members removed by the prune (`MemberPrune`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members_removed: Option<String>,
    /// channel in which the entities were targeted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<ChannelId>,
    /// id of the message that was targeted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<MessageId>,
    /// number of entities that were targeted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<String>,
    /// id of the overwritten entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OverwriteId>,
    /// type of overwritten entity
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AuditLogOptionsType>,
    /// name of the role if type is "role"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
}

serde_str_enum! {
    pub enum AuditLogOptionsType {
        Member = "member",
        Role = "role",
    }
}

serde_repr! {
    pub enum AuditLogAction: u16 {
        GuildUpdate = 1,

        ChannelCreate = 10,
        ChannelUpdate = 11,
        ChannelDelete = 12,
        ChannelOverwriteCreate = 13,
        ChannelOverwriteUpdate = 14,
        ChannelOverwriteDelete = 15,

        MemberKick = 20,
        MemberPrune = 21,
        MemberBanAdd = 22,
        MemberBanRemove = 23,
        MemberUpdate = 24,
        MemberRoleUpdate = 25,

        RoleCreate = 30,
        RoleUpdate = 31,
        RoleDelete = 32,

        InviteCreate = 40,
        InviteUpdate = 41,
        InviteDelete = 42,

        WebhookCreate = 50,
        WebhookUpdate = 51,
        WebhookDelete = 52,

        EmojiCreate = 60,
        EmojiUpdate = 61,
        EmojiDelete = 62,

        MessageDelete = 72,
        MessageBulkDelete = 73,
        MessagePin = 74,
        MessageUnpin = 75,

        IntegrationCreate = 80,
        IntegrationUpdate = 81,
        IntegrationDelete = 82,
    }
}
