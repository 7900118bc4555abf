use std::collections::HashMap;
use std::fmt;

use itertools::{Either, Itertools};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::de::{Error, Visitor};

use crate::model::channel::{PermissionOverwrite, PermissionOverwriteType};
use crate::model::guild::{Guild, GuildMember};
use crate::model::ids::*;
pub use crate::model::ids::RoleId;
use crate::serde_utils::BoolExt;

bitflags! {
    /// The capabilities a member has in a guild or channel.
    ///
    /// The letters in each flag's docs are the channel types the flag applies to when used in a
    /// [permission overwrite](PermissionOverwrite): `T`ext, `V`oice, and `S`tage.
    ///
    /// Discord sends these as a string, since they don't fit in a javascript number. Bits without a
    /// name here are kept as is.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct Permissions: u64 {
        /// Allows creation of instant invites
        ///
        /// T, V, S
        const CREATE_INSTANT_INVITE = 1 << 0;
        /// Allows kicking members
        const KICK_MEMBERS = 1 << 1;
        /// Allows banning members
        const BAN_MEMBERS = 1 << 2;
        /// Allows all permissions and bypasses channel permission overwrites
        const ADMINISTRATOR = 1 << 3;
        /// Allows management and editing of channels
        ///
        /// T, V, S
        const MANAGE_CHANNELS = 1 << 4;
        /// Allows management and editing of the guild
        const MANAGE_GUILD = 1 << 5;
        /// Allows for the addition of reactions to messages
        ///
        /// T
        const ADD_REACTIONS = 1 << 6;
        /// Allows for viewing of audit logs
        const VIEW_AUDIT_LOG = 1 << 7;
        /// Allows for using priority speaker in a voice channel
        ///
        /// V
        const PRIORITY_SPEAKER = 1 << 8;
        /// Allows the user to go live
        ///
        /// V
        const STREAM = 1 << 9;
        /// Allows guild members to view a channel, which includes reading messages in text channels
        ///
        /// T, V, S
        const VIEW_CHANNEL = 1 << 10;
        /// Allows for sending messages in a channel
        ///
        /// T
        const SEND_MESSAGES = 1 << 11;
        /// Allows for sending of /tts messages
        ///
        /// T
        const SEND_TTS_MESSAGES = 1 << 12;
        /// Allows for deletion of other users messages
        ///
        /// T
        const MANAGE_MESSAGES = 1 << 13;
        /// Links sent by users with this permission will be auto-embedded
        ///
        /// T
        const EMBED_LINKS = 1 << 14;
        /// Allows for uploading images and files
        ///
        /// T
        const ATTACH_FILES = 1 << 15;
        /// Allows for reading of message history
        ///
        /// T
        const READ_MESSAGE_HISTORY = 1 << 16;
        /// Allows for using the @everyone tag to notify all users in a channel, and the `@here` tag
        /// to notify all online users in a channel
        ///
        /// T
        const MENTION_EVERYONE = 1 << 17;
        /// Allows the usage of custom emojis from other servers
        ///
        /// T
        const USE_EXTERNAL_EMOJIS = 1 << 18;
        /// Allows for viewing guild insights
        const VIEW_GUILD_INSIGHTS = 1 << 19;
        /// Allows for joining of a voice channel
        ///
        /// V, S
        const CONNECT = 1 << 20;
        /// Allows for speaking in a voice channel
        ///
        /// V
        const SPEAK = 1 << 21;
        /// Allows for muting members in a voice channel
        ///
        /// V, S
        const MUTE_MEMBERS = 1 << 22;
        /// Allows for deafening of members in a voice channel
        ///
        /// V, S
        const DEAFEN_MEMBERS = 1 << 23;
        /// Allows for moving of members between voice channels
        ///
        /// V, S
        const MOVE_MEMBERS = 1 << 24;
        /// Allows for using voice-activity-detection in a voice channel
        ///
        /// V, S
        const USE_VAD = 1 << 25;
        /// Allows for modification of own nickname
        const CHANGE_NICKNAME = 1 << 26;
        /// Allows for modification of other users nicknames
        const MANAGE_NICKNAMES = 1 << 27;
        /// Allows management and editing of roles
        ///
        /// T, V, S
        const MANAGE_ROLES = 1 << 28;
        /// Allows management and editing of webhooks
        ///
        /// T
        const MANAGE_WEBHOOKS = 1 << 29;
        /// Allows management and editing of emojis and stickers
        const MANAGE_EMOJIS_AND_STICKERS = 1 << 30;
        /// Allows members to use application commands, including slash commands and context menu
        /// commands.
        ///
        /// T
        const USE_APPLICATION_COMMANDS = 1 << 31;
        /// Allows for requesting to speak in stage channels
        ///
        /// S
        const REQUEST_TO_SPEAK = 1 << 32;
        /// Allows for creating, editing, and deleting scheduled events
        ///
        /// V, S
        const MANAGE_EVENTS = 1 << 33;
        /// Allows for deleting and archiving threads, and viewing all private threads
        ///
        /// T
        const MANAGE_THREADS = 1 << 34;
        /// Allows for creating and participating in threads
        ///
        /// T
        const USE_PUBLIC_THREADS = 1 << 35;
        /// Allows for creating and participating in private threads
        ///
        /// T
        const USE_PRIVATE_THREADS = 1 << 36;
        /// Allows the usage of custom stickers from other servers
        ///
        /// T
        const USE_EXTERNAL_STICKERS = 1 << 37;
        /// Allows for sending messages in threads
        ///
        /// T
        const SEND_MESSAGES_IN_THREADS = 1 << 38;
        /// Allows for launching activities (applications with the EMBEDDED flag) in a voice channel
        ///
        /// V
        const START_EMBEDDED_ACTIVITIES = 1 << 39;
        /// Allows for timing out users to prevent them from sending or reacting to messages in chat
        /// and threads, and from speaking in voice and stage channels
        const MODERATE_MEMBERS = 1 << 40;
        /// Allows for viewing role subscription insights
        const VIEW_CREATOR_MONETIZATION_ANALYTICS = 1 << 41;
        /// Allows for using soundboard in a voice channel
        ///
        /// V
        const USE_SOUNDBOARD = 1 << 42;
        /// Allows the usage of custom soundboard sounds from other servers
        ///
        /// V
        const USE_EXTERNAL_SOUNDS = 1 << 45;
        /// Allows sending voice messages
        ///
        /// T, V, S
        const SEND_VOICE_MESSAGES = 1 << 46;
    }
}

// composites
impl Permissions {
    pub const ALL_TEXT_MEMBERS: &'static [Self] = &[
        Self::VIEW_CHANNEL,
        Self::SEND_MESSAGES,
        Self::SEND_TTS_MESSAGES,
        Self::MANAGE_MESSAGES,
        Self::EMBED_LINKS,
        Self::ATTACH_FILES,
        Self::READ_MESSAGE_HISTORY,
        Self::MENTION_EVERYONE,
    ];
    /// Everything needed to fully use a text channel
    pub const ALL_TEXT: Self = Self::compose(Self::ALL_TEXT_MEMBERS);

    pub const ALL_VOICE_MEMBERS: &'static [Self] = &[
        Self::VIEW_CHANNEL,
        Self::CONNECT,
        Self::SPEAK,
        Self::MUTE_MEMBERS,
        Self::DEAFEN_MEMBERS,
        Self::MOVE_MEMBERS,
        Self::USE_VAD,
        Self::PRIORITY_SPEAKER,
    ];
    /// Everything needed to fully use (and moderate) a voice channel
    pub const ALL_VOICE: Self = Self::compose(Self::ALL_VOICE_MEMBERS);

    pub const ALL_CHANNEL_MEMBERS: &'static [Self] = &[
        Self::ALL_TEXT,
        Self::ALL_VOICE,
        Self::CREATE_INSTANT_INVITE,
        Self::MANAGE_ROLES,
        Self::MANAGE_CHANNELS,
        Self::ADD_REACTIONS,
        Self::VIEW_AUDIT_LOG,
    ];
    /// [`ALL_TEXT`](Self::ALL_TEXT) and [`ALL_VOICE`](Self::ALL_VOICE), plus channel management
    pub const ALL_CHANNEL: Self = Self::compose(Self::ALL_CHANNEL_MEMBERS);

    pub const ALL_MEMBERS: &'static [Self] = &[
        Self::ALL_CHANNEL,
        Self::KICK_MEMBERS,
        Self::BAN_MEMBERS,
        Self::MANAGE_GUILD,
        Self::ADMINISTRATOR,
        Self::MANAGE_WEBHOOKS,
        Self::MANAGE_EMOJIS_AND_STICKERS,
    ];
    /// The classic "all permissions" set: [`ALL_CHANNEL`](Self::ALL_CHANNEL) plus guild
    /// management.
    ///
    /// This is not the same as [`Permissions::all`], which is every flag defined on this type.
    pub const ALL: Self = Self::compose(Self::ALL_MEMBERS);

    /// The union of `members`.
    pub const fn compose(members: &[Self]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < members.len() {
            bits |= members[i].bits();
            i += 1;
        }
        Self::from_bits_retain(bits)
    }

    /// Whether every bit of `permission` is set in `self`. Only some of them isn't enough.
    pub const fn has_permission(self, permission: Self) -> bool {
        self.bits() & permission.bits() == permission.bits()
    }
}

impl Permissions {
    /// The permissions `member` has in `guild`, before any channel's overwrites.
    ///
    /// The owner has every permission, as does anyone with [`ADMINISTRATOR`](Self::ADMINISTRATOR).
    /// Otherwise, this is the `@everyone` role's permissions combined with those of all of the
    /// member's roles.
    pub fn base(guild: &Guild, member: &GuildMember) -> Self {
        if guild.owner_id == Some(member.id()) { return Self::all(); }

        let everyone = guild.roles.get(guild.everyone_role())
            .map_or_else(Self::empty, |role| role.permissions);
        let permissions = member.roles.iter()
            .filter_map(|role| guild.roles.get(*role))
            .fold(everyone, |perms, role| perms | role.permissions);
        if permissions.contains(Self::ADMINISTRATOR) {
            Self::all()
        } else {
            permissions
        }
    }

    /// Apply a channel's permission `overwrites` to the [`base`](Self::base) permissions of
    /// `member`.
    ///
    /// The `@everyone` overwrite applies first, then all of the member's roles' overwrites
    /// together, then the overwrite for the member specifically. Denies are removed before allows
    /// are added at each step.
    pub fn apply_overwrites(
        self,
        member: &GuildMember,
        overwrites: &[PermissionOverwrite],
        everyone: RoleId,
    ) -> Self {
        // ADMINISTRATOR overrides any potential permission overwrites, so there is nothing to do here.
        if self.contains(Self::ADMINISTRATOR) { return Self::all(); }

        let (role_overwrites, member_overwrites): (HashMap<_, _>, HashMap<_, _>) = overwrites.iter()
            .filter_map(|overwrite| match overwrite.kind {
                PermissionOverwriteType::Role => Some(Either::Left((
                    RoleId(overwrite.id.0), (overwrite.allow, overwrite.deny)
                ))),
                PermissionOverwriteType::Member => Some(Either::Right((
                    UserId(overwrite.id.0), (overwrite.allow, overwrite.deny)
                ))),
                PermissionOverwriteType::Unknown(kind) => {
                    log::debug!("skipping overwrite {} of unknown type {}", overwrite.id, kind);
                    None
                }
            })
            .partition_map(|either| either);

        let mut perms = self;

        // Find `@everyone` role overwrite and apply it.
        if let Some(&(allow, deny)) = role_overwrites.get(&everyone) {
            perms &= !deny;
            perms |= allow;
        }

        // Apply role specific overwrites.
        let (allow, deny) = member.roles.iter()
            .filter_map(|id| role_overwrites.get(id))
            .fold(
                (Self::empty(), Self::empty()),
                |(allow, deny), &(overwrite_allow, overwrite_deny)| (allow | overwrite_allow, deny | overwrite_deny),
            );
        perms &= !deny;
        perms |= allow;

        // Apply member specific overwrite.
        if let Some(&(allow, deny)) = member_overwrites.get(&member.id()) {
            perms &= !deny;
            perms |= allow;
        }

        perms
    }
}

// can't just use `serde_bitflag!` because the bitflags are sent as strings
impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct PermsVisitor;
        impl PermsVisitor {
            fn from_bits(bits: u64) -> Permissions {
                let unknown = bits & !Permissions::all().bits();
                if unknown != 0 {
                    log::debug!("unknown Permissions bits {:#x}", unknown);
                }
                Permissions::from_bits_retain(bits)
            }

            fn get_perms<E: Error>(s: &str) -> Result<Permissions, E> {
                let bits = s.parse()
                    .map_err(|e| E::custom(format!("Unable to parse bits as u64: {e}")))?;
                Ok(Self::from_bits(bits))
            }
        }
        impl<'de> Visitor<'de> for PermsVisitor {
            type Value = Permissions;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("string (permissions)")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> where E: Error {
                Self::get_perms(v)
            }

            fn visit_borrowed_str<E>(self, v: &'de str) -> Result<Self::Value, E> where E: Error {
                Self::get_perms(v)
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E> where E: Error {
                Self::get_perms(&v)
            }

            // older api versions sent a plain integer
            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> where E: Error {
                Ok(Self::from_bits(v))
            }
        }

        d.deserialize_any(PermsVisitor)
    }
}

impl Serialize for Permissions {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.bits().to_string())
    }
}

/// Roles represent a set of permissions attached to a group of users. Roles have unique names,
/// colors, and can be "pinned" to the side bar, causing their members to be listed separately.
/// Roles are unique per guild, and can have separate permission profiles for the global context
/// (guild) and channel context. The `@everyone` role has the same ID as the guild it belongs to.
/// Roles without colors (`color == 0`) do not count towards the final computed color in the user
/// list.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Role {
    /// role id
    pub id: RoleId,
    /// role name
    pub name: String,
    /// integer representation of hexadecimal color code
    pub color: u32,
    /// if this role is pinned in the user listing
    pub hoist: bool,
    /// position of this role
    pub position: i32,
    /// permission bit set
    pub permissions: Permissions,
    /// whether this role is managed by an integration
    pub managed: bool,
    /// whether this role is mentionable
    pub mentionable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<RoleTags>,
}
id_impl!(Role => RoleId);

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleTags {
    /// the id of the bot this role belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<UserId>,
    /// the id of the integration this role belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_id: Option<IntegrationId>,
    /// whether this is the guild's premium subscriber role
    ///
    /// Discord sends this as `"premium_subscriber": null` when true, and leaves it out when false.
    #[serde(
        default,
        deserialize_with = "present_as_true",
        serialize_with = "true_as_null",
        skip_serializing_if = "bool::is_false",
    )]
    pub premium_subscriber: bool,
}

fn present_as_true<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    serde::de::IgnoredAny::deserialize(d)?;
    Ok(true)
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn true_as_null<S: Serializer>(_: &bool, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_none()
}

/// Sort `roles` the way Discord lists them, highest [`position`](Role::position) first.
pub fn sort_roles(roles: &mut [Role]) {
    roles.sort_by(|a, b| b.position.cmp(&a.position));
}
